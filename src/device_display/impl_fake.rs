use crate::device_display::interface::DeviceDisplay;
use crate::prediction::ranker::RankedPrediction;
use crate::session::core::Source;
use std::error::Error;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    Init,
    Status(String),
    Prediction(Source, RankedPrediction),
    Clear(Source),
}

/// Records every call. Clones share the same record.
#[derive(Clone, Default)]
pub struct DeviceDisplayFake {
    calls: Arc<Mutex<Vec<DisplayCall>>>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<DisplayCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn predictions(&self, source: Source) -> Vec<RankedPrediction> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DisplayCall::Prediction(s, prediction) if s == source => Some(prediction),
                _ => None,
            })
            .collect()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DisplayCall::Status(status) => Some(status),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: DisplayCall) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(DisplayCall::Init);
        Ok(())
    }

    fn set_status(&mut self, status: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(DisplayCall::Status(status.to_string()));
        Ok(())
    }

    fn show_prediction(
        &mut self,
        source: Source,
        prediction: &RankedPrediction,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(DisplayCall::Prediction(source, prediction.clone()));
        Ok(())
    }

    fn clear_prediction(&mut self, source: Source) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(DisplayCall::Clear(source));
        Ok(())
    }
}
