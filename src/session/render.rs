use crate::device_display::interface::DeviceDisplay;
use crate::session::core::{ModelStatus, Source, State};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
}

impl Render {
    pub fn new(device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>) -> Self {
        Self { device_display }
    }

    pub fn init(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.device_display
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .init()
    }

    pub fn render(&self, state: &State) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut device_display = self
            .device_display
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match &state.model {
            ModelStatus::Failed(reason) => {
                device_display.set_status(&format!("{} ({})", state.status, reason))?;
            }
            _ => device_display.set_status(&state.status)?,
        }

        for source in [Source::Image, Source::Camera] {
            match state.result(source) {
                Some(prediction) => device_display.show_prediction(source, prediction)?,
                None => device_display.clear_prediction(source)?,
            }
        }

        Ok(())
    }
}
