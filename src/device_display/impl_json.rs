use crate::device_display::interface::DeviceDisplay;
use crate::prediction::ranker::{Prediction, RankedPrediction};
use crate::session::core::Source;
use serde::Serialize;
use std::error::Error;
use std::io::Write;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Report<'a> {
    Status {
        status: &'a str,
    },
    Prediction {
        source: Source,
        top: &'a Prediction,
        ranked: &'a [Prediction],
    },
}

/// Writes one JSON object per line for another program to consume.
pub struct DeviceDisplayJson<W: Write + Send + Sync> {
    writer: W,
    status: Option<String>,
    image: Option<RankedPrediction>,
    camera: Option<RankedPrediction>,
}

impl DeviceDisplayJson<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send + Sync> DeviceDisplayJson<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            status: None,
            image: None,
            camera: None,
        }
    }

    #[allow(dead_code)]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_report(&mut self, report: &Report) -> Result<(), Box<dyn Error + Send + Sync>> {
        serde_json::to_writer(&mut self.writer, report)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write + Send + Sync> DeviceDisplay for DeviceDisplayJson<W> {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn set_status(&mut self, status: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.status.as_deref() == Some(status) {
            return Ok(());
        }
        self.write_report(&Report::Status { status })?;
        self.status = Some(status.to_string());
        Ok(())
    }

    fn show_prediction(
        &mut self,
        source: Source,
        prediction: &RankedPrediction,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let previous = match source {
            Source::Image => &self.image,
            Source::Camera => &self.camera,
        };
        if previous.as_ref() == Some(prediction) {
            return Ok(());
        }

        self.write_report(&Report::Prediction {
            source,
            top: prediction.top(),
            ranked: prediction.ranked(),
        })?;

        match source {
            Source::Image => self.image = Some(prediction.clone()),
            Source::Camera => self.camera = Some(prediction.clone()),
        }
        Ok(())
    }

    fn clear_prediction(&mut self, source: Source) -> Result<(), Box<dyn Error + Send + Sync>> {
        match source {
            Source::Image => self.image = None,
            Source::Camera => self.camera = None,
        }
        Ok(())
    }
}
