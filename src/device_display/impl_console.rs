use crate::device_display::interface::DeviceDisplay;
use crate::prediction::format::{bar, format_percentage, headline};
use crate::prediction::ranker::RankedPrediction;
use crate::session::core::Source;
use std::error::Error;

const BAR_WIDTH: usize = 20;

/// Prints to stdout, only when something changed since the last render.
pub struct DeviceDisplayConsole {
    status: Option<String>,
    image: Option<RankedPrediction>,
    camera: Option<RankedPrediction>,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self {
            status: None,
            image: None,
            camera: None,
        }
    }

    fn slot(&mut self, source: Source) -> &mut Option<RankedPrediction> {
        match source {
            Source::Image => &mut self.image,
            Source::Camera => &mut self.camera,
        }
    }
}

pub fn render_prediction(source: Source, prediction: &RankedPrediction) -> Vec<String> {
    let title = match source {
        Source::Image => "Image",
        Source::Camera => "Camera",
    };
    let label_width = prediction
        .ranked()
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = vec![format!("┌ {} ─ {}", title, headline(prediction))];
    for p in prediction.ranked() {
        lines.push(format!(
            "│ {:<width$}  {:>7}  {}",
            p.label,
            format_percentage(p.probability),
            bar(p.probability, BAR_WIDTH),
            width = label_width
        ));
    }
    lines.push("└".to_string());
    lines
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn set_status(&mut self, status: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.status.as_deref() == Some(status) {
            return Ok(());
        }
        println!("» {}", status);
        self.status = Some(status.to_string());
        Ok(())
    }

    fn show_prediction(
        &mut self,
        source: Source,
        prediction: &RankedPrediction,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let slot = self.slot(source);
        if slot.as_ref() == Some(prediction) {
            return Ok(());
        }
        *slot = Some(prediction.clone());

        for line in render_prediction(source, prediction) {
            println!("{}", line);
        }
        Ok(())
    }

    fn clear_prediction(&mut self, source: Source) -> Result<(), Box<dyn Error + Send + Sync>> {
        *self.slot(source) = None;
        Ok(())
    }
}
