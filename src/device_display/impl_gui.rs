use crate::device_display::interface::DeviceDisplay;
use crate::prediction::format::{headline, rows};
use crate::prediction::ranker::RankedPrediction;
use crate::session::core::Source;
use eframe::egui;
use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Screen {
    status: String,
    image: Option<RankedPrediction>,
    camera: Option<RankedPrediction>,
    closed: bool,
}

/// The native window. It has to run on the main thread, see [`PredictionWindow::run`].
#[derive(Clone)]
pub struct PredictionWindow {
    screen: Arc<Mutex<Screen>>,
}

impl PredictionWindow {
    /// Blocks until the window is closed.
    pub fn run(self) -> Result<(), eframe::Error> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([640.0, 360.0])
                .with_resizable(true),
            ..Default::default()
        };

        eframe::run_native("Live Classifier", options, Box::new(|_cc| Box::new(self)))
    }

    /// Asks the window to close on its next frame.
    pub fn close(&self) {
        self.screen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .closed = true;
    }

    fn prediction_panel(ui: &mut egui::Ui, title: &str, prediction: Option<&RankedPrediction>) {
        ui.heading(title);

        let prediction = match prediction {
            Some(prediction) => prediction,
            None => {
                ui.label("No prediction yet");
                return;
            }
        };

        ui.label(egui::RichText::new(headline(prediction)).strong());
        for (p, row) in prediction.ranked().iter().zip(rows(prediction)) {
            ui.add(egui::ProgressBar::new(p.probability as f32).text(row));
        }
    }
}

impl eframe::App for PredictionWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let screen = self
            .screen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if screen.closed {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(egui::RichText::new(&screen.status).monospace());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                Self::prediction_panel(&mut columns[0], "Image", screen.image.as_ref());
                Self::prediction_panel(&mut columns[1], "Camera", screen.camera.as_ref());
            });
        });

        // updates arrive from the session thread
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

pub struct DeviceDisplayGui {
    screen: Arc<Mutex<Screen>>,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self {
            screen: Arc::new(Mutex::new(Screen::default())),
        }
    }

    pub fn window(&self) -> PredictionWindow {
        PredictionWindow {
            screen: self.screen.clone(),
        }
    }

    fn screen(&self) -> std::sync::MutexGuard<'_, Screen> {
        self.screen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.screen().status = "Starting…".to_string();
        Ok(())
    }

    fn set_status(&mut self, status: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.screen().status = status.to_string();
        Ok(())
    }

    fn show_prediction(
        &mut self,
        source: Source,
        prediction: &RankedPrediction,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut screen = self.screen();
        match source {
            Source::Image => screen.image = Some(prediction.clone()),
            Source::Camera => screen.camera = Some(prediction.clone()),
        }
        Ok(())
    }

    fn clear_prediction(&mut self, source: Source) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut screen = self.screen();
        match source {
            Source::Image => screen.image = None,
            Source::Camera => screen.camera = None,
        }
        Ok(())
    }
}
