use crate::prediction::labels::{default_labels, load_labels, LabelsError};
use chrono::Offset;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PixelRange {
    ZeroToOne,
    MinusOneToOne,
}

/// What the model's output head produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputKind {
    Logits,
    Probabilities,
}

impl OutputKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "logits" => Some(OutputKind::Logits),
            "probabilities" | "softmax" => Some(OutputKind::Probabilities),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayKind {
    Console,
    Json,
    Gui,
}

impl DisplayKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "console" => Some(DisplayKind::Console),
            "json" => Some(DisplayKind::Json),
            "gui" => Some(DisplayKind::Gui),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub labels: Vec<String>,
    pub model_path: PathBuf,
    pub input_size: u32,
    pub pixel_range: PixelRange,
    pub output_kind: OutputKind,
    pub auto_interval: Duration,
    pub frame_width: u32,
    pub frame_height: u32,
    pub display: DisplayKind,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            labels: default_labels(),
            model_path: PathBuf::from("model/model.json"),
            input_size: 224,
            pixel_range: PixelRange::ZeroToOne,
            output_kind: OutputKind::Logits,
            auto_interval: Duration::from_millis(500),
            frame_width: 640,
            frame_height: 480,
            display: DisplayKind::Console,
            logger_timezone: utc(),
        }
    }
}

impl Config {
    /// Defaults overridden by `LIVE_CLASSIFIER_*` environment variables.
    pub fn from_env() -> Result<Self, LabelsError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, LabelsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = var("LIVE_CLASSIFIER_LABELS") {
            config.labels = load_labels(&PathBuf::from(path))?;
        }
        if let Some(path) = var("LIVE_CLASSIFIER_MODEL") {
            config.model_path = PathBuf::from(path);
        }
        if let Some(display) = var("LIVE_CLASSIFIER_DISPLAY").and_then(|v| DisplayKind::parse(&v)) {
            config.display = display;
        }
        if let Some(millis) = var("LIVE_CLASSIFIER_AUTO_INTERVAL_MS").and_then(|v| v.parse().ok()) {
            config.auto_interval = Duration::from_millis(millis);
        }
        if let Some(kind) = var("LIVE_CLASSIFIER_OUTPUT").and_then(|v| OutputKind::parse(&v)) {
            config.output_kind = kind;
        }
        if var("LIVE_CLASSIFIER_PIXEL_RANGE").as_deref() == Some("-1..1") {
            config.pixel_range = PixelRange::MinusOneToOne;
        }

        Ok(config)
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}
