use crate::config::{OutputKind, PixelRange};
use crate::inference::interface::{InferenceProvider, ModelInfo};
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

enum Source {
    Random { output_len: usize, kind: OutputKind },
    Scripted { outputs: Vec<Vec<f64>>, next: AtomicUsize },
    Missing,
}

pub struct InferenceFake {
    logger: Arc<dyn Logger + Send + Sync>,
    model_path: PathBuf,
    input_size: u32,
    pixel_range: PixelRange,
    loaded: AtomicBool,
    source: Source,
}

impl InferenceFake {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        model_path: PathBuf,
        input_size: u32,
        pixel_range: PixelRange,
        output_len: usize,
        kind: OutputKind,
    ) -> Self {
        Self {
            logger: logger.with_namespace("inference").with_namespace("fake"),
            model_path,
            input_size,
            pixel_range,
            loaded: AtomicBool::new(false),
            source: Source::Random { output_len, kind },
        }
    }

    /// Replays `outputs` in order, wrapping around after the last one.
    #[allow(dead_code)]
    pub fn scripted(logger: Arc<dyn Logger + Send + Sync>, outputs: Vec<Vec<f64>>) -> Self {
        Self {
            logger: logger.with_namespace("inference").with_namespace("fake"),
            model_path: PathBuf::from("scripted"),
            input_size: 4,
            pixel_range: PixelRange::ZeroToOne,
            loaded: AtomicBool::new(false),
            source: Source::Scripted {
                outputs,
                next: AtomicUsize::new(0),
            },
        }
    }

    /// A provider whose model can never be loaded.
    #[allow(dead_code)]
    pub fn missing(logger: Arc<dyn Logger + Send + Sync>, model_path: PathBuf) -> Self {
        Self {
            logger: logger.with_namespace("inference").with_namespace("fake"),
            model_path,
            input_size: 4,
            pixel_range: PixelRange::ZeroToOne,
            loaded: AtomicBool::new(false),
            source: Source::Missing,
        }
    }

    fn random_output(
        output_len: usize,
        kind: OutputKind,
    ) -> Result<Vec<f64>, Box<dyn std::error::Error + Send + Sync>> {
        let mut rng = rand::rng();

        match kind {
            OutputKind::Logits => {
                let logit_dist = Uniform::new(-6.0, 6.0)?;
                Ok((0..output_len).map(|_| logit_dist.sample(&mut rng)).collect())
            }
            OutputKind::Probabilities => {
                let weight_dist = Uniform::new(0.01, 1.0)?;
                let weights: Vec<f64> = (0..output_len)
                    .map(|_| weight_dist.sample(&mut rng))
                    .collect();
                let sum: f64 = weights.iter().sum();
                Ok(weights.into_iter().map(|w| w / sum).collect())
            }
        }
    }
}

impl InferenceProvider for InferenceFake {
    fn load(&self) -> Result<ModelInfo, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!(
            "Loading model from {} (input {}x{}, pixels {:?})",
            self.model_path.display(),
            self.input_size,
            self.input_size,
            self.pixel_range
        ))?;

        let output_len = match &self.source {
            Source::Random { output_len, .. } => *output_len,
            Source::Scripted { outputs, .. } => outputs.first().map(|o| o.len()).unwrap_or(0),
            Source::Missing => {
                return Err(format!("model not found: {}", self.model_path.display()).into());
            }
        };

        self.loaded.store(true, Ordering::SeqCst);
        self.logger.info("Model loaded")?;

        Ok(ModelInfo {
            name: self.model_path.display().to_string(),
            output_len,
        })
    }

    fn infer(&self, pixels: &[u8]) -> Result<Vec<f64>, Box<dyn std::error::Error + Send + Sync>> {
        if !self.loaded.load(Ordering::SeqCst) {
            return Err("model is not loaded".into());
        }

        self.logger
            .info(&format!("Running inference on {} bytes", pixels.len()))?;

        match &self.source {
            Source::Random { output_len, kind } => Self::random_output(*output_len, *kind),
            Source::Scripted { outputs, next } => {
                if outputs.is_empty() {
                    return Ok(vec![]);
                }
                let index = next.fetch_add(1, Ordering::SeqCst) % outputs.len();
                Ok(outputs[index].clone())
            }
            Source::Missing => Err("model is not loaded".into()),
        }
    }

    fn input_size(&self) -> u32 {
        self.input_size
    }
}
