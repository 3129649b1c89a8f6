#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub name: String,
    pub output_len: usize,
}

/// Runs a trained model's forward pass. Resizing and pixel normalization are the
/// provider's job; it returns one raw value per output unit.
pub trait InferenceProvider: Send + Sync {
    fn load(&self) -> Result<ModelInfo, Box<dyn std::error::Error + Send + Sync>>;

    fn infer(&self, pixels: &[u8]) -> Result<Vec<f64>, Box<dyn std::error::Error + Send + Sync>>;

    fn input_size(&self) -> u32;

    /// Runs one inference on a black frame so the first real call is not slow.
    fn warm_up(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let size = self.input_size() as usize;
        self.infer(&vec![0; size * size * 3])?;
        Ok(())
    }
}
