use crate::prediction::ranker::RankedPrediction;
use crate::session::core::Source;
use std::error::Error;

/// Shows the status line and one prediction slot per [`Source`].
///
/// Percentage formatting and layout belong to the implementation.
pub trait DeviceDisplay: Send + Sync {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn set_status(&mut self, status: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn show_prediction(
        &mut self,
        source: Source,
        prediction: &RankedPrediction,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn clear_prediction(&mut self, source: Source) -> Result<(), Box<dyn Error + Send + Sync>>;
}
