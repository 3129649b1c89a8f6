use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelsError {
    #[error("failed to read labels file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Classes of the bundled leaf-health model, in training order.
pub fn default_labels() -> Vec<String> {
    vec![
        "Healthy_Red".to_string(),
        "Healthy_Green".to_string(),
        "BacterialLeafSpot_Green".to_string(),
        "AnthracnoseAffected_Green".to_string(),
    ]
}

/// One label per line. Surrounding whitespace is trimmed and blank lines are skipped.
pub fn parse_labels(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn load_labels(path: &Path) -> Result<Vec<String>, LabelsError> {
    let text = std::fs::read_to_string(path).map_err(|source| LabelsError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_labels(&text))
}
