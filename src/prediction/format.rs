use crate::prediction::ranker::RankedPrediction;

pub fn format_percentage(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

pub fn headline(prediction: &RankedPrediction) -> String {
    let top = prediction.top();
    format!(
        "Prediction: {} ({})",
        top.label,
        format_percentage(top.probability)
    )
}

/// One `label: percentage` line per class, highest first.
pub fn rows(prediction: &RankedPrediction) -> Vec<String> {
    prediction
        .ranked()
        .iter()
        .map(|p| format!("{}: {}", p.label, format_percentage(p.probability)))
        .collect()
}

pub fn bar(probability: f64, width: usize) -> String {
    let filled = ((probability.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), " ".repeat(width - filled))
}
