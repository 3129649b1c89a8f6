use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;

/// Tolerance used when deciding whether an in-range vector already sums to 1.
pub const SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("output vector is empty")]
    Empty,
    #[error("output vector has non-finite value {value} at index {index}")]
    NonFinite { index: usize, value: f64 },
    #[error("output vector has zero total probability mass")]
    ZeroMass,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub index: usize,
    pub label: String,
    pub probability: f64,
}

/// Predictions sorted by probability, highest first. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPrediction {
    ranked: Vec<Prediction>,
}

impl RankedPrediction {
    pub fn top(&self) -> &Prediction {
        &self.ranked[0]
    }

    pub fn ranked(&self) -> &[Prediction] {
        &self.ranked
    }

    #[allow(dead_code)]
    pub fn labels(&self) -> Vec<&str> {
        self.ranked.iter().map(|p| p.label.as_str()).collect()
    }

    #[allow(dead_code)]
    pub fn probabilities(&self) -> Vec<f64> {
        self.ranked.iter().map(|p| p.probability).collect()
    }
}

/// Turns a raw model output vector into a ranked prediction.
///
/// Vectors whose values all lie in `[0, 1]` are read as probabilities, anything
/// else as logits and passed through a max-shifted softmax. Labels missing for
/// an index are filled with `"Class {index}"`.
pub fn rank(raw: &[f64], labels: &[String]) -> Result<RankedPrediction, InvalidInputError> {
    validate(raw)?;

    let probabilities = normalize(raw)?;

    let mut ranked: Vec<Prediction> = probabilities
        .into_iter()
        .enumerate()
        .map(|(index, probability)| Prediction {
            index,
            label: label_for(labels, index),
            probability,
        })
        .collect();

    // sort_by is stable, equal probabilities keep index order
    ranked.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(Ordering::Equal)
    });

    Ok(RankedPrediction { ranked })
}

fn validate(raw: &[f64]) -> Result<(), InvalidInputError> {
    if raw.is_empty() {
        return Err(InvalidInputError::Empty);
    }

    match raw.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(InvalidInputError::NonFinite {
            index,
            value: raw[index],
        }),
        None => Ok(()),
    }
}

fn normalize(raw: &[f64]) -> Result<Vec<f64>, InvalidInputError> {
    if is_probability_range(raw) {
        let sum: f64 = raw.iter().sum();
        if (sum - 1.0).abs() <= SUM_TOLERANCE {
            return Ok(raw.to_vec());
        }
        if sum == 0.0 {
            return Err(InvalidInputError::ZeroMass);
        }
        return Ok(raw.iter().map(|v| v / sum).collect());
    }

    Ok(softmax(raw))
}

fn is_probability_range(raw: &[f64]) -> bool {
    raw.iter().all(|v| (0.0..=1.0).contains(v))
}

/// Max-shifted softmax. The max element maps to exp(0) = 1, so the sum is at least 1.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|v| (v - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

fn label_for(labels: &[String], index: usize) -> String {
    labels
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("Class {}", index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} to be within {} of {}",
            actual,
            tolerance,
            expected
        );
    }

    #[test]
    fn test_softmax_reference_values() {
        let result = rank(&[2.0, 1.0, 0.1], &labels(&["Cat", "Dog", "Bird"])).unwrap();

        assert_eq!(result.labels(), vec!["Cat", "Dog", "Bird"]);
        assert_eq!(result.top().label, "Cat");
        assert_close(result.ranked()[0].probability, 0.659, 1e-3);
        assert_close(result.ranked()[1].probability, 0.242, 1e-3);
        assert_close(result.ranked()[2].probability, 0.099, 1e-3);
    }

    #[test]
    fn test_probabilities_pass_through_unchanged() {
        let raw = [0.1, 0.6, 0.3];
        let result = rank(&raw, &labels(&["A", "B", "C"])).unwrap();

        assert_eq!(result.labels(), vec!["B", "C", "A"]);
        for prediction in result.ranked() {
            assert_eq!(prediction.probability, raw[prediction.index]);
        }
    }

    #[test]
    fn test_logits_sum_to_one() {
        let cases: Vec<Vec<f64>> = vec![
            vec![-3.0, 4.5, 0.0, 12.25],
            vec![1.5, -1.5],
            vec![7.0],
            vec![-0.5, -0.25, -10.0, 3.0, 2.0],
        ];

        for raw in cases {
            let result = rank(&raw, &[]).unwrap();
            let sum: f64 = result.probabilities().iter().sum();
            assert_close(sum, 1.0, 1e-6);
            assert_eq!(result.ranked().len(), raw.len());
            for p in result.probabilities() {
                assert!((0.0..=1.0).contains(&p));
            }
        }
    }

    #[test]
    fn test_large_logits_do_not_overflow() {
        let result = rank(&[1000.0, 999.0, -1000.0], &[]).unwrap();

        let sum: f64 = result.probabilities().iter().sum();
        assert_close(sum, 1.0, 1e-6);
        assert_eq!(result.top().index, 0);
        assert_close(result.top().probability, 0.7310585786, 1e-9);
        assert_eq!(result.ranked()[2].probability, 0.0);
    }

    #[test]
    fn test_softmax_is_shift_invariant() {
        let raw = [2.0, -1.0, 3.5, 0.25];
        let base = rank(&raw, &[]).unwrap();

        for shift in [-250.0, -3.0, 1.5, 40.0, 600.0] {
            let shifted: Vec<f64> = raw.iter().map(|v| v + shift).collect();
            let result = rank(&shifted, &[]).unwrap();

            assert_eq!(result.labels(), base.labels());
            for (a, b) in result.ranked().iter().zip(base.ranked()) {
                assert_close(a.probability, b.probability, 1e-9);
            }
        }
    }

    #[test]
    fn test_ties_keep_original_order() {
        let result = rank(&[0.5, 0.5], &labels(&["A", "B"])).unwrap();
        assert_eq!(result.labels(), vec!["A", "B"]);

        let result = rank(&[1.0, 3.0, 3.0, 1.0], &labels(&["W", "X", "Y", "Z"])).unwrap();
        assert_eq!(result.labels(), vec!["X", "Y", "W", "Z"]);
    }

    #[test]
    fn test_missing_labels_are_synthesized() {
        let result = rank(&[0.2, 0.3, 0.5], &labels(&["OnlyOne"])).unwrap();

        assert_eq!(result.labels(), vec!["Class 2", "Class 1", "OnlyOne"]);
        assert_eq!(result.top().index, 2);
    }

    #[test]
    fn test_extra_labels_are_ignored() {
        let result = rank(&[0.9, 0.1], &labels(&["A", "B", "C", "D"])).unwrap();

        assert_eq!(result.ranked().len(), 2);
        assert_eq!(result.labels(), vec!["A", "B"]);
    }

    #[test]
    fn test_sum_within_tolerance_passes_through() {
        let raw = [0.3333333, 0.3333333, 0.3333334];
        let result = rank(&raw, &labels(&["A", "B", "C"])).unwrap();

        assert_eq!(result.top().label, "C");
        for prediction in result.ranked() {
            assert_eq!(prediction.probability, raw[prediction.index]);
        }

        // just outside the tolerance the vector is rescaled
        let raw = [0.25, 0.25, 0.499990];
        let result = rank(&raw, &[]).unwrap();
        let sum: f64 = result.probabilities().iter().sum();
        assert_close(sum, 1.0, 1e-12);
        assert!(result.top().probability > raw[2]);
    }

    #[test]
    fn test_in_range_vector_is_rescaled_by_its_sum() {
        let result = rank(&[0.5, 0.5, 0.5, 0.5], &[]).unwrap();

        for p in result.probabilities() {
            assert_close(p, 0.25, 1e-12);
        }
    }

    #[test]
    fn test_empty_vector_is_rejected() {
        assert_eq!(rank(&[], &labels(&["A"])), Err(InvalidInputError::Empty));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let err = rank(&[0.1, f64::NAN, 0.2], &[]).unwrap_err();
        assert!(matches!(err, InvalidInputError::NonFinite { index: 1, .. }));

        let err = rank(&[f64::INFINITY, 1.0], &[]).unwrap_err();
        assert!(matches!(err, InvalidInputError::NonFinite { index: 0, .. }));

        let err = rank(&[2.0, f64::NEG_INFINITY], &[]).unwrap_err();
        assert!(matches!(err, InvalidInputError::NonFinite { index: 1, .. }));
    }

    #[test]
    fn test_all_zero_vector_is_rejected() {
        assert_eq!(rank(&[0.0, 0.0, 0.0], &[]), Err(InvalidInputError::ZeroMass));
    }

    #[test]
    fn test_rank_is_deterministic() {
        let raw = [0.3, -2.0, 5.0, 5.0, 1.0];
        let names = labels(&["a", "b", "c", "d", "e"]);

        assert_eq!(rank(&raw, &names).unwrap(), rank(&raw, &names).unwrap());
    }

    #[test]
    fn test_rank_can_run_on_many_threads() {
        let names = std::sync::Arc::new(labels(&["Cat", "Dog", "Bird"]));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let names = names.clone();
                std::thread::spawn(move || rank(&[i as f64, 1.0, 0.1], &names).unwrap())
            })
            .collect();

        for handle in handles {
            let result = handle.join().unwrap();
            let sum: f64 = result.probabilities().iter().sum();
            assert_close(sum, 1.0, 1e-6);
        }
    }
}
