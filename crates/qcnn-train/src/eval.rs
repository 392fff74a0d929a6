//! Classification metrics.
//!
//! The per-sample score is the probability the model assigns to the true
//! label. Cost is one minus the mean score; accuracy is the fraction of
//! samples whose score clears 0.5.

use crate::error::TrainResult;
use crate::model::QcnnModel;

/// Cost and accuracy of a weight vector on one labeled set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub cost: f64,
    pub accuracy: f64,
}

/// Probability assigned to the true label, per sample.
pub fn label_scores(
    model: &QcnnModel,
    weights: &[f64],
    features: &[Vec<f64>],
    labels: &[usize],
) -> TrainResult<Vec<f64>> {
    features
        .iter()
        .zip(labels)
        .map(|(sample, &label)| Ok(model.predict(weights, sample)?[label]))
        .collect()
}

/// Fraction of scores above 0.5.
pub fn accuracy(scores: &[f64]) -> f64 {
    let hits = scores.iter().filter(|&&s| s > 0.5).count();
    hits as f64 / scores.len() as f64
}

/// One minus the mean score.
pub fn cost(scores: &[f64]) -> f64 {
    1.0 - scores.iter().sum::<f64>() / scores.len() as f64
}

/// Evaluate a weight vector on a labeled set in one pass.
pub fn evaluate(
    model: &QcnnModel,
    weights: &[f64],
    features: &[Vec<f64>],
    labels: &[usize],
) -> TrainResult<Evaluation> {
    let scores = label_scores(model, weights, features, labels)?;
    Ok(Evaluation {
        cost: cost(&scores),
        accuracy: accuracy(&scores),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accuracy_counts_confident_scores() {
        assert_eq!(accuracy(&[0.9, 0.4, 0.6, 0.5]), 0.5);
        assert_eq!(accuracy(&[0.51, 0.99]), 1.0);
        assert_eq!(accuracy(&[0.1, 0.5]), 0.0);
    }

    #[test]
    fn test_cost_is_one_minus_mean() {
        assert!((cost(&[1.0, 1.0]) - 0.0).abs() < 1e-12);
        assert!((cost(&[0.25, 0.75]) - 0.5).abs() < 1e-12);
        assert!((cost(&[0.0]) - 1.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_accuracy_in_unit_interval(scores in prop::collection::vec(0.0..1.0f64, 1..64)) {
            let a = accuracy(&scores);
            prop_assert!((0.0..=1.0).contains(&a));
        }

        #[test]
        fn prop_perfect_accuracy_iff_all_confident(scores in prop::collection::vec(0.0..1.0f64, 1..64)) {
            let all_confident = scores.iter().all(|&s| s > 0.5);
            prop_assert_eq!(accuracy(&scores) == 1.0, all_confident);
        }

        #[test]
        fn prop_metrics_are_order_invariant(scores in prop::collection::vec(0.0..1.0f64, 1..64)) {
            let mut reversed = scores.clone();
            reversed.reverse();
            prop_assert!((accuracy(&scores) - accuracy(&reversed)).abs() < 1e-12);
            prop_assert!((cost(&scores) - cost(&reversed)).abs() < 1e-12);
        }

        #[test]
        fn prop_cost_bounded_by_scores(scores in prop::collection::vec(0.0..1.0f64, 1..64)) {
            let c = cost(&scores);
            prop_assert!(c > -1e-12 && c < 1.0 + 1e-12);
        }
    }
}
