//! Synthetic two-class image dataset.
//!
//! 8x8 grayscale images of two shapes: a closed ring (class 0) and a
//! vertical stroke (class 1), each drawn as a fixed prototype plus pixel
//! noise. A fixed-size pool is generated from the seed and the train/test
//! split draws disjoint indices from it, so train and test never share a
//! sample.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tracing::debug;

use crate::error::{TrainError, TrainResult};

/// Image side length in pixels.
pub const IMAGE_SIDE: usize = 8;
/// Feature count per sample.
pub const NUM_FEATURES: usize = IMAGE_SIDE * IMAGE_SIDE;

/// Pool samples generated per class.
const POOL_PER_CLASS: usize = 180;
/// Pixel noise standard deviation.
const NOISE_SIGMA: f64 = 0.15;

/// A labeled train/test split.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub train_features: Vec<Vec<f64>>,
    pub train_labels: Vec<usize>,
    pub test_features: Vec<Vec<f64>>,
    pub test_labels: Vec<usize>,
}

impl Dataset {
    /// Number of training samples.
    pub fn n_train(&self) -> usize {
        self.train_features.len()
    }

    /// Number of test samples.
    pub fn n_test(&self) -> usize {
        self.test_features.len()
    }
}

/// Closed ring, the class-0 prototype.
fn ring_prototype() -> Array2<f64> {
    let mut img = Array2::zeros((IMAGE_SIDE, IMAGE_SIDE));
    for i in 1..IMAGE_SIDE - 1 {
        for j in 1..IMAGE_SIDE - 1 {
            let on_edge =
                i == 1 || i == IMAGE_SIDE - 2 || j == 1 || j == IMAGE_SIDE - 2;
            if on_edge {
                img[[i, j]] = 1.0;
            }
        }
    }
    // Soften the corners.
    for &(i, j) in &[(1, 1), (1, 6), (6, 1), (6, 6)] {
        img[[i, j]] = 0.5;
    }
    img
}

/// Vertical stroke with a serif, the class-1 prototype.
fn stroke_prototype() -> Array2<f64> {
    let mut img = Array2::zeros((IMAGE_SIDE, IMAGE_SIDE));
    for i in 1..IMAGE_SIDE - 1 {
        img[[i, 4]] = 1.0;
    }
    img[[1, 3]] = 0.7;
    img[[2, 3]] = 0.4;
    img
}

fn noisy_sample<R: Rng>(prototype: &Array2<f64>, rng: &mut R) -> Vec<f64> {
    prototype
        .iter()
        .map(|&pixel| {
            let noise: f64 = rng.sample(StandardNormal);
            (pixel + NOISE_SIGMA * noise).clamp(0.0, 1.0)
        })
        .collect()
}

/// Generate a seeded train/test split.
///
/// The pool holds `2 * 180` samples with alternating labels; `n_train +
/// n_test` of them are drawn without replacement. Both sizes must be
/// positive and their sum must fit in the pool.
pub fn generate_dataset(n_train: usize, n_test: usize, seed: u64) -> TrainResult<Dataset> {
    if n_train == 0 || n_test == 0 {
        return Err(TrainError::EmptySplit { n_train, n_test });
    }

    let pool_size = 2 * POOL_PER_CLASS;
    let requested = n_train + n_test;
    if requested > pool_size {
        return Err(TrainError::DatasetTooSmall {
            requested,
            available: pool_size,
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let ring = ring_prototype();
    let stroke = stroke_prototype();

    let mut pool_features = Vec::with_capacity(pool_size);
    let mut pool_labels = Vec::with_capacity(pool_size);
    for index in 0..pool_size {
        let label = index % 2;
        let prototype = if label == 0 { &ring } else { &stroke };
        pool_features.push(noisy_sample(prototype, &mut rng));
        pool_labels.push(label);
    }

    let picks = rand::seq::index::sample(&mut rng, pool_size, requested);
    let mut dataset = Dataset {
        train_features: Vec::with_capacity(n_train),
        train_labels: Vec::with_capacity(n_train),
        test_features: Vec::with_capacity(n_test),
        test_labels: Vec::with_capacity(n_test),
    };
    for (position, pick) in picks.iter().enumerate() {
        if position < n_train {
            dataset.train_features.push(pool_features[pick].clone());
            dataset.train_labels.push(pool_labels[pick]);
        } else {
            dataset.test_features.push(pool_features[pick].clone());
            dataset.test_labels.push(pool_labels[pick]);
        }
    }

    debug!(n_train, n_test, seed, "generated dataset");
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_and_ranges() {
        let ds = generate_dataset(10, 20, 0).unwrap();
        assert_eq!(ds.n_train(), 10);
        assert_eq!(ds.n_test(), 20);

        for sample in ds.train_features.iter().chain(&ds.test_features) {
            assert_eq!(sample.len(), NUM_FEATURES);
            assert!(sample.iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
        for &label in ds.train_labels.iter().chain(&ds.test_labels) {
            assert!(label <= 1);
        }
    }

    #[test]
    fn test_seed_determinism() {
        let a = generate_dataset(5, 5, 42).unwrap();
        let b = generate_dataset(5, 5, 42).unwrap();
        assert_eq!(a.train_features, b.train_features);
        assert_eq!(a.test_labels, b.test_labels);

        let c = generate_dataset(5, 5, 43).unwrap();
        assert_ne!(a.train_features, c.train_features);
    }

    #[test]
    fn test_both_classes_present() {
        let ds = generate_dataset(40, 100, 0).unwrap();
        assert!(ds.train_labels.contains(&0));
        assert!(ds.train_labels.contains(&1));
        assert!(ds.test_labels.contains(&0));
        assert!(ds.test_labels.contains(&1));
    }

    #[test]
    fn test_empty_split_rejected() {
        let err = generate_dataset(0, 10, 0).unwrap_err();
        assert!(matches!(
            err,
            TrainError::EmptySplit {
                n_train: 0,
                n_test: 10
            }
        ));

        let err = generate_dataset(10, 0, 0).unwrap_err();
        assert!(matches!(err, TrainError::EmptySplit { .. }));
    }

    #[test]
    fn test_pool_exhaustion_rejected() {
        let err = generate_dataset(300, 100, 0).unwrap_err();
        assert!(matches!(
            err,
            TrainError::DatasetTooSmall {
                requested: 400,
                available: 360
            }
        ));
    }

    #[test]
    fn test_prototypes_differ() {
        let ring: Vec<f64> = ring_prototype().iter().copied().collect();
        let stroke: Vec<f64> = stroke_prototype().iter().copied().collect();
        assert_ne!(ring, stroke);
    }
}
