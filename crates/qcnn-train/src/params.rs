//! Structured views over the flat trainable weight vector.
//!
//! Optimizers work on a flat `Vec<f64>`; the ansatz builders want named
//! angle blocks. The flat layout is one [`ConvPoolKernel`] worth of weights
//! per layer, in layer order, followed by the dense head weights:
//!
//! ```text
//! [layer 0: conv 15, pool 3][layer 1: conv 15, pool 3]...[dense 4^k - 1]
//! ```

use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::{TrainError, TrainResult};

/// Weights consumed by one convolutional kernel application.
pub const CONV_WEIGHTS: usize = 15;
/// Weights consumed by one pooling layer.
pub const POOL_WEIGHTS: usize = 3;
/// Weights per conv-and-pool layer.
pub const LAYER_WEIGHTS: usize = CONV_WEIGHTS + POOL_WEIGHTS;

/// The three Euler angles of a general single-qubit rotation U(θ, φ, λ).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationAngles {
    pub theta: f64,
    pub phi: f64,
    pub lambda: f64,
}

impl RotationAngles {
    fn from_slice(w: &[f64]) -> Self {
        Self {
            theta: w[0],
            phi: w[1],
            lambda: w[2],
        }
    }
}

/// The 15 weights of one convolutional kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvKernel {
    /// First-layer-only rotation on the lower wire of each even pair.
    pub pre_a: RotationAngles,
    /// First-layer-only rotation on the upper wire of each even pair.
    pub pre_b: RotationAngles,
    /// XX interaction angle.
    pub xx: f64,
    /// YY interaction angle.
    pub yy: f64,
    /// ZZ interaction angle.
    pub zz: f64,
    /// Trailing rotation on the lower wire.
    pub post_a: RotationAngles,
    /// Trailing rotation on the upper wire.
    pub post_b: RotationAngles,
}

impl ConvKernel {
    fn from_slice(w: &[f64]) -> Self {
        Self {
            pre_a: RotationAngles::from_slice(&w[0..3]),
            pre_b: RotationAngles::from_slice(&w[3..6]),
            xx: w[6],
            yy: w[7],
            zz: w[8],
            post_a: RotationAngles::from_slice(&w[9..12]),
            post_b: RotationAngles::from_slice(&w[12..15]),
        }
    }
}

/// Weights for one conv-and-pool layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvPoolKernel {
    /// Convolutional kernel weights.
    pub conv: ConvKernel,
    /// Conditioned-rotation angles of the pooling step.
    pub pool: RotationAngles,
}

/// All weights of a QCNN, split out of the flat optimizer vector.
#[derive(Debug, Clone, PartialEq)]
pub struct QcnnParams {
    /// One kernel per conv-and-pool layer, outermost first.
    pub layers: Vec<ConvPoolKernel>,
    /// Dense head weights, one per non-identity Pauli word.
    pub dense: Vec<f64>,
}

impl QcnnParams {
    /// Total flat weight count for a given shape.
    pub fn total_len(num_layers: usize, dense_len: usize) -> usize {
        num_layers * LAYER_WEIGHTS + dense_len
    }

    /// Split a flat weight vector into named blocks.
    pub fn split(flat: &[f64], num_layers: usize, dense_len: usize) -> TrainResult<Self> {
        let expected = Self::total_len(num_layers, dense_len);
        if flat.len() != expected {
            return Err(TrainError::WeightCount {
                expected,
                got: flat.len(),
            });
        }

        let (layer_flat, dense) = flat.split_at(num_layers * LAYER_WEIGHTS);
        let layers = layer_flat
            .chunks_exact(LAYER_WEIGHTS)
            .map(|chunk| ConvPoolKernel {
                conv: ConvKernel::from_slice(&chunk[..CONV_WEIGHTS]),
                pool: RotationAngles::from_slice(&chunk[CONV_WEIGHTS..]),
            })
            .collect();

        Ok(Self {
            layers,
            dense: dense.to_vec(),
        })
    }

    /// Draw a fresh flat weight vector from the standard normal distribution.
    pub fn random_flat<R: Rng>(num_layers: usize, dense_len: usize, rng: &mut R) -> Vec<f64> {
        (0..Self::total_len(num_layers, dense_len))
            .map(|_| rng.sample(StandardNormal))
            .collect()
    }
}
