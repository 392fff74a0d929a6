//! Error types for model construction and training.

use qcnn_ir::IrError;
use qcnn_sim::SimError;
use thiserror::Error;

/// Errors that can occur while building or training a QCNN.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrainError {
    /// Invalid circuit construction.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),

    /// Execution failure.
    #[error("Execution error: {0}")]
    Sim(#[from] SimError),

    /// A convolutional layer needs at least three wires.
    #[error("Convolutional layer needs at least 3 wires, got {got}")]
    ConvTooFewWires {
        /// Wires available to the layer.
        got: usize,
    },

    /// A pooling layer needs at least two wires.
    #[error("Pooling layer needs at least 2 wires, got {got}")]
    PoolTooFewWires {
        /// Wires available to the layer.
        got: usize,
    },

    /// The flat weight vector does not match the model shape.
    #[error("Expected {expected} weights, got {got}")]
    WeightCount {
        /// Weights the model shape requires.
        expected: usize,
        /// Weights supplied.
        got: usize,
    },

    /// Dense head weight count must be 4^k - 1 for k readout wires.
    #[error("Dense layer over {wires} wires needs {expected} weights, got {got}")]
    DenseWeightCount {
        /// Readout wires the dense head acts on.
        wires: usize,
        /// Required weight count (4^wires - 1).
        expected: usize,
        /// Weights supplied.
        got: usize,
    },

    /// A split with zero samples would make every mean metric undefined.
    #[error("Both splits need at least one sample, got n_train={n_train}, n_test={n_test}")]
    EmptySplit {
        /// Training samples requested.
        n_train: usize,
        /// Test samples requested.
        n_test: usize,
    },

    /// Not enough pooled samples to draw a disjoint train/test split.
    #[error("Requested {requested} samples but the pool only holds {available}")]
    DatasetTooSmall {
        /// Samples requested (train + test).
        requested: usize,
        /// Samples available in the pool.
        available: usize,
    },

    /// Report export failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization failed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for training operations.
pub type TrainResult<T> = Result<T, TrainError>;
