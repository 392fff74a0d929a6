//! Error types for the execution engine.

use qcnn_ir::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur during statevector execution.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit register size does not match the executor configuration.
    #[error("Circuit has {circuit} qubits but the executor is configured for {configured}")]
    WireCountMismatch {
        /// Qubits in the circuit.
        circuit: usize,
        /// Wires the executor was configured with.
        configured: usize,
    },

    /// More features than amplitude slots.
    #[error("Feature vector of length {len} does not fit into {dim} amplitudes")]
    EmbeddingTooLong {
        /// Number of features supplied.
        len: usize,
        /// Statevector dimension (2^n).
        dim: usize,
    },

    /// The padded feature vector has (near-)zero norm and cannot be a state.
    #[error("Feature vector has zero norm after padding; cannot normalize into a quantum state")]
    ZeroNormEmbedding,

    /// A gate parameter was left symbolic.
    #[error("Parameter '{0}' is unbound at execution time")]
    UnboundParameter(String),

    /// A gate targeted a wire that was already measured.
    ///
    /// Deferred measurement is only sound while measured wires stay idle,
    /// so this is rejected as a structural programming error.
    #[error("Wire {wire} was already measured and cannot receive further operations")]
    MeasuredWireReused {
        /// The reused wire.
        wire: QubitId,
    },

    /// A conditioned gate referenced a classical bit with no measurement.
    #[error("Classical bit {clbit} conditions a gate but holds no measurement outcome")]
    UnmeasuredCondition {
        /// The unbound classical bit.
        clbit: ClbitId,
    },
}

/// Result type for execution operations.
pub type SimResult<T> = Result<T, SimError>;
