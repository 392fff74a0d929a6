//! Statevector execution engine for the QCNN study.
//!
//! Runs [`qcnn_ir`] circuits deterministically on an in-memory statevector:
//! amplitude embedding of classical feature vectors, dense gate kernels
//! including multi-qubit Pauli-word rotations, and deferred mid-circuit
//! measurement so conditioned gates stay differentiable.
//!
//! # Example
//!
//! ```rust
//! use qcnn_ir::{Circuit, QubitId};
//! use qcnn_sim::{ExecutorConfig, StatevectorExecutor};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 0);
//! circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let executor = StatevectorExecutor::new(ExecutorConfig::new(2).with_pad_value(0.0));
//! let [p0, p1] = executor
//!     .wire_probabilities(&circuit, &[1.0], QubitId(1))
//!     .unwrap();
//! assert!((p0 - 0.5).abs() < 1e-10);
//! assert!((p1 - 0.5).abs() < 1e-10);
//! ```

pub mod error;
pub mod executor;
pub mod gradient;
pub mod statevector;

pub use error::{SimError, SimResult};
pub use executor::{ExecutorConfig, StatevectorExecutor};
pub use gradient::{central_difference, DEFAULT_STEP};
pub use statevector::Statevector;
