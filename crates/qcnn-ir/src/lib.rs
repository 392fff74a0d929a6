//! QCNN Circuit Intermediate Representation
//!
//! Core data structures for representing the parametrized quantum circuits
//! of the QCNN study: qubit/clbit addressing, gates (including multi-qubit
//! Pauli-word rotations and classically conditioned gates), instructions,
//! and a builder-style [`Circuit`].
//!
//! # Example: conditioned rotation after a mid-circuit measurement
//!
//! ```rust
//! use qcnn_ir::{Circuit, QubitId, StandardGate};
//!
//! let mut circuit = Circuit::with_size("pool", 2, 0);
//! let outcome = circuit.measure(QubitId(1)).unwrap();
//! circuit
//!     .gate_if(outcome, StandardGate::U(0.1.into(), 0.2.into(), 0.3.into()), [QubitId(0)])
//!     .unwrap();
//!
//! assert_eq!(circuit.num_ops(), 2);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{ClassicalCondition, Gate, Pauli, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use parameter::ParameterExpression;
pub use qubit::{ClbitId, QubitId};
