//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parameter::ParameterExpression;
use crate::qubit::ClbitId;

/// A single-qubit Pauli axis, used to spell multi-qubit Pauli words.
///
/// Identity factors are never stored: a Pauli word lists only the wires it
/// acts on non-trivially, axis-for-axis with the instruction's qubits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pauli {
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pauli::X => write!(f, "X"),
            Pauli::Y => write!(f, "Y"),
            Pauli::Z => write!(f, "Z"),
        }
    }
}

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,

    /// Rotation around X axis.
    Rx(ParameterExpression),
    /// Rotation around Y axis.
    Ry(ParameterExpression),
    /// Rotation around Z axis.
    Rz(ParameterExpression),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(
        ParameterExpression,
        ParameterExpression,
        ParameterExpression,
    ),

    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// XX interaction rotation exp(-iθ/2 X⊗X).
    RXX(ParameterExpression),
    /// YY interaction rotation exp(-iθ/2 Y⊗Y).
    RYY(ParameterExpression),
    /// ZZ interaction rotation exp(-iθ/2 Z⊗Z).
    RZZ(ParameterExpression),

    /// Multi-qubit Pauli-word rotation exp(-iθ/2 P), one axis per qubit.
    PauliRot(ParameterExpression, Vec<Pauli>),
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::U(_, _, _) => "u",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::RXX(_) => "rxx",
            StandardGate::RYY(_) => "ryy",
            StandardGate::RZZ(_) => "rzz",
            StandardGate::PauliRot(_, _) => "paulirot",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::U(_, _, _) => 1,

            StandardGate::CX
            | StandardGate::CZ
            | StandardGate::RXX(_)
            | StandardGate::RYY(_)
            | StandardGate::RZZ(_) => 2,

            StandardGate::PauliRot(_, word) => word.len() as u32,
        }
    }

    /// Check if this gate has unbound symbolic parameters.
    pub fn is_parameterized(&self) -> bool {
        self.parameters().iter().any(|p| p.is_symbolic())
    }

    /// Get parameters of this gate.
    pub fn parameters(&self) -> Vec<&ParameterExpression> {
        match self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::RXX(p)
            | StandardGate::RYY(p)
            | StandardGate::RZZ(p)
            | StandardGate::PauliRot(p, _) => vec![p],

            StandardGate::U(a, b, c) => vec![a, b, c],

            _ => vec![],
        }
    }
}

/// Classical condition attached to a gate.
///
/// The gate is applied only when the referenced classical bit holds the
/// given value. This is the measure-then-conditionally-apply primitive the
/// pooling layer is built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassicalCondition {
    /// The classical bit holding a measurement outcome.
    pub clbit: ClbitId,
    /// The outcome value that activates the gate.
    pub value: bool,
}

impl ClassicalCondition {
    /// Condition on the bit being 1 (the common case for pooling).
    pub fn on_one(clbit: ClbitId) -> Self {
        Self { clbit, value: true }
    }

    /// Condition on the bit being 0.
    pub fn on_zero(clbit: ClbitId) -> Self {
        Self {
            clbit,
            value: false,
        }
    }
}

/// A gate with associated metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The gate itself.
    pub kind: StandardGate,
    /// Optional classical condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ClassicalCondition>,
}

impl Gate {
    /// Create an unconditioned gate.
    pub fn new(kind: StandardGate) -> Self {
        Self {
            kind,
            condition: None,
        }
    }

    /// Attach a classical condition to the gate.
    #[must_use]
    pub fn with_condition(mut self, condition: ClassicalCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }
}

impl From<StandardGate> for Gate {
    fn from(kind: StandardGate) -> Self {
        Gate::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(
            StandardGate::PauliRot(0.1.into(), vec![Pauli::X, Pauli::Z, Pauli::Y]).num_qubits(),
            3
        );

        assert!(!StandardGate::H.is_parameterized());
        assert!(!StandardGate::Rx(ParameterExpression::constant(PI)).is_parameterized());
        assert!(StandardGate::Rx(ParameterExpression::symbol("theta")).is_parameterized());
    }

    #[test]
    fn test_u_gate_parameters() {
        let u = StandardGate::U(0.1.into(), 0.2.into(), 0.3.into());
        let params: Vec<f64> = u.parameters().iter().map(|p| p.as_f64().unwrap()).collect();
        assert_eq!(params, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_conditioned_gate() {
        let g = Gate::new(StandardGate::X).with_condition(ClassicalCondition::on_one(ClbitId(0)));
        assert_eq!(g.name(), "x");
        let cond = g.condition.unwrap();
        assert_eq!(cond.clbit, ClbitId(0));
        assert!(cond.value);
    }
}
