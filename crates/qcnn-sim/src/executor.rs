//! Deterministic circuit execution with deferred measurement.
//!
//! Mid-circuit measurements do not collapse the state. A `Measure`
//! instruction only binds its classical bit to the measured wire; a gate
//! conditioned on that bit is then applied as a quantum-controlled gate on
//! the wire. This keeps execution deterministic and differentiable, and is
//! exact as long as measured wires receive no further operations, which the
//! executor enforces.

use rustc_hash::FxHashMap;
use tracing::debug;

use qcnn_ir::{Circuit, ClbitId, InstructionKind, QubitId, StandardGate};

use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Configuration for the statevector executor.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Number of wires circuits must declare.
    pub num_wires: usize,
    /// Fill value for unused amplitude slots before normalization.
    pub pad_value: f64,
}

impl ExecutorConfig {
    /// Configuration for `num_wires` wires with the default padding of 0.5.
    pub fn new(num_wires: usize) -> Self {
        Self {
            num_wires,
            pad_value: 0.5,
        }
    }

    /// Override the embedding pad value.
    pub fn with_pad_value(mut self, pad_value: f64) -> Self {
        self.pad_value = pad_value;
        self
    }
}

/// Executes circuits on an in-memory statevector.
#[derive(Debug, Clone)]
pub struct StatevectorExecutor {
    config: ExecutorConfig,
}

impl StatevectorExecutor {
    /// Create an executor with the given configuration.
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Number of wires this executor runs.
    pub fn num_wires(&self) -> usize {
        self.config.num_wires
    }

    /// Run a circuit on an amplitude-embedded feature vector and return the
    /// final state.
    pub fn run(&self, circuit: &Circuit, features: &[f64]) -> SimResult<Statevector> {
        if circuit.num_qubits() != self.config.num_wires {
            return Err(SimError::WireCountMismatch {
                circuit: circuit.num_qubits(),
                configured: self.config.num_wires,
            });
        }

        debug!(
            circuit = circuit.name(),
            ops = circuit.num_ops(),
            "executing circuit"
        );

        let mut state =
            Statevector::from_features(features, self.config.num_wires, self.config.pad_value)?;

        // clbit -> wire it was measured from
        let mut bindings: FxHashMap<ClbitId, usize> = FxHashMap::default();
        let mut measured = vec![false; self.config.num_wires];

        for instruction in circuit.instructions() {
            match &instruction.kind {
                InstructionKind::Measure => {
                    let wire = instruction.qubits[0];
                    if measured[wire.index()] {
                        return Err(SimError::MeasuredWireReused { wire });
                    }
                    measured[wire.index()] = true;
                    bindings.insert(instruction.clbits[0], wire.index());
                }
                InstructionKind::Gate(gate) => {
                    for &qubit in &instruction.qubits {
                        if measured[qubit.index()] {
                            return Err(SimError::MeasuredWireReused { wire: qubit });
                        }
                    }

                    let targets: Vec<usize> =
                        instruction.qubits.iter().map(|q| q.index()).collect();

                    match &gate.condition {
                        None => state.apply_gate(&gate.kind, &targets, None)?,
                        Some(cond) => {
                            let control = *bindings
                                .get(&cond.clbit)
                                .ok_or(SimError::UnmeasuredCondition { clbit: cond.clbit })?;
                            // Condition on outcome 0: sandwich the control
                            // with X so the controlled kernel fires on the
                            // zero branch.
                            if cond.value {
                                state.apply_gate(&gate.kind, &targets, Some(control))?;
                            } else {
                                state.apply_gate(&StandardGate::X, &[control], None)?;
                                state.apply_gate(&gate.kind, &targets, Some(control))?;
                                state.apply_gate(&StandardGate::X, &[control], None)?;
                            }
                        }
                    }
                }
            }
        }

        Ok(state)
    }

    /// Run a circuit and return the marginal `[P(0), P(1)]` of one wire.
    pub fn wire_probabilities(
        &self,
        circuit: &Circuit,
        features: &[f64],
        wire: QubitId,
    ) -> SimResult<[f64; 2]> {
        let state = self.run(circuit, features)?;
        Ok(state.wire_probabilities(wire.index()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use qcnn_ir::{Circuit, QubitId, StandardGate};

    fn executor(num_wires: usize) -> StatevectorExecutor {
        // Zero padding keeps the embedded state easy to reason about.
        StatevectorExecutor::new(ExecutorConfig::new(num_wires).with_pad_value(0.0))
    }

    #[test]
    fn test_deferred_measurement_entangles() {
        // H on q0, measure it, X on q1 if the outcome is 1. Under deferred
        // measurement the final state is (|00> + |11>)/sqrt(2).
        let mut circuit = Circuit::with_size("defer", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        let outcome = circuit.measure(QubitId(0)).unwrap();
        circuit
            .gate_if(outcome, StandardGate::X, [QubitId(1)])
            .unwrap();

        let state = executor(2).run(&circuit, &[1.0]).unwrap();
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!((state.amplitudes()[0] - Complex64::new(sqrt2_inv, 0.0)).norm() < 1e-10);
        assert!((state.amplitudes()[3] - Complex64::new(sqrt2_inv, 0.0)).norm() < 1e-10);
    }

    #[test]
    fn test_condition_on_zero_outcome() {
        // q0 stays |0>, so a zero-conditioned X on q1 must fire.
        let mut circuit = Circuit::with_size("zero-cond", 2, 0);
        let outcome = circuit.measure(QubitId(0)).unwrap();
        circuit
            .gate(
                qcnn_ir::Gate::new(StandardGate::X)
                    .with_condition(qcnn_ir::ClassicalCondition::on_zero(outcome)),
                [QubitId(1)],
            )
            .unwrap();

        let state = executor(2).run(&circuit, &[1.0]).unwrap();
        assert!((state.amplitudes()[2] - Complex64::new(1.0, 0.0)).norm() < 1e-10);
    }

    #[test]
    fn test_measured_wire_rejected_for_gates() {
        let mut circuit = Circuit::with_size("reuse", 2, 0);
        circuit.measure(QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();

        let err = executor(2).run(&circuit, &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            SimError::MeasuredWireReused { wire } if wire == QubitId(0)
        ));
    }

    #[test]
    fn test_double_measurement_rejected() {
        let mut circuit = Circuit::with_size("twice", 1, 0);
        circuit.measure(QubitId(0)).unwrap();
        circuit.measure(QubitId(0)).unwrap();

        let err = executor(1).run(&circuit, &[1.0]).unwrap_err();
        assert!(matches!(err, SimError::MeasuredWireReused { .. }));
    }

    #[test]
    fn test_unmeasured_condition_rejected() {
        let mut circuit = Circuit::with_size("unbound", 1, 1);
        circuit
            .gate_if(qcnn_ir::ClbitId(0), StandardGate::X, [QubitId(0)])
            .unwrap();

        let err = executor(1).run(&circuit, &[1.0]).unwrap_err();
        assert!(matches!(err, SimError::UnmeasuredCondition { .. }));
    }

    #[test]
    fn test_wire_count_mismatch() {
        let circuit = Circuit::with_size("small", 2, 0);
        let err = executor(3).run(&circuit, &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            SimError::WireCountMismatch {
                circuit: 2,
                configured: 3
            }
        ));
    }

    #[test]
    fn test_wire_probabilities() {
        let mut circuit = Circuit::with_size("marginal", 2, 0);
        circuit.ry(0.8, QubitId(1)).unwrap();

        let [p0, p1] = executor(2)
            .wire_probabilities(&circuit, &[1.0], QubitId(1))
            .unwrap();
        assert!((p1 - (0.8_f64 / 2.0).sin().powi(2)).abs() < 1e-12);
        assert!((p0 + p1 - 1.0).abs() < 1e-12);
    }
}
