//! QCNN circuit building blocks.
//!
//! A network alternates convolutional layers (parametrized two-qubit kernels
//! swept over adjacent wire pairs) with pooling layers (measure every other
//! wire, conditionally rotate its neighbor), then finishes with a dense head
//! of Pauli-word rotations over the surviving wires.

use qcnn_ir::{Circuit, Pauli, QubitId, StandardGate};

use crate::error::{TrainError, TrainResult};
use crate::params::{ConvKernel, ConvPoolKernel, RotationAngles};

fn apply_u3(circuit: &mut Circuit, angles: RotationAngles, wire: QubitId) -> TrainResult<()> {
    circuit.u(angles.theta, angles.phi, angles.lambda, wire)?;
    Ok(())
}

/// Sweep a convolutional kernel over adjacent pairs of `wires`.
///
/// Two sweeps cover even-offset then odd-offset pairs. When `pre_rotations`
/// is set, an extra pair of general rotations leads each even pair.
pub fn convolutional_layer(
    circuit: &mut Circuit,
    kernel: &ConvKernel,
    wires: &[QubitId],
    pre_rotations: bool,
) -> TrainResult<()> {
    if wires.len() < 3 {
        return Err(TrainError::ConvTooFewWires { got: wires.len() });
    }

    for parity in [0, 1] {
        for indx in 0..wires.len() - 1 {
            if indx % 2 != parity {
                continue;
            }
            let (lower, upper) = (wires[indx], wires[indx + 1]);

            if indx % 2 == 0 && pre_rotations {
                apply_u3(circuit, kernel.pre_a, lower)?;
                apply_u3(circuit, kernel.pre_b, upper)?;
            }

            circuit.rxx(kernel.xx, lower, upper)?;
            circuit.ryy(kernel.yy, lower, upper)?;
            circuit.rzz(kernel.zz, lower, upper)?;

            apply_u3(circuit, kernel.post_a, lower)?;
            apply_u3(circuit, kernel.post_b, upper)?;
        }
    }

    Ok(())
}

/// Measure every odd-indexed wire and rotate its even neighbor when the
/// outcome is 1. The even-indexed wires survive into the next layer.
pub fn pooling_layer(
    circuit: &mut Circuit,
    angles: RotationAngles,
    wires: &[QubitId],
) -> TrainResult<()> {
    if wires.len() < 2 {
        return Err(TrainError::PoolTooFewWires { got: wires.len() });
    }

    for indx in (1..wires.len()).step_by(2) {
        let outcome = circuit.measure(wires[indx])?;
        circuit.gate_if(
            outcome,
            StandardGate::U(
                angles.theta.into(),
                angles.phi.into(),
                angles.lambda.into(),
            ),
            [wires[indx - 1]],
        )?;
    }

    Ok(())
}

/// The wires a pooling layer leaves alive, in order.
pub fn pooled_wires(wires: &[QubitId]) -> Vec<QubitId> {
    wires.iter().copied().step_by(2).collect()
}

/// One convolution sweep followed by pooling.
pub fn conv_and_pooling(
    circuit: &mut Circuit,
    kernel: &ConvPoolKernel,
    wires: &[QubitId],
    pre_rotations: bool,
) -> TrainResult<()> {
    convolutional_layer(circuit, &kernel.conv, wires, pre_rotations)?;
    pooling_layer(circuit, kernel.pool, wires)
}

/// Number of weights the dense head over `num_wires` wires consumes.
pub fn dense_weight_count(num_wires: usize) -> usize {
    4usize.pow(num_wires as u32) - 1
}

/// Fully parametrized unitary over the readout wires.
///
/// One Pauli-word rotation per non-identity word over the wires, 4^k - 1 in
/// total, enumerated by base-4 digits (0 = I, 1 = X, 2 = Y, 3 = Z) with the
/// first wire as the least significant digit.
pub fn dense_layer(circuit: &mut Circuit, weights: &[f64], wires: &[QubitId]) -> TrainResult<()> {
    let expected = dense_weight_count(wires.len());
    if weights.len() != expected {
        return Err(TrainError::DenseWeightCount {
            wires: wires.len(),
            expected,
            got: weights.len(),
        });
    }

    for (code, &weight) in (1..=expected).zip(weights) {
        let (word, targets) = pauli_word(code, wires);
        circuit.pauli_rot(weight, word, targets)?;
    }

    Ok(())
}

/// Decode a word index into Pauli axes and the wires they act on.
fn pauli_word(code: usize, wires: &[QubitId]) -> (Vec<Pauli>, Vec<QubitId>) {
    let mut word = Vec::new();
    let mut targets = Vec::new();
    let mut rest = code;

    for &wire in wires {
        let axis = match rest % 4 {
            1 => Some(Pauli::X),
            2 => Some(Pauli::Y),
            3 => Some(Pauli::Z),
            _ => None,
        };
        if let Some(axis) = axis {
            word.push(axis);
            targets.push(wire);
        }
        rest /= 4;
    }

    (word, targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcnn_ir::InstructionKind;

    fn wires(n: u32) -> Vec<QubitId> {
        (0..n).map(QubitId).collect()
    }

    fn rot(v: f64) -> RotationAngles {
        RotationAngles {
            theta: v,
            phi: v,
            lambda: v,
        }
    }

    fn kernel() -> ConvKernel {
        ConvKernel {
            pre_a: rot(0.1),
            pre_b: rot(0.2),
            xx: 0.3,
            yy: 0.4,
            zz: 0.5,
            post_a: rot(0.6),
            post_b: rot(0.7),
        }
    }

    #[test]
    fn test_conv_rejects_two_wires() {
        let mut circuit = Circuit::with_size("conv", 2, 0);
        let err = convolutional_layer(&mut circuit, &kernel(), &wires(2), true).unwrap_err();
        assert!(matches!(err, TrainError::ConvTooFewWires { got: 2 }));
    }

    #[test]
    fn test_conv_gate_count() {
        // 3 wires: even sweep hits pair (0,1), odd sweep hits pair (1,2).
        // Pre-rotations add 2 gates on the even pair only.
        let mut circuit = Circuit::with_size("conv", 3, 0);
        convolutional_layer(&mut circuit, &kernel(), &wires(3), true).unwrap();
        assert_eq!(circuit.num_ops(), 7 + 5);

        let mut circuit = Circuit::with_size("conv", 3, 0);
        convolutional_layer(&mut circuit, &kernel(), &wires(3), false).unwrap();
        assert_eq!(circuit.num_ops(), 10);
    }

    #[test]
    fn test_conv_touches_only_adjacent_pairs() {
        let mut circuit = Circuit::with_size("conv", 6, 0);
        convolutional_layer(&mut circuit, &kernel(), &wires(6), true).unwrap();

        for inst in circuit.instructions() {
            if inst.qubits.len() == 2 {
                let d = inst.qubits[1].0 as i64 - inst.qubits[0].0 as i64;
                assert_eq!(d, 1, "two-qubit gate on non-adjacent pair {:?}", inst.qubits);
            }
        }
    }

    #[test]
    fn test_pooling_measures_odd_wires() {
        let mut circuit = Circuit::with_size("pool", 4, 0);
        let angles = RotationAngles {
            theta: 0.1,
            phi: 0.2,
            lambda: 0.3,
        };
        pooling_layer(&mut circuit, angles, &wires(4)).unwrap();

        let measured: Vec<u32> = circuit
            .instructions()
            .filter(|i| i.is_measure())
            .map(|i| i.qubits[0].0)
            .collect();
        assert_eq!(measured, vec![1, 3]);

        let conditioned: Vec<u32> = circuit
            .instructions()
            .filter_map(|i| match &i.kind {
                InstructionKind::Gate(g) if g.condition.is_some() => Some(i.qubits[0].0),
                _ => None,
            })
            .collect();
        assert_eq!(conditioned, vec![0, 2]);
    }

    #[test]
    fn test_pooling_rejects_single_wire() {
        let mut circuit = Circuit::with_size("pool", 1, 0);
        let angles = RotationAngles {
            theta: 0.0,
            phi: 0.0,
            lambda: 0.0,
        };
        let err = pooling_layer(&mut circuit, angles, &wires(1)).unwrap_err();
        assert!(matches!(err, TrainError::PoolTooFewWires { got: 1 }));
    }

    #[test]
    fn test_pooled_wires_stride() {
        assert_eq!(pooled_wires(&wires(6)), vec![QubitId(0), QubitId(2), QubitId(4)]);
        assert_eq!(
            pooled_wires(&[QubitId(0), QubitId(2), QubitId(4)]),
            vec![QubitId(0), QubitId(4)]
        );
    }

    #[test]
    fn test_dense_weight_count() {
        assert_eq!(dense_weight_count(1), 3);
        assert_eq!(dense_weight_count(2), 15);
        assert_eq!(dense_weight_count(3), 63);
    }

    #[test]
    fn test_dense_rejects_wrong_count() {
        let mut circuit = Circuit::with_size("dense", 2, 0);
        let err = dense_layer(&mut circuit, &[0.0; 10], &wires(2)).unwrap_err();
        assert!(matches!(
            err,
            TrainError::DenseWeightCount {
                wires: 2,
                expected: 15,
                got: 10
            }
        ));
    }

    #[test]
    fn test_dense_emits_all_words() {
        let mut circuit = Circuit::with_size("dense", 2, 0);
        dense_layer(&mut circuit, &vec![0.1; 15], &wires(2)).unwrap();
        assert_eq!(circuit.num_ops(), 15);
        assert!(circuit.instructions().all(|i| i.name() == "paulirot"));
    }

    #[test]
    fn test_pauli_word_decoding() {
        let w = wires(2);
        assert_eq!(pauli_word(1, &w), (vec![Pauli::X], vec![QubitId(0)]));
        assert_eq!(pauli_word(2, &w), (vec![Pauli::Y], vec![QubitId(0)]));
        assert_eq!(pauli_word(3, &w), (vec![Pauli::Z], vec![QubitId(0)]));
        assert_eq!(pauli_word(4, &w), (vec![Pauli::X], vec![QubitId(1)]));
        assert_eq!(
            pauli_word(6, &w),
            (vec![Pauli::Y, Pauli::X], vec![QubitId(0), QubitId(1)])
        );
        assert_eq!(
            pauli_word(15, &w),
            (vec![Pauli::Z, Pauli::Z], vec![QubitId(0), QubitId(1)])
        );
    }
}
