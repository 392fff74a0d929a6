//! Statevector representation and gate kernels.

use num_complex::Complex64;

use qcnn_ir::{Pauli, ParameterExpression, StandardGate};

use crate::error::{SimError, SimResult};

/// A statevector representing a quantum state.
///
/// Wire `q` is the bit `q` of the basis index (wire 0 is the least
/// significant bit), matching the amplitude-embedding convention where
/// `features[i]` loads the basis state with bit pattern `i`.
#[derive(Debug, Clone)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Amplitude-embed a real feature vector.
    ///
    /// Unused amplitude slots are padded with `pad_value`, then the whole
    /// vector is L2-normalized. Fails if the features do not fit or the
    /// padded vector has zero norm.
    pub fn from_features(features: &[f64], num_qubits: usize, pad_value: f64) -> SimResult<Self> {
        let dim = 1 << num_qubits;
        if features.len() > dim {
            return Err(SimError::EmbeddingTooLong {
                len: features.len(),
                dim,
            });
        }

        let mut padded = Vec::with_capacity(dim);
        padded.extend_from_slice(features);
        padded.resize(dim, pad_value);

        let norm_sqr: f64 = padded.iter().map(|v| v * v).sum();
        if norm_sqr < 1e-24 {
            return Err(SimError::ZeroNormEmbedding);
        }
        let norm = norm_sqr.sqrt();

        Ok(Self {
            amplitudes: padded
                .into_iter()
                .map(|v| Complex64::new(v / norm, 0.0))
                .collect(),
            num_qubits,
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The raw amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Probability of each basis outcome.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Marginal outcome distribution `[P(0), P(1)]` of a single wire.
    pub fn wire_probabilities(&self, wire: usize) -> [f64; 2] {
        let mask = 1 << wire;
        let mut p = [0.0, 0.0];
        for (i, amp) in self.amplitudes.iter().enumerate() {
            p[usize::from(i & mask != 0)] += amp.norm_sqr();
        }
        p
    }

    /// Apply a standard gate, optionally controlled on an extra qubit.
    ///
    /// The control must not appear among the gate's target qubits; it is
    /// how classically conditioned gates run under deferred measurement.
    pub fn apply_gate(
        &mut self,
        gate: &StandardGate,
        qubits: &[usize],
        control: Option<usize>,
    ) -> SimResult<()> {
        let ctrl = control.map_or(0usize, |c| 1 << c);
        match gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_x(qubits[0], ctrl),
            StandardGate::Y => self.apply_y(qubits[0], ctrl),
            StandardGate::Z => self.apply_z(qubits[0], ctrl),
            StandardGate::H => self.apply_h(qubits[0], ctrl),
            StandardGate::Rx(theta) => self.apply_rx(qubits[0], value(theta)?, ctrl),
            StandardGate::Ry(theta) => self.apply_ry(qubits[0], value(theta)?, ctrl),
            StandardGate::Rz(theta) => self.apply_rz(qubits[0], value(theta)?, ctrl),
            StandardGate::U(theta, phi, lambda) => {
                self.apply_u(qubits[0], value(theta)?, value(phi)?, value(lambda)?, ctrl);
            }
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1], ctrl),
            StandardGate::CZ => self.apply_cz(qubits[0], qubits[1], ctrl),
            StandardGate::RXX(theta) => {
                self.apply_pauli_rot(value(theta)?, &[Pauli::X, Pauli::X], qubits, ctrl);
            }
            StandardGate::RYY(theta) => {
                self.apply_pauli_rot(value(theta)?, &[Pauli::Y, Pauli::Y], qubits, ctrl);
            }
            StandardGate::RZZ(theta) => {
                self.apply_pauli_rot(value(theta)?, &[Pauli::Z, Pauli::Z], qubits, ctrl);
            }
            StandardGate::PauliRot(theta, word) => {
                self.apply_pauli_rot(value(theta)?, word, qubits, ctrl);
            }
        }
        Ok(())
    }

    #[inline]
    fn active(&self, index: usize, ctrl: usize) -> bool {
        index & ctrl == ctrl
    }

    // =========================================================================
    // Single-qubit gate kernels
    // =========================================================================

    fn apply_x(&mut self, qubit: usize, ctrl: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 && self.active(i, ctrl) {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize, ctrl: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 && self.active(i, ctrl) {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize, ctrl: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 && self.active(i, ctrl) {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_h(&mut self, qubit: usize, ctrl: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 && self.active(i, ctrl) {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64, ctrl: usize) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 && self.active(i, ctrl) {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64, ctrl: usize) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 && self.active(i, ctrl) {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64, ctrl: usize) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for i in 0..(1 << self.num_qubits) {
            if !self.active(i, ctrl) {
                continue;
            }
            if i & mask == 0 {
                self.amplitudes[i] *= phase_0;
            } else {
                self.amplitudes[i] *= phase_1;
            }
        }
    }

    fn apply_u(&mut self, qubit: usize, theta: f64, phi: f64, lambda: f64, ctrl: usize) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        let e_il = Complex64::from_polar(1.0, lambda);
        let e_ip = Complex64::from_polar(1.0, phi);
        let e_ipl = Complex64::from_polar(1.0, phi + lambda);

        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 && self.active(i, ctrl) {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - e_il * s * b;
                self.amplitudes[j] = e_ip * s * a + e_ipl * c * b;
            }
        }
    }

    // =========================================================================
    // Two-qubit gate kernels
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize, ctrl: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) && self.active(i, ctrl) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_cz(&mut self, control: usize, target: usize, ctrl: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask != 0) && self.active(i, ctrl) {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    // =========================================================================
    // Pauli-word rotation kernel
    // =========================================================================

    /// Apply exp(-iθ/2 P) for a Pauli word P over the given qubits.
    ///
    /// ψ' = cos(θ/2)·ψ - i·sin(θ/2)·Pψ, computed through the basis-state
    /// action P|j⟩ = phase·|j ⊕ flips⟩.
    fn apply_pauli_rot(&mut self, theta: f64, word: &[Pauli], qubits: &[usize], ctrl: usize) {
        let c = Complex64::new((theta / 2.0).cos(), 0.0);
        let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());

        let mut out = self.amplitudes.clone();
        for j in 0..(1 << self.num_qubits) {
            if !self.active(j, ctrl) {
                continue;
            }
            let (target, phase) = pauli_basis_action(j, word, qubits);
            out[target] = c * self.amplitudes[target] + neg_i_s * phase * self.amplitudes[j];
        }
        self.amplitudes = out;
    }
}

/// Resolve a parameter expression to a concrete angle.
fn value(param: &ParameterExpression) -> SimResult<f64> {
    param.as_f64().ok_or_else(|| {
        SimError::UnboundParameter(param.first_symbol().unwrap_or("?").to_string())
    })
}

/// Action of a Pauli word on a basis state: P|index⟩ = phase·|new_index⟩.
fn pauli_basis_action(index: usize, word: &[Pauli], qubits: &[usize]) -> (usize, Complex64) {
    let mut new_index = index;
    let mut phase = Complex64::new(1.0, 0.0);

    for (&axis, &qubit) in word.iter().zip(qubits) {
        let bit = (index >> qubit) & 1;
        match axis {
            Pauli::X => {
                new_index ^= 1 << qubit;
            }
            Pauli::Y => {
                new_index ^= 1 << qubit;
                if bit == 0 {
                    phase *= Complex64::new(0.0, 1.0);
                } else {
                    phase *= Complex64::new(0.0, -1.0);
                }
            }
            Pauli::Z => {
                if bit == 1 {
                    phase *= Complex64::new(-1.0, 0.0);
                }
            }
        }
    }

    (new_index, phase)
}
