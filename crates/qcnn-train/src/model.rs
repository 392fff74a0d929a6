//! The QCNN classifier model.

use qcnn_ir::{Circuit, QubitId};
use qcnn_sim::{ExecutorConfig, StatevectorExecutor};
use tracing::debug;

use crate::ansatz::{conv_and_pooling, dense_layer, dense_weight_count, pooled_wires};
use crate::error::{TrainError, TrainResult};
use crate::params::QcnnParams;

/// Shape of a QCNN: wire count and number of conv-and-pool layers.
///
/// Construction validates the whole wire schedule up front so a bad shape
/// fails here rather than mid-training: each layer halves the live wires
/// (keeping the even-indexed ones) and needs at least three to convolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QcnnConfig {
    num_wires: usize,
    num_layers: usize,
}

impl QcnnConfig {
    /// Validate a shape.
    pub fn new(num_wires: usize, num_layers: usize) -> TrainResult<Self> {
        let mut wires: Vec<QubitId> = (0..num_wires as u32).map(QubitId).collect();
        for _ in 0..num_layers {
            if wires.len() < 3 {
                return Err(TrainError::ConvTooFewWires { got: wires.len() });
            }
            wires = pooled_wires(&wires);
        }
        Ok(Self {
            num_wires,
            num_layers,
        })
    }

    /// Number of wires the embedding loads.
    pub fn num_wires(&self) -> usize {
        self.num_wires
    }

    /// Number of conv-and-pool layers.
    pub fn num_layers(&self) -> usize {
        self.num_layers
    }

    /// Wires still alive after all pooling layers, in order.
    pub fn readout_wires(&self) -> Vec<QubitId> {
        let mut wires: Vec<QubitId> = (0..self.num_wires as u32).map(QubitId).collect();
        for _ in 0..self.num_layers {
            wires = pooled_wires(&wires);
        }
        wires
    }

    /// Weights the dense head consumes.
    pub fn dense_weight_count(&self) -> usize {
        dense_weight_count(self.readout_wires().len())
    }

    /// Total flat weight count of the model.
    pub fn num_params(&self) -> usize {
        QcnnParams::total_len(self.num_layers, self.dense_weight_count())
    }
}

/// A QCNN binary classifier over amplitude-embedded feature vectors.
///
/// The prediction is the marginal distribution of wire 0 after the full
/// network has run: index 0 is the score for class 0, index 1 for class 1.
#[derive(Debug, Clone)]
pub struct QcnnModel {
    config: QcnnConfig,
    executor: StatevectorExecutor,
}

impl QcnnModel {
    /// Build a model for the given shape.
    pub fn new(config: QcnnConfig) -> Self {
        let executor = StatevectorExecutor::new(ExecutorConfig::new(config.num_wires()));
        Self { config, executor }
    }

    /// The model shape.
    pub fn config(&self) -> &QcnnConfig {
        &self.config
    }

    /// Total flat weight count.
    pub fn num_params(&self) -> usize {
        self.config.num_params()
    }

    /// Build the full circuit for one flat weight vector.
    pub fn build_circuit(&self, weights: &[f64]) -> TrainResult<Circuit> {
        let params = QcnnParams::split(
            weights,
            self.config.num_layers(),
            self.config.dense_weight_count(),
        )?;

        let mut circuit = Circuit::with_size("qcnn", self.config.num_wires() as u32, 0);
        let mut wires: Vec<QubitId> = circuit.qubits();

        for kernel in &params.layers {
            conv_and_pooling(&mut circuit, kernel, &wires, true)?;
            wires = pooled_wires(&wires);
        }
        dense_layer(&mut circuit, &params.dense, &wires)?;

        debug!(
            ops = circuit.num_ops(),
            readout = wires.len(),
            "built qcnn circuit"
        );
        Ok(circuit)
    }

    /// Class distribution `[P(class 0), P(class 1)]` for one sample.
    pub fn predict(&self, weights: &[f64], features: &[f64]) -> TrainResult<[f64; 2]> {
        let circuit = self.build_circuit(weights)?;
        let probs = self
            .executor
            .wire_probabilities(&circuit, features, QubitId(0))?;
        Ok(probs)
    }
}
