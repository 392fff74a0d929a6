//! Gradient-descent training loop.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use qcnn_sim::{central_difference, DEFAULT_STEP};

use crate::data::Dataset;
use crate::error::TrainResult;
use crate::eval;
use crate::model::QcnnModel;
use crate::optimizers::{Adam, Optimizer};
use crate::params::QcnnParams;

/// Metrics recorded after one optimizer step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainRecord {
    /// Training set size of the run this record belongs to.
    pub n_train: usize,
    /// Optimizer step, starting at 1.
    pub step: usize,
    pub train_cost: f64,
    pub train_acc: f64,
    pub test_cost: f64,
    pub test_acc: f64,
}

/// The trained weights and the per-step metric trace.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub records: Vec<TrainRecord>,
    pub weights: Vec<f64>,
}

/// Trains a [`QcnnModel`] with Adam on a fixed dataset split.
///
/// Weights start from a seeded standard-normal draw. Each epoch records the
/// training cost at the pre-step weights, takes one Adam step on the
/// full-batch training cost, then evaluates train accuracy and the test
/// metrics with the updated weights.
#[derive(Debug, Clone)]
pub struct Trainer {
    model: QcnnModel,
    epochs: usize,
    step_size: f64,
    seed: u64,
    gradient_step: f64,
}

impl Trainer {
    /// Create a trainer with the study defaults: 20 epochs, Adam step size
    /// 0.01, seed 0.
    pub fn new(model: QcnnModel) -> Self {
        Self {
            model,
            epochs: 20,
            step_size: 0.01,
            seed: 0,
            gradient_step: DEFAULT_STEP,
        }
    }

    /// Set the number of epochs.
    #[must_use]
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Set the Adam step size.
    #[must_use]
    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    /// Set the weight-initialization seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the finite-difference half-step used for gradients.
    #[must_use]
    pub fn with_gradient_step(mut self, gradient_step: f64) -> Self {
        self.gradient_step = gradient_step;
        self
    }

    /// The model under training.
    pub fn model(&self) -> &QcnnModel {
        &self.model
    }

    /// Train and return the outcome.
    pub fn run(&self, dataset: &Dataset) -> TrainResult<TrainOutcome> {
        self.run_with(dataset, |_| {})
    }

    /// Train, invoking `on_step` after every recorded step.
    pub fn run_with(
        &self,
        dataset: &Dataset,
        mut on_step: impl FnMut(&TrainRecord),
    ) -> TrainResult<TrainOutcome> {
        let config = self.model.config();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut weights =
            QcnnParams::random_flat(config.num_layers(), config.dense_weight_count(), &mut rng);
        let mut optimizer = Adam::new(self.step_size);

        let n_train = dataset.n_train();
        info!(
            n_train,
            n_test = dataset.n_test(),
            epochs = self.epochs,
            params = weights.len(),
            "starting training run"
        );

        let mut records = Vec::with_capacity(self.epochs);
        for step in 1..=self.epochs {
            let train_cost_at = |w: &[f64]| -> TrainResult<f64> {
                let scores = eval::label_scores(
                    &self.model,
                    w,
                    &dataset.train_features,
                    &dataset.train_labels,
                )?;
                Ok(eval::cost(&scores))
            };

            // Train cost belongs to the point the step departs from; the
            // other metrics describe the updated weights.
            let train_cost = train_cost_at(&weights)?;
            let grad = central_difference(train_cost_at, &weights, self.gradient_step)?;
            optimizer.step(&mut weights, &grad);

            let train_scores = eval::label_scores(
                &self.model,
                &weights,
                &dataset.train_features,
                &dataset.train_labels,
            )?;
            let test = eval::evaluate(
                &self.model,
                &weights,
                &dataset.test_features,
                &dataset.test_labels,
            )?;

            let record = TrainRecord {
                n_train,
                step,
                train_cost,
                train_acc: eval::accuracy(&train_scores),
                test_cost: test.cost,
                test_acc: test.accuracy,
            };
            info!(
                step,
                train_cost = record.train_cost,
                train_acc = record.train_acc,
                test_cost = record.test_cost,
                test_acc = record.test_acc,
                "epoch complete"
            );
            on_step(&record);
            records.push(record);
        }

        Ok(TrainOutcome { records, weights })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QcnnConfig;

    fn tiny_dataset() -> Dataset {
        // Hand-built 16-feature split for a 4-wire model.
        let sample = |bias: f64| (0..16).map(|i| bias + (i as f64) / 32.0).collect::<Vec<_>>();
        Dataset {
            train_features: vec![sample(0.0), sample(0.3), sample(0.6), sample(0.1)],
            train_labels: vec![0, 1, 0, 1],
            test_features: vec![sample(0.2), sample(0.5)],
            test_labels: vec![1, 0],
        }
    }

    fn tiny_trainer() -> Trainer {
        let model = QcnnModel::new(QcnnConfig::new(4, 1).unwrap());
        Trainer::new(model).with_epochs(1).with_seed(0)
    }

    #[test]
    fn test_single_epoch_record() {
        let outcome = tiny_trainer().run(&tiny_dataset()).unwrap();
        assert_eq!(outcome.records.len(), 1);

        let record = outcome.records[0];
        assert_eq!(record.step, 1);
        assert_eq!(record.n_train, 4);
        for metric in [
            record.train_cost,
            record.train_acc,
            record.test_cost,
            record.test_acc,
        ] {
            assert!(metric.is_finite());
            assert!((-1e-9..=1.0 + 1e-9).contains(&metric));
        }
    }

    #[test]
    fn test_training_is_deterministic() {
        let dataset = tiny_dataset();
        let a = tiny_trainer().run(&dataset).unwrap();
        let b = tiny_trainer().run(&dataset).unwrap();
        assert_eq!(a.records, b.records);
        assert_eq!(a.weights, b.weights);
    }

    #[test]
    fn test_step_callback_sees_every_record() {
        let trainer = tiny_trainer().with_epochs(3);
        let mut seen = vec![];
        let outcome = trainer
            .run_with(&tiny_dataset(), |r| seen.push(r.step))
            .unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(outcome.records.len(), 3);
    }

    #[test]
    fn test_train_cost_reflects_pre_step_weights() {
        let dataset = tiny_dataset();
        let model = QcnnModel::new(QcnnConfig::new(4, 1).unwrap());
        let mut rng = StdRng::seed_from_u64(0);
        let initial = QcnnParams::random_flat(
            model.config().num_layers(),
            model.config().dense_weight_count(),
            &mut rng,
        );
        let initial_scores = eval::label_scores(
            &model,
            &initial,
            &dataset.train_features,
            &dataset.train_labels,
        )
        .unwrap();

        let outcome = tiny_trainer().run(&dataset).unwrap();
        let record = outcome.records[0];
        // Cost is taken where the step departs from, accuracy after it lands.
        assert!((record.train_cost - eval::cost(&initial_scores)).abs() < 1e-12);

        let updated_scores = eval::label_scores(
            &model,
            &outcome.weights,
            &dataset.train_features,
            &dataset.train_labels,
        )
        .unwrap();
        assert!((record.train_acc - eval::accuracy(&updated_scores)).abs() < 1e-12);
    }

    #[test]
    fn test_weights_move_during_training() {
        let model = QcnnModel::new(QcnnConfig::new(4, 1).unwrap());
        let mut rng = StdRng::seed_from_u64(0);
        let initial = QcnnParams::random_flat(
            model.config().num_layers(),
            model.config().dense_weight_count(),
            &mut rng,
        );

        let outcome = tiny_trainer().run(&tiny_dataset()).unwrap();
        assert_eq!(outcome.weights.len(), initial.len());
        assert_ne!(outcome.weights, initial);
    }
}
