//! QCNN training machinery for the generalization study.
//!
//! Builds quantum convolutional neural networks on top of [`qcnn_ir`] and
//! [`qcnn_sim`]: ansatz layers, named weight blocks, the classifier model,
//! evaluation metrics, the Adam optimizer, a synthetic two-class image
//! dataset, the training loop, and study reporting.
//!
//! # Example
//!
//! ```rust,no_run
//! use qcnn_train::data::generate_dataset;
//! use qcnn_train::model::{QcnnConfig, QcnnModel};
//! use qcnn_train::trainer::Trainer;
//!
//! # fn main() -> Result<(), qcnn_train::TrainError> {
//! let dataset = generate_dataset(40, 100, 0)?;
//! let model = QcnnModel::new(QcnnConfig::new(6, 2)?);
//! let outcome = Trainer::new(model).with_epochs(20).run(&dataset)?;
//! println!("final test accuracy: {}", outcome.records.last().unwrap().test_acc);
//! # Ok(())
//! # }
//! ```

pub mod ansatz;
pub mod data;
pub mod error;
pub mod eval;
pub mod model;
pub mod optimizers;
pub mod params;
pub mod report;
pub mod trainer;

pub use error::{TrainError, TrainResult};
pub use model::{QcnnConfig, QcnnModel};
pub use params::QcnnParams;
pub use report::{StudyConfig, StudyReport};
pub use trainer::{TrainOutcome, TrainRecord, Trainer};
