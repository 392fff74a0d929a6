//! QCNN Generalization Study Demo
//!
//! Trains a quantum convolutional neural network classifier at several
//! training set sizes and reports how test cost and accuracy respond,
//! finishing with a metrics table, diagnostic charts, and a JSON export.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use qcnn_demos::{
    create_progress_bar, print_header, print_info, print_result, print_section, print_success,
};
use qcnn_train::data::generate_dataset;
use qcnn_train::model::{QcnnConfig, QcnnModel};
use qcnn_train::report::{StudyConfig, StudyReport};
use qcnn_train::trainer::Trainer;

#[derive(Parser, Debug)]
#[command(name = "demo-generalization")]
#[command(about = "Train QCNNs across training set sizes and compare generalization")]
struct Args {
    /// Training set sizes to sweep, comma separated
    #[arg(long, value_delimiter = ',', default_value = "2,5,10,20,40")]
    train_sizes: Vec<usize>,

    /// Test set size, shared across all runs
    #[arg(long, default_value = "100")]
    n_test: usize,

    /// Optimizer steps per run
    #[arg(short, long, default_value = "20")]
    epochs: usize,

    /// Seed for dataset generation and weight initialization
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// Number of wires the embedding loads
    #[arg(short = 'w', long, default_value = "6")]
    num_wires: usize,

    /// Number of conv-and-pool layers
    #[arg(short = 'l', long, default_value = "2")]
    num_layers: usize,

    /// Adam step size
    #[arg(long, default_value = "0.01")]
    step_size: f64,

    /// Path for the JSON report
    #[arg(short, long, default_value = "qcnn_generalization.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    print_header("QCNN Generalization Study");

    let config = QcnnConfig::new(args.num_wires, args.num_layers)?;

    print_section("Model");
    print_result("Wires", args.num_wires);
    print_result("Conv-and-pool layers", args.num_layers);
    print_result("Readout wires", config.readout_wires().len());
    print_result("Trainable weights", config.num_params());
    print_result("Epochs per run", args.epochs);
    print_result("Test samples", args.n_test);

    let mut report = StudyReport::new(StudyConfig {
        train_sizes: args.train_sizes.clone(),
        n_test: args.n_test,
        epochs: args.epochs,
        seed: args.seed,
        num_wires: args.num_wires,
        num_layers: args.num_layers,
    });

    for &n_train in &args.train_sizes {
        print_section(&format!("Training with {n_train} samples"));
        let dataset = generate_dataset(n_train, args.n_test, args.seed)?;

        let trainer = Trainer::new(QcnnModel::new(config))
            .with_epochs(args.epochs)
            .with_step_size(args.step_size)
            .with_seed(args.seed);

        let pb = create_progress_bar(args.epochs as u64, "training...");
        let outcome = trainer.run_with(&dataset, |record| {
            pb.set_message(format!(
                "test cost {:.3}, test acc {:.3}",
                record.test_cost, record.test_acc
            ));
            pb.inc(1);
        })?;
        pb.finish_with_message("done");

        if let Some(last) = outcome.records.last() {
            print_result("Train accuracy", format!("{:.3}", last.train_acc));
            print_result("Test accuracy", format!("{:.3}", last.test_acc));
            print_result(
                "Generalization gap",
                format!("{:.4}", last.test_cost - last.train_cost),
            );
        }
        report.extend(outcome.records);
    }

    print_section("Final metrics");
    print!("{}", report.render_table());

    print_section("Diagnostics");
    print!("{}", report.render_charts());

    report.export_json(&args.output)?;
    print_info(&format!("Report written to {}", args.output.display()));

    println!();
    print_success("Generalization study complete!");
    Ok(())
}
