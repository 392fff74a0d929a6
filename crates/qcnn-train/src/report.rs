//! Study report: aggregation, text rendering, and JSON export.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TrainResult;
use crate::trainer::TrainRecord;

/// Glyphs for curve rendering, lowest value first.
const LEVELS: &[u8] = b" .:-=+*#%@";
/// Scatter plot width in columns.
const SCATTER_COLS: usize = 40;
/// Scatter plot height in rows.
const SCATTER_ROWS: usize = 10;

/// Settings of one generalization study, echoed into the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyConfig {
    pub train_sizes: Vec<usize>,
    pub n_test: usize,
    pub epochs: usize,
    pub seed: u64,
    pub num_wires: usize,
    pub num_layers: usize,
}

/// All records of a study across training set sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyReport {
    pub config: StudyConfig,
    pub records: Vec<TrainRecord>,
}

impl StudyReport {
    /// Create an empty report for a study configuration.
    pub fn new(config: StudyConfig) -> Self {
        Self {
            config,
            records: vec![],
        }
    }

    /// Append the trace of one training run.
    pub fn extend(&mut self, records: impl IntoIterator<Item = TrainRecord>) {
        self.records.extend(records);
    }

    /// The last-step record of each training set size, in study order.
    pub fn final_records(&self) -> Vec<TrainRecord> {
        self.config
            .train_sizes
            .iter()
            .filter_map(|&n| {
                self.records
                    .iter()
                    .filter(|r| r.n_train == n)
                    .max_by_key(|r| r.step)
                    .copied()
            })
            .collect()
    }

    /// Final metrics as an aligned text table.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:>8} {:>11} {:>10} {:>10} {:>9} {:>8}\n",
            "n_train", "train_cost", "train_acc", "test_cost", "test_acc", "gap"
        ));
        for r in self.final_records() {
            out.push_str(&format!(
                "{:>8} {:>11.4} {:>10.3} {:>10.4} {:>9.3} {:>8.4}\n",
                r.n_train,
                r.train_cost,
                r.train_acc,
                r.test_cost,
                r.test_acc,
                r.test_cost - r.train_cost
            ));
        }
        out
    }

    /// The per-step trace of one training set size, in step order.
    fn run_trace(&self, n_train: usize) -> Vec<TrainRecord> {
        let mut trace: Vec<TrainRecord> = self
            .records
            .iter()
            .filter(|r| r.n_train == n_train)
            .copied()
            .collect();
        trace.sort_by_key(|r| r.step);
        trace
    }

    /// Three diagnostic charts: cost curves, accuracy curves, and a final
    /// train-vs-test accuracy scatter. One glyph per step, darker is higher.
    pub fn render_charts(&self) -> String {
        let mut out = String::new();

        out.push_str("Cost by step (0 to 1, darker is higher)\n");
        for &n in &self.config.train_sizes {
            let trace = self.run_trace(n);
            out.push_str(&curve_line(n, "train", trace.iter().map(|r| r.train_cost)));
            out.push_str(&curve_line(n, "test", trace.iter().map(|r| r.test_cost)));
        }

        out.push_str("\nAccuracy by step (0 to 1, darker is higher)\n");
        for &n in &self.config.train_sizes {
            let trace = self.run_trace(n);
            out.push_str(&curve_line(n, "train", trace.iter().map(|r| r.train_acc)));
            out.push_str(&curve_line(n, "test", trace.iter().map(|r| r.test_acc)));
        }

        out.push_str("\nFinal train vs test accuracy (x: train, y: test)\n");
        out.push_str(&self.render_scatter());

        out
    }

    fn render_scatter(&self) -> String {
        let mut grid = vec![vec![b' '; SCATTER_COLS + 1]; SCATTER_ROWS + 1];
        for r in self.final_records() {
            let col = (r.train_acc.clamp(0.0, 1.0) * SCATTER_COLS as f64).round() as usize;
            let row = ((1.0 - r.test_acc.clamp(0.0, 1.0)) * SCATTER_ROWS as f64).round() as usize;
            grid[row][col] = b'o';
        }

        let mut out = String::new();
        for (i, row) in grid.iter().enumerate() {
            let y = 1.0 - i as f64 / SCATTER_ROWS as f64;
            out.push_str(&format!("{y:>5.1} |{}\n", String::from_utf8_lossy(row)));
        }
        out.push_str(&format!("      +{}\n", "-".repeat(SCATTER_COLS + 1)));
        out.push_str(&format!("       0.0{:>width$}\n", "1.0", width = SCATTER_COLS - 2));
        out
    }

    /// Serialize the report to pretty JSON.
    pub fn to_json(&self) -> TrainResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON report to a file.
    pub fn export_json(&self, path: &Path) -> TrainResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

fn curve_line(n_train: usize, split: &str, values: impl Iterator<Item = f64>) -> String {
    let curve: String = values
        .map(|v| {
            let level = (v.clamp(0.0, 1.0) * (LEVELS.len() - 1) as f64).round() as usize;
            LEVELS[level] as char
        })
        .collect();
    format!("{n_train:>6} {split:>5} |{curve}|\n")
}
