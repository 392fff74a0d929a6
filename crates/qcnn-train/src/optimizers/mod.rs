//! Gradient-based optimizers.

pub mod adam;

pub use adam::Adam;

/// A stateful first-order optimizer over a flat parameter vector.
pub trait Optimizer {
    /// Apply one update in place given the gradient at `params`.
    fn step(&mut self, params: &mut [f64], grad: &[f64]);

    /// Get the optimizer name.
    fn name(&self) -> &str;
}
