//! Adam optimizer.
//!
//! Adaptive moment estimation (Kingma & Ba, 2014): exponential moving
//! averages of the gradient and its square, with bias correction for the
//! early steps.

use super::Optimizer;

/// Adam optimizer with per-parameter adaptive step sizes.
#[derive(Debug, Clone)]
pub struct Adam {
    step_size: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    /// Step counter for bias correction.
    t: u64,
    /// First moment estimate.
    m: Vec<f64>,
    /// Second moment estimate.
    v: Vec<f64>,
}

impl Adam {
    /// Create an Adam optimizer with the given step size and the standard
    /// defaults β₁ = 0.9, β₂ = 0.999, ε = 1e-8.
    pub fn new(step_size: f64) -> Self {
        Self {
            step_size,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            t: 0,
            m: vec![],
            v: vec![],
        }
    }

    /// Override the moment decay rates.
    #[must_use]
    pub fn with_betas(mut self, beta1: f64, beta2: f64) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }

    /// Override the denominator stabilizer.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &mut [f64], grad: &[f64]) {
        if self.m.len() != params.len() {
            self.m = vec![0.0; params.len()];
            self.v = vec![0.0; params.len()];
            self.t = 0;
        }
        self.t += 1;

        let bias1 = 1.0 - self.beta1.powi(self.t as i32);
        let bias2 = 1.0 - self.beta2.powi(self.t as i32);

        for i in 0..params.len() {
            self.m[i] = self.beta1 * self.m[i] + (1.0 - self.beta1) * grad[i];
            self.v[i] = self.beta2 * self.v[i] + (1.0 - self.beta2) * grad[i] * grad[i];

            let m_hat = self.m[i] / bias1;
            let v_hat = self.v[i] / bias2;
            params[i] -= self.step_size * m_hat / (v_hat.sqrt() + self.epsilon);
        }
    }

    fn name(&self) -> &str {
        "Adam"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_step_moves_by_step_size() {
        // With bias correction the first update is lr·g/(|g| + ε) ≈ lr·sign(g).
        let mut adam = Adam::new(0.01);
        let mut params = vec![1.0, -2.0];
        adam.step(&mut params, &[0.5, -3.0]);

        assert!((params[0] - (1.0 - 0.01)).abs() < 1e-6);
        assert!((params[1] - (-2.0 + 0.01)).abs() < 1e-6);
    }

    #[test]
    fn test_converges_on_quadratic() {
        // Minimize (x - 3)², gradient 2(x - 3).
        let mut adam = Adam::new(0.1);
        let mut params = vec![0.0];
        for _ in 0..500 {
            let grad = vec![2.0 * (params[0] - 3.0)];
            adam.step(&mut params, &grad);
        }
        assert!((params[0] - 3.0).abs() < 1e-2);
    }

    #[test]
    fn test_zero_gradient_is_inert() {
        let mut adam = Adam::new(0.01);
        let mut params = vec![0.7, -0.3];
        adam.step(&mut params, &[0.0, 0.0]);
        assert_eq!(params, vec![0.7, -0.3]);
    }

    #[test]
    fn test_state_resets_on_dimension_change() {
        let mut adam = Adam::new(0.01);
        let mut a = vec![0.0];
        adam.step(&mut a, &[1.0]);

        let mut b = vec![0.0, 0.0];
        adam.step(&mut b, &[1.0, 1.0]);
        // Both components behave like a fresh first step.
        assert!((b[0] - b[1]).abs() < 1e-12);
        assert!((b[0] - (-0.01)).abs() < 1e-6);
    }
}
