//! Numeric gradients for objective functions over flat parameter vectors.

/// Default finite-difference half-step.
pub const DEFAULT_STEP: f64 = 1e-5;

/// Central-difference gradient of `f` at `params`.
///
/// Each component is (f(x + h·eᵢ) - f(x - h·eᵢ)) / 2h, evaluated with the
/// parameter vector shifted in place and restored afterwards. The objective
/// is called `2·params.len()` times.
pub fn central_difference<F, E>(mut f: F, params: &[f64], step: f64) -> Result<Vec<f64>, E>
where
    F: FnMut(&[f64]) -> Result<f64, E>,
{
    let mut shifted = params.to_vec();
    let mut grad = Vec::with_capacity(params.len());

    for i in 0..params.len() {
        shifted[i] = params[i] + step;
        let plus = f(&shifted)?;
        shifted[i] = params[i] - step;
        let minus = f(&shifted)?;
        shifted[i] = params[i];

        grad.push((plus - minus) / (2.0 * step));
    }

    Ok(grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn test_quadratic_gradient() {
        let f = |x: &[f64]| Ok::<_, Infallible>(x[0] * x[0] + 3.0 * x[1]);
        let grad = central_difference(f, &[2.0, -1.0], DEFAULT_STEP).unwrap();

        assert!((grad[0] - 4.0).abs() < 1e-6);
        assert!((grad[1] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_error_propagates() {
        let f = |_: &[f64]| Err::<f64, &str>("boom");
        assert!(central_difference(f, &[0.0], DEFAULT_STEP).is_err());
    }

    #[test]
    fn test_empty_params() {
        let f = |_: &[f64]| Ok::<_, Infallible>(0.0);
        let grad = central_difference(f, &[], DEFAULT_STEP).unwrap();
        assert!(grad.is_empty());
    }
}
