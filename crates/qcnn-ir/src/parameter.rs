//! Parameter expressions for parameterized circuits.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// A symbolic or concrete parameter expression.
///
/// Ansatz builders usually pass concrete `f64` angles, which convert via
/// `From<f64>`. Symbols exist so a circuit structure can be built once and
/// bound to different values later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterExpression {
    /// A constant numeric value.
    Constant(f64),
    /// A symbolic parameter.
    Symbol(String),
    /// The constant π.
    Pi,
    /// Negation.
    Neg(Box<ParameterExpression>),
}

impl ParameterExpression {
    /// Create a constant parameter.
    pub fn constant(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }

    /// Create a symbolic parameter.
    pub fn symbol(name: impl Into<String>) -> Self {
        ParameterExpression::Symbol(name.into())
    }

    /// Create a π constant.
    pub fn pi() -> Self {
        ParameterExpression::Pi
    }

    /// Check if this expression contains any symbols.
    pub fn is_symbolic(&self) -> bool {
        match self {
            ParameterExpression::Symbol(_) => true,
            ParameterExpression::Constant(_) | ParameterExpression::Pi => false,
            ParameterExpression::Neg(e) => e.is_symbolic(),
        }
    }

    /// Evaluate to a concrete value, if fully bound.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterExpression::Constant(v) => Some(*v),
            ParameterExpression::Pi => Some(PI),
            ParameterExpression::Symbol(_) => None,
            ParameterExpression::Neg(e) => e.as_f64().map(|v| -v),
        }
    }

    /// Bind a symbol to a concrete value, returning the substituted expression.
    #[must_use]
    pub fn bind(&self, name: &str, value: f64) -> Self {
        match self {
            ParameterExpression::Symbol(s) if s == name => {
                ParameterExpression::Constant(value)
            }
            ParameterExpression::Neg(e) => {
                ParameterExpression::Neg(Box::new(e.bind(name, value)))
            }
            other => other.clone(),
        }
    }

    /// The first unbound symbol name, if any.
    pub fn first_symbol(&self) -> Option<&str> {
        match self {
            ParameterExpression::Symbol(s) => Some(s),
            ParameterExpression::Neg(e) => e.first_symbol(),
            _ => None,
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterExpression::Constant(v) => write!(f, "{v}"),
            ParameterExpression::Symbol(s) => write!(f, "{s}"),
            ParameterExpression::Pi => write!(f, "pi"),
            ParameterExpression::Neg(e) => write!(f, "-({e})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_evaluation() {
        assert_eq!(ParameterExpression::constant(1.5).as_f64(), Some(1.5));
        assert_eq!(ParameterExpression::pi().as_f64(), Some(PI));
    }

    #[test]
    fn test_symbol_is_unbound() {
        let theta = ParameterExpression::symbol("theta");
        assert!(theta.is_symbolic());
        assert_eq!(theta.as_f64(), None);
        assert_eq!(theta.first_symbol(), Some("theta"));
    }

    #[test]
    fn test_bind() {
        let theta = ParameterExpression::symbol("theta");
        let bound = theta.bind("theta", 0.25);
        assert_eq!(bound.as_f64(), Some(0.25));

        // Binding an unrelated name changes nothing.
        let still_symbolic = theta.bind("phi", 1.0);
        assert!(still_symbolic.is_symbolic());
    }

    #[test]
    fn test_negation() {
        let neg = ParameterExpression::Neg(Box::new(ParameterExpression::constant(2.0)));
        assert_eq!(neg.as_f64(), Some(-2.0));
    }

    #[test]
    fn test_from_f64() {
        let p: ParameterExpression = 0.5.into();
        assert_eq!(p.as_f64(), Some(0.5));
    }
}
