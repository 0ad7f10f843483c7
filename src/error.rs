use thiserror::Error;

/// Errors raised by loss construction and the forward/backward passes.
///
/// Every variant is fatal for the call that produced it: a shape mismatch or
/// a bad hyperparameter signals a caller bug, so nothing is retried or
/// partially computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LossError {
    /// Prediction and target (or gradient output) shapes disagree.
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// A hyperparameter is outside its valid range (e.g. non-positive
    /// smoothness constant for the log-cosh loss).
    #[error("invalid hyperparameter '{name}': {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
