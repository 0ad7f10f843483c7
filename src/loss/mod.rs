pub mod cosine_embedding;
pub mod earth_mover;
pub mod hinge_embedding;
pub mod kl_divergence;
pub mod log_cosh;
pub mod loss_spec;

pub use cosine_embedding::CosineEmbeddingLoss;
pub use earth_mover::EarthMoverDistance;
pub use hinge_embedding::HingeEmbeddingLoss;
pub use kl_divergence::KlDivergence;
pub use log_cosh::LogCoshLoss;
pub use loss_spec::LossSpec;

use crate::error::LossError;
use crate::math::tensor::Tensor;

/// Common seam between a training loop and any of the loss functions.
///
/// Each implementation is stateless apart from its immutable hyperparameters,
/// so a single instance may be shared across threads operating on disjoint
/// buffers.
pub trait Loss {
    /// Scalar loss of `prediction` against `target` (same shape required).
    /// Returns the raw sum when the loss was built with `reduction = true`,
    /// the mean otherwise.
    fn forward(&self, prediction: &Tensor, target: &Tensor) -> Result<f64, LossError>;

    /// Gradient of the loss w.r.t. `prediction`, written into `gradient`
    /// (resized to prediction's shape). When `reduction = false` the result
    /// is pre-divided by the same count `forward`'s mean uses.
    fn backward(
        &self,
        prediction: &Tensor,
        target: &Tensor,
        gradient: &mut Tensor,
    ) -> Result<(), LossError>;
}
