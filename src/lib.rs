pub mod error;
pub mod math;
pub mod loss;

// Convenience re-exports
pub use error::LossError;
pub use math::tensor::Tensor;
pub use math::cosine::cosine_distance;
pub use loss::{
    CosineEmbeddingLoss, EarthMoverDistance, HingeEmbeddingLoss, KlDivergence, LogCoshLoss, Loss,
    LossSpec,
};
