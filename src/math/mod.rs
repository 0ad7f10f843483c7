pub mod tensor;
pub mod cosine;
