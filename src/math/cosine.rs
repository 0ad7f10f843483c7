/// Euclidean (L2) norm of a vector.
pub fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Cosine distance `1 - (a·b) / (‖a‖·‖b‖)` between two equal-length vectors.
///
/// Zero for parallel vectors, 1 for orthogonal, 2 for anti-parallel.
pub fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    1.0 - dot / (l2_norm(a) * l2_norm(b))
}
