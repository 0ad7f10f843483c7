use serde::{Serialize, Deserialize};

use crate::error::LossError;
use crate::loss::Loss;
use crate::math::tensor::Tensor;

/// Hinge embedding loss: `sum((1 - target)/2 + prediction ⊙ target)`.
///
/// The backward pass returns `target` itself (scaled by 1/n for the mean
/// reduction) and never reads `prediction` — an intrinsic property of this
/// formulation, kept exactly as specified rather than swapped for the
/// textbook hinge gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HingeEmbeddingLoss {
    pub reduction: bool,
}

impl HingeEmbeddingLoss {
    pub fn new(reduction: bool) -> HingeEmbeddingLoss {
        HingeEmbeddingLoss { reduction }
    }
}

impl Loss for HingeEmbeddingLoss {
    fn forward(&self, prediction: &Tensor, target: &Tensor) -> Result<f64, LossError> {
        let loss_sum = target
            .zip_map(prediction, |t, p| (1.0 - t) / 2.0 + p * t)?
            .sum();

        if self.reduction {
            Ok(loss_sum)
        } else {
            Ok(loss_sum / target.len() as f64)
        }
    }

    fn backward(
        &self,
        prediction: &Tensor,
        target: &Tensor,
        gradient: &mut Tensor,
    ) -> Result<(), LossError> {
        prediction.check_shape(target)?;

        *gradient = target.clone();

        if !self.reduction {
            let n = target.len() as f64;
            *gradient = gradient.map(|g| g / n);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn forward_matches_hand_computation() {
        let p = Tensor::from_data(vec![vec![0.5, -0.5], vec![1.0, 2.0]]);
        let t = Tensor::from_data(vec![vec![1.0, -1.0], vec![1.0, -1.0]]);

        // Terms: (0 + 0.5) + (1 + 0.5) + (0 + 1) + (1 - 2) = 2.0
        let loss = HingeEmbeddingLoss::new(true);
        assert!(approx(loss.forward(&p, &t).unwrap(), 2.0));

        let mean = HingeEmbeddingLoss::new(false);
        assert!(approx(mean.forward(&p, &t).unwrap(), 0.5));
    }

    #[test]
    fn gradient_is_target_regardless_of_prediction() {
        let t = Tensor::from_data(vec![vec![1.0, -1.0, 1.0]]);
        let p1 = Tensor::zeros(1, 3);
        let p2 = Tensor::random(1, 3);

        let loss = HingeEmbeddingLoss::new(true);
        let mut g1 = Tensor::zeros(0, 0);
        let mut g2 = Tensor::zeros(0, 0);
        loss.backward(&p1, &t, &mut g1).unwrap();
        loss.backward(&p2, &t, &mut g2).unwrap();

        assert_eq!(g1, t);
        assert_eq!(g1, g2);
    }

    #[test]
    fn mean_reduction_scales_gradient_by_element_count() {
        let t = Tensor::from_data(vec![vec![1.0, -1.0], vec![1.0, 1.0]]);
        let p = Tensor::zeros(2, 2);

        let mean = HingeEmbeddingLoss::new(false);
        let mut g = Tensor::zeros(0, 0);
        mean.backward(&p, &t, &mut g).unwrap();

        for i in 0..2 {
            for j in 0..2 {
                assert!(approx(g.data[i][j], t.data[i][j] / 4.0));
            }
        }
    }

    #[test]
    fn shape_mismatch_is_fatal() {
        let p = Tensor::zeros(2, 3);
        let t = Tensor::zeros(3, 2);
        let loss = HingeEmbeddingLoss::new(true);

        assert!(matches!(
            loss.forward(&p, &t),
            Err(LossError::ShapeMismatch { .. })
        ));

        let mut grad = Tensor::zeros(0, 0);
        assert!(matches!(
            loss.backward(&p, &t, &mut grad),
            Err(LossError::ShapeMismatch { .. })
        ));
    }
}
