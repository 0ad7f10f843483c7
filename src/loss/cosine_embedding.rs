use serde::{Serialize, Deserialize};

use crate::error::LossError;
use crate::loss::Loss;
use crate::math::cosine::{cosine_distance, l2_norm};
use crate::math::tensor::Tensor;

/// Cosine embedding loss over a batch of row-vector pairs.
///
/// Each row of prediction/target is one vector pair. With
/// `similarity = true` a pair contributes `1 - cos_dist`; otherwise it
/// contributes `max(0, cos_dist - margin)`, so dissimilar pairs already
/// separated past the margin cost nothing.
///
/// - `margin`     — clipping threshold for dissimilar pairs (default 0)
/// - `similarity` — true when the pair is meant to be similar
/// - `reduction`  — true returns the sum over the batch, false the mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CosineEmbeddingLoss {
    pub margin: f64,
    pub similarity: bool,
    pub reduction: bool,
}

impl CosineEmbeddingLoss {
    pub fn new(margin: f64, similarity: bool, reduction: bool) -> CosineEmbeddingLoss {
        CosineEmbeddingLoss { margin, similarity, reduction }
    }
}

impl Loss for CosineEmbeddingLoss {
    fn forward(&self, prediction: &Tensor, target: &Tensor) -> Result<f64, LossError> {
        prediction.check_shape(target)?;

        let batch_size = prediction.rows;
        let mut loss_sum = 0.0;

        for i in 0..batch_size {
            let cos_dist = cosine_distance(prediction.row(i), target.row(i));
            if self.similarity {
                loss_sum += 1.0 - cos_dist;
            } else {
                loss_sum += (cos_dist - self.margin).max(0.0);
            }
        }

        if self.reduction {
            Ok(loss_sum)
        } else {
            Ok(loss_sum / batch_size as f64)
        }
    }

    fn backward(
        &self,
        prediction: &Tensor,
        target: &Tensor,
        gradient: &mut Tensor,
    ) -> Result<(), LossError> {
        prediction.check_shape(target)?;

        let batch_size = prediction.rows;
        gradient.resize_to(prediction.rows, prediction.cols);

        for i in 0..batch_size {
            let p = prediction.row(i);
            let t = target.row(i);
            let cos_dist = cosine_distance(p, t);

            // Dissimilar pair inside the margin: clipped term, zero gradient.
            if !self.similarity && cos_dist < self.margin {
                gradient.data[i].iter_mut().for_each(|g| *g = 0.0);
                continue;
            }

            let sign = if self.similarity { 1.0 } else { -1.0 };
            let p_norm = l2_norm(p);
            let t_norm = l2_norm(t);

            // d/dp (cos_dist) = -(t/‖t‖ - cos_dist · p/‖p‖) / ‖p‖
            for j in 0..prediction.cols {
                let unit_t = t[j] / t_norm;
                let unit_p = p[j] / p_norm;
                gradient.data[i][j] = -sign * (unit_t - cos_dist * unit_p) / p_norm;
            }
        }

        if !self.reduction {
            *gradient = gradient.map(|g| g / batch_size as f64);
        }

        Ok(())
    }
}
