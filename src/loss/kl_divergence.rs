use serde::{Serialize, Deserialize};

use crate::error::LossError;
use crate::loss::Loss;
use crate::math::tensor::Tensor;

/// Kullback–Leibler divergence: `sum(target ⊙ (log(target) - prediction))`.
///
/// `prediction` must already be in log-probability space (log-softmax
/// output); `target` is a plain probability distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KlDivergence {
    pub reduction: bool,
}

impl KlDivergence {
    pub fn new(reduction: bool) -> KlDivergence {
        KlDivergence { reduction }
    }
}

impl Loss for KlDivergence {
    fn forward(&self, prediction: &Tensor, target: &Tensor) -> Result<f64, LossError> {
        let loss_sum = target
            .zip_map(prediction, |t, p| t * (t.ln() - p))?
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

        *gradient = target.map(|t| -t);

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
    fn zero_divergence_when_target_is_exp_of_prediction() {
        // log(target) - prediction = 0 elementwise, so the sum vanishes.
        let p = Tensor::from_data(vec![vec![-1.2, -0.7], vec![-2.3, -0.1]]);
        let t = p.map(f64::exp);

        let loss = KlDivergence::new(true);
        assert!(approx(loss.forward(&p, &t).unwrap(), 0.0));
    }

    #[test]
    fn forward_matches_hand_computation() {
        let p = Tensor::from_data(vec![vec![-1.0, -2.0]]);
        let t = Tensor::from_data(vec![vec![0.5, 0.5]]);

        // 0.5·(ln 0.5 + 1) + 0.5·(ln 0.5 + 2)
        let expected = 0.5 * (0.5f64.ln() + 1.0) + 0.5 * (0.5f64.ln() + 2.0);
        let loss = KlDivergence::new(true);
        assert!(approx(loss.forward(&p, &t).unwrap(), expected));

        let mean = KlDivergence::new(false);
        assert!(approx(mean.forward(&p, &t).unwrap(), expected / 2.0));
    }

    #[test]
    fn gradient_is_negated_target() {
        let p = Tensor::from_data(vec![vec![-0.5, -1.5]]);
        let t = Tensor::from_data(vec![vec![0.25, 0.75]]);

        let loss = KlDivergence::new(true);
        let mut g = Tensor::zeros(0, 0);
        loss.backward(&p, &t, &mut g).unwrap();
        assert_eq!(g.data, vec![vec![-0.25, -0.75]]);

        let mean = KlDivergence::new(false);
        mean.backward(&p, &t, &mut g).unwrap();
        assert!(approx(g.data[0][0], -0.125));
        assert!(approx(g.data[0][1], -0.375));
    }

    #[test]
    fn shape_mismatch_is_fatal() {
        let p = Tensor::zeros(2, 3);
        let t = Tensor::zeros(3, 2);
        let loss = KlDivergence::new(true);

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
