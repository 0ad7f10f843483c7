use serde::{Serialize, Deserialize};

use crate::error::LossError;
use crate::loss::Loss;
use crate::math::tensor::Tensor;

/// Log-hyperbolic-cosine loss: `sum(log(cosh(a · (target - prediction)))) / a`.
///
/// Quadratic near zero residual, linear in the tails, so it behaves like MSE
/// for small errors without MSE's sensitivity to outliers. The smoothness
/// constant `a` controls where the transition happens and must be strictly
/// positive; construction refuses anything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogCoshLoss {
    pub a: f64,
    pub reduction: bool,
}

impl LogCoshLoss {
    pub fn new(a: f64, reduction: bool) -> Result<LogCoshLoss, LossError> {
        if a <= 0.0 {
            return Err(LossError::InvalidParameter { name: "a", value: a });
        }
        Ok(LogCoshLoss { a, reduction })
    }
}

impl Loss for LogCoshLoss {
    fn forward(&self, prediction: &Tensor, target: &Tensor) -> Result<f64, LossError> {
        let a = self.a;
        let loss_sum = target
            .zip_map(prediction, |t, p| (a * (t - p)).cosh().ln())?
            .sum()
            / a;

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
        let a = self.a;
        *gradient = target.zip_map(prediction, |t, p| (a * (t - p)).tanh())?;

        if !self.reduction {
            let n = target.len() as f64;
            *gradient = gradient.map(|g| g / n);
        }

        Ok(())
    }
}
