use serde::{Serialize, Deserialize};

use crate::error::LossError;
use crate::loss::Loss;
use crate::math::tensor::Tensor;

/// Earth mover distance in its critic form: `-sum(target ⊙ prediction)`.
///
/// The sign makes this a quantity to minimize inside a loop that wants to
/// maximize the inner product (Wasserstein-critic style training).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarthMoverDistance {
    pub reduction: bool,
}

impl EarthMoverDistance {
    pub fn new(reduction: bool) -> EarthMoverDistance {
        EarthMoverDistance { reduction }
    }
}

impl Loss for EarthMoverDistance {
    fn forward(&self, prediction: &Tensor, target: &Tensor) -> Result<f64, LossError> {
        let loss_sum = -target.zip_map(prediction, |t, p| t * p)?.sum();

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

        // Linear in prediction, so the gradient is just -target.
        *gradient = target.map(|t| -t);

        if !self.reduction {
            let n = target.len() as f64;
            *gradient = gradient.map(|g| g / n);
        }

        Ok(())
    }
}
