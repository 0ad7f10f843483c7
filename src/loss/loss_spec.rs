use serde::{Serialize, Deserialize};

use crate::error::LossError;
use crate::loss::{
    CosineEmbeddingLoss, EarthMoverDistance, HingeEmbeddingLoss, KlDivergence, LogCoshLoss, Loss,
};

/// A fully serializable description of a configured loss function.
///
/// `LossSpec` round-trips every hyperparameter by name through JSON, so a
/// training checkpoint can store which loss it was using and rebuild it on
/// load. `build` applies the same validation as direct construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LossSpec {
    CosineEmbedding {
        margin: f64,
        similarity: bool,
        reduction: bool,
    },
    EarthMover {
        reduction: bool,
    },
    HingeEmbedding {
        reduction: bool,
    },
    KlDivergence {
        reduction: bool,
    },
    LogCosh {
        a: f64,
        reduction: bool,
    },
}

impl LossSpec {
    /// Instantiates the described loss. Fails when the spec carries an
    /// invalid hyperparameter (non-positive `a` for log-cosh).
    pub fn build(&self) -> Result<Box<dyn Loss>, LossError> {
        match *self {
            LossSpec::CosineEmbedding { margin, similarity, reduction } => {
                Ok(Box::new(CosineEmbeddingLoss::new(margin, similarity, reduction)))
            }
            LossSpec::EarthMover { reduction } => {
                Ok(Box::new(EarthMoverDistance::new(reduction)))
            }
            LossSpec::HingeEmbedding { reduction } => {
                Ok(Box::new(HingeEmbeddingLoss::new(reduction)))
            }
            LossSpec::KlDivergence { reduction } => {
                Ok(Box::new(KlDivergence::new(reduction)))
            }
            LossSpec::LogCosh { a, reduction } => {
                Ok(Box::new(LogCoshLoss::new(a, reduction)?))
            }
        }
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a `LossSpec` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<LossSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}
