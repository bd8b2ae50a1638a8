//! Error taxonomy for the T-Linkage pipeline.
//!
//! Only recoverable conditions live here. Caller bugs (an empty cluster
//! handed to the preference engine, preference vectors of different
//! lengths) are precondition violations and panic instead.

use crate::models::ModelKind;

/// Errors produced while fitting models or running the pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TLinkageError {
    /// The sample cannot define a model of this kind (vertical least-squares
    /// sample, collinear circle sample, coincident points).
    ///
    /// Frequent during random sampling; the hypothesis generator discards
    /// the sample and draws another.
    #[error("degenerate {kind:?} sample: {reason}")]
    DegenerateModel {
        kind: ModelKind,
        reason: &'static str,
    },

    /// Not enough points to instantiate a single model.
    #[error("too few points: needed {needed}, got {got}")]
    TooFewPoints { needed: usize, got: usize },

    /// Hypothesis generation ran out of attempts without a single model.
    #[error("no hypothesis could be generated (requested {requested})")]
    NoHypotheses { requested: usize },

    /// A configuration value is outside its admissible range.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Input data has the wrong shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, TLinkageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_message_names_kind() {
        let err = TLinkageError::DegenerateModel {
            kind: ModelKind::Circle,
            reason: "collinear points",
        };
        assert_eq!(err.to_string(), "degenerate Circle sample: collinear points");
    }
}
