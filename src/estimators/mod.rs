//! Estimators for the supported model kinds.
//!
//! - Line estimation (ordinary least squares)
//! - Circle estimation (circumcircle, algebraic fit)
//!
//! `ModelKind::fit` and `ModelKind::fit_nonminimal` dispatch to the matching
//! estimator so callers never need to name one.

pub mod circle;
pub mod line;

pub use circle::CircleEstimator;
pub use line::LineEstimator;

use crate::core::Estimator;
use crate::error::Result;
use crate::models::{Model, ModelKind};
use crate::types::Point;

impl ModelKind {
    /// Whether `sample` is usable by this kind's minimal solver.
    pub fn is_valid_sample(self, sample: &[Point]) -> bool {
        match self {
            ModelKind::Line => LineEstimator.is_valid_sample(sample),
            ModelKind::Circle => CircleEstimator.is_valid_sample(sample),
        }
    }

    /// Instantiate a model from a minimal sample.
    pub fn fit(self, sample: &[Point]) -> Result<Model> {
        match self {
            ModelKind::Line => LineEstimator.estimate_model(sample),
            ModelKind::Circle => CircleEstimator.estimate_model(sample),
        }
    }

    /// Fit a model to an arbitrary number of points in the least-squares sense.
    pub fn fit_nonminimal(self, points: &[Point]) -> Result<Model> {
        match self {
            ModelKind::Line => LineEstimator.estimate_model_nonminimal(points),
            ModelKind::Circle => CircleEstimator.estimate_model_nonminimal(points),
        }
    }
}
