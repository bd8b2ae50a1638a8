//! Line estimator for 2D line fitting.

use nalgebra::{Matrix2, Vector2};

use crate::core::Estimator;
use crate::error::{Result, TLinkageError};
use crate::models::{Line, Model, ModelKind};
use crate::types::Point;

/// Relative floor on the normal-equation determinant below which the sample
/// is treated as vertical.
const DEGENERACY_EPS: f64 = 1e-12;

/// Line estimator fitting `y = ax + b` by ordinary least squares.
///
/// Residuals are measured along `y`, so a vertical sample has no solution and
/// is reported as degenerate. For two points the fit is the line through both.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineEstimator;

impl LineEstimator {
    pub fn new() -> Self {
        Self
    }

    fn degenerate(reason: &'static str) -> TLinkageError {
        TLinkageError::DegenerateModel {
            kind: ModelKind::Line,
            reason,
        }
    }
}

impl Estimator for LineEstimator {
    fn kind(&self) -> ModelKind {
        ModelKind::Line
    }

    fn is_valid_sample(&self, sample: &[Point]) -> bool {
        if sample.len() < self.sample_size() {
            return false;
        }
        // Any two distinct points define a line.
        sample.iter().skip(1).any(|p| *p != sample[0])
    }

    fn estimate_model(&self, sample: &[Point]) -> Result<Model> {
        if sample.len() < self.sample_size() {
            return Err(TLinkageError::TooFewPoints {
                needed: self.sample_size(),
                got: sample.len(),
            });
        }
        self.estimate_model_nonminimal(sample)
    }

    fn estimate_model_nonminimal(&self, points: &[Point]) -> Result<Model> {
        let n = points.len() as f64;
        if points.len() < self.sample_size() {
            return Err(TLinkageError::TooFewPoints {
                needed: self.sample_size(),
                got: points.len(),
            });
        }

        let (mut sx, mut sy, mut sxx, mut sxy) = (0.0, 0.0, 0.0, 0.0);
        for p in points {
            sx += p.x();
            sy += p.y();
            sxx += p.x() * p.x();
            sxy += p.x() * p.y();
        }

        // Normal equations of min sum (a x_i + b - y_i)^2.
        let normal = Matrix2::new(sxx, sx, sx, n);
        let rhs = Vector2::new(sxy, sy);

        // det = n * sum (x_i - mean_x)^2, zero iff every x is equal.
        if normal.determinant() <= DEGENERACY_EPS * n * n {
            return Err(Self::degenerate("vertical sample"));
        }
        let solution = normal
            .try_inverse()
            .map(|inv| inv * rhs)
            .ok_or_else(|| Self::degenerate("singular normal equations"))?;

        if !solution.iter().all(|v| v.is_finite()) {
            return Err(Self::degenerate("non-finite parameters"));
        }
        Ok(Model::Line(Line::new(solution[0], solution[1])))
    }
}
