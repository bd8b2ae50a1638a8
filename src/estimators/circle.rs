//! Circle estimator: circumcircle of three points, algebraic fit beyond.

use nalgebra::{DMatrix, DVector, Matrix2, Vector2};

use crate::core::Estimator;
use crate::error::{Result, TLinkageError};
use crate::models::{Circle, Model, ModelKind};
use crate::types::Point;

/// Twice the signed triangle area below which three points count as collinear.
const COLLINEARITY_EPS: f64 = 1e-12;
/// Smallest/largest singular value ratio accepted by the algebraic fit.
const CONDITION_EPS: f64 = 1e-9;

/// Circle estimator.
///
/// Minimal samples are solved exactly through the perpendicular-bisector
/// equations. Larger point sets use the algebraic (Kåsa) fit
/// `x² + y² + Dx + Ey + F = 0` solved in the least-squares sense.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleEstimator;

impl CircleEstimator {
    pub fn new() -> Self {
        Self
    }

    fn degenerate(reason: &'static str) -> TLinkageError {
        TLinkageError::DegenerateModel {
            kind: ModelKind::Circle,
            reason,
        }
    }

    fn circumcircle(a: &Point, b: &Point, c: &Point) -> Result<Circle> {
        let (abx, aby) = (b.x() - a.x(), b.y() - a.y());
        let (acx, acy) = (c.x() - a.x(), c.y() - a.y());
        if (abx * acy - aby * acx).abs() < COLLINEARITY_EPS {
            return Err(Self::degenerate("collinear points"));
        }

        let norm_sq = |p: &Point| p.x() * p.x() + p.y() * p.y();
        // |center - a| = |center - b| = |center - c|, linear in the center.
        let system = Matrix2::new(2.0 * abx, 2.0 * aby, 2.0 * acx, 2.0 * acy);
        let rhs = Vector2::new(norm_sq(b) - norm_sq(a), norm_sq(c) - norm_sq(a));
        let center = system
            .try_inverse()
            .map(|inv| inv * rhs)
            .ok_or_else(|| Self::degenerate("collinear points"))?;

        let radius = ((a.x() - center.x).powi(2) + (a.y() - center.y).powi(2)).sqrt();
        Ok(Circle::new(center.x, center.y, radius))
    }
}

impl Estimator for CircleEstimator {
    fn kind(&self) -> ModelKind {
        ModelKind::Circle
    }

    fn is_valid_sample(&self, sample: &[Point]) -> bool {
        if sample.len() < self.sample_size() {
            return false;
        }
        for i in 0..sample.len() {
            for j in (i + 1)..sample.len() {
                if sample[i] == sample[j] {
                    return false;
                }
            }
        }
        true
    }

    fn estimate_model(&self, sample: &[Point]) -> Result<Model> {
        match sample {
            [a, b, c] => Self::circumcircle(a, b, c).map(Model::Circle),
            _ if sample.len() > 3 => self.estimate_model_nonminimal(sample),
            _ => Err(TLinkageError::TooFewPoints {
                needed: self.sample_size(),
                got: sample.len(),
            }),
        }
    }

    fn estimate_model_nonminimal(&self, points: &[Point]) -> Result<Model> {
        let n = points.len();
        if n < self.sample_size() {
            return Err(TLinkageError::TooFewPoints {
                needed: self.sample_size(),
                got: n,
            });
        }

        let design = DMatrix::from_fn(n, 3, |r, c| match c {
            0 => points[r].x(),
            1 => points[r].y(),
            _ => 1.0,
        });
        let target = DVector::from_fn(n, |r, _| {
            let p = &points[r];
            -(p.x() * p.x() + p.y() * p.y())
        });

        let svd = design.svd(true, true);
        let max_sv = svd.singular_values.max();
        if max_sv <= 0.0 || svd.singular_values.min() / max_sv < CONDITION_EPS {
            return Err(Self::degenerate("collinear points"));
        }
        let params = svd
            .solve(&target, f64::EPSILON)
            .map_err(|_| Self::degenerate("least-squares solve failed"))?;

        let (d, e, f) = (params[0], params[1], params[2]);
        let (cx, cy) = (-d / 2.0, -e / 2.0);
        let r_sq = cx * cx + cy * cy - f;
        if r_sq <= 0.0 || !r_sq.is_finite() {
            return Err(Self::degenerate("imaginary radius"));
        }
        Ok(Model::Circle(Circle::new(cx, cy, r_sq.sqrt())))
    }
}
