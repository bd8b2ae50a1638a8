//! Geometric models recovered by T-Linkage.
//!
//! The set of model kinds is closed: `Model` is a tagged variant over
//! `Line` and `Circle`, dispatched by `match`. Adding a kind means adding a
//! variant here and an estimator in `estimators`.

use std::fmt;

use nalgebra::Point2;

use crate::types::Point;

/// Points farther than `PREFERENCE_CUTOFF * tau` from a model get zero
/// preference for it.
pub const PREFERENCE_CUTOFF: f64 = 5.0;

/// The kinds of primitive the pipeline can recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelKind {
    Line,
    Circle,
}

impl ModelKind {
    /// Size of a minimal sample set for this kind.
    pub fn minimal_sample_size(self) -> usize {
        match self {
            ModelKind::Line => 2,
            ModelKind::Circle => 3,
        }
    }
}

/// A 2D line, either `y = slope * x + intercept` or `x = const`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Line {
    Sloped { slope: f64, intercept: f64 },
    Vertical { x: f64 },
}

impl Line {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Line::Sloped { slope, intercept }
    }

    pub fn vertical(x: f64) -> Self {
        Line::Vertical { x }
    }

    /// Perpendicular distance from `p` to the line.
    pub fn distance_to(&self, p: &Point) -> f64 {
        match *self {
            Line::Sloped { slope, intercept } => {
                (slope * p.x() - p.y() + intercept).abs() / (slope * slope + 1.0).sqrt()
            }
            Line::Vertical { x } => (p.x() - x).abs(),
        }
    }

    fn approx_eq(&self, other: &Line, tolerance: f64) -> bool {
        match (*self, *other) {
            (
                Line::Sloped {
                    slope: a1,
                    intercept: b1,
                },
                Line::Sloped {
                    slope: a2,
                    intercept: b2,
                },
            ) => (a1 - a2).abs() < tolerance && (b1 - b2).abs() < tolerance,
            (Line::Vertical { x: x1 }, Line::Vertical { x: x2 }) => (x1 - x2).abs() < tolerance,
            _ => false,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Sloped { slope, intercept } => write!(f, "y = {slope:.4}x + {intercept:.4}"),
            Line::Vertical { x } => write!(f, "x = {x:.4}"),
        }
    }
}

/// A circle given by its center and radius. The center may lie outside the
/// unit square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point2<f64>,
    pub radius: f64,
}

impl Circle {
    pub fn new(cx: f64, cy: f64, radius: f64) -> Self {
        Self {
            center: Point2::new(cx, cy),
            radius,
        }
    }

    /// Distance from `p` to the circumference.
    pub fn distance_to(&self, p: &Point) -> f64 {
        let d = (Point2::new(p.x(), p.y()) - self.center).norm();
        (d - self.radius).abs()
    }

    fn approx_eq(&self, other: &Circle, tolerance: f64) -> bool {
        (self.center.x - other.center.x).abs() < tolerance
            && (self.center.y - other.center.y).abs() < tolerance
            && (self.radius - other.radius).abs() < tolerance
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "center ({:.4}, {:.4}), radius {:.4}",
            self.center.x, self.center.y, self.radius
        )
    }
}

/// A model hypothesis of any supported kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Model {
    Line(Line),
    Circle(Circle),
}

impl Model {
    pub fn kind(&self) -> ModelKind {
        match self {
            Model::Line(_) => ModelKind::Line,
            Model::Circle(_) => ModelKind::Circle,
        }
    }

    pub fn minimal_sample_size(&self) -> usize {
        self.kind().minimal_sample_size()
    }

    /// Nonnegative residual of `p` with respect to this model.
    pub fn distance_to(&self, p: &Point) -> f64 {
        match self {
            Model::Line(line) => line.distance_to(p),
            Model::Circle(circle) => circle.distance_to(p),
        }
    }

    /// Preference of `p` for this model: `exp(-d / tau)` while the residual
    /// `d` is below `5 * tau`, exactly zero beyond.
    pub fn preference_value(&self, p: &Point, tau: f64) -> f64 {
        let d = self.distance_to(p);
        if d < PREFERENCE_CUTOFF * tau {
            (-d / tau).exp()
        } else {
            0.0
        }
    }

    /// Whether every parameter differs from `other`'s by less than `tolerance`.
    ///
    /// Models of different kinds are never equal.
    pub fn approx_eq(&self, other: &Model, tolerance: f64) -> bool {
        match (self, other) {
            (Model::Line(a), Model::Line(b)) => a.approx_eq(b, tolerance),
            (Model::Circle(a), Model::Circle(b)) => a.approx_eq(b, tolerance),
            _ => false,
        }
    }
}

impl From<Line> for Model {
    fn from(line: Line) -> Self {
        Model::Line(line)
    }
}

impl From<Circle> for Model {
    fn from(circle: Circle) -> Self {
        Model::Circle(circle)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Line(line) => write!(f, "line {line}"),
            Model::Circle(circle) => write!(f, "circle {circle}"),
        }
    }
}
