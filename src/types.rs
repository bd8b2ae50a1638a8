//! Core shared types: points, point ids and preference representations.
//!
//! Points live in an arena (`PointPool`) and are referred to everywhere else
//! by their stable `PointId`. Preference vectors use `nalgebra`'s dynamic
//! vector so dot products and squared norms come for free.

use nalgebra::DVector;

/// Stable index of a point inside its `PointPool`.
pub type PointId = usize;

/// Continuous preference of one entity (point or cluster) for every model of
/// the model pool, indexed like the pool.
pub type PreferenceVector = DVector<f64>;

/// Boolean preference set: entry `i` is `true` iff the entity is in the
/// consensus set of model `i`.
pub type PreferenceSet = Vec<bool>;

/// A point of the unit square.
///
/// Coordinates are clamped to `[0, 1]` on construction. Two points are equal
/// when their coordinates are; the inlier flag and the best-match scratch
/// value take no part in identity.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    x: f64,
    y: f64,
    inlier: bool,
    best_match: Option<f64>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
            inlier: false,
            best_match: None,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Whether the point belongs to a validated cluster.
    pub fn is_inlier(&self) -> bool {
        self.inlier
    }

    pub(crate) fn accept(&mut self) {
        self.inlier = true;
    }

    /// Record the preference of this point for the model it was explained by.
    ///
    /// A value of zero is still a match: the point may sit past the cutoff of
    /// the refit model of its own cluster.
    pub fn store_best_match(&mut self, value: f64) {
        self.best_match = Some(value);
    }

    /// Return the stored best-match value and reset the slot.
    pub fn take_best_match(&mut self) -> Option<f64> {
        self.best_match.take()
    }

    pub fn has_best_match(&self) -> bool {
        self.best_match.is_some()
    }

    pub fn squared_distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}
