//! Point pool: the arena owning every input point.
//!
//! The pool is filled once by whatever acquires the input (synthetic
//! generator, edge extractor) and is read-only to the clustering engine.
//! Clusters only hold `PointId`s into it. The one mutation performed after
//! acquisition is the validator flipping inlier flags.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use rand::Rng;

use crate::types::{Point, PointId};

/// Deduplicated collection of points addressed by stable ids.
#[derive(Debug, Clone, Default)]
pub struct PointPool {
    points: Vec<Point>,
    index: HashMap<(u64, u64), PointId>,
}

fn coordinate_key(p: &Point) -> (u64, u64) {
    // `+ 0.0` folds -0.0 into 0.0 so both hash identically.
    ((p.x() + 0.0).to_bits(), (p.y() + 0.0).to_bits())
}

impl PointPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from raw points, silently dropping exact duplicates.
    pub fn from_points<I, P>(points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        let mut pool = Self::new();
        for p in points {
            pool.insert(p.into());
        }
        pool
    }

    /// Insert a point unless one with the same coordinates is already present.
    ///
    /// Returns `true` if the point was added.
    pub fn insert(&mut self, point: Point) -> bool {
        match self.index.entry(coordinate_key(&point)) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(self.points.len());
                self.points.push(point);
                true
            }
        }
    }

    /// Insert a point with probability `1 / filter_value`.
    ///
    /// Meant for dense sources such as edge pixels, where keeping every
    /// sample would make the quadratic clustering step too slow. Duplicates
    /// are rejected before the draw. A `filter_value` of 0 or 1 keeps every
    /// new point.
    pub fn insert_filtered<R: Rng + ?Sized>(
        &mut self,
        point: Point,
        filter_value: u32,
        rng: &mut R,
    ) -> bool {
        if self.index.contains_key(&coordinate_key(&point)) {
            return false;
        }
        if filter_value > 1 && rng.gen_range(0..filter_value) != 0 {
            return false;
        }
        self.insert(point)
    }

    /// Id of the point with the same coordinates as `point`, if any.
    pub fn find(&self, point: &Point) -> Option<PointId> {
        self.index.get(&coordinate_key(point)).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point with the given id.
    ///
    /// Panics if `id` does not belong to this pool.
    pub fn get(&self, id: PointId) -> &Point {
        &self.points[id]
    }

    pub(crate) fn get_mut(&mut self, id: PointId) -> &mut Point {
        &mut self.points[id]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = (PointId, &Point)> {
        self.points.iter().enumerate()
    }

    pub fn ids(&self) -> std::ops::Range<PointId> {
        0..self.points.len()
    }

    /// Ids of the points currently flagged as inliers.
    pub fn inliers(&self) -> Vec<PointId> {
        self.iter()
            .filter(|(_, p)| p.is_inlier())
            .map(|(id, _)| id)
            .collect()
    }

    /// Ids of the points never associated with a validated model.
    pub fn outliers(&self) -> Vec<PointId> {
        self.iter()
            .filter(|(_, p)| !p.is_inlier())
            .map(|(id, _)| id)
            .collect()
    }

    pub(crate) fn mark_inlier(&mut self, id: PointId) {
        self.points[id].accept();
    }
}
