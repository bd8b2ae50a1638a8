//! Minimal-sample drawing strategies for hypothesis generation.
//!
//! Every strategy draws its anchor uniformly from the points that have not
//! yet anchored an accepted hypothesis, then completes the sample with
//! points chosen relative to that anchor. The first id of a sample is always
//! the anchor.

pub mod localized;
pub mod uniform;

pub use localized::LocalizedSampler;
pub use uniform::UniformSampler;

use log::debug;
use rand::Rng;

use crate::types::PointId;

/// Bookkeeping of which points may still serve as anchors.
///
/// Points of an accepted sample are reserved so that later hypotheses start
/// elsewhere. Once every point is reserved the reservations are released and
/// a new pass over the pool begins.
#[derive(Debug, Clone)]
pub struct AnchorSet {
    available: Vec<PointId>,
    reserved: Vec<bool>,
}

impl AnchorSet {
    pub fn new(point_count: usize) -> Self {
        Self {
            available: (0..point_count).collect(),
            reserved: vec![false; point_count],
        }
    }

    /// Number of points that can still be drawn as anchors in this pass.
    pub fn available(&self) -> usize {
        self.available.len()
    }

    pub fn is_reserved(&self, id: PointId) -> bool {
        self.reserved[id]
    }

    /// Draw an anchor uniformly among unreserved points.
    ///
    /// Returns `None` only for an empty pool.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<PointId> {
        if self.reserved.is_empty() {
            return None;
        }
        if self.available.is_empty() {
            debug!(
                "all {} points anchored a hypothesis, releasing reservations",
                self.reserved.len()
            );
            self.available = (0..self.reserved.len()).collect();
            self.reserved.fill(false);
        }
        Some(self.available[rng.gen_range(0..self.available.len())])
    }

    /// Withdraw the given points from the anchor candidates.
    pub fn reserve(&mut self, ids: &[PointId]) {
        let mut changed = false;
        for &id in ids {
            if !self.reserved[id] {
                self.reserved[id] = true;
                changed = true;
            }
        }
        if changed {
            let reserved = &self.reserved;
            self.available.retain(|&id| !reserved[id]);
        }
    }
}
