//! Core T-Linkage traits and the agglomerative clustering engine.
//!
//! - `Estimator` instantiates a model of one kind from a set of points.
//! - `Sampler` draws minimal samples for the hypothesis generator.
//! - `TLinkage` starts from one singleton cluster per point and repeatedly
//!   merges the two clusters whose preferences are closest, until no pair
//!   shares any model.

use log::{debug, info};
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::cluster::Cluster;
use crate::error::Result;
use crate::models::{Model, ModelKind};
use crate::pool::PointPool;
use crate::preference::ClusterPreference;
use crate::settings::TLinkageSettings;
use crate::types::{Point, PointId};

/// Estimator responsible for turning a set of points into a model.
pub trait Estimator {
    /// Kind of model produced by this estimator.
    fn kind(&self) -> ModelKind;

    /// Size of a minimal sample for this estimator.
    fn sample_size(&self) -> usize {
        self.kind().minimal_sample_size()
    }

    /// Check whether a given sample can define a model at all.
    fn is_valid_sample(&self, sample: &[Point]) -> bool;

    /// Estimate a model from a minimal sample.
    fn estimate_model(&self, sample: &[Point]) -> Result<Model>;

    /// Fit a model to any number of points in the least-squares sense.
    fn estimate_model_nonminimal(&self, points: &[Point]) -> Result<Model>;
}

/// Sampler responsible for drawing minimal samples from the pool.
pub trait Sampler {
    /// Draw `out_indices.len()` distinct point ids into `out_indices`, the
    /// anchor first.
    ///
    /// Returns `false` if a valid sample could not be drawn (caller may retry).
    fn sample<R: Rng + ?Sized>(
        &mut self,
        pool: &PointPool,
        rng: &mut R,
        out_indices: &mut [PointId],
    ) -> bool;

    /// Report whether the last sample produced an accepted hypothesis.
    fn update(&mut self, sample: &[PointId], accepted: bool);
}

/// Lifecycle of a clustering run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkageState {
    /// Singleton clusters, no round run yet.
    Initialized,
    /// The last round merged two clusters; another may follow.
    Linkable,
    /// No two clusters share a model. Terminal.
    Converged,
}

/// Agglomerative clustering over preference vectors.
///
/// Each active cluster keeps its preference cached. Merging two clusters
/// combines their cached preferences (element-wise minimum, or intersection
/// for preference sets), which is exactly what recomputing from the merged
/// members would give, so caching never changes the merge order.
#[derive(Debug, Clone)]
pub struct TLinkage {
    clusters: Vec<Cluster>,
    preferences: Vec<ClusterPreference>,
    state: LinkageState,
    rounds: usize,
}

impl TLinkage {
    /// One singleton cluster per point of the pool.
    pub fn new(pool: &PointPool, models: &[Model], settings: &TLinkageSettings) -> Self {
        Self::with_clusters(pool, models, settings, Cluster::singletons(pool))
    }

    /// Start from an arbitrary partition of the pool.
    ///
    /// Panics if a cluster is empty.
    pub fn with_clusters(
        pool: &PointPool,
        models: &[Model],
        settings: &TLinkageSettings,
        clusters: Vec<Cluster>,
    ) -> Self {
        let preferences = clusters
            .iter()
            .map(|c| ClusterPreference::compute(c, pool, models, settings.tau, settings.distance))
            .collect();
        Self {
            clusters,
            preferences,
            state: LinkageState::Initialized,
            rounds: 0,
        }
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn into_clusters(self) -> Vec<Cluster> {
        self.clusters
    }

    pub fn state(&self) -> LinkageState {
        self.state
    }

    /// Number of successful merges so far.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// The closest pair of active clusters `(i, j, distance)` with `i < j`,
    /// if any pair is closer than 1.0.
    ///
    /// Ties go to the earliest pair in row-major order. The distances are
    /// symmetric, so scanning the upper triangle finds the same pair a scan
    /// over all ordered pairs would.
    pub fn closest_pair(&self) -> Option<(usize, usize, f64)> {
        let n = self.preferences.len();

        #[cfg(not(feature = "parallel"))]
        let rows: Vec<Option<(usize, f64)>> = (0..n)
            .map(|i| row_minimum(&self.preferences, i))
            .collect();
        #[cfg(feature = "parallel")]
        let rows: Vec<Option<(usize, f64)>> = (0..n)
            .into_par_iter()
            .map(|i| row_minimum(&self.preferences, i))
            .collect();

        let mut best = None;
        let mut min_dist = 1.0;
        for (i, row) in rows.into_iter().enumerate() {
            if let Some((j, dist)) = row {
                if dist < min_dist {
                    min_dist = dist;
                    best = Some((i, j, dist));
                }
            }
        }
        best
    }

    /// Run one link round: merge the closest pair of clusters.
    ///
    /// Returns `true` iff a merge happened. Once it returns `false` the run
    /// has converged and further calls are no-ops.
    pub fn link(&mut self) -> bool {
        if self.state == LinkageState::Converged {
            return false;
        }
        let Some((i, j, dist)) = self.closest_pair() else {
            self.state = LinkageState::Converged;
            info!(
                "linkage converged after {} rounds with {} clusters",
                self.rounds,
                self.clusters.len()
            );
            return false;
        };

        // Absorb the smaller cluster into the larger one.
        let (keep, drop) = if self.clusters[i].len() < self.clusters[j].len() {
            (j, i)
        } else {
            (i, j)
        };
        let absorbed = self.clusters.remove(drop);
        let absorbed_pref = self.preferences.remove(drop);
        let keep = if drop < keep { keep - 1 } else { keep };

        self.clusters[keep].absorb(absorbed);
        self.preferences[keep] = self.preferences[keep].merge(&absorbed_pref);

        self.rounds += 1;
        self.state = LinkageState::Linkable;
        debug!(
            "round {}: merged at distance {:.4}, {} clusters left",
            self.rounds,
            dist,
            self.clusters.len()
        );
        true
    }

    /// Link until convergence. Returns the number of merges performed.
    pub fn run(&mut self) -> usize {
        while self.link() {}
        self.rounds
    }
}

fn row_minimum(preferences: &[ClusterPreference], i: usize) -> Option<(usize, f64)> {
    let mut best = None;
    let mut min_dist = 1.0;
    for j in (i + 1)..preferences.len() {
        let dist = preferences[i].distance(&preferences[j]);
        if dist < min_dist {
            min_dist = dist;
            best = Some((j, dist));
        }
    }
    best
}

/// Single link round over a caller-held cluster list.
///
/// Preferences are recomputed from the members on every call; loop on
/// `TLinkage` instead to reuse them across rounds. Returns `true` iff two
/// clusters were merged.
pub fn link(
    clusters: &mut Vec<Cluster>,
    pool: &PointPool,
    models: &[Model],
    settings: &TLinkageSettings,
) -> bool {
    let mut engine = TLinkage::with_clusters(pool, models, settings, std::mem::take(clusters));
    let merged = engine.link();
    *clusters = engine.into_clusters();
    merged
}
