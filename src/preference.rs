//! Preference analysis: how strongly points and clusters support each model.
//!
//! A point's preference vector holds its preference value for every model of
//! the pool. A cluster prefers a model only as much as its least convinced
//! member does, so its vector is the element-wise minimum over members and
//! can only shrink as the cluster grows. The boolean preference set is the
//! support of that vector.

use crate::cluster::Cluster;
use crate::distance::{jaccard, tanimoto};
use crate::models::Model;
use crate::pool::PointPool;
use crate::settings::DistanceType;
use crate::types::{Point, PreferenceSet, PreferenceVector};

/// Preference vector of a single point against the model pool.
pub fn point_preference(point: &Point, models: &[Model], tau: f64) -> PreferenceVector {
    PreferenceVector::from_iterator(
        models.len(),
        models.iter().map(|m| m.preference_value(point, tau)),
    )
}

/// Preference vectors of every point of the pool, indexed by point id.
pub fn pool_preferences(pool: &PointPool, models: &[Model], tau: f64) -> Vec<PreferenceVector> {
    pool.points()
        .iter()
        .map(|p| point_preference(p, models, tau))
        .collect()
}

/// Element-wise minimum of the members' preference vectors.
///
/// Panics if the cluster is empty.
pub fn cluster_preference(
    cluster: &Cluster,
    pool: &PointPool,
    models: &[Model],
    tau: f64,
) -> PreferenceVector {
    assert!(!cluster.is_empty(), "cluster_preference: empty cluster");
    PreferenceVector::from_iterator(
        models.len(),
        models.iter().map(|model| {
            let mut min = f64::INFINITY;
            for p in cluster.points(pool) {
                min = min.min(model.preference_value(p, tau));
                if min == 0.0 {
                    break;
                }
            }
            min
        }),
    )
}

/// Boolean preference set of a point: the models whose consensus set it
/// belongs to.
pub fn point_preference_set(point: &Point, models: &[Model], tau: f64) -> PreferenceSet {
    models
        .iter()
        .map(|m| m.preference_value(point, tau) > 0.0)
        .collect()
}

/// Intersection of the members' preference sets.
///
/// Panics if the cluster is empty.
pub fn cluster_preference_set(
    cluster: &Cluster,
    pool: &PointPool,
    models: &[Model],
    tau: f64,
) -> PreferenceSet {
    assert!(!cluster.is_empty(), "cluster_preference_set: empty cluster");
    models
        .iter()
        .map(|model| cluster.points(pool).all(|p| model.preference_value(p, tau) > 0.0))
        .collect()
}

/// Cached preference of an active cluster, in the representation the
/// configured distance works on.
#[derive(Debug, Clone, PartialEq)]
pub enum ClusterPreference {
    Vector(PreferenceVector),
    Set(PreferenceSet),
}

impl ClusterPreference {
    pub fn compute(
        cluster: &Cluster,
        pool: &PointPool,
        models: &[Model],
        tau: f64,
        distance: DistanceType,
    ) -> Self {
        match distance {
            DistanceType::Tanimoto => {
                ClusterPreference::Vector(cluster_preference(cluster, pool, models, tau))
            }
            DistanceType::Jaccard => {
                ClusterPreference::Set(cluster_preference_set(cluster, pool, models, tau))
            }
        }
    }

    /// Preference of the union of the two clusters.
    ///
    /// Minimum and intersection are associative, so this equals recomputing
    /// from the merged member list.
    pub fn merge(&self, other: &ClusterPreference) -> ClusterPreference {
        match (self, other) {
            (ClusterPreference::Vector(a), ClusterPreference::Vector(b)) => {
                ClusterPreference::Vector(a.zip_map(b, f64::min))
            }
            (ClusterPreference::Set(a), ClusterPreference::Set(b)) => {
                ClusterPreference::Set(a.iter().zip(b).map(|(&x, &y)| x && y).collect())
            }
            _ => panic!("ClusterPreference::merge: mixed preference representations"),
        }
    }

    /// Distance between two cluster preferences, 1.0 when they share nothing.
    pub fn distance(&self, other: &ClusterPreference) -> f64 {
        match (self, other) {
            (ClusterPreference::Vector(a), ClusterPreference::Vector(b)) => tanimoto(a, b),
            (ClusterPreference::Set(a), ClusterPreference::Set(b)) => jaccard(a, b),
            _ => panic!("ClusterPreference::distance: mixed preference representations"),
        }
    }
}
