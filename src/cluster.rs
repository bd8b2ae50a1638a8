//! Clusters: non-owning groups of point ids.

use crate::pool::PointPool;
use crate::types::{Point, PointId};

/// A set of points of the pool, referred to by id.
///
/// A cluster only grows, by absorbing another cluster during linkage.
/// Equality is equality of member sets, regardless of insertion order.
#[derive(Debug, Clone, Default)]
pub struct Cluster {
    members: Vec<PointId>,
}

impl Cluster {
    pub fn singleton(id: PointId) -> Self {
        Self { members: vec![id] }
    }

    pub fn from_ids(ids: impl IntoIterator<Item = PointId>) -> Self {
        Self {
            members: ids.into_iter().collect(),
        }
    }

    /// One singleton cluster per point of the pool, in id order.
    pub fn singletons(pool: &PointPool) -> Vec<Cluster> {
        pool.ids().map(Cluster::singleton).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn ids(&self) -> &[PointId] {
        &self.members
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.members.contains(&id)
    }

    /// Move every member of `other` into this cluster.
    pub fn absorb(&mut self, other: Cluster) {
        self.members.extend(other.members);
    }

    pub fn points<'a>(&'a self, pool: &'a PointPool) -> impl Iterator<Item = &'a Point> + 'a {
        self.members.iter().map(move |&id| pool.get(id))
    }

    /// Whether every member has been flagged as an inlier.
    pub fn is_validated(&self, pool: &PointPool) -> bool {
        !self.is_empty() && self.points(pool).all(Point::is_inlier)
    }

    pub(crate) fn validate(&self, pool: &mut PointPool) {
        for &id in &self.members {
            pool.mark_inlier(id);
        }
    }
}

impl PartialEq for Cluster {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut a = self.members.clone();
        let mut b = other.members.clone();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }
}

impl Eq for Cluster {}
