//! Localized sampler: completes a sample around its anchor with Gaussian
//! weights, so minimal samples tend to lie on a single structure.

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::core::Sampler;
use crate::pool::PointPool;
use crate::samplers::AnchorSet;
use crate::types::PointId;

/// Draws the anchor uniformly among unreserved points, then every other
/// point with probability proportional to `exp(-d² / squared_sigma)`, where
/// `d` is its distance to the anchor. Points already in the sample weigh 0.
#[derive(Debug, Clone)]
pub struct LocalizedSampler {
    anchors: AnchorSet,
    squared_sigma: f64,
}

impl LocalizedSampler {
    pub fn new(pool: &PointPool, squared_sigma: f64) -> Self {
        Self {
            anchors: AnchorSet::new(pool.len()),
            squared_sigma,
        }
    }

    /// Sampling weights of every pool point relative to `anchor`.
    pub fn weights(&self, pool: &PointPool, anchor: PointId) -> Vec<f64> {
        let a = pool.get(anchor);
        pool.iter()
            .map(|(id, p)| {
                if id == anchor {
                    0.0
                } else {
                    (-a.squared_distance(p) / self.squared_sigma).exp()
                }
            })
            .collect()
    }
}

impl Sampler for LocalizedSampler {
    fn sample<R: Rng + ?Sized>(
        &mut self,
        pool: &PointPool,
        rng: &mut R,
        out_indices: &mut [PointId],
    ) -> bool {
        let sample_size = out_indices.len();
        if sample_size == 0 || sample_size > pool.len() {
            return false;
        }
        let Some(anchor) = self.anchors.draw(rng) else {
            return false;
        };
        out_indices[0] = anchor;

        let mut weights = self.weights(pool, anchor);
        for slot in 1..sample_size {
            // Fails when every remaining weight underflowed to zero: the
            // anchor is isolated at this sigma.
            let Ok(dist) = WeightedIndex::new(&weights) else {
                return false;
            };
            let id = dist.sample(rng);
            out_indices[slot] = id;
            weights[id] = 0.0;
        }
        true
    }

    fn update(&mut self, sample: &[PointId], accepted: bool) {
        if accepted {
            self.anchors.reserve(sample);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn two_clumps() -> PointPool {
        let mut points = Vec::new();
        for i in 0..10 {
            points.push((0.1 + i as f64 * 0.002, 0.1));
            points.push((0.9 - i as f64 * 0.002, 0.9));
        }
        PointPool::from_points(points)
    }

    #[test]
    fn weights_favor_the_neighborhood() {
        let pool = two_clumps();
        let sampler = LocalizedSampler::new(&pool, 0.001);
        // Even ids sit in the lower clump, odd ids in the upper one.
        let w = sampler.weights(&pool, 2);
        assert_eq!(w[2], 0.0);
        assert!(w[0] > 0.9);
        assert_eq!(w[1], 0.0);
    }

    #[test]
    fn samples_stay_within_the_anchor_clump() {
        let pool = two_clumps();
        let mut sampler = LocalizedSampler::new(&pool, 0.001);
        let mut rng = StdRng::seed_from_u64(11);
        let mut sample = [0usize; 3];
        for _ in 0..50 {
            assert!(sampler.sample(&pool, &mut rng, &mut sample));
            let clump = |id: PointId| pool.get(id).y() < 0.5;
            assert!(sample.iter().all(|&id| clump(id) == clump(sample[0])));
            assert_ne!(sample[0], sample[1]);
            assert_ne!(sample[1], sample[2]);
            assert_ne!(sample[0], sample[2]);
        }
    }

    #[test]
    fn accepted_samples_reserve_their_anchors() {
        let pool = two_clumps();
        let mut sampler = LocalizedSampler::new(&pool, 0.001);
        let mut rng = StdRng::seed_from_u64(5);
        let mut sample = [0usize; 2];
        assert!(sampler.sample(&pool, &mut rng, &mut sample));
        sampler.update(&sample, false);
        assert_eq!(sampler.anchors.available(), pool.len());
        sampler.update(&sample, true);
        assert_eq!(sampler.anchors.available(), pool.len() - 2);
    }

    #[test]
    fn isolated_anchor_fails_to_complete() {
        let pool = PointPool::from_points([(0.0, 0.0), (1.0, 1.0)]);
        let mut sampler = LocalizedSampler::new(&pool, 1e-6);
        let mut rng = StdRng::seed_from_u64(0);
        let mut sample = [0usize; 2];
        assert!(!sampler.sample(&pool, &mut rng, &mut sample));
    }

    #[test]
    fn oversized_sample_is_refused() {
        let pool = PointPool::from_points([(0.1, 0.1), (0.2, 0.2)]);
        let mut sampler = LocalizedSampler::new(&pool, 0.001);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(!sampler.sample(&pool, &mut rng, &mut [0usize; 3]));
    }
}
