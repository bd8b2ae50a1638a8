//! Uniform sampler: the anchor's companions are drawn uniformly over the pool.

use rand::Rng;

use crate::core::Sampler;
use crate::pool::PointPool;
use crate::samplers::AnchorSet;
use crate::types::PointId;

/// Uniform random sampler drawing minimal samples without replacement.
///
/// Shares the anchor reservation of `LocalizedSampler` but ignores locality
/// when completing the sample.
#[derive(Debug, Clone)]
pub struct UniformSampler {
    anchors: AnchorSet,
}

impl UniformSampler {
    pub fn new(pool: &PointPool) -> Self {
        Self {
            anchors: AnchorSet::new(pool.len()),
        }
    }
}

impl Sampler for UniformSampler {
    fn sample<R: Rng + ?Sized>(
        &mut self,
        pool: &PointPool,
        rng: &mut R,
        out_indices: &mut [PointId],
    ) -> bool {
        let n = pool.len();
        let sample_size = out_indices.len();
        if sample_size == 0 || sample_size > n {
            return false;
        }
        let Some(anchor) = self.anchors.draw(rng) else {
            return false;
        };
        out_indices[0] = anchor;

        for i in 1..sample_size {
            loop {
                let candidate = rng.gen_range(0..n);
                if out_indices[..i].iter().all(|&v| v != candidate) {
                    out_indices[i] = candidate;
                    break;
                }
            }
        }
        true
    }

    fn update(&mut self, sample: &[PointId], accepted: bool) {
        if accepted {
            self.anchors.reserve(sample);
        }
    }
}
