//! Hypothesis generation: a deduplicated pool of candidate models built from
//! randomized minimal samples.

use log::{debug, warn};
use rand::Rng;

use crate::core::Sampler;
use crate::error::{Result, TLinkageError};
use crate::models::{Model, ModelKind};
use crate::pool::PointPool;
use crate::samplers::{LocalizedSampler, UniformSampler};
use crate::settings::{SamplerType, TLinkageSettings};
use crate::types::Point;

/// Ordered model hypotheses. Preference vectors are indexed like this pool
/// for the whole run.
pub type ModelPool = Vec<Model>;

/// Generate up to `settings.hypothesis_count` pairwise-distinct models of
/// the given kind.
///
/// Degenerate samples and near-duplicates of accepted models are discarded
/// and resampled. Each accepted sample reserves its points so they do not
/// anchor further hypotheses. If the attempt budget runs out first, the
/// models found so far are returned; an empty result is an error.
pub fn generate_hypotheses<R: Rng + ?Sized>(
    pool: &PointPool,
    kind: ModelKind,
    settings: &TLinkageSettings,
    rng: &mut R,
) -> Result<ModelPool> {
    match settings.sampler {
        SamplerType::Localized => {
            let sampler = LocalizedSampler::new(pool, settings.squared_sigma);
            generate_with_sampler(pool, kind, settings, sampler, rng)
        }
        SamplerType::Uniform => {
            let sampler = UniformSampler::new(pool);
            generate_with_sampler(pool, kind, settings, sampler, rng)
        }
    }
}

/// Same as [`generate_hypotheses`] with a caller-supplied sampler.
pub fn generate_with_sampler<S: Sampler, R: Rng + ?Sized>(
    pool: &PointPool,
    kind: ModelKind,
    settings: &TLinkageSettings,
    mut sampler: S,
    rng: &mut R,
) -> Result<ModelPool> {
    let sample_size = kind.minimal_sample_size();
    if pool.len() < sample_size {
        return Err(TLinkageError::TooFewPoints {
            needed: sample_size,
            got: pool.len(),
        });
    }

    let target = settings.hypothesis_count;
    let budget = target.saturating_mul(settings.attempts_per_hypothesis);
    let mut models: ModelPool = Vec::with_capacity(target);
    let mut sample = vec![0; sample_size];
    let mut points: Vec<Point> = Vec::with_capacity(sample_size);
    let (mut attempts, mut degenerate, mut duplicates) = (0usize, 0usize, 0usize);

    while models.len() < target && attempts < budget {
        attempts += 1;
        if !sampler.sample(pool, rng, &mut sample) {
            continue;
        }
        points.clear();
        points.extend(sample.iter().map(|&id| *pool.get(id)));
        if !kind.is_valid_sample(&points) {
            degenerate += 1;
            sampler.update(&sample, false);
            continue;
        }

        match kind.fit(&points) {
            Ok(model)
                if models
                    .iter()
                    .any(|m| m.approx_eq(&model, settings.model_tolerance)) =>
            {
                duplicates += 1;
                sampler.update(&sample, false);
            }
            Ok(model) => {
                models.push(model);
                sampler.update(&sample, true);
            }
            Err(TLinkageError::DegenerateModel { .. }) => {
                degenerate += 1;
                sampler.update(&sample, false);
            }
            Err(err) => return Err(err),
        }
    }

    debug!(
        "generated {} {:?} hypotheses in {} attempts ({} degenerate, {} duplicates)",
        models.len(),
        kind,
        attempts,
        degenerate,
        duplicates
    );
    if models.is_empty() {
        return Err(TLinkageError::NoHypotheses { requested: target });
    }
    if models.len() < target {
        warn!(
            "sampling budget exhausted: {} of {} hypotheses generated",
            models.len(),
            target
        );
    }
    Ok(models)
}
