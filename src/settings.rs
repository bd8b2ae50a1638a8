//! Configuration for the T-Linkage pipeline.
//!
//! Defaults reproduce the values the algorithm was tuned with on inputs
//! normalized to the unit square. The validator's gap threshold and size
//! fraction are empirical knobs, not derived constants.

use crate::error::{Result, TLinkageError};

/// Distance used to compare cluster preferences during linkage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceType {
    /// Continuous preference vectors compared with the Tanimoto distance.
    Tanimoto,
    /// Boolean preference sets compared with the Jaccard distance.
    Jaccard,
}

/// Strategy for drawing the non-anchor points of a minimal sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SamplerType {
    /// Gaussian-weighted around the anchor (`exp(-d² / squared_sigma)`).
    Localized,
    /// Uniform over the pool.
    Uniform,
}

/// Rule deciding which converged clusters are genuine models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationType {
    /// Auto-validate large clusters, then cut the tail at the largest size gap.
    SizeGap,
    /// Validate the `n` largest clusters.
    Largest(usize),
    /// Validate every cluster with at least this many points.
    MinSize(usize),
}

/// Main configuration object for a T-Linkage run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TLinkageSettings {
    /// Inlier tolerance scale of the preference function.
    pub tau: f64,
    /// Locality scale of the localized sampler.
    pub squared_sigma: f64,
    /// Target size of the model pool.
    pub hypothesis_count: usize,
    /// Parameter tolerance under which two hypotheses are duplicates.
    pub model_tolerance: f64,
    /// Sampling attempts allowed per requested hypothesis before giving up.
    pub attempts_per_hypothesis: usize,
    /// Minimum size drop that separates models from noise clusters.
    pub min_gap: usize,
    /// Clusters larger than this fraction of the pool are models outright.
    pub valid_size_fraction: f64,
    /// Divisor of filtered point insertion (keep one point in `filter_value`).
    pub filter_value: u32,

    pub distance: DistanceType,
    pub sampler: SamplerType,
    pub validation: ValidationType,
}

impl Default for TLinkageSettings {
    fn default() -> Self {
        Self {
            tau: 0.005,
            squared_sigma: 0.001,
            hypothesis_count: 200,
            model_tolerance: 0.01,
            attempts_per_hypothesis: 100,
            min_gap: 4,
            valid_size_fraction: 0.1,
            filter_value: 1,
            distance: DistanceType::Tanimoto,
            sampler: SamplerType::Localized,
            validation: ValidationType::SizeGap,
        }
    }
}

impl TLinkageSettings {
    /// Check every field against its admissible range.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(TLinkageError::InvalidSettings(msg));
        if !(self.tau > 0.0 && self.tau.is_finite()) {
            return invalid(format!("tau must be positive, got {}", self.tau));
        }
        if !(self.squared_sigma > 0.0 && self.squared_sigma.is_finite()) {
            return invalid(format!(
                "squared_sigma must be positive, got {}",
                self.squared_sigma
            ));
        }
        if self.hypothesis_count == 0 {
            return invalid("hypothesis_count must be at least 1".to_string());
        }
        if self.attempts_per_hypothesis == 0 {
            return invalid("attempts_per_hypothesis must be at least 1".to_string());
        }
        if self.model_tolerance.is_nan() || self.model_tolerance < 0.0 {
            return invalid(format!(
                "model_tolerance must be nonnegative, got {}",
                self.model_tolerance
            ));
        }
        if !(0.0..=1.0).contains(&self.valid_size_fraction) {
            return invalid(format!(
                "valid_size_fraction must lie in [0, 1], got {}",
                self.valid_size_fraction
            ));
        }
        if self.filter_value == 0 {
            return invalid("filter_value must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_values() {
        let cfg = TLinkageSettings::default();
        assert!((cfg.tau - 0.005).abs() < 1e-12);
        assert!((cfg.squared_sigma - 0.001).abs() < 1e-12);
        assert!((cfg.valid_size_fraction - 0.1).abs() < 1e-12);
        assert_eq!(cfg.min_gap, 4);
        assert_eq!(cfg.distance, DistanceType::Tanimoto);
        assert_eq!(cfg.sampler, SamplerType::Localized);
        assert_eq!(cfg.validation, ValidationType::SizeGap);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let bad = [
            TLinkageSettings {
                tau: 0.0,
                ..Default::default()
            },
            TLinkageSettings {
                squared_sigma: f64::NAN,
                ..Default::default()
            },
            TLinkageSettings {
                hypothesis_count: 0,
                ..Default::default()
            },
            TLinkageSettings {
                valid_size_fraction: 1.5,
                ..Default::default()
            },
            TLinkageSettings {
                filter_value: 0,
                ..Default::default()
            },
        ];
        for cfg in bad {
            assert!(matches!(
                cfg.validate(),
                Err(TLinkageError::InvalidSettings(_))
            ));
        }
    }
}
