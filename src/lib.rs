//! # T-Linkage - Multi-Model Fitting by Preference Clustering
//!
//! `tlinkage` recovers several geometric primitives (lines or circles) at once
//! from a set of 2D points in the unit square, without knowing in advance how
//! many there are. It samples a pool of model hypotheses, describes every point
//! by its preference for each hypothesis, then agglomeratively clusters points
//! with similar preferences until no two clusters agree on any model.
//!
//! ## Quick Start
//!
//! The easiest way to use `tlinkage` is through the high-level API functions:
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use tlinkage::{ModelKind, PointPool, TLinkageSettings, fit_models};
//!
//! // Two parallel rows of points
//! let mut pool = PointPool::from_points(
//!     (0..20).flat_map(|i| {
//!         let x = 0.05 * i as f64;
//!         [(x, 0.25), (x, 0.75)]
//!     }),
//! );
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let result = fit_models(&mut pool, ModelKind::Line, &TLinkageSettings::default(), &mut rng).unwrap();
//! for recovered in &result.models {
//!     println!("{}", recovered.model);
//! }
//! ```
//!
//! ## Pipeline
//!
//! The high-level functions chain the stages below, each of which can also be
//! called on its own:
//!
//! 1. [`generate_hypotheses`](hypotheses::generate_hypotheses): deduplicated
//!    model pool from localized minimal samples
//! 2. [`preference`]: preference vectors (or boolean preference sets) of points
//!    and clusters
//! 3. [`TLinkage`](crate::core::TLinkage): one merge per [`link`](crate::core::TLinkage::link)
//!    round until convergence
//! 4. [`validate_clusters`](validation::validate_clusters): flags the members of
//!    genuine clusters as inliers
//! 5. [`extract_models`](api::extract_models): least-squares refit per
//!    validated cluster
//!
//! ## Extending the Library
//!
//! Model kinds form a closed set, but the way hypotheses are sampled is open:
//!
//! - **[`Estimator`](crate::core::Estimator)**: minimal and non-minimal fits for one kind
//! - **[`Sampler`](crate::core::Sampler)**: minimal-sample drawing strategies
//!
//! ### Example: Custom Sampler
//!
//! ```rust
//! use rand::Rng;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use tlinkage::core::Sampler;
//! use tlinkage::hypotheses::generate_with_sampler;
//! use tlinkage::types::PointId;
//! use tlinkage::{ModelKind, PointPool, TLinkageSettings};
//!
//! /// Pairs each point with its successor in the pool.
//! struct Successive {
//!     next: usize,
//! }
//!
//! impl Sampler for Successive {
//!     fn sample<R: Rng + ?Sized>(
//!         &mut self,
//!         pool: &PointPool,
//!         _rng: &mut R,
//!         out_indices: &mut [PointId],
//!     ) -> bool {
//!         if out_indices.len() > pool.len() {
//!             return false;
//!         }
//!         for (offset, slot) in out_indices.iter_mut().enumerate() {
//!             *slot = (self.next + offset) % pool.len();
//!         }
//!         self.next += 1;
//!         true
//!     }
//!
//!     fn update(&mut self, _sample: &[PointId], _accepted: bool) {}
//! }
//!
//! let pool = PointPool::from_points([(0.1, 0.1), (0.5, 0.3), (0.9, 0.5), (0.2, 0.8)]);
//! let settings = TLinkageSettings { hypothesis_count: 3, ..Default::default() };
//! let mut rng = StdRng::seed_from_u64(0);
//! let models =
//!     generate_with_sampler(&pool, ModelKind::Line, &settings, Successive { next: 0 }, &mut rng)
//!         .unwrap();
//! assert!(!models.is_empty());
//! ```
//!
//! ## Modules
//!
//! - **[`api`](api)**: High-level API functions running the whole pipeline
//! - **[`core`](core)**: Core traits and the `TLinkage` clustering engine
//! - **[`estimators`](estimators)**: Line and circle estimators
//! - **[`samplers`](samplers)**: Minimal-sample drawing strategies
//! - **[`hypotheses`](hypotheses)**: Hypothesis generation
//! - **[`preference`](preference)**: Preference vectors and sets
//! - **[`distance`](distance)**: Tanimoto and Jaccard distances
//! - **[`validation`](validation)**: Cluster validation strategies
//! - **[`models`](models)**: Geometric model types
//! - **[`settings`](settings)**: Configuration types for T-Linkage runs

pub mod api;
pub mod cluster;
pub mod core;
pub mod distance;
pub mod error;
pub mod estimators;
pub mod hypotheses;
pub mod models;
pub mod pool;
pub mod preference;
pub mod samplers;
pub mod settings;
pub mod types;
pub mod validation;

// Re-export high-level API
pub use api::{
    EstimationResult, RecoveredModel, estimate_circles, estimate_lines, extract_models,
    fit_models,
};

// Re-export core traits and the engine for easy access
pub use crate::core::{Estimator, LinkageState, Sampler, TLinkage, link};

pub use cluster::Cluster;
pub use error::{Result, TLinkageError};
pub use hypotheses::{ModelPool, generate_hypotheses};
pub use models::{Circle, Line, Model, ModelKind};
pub use pool::PointPool;
pub use types::{Point, PointId};
pub use validation::validate_clusters;

// Re-export settings for convenience
pub use settings::{DistanceType, SamplerType, TLinkageSettings, ValidationType};
