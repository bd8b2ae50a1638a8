//! High-level Rust API for T-Linkage.
//!
//! This module runs the whole pipeline in one call: hypothesis generation,
//! agglomerative linkage, validation and model extraction.

use log::debug;
use nalgebra::DMatrix;
use rand::Rng;

use crate::cluster::Cluster;
use crate::core::TLinkage;
use crate::error::{Result, TLinkageError};
use crate::hypotheses::generate_hypotheses;
use crate::models::{Model, ModelKind};
use crate::pool::PointPool;
use crate::settings::TLinkageSettings;
use crate::types::{Point, PointId};
use crate::validation::validate_clusters;

/// A model recovered from a validated cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveredModel {
    /// Least-squares fit over every member of the cluster.
    pub model: Model,
    /// Index of the cluster in `EstimationResult::clusters`.
    pub cluster: usize,
}

/// Result of a T-Linkage run.
#[derive(Debug, Clone)]
pub struct EstimationResult {
    /// One model per validated cluster whose refit succeeded.
    pub models: Vec<RecoveredModel>,
    /// Converged clusters by decreasing size; the validated ones come first.
    pub clusters: Vec<Cluster>,
    /// Number of validated clusters.
    pub validated: usize,
    /// Indices of inlier points.
    pub inliers: Vec<usize>,
    /// Number of merges performed.
    pub rounds: usize,
    /// Size of the hypothesis pool.
    pub hypotheses: usize,
}

impl EstimationResult {
    pub fn validated_clusters(&self) -> &[Cluster] {
        &self.clusters[..self.validated]
    }
}

/// Recover every model of the given kind from the points in `pool`.
///
/// Flags the members of validated clusters as inliers in `pool` and stores
/// in each of them its preference for the model recovered from its cluster.
///
/// # Arguments
/// * `pool` - Points to cluster
/// * `kind` - Kind of model to look for
/// * `settings` - Pipeline configuration
/// * `rng` - Source of randomness for hypothesis sampling
pub fn fit_models<R: Rng + ?Sized>(
    pool: &mut PointPool,
    kind: ModelKind,
    settings: &TLinkageSettings,
    rng: &mut R,
) -> Result<EstimationResult> {
    settings.validate()?;
    let hypotheses = generate_hypotheses(pool, kind, settings, rng)?;

    let mut linkage = TLinkage::new(pool, &hypotheses, settings);
    let rounds = linkage.run();
    let mut clusters = linkage.into_clusters();

    let validated = validate_clusters(&mut clusters, pool, settings);
    let models = extract_models(&clusters[..validated], pool, kind, settings.tau);

    Ok(EstimationResult {
        models,
        inliers: pool.inliers(),
        clusters,
        validated,
        rounds,
        hypotheses: hypotheses.len(),
    })
}

/// Refit each cluster with the non-minimal estimator of `kind`.
///
/// Clusters whose refit is degenerate yield no model. Every member of a
/// cluster that does yield one gets its preference for that model stored
/// as its best match.
pub fn extract_models(
    clusters: &[Cluster],
    pool: &mut PointPool,
    kind: ModelKind,
    tau: f64,
) -> Vec<RecoveredModel> {
    let mut models = Vec::with_capacity(clusters.len());
    for (index, cluster) in clusters.iter().enumerate() {
        let points: Vec<Point> = cluster.points(pool).copied().collect();
        let model = match kind.fit_nonminimal(&points) {
            Ok(model) => model,
            Err(err) => {
                debug!("cluster {} of {} points has no model: {}", index, cluster.len(), err);
                continue;
            }
        };
        for &id in cluster.ids() {
            let point = pool.get_mut(id);
            let value = model.preference_value(point, tau);
            point.store_best_match(value);
        }
        models.push(RecoveredModel {
            model,
            cluster: index,
        });
    }
    models
}

/// Estimate every line supported by a set of 2D points.
///
/// # Arguments
/// * `points` - Nx2 matrix, one `[x, y]` row per point in the unit square
/// * `settings` - Optional settings (uses defaults if None)
/// * `rng` - Source of randomness for hypothesis sampling
///
/// # Returns
/// `EstimationResult` whose `inliers` are row indices of `points`. Repeated
/// rows are merged, so cluster ids index the distinct points in the order
/// they first appear. With `filter_value > 1` only about one new row in
/// `filter_value` is kept.
///
/// # Example
///
/// ```rust
/// use nalgebra::DMatrix;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use tlinkage::estimate_lines;
///
/// let rows: Vec<f64> = (0..20)
///     .flat_map(|i| {
///         let x = 0.05 * i as f64;
///         [x, 0.5 * x + 0.1]
///     })
///     .collect();
/// let points = DMatrix::from_row_slice(20, 2, &rows);
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let result = estimate_lines(&points, None, &mut rng).unwrap();
/// println!("Recovered {} lines", result.models.len());
/// ```
pub fn estimate_lines<R: Rng + ?Sized>(
    points: &DMatrix<f64>,
    settings_opt: Option<TLinkageSettings>,
    rng: &mut R,
) -> Result<EstimationResult> {
    estimate_from_rows(points, ModelKind::Line, settings_opt, rng)
}

/// Estimate every circle supported by a set of 2D points.
///
/// Same contract as [`estimate_lines`].
pub fn estimate_circles<R: Rng + ?Sized>(
    points: &DMatrix<f64>,
    settings_opt: Option<TLinkageSettings>,
    rng: &mut R,
) -> Result<EstimationResult> {
    estimate_from_rows(points, ModelKind::Circle, settings_opt, rng)
}

fn estimate_from_rows<R: Rng + ?Sized>(
    points: &DMatrix<f64>,
    kind: ModelKind,
    settings_opt: Option<TLinkageSettings>,
    rng: &mut R,
) -> Result<EstimationResult> {
    if points.ncols() != 2 {
        return Err(TLinkageError::InvalidInput(format!(
            "points must be Nx2 matrix (each row is [x, y]), got {} columns",
            points.ncols()
        )));
    }

    let settings = settings_opt.unwrap_or_default();
    settings.validate()?;
    let (mut pool, row_ids) = pool_from_rows(points, settings.filter_value, rng);
    let mut result = fit_models(&mut pool, kind, &settings, rng)?;

    result.inliers = row_ids
        .iter()
        .enumerate()
        .filter(|(_, id)| matches!(id, Some(id) if pool.get(*id).is_inlier()))
        .map(|(row, _)| row)
        .collect();
    Ok(result)
}

/// Pool of the distinct rows, and the id each row maps to. Rows dropped by
/// filtered insertion map to `None`.
fn pool_from_rows<R: Rng + ?Sized>(
    points: &DMatrix<f64>,
    filter_value: u32,
    rng: &mut R,
) -> (PointPool, Vec<Option<PointId>>) {
    let mut pool = PointPool::new();
    let mut row_ids = Vec::with_capacity(points.nrows());
    for i in 0..points.nrows() {
        let point = Point::new(points[(i, 0)], points[(i, 1)]);
        let id = match pool.find(&point) {
            Some(id) => Some(id),
            None => pool
                .insert_filtered(point, filter_value, rng)
                .then(|| pool.len() - 1),
        };
        row_ids.push(id);
    }
    (pool, row_ids)
}
