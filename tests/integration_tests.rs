//! Integration tests for the high-level Rust API.
//!
//! These tests run the whole pipeline on synthetic data in the unit square
//! and check which points end up in validated clusters.

use std::collections::HashSet;

use approx::assert_abs_diff_eq;
use nalgebra::DMatrix;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use tlinkage::validation::validated_prefix;
use tlinkage::*;

const STRUCTURED: usize = 20;

/// 20 points on y = 0.5x + 0.1.
fn line_points() -> Vec<(f64, f64)> {
    (0..STRUCTURED)
        .map(|i| {
            let x = 0.05 + 0.045 * i as f64;
            (x, 0.5 * x + 0.1)
        })
        .collect()
}

/// The line followed by 5 scattered points, none of which lies near the
/// line or near a line through two others.
fn line_with_clutter() -> Vec<(f64, f64)> {
    let mut points = line_points();
    points.extend([(0.1, 0.9), (0.3, 0.85), (0.15, 0.7), (0.9, 0.1), (0.7, 0.05)]);
    points
}

/// The line followed by 5 uniform points at least 0.05 away from it.
fn line_with_random_clutter(rng: &mut StdRng) -> Vec<(f64, f64)> {
    let mut points = line_points();
    while points.len() < STRUCTURED + 5 {
        let (x, y) = (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0));
        if (0.5 * x - y + 0.1_f64).abs() / 1.25_f64.sqrt() > 0.05 {
            points.push((x, y));
        }
    }
    points
}

fn line_params(model: &Model) -> (f64, f64) {
    match model {
        Model::Line(Line::Sloped { slope, intercept }) => (*slope, *intercept),
        other => panic!("expected a sloped line, got {other}"),
    }
}

fn assert_single_line_recovered(settings: &TLinkageSettings, seed: u64) {
    let mut pool = PointPool::from_points(line_with_clutter());
    let mut rng = StdRng::seed_from_u64(seed);
    let result = fit_models(&mut pool, ModelKind::Line, settings, &mut rng).unwrap();

    assert_eq!(result.validated, 1, "clusters: {:?}", result.clusters);
    let cluster = &result.validated_clusters()[0];
    assert!(cluster.len() >= 15);
    let members: HashSet<PointId> = cluster.ids().iter().copied().collect();
    assert_eq!(members, (0..STRUCTURED).collect());

    assert_eq!(result.inliers, (0..STRUCTURED).collect::<Vec<_>>());
    assert!(pool.outliers().iter().all(|&id| id >= STRUCTURED));

    assert_eq!(result.models.len(), 1);
    let (slope, intercept) = line_params(&result.models[0].model);
    assert_abs_diff_eq!(slope, 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(intercept, 0.1, epsilon = 1e-6);
}

#[test]
fn test_single_line_with_clutter() {
    for seed in [1, 2, 3] {
        assert_single_line_recovered(&TLinkageSettings::default(), seed);
    }
}

#[test]
fn test_random_clutter_stays_out_of_the_largest_cluster() {
    // Random points may still capture a line point or be validated as a
    // small cluster of their own, but never join the main structure.
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pool = PointPool::from_points(line_with_random_clutter(&mut rng));
        let result =
            fit_models(&mut pool, ModelKind::Line, &TLinkageSettings::default(), &mut rng)
                .unwrap();

        assert!(result.validated >= 1);
        let largest = &result.clusters[0];
        assert!(largest.len() >= 15, "seed {seed}: {:?}", result.clusters);
        assert!(largest.ids().iter().all(|&id| id < STRUCTURED), "seed {seed}");
    }
}

#[test]
fn test_random_clutter_with_larger_auto_valid_fraction() {
    // A quarter of 25 points keeps clusters of a few stray points out of
    // the auto-valid range.
    let settings = TLinkageSettings {
        valid_size_fraction: 0.25,
        ..Default::default()
    };
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pool = PointPool::from_points(line_with_random_clutter(&mut rng));
        let result = fit_models(&mut pool, ModelKind::Line, &settings, &mut rng).unwrap();

        assert_eq!(result.validated, 1, "seed {seed}: {:?}", result.clusters);
        assert!(result.inliers.len() >= 15);
        assert!(result.inliers.iter().all(|&id| id < STRUCTURED), "seed {seed}");

        let (slope, intercept) = line_params(&result.models[0].model);
        assert_abs_diff_eq!(slope, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(intercept, 0.1, epsilon = 1e-6);
    }
}

#[test]
fn test_single_line_with_preference_sets() {
    let settings = TLinkageSettings {
        distance: DistanceType::Jaccard,
        ..Default::default()
    };
    assert_single_line_recovered(&settings, 5);
}

#[test]
fn test_single_line_with_uniform_sampling() {
    let settings = TLinkageSettings {
        sampler: SamplerType::Uniform,
        ..Default::default()
    };
    assert_single_line_recovered(&settings, 8);
}

#[test]
fn test_two_lines_are_separated() {
    let mut points = Vec::new();
    for i in 0..STRUCTURED {
        let x = 0.05 + 0.045 * i as f64;
        points.push((x, 0.2 + 0.1 * x));
    }
    for i in 0..STRUCTURED {
        let x = 0.05 + 0.045 * i as f64;
        points.push((x, 0.8 - 0.1 * x));
    }
    // Two close pairs of clutter, one above and one below the structures.
    points.extend([(0.3, 0.95), (0.4, 0.96), (0.6, 0.03), (0.7, 0.04)]);
    let pool = PointPool::from_points(points);

    for distance in [DistanceType::Tanimoto, DistanceType::Jaccard] {
        let settings = TLinkageSettings {
            distance,
            ..Default::default()
        };
        let mut pool = pool.clone();
        let mut rng = StdRng::seed_from_u64(13);
        let result = fit_models(&mut pool, ModelKind::Line, &settings, &mut rng).unwrap();

        assert_eq!(result.validated, 2);
        let mut groups: Vec<Vec<PointId>> = result
            .validated_clusters()
            .iter()
            .map(|c| {
                let mut ids = c.ids().to_vec();
                ids.sort_unstable();
                ids
            })
            .collect();
        groups.sort();
        assert_eq!(groups[0], (0..20).collect::<Vec<_>>());
        assert_eq!(groups[1], (20..40).collect::<Vec<_>>());

        let mut params: Vec<(f64, f64)> =
            result.models.iter().map(|m| line_params(&m.model)).collect();
        params.sort_by(|a, b| a.1.total_cmp(&b.1));
        assert_eq!(params.len(), 2);
        assert_abs_diff_eq!(params[0].0, 0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(params[0].1, 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(params[1].0, -0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(params[1].1, 0.8, epsilon = 1e-6);
    }

    // The pool itself was never touched.
    assert!(pool.inliers().is_empty());
}

#[test]
fn test_circle_with_clutter() {
    let mut points: Vec<(f64, f64)> = (0..40)
        .map(|i| {
            let t = i as f64 * std::f64::consts::TAU / 40.0;
            (0.5 + 0.3 * t.cos(), 0.5 + 0.3 * t.sin())
        })
        .collect();
    points.extend([(0.05, 0.05), (0.09, 0.06), (0.06, 0.1)]);
    let mut pool = PointPool::from_points(points);
    let mut rng = StdRng::seed_from_u64(3);

    let result = fit_models(&mut pool, ModelKind::Circle, &TLinkageSettings::default(), &mut rng)
        .unwrap();

    assert_eq!(result.validated, 1);
    assert_eq!(result.inliers, (0..40).collect::<Vec<_>>());
    let Model::Circle(circle) = result.models[0].model else {
        panic!("expected a circle");
    };
    assert_abs_diff_eq!(circle.center.x, 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(circle.center.y, 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(circle.radius, 0.3, epsilon = 1e-6);
}

#[test]
fn test_inliers_record_their_best_match() {
    let mut pool = PointPool::from_points(line_with_clutter());
    let mut rng = StdRng::seed_from_u64(4);
    let result = fit_models(&mut pool, ModelKind::Line, &TLinkageSettings::default(), &mut rng)
        .unwrap();

    for (id, point) in pool.iter() {
        assert_eq!(point.has_best_match(), result.inliers.contains(&id));
    }
}

#[test]
fn test_same_seed_same_result() {
    let run = |seed| {
        let mut pool = PointPool::from_points(line_with_clutter());
        let mut rng = StdRng::seed_from_u64(seed);
        let settings = TLinkageSettings {
            sampler: SamplerType::Uniform,
            ..Default::default()
        };
        fit_models(&mut pool, ModelKind::Line, &settings, &mut rng).unwrap()
    };
    let (a, b) = (run(99), run(99));
    assert_eq!(a.clusters, b.clusters);
    assert_eq!(a.models, b.models);
    assert_eq!(a.rounds, b.rounds);
    assert_eq!(a.hypotheses, b.hypotheses);
}

#[test]
fn test_preference_cutoff() {
    let settings = TLinkageSettings::default();
    let model = Model::Line(Line::new(0.0, 0.5));
    let on = Point::new(0.4, 0.5);
    let off = Point::new(0.4, 0.5 + 5.0 * settings.tau + 1e-9);
    assert_eq!(model.preference_value(&on, settings.tau), 1.0);
    assert_eq!(model.preference_value(&off, settings.tau), 0.0);
}

#[test]
fn test_duplicate_coordinates_yield_distinct_hypotheses() {
    let mut pool = PointPool::new();
    for i in 0..30 {
        let x = (i * 7 % 30) as f64 / 30.0;
        let y = (i * 13 % 30) as f64 / 30.0;
        assert!(pool.insert(Point::new(x, y)));
    }
    assert!(!pool.insert(Point::new(7.0 / 30.0, 13.0 / 30.0)));

    let settings = TLinkageSettings {
        hypothesis_count: 60,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(6);
    let models = generate_hypotheses(&pool, ModelKind::Line, &settings, &mut rng).unwrap();
    assert!(!models.is_empty());
    for (i, a) in models.iter().enumerate() {
        for b in &models[i + 1..] {
            assert!(!a.approx_eq(b, settings.model_tolerance), "{a} ~ {b}");
        }
    }
}

#[test]
fn test_validation_size_gap() {
    let settings = TLinkageSettings::default();
    let sizes = [50, 48, 3, 2, 1];
    let validated = validated_prefix(&sizes, 103, &settings);
    assert_eq!(validated, 2);
    assert_eq!(sizes[..validated].iter().sum::<usize>(), 98);

    // Same through the mutating entry point, with the clusters out of order.
    let mut pool = PointPool::from_points((0..104).map(|i| (i as f64 / 104.0, 0.5)));
    let mut clusters = vec![
        Cluster::from_ids(98..101),
        Cluster::from_ids(0..50),
        Cluster::singleton(103),
        Cluster::from_ids(50..98),
        Cluster::from_ids(101..103),
    ];
    assert_eq!(validate_clusters(&mut clusters, &mut pool, &settings), 2);
    assert_eq!(pool.inliers(), (0..98).collect::<Vec<_>>());
}

#[test]
fn test_estimate_lines_reports_rows() {
    let mut rows = Vec::new();
    for (x, y) in line_with_clutter() {
        rows.push(x);
        rows.push(y);
    }
    // Repeat the first structured point as an extra row.
    rows.extend([rows[0], rows[1]]);
    let n = rows.len() / 2;
    let points = DMatrix::from_row_slice(n, 2, &rows);

    let mut rng = StdRng::seed_from_u64(2);
    let result = estimate_lines(&points, None, &mut rng).unwrap();
    let mut expected: Vec<usize> = (0..STRUCTURED).collect();
    expected.push(n - 1);
    assert_eq!(result.inliers, expected);
}

#[test]
fn test_estimate_circles_rejects_bad_shape() {
    let points = DMatrix::<f64>::zeros(5, 3);
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        estimate_circles(&points, None, &mut rng),
        Err(TLinkageError::InvalidInput(_))
    ));
}
