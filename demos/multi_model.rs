//! Example: Recovering several lines at once with T-Linkage
//!
//! Two lines crossing the unit square, plus uniform clutter. The number of
//! lines is not given to the algorithm.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tlinkage::{ModelKind, PointPool, TLinkageSettings, fit_models};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== T-Linkage Multi-Line Example ===\n");

    let seed = std::env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or(7);
    let mut rng = StdRng::seed_from_u64(seed);

    // True lines: y = mx + b
    let lines = [(0.8, 0.05), (-0.5, 0.85)];
    let n_per_line = 40;
    let n_outliers = 15;

    let mut pool = PointPool::new();
    for &(slope, intercept) in &lines {
        println!("True line: y = {:.2}x + {:.2}", slope, intercept);
        for i in 0..n_per_line {
            let x = 0.05 + 0.9 * i as f64 / n_per_line as f64;
            let y = slope * x + intercept + rng.gen_range(-0.002..0.002);
            pool.insert((x, y).into());
        }
    }
    for _ in 0..n_outliers {
        pool.insert((rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)).into());
    }
    println!("Generated {} points (seed {})\n", pool.len(), seed);

    let settings = TLinkageSettings::default();
    let result = fit_models(&mut pool, ModelKind::Line, &settings, &mut rng)?;

    println!("T-Linkage Results:");
    println!("  Hypotheses: {}", result.hypotheses);
    println!("  Merge rounds: {}", result.rounds);
    println!("  Clusters: {}", result.clusters.len());
    println!(
        "  Validated: {} covering {} of {} points\n",
        result.validated,
        result.inliers.len(),
        pool.len()
    );

    for recovered in &result.models {
        let size = result.clusters[recovered.cluster].len();
        println!("  {} ({} points)", recovered.model, size);
    }

    Ok(())
}
