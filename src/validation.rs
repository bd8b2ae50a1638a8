//! Cluster validation: decide which converged clusters are genuine models
//! and flag their members as inliers.

use log::info;

use crate::cluster::Cluster;
use crate::pool::PointPool;
use crate::settings::{TLinkageSettings, ValidationType};

/// Sort `clusters` by decreasing size and validate a prefix of them.
///
/// Every member of a validated cluster is flagged as an inlier in `pool`.
/// Returns the number of validated clusters; they are `clusters[..count]`.
/// Clusters of equal size keep their relative order.
pub fn validate_clusters(
    clusters: &mut [Cluster],
    pool: &mut PointPool,
    settings: &TLinkageSettings,
) -> usize {
    clusters.sort_by(|a, b| b.len().cmp(&a.len()));
    let sizes: Vec<usize> = clusters.iter().map(Cluster::len).collect();
    let count = validated_prefix(&sizes, pool.len(), settings);

    for cluster in &clusters[..count] {
        cluster.validate(pool);
    }
    info!(
        "validated {} of {} clusters, {} inliers out of {} points",
        count,
        clusters.len(),
        sizes[..count].iter().sum::<usize>(),
        pool.len()
    );
    count
}

/// Number of leading clusters to validate, given sizes sorted in decreasing
/// order and the total pool size.
pub fn validated_prefix(sizes: &[usize], pool_size: usize, settings: &TLinkageSettings) -> usize {
    debug_assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
    match settings.validation {
        ValidationType::SizeGap => size_gap_prefix(
            sizes,
            pool_size,
            settings.valid_size_fraction,
            settings.min_gap,
        ),
        ValidationType::Largest(n) => n.min(sizes.len()),
        ValidationType::MinSize(min) => sizes.iter().take_while(|&&s| s >= min).count(),
    }
}

/// Clusters larger than `fraction * pool_size` are models outright. Past
/// them, the tail is cut at its largest size drop when that drop reaches
/// `min_gap`; a trailing size-1 cluster is assumed so the last real cluster
/// always has a successor.
fn size_gap_prefix(sizes: &[usize], pool_size: usize, fraction: f64, min_gap: usize) -> usize {
    let min_size = (fraction * pool_size as f64) as usize;
    let auto_valid = sizes.iter().take_while(|&&s| s > min_size).count();

    let mut tail = sizes[auto_valid..].to_vec();
    if tail.is_empty() {
        return auto_valid;
    }
    tail.push(1);

    // gap k sits between tail[k] and tail[k + 1]; first occurrence wins.
    let mut best = (0, 0);
    for (k, pair) in tail.windows(2).enumerate() {
        let gap = pair[0].abs_diff(pair[1]);
        if gap > best.1 {
            best = (k, gap);
        }
    }
    let (k, gap) = best;
    if gap >= min_gap {
        auto_valid + k + 1
    } else {
        auto_valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix(sizes: &[usize], pool_size: usize) -> usize {
        validated_prefix(sizes, pool_size, &TLinkageSettings::default())
    }

    #[test]
    fn small_tail_is_not_validated() {
        assert_eq!(prefix(&[50, 48, 3, 2, 1], 103), 2);
    }

    #[test]
    fn tail_is_cut_at_the_largest_drop() {
        // 20 is the auto-valid threshold; 15 and 14 are separated from the
        // noise by a drop of 12.
        let mut sizes = vec![50, 15, 14, 2];
        sizes.extend(std::iter::repeat_n(1, 119));
        assert_eq!(prefix(&sizes, 200), 3);
    }

    #[test]
    fn trailing_sentinel_exposes_the_last_gap() {
        // Without the sentinel the tail [9] would have no gap at all.
        assert_eq!(prefix(&[60, 9], 100), 2);
    }

    #[test]
    fn ties_keep_the_first_gap() {
        // Gaps 5 then 5: the cut happens after the first.
        assert_eq!(prefix(&[15, 10, 5, 1], 1000), 1);
        assert_eq!(prefix(&[100, 16, 11, 6, 1], 200), 2);
    }

    #[test]
    fn nothing_beyond_auto_valid_without_a_tail() {
        assert_eq!(prefix(&[40, 30, 30], 100), 3);
        assert_eq!(prefix(&[], 0), 0);
    }

    #[test]
    fn alternative_strategies() {
        let sizes = [50, 48, 3, 2, 1];
        let largest = TLinkageSettings {
            validation: ValidationType::Largest(3),
            ..Default::default()
        };
        assert_eq!(validated_prefix(&sizes, 103, &largest), 3);
        let too_many = TLinkageSettings {
            validation: ValidationType::Largest(9),
            ..Default::default()
        };
        assert_eq!(validated_prefix(&sizes, 103, &too_many), 5);
        let min_size = TLinkageSettings {
            validation: ValidationType::MinSize(2),
            ..Default::default()
        };
        assert_eq!(validated_prefix(&sizes, 103, &min_size), 4);
    }

    #[test]
    fn validation_sorts_and_flags_members() {
        let mut pool = PointPool::from_points((0..12).map(|i| (i as f64 / 12.0, 0.5)));
        let mut clusters = vec![
            Cluster::singleton(0),
            Cluster::from_ids(1..11),
            Cluster::singleton(11),
        ];
        let count = validate_clusters(&mut clusters, &mut pool, &TLinkageSettings::default());
        assert_eq!(count, 1);
        assert_eq!(clusters[0].len(), 10);
        assert_eq!(clusters[1], Cluster::singleton(0));
        assert_eq!(pool.inliers(), (1..11).collect::<Vec<_>>());
        assert_eq!(pool.outliers(), vec![0, 11]);
    }
}
