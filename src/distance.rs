//! Distances between preference vectors and preference sets.
//!
//! Both distances are symmetric and lie in `[0, 1]`. Zero means identical
//! nonzero preference profiles; one means the entities share no model.

use crate::types::PreferenceVector;

/// Tanimoto distance between two continuous preference vectors:
/// `1 - <a, b> / (|a|² + |b|² - <a, b>)`.
///
/// When both vectors are all-zero the ratio is undefined; neither entity
/// supports any model, so the distance is the maximal 1.0.
///
/// Panics if the vectors differ in length.
pub fn tanimoto(a: &PreferenceVector, b: &PreferenceVector) -> f64 {
    assert_eq!(
        a.len(),
        b.len(),
        "tanimoto: preference vectors differ in length"
    );
    let ab = a.dot(b);
    let denominator = a.norm_squared() + b.norm_squared() - ab;
    if denominator <= 0.0 {
        return 1.0;
    }
    (1.0 - ab / denominator).clamp(0.0, 1.0)
}

/// Jaccard-style distance between two boolean preference sets:
/// `(|A| + |B| - 2|A ∩ B|) / (|A| + |B|)`.
///
/// Two empty sets are maximally distant (1.0).
///
/// Panics if the sets are indexed over pools of different sizes.
pub fn jaccard(a: &[bool], b: &[bool]) -> f64 {
    assert_eq!(a.len(), b.len(), "jaccard: preference sets differ in length");
    let (mut size_a, mut size_b, mut common) = (0usize, 0usize, 0usize);
    for (&x, &y) in a.iter().zip(b) {
        size_a += x as usize;
        size_b += y as usize;
        common += (x && y) as usize;
    }
    let total = size_a + size_b;
    if total == 0 {
        return 1.0;
    }
    (total - 2 * common) as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn pf(values: &[f64]) -> PreferenceVector {
        PreferenceVector::from_row_slice(values)
    }

    #[test]
    fn tanimoto_of_identical_vectors_is_zero() {
        let a = pf(&[0.2, 0.0, 0.9, 0.4]);
        assert_abs_diff_eq!(tanimoto(&a, &a), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn tanimoto_of_disjoint_support_is_one() {
        assert_eq!(tanimoto(&pf(&[1.0, 0.0]), &pf(&[0.0, 0.5])), 1.0);
    }

    #[test]
    fn tanimoto_all_zero_is_maximal() {
        let zero = PreferenceVector::zeros(3);
        assert_eq!(tanimoto(&zero, &zero), 1.0);
        assert_eq!(tanimoto(&zero, &pf(&[0.0, 0.3, 0.0])), 1.0);
    }

    #[test]
    fn tanimoto_is_symmetric_and_bounded() {
        let a = pf(&[0.1, 0.7, 0.0, 0.3]);
        let b = pf(&[0.5, 0.2, 0.9, 0.3]);
        let d = tanimoto(&a, &b);
        assert_eq!(d, tanimoto(&b, &a));
        assert!((0.0..=1.0).contains(&d));
        // <a,b> = 0.28, |a|² = 0.59, |b|² = 1.19
        assert_abs_diff_eq!(d, 1.0 - 0.28 / (0.59 + 1.19 - 0.28), epsilon = 1e-12);
    }

    #[test]
    #[should_panic(expected = "differ in length")]
    fn tanimoto_length_mismatch_panics() {
        tanimoto(&pf(&[1.0]), &pf(&[1.0, 0.0]));
    }

    #[test]
    fn jaccard_values() {
        let a = [true, true, false, false];
        let b = [true, false, true, false];
        assert_abs_diff_eq!(jaccard(&a, &b), 0.5, epsilon = 1e-12);
        assert_eq!(jaccard(&a, &a), 0.0);
        assert_eq!(jaccard(&a, &[false, false, true, true]), 1.0);
        assert_eq!(jaccard(&[false; 4], &[false; 4]), 1.0);
        assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
    }
}
