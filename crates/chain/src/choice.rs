//! Discrete sampling from unnormalized weight vectors.

/// Maps a uniform draw to an index with probability proportional to its weight.
///
/// Walks the cumulative sum of `weights`, scales `u` by the total, and returns
/// the first index whose cumulative weight exceeds the scaled draw. Index `k`
/// is therefore returned with probability `weights[k] / Σ weights`.
///
/// `u` is expected in `[0, 1)` and `weights` to be non-empty and non-negative
/// with a positive sum. If floating-point rounding leaves the scaled draw at or
/// above the final cumulative value, the last index with positive weight is
/// returned (or the last index if no weight is positive), so the result is
/// always a valid index and never a zero-weight one while any weight is
/// positive.
///
/// # Panics
///
/// Panics in debug builds if `weights` is empty.
///
/// # Example
///
/// ```
/// use knockoff_chain::weighted_choice;
///
/// assert_eq!(weighted_choice(0.1, &[1.0, 3.0]), 0);
/// assert_eq!(weighted_choice(0.5, &[1.0, 3.0]), 1);
/// ```
pub fn weighted_choice(u: f64, weights: &[f64]) -> usize {
    debug_assert!(!weights.is_empty(), "weights must not be empty");
    let total: f64 = weights.iter().sum();
    let target = u * total;

    let mut cumulative = 0.0;
    for (k, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > target {
            return k;
        }
    }
    // Rounding pushed the draw past the end.
    weights
        .iter()
        .rposition(|&w| w > 0.0)
        .unwrap_or(weights.len().saturating_sub(1))
}
