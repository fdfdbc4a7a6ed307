//! Weighted poverty and inequality metrics.

use crate::records::SpmUnit;

/// Weighted poverty gap: sum over units of weight × max(threshold − resources, 0).
/// Never negative; a unit at or above its threshold contributes zero.
pub fn poverty_gap(units: &[SpmUnit], resources: &[f64]) -> f64 {
    units
        .iter()
        .zip(resources)
        .map(|(u, &r)| u.weight * (u.threshold - r).max(0.0))
        .sum()
}

/// Weighted Gini coefficient over `values`.
///
/// Cumulative-pairs formula over values sorted ascending:
///   G = Σᵢ (Xᵢ·Wᵢ₋₁ − Xᵢ₋₁·Wᵢ) / (Xₙ·Wₙ)
/// where Xᵢ, Wᵢ are running sums of value×weight and weight.
pub fn weighted_gini(values: &[f64], weights: &[f64]) -> f64 {
    debug_assert_eq!(values.len(), weights.len());

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut cum_w = 0.0;
    let mut cum_xw = 0.0;
    let mut num = 0.0;
    for &i in &order {
        let prev_w = cum_w;
        let prev_xw = cum_xw;
        cum_w += weights[i];
        cum_xw += values[i] * weights[i];
        num += cum_xw * prev_w - prev_xw * cum_w;
    }

    if cum_w == 0.0 || cum_xw == 0.0 {
        return 0.0;
    }
    num / (cum_xw * cum_w)
}
