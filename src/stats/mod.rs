//! Rank statistics for predictive-order analysis

use crate::error::{AppError, Result};
use crate::models::session::RankedList;
use serde::{Deserialize, Serialize};

/// Outcome of a rank-correlation computation
///
/// `NoData` marks the degenerate cases (fewer than two common members, or a
/// rank sequence without variance) and is excluded from any averaging; it is
/// a value, not an error. Serializes as a JSON number or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Correlation {
    /// Spearman coefficient in [-1, 1]
    Coefficient(f64),
    /// Degenerate input, no coefficient defined
    NoData,
}

impl Correlation {
    /// The coefficient, if one is defined
    pub fn value(&self) -> Option<f64> {
        match self {
            Correlation::Coefficient(v) => Some(*v),
            Correlation::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Correlation::NoData)
    }

    /// Mean of the defined coefficients in a slice, `NoData` when none is
    pub fn mean_of(values: &[Correlation]) -> Correlation {
        let defined: Vec<f64> = values.iter().filter_map(Correlation::value).collect();
        if defined.is_empty() {
            Correlation::NoData
        } else {
            Correlation::Coefficient(defined.iter().sum::<f64>() / defined.len() as f64)
        }
    }
}

impl std::fmt::Display for Correlation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Correlation::Coefficient(v) => write!(f, "{:+.3}", v),
            Correlation::NoData => f.write_str("n/a"),
        }
    }
}

/// Assign 1-based ranks to values; tied values share their average rank
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; values.len()];
    let mut i = 0;
    while i < order.len() {
        // Extend over the run of equal values starting at i
        let mut j = i + 1;
        while j < order.len() && values[order[j]] == values[order[i]] {
            j += 1;
        }
        let average = (i + 1..=j).map(|r| r as f64).sum::<f64>() / (j - i) as f64;
        for &idx in &order[i..j] {
            ranks[idx] = average;
        }
        i = j;
    }

    ranks
}

/// Pearson correlation of two equal-length sequences
///
/// Returns `None` when either sequence has zero variance.
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(covariance / (var_x * var_y).sqrt())
}

/// Spearman rank correlation of two equal-length sequences
///
/// Both sequences are rank-transformed (ties share their average rank) and
/// the ranks are Pearson-correlated. Fewer than two samples or a constant
/// sequence yields `NoData`.
pub fn spearman(xs: &[f64], ys: &[f64]) -> Result<Correlation> {
    if xs.len() != ys.len() {
        return Err(AppError::statistics(format!(
            "Mismatched rank sequences ({} vs {} samples)",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 2 {
        return Ok(Correlation::NoData);
    }

    let rank_x = average_ranks(xs);
    let rank_y = average_ranks(ys);

    match pearson(&rank_x, &rank_y) {
        Some(rho) => Ok(Correlation::Coefficient(rho.clamp(-1.0, 1.0))),
        None => Ok(Correlation::NoData),
    }
}

/// How well a predictor ranking anticipates a reference ranking
///
/// Membership is restricted to the identifiers present in both lists, walked
/// in the REFERENCE order (the reference is the ground truth). For each
/// common identifier the predictor's full-list position is correlated against
/// the reference position `0..n-1`. Inputs are not mutated.
pub fn predictive_correlation(
    predictor: &RankedList,
    reference: &RankedList,
) -> Result<Correlation> {
    let common = reference.common_with(predictor);
    if common.len() < 2 {
        return Ok(Correlation::NoData);
    }

    let mut predictor_ranks = Vec::with_capacity(common.len());
    for id in &common {
        let rank = predictor.position(id).ok_or_else(|| {
            AppError::internal(format!("Common identifier '{}' missing from predictor", id))
        })?;
        predictor_ranks.push(rank as f64);
    }
    let reference_ranks: Vec<f64> = (0..common.len()).map(|i| i as f64).collect();

    spearman(&predictor_ranks, &reference_ranks)
}
