//! Prediction-quality statistics: regression errors and information coefficients.
//!
//! These consume the same panels as the backtest and report how well the scores
//! line up with realized returns, independently of any portfolio construction.
//!
//! # References
//!
//! - scikit-learn `mean_squared_error`, `mean_absolute_error`, `r2_score`
//! - SciPy `spearmanr` (average-rank tie-breaking)

use crate::panel::Panel;
use crate::schedule::common_dates;
use crate::series::Series;
use crate::types::Date;

/// Name of the per-date rank information coefficient series.
pub const RANK_IC_NAME: &str = "rank_ic";

// ---------------------------------------------------------------------------
// Ranking and correlation
// ---------------------------------------------------------------------------

/// Ranks 1..N, tied values sharing the average of their ranks.
fn rankdata(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0_f64; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]] == values[order[start]] {
            end += 1;
        }
        let avg_rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = avg_rank;
        }
        start = end;
    }

    ranks
}

/// Pearson correlation; NaN when either side has zero variance.
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0)
}

fn spearman(x: &[f64], y: &[f64]) -> f64 {
    pearson(&rankdata(x), &rankdata(y))
}

/// Keep positions where both values are finite.
fn finite_pairs(y_true: &[f64], y_pred: &[f64]) -> (Vec<f64>, Vec<f64>) {
    y_true
        .iter()
        .zip(y_pred)
        .filter(|(t, p)| t.is_finite() && p.is_finite())
        .map(|(&t, &p)| (t, p))
        .unzip()
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Point-prediction error metrics.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegressionReport {
    pub mse: f64,
    pub mae: f64,
    /// Coefficient of determination, NaN when `y_true` is constant
    pub r2: f64,
}

/// Rank and linear correlation between predictions and outcomes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InformationCoefficient {
    pub pearson: f64,
    pub spearman: f64,
}

/// MSE, MAE and R² over the positions where both inputs are finite.
///
/// All fields are NaN if no such position exists. Extra trailing elements of the
/// longer slice are ignored.
pub fn regression_report(y_true: &[f64], y_pred: &[f64]) -> RegressionReport {
    let (t, p) = finite_pairs(y_true, y_pred);
    if t.is_empty() {
        return RegressionReport {
            mse: f64::NAN,
            mae: f64::NAN,
            r2: f64::NAN,
        };
    }

    let n = t.len() as f64;
    let ss_res: f64 = t.iter().zip(&p).map(|(a, b)| (a - b).powi(2)).sum();
    let abs_err: f64 = t.iter().zip(&p).map(|(a, b)| (a - b).abs()).sum();
    let mean_t = t.iter().sum::<f64>() / n;
    let ss_tot: f64 = t.iter().map(|a| (a - mean_t).powi(2)).sum();

    RegressionReport {
        mse: ss_res / n,
        mae: abs_err / n,
        r2: if ss_tot == 0.0 {
            f64::NAN
        } else {
            1.0 - ss_res / ss_tot
        },
    }
}

/// Pearson and Spearman correlation over the finite pairs.
///
/// Both are NaN with fewer than 3 pairs or when either side is constant.
pub fn information_coefficient(y_true: &[f64], y_pred: &[f64]) -> InformationCoefficient {
    let (t, p) = finite_pairs(y_true, y_pred);
    if t.len() < 3 {
        return InformationCoefficient {
            pearson: f64::NAN,
            spearman: f64::NAN,
        };
    }
    InformationCoefficient {
        pearson: pearson(&t, &p),
        spearman: spearman(&t, &p),
    }
}

/// Stack every cell valid in both panels into aligned `(realized, predicted)`
/// vectors, dates ascending, prediction-panel column order within a date.
pub fn panel_pairs(predictions: &Panel, realized: &Panel) -> (Vec<f64>, Vec<f64>) {
    let mut y_true = Vec::new();
    let mut y_pred = Vec::new();
    for date in common_dates(predictions, realized) {
        for (symbol, pred) in predictions.valid_entries(date) {
            if let Some(actual) = realized.get(date, &symbol) {
                y_true.push(actual);
                y_pred.push(pred);
            }
        }
    }
    (y_true, y_pred)
}

/// Cross-sectional Spearman correlation of scores vs realized returns, one point
/// per common date. Dates with fewer than 3 valid pairs, or a constant cross
/// section, are left out.
pub fn rank_ic_series(scores: &Panel, returns: &Panel) -> Series {
    let points: Vec<(Date, f64)> = common_dates(scores, returns)
        .into_iter()
        .filter_map(|date| {
            let (actual, pred): (Vec<f64>, Vec<f64>) = scores
                .valid_entries(date)
                .into_iter()
                .filter_map(|(symbol, score)| returns.get(date, &symbol).map(|r| (r, score)))
                .unzip();
            if actual.len() < 3 {
                return None;
            }
            let ic = spearman(&pred, &actual);
            (!ic.is_nan()).then_some((date, ic))
        })
        .collect();
    Series::from_points(RANK_IC_NAME, points)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
