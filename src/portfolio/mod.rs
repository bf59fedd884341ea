//! Portfolio construction: universe selection, top-K equal weighting, turnover
//! and cost modeling.
//!
//! At each rebalance date the engine builds a [`Universe`] from the two panels,
//! ranks it by score and holds the best `top_k` names at `1/top_k` each. Turnover
//! is measured against the last portfolio that was actually built.
//!
//! # Example
//!
//! ```
//! use signalbook::portfolio::{Portfolio, Universe, turnover};
//! use signalbook::{Date, Panel, Symbol};
//!
//! let date = Date::from_ymd_opt(2020, 1, 31).unwrap();
//! let cols = vec![Symbol::new("A"), Symbol::new("B"), Symbol::new("C")];
//! let scores = Panel::new(cols.clone()).unwrap()
//!     .with_row(date, vec![Some(0.05), Some(0.03), Some(0.01)]).unwrap();
//! let returns = Panel::new(cols).unwrap()
//!     .with_row(date, vec![Some(0.02), Some(0.01), Some(-0.01)]).unwrap();
//!
//! let universe = Universe::at(date, &scores, &returns);
//! let portfolio = Portfolio::top_k(&universe, 2).unwrap();
//!
//! assert_eq!(portfolio.selected(), &[Symbol::new("A"), Symbol::new("B")]);
//! assert_eq!(portfolio.weight(&Symbol::new("C")), Some(0.0));
//! assert_eq!(turnover(&portfolio, None), 0.0);
//! ```

pub mod cost_model;
pub mod metrics;
#[cfg(feature = "parallel")]
pub mod sweep;
pub mod universe;

pub use cost_model::CostModel;
pub use metrics::Metrics;
pub use universe::{Candidate, Universe};

use crate::types::{Date, Symbol};
use rustc_hash::FxHashMap;

/// Equal-weight holdings for one rebalance date.
///
/// Every symbol of the date's universe carries a weight: `1/top_k` for the
/// selected names, `0.0` for the rest.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Portfolio {
    date: Date,
    /// Weights over the universe, native order
    weights: Vec<(Symbol, f64)>,
    /// Selected symbols, best score first
    selected: Vec<Symbol>,
}

impl Portfolio {
    /// Select the `top_k` highest-scoring candidates and weight them equally.
    ///
    /// Returns `None` when the universe holds fewer than `top_k` candidates (or
    /// `top_k` is zero). Ties keep the universe's native order.
    pub fn top_k(universe: &Universe, top_k: usize) -> Option<Self> {
        if top_k == 0 || universe.len() < top_k {
            return None;
        }

        let candidates = universe.candidates();
        let mut ranked: Vec<usize> = (0..candidates.len()).collect();
        // Stable sort: equal scores stay in native order.
        ranked.sort_by(|&a, &b| {
            candidates[b]
                .score
                .partial_cmp(&candidates[a].score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(top_k);

        let weight = 1.0 / top_k as f64;
        let mut weights: Vec<(Symbol, f64)> =
            candidates.iter().map(|c| (c.symbol, 0.0)).collect();
        for &i in &ranked {
            weights[i].1 = weight;
        }

        Some(Self {
            date: universe.date(),
            weights,
            selected: ranked.iter().map(|&i| candidates[i].symbol).collect(),
        })
    }

    #[inline]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Weights over the whole universe, native order.
    pub fn weights(&self) -> &[(Symbol, f64)] {
        &self.weights
    }

    /// Selected symbols, best score first.
    pub fn selected(&self) -> &[Symbol] {
        &self.selected
    }

    /// Weight of `symbol`, or `None` if it was not in this date's universe.
    pub fn weight(&self, symbol: &Symbol) -> Option<f64> {
        self.weights
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|&(_, w)| w)
    }

    /// Weighted realized return of the selected names.
    ///
    /// With equal weights this is the mean realized return of the selection.
    pub fn gross_return(&self, universe: &Universe) -> f64 {
        let weight = 1.0 / self.selected.len() as f64;
        self.selected
            .iter()
            .filter_map(|sym| universe.realized(sym))
            .map(|r| r * weight)
            .sum()
    }
}

/// One-way turnover between two portfolios: `sum(|w_new - w_prev|) / 2`.
///
/// Weights are aligned over the union of both symbol sets, a missing weight
/// counting as zero. With no previous portfolio the turnover is zero.
pub fn turnover(new: &Portfolio, prev: Option<&Portfolio>) -> f64 {
    let Some(prev) = prev else {
        return 0.0;
    };

    let prev_weights: FxHashMap<Symbol, f64> = prev.weights.iter().copied().collect();
    let new_weights: FxHashMap<Symbol, f64> = new.weights.iter().copied().collect();

    let changed: f64 = new
        .weights
        .iter()
        .map(|(sym, w)| (w - prev_weights.get(sym).copied().unwrap_or(0.0)).abs())
        .sum();
    let dropped: f64 = prev
        .weights
        .iter()
        .filter(|(sym, _)| !new_weights.contains_key(sym))
        .map(|(_, w)| w.abs())
        .sum();

    // Rounding on 1/k weights can overshoot the [0, 1] range by an ulp.
    ((changed + dropped) / 2.0).clamp(0.0, 1.0)
}
