//! Per-date comparison universe.

use rustc_hash::FxHashMap;

use crate::panel::Panel;
use crate::types::{Date, Symbol};

/// An instrument eligible on a given date: it has both a valid score and a valid
/// realized return.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub symbol: Symbol,
    pub score: f64,
    pub realized: f64,
}

/// The instruments comparable on one date, in the score panel's native order.
#[derive(Clone, Debug)]
pub struct Universe {
    date: Date,
    candidates: Vec<Candidate>,
    position_of: FxHashMap<Symbol, usize>,
}

impl Universe {
    /// Intersect the valid cells of both panels on `date`.
    ///
    /// Missing scores and missing returns are dropped independently before the
    /// intersection. Order follows the score panel's columns.
    pub fn at(date: Date, scores: &Panel, returns: &Panel) -> Self {
        let realized: FxHashMap<Symbol, f64> = returns.valid_entries(date).into_iter().collect();

        let candidates: Vec<Candidate> = scores
            .valid_entries(date)
            .into_iter()
            .filter_map(|(symbol, score)| {
                realized.get(&symbol).map(|&r| Candidate {
                    symbol,
                    score,
                    realized: r,
                })
            })
            .collect();

        let position_of = candidates
            .iter()
            .enumerate()
            .map(|(i, c)| (c.symbol, i))
            .collect();

        Self {
            date,
            candidates,
            position_of,
        }
    }

    #[inline]
    pub fn date(&self) -> Date {
        self.date
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates in native order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Realized return of `symbol`, if it is part of this universe.
    pub fn realized(&self, symbol: &Symbol) -> Option<f64> {
        self.position_of
            .get(symbol)
            .map(|&i| self.candidates[i].realized)
    }
}
