//! Date-indexed, instrument-columned panels of floating-point values.
//!
//! A [`Panel`] is the typed stand-in for a wide table: one row per date, one column
//! per instrument, any cell possibly missing. Rows are kept in chronological order;
//! columns keep the order they were declared in (the panel's *native order*), which
//! is what ranking ties fall back on.
//!
//! A cell is **valid** only when it holds a finite number. `None`, NaN and
//! infinities are all treated as absent, and lookups of unknown dates or symbols
//! return `None` rather than a default.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::error::PanelError;
use crate::types::{Date, Symbol};

/// Predicted excess-return scores, one row per date.
pub type ScorePanel = Panel;

/// Realized excess returns over the holding period starting at each row's date.
pub type ReturnPanel = Panel;

/// A date × symbol table of optional floats.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PanelData", into = "PanelData")
)]
pub struct Panel {
    symbols: Vec<Symbol>,
    column_of: FxHashMap<Symbol, usize>,
    rows: BTreeMap<Date, Vec<Option<f64>>>,
}

impl Panel {
    /// Create an empty panel with the given columns.
    ///
    /// Fails if a symbol is repeated.
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, PanelError> {
        let mut column_of = FxHashMap::default();
        column_of.reserve(symbols.len());
        for (col, &sym) in symbols.iter().enumerate() {
            if column_of.insert(sym, col).is_some() {
                return Err(PanelError::DuplicateSymbol(sym));
            }
        }
        Ok(Self {
            symbols,
            column_of,
            rows: BTreeMap::new(),
        })
    }

    /// Insert the row for `date`. `values` must carry one entry per column.
    pub fn insert_row(&mut self, date: Date, values: Vec<Option<f64>>) -> Result<(), PanelError> {
        if values.len() != self.symbols.len() {
            return Err(PanelError::RowWidth {
                date,
                expected: self.symbols.len(),
                actual: values.len(),
            });
        }
        if self.rows.contains_key(&date) {
            return Err(PanelError::DuplicateDate(date));
        }
        self.rows.insert(date, values);
        Ok(())
    }

    /// Builder form of [`Panel::insert_row`].
    pub fn with_row(mut self, date: Date, values: Vec<Option<f64>>) -> Result<Self, PanelError> {
        self.insert_row(date, values)?;
        Ok(self)
    }

    /// Columns in native order.
    #[inline]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Row dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.rows.keys().copied()
    }

    pub fn contains_date(&self, date: Date) -> bool {
        self.rows.contains_key(&date)
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The valid value at (`date`, `symbol`), if any.
    pub fn get(&self, date: Date, symbol: &Symbol) -> Option<f64> {
        let col = *self.column_of.get(symbol)?;
        self.rows
            .get(&date)
            .and_then(|row| row[col])
            .filter(|v| v.is_finite())
    }

    /// All valid `(symbol, value)` pairs on `date`, in native column order.
    ///
    /// Returns an empty list for a date the panel does not contain.
    pub fn valid_entries(&self, date: Date) -> Vec<(Symbol, f64)> {
        let Some(row) = self.rows.get(&date) else {
            return Vec::new();
        };
        self.symbols
            .iter()
            .zip(row)
            .filter_map(|(&sym, cell)| match cell {
                Some(v) if v.is_finite() => Some((sym, *v)),
                _ => None,
            })
            .collect()
    }
}

/// Wire shape of a panel: `{"symbols": [...], "rows": {"2020-01-31": [0.1, null]}}`.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct PanelData {
    symbols: Vec<Symbol>,
    rows: BTreeMap<Date, Vec<Option<f64>>>,
}

#[cfg(feature = "serde")]
impl TryFrom<PanelData> for Panel {
    type Error = PanelError;

    fn try_from(data: PanelData) -> Result<Self, Self::Error> {
        let mut panel = Panel::new(data.symbols)?;
        for (date, values) in data.rows {
            panel.insert_row(date, values)?;
        }
        Ok(panel)
    }
}

#[cfg(feature = "serde")]
impl From<Panel> for PanelData {
    fn from(panel: Panel) -> Self {
        Self {
            symbols: panel.symbols,
            rows: panel.rows,
        }
    }
}


#[cfg(all(test, feature = "persistence"))]
mod serde_tests {
    use super::*;

    #[test]
    fn json_shape() {
        let json = r#"{
            "symbols": ["A", "B"],
            "rows": {
                "2020-01-02": [0.1, null],
                "2020-01-01": [0.2, 0.3]
            }
        }"#;
        let panel: Panel = serde_json::from_str(json).unwrap();
        let first = Date::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(panel.dates().next(), Some(first));
        assert_eq!(panel.get(first, &Symbol::new("B")), Some(0.3));
    }

    #[test]
    fn json_rejects_ragged_rows() {
        let json = r#"{"symbols": ["A", "B"], "rows": {"2020-01-01": [0.1]}}"#;
        assert!(serde_json::from_str::<Panel>(json).is_err());
    }
}
