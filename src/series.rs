//! Named, date-indexed float series.

use crate::types::Date;

/// Name carried by every equity curve.
pub const EQUITY_CURVE_NAME: &str = "equity_excess";

/// Name of the per-event net excess return series.
pub const NET_RETURN_NAME: &str = "excess_return_net";

/// A named sequence of `(date, value)` points in ascending date order.
///
/// An empty series still has a name; consumers never receive a bare container.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Series {
    name: String,
    points: Vec<(Date, f64)>,
}

/// Cumulative growth factor of a strategy, one point per rebalance event.
pub type EquityCurve = Series;

impl Series {
    /// An empty series called `name`.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    /// Build a series from points, sorting them by date.
    pub fn from_points(name: impl Into<String>, mut points: Vec<(Date, f64)>) -> Self {
        if !points.is_sorted_by_key(|(d, _)| *d) {
            points.sort_by_key(|(d, _)| *d);
        }
        Self {
            name: name.into(),
            points,
        }
    }

    /// Compound `(date, return)` pairs into a growth curve: the value at each
    /// date is the running product of `1 + r` up to and including it, taken in
    /// date order.
    pub fn compound(name: impl Into<String>, returns: &[(Date, f64)]) -> Self {
        let returns = Self::from_points(String::new(), returns.to_vec()).points;
        let mut growth = 1.0_f64;
        let points = returns
            .into_iter()
            .map(|(date, r)| {
                growth *= 1.0 + r;
                (date, growth)
            })
            .collect();
        Self {
            name: name.into(),
            points,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[(Date, f64)] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.points.iter().map(|&(d, _)| d)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&(_, v)| v)
    }

    /// Value at exactly `date`. Dates between points have no value.
    pub fn get(&self, date: Date) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |&(d, _)| d)
            .ok()
            .map(|i| self.points[i].1)
    }

    pub fn first(&self) -> Option<(Date, f64)> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<(Date, f64)> {
        self.points.last().copied()
    }

    /// Arithmetic mean of the values, `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.values().sum::<f64>() / self.points.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> Date {
        Date::from_ymd_opt(2020, 1, day).unwrap()
    }

    #[test]
    fn empty_series_keeps_name() {
        let s = Series::empty(EQUITY_CURVE_NAME);
        assert_eq!(s.name(), "equity_excess");
        assert!(s.is_empty());
        assert_eq!(s.mean(), None);
        assert_eq!(s.last(), None);
    }

    #[test]
    fn from_points_sorts() {
        let s = Series::from_points("x", vec![(d(3), 3.0), (d(1), 1.0), (d(2), 2.0)]);
        assert_eq!(s.dates().collect::<Vec<_>>(), vec![d(1), d(2), d(3)]);
        assert_eq!(s.get(d(2)), Some(2.0));
        assert_eq!(s.get(d(4)), None);
    }

    #[test]
    fn compound_is_running_product() {
        let s = Series::compound(EQUITY_CURVE_NAME, &[(d(3), 0.05), (d(1), 0.10), (d(2), -0.20)]);
        let values: Vec<f64> = s.values().collect();
        assert!((values[0] - 1.10).abs() < 1e-12);
        assert!((values[1] - 0.88).abs() < 1e-12);
        assert!((values[2] - 0.924).abs() < 1e-12);
    }

    #[test]
    fn mean_of_values() {
        let s = Series::from_points("ic", vec![(d(1), 0.1), (d(2), 0.3)]);
        assert!((s.mean().unwrap() - 0.2).abs() < 1e-12);
    }
}
