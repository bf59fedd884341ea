//! Date alignment and rebalance scheduling.

use crate::error::ConfigError;
use crate::panel::Panel;
use crate::types::Date;

/// Dates present in both panels, ascending.
pub fn common_dates(scores: &Panel, returns: &Panel) -> Vec<Date> {
    // Both iterate in ascending order, so a merge walk is enough.
    let mut left = scores.dates().peekable();
    let mut right = returns.dates().peekable();
    let mut common = Vec::new();

    while let (Some(&a), Some(&b)) = (left.peek(), right.peek()) {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => {
                left.next();
            }
            std::cmp::Ordering::Greater => {
                right.next();
            }
            std::cmp::Ordering::Equal => {
                common.push(a);
                left.next();
                right.next();
            }
        }
    }

    common
}

/// The ordered dates on which the portfolio is rebuilt.
///
/// Sampled by *position* in the merged date list: with a stride of 5 over
/// month-end data the schedule keeps every fifth month, not every fifth day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RebalanceSchedule {
    dates: Vec<Date>,
}

impl RebalanceSchedule {
    /// Build the schedule from the panels' common dates, keeping positions
    /// `0, n, 2n, ...` where `n = rebalance_every`.
    ///
    /// Fails with [`ConfigError::ZeroRebalanceEvery`] for a stride of zero.
    pub fn build(
        scores: &Panel,
        returns: &Panel,
        rebalance_every: usize,
    ) -> Result<Self, ConfigError> {
        if rebalance_every == 0 {
            return Err(ConfigError::ZeroRebalanceEvery);
        }
        let dates = common_dates(scores, returns)
            .into_iter()
            .step_by(rebalance_every)
            .collect();
        Ok(Self { dates })
    }

    #[inline]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Date> + '_ {
        self.dates.iter().copied()
    }
}
