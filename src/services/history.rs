//! Ordering of a user's log history.
//!
//! Trend and consistency calculations read "the first N" entries as the most
//! recent and the last entry as the oldest. `LogHistory` makes that ordering
//! explicit instead of trusting whatever order the caller happened to keep.

use crate::models::daily_log::DailyLog;

/// Logs sorted by date, newest first. Entries sharing a date keep their
/// relative input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogHistory {
    logs: Vec<DailyLog>,
}

impl LogHistory {
    pub fn from_unordered(mut logs: Vec<DailyLog>) -> Self {
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        Self { logs }
    }

    pub fn as_slice(&self) -> &[DailyLog] {
        &self.logs
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// Oldest first, for chronological walks.
    pub fn chronological(&self) -> impl Iterator<Item = &DailyLog> {
        self.logs.iter().rev()
    }
}

pub(crate) fn mean_mood(logs: &[DailyLog]) -> f64 {
    if logs.is_empty() {
        return 0.0;
    }
    logs.iter().map(|l| l.mood as f64).sum::<f64>() / logs.len() as f64
}

/// Mean mood of the three newest and the three oldest entries.
///
/// Both windows cover the same entries when there are fewer than six logs,
/// which flattens the comparison towards zero. `None` below three logs.
pub(crate) fn recent_vs_older_mood(logs: &[DailyLog]) -> Option<(f64, f64)> {
    const WINDOW: usize = 3;
    if logs.len() < WINDOW {
        return None;
    }
    let recent = mean_mood(&logs[..WINDOW]);
    let older = mean_mood(&logs[logs.len() - WINDOW..]);
    Some((recent, older))
}
