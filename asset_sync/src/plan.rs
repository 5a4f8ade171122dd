//! Fetch planning: split a requested window into the part the cache already
//! covers and the part that must come from the source.

use chrono::NaiveDate;

use crate::error::ReconcileError;

/// Inclusive calendar-date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Validated constructor; `start > end` is [`ReconcileError::InvalidRange`].
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReconcileError> {
        if start > end {
            return Err(ReconcileError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First day in the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day in the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// What one request reads from the store and what it asks the source for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPlan {
    /// Read from the store; `None` when nothing usable is cached.
    pub cached: Option<DateRange>,
    /// Fetch from the source; `None` when the cache covers the request.
    pub missing: Option<DateRange>,
}

/// Plan a request for `range` given the latest cached date for the key.
///
/// - nothing cached, or the cache ends before `range` starts: fetch all of `range`
///   (the gap between cache and request is not backfilled)
/// - otherwise read `[start, min(latest, end)]` and fetch `[latest + 1, end]` if
///   `latest < end`
pub fn plan_fetch(latest: Option<NaiveDate>, range: DateRange) -> FetchPlan {
    match latest {
        Some(latest) if latest >= range.start => {
            let cached = DateRange {
                start: range.start,
                end: latest.min(range.end),
            };
            let missing = if latest < range.end {
                latest.succ_opt().map(|start| DateRange {
                    start,
                    end: range.end,
                })
            } else {
                None
            };
            FetchPlan {
                cached: Some(cached),
                missing,
            }
        }
        _ => FetchPlan {
            cached: None,
            missing: Some(range),
        },
    }
}
