//! Bar granularity. The cache keys bars by calendar date, so one trading day
//! is the only interval in use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeFrameError {
    #[error("daily bars take an amount of 1, got {amount}")]
    InvalidAmount { amount: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFrameUnit {
    Day,
}

/// Bar interval as amount × unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFrame {
    pub amount: u32,
    pub unit: TimeFrameUnit,
}

impl TimeFrame {
    /// One trading day.
    pub const fn day() -> Self {
        Self {
            amount: 1,
            unit: TimeFrameUnit::Day,
        }
    }

    /// Rejects anything other than [`TimeFrame::day`].
    pub fn validate(&self) -> Result<(), TimeFrameError> {
        match self.unit {
            TimeFrameUnit::Day if self.amount == 1 => Ok(()),
            TimeFrameUnit::Day => Err(TimeFrameError::InvalidAmount {
                amount: self.amount,
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn one_day_is_valid() {
        assert_eq!(TimeFrame::day().validate(), Ok(()));
    }

    #[test]
    fn multi_day_amounts_are_rejected() {
        for amount in [0, 2, 7] {
            let tf = TimeFrame {
                amount,
                unit: TimeFrameUnit::Day,
            };
            assert_eq!(tf.validate(), Err(TimeFrameError::InvalidAmount { amount }));
        }
    }
}
