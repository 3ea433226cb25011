//! Recurring cadence math.
//!
//! Periods are computed in integer month-space so the arithmetic stays exact:
//! monthly periods are calendar months, quarterly blocks start every three
//! months counted from the template's start month, annual periods every
//! twelve. A period is identified by its first day, which is also the
//! idempotence key for generated records.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Monthly,
    Quarterly,
    Annual,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
        }
    }

    fn months_per_period(self) -> i32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::Annual => 12,
        }
    }

    /// First day of the period containing `as_of`, anchored at `start`.
    ///
    /// Returns `None` when `as_of` falls before the start month, i.e. there
    /// is no period to generate yet.
    pub fn period_start(self, start: NaiveDate, as_of: NaiveDate) -> Option<NaiveDate> {
        let start_month = month_index(start);
        let as_of_month = month_index(as_of);
        if as_of_month < start_month {
            return None;
        }

        let span = self.months_per_period();
        let offset = ((as_of_month - start_month) / span) * span;
        first_of_month(start_month + offset)
    }
}

impl TryFrom<&str> for Frequency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "annual" => Ok(Self::Annual),
            other => Err(EngineError::InvalidArgument(format!(
                "invalid frequency: {other}"
            ))),
        }
    }
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn first_of_month(index: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_uses_calendar_months() {
        let start = date(2026, 1, 15);
        assert_eq!(
            Frequency::Monthly.period_start(start, date(2026, 3, 2)),
            Some(date(2026, 3, 1))
        );
    }

    #[test]
    fn quarterly_blocks_anchor_at_start_month() {
        let start = date(2026, 2, 10);
        // Feb-Apr is the first block, May-Jul the second.
        assert_eq!(
            Frequency::Quarterly.period_start(start, date(2026, 4, 30)),
            Some(date(2026, 2, 1))
        );
        assert_eq!(
            Frequency::Quarterly.period_start(start, date(2026, 5, 1)),
            Some(date(2026, 5, 1))
        );
    }

    #[test]
    fn annual_periods_anchor_at_start_month() {
        let start = date(2025, 9, 1);
        assert_eq!(
            Frequency::Annual.period_start(start, date(2026, 8, 20)),
            Some(date(2025, 9, 1))
        );
        assert_eq!(
            Frequency::Annual.period_start(start, date(2026, 9, 1)),
            Some(date(2026, 9, 1))
        );
    }

    #[test]
    fn before_start_month_yields_no_period() {
        let start = date(2026, 6, 1);
        assert_eq!(Frequency::Monthly.period_start(start, date(2026, 5, 31)), None);
    }

    #[test]
    fn year_boundaries_are_exact() {
        let start = date(2025, 11, 20);
        assert_eq!(
            Frequency::Quarterly.period_start(start, date(2026, 1, 10)),
            Some(date(2025, 11, 1))
        );
        assert_eq!(
            Frequency::Quarterly.period_start(start, date(2026, 2, 1)),
            Some(date(2026, 2, 1))
        );
    }
}
