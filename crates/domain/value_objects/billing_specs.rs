use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::{enums::billing_kinds::BillingKind, reminders::ReminderPolicy};

pub const EXPIRE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingSpecError {
    #[error("invalid cycle day {0}: must be between 1 and 31")]
    InvalidCycleDay(i32),
    #[error("invalid date format {0:?}: expected YYYY-MM-DD")]
    InvalidDateFormat(String),
    #[error("billing spec missing: set either cycle_day or expire_date")]
    Missing,
    #[error("billing spec ambiguous: set only one of cycle_day or expire_date")]
    Ambiguous,
    #[error("unknown billing kind {0:?}")]
    UnknownKind(String),
}

/// Day of month a recurring subscription renews on, always within 1..=31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u32")]
pub struct CycleDay(u32);

impl CycleDay {
    pub fn new(day: i32) -> Result<Self, BillingSpecError> {
        if (1..=31).contains(&day) {
            Ok(Self(day as u32))
        } else {
            Err(BillingSpecError::InvalidCycleDay(day))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<CycleDay> for u32 {
    fn from(value: CycleDay) -> Self {
        value.0
    }
}

impl Display for CycleDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for CycleDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = i32::deserialize(deserializer)?;
        CycleDay::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Rule describing how a subscription recurs or expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BillingSpec {
    RecurringDayOfMonth { cycle_day: CycleDay },
    FixedExpiryDate { expire_date: NaiveDate },
}

impl BillingSpec {
    /// Builds a spec from the two optional intake fields; exactly one must be present.
    pub fn from_parts(
        cycle_day: Option<i32>,
        expire_date: Option<&str>,
    ) -> Result<Self, BillingSpecError> {
        match (cycle_day, expire_date) {
            (Some(day), None) => Ok(BillingSpec::RecurringDayOfMonth {
                cycle_day: CycleDay::new(day)?,
            }),
            (None, Some(raw)) => Ok(BillingSpec::FixedExpiryDate {
                expire_date: parse_expire_date(raw)?,
            }),
            (None, None) => Err(BillingSpecError::Missing),
            (Some(_), Some(_)) => Err(BillingSpecError::Ambiguous),
        }
    }

    pub fn kind(&self) -> BillingKind {
        match self {
            BillingSpec::RecurringDayOfMonth { .. } => BillingKind::RecurringDayOfMonth,
            BillingSpec::FixedExpiryDate { .. } => BillingKind::FixedExpiryDate,
        }
    }

    pub fn cycle_day(&self) -> Option<CycleDay> {
        match self {
            BillingSpec::RecurringDayOfMonth { cycle_day } => Some(*cycle_day),
            BillingSpec::FixedExpiryDate { .. } => None,
        }
    }

    pub fn expire_date(&self) -> Option<NaiveDate> {
        match self {
            BillingSpec::RecurringDayOfMonth { .. } => None,
            BillingSpec::FixedExpiryDate { expire_date } => Some(*expire_date),
        }
    }

    pub fn reminder_policy(&self) -> ReminderPolicy {
        match self {
            BillingSpec::RecurringDayOfMonth { .. } => ReminderPolicy::Renewal,
            BillingSpec::FixedExpiryDate { .. } => ReminderPolicy::Expiry,
        }
    }
}

pub fn parse_expire_date(raw: &str) -> Result<NaiveDate, BillingSpecError> {
    let trimmed = raw.trim();
    // chrono accepts unpadded fields ("2026-1-8"); the stored format is strictly padded.
    if trimmed.len() != 10 {
        return Err(BillingSpecError::InvalidDateFormat(raw.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, EXPIRE_DATE_FORMAT)
        .map_err(|_| BillingSpecError::InvalidDateFormat(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_day_bounds() {
        assert!(CycleDay::new(1).is_ok());
        assert!(CycleDay::new(31).is_ok());
        assert_eq!(CycleDay::new(0), Err(BillingSpecError::InvalidCycleDay(0)));
        assert_eq!(CycleDay::new(32), Err(BillingSpecError::InvalidCycleDay(32)));
        assert_eq!(CycleDay::new(-4), Err(BillingSpecError::InvalidCycleDay(-4)));
    }

    #[test]
    fn expire_date_must_be_a_real_padded_date() {
        assert_eq!(
            parse_expire_date("2026-01-18").unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 18).unwrap()
        );
        for raw in ["2026-02-30", "2026-13-01", "18/01/2026", "2026-1-8", "", "tomorrow"] {
            let err = parse_expire_date(raw).unwrap_err();
            assert_eq!(err, BillingSpecError::InvalidDateFormat(raw.to_string()));
        }
    }

    #[test]
    fn from_parts_requires_exactly_one_variant() {
        let spec = BillingSpec::from_parts(Some(15), None).unwrap();
        assert_eq!(spec.kind(), BillingKind::RecurringDayOfMonth);
        assert_eq!(spec.cycle_day().map(CycleDay::get), Some(15));

        let spec = BillingSpec::from_parts(None, Some("2026-01-18")).unwrap();
        assert_eq!(spec.kind(), BillingKind::FixedExpiryDate);
        assert_eq!(spec.expire_date(), NaiveDate::from_ymd_opt(2026, 1, 18));

        assert_eq!(
            BillingSpec::from_parts(None, None),
            Err(BillingSpecError::Missing)
        );
        assert_eq!(
            BillingSpec::from_parts(Some(1), Some("2026-01-18")),
            Err(BillingSpecError::Ambiguous)
        );
        assert_eq!(
            BillingSpec::from_parts(Some(40), None),
            Err(BillingSpecError::InvalidCycleDay(40))
        );
    }

    #[test]
    fn serializes_as_tagged_variant() {
        let spec = BillingSpec::from_parts(Some(5), None).unwrap();
        let json = serde_json::to_value(spec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "recurring_day_of_month", "cycle_day": 5 })
        );

        let err = serde_json::from_value::<BillingSpec>(
            serde_json::json!({ "type": "recurring_day_of_month", "cycle_day": 0 }),
        )
        .unwrap_err()
        .to_string();
        assert!(err.contains("invalid cycle day"), "got: {err}");
    }
}
