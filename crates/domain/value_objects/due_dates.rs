//! Due-date arithmetic for billing specs.
//!
//! Everything here is a pure function of the billing spec, clamp policy, and
//! the `today` passed in by the caller. Callers capture `today` once per tick or
//! request so that every subscription is measured against the same date.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

use crate::domain::value_objects::{
    billing_specs::{BillingSpec, CycleDay},
    enums::day_clamps::DayClamp,
};

/// Next charge or expiry date together with the signed day count from `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DueDate {
    pub due_date: NaiveDate,
    pub days_left: i64,
}

impl DueDate {
    pub fn is_upcoming(&self, window_days: i64) -> bool {
        self.days_left <= window_days
    }
}

pub fn compute_due_date(spec: &BillingSpec, today: NaiveDate, clamp: DayClamp) -> DueDate {
    let due_date = match spec {
        BillingSpec::RecurringDayOfMonth { cycle_day } => {
            next_recurring_due(*cycle_day, today, clamp)
        }
        // No rollover: once past, days_left keeps going negative.
        BillingSpec::FixedExpiryDate { expire_date } => *expire_date,
    };

    DueDate {
        due_date,
        days_left: (due_date - today).num_days(),
    }
}

/// First renewal on or after `today`. Never earlier than `today`.
pub fn next_recurring_due(cycle_day: CycleDay, today: NaiveDate, clamp: DayClamp) -> NaiveDate {
    let this_month = first_of_month(today);
    let candidate = day_in_month(this_month, cycle_day, clamp);
    if candidate >= today {
        return candidate;
    }

    // December rolls over into January of the next year.
    day_in_month(this_month + Months::new(1), cycle_day, clamp)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next = first + Months::new(1);
    (next - first).num_days() as u32
}

fn day_in_month(first: NaiveDate, cycle_day: CycleDay, clamp: DayClamp) -> NaiveDate {
    let month_len = days_in_month(first);
    let day = if cycle_day.get() <= month_len {
        cycle_day.get()
    } else {
        match clamp {
            DayClamp::Day28 => 28,
            DayClamp::LastDay => month_len,
        }
    };
    first + Days::new(u64::from(day - 1))
}
