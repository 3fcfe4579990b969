use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Discriminant of a [`BillingSpec`](crate::domain::value_objects::billing_specs::BillingSpec),
/// stored in the `billing_kind` column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BillingKind {
    RecurringDayOfMonth,
    FixedExpiryDate,
}

impl BillingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingKind::RecurringDayOfMonth => "recurring_day_of_month",
            BillingKind::FixedExpiryDate => "fixed_expiry_date",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "recurring_day_of_month" => Some(BillingKind::RecurringDayOfMonth),
            "fixed_expiry_date" => Some(BillingKind::FixedExpiryDate),
            _ => None,
        }
    }
}

impl Display for BillingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
