use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    domain::value_objects::{
        billing_specs::{BillingSpec, BillingSpecError, CycleDay},
        enums::billing_kinds::BillingKind,
    },
    infra::db::postgres::schema::subscriptions,
};

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = subscriptions)]
pub struct SubscriptionEntity {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub color: String,
    pub billing_kind: String,
    pub cycle_day: Option<i32>,
    pub expire_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubscriptionEntity {
    /// Decodes the stored billing columns back into a spec.
    pub fn billing_spec(&self) -> Result<BillingSpec, BillingSpecError> {
        match BillingKind::from_str(&self.billing_kind) {
            Some(BillingKind::RecurringDayOfMonth) => {
                let day = self.cycle_day.ok_or(BillingSpecError::Missing)?;
                Ok(BillingSpec::RecurringDayOfMonth {
                    cycle_day: CycleDay::new(day)?,
                })
            }
            Some(BillingKind::FixedExpiryDate) => {
                let expire_date = self.expire_date.ok_or(BillingSpecError::Missing)?;
                Ok(BillingSpec::FixedExpiryDate { expire_date })
            }
            None => Err(BillingSpecError::UnknownKind(self.billing_kind.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = subscriptions)]
pub struct InsertSubscriptionEntity {
    pub name: String,
    pub price: f64,
    pub category: String,
    pub color: String,
    pub billing_kind: String,
    pub cycle_day: Option<i32>,
    pub expire_date: Option<NaiveDate>,
}

/// Full replacement of the editable columns. `billing_kind` never changes after insert.
#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = subscriptions, treat_none_as_null = true)]
pub struct ReplaceSubscriptionEntity {
    pub name: String,
    pub price: f64,
    pub category: String,
    pub color: String,
    pub cycle_day: Option<i32>,
    pub expire_date: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(kind: &str, cycle_day: Option<i32>, expire_date: Option<NaiveDate>) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id: Uuid::new_v4(),
            name: "Spotify".to_string(),
            price: 11.99,
            category: "music".to_string(),
            color: "green".to_string(),
            billing_kind: kind.to_string(),
            cycle_day,
            expire_date,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn decodes_both_billing_kinds() {
        let spec = row("recurring_day_of_month", Some(12), None)
            .billing_spec()
            .unwrap();
        assert_eq!(spec.cycle_day().map(CycleDay::get), Some(12));

        let expire = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let spec = row("fixed_expiry_date", None, Some(expire))
            .billing_spec()
            .unwrap();
        assert_eq!(spec.expire_date(), Some(expire));
    }

    #[test]
    fn rejects_inconsistent_rows() {
        assert_eq!(
            row("recurring_day_of_month", None, None).billing_spec(),
            Err(BillingSpecError::Missing)
        );
        assert_eq!(
            row("recurring_day_of_month", Some(0), None).billing_spec(),
            Err(BillingSpecError::InvalidCycleDay(0))
        );
        assert_eq!(
            row("weekly", Some(3), None).billing_spec(),
            Err(BillingSpecError::UnknownKind("weekly".to_string()))
        );
    }
}
