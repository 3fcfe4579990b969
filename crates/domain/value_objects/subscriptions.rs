use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::{
        InsertSubscriptionEntity, ReplaceSubscriptionEntity, SubscriptionEntity,
    },
    value_objects::{
        billing_specs::{BillingSpec, BillingSpecError, EXPIRE_DATE_FORMAT},
        due_dates::DueDate,
        enums::billing_kinds::BillingKind,
    },
};

/// Subscriptions due within this many days count as upcoming in the listing summary.
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubscriptionInputError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("color must not be empty")]
    EmptyColor,
    #[error("invalid price {0}: must be a non-negative amount")]
    InvalidPrice(f64),
    #[error(transparent)]
    Billing(#[from] BillingSpecError),
}

/// Body of add and replace requests. Exactly one of `cycle_day` / `expire_date` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertSubscriptionModel {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub cycle_day: Option<i32>,
    #[serde(default)]
    pub expire_date: Option<String>,
}

fn default_color() -> String {
    "blue".to_string()
}

impl InsertSubscriptionModel {
    pub fn validate(self) -> Result<SubscriptionDraft, SubscriptionInputError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(SubscriptionInputError::EmptyName);
        }
        let color = self.color.trim().to_string();
        if color.is_empty() {
            return Err(SubscriptionInputError::EmptyColor);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(SubscriptionInputError::InvalidPrice(self.price));
        }
        let billing_spec = BillingSpec::from_parts(self.cycle_day, self.expire_date.as_deref())?;

        Ok(SubscriptionDraft {
            name,
            price: self.price,
            category: self.category.trim().to_string(),
            color,
            billing_spec,
        })
    }
}

/// Intake that passed validation and is ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionDraft {
    pub name: String,
    pub price: f64,
    pub category: String,
    pub color: String,
    pub billing_spec: BillingSpec,
}

impl SubscriptionDraft {
    pub fn to_insert_entity(&self) -> InsertSubscriptionEntity {
        InsertSubscriptionEntity {
            name: self.name.clone(),
            price: self.price,
            category: self.category.clone(),
            color: self.color.clone(),
            billing_kind: self.billing_spec.kind().to_string(),
            cycle_day: self.billing_spec.cycle_day().map(|day| day.get() as i32),
            expire_date: self.billing_spec.expire_date(),
        }
    }

    pub fn to_replace_entity(&self, updated_at: DateTime<Utc>) -> ReplaceSubscriptionEntity {
        ReplaceSubscriptionEntity {
            name: self.name.clone(),
            price: self.price,
            category: self.category.clone(),
            color: self.color.clone(),
            cycle_day: self.billing_spec.cycle_day().map(|day| day.get() as i32),
            expire_date: self.billing_spec.expire_date(),
            updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionDto {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub color: String,
    pub billing_kind: BillingKind,
    pub cycle_day: Option<u32>,
    pub expire_date: Option<NaiveDate>,
    pub due_date: String,
    pub days_left: i64,
}

impl SubscriptionDto {
    pub fn new(entity: SubscriptionEntity, billing_spec: &BillingSpec, due: DueDate) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            price: entity.price,
            category: entity.category,
            color: entity.color,
            billing_kind: billing_spec.kind(),
            cycle_day: billing_spec.cycle_day().map(|day| day.get()),
            expire_date: billing_spec.expire_date(),
            due_date: due.due_date.format(EXPIRE_DATE_FORMAT).to_string(),
            days_left: due.days_left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionSummaryDto {
    pub total_cost: f64,
    /// Sum over recurring subscriptions only.
    pub monthly_total: f64,
    pub yearly_total: f64,
    pub upcoming_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionListDto {
    pub today: NaiveDate,
    pub subscriptions: Vec<SubscriptionDto>,
    pub summary: SubscriptionSummaryDto,
}

impl SubscriptionListDto {
    /// Sorts by `days_left` (stable, so ties keep storage order) and aggregates the summary.
    pub fn new(today: NaiveDate, mut subscriptions: Vec<SubscriptionDto>) -> Self {
        subscriptions.sort_by_key(|sub| sub.days_left);

        let total_cost: f64 = subscriptions.iter().map(|sub| sub.price).sum();
        let monthly_total: f64 = subscriptions
            .iter()
            .filter(|sub| sub.billing_kind == BillingKind::RecurringDayOfMonth)
            .map(|sub| sub.price)
            .sum();
        let upcoming_count = subscriptions
            .iter()
            .filter(|sub| sub.days_left <= UPCOMING_WINDOW_DAYS)
            .count();

        Self {
            today,
            subscriptions,
            summary: SubscriptionSummaryDto {
                total_cost,
                monthly_total,
                yearly_total: monthly_total * 12.0,
                upcoming_count,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionCreatedDto {
    pub status: String,
    pub id: Uuid,
}
