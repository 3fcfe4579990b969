use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::reminder_logs;

/// Marker that a subscription was reminded on a given day; `created_at` is filled by the database.
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = reminder_logs)]
pub struct InsertReminderLogEntity {
    pub subscription_id: Uuid,
    pub notified_on: NaiveDate,
    pub days_left: i32,
}
