use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::reminder_logs::InsertReminderLogEntity;

#[async_trait]
#[automock]
pub trait ReminderLogRepository {
    /// Records the reminder unless one already exists for the same subscription and day.
    /// Returns `true` only for the caller that created the marker.
    async fn claim_reminder(&self, insert_reminder_log_entity: InsertReminderLogEntity)
    -> Result<bool>;
}
