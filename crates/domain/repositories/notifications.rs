use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::reminders::ReminderMessage;

/// Outbound push channel. Delivery is best effort; callers log failures and move on.
#[async_trait]
#[automock]
pub trait NotificationSender {
    async fn send(&self, message: ReminderMessage) -> Result<()>;

    fn sender_name(&self) -> &'static str;
}
