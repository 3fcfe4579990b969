use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::domain::{
    repositories::notifications::NotificationSender, value_objects::reminders::ReminderMessage,
};

/// Used when no push channel is configured: the reminder only shows up in the logs.
#[derive(Debug, Default)]
pub struct LogOnlyNotificationSender;

#[async_trait]
impl NotificationSender for LogOnlyNotificationSender {
    async fn send(&self, message: ReminderMessage) -> Result<()> {
        info!(
            title = %message.title,
            body = %message.body,
            "notifications: push channel not configured; reminder logged only"
        );
        Ok(())
    }

    fn sender_name(&self) -> &'static str {
        "log_only"
    }
}
