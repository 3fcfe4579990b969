pub mod axum_http;
pub mod background_worker;
pub mod config;
pub mod usecases;

use crates::{
    domain::repositories::notifications::NotificationSender,
    infra::db::repositories::{
        reminder_logs::ReminderLogPostgres, subscriptions::SubscriptionPostgres,
    },
};
use usecases::reminders::ReminderUseCase;

/// Reminder use case wired to postgres and whichever push channel is configured.
pub type AppReminderUseCase = ReminderUseCase<
    SubscriptionPostgres,
    ReminderLogPostgres,
    dyn NotificationSender + Send + Sync,
>;
