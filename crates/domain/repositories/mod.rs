pub mod notifications;
pub mod reminder_logs;
pub mod subscriptions;
