pub mod reminders;
pub mod subscriptions;
