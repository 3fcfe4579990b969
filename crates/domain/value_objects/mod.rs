pub mod billing_specs;
pub mod due_dates;
pub mod enums;
pub mod reminders;
pub mod subscriptions;
