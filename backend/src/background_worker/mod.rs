pub mod reminder_worker;
