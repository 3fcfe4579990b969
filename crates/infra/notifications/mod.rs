pub mod bark;
pub mod log_only;
