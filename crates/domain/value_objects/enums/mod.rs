pub mod billing_kinds;
pub mod day_clamps;
