use chrono::NaiveTime;
use crates::{
    domain::value_objects::enums::day_clamps::DayClamp, infra::notifications::bark::BarkConfig,
};

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub backend_server: BackendServer,
    pub database: Database,
    pub static_files: StaticFiles,
    /// `None` when `BARK_KEY` is unset; reminders are then only logged.
    pub bark: Option<BarkConfig>,
    pub reminder: Reminder,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct StaticFiles {
    pub index_path: String,
}

#[derive(Debug, Clone)]
pub struct Reminder {
    /// Local wall-clock time of the daily check.
    pub run_at: NaiveTime,
    pub day_clamp: DayClamp,
}
