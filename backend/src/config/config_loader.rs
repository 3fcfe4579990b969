use anyhow::{Context, Result, anyhow};
use chrono::NaiveTime;
use crates::{
    domain::value_objects::enums::day_clamps::DayClamp,
    infra::notifications::bark::{BarkConfig, DEFAULT_BARK_BASE_URL},
};
use std::str::FromStr;
use url::Url;

use super::config_model::{BackendServer, Database, DotEnvyConfig, Reminder, StaticFiles};

const DEFAULT_REMINDER_TIME: &str = "09:00";

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = BackendServer {
        port: env_parse("SERVER_PORT", 8000)?,
        body_limit: env_parse("SERVER_BODY_LIMIT", 1)?,
        timeout: env_parse("SERVER_TIMEOUT", 30)?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").context("DATABASE_URL is invalid")?,
        max_connections: env_parse("DATABASE_MAX_CONNECTIONS", 5)?,
    };

    let static_files = StaticFiles {
        index_path: env_string("STATIC_INDEX_PATH").unwrap_or_else(|| "index.html".to_string()),
    };

    let bark = match env_string("BARK_KEY") {
        Some(device_key) => {
            let raw_base = env_string("BARK_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BARK_BASE_URL.to_string());
            let base_url = Url::parse(&raw_base).context("BARK_BASE_URL is invalid")?;
            Some(BarkConfig {
                base_url,
                device_key,
                group: env_string("BARK_GROUP"),
            })
        }
        None => None,
    };

    let reminder = Reminder {
        run_at: parse_run_at(
            &env_string("REMINDER_TIME").unwrap_or_else(|| DEFAULT_REMINDER_TIME.to_string()),
        )?,
        day_clamp: match env_string("DAY_CLAMP") {
            Some(raw) => DayClamp::from_str(&raw)
                .ok_or_else(|| anyhow!("DAY_CLAMP is invalid: {raw} (expected day28 or last_day)"))?,
            None => DayClamp::default(),
        },
    };

    Ok(DotEnvyConfig {
        backend_server,
        database,
        static_files,
        bark,
        reminder,
    })
}

pub fn parse_run_at(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .with_context(|| format!("REMINDER_TIME is invalid: {raw} (expected HH:MM)"))
}

/// Unset or blank variables read as `None`.
fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env_string(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} is invalid: {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_at_accepts_hours_and_minutes() {
        assert_eq!(
            parse_run_at("09:00").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            parse_run_at(" 21:45 ").unwrap(),
            NaiveTime::from_hms_opt(21, 45, 0).unwrap()
        );
    }

    #[test]
    fn run_at_rejects_garbage() {
        for raw in ["9am", "25:00", "", "09:00:00"] {
            let err = parse_run_at(raw).unwrap_err().to_string();
            assert!(err.contains("REMINDER_TIME is invalid"), "got: {err}");
        }
    }
}
