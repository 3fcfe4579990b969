use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// How a recurring `cycle_day` that does not exist in a month is pulled back
/// into that month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DayClamp {
    /// Any overflow lands on the 28th, even in months with 29 or 30 days.
    #[default]
    Day28,
    /// Overflow lands on the real last day of the month.
    LastDay,
}

impl DayClamp {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayClamp::Day28 => "day28",
            DayClamp::LastDay => "last_day",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day28" | "28" => Some(DayClamp::Day28),
            "last_day" | "last" => Some(DayClamp::LastDay),
            _ => None,
        }
    }
}

impl Display for DayClamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_config_spellings() {
        assert_eq!(DayClamp::from_str("day28"), Some(DayClamp::Day28));
        assert_eq!(DayClamp::from_str(" LAST_DAY "), Some(DayClamp::LastDay));
        assert_eq!(DayClamp::from_str("last"), Some(DayClamp::LastDay));
        assert_eq!(DayClamp::from_str("29"), None);
    }
}
