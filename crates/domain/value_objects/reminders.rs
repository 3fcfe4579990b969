use serde::Serialize;

/// Which `days_left` values trigger a reminder, and with what wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderPolicy {
    /// Recurring charges: three days ahead and on the day.
    Renewal,
    /// Fixed expiry: three days ahead, the day before and on the day.
    Expiry,
}

impl ReminderPolicy {
    pub fn thresholds(&self) -> &'static [i64] {
        match self {
            ReminderPolicy::Renewal => &[3, 0],
            ReminderPolicy::Expiry => &[3, 1, 0],
        }
    }

    pub fn should_notify(&self, days_left: i64) -> Option<ReminderTemplate> {
        if !self.thresholds().contains(&days_left) {
            return None;
        }

        let template = match (self, days_left) {
            (ReminderPolicy::Renewal, 0) => ReminderTemplate::RenewsToday,
            (ReminderPolicy::Renewal, days) => ReminderTemplate::RenewsIn(days),
            (ReminderPolicy::Expiry, 0) => ReminderTemplate::ExpiresToday,
            (ReminderPolicy::Expiry, days) => ReminderTemplate::ExpiresIn(days),
        };
        Some(template)
    }
}

/// Title/body pair with `{name}` and `{price}` left for the sender to fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderTemplate {
    RenewsIn(i64),
    RenewsToday,
    ExpiresIn(i64),
    ExpiresToday,
}

impl ReminderTemplate {
    pub fn title_template(&self) -> &'static str {
        match self {
            ReminderTemplate::RenewsIn(_) | ReminderTemplate::RenewsToday => {
                "Renewal reminder: {name}"
            }
            ReminderTemplate::ExpiresIn(_) | ReminderTemplate::ExpiresToday => {
                "Expiry reminder: {name}"
            }
        }
    }

    pub fn body_template(&self) -> &'static str {
        match self {
            ReminderTemplate::RenewsIn(1) => "{name} renews in {days} day for {price}.",
            ReminderTemplate::RenewsIn(_) => "{name} renews in {days} days for {price}.",
            ReminderTemplate::RenewsToday => "{name} renews today for {price}!",
            ReminderTemplate::ExpiresIn(1) => "{name} expires in {days} day.",
            ReminderTemplate::ExpiresIn(_) => "{name} expires in {days} days.",
            ReminderTemplate::ExpiresToday => "{name} expires TODAY! Renew now to keep it.",
        }
    }

    pub fn days_left(&self) -> i64 {
        match self {
            ReminderTemplate::RenewsIn(days) | ReminderTemplate::ExpiresIn(days) => *days,
            ReminderTemplate::RenewsToday | ReminderTemplate::ExpiresToday => 0,
        }
    }

    pub fn render(&self, name: &str, price: f64) -> ReminderMessage {
        let fill = |template: &str| {
            template
                .replace("{days}", &self.days_left().to_string())
                .replace("{price}", &format!("{price:.2}"))
                .replace("{name}", name)
        };

        ReminderMessage {
            title: fill(self.title_template()),
            body: fill(self.body_template()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderMessage {
    pub title: String,
    pub body: String,
}
