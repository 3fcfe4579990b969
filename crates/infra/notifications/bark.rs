use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::domain::{
    repositories::notifications::NotificationSender, value_objects::reminders::ReminderMessage,
};

pub const DEFAULT_BARK_BASE_URL: &str = "https://api.day.app";

#[derive(Debug, Clone)]
pub struct BarkConfig {
    pub base_url: Url,
    pub device_key: String,
    /// Optional Bark notification group shown on the device.
    pub group: Option<String>,
}

/// Pushes reminders through a Bark server: `GET {base}/{key}/{title}/{body}`.
pub struct BarkNotificationSender {
    config: BarkConfig,
    client: Client,
}

impl BarkNotificationSender {
    pub fn new(config: BarkConfig) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(5)).build()?;

        Ok(Self { config, client })
    }

    fn push_url(&self, message: &ReminderMessage) -> Result<Url> {
        build_push_url(&self.config, message)
    }
}

pub(crate) fn build_push_url(config: &BarkConfig, message: &ReminderMessage) -> Result<Url> {
    let mut url = config.base_url.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow!("bark base url cannot carry a path"))?
        .pop_if_empty()
        .push(&config.device_key)
        .push(&message.title)
        .push(&message.body);

    if let Some(group) = config.group.as_deref().filter(|g| !g.is_empty()) {
        url.query_pairs_mut().append_pair("group", group);
    }

    Ok(url)
}

#[async_trait]
impl NotificationSender for BarkNotificationSender {
    async fn send(&self, message: ReminderMessage) -> Result<()> {
        let url = self.push_url(&message)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(sanitize_reqwest_error)?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(anyhow!(
            "bark push returned non-success status: {}",
            response.status()
        ))
    }

    fn sender_name(&self) -> &'static str {
        "bark"
    }
}

// The device key sits in the URL path, so reqwest errors (which embed the URL) are never forwarded.
fn sanitize_reqwest_error(error: reqwest::Error) -> anyhow::Error {
    if error.is_timeout() {
        return anyhow!("bark push request timed out");
    }
    if error.is_connect() {
        return anyhow!("bark push connection failed");
    }
    anyhow!("bark push request failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base: &str, group: Option<&str>) -> BarkConfig {
        BarkConfig {
            base_url: Url::parse(base).unwrap(),
            device_key: "devkey".to_string(),
            group: group.map(str::to_string),
        }
    }

    fn message(title: &str, body: &str) -> ReminderMessage {
        ReminderMessage {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn segments_are_percent_encoded() {
        let url = build_push_url(
            &config(DEFAULT_BARK_BASE_URL, None),
            &message("Renewal reminder: A/B", "A/B renews today for 3.00!"),
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.day.app/devkey/Renewal%20reminder:%20A%2FB/A%2FB%20renews%20today%20for%203.00!"
        );
    }

    #[test]
    fn self_hosted_base_path_is_kept() {
        let url = build_push_url(
            &config("https://push.example.com/bark/", Some("subs")),
            &message("t", "b"),
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://push.example.com/bark/devkey/t/b?group=subs"
        );
    }

    #[test]
    fn non_ascii_text_survives_encoding() {
        let url = build_push_url(
            &config(DEFAULT_BARK_BASE_URL, None),
            &message("订阅续费提醒", "今天扣款"),
        )
        .unwrap();

        let segments: Vec<String> = url
            .path_segments()
            .unwrap()
            .map(|s| {
                url::form_urlencoded::parse(format!("x={s}").as_bytes())
                    .next()
                    .unwrap()
                    .1
                    .into_owned()
            })
            .collect();
        assert_eq!(segments, vec!["devkey", "订阅续费提醒", "今天扣款"]);
    }

    #[tokio::test]
    async fn failed_push_does_not_leak_device_key() {
        // Nothing listens on port 1, so the connection is refused.
        let sender =
            BarkNotificationSender::new(config("http://127.0.0.1:1", None)).unwrap();

        let err = sender.send(message("t", "b")).await.unwrap_err();

        assert!(!err.to_string().contains("devkey"));
        assert_eq!(sender.sender_name(), "bark");
    }
}
