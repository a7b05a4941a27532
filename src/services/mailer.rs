use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::json;

use crate::contact::Submission;

const ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Outbound delivery seam. The session only ever sees this trait, so tests
/// swap in recording doubles.
#[async_trait]
pub trait EmailDelivery: Send + Sync {
    async fn send(&self, submission: &Submission) -> Result<()>;
}

/// EmailJS credentials, all three required.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl MailerConfig {
    /// Read from the environment. Any missing or empty variable means the
    /// delivery capability is absent, not an error.
    pub fn from_env() -> Option<Self> {
        let service_id = non_empty_var("EMAILJS_SERVICE_ID")?;
        let template_id = non_empty_var("EMAILJS_TEMPLATE_ID")?;
        let public_key = non_empty_var("EMAILJS_PUBLIC_KEY")?;
        Some(Self {
            service_id,
            template_id,
            public_key,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

/// EmailJS REST delivery.
pub struct EmailJsMailer {
    http: reqwest::Client,
    config: MailerConfig,
}

impl EmailJsMailer {
    pub fn new(config: MailerConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("termfolio/0.3")
            .build()
            .expect("Failed to build HTTP client");
        Self { http, config }
    }
}

#[async_trait]
impl EmailDelivery for EmailJsMailer {
    async fn send(&self, submission: &Submission) -> Result<()> {
        let body = json!({
            "service_id": self.config.service_id,
            "template_id": self.config.template_id,
            "user_id": self.config.public_key,
            "template_params": submission,
        });

        log::debug!("mailer: dispatching via {}", ENDPOINT);
        let response = self
            .http
            .post(ENDPOINT)
            .json(&body)
            .send()
            .await
            .context("contact delivery request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("contact delivery rejected ({}): {}", status, detail);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_requires_all_three_vars() {
        // One missing var is enough for the capability to be absent.
        std::env::remove_var("EMAILJS_SERVICE_ID");
        assert!(MailerConfig::from_env().is_none());
    }
}
