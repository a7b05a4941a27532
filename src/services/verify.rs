use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::OnceCell;

/// Optional bot-verification capability. `None` from [`BotVerifier::token`]
/// never blocks a submission; the payload falls back to the sentinel value.
#[async_trait]
pub trait BotVerifier: Send + Sync {
    async fn token(&self) -> Option<String>;

    /// Pre-initialize the capability. Called once when the contact section
    /// first approaches the viewport; the default does nothing.
    async fn warm(&self) {}
}

/// reCAPTCHA-shaped verifier. The provider script is fetched lazily (the
/// load-on-approach analog); the challenge itself needs a browser runtime,
/// so token retrieval degrades to `None` and the payload carries the
/// sentinel. Missing site key means the capability is never constructed.
pub struct RecaptchaGate {
    site_key: String,
    http: reqwest::Client,
    loaded: OnceCell<bool>,
}

impl RecaptchaGate {
    /// `RECAPTCHA_SITE_KEY` absent or empty means no capability.
    pub fn from_env() -> Option<Self> {
        let site_key = match std::env::var("RECAPTCHA_SITE_KEY") {
            Ok(v) if !v.trim().is_empty() => v,
            _ => return None,
        };
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("termfolio/0.3")
            .build()
            .expect("Failed to build HTTP client");
        Some(Self {
            site_key,
            http,
            loaded: OnceCell::new(),
        })
    }

    async fn ensure_loaded(&self) -> bool {
        *self
            .loaded
            .get_or_init(|| async {
                let url = format!(
                    "https://www.google.com/recaptcha/api.js?render={}",
                    self.site_key
                );
                match self.http.get(&url).send().await {
                    Ok(resp) if resp.status().is_success() => {
                        log::debug!("verify: provider script reachable");
                        true
                    }
                    Ok(resp) => {
                        log::warn!("verify: provider script returned {}", resp.status());
                        false
                    }
                    Err(e) => {
                        log::warn!("verify: provider script unreachable: {}", e);
                        false
                    }
                }
            })
            .await
    }
}

#[async_trait]
impl BotVerifier for RecaptchaGate {
    async fn token(&self) -> Option<String> {
        if !self.ensure_loaded().await {
            return None;
        }
        // Executing the challenge requires a browser runtime; a terminal
        // client always proceeds with the sentinel.
        log::debug!("verify: no browser runtime for challenge execution");
        None
    }

    async fn warm(&self) {
        self.ensure_loaded().await;
    }
}

/// Fixed-token verifier for tests and trusted setups.
pub struct StaticVerifier {
    token: String,
}

impl StaticVerifier {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl BotVerifier for StaticVerifier {
    async fn token(&self) -> Option<String> {
        Some(self.token.clone())
    }
}
