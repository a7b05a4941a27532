pub mod rate_limit;
pub mod sanitize;
pub mod validate;

use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::America::Bogota;
use futures::Future;
use serde::Serialize;

use crate::content::RATE_LIMIT_WINDOW;
use crate::services::mailer::EmailDelivery;
use crate::services::verify::BotVerifier;
use rate_limit::RateLimiter;
use validate::FieldErrors;

/// Sent when no verification capability produced a token.
pub const TOKEN_UNAVAILABLE: &str = "not_available";

/// What the user typed, untouched. Sanitization happens on the payload copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// The outgoing mail template parameters.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Submission {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub sent_at: String,
    pub recaptcha_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Lifecycle of the submit control.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPhase {
    Idle,
    /// Submit is inert and shows the busy label. Always exits when the
    /// dispatch future resolves, success or failure.
    Sending,
    Notice {
        kind: NoticeKind,
        text: String,
        /// Rate-limit notices clear themselves once the window elapses.
        expires: Option<Instant>,
    },
}

impl FormPhase {
    pub fn is_sending(&self) -> bool {
        matches!(self, FormPhase::Sending)
    }
}

/// Why a submission did not start.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    Validation(FieldErrors),
    /// Remaining whole seconds of the window.
    RateLimited(u64),
}

pub type DispatchFuture = Pin<Box<dyn Future<Output = Result<Submission>> + Send>>;

/// Submission gatekeeper: validation, rate limiting, payload assembly and
/// handoff to the delivery capability.
pub struct Controller {
    limiter: RateLimiter,
    mailer: Option<Arc<dyn EmailDelivery>>,
    verifier: Option<Arc<dyn BotVerifier>>,
}

impl Controller {
    pub fn new(
        mailer: Option<Arc<dyn EmailDelivery>>,
        verifier: Option<Arc<dyn BotVerifier>>,
    ) -> Self {
        Self::with_window(RATE_LIMIT_WINDOW, mailer, verifier)
    }

    pub fn with_window(
        window: std::time::Duration,
        mailer: Option<Arc<dyn EmailDelivery>>,
        verifier: Option<Arc<dyn BotVerifier>>,
    ) -> Self {
        Self {
            limiter: RateLimiter::new(window),
            mailer,
            verifier,
        }
    }

    /// Whether direct sending is configured at all.
    pub fn available(&self) -> bool {
        self.mailer.is_some()
    }

    /// Pre-flight checks. Validation and rate limiting both run here;
    /// neither consumes the rate-limit window.
    pub fn gate(&self, draft: &Draft, now: Instant) -> std::result::Result<(), Rejection> {
        let errors = validate::validate(&draft.name, &draft.email, &draft.message);
        if !errors.is_clean() {
            return Err(Rejection::Validation(errors));
        }
        self.limiter
            .check(now)
            .map_err(Rejection::RateLimited)
    }

    /// Stamp the rate limiter after a delivered submission.
    pub fn record_success(&mut self, now: Instant) {
        self.limiter.stamp(now);
    }

    /// Build the async dispatch: sanitize the draft, resolve the bot token,
    /// hand the payload to the mailer. The caller polls the returned future
    /// and owns the surrounding `Sending` phase.
    pub fn dispatch(&self, draft: &Draft, now_utc: DateTime<Utc>) -> DispatchFuture {
        let mailer = self.mailer.clone();
        let verifier = self.verifier.clone();
        let from_name = sanitize::escape_html(draft.name.trim());
        let from_email = sanitize::escape_html(draft.email.trim());
        let message = sanitize::escape_html(draft.message.trim());
        let sent_at = bogota_timestamp(now_utc);

        Box::pin(async move {
            let mailer = mailer.context("contact delivery is not configured")?;
            let token = match &verifier {
                Some(v) => v.token().await,
                None => None,
            };
            let submission = Submission {
                from_name,
                from_email,
                message,
                sent_at,
                recaptcha_token: token.unwrap_or_else(|| TOKEN_UNAVAILABLE.to_string()),
            };
            mailer.send(&submission).await?;
            Ok(submission)
        })
    }
}

/// Submission timestamp the way the es-CO audience reads it, pinned to
/// America/Bogota regardless of where the binary runs.
pub fn bogota_timestamp(now_utc: DateTime<Utc>) -> String {
    now_utc
        .with_timezone(&Bogota)
        .format("%-d/%-m/%Y, %H:%M:%S")
        .to_string()
}
