use once_cell::sync::Lazy;
use regex::Regex;

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 254;
pub const MESSAGE_MIN: usize = 10;
pub const MESSAGE_MAX: usize = 1000;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Per-field validation results as catalog keys, resolved to localized text
/// at display time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_clean(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

/// Validate all three fields independently; every failing field reports,
/// not just the first.
pub fn validate(name: &str, email: &str, message: &str) -> FieldErrors {
    FieldErrors {
        name: check_name(name),
        email: check_email(email),
        message: check_message(message),
    }
}

fn check_name(name: &str) -> Option<&'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Some("contact.form.errors.nameRequired");
    }
    let len = trimmed.chars().count();
    if len < NAME_MIN || len > NAME_MAX {
        return Some("contact.form.errors.nameLength");
    }
    None
}

fn check_email(email: &str) -> Option<&'static str> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("contact.form.errors.emailRequired");
    }
    if trimmed.chars().count() > EMAIL_MAX || !EMAIL_RE.is_match(trimmed) {
        return Some("contact.form.errors.emailInvalid");
    }
    None
}

fn check_message(message: &str) -> Option<&'static str> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Some("contact.form.errors.messageRequired");
    }
    let len = trimmed.chars().count();
    if len < MESSAGE_MIN || len > MESSAGE_MAX {
        return Some("contact.form.errors.messageLength");
    }
    None
}
