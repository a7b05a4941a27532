pub mod about;
pub mod certifications;
pub mod contact_form;
pub mod education;
pub mod experience;
pub mod footer;
pub mod header;
pub mod hero;
pub mod projects;

use serde::Deserialize;

use crate::content::Profile;
use crate::i18n::Translator;
use crate::ui::page::{RichLine, RichSpan};
use crate::ui::style::StyleRole;

/// Everything a template may read. Templates are pure functions of this;
/// they install nothing and mutate nothing.
pub struct TemplateCtx<'a> {
    pub t: &'a Translator,
    pub profile: &'a Profile,
    /// Wrap target for body text.
    pub width: u16,
    pub compact: bool,
    /// Rotating hero title index.
    pub title_index: usize,
    /// Whether direct contact delivery is configured.
    pub mail_available: bool,
}

// Catalog record shapes (the returnObjects payloads).

#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceItem {
    pub role: String,
    pub company: String,
    pub period: String,
    pub summary: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EducationItem {
    pub degree: String,
    pub school: String,
    pub period: String,
    pub detail: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CertItem {
    pub name: String,
    pub issuer: String,
    pub year: String,
    pub asset: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectItem {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub stack: Vec<String>,
    pub link: String,
}

/// Section heading plus underline rule.
pub(crate) fn heading(ctx: &TemplateCtx, title: &str) -> Vec<RichLine> {
    let rule_width = (title.chars().count() as u16).min(ctx.width).max(3);
    vec![
        RichLine::plain(title.to_string(), StyleRole::Heading),
        RichLine::plain("─".repeat(rule_width as usize), StyleRole::Rule),
    ]
}

/// Wrapped body text, one role.
pub(crate) fn paragraph(ctx: &TemplateCtx, text: &str, role: StyleRole) -> Vec<RichLine> {
    crate::ui::text::wrap(text, ctx.width as usize)
        .into_iter()
        .map(|line| RichLine::plain(line, role))
        .collect()
}

/// Primary/secondary item title. One row when it fits, two when the
/// content width is too tight.
pub(crate) fn title_row(ctx: &TemplateCtx, primary: RichSpan, secondary: RichSpan) -> Vec<RichLine> {
    let combined = primary.width() + 3 + secondary.width();
    if combined <= ctx.width {
        vec![RichLine::from_spans(vec![
            primary,
            RichSpan::new(" · ", StyleRole::Muted),
            secondary,
        ])]
    } else {
        vec![
            RichLine::from_spans(vec![primary]),
            RichLine::from_spans(vec![secondary]),
        ]
    }
}

/// Spans joined with a two-space gap.
pub(crate) fn spaced_row(spans: Vec<RichSpan>) -> RichLine {
    let mut out = Vec::with_capacity(spans.len() * 2);
    for (i, span) in spans.into_iter().enumerate() {
        if i > 0 {
            out.push(RichSpan::new("  ", StyleRole::Text));
        }
        out.push(span);
    }
    RichLine::from_spans(out)
}
