use crate::contact::{Draft, FormPhase};
use crate::content::SectionId;
use crate::i18n::Locale;
use crate::widgets::InputField;

use super::style::StyleRole;
use super::Action;

/// One styled run of text, optionally carrying an interaction marker.
#[derive(Debug, Clone)]
pub struct RichSpan {
    pub text: String,
    pub role: StyleRole,
    pub action: Option<Action>,
}

impl RichSpan {
    pub fn new(text: impl Into<String>, role: StyleRole) -> Self {
        Self {
            text: text.into(),
            role,
            action: None,
        }
    }

    pub fn action(text: impl Into<String>, role: StyleRole, action: Action) -> Self {
        Self {
            text: text.into(),
            role,
            action: Some(action),
        }
    }

    pub fn width(&self) -> u16 {
        self.text.chars().count() as u16
    }
}

/// Placeholder positions the draw pass fills from live state instead of the
/// composed spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Rotating hero title: redrawn from the live rotation index so the
    /// carousel ticks without a rebuild.
    HeroTitle,
    Field(FormFieldId),
    FieldError(FormFieldId),
    Submit,
    FormStatus,
}

#[derive(Debug, Clone, Default)]
pub struct RichLine {
    pub spans: Vec<RichSpan>,
    pub slot: Option<Slot>,
}

impl RichLine {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn plain(text: impl Into<String>, role: StyleRole) -> Self {
        Self {
            spans: vec![RichSpan::new(text, role)],
            slot: None,
        }
    }

    pub fn from_spans(spans: Vec<RichSpan>) -> Self {
        Self { spans, slot: None }
    }

    pub fn slot(slot: Slot, spans: Vec<RichSpan>) -> Self {
        Self {
            spans,
            slot: Some(slot),
        }
    }

    /// Concatenated plain text (tests, logging).
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn width(&self) -> u16 {
        self.spans.iter().map(|s| s.width()).sum()
    }
}

/// A section's extent in the page line buffer.
#[derive(Debug, Clone, Copy)]
pub struct SectionBlock {
    pub id: SectionId,
    pub start: u16,
    pub len: u16,
}

impl SectionBlock {
    pub fn end(&self) -> u16 {
        self.start + self.len
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDropdown {
    #[default]
    None,
    /// Anchored under the header switcher (wide layout).
    HeaderLang,
    /// Bottom sheet (compact layout).
    Sheet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFieldId {
    Name,
    Email,
    Message,
}

impl FormFieldId {
    pub const ALL: [FormFieldId; 3] = [FormFieldId::Name, FormFieldId::Email, FormFieldId::Message];

    pub fn next(self) -> Self {
        match self {
            FormFieldId::Name => FormFieldId::Email,
            FormFieldId::Email => FormFieldId::Message,
            FormFieldId::Message => FormFieldId::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormFieldId::Name => FormFieldId::Message,
            FormFieldId::Email => FormFieldId::Name,
            FormFieldId::Message => FormFieldId::Email,
        }
    }
}

/// Localized validation errors as shown under the fields. Cleared by a
/// rebuild (they are not part of the restored view state).
#[derive(Debug, Clone, Default)]
pub struct FieldErrorTexts {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl FieldErrorTexts {
    pub fn get(&self, id: FormFieldId) -> Option<&str> {
        match id {
            FormFieldId::Name => self.name.as_deref(),
            FormFieldId::Email => self.email.as_deref(),
            FormFieldId::Message => self.message.as_deref(),
        }
    }
}

/// Submit-control labels, resolved at compose time so they are always in
/// the active language.
#[derive(Debug, Clone, Default)]
pub struct FormLabels {
    pub submit: String,
    pub sending: String,
    pub unavailable: String,
}

/// Live form state. Lives in the page (not the session) because it is part
/// of what a rebuild destroys and the view-state snapshot preserves.
#[derive(Debug, Clone)]
pub struct ContactFormState {
    pub name: InputField,
    pub email: InputField,
    pub message: InputField,
    pub errors: FieldErrorTexts,
    pub phase: FormPhase,
    pub focus: Option<FormFieldId>,
    pub labels: FormLabels,
}

impl ContactFormState {
    pub fn new(labels: FormLabels) -> Self {
        Self {
            name: InputField::default(),
            email: InputField::default(),
            message: InputField::default(),
            errors: FieldErrorTexts::default(),
            phase: FormPhase::Idle,
            focus: None,
            labels,
        }
    }

    pub fn field(&self, id: FormFieldId) -> &InputField {
        match id {
            FormFieldId::Name => &self.name,
            FormFieldId::Email => &self.email,
            FormFieldId::Message => &self.message,
        }
    }

    pub fn field_mut(&mut self, id: FormFieldId) -> &mut InputField {
        match id {
            FormFieldId::Name => &mut self.name,
            FormFieldId::Email => &mut self.email,
            FormFieldId::Message => &mut self.message,
        }
    }

    pub fn draft(&self) -> Draft {
        Draft {
            name: self.name.value.clone(),
            email: self.email.value.clone(),
            message: self.message.value.clone(),
        }
    }

    pub fn clear_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }
}

/// Header chrome contents. The theme toggle's icon is intentionally not
/// here: it derives from the live mode at draw time, which is the targeted
/// update a theme change makes.
#[derive(Debug, Clone)]
pub struct HeaderModel {
    pub brand: String,
    pub nav: Vec<(SectionId, String)>,
    pub lang_tag: &'static str,
}

/// Language switcher contents (dropdown and sheet share it).
#[derive(Debug, Clone)]
pub struct LangMenu {
    pub title: String,
    pub options: [(Locale, &'static str); 3],
}

#[derive(Debug, Clone)]
pub struct MenuEntry {
    pub action: Action,
    pub label: String,
}

/// Compact-layout menu contents.
#[derive(Debug, Clone)]
pub struct MenuModel {
    pub title: String,
    pub entries: Vec<MenuEntry>,
}

/// The retained view tree: everything the compositor produces, plus the
/// transient state that rides along with it (scroll, open overlays, form).
/// A rebuild replaces the whole thing; `ViewState` carries the transient
/// parts across.
pub struct Page {
    pub lines: Vec<RichLine>,
    pub sections: Vec<SectionBlock>,
    pub header: HeaderModel,
    pub lang_menu: LangMenu,
    pub menu: MenuModel,
    pub form: ContactFormState,
    pub active_locale: Locale,
    pub built_width: u16,
    pub compact: bool,

    pub scroll: u16,
    pub menu_open: bool,
    pub dropdown: ActiveDropdown,
}

impl Page {
    pub fn height(&self) -> u16 {
        self.lines.len() as u16
    }

    pub fn anchor(&self, id: SectionId) -> Option<u16> {
        self.sections
            .iter()
            .find(|b| b.id == id)
            .map(|b| b.start)
    }

    pub fn max_scroll(&self, viewport_h: u16) -> u16 {
        self.height().saturating_sub(viewport_h)
    }

    pub fn clamp_scroll(&mut self, viewport_h: u16) {
        self.scroll = self.scroll.min(self.max_scroll(viewport_h));
    }

    /// An open overlay locks page scrolling (the body-scroll-lock analog).
    pub fn overlay_open(&self) -> bool {
        self.menu_open || self.dropdown != ActiveDropdown::None
    }

    /// Line index of a slot, if composed.
    pub fn slot_line(&self, slot: Slot) -> Option<u16> {
        self.lines
            .iter()
            .position(|l| l.slot == Some(slot))
            .map(|i| i as u16)
    }
}
