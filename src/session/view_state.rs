use crate::contact::FormPhase;
use crate::ui::page::{ActiveDropdown, FormFieldId, Page};

/// Per-field draft snapshot: text plus caret position.
#[derive(Debug, Clone, Default)]
pub struct FieldSnapshot {
    pub value: String,
    pub cursor: usize,
}

/// The transient state a rebuild would otherwise destroy.
///
/// Captured before the compositor replaces the page and restored onto the
/// fresh one. Validation errors are deliberately absent: a rebuild clears
/// them, and resubmitting re-derives them in the new language anyway.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub scroll: u16,
    pub menu_open: bool,
    pub dropdown: ActiveDropdown,
    pub name: FieldSnapshot,
    pub email: FieldSnapshot,
    pub message: FieldSnapshot,
    pub focus: Option<FormFieldId>,
    pub phase: FormPhase,
}

impl ViewState {
    pub fn capture(page: &Page) -> Self {
        Self {
            scroll: page.scroll,
            menu_open: page.menu_open,
            dropdown: page.dropdown,
            name: snapshot_field(page, FormFieldId::Name),
            email: snapshot_field(page, FormFieldId::Email),
            message: snapshot_field(page, FormFieldId::Message),
            focus: page.form.focus,
            phase: page.form.phase.clone(),
        }
    }

    /// Applies the snapshot to a freshly composed page. Scroll is restored
    /// verbatim; the caller clamps it once the viewport height is known.
    /// Overlay kinds are remapped when the width class changed underneath
    /// them, so a resize mid-selection keeps the switcher open in whichever
    /// form the new layout uses.
    pub fn restore(self, page: &mut Page) {
        page.scroll = self.scroll;
        page.menu_open = self.menu_open && page.compact;
        page.dropdown = match self.dropdown {
            ActiveDropdown::None => ActiveDropdown::None,
            _ if page.compact => ActiveDropdown::Sheet,
            _ => ActiveDropdown::HeaderLang,
        };

        restore_field(page, FormFieldId::Name, &self.name);
        restore_field(page, FormFieldId::Email, &self.email);
        restore_field(page, FormFieldId::Message, &self.message);
        page.form.focus = self.focus;
        page.form.phase = self.phase;
    }
}

fn snapshot_field(page: &Page, id: FormFieldId) -> FieldSnapshot {
    let field = page.form.field(id);
    FieldSnapshot {
        value: field.value.clone(),
        cursor: field.state.cursor(),
    }
}

fn restore_field(page: &mut Page, id: FormFieldId, snapshot: &FieldSnapshot) {
    page.form
        .field_mut(id)
        .restore(snapshot.value.clone(), snapshot.cursor);
}
