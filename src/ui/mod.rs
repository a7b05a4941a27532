pub mod compositor;
pub mod page;
pub mod sections;
pub mod style;
pub mod text;

use crate::content::SectionId;
use crate::i18n::Locale;
use page::FormFieldId;

/// The interaction vocabulary. Composed spans carry these as markers; the
/// session routes every click through one dispatch table keyed on them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ToggleTheme,
    /// Header switcher: dropdown on wide layouts, bottom sheet on compact.
    ToggleLangMenu,
    SelectLanguage(Locale),
    ToggleMenu,
    Jump(SectionId),
    ScrollTop,
    /// Certification index into the catalog records.
    OpenModal(usize),
    CloseModal,
    OpenEmail,
    CopyEmail,
    OpenLink(String),
    FocusField(FormFieldId),
    Submit,
}
