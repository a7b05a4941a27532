use ratatui::style::{Modifier, Style};

use crate::theme::Theme;

/// Semantic styling carried by composed spans. Concrete colors are resolved
/// against the active palette at draw time, which is what lets a theme
/// change repaint without recomposing the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleRole {
    Brand,
    Nav,
    NavActive,
    Title,    // hero name
    Subtitle, // rotating hero title
    Heading,  // section headings
    Strong,
    Text,
    Muted,
    Badge, // periods, skill tags, stacks
    Link,
    Rule,
    Label,
    Input,
    InputFocused,
    Placeholder,
    ErrorText,
    SuccessText,
    WarnText,
    Button,
    ButtonBusy,
    Hint,
}

pub fn resolve(role: StyleRole, theme: &Theme) -> Style {
    match role {
        StyleRole::Brand => Style::default()
            .fg(theme.accent_primary)
            .add_modifier(Modifier::BOLD),
        StyleRole::Nav => Style::default().fg(theme.text_secondary),
        StyleRole::NavActive => Style::default()
            .fg(theme.accent_primary)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        StyleRole::Title => Style::default()
            .fg(theme.accent_primary)
            .add_modifier(Modifier::BOLD),
        StyleRole::Subtitle => Style::default().fg(theme.accent_secondary),
        StyleRole::Heading => Style::default()
            .fg(theme.accent_tertiary)
            .add_modifier(Modifier::BOLD),
        StyleRole::Strong => Style::default()
            .fg(theme.text_primary)
            .add_modifier(Modifier::BOLD),
        StyleRole::Text => Style::default().fg(theme.text_primary),
        StyleRole::Muted => Style::default().fg(theme.text_tertiary),
        StyleRole::Badge => Style::default().fg(theme.accent_muted),
        StyleRole::Link => Style::default()
            .fg(theme.accent_secondary)
            .add_modifier(Modifier::UNDERLINED),
        StyleRole::Rule => Style::default().fg(theme.border_secondary),
        StyleRole::Label => Style::default().fg(theme.text_tertiary),
        StyleRole::Input => Style::default().fg(theme.text_primary).bg(theme.bg_surface),
        StyleRole::InputFocused => Style::default()
            .fg(theme.text_primary)
            .bg(theme.bg_elevated),
        StyleRole::Placeholder => Style::default()
            .fg(theme.text_tertiary)
            .bg(theme.bg_surface),
        StyleRole::ErrorText => Style::default().fg(theme.accent_error),
        StyleRole::SuccessText => Style::default().fg(theme.accent_success),
        StyleRole::WarnText => Style::default().fg(theme.accent_warning),
        StyleRole::Button => Style::default()
            .fg(theme.accent_primary)
            .bg(theme.bg_surface)
            .add_modifier(Modifier::BOLD),
        StyleRole::ButtonBusy => Style::default().fg(theme.text_tertiary).bg(theme.bg_surface),
        StyleRole::Hint => Style::default().fg(theme.text_tertiary),
    }
}
