use ratatui::layout::Rect;

use crate::content::{SectionId, DRAG_UNITS_PER_ROW};
use crate::i18n::Locale;
use crate::ui::page::{ActiveDropdown, FormFieldId, Page, Slot};
use crate::ui::Action;

use super::registry::HitRegistry;

pub const HAMBURGER: &str = "[≡]";
pub const SHEET_HANDLE: &str = "· · ·";

pub fn switcher_text(tag: &str) -> String {
    format!("[{} ▾]", tag)
}

pub fn theme_text(icon: &str) -> String {
    format!("[{}]", icon)
}

/// Resolved certification-modal content. Built by the session from the
/// active catalog every frame the modal is open, so a language change
/// relocalizes it without any modal-specific handling.
#[derive(Debug, Clone)]
pub struct ModalContent {
    pub title: String,
    pub name: String,
    pub issuer: String,
    pub year: String,
    pub asset: String,
    pub hint: String,
    pub close: String,
}

/// A bordered overlay plus the language rows inside it.
#[derive(Debug, Clone)]
pub struct PanelLayout {
    pub panel: Rect,
    pub options: Vec<(Locale, Rect)>,
}

/// Compact-layout menu panel. `entries` parallels `page.menu.entries`.
#[derive(Debug, Clone)]
pub struct MenuLayout {
    pub panel: Rect,
    pub entries: Vec<Rect>,
}

#[derive(Debug, Clone)]
pub struct ModalLayout {
    pub panel: Rect,
    pub close: Rect,
}

/// Frame geometry: where everything goes this frame.
///
/// Computed fresh before every bind pass from the page and the terminal
/// area, so the hit regions and the painted chrome can never disagree.
#[derive(Debug, Clone)]
pub struct Layout {
    pub header: Rect,
    pub rule: Rect,
    pub body: Rect,
    pub status: Rect,
    /// Left edge of the centered content column.
    pub content_x: u16,

    pub brand: Rect,
    pub nav: Vec<(SectionId, Rect)>,
    pub switcher: Option<Rect>,
    pub theme_btn: Rect,
    pub hamburger: Option<Rect>,

    pub dropdown: Option<PanelLayout>,
    pub sheet: Option<PanelLayout>,
    pub menu: Option<MenuLayout>,
    pub modal: Option<ModalLayout>,
    pub scroll_top: Option<Rect>,
}

impl Layout {
    pub fn compute(
        page: &Page,
        area: Rect,
        modal: Option<&ModalContent>,
        sheet_offset_rows: u16,
        scroll_top_label: &str,
    ) -> Layout {
        let header = Rect::new(area.x, area.y, area.width, 1.min(area.height));
        let rule = Rect::new(area.x, area.y + 1, area.width, u16::from(area.height > 1));
        let body_h = area.height.saturating_sub(3);
        let body = Rect::new(area.x, area.y + 2, area.width, body_h);
        let status = Rect::new(
            area.x,
            area.y + area.height.saturating_sub(1),
            area.width,
            u16::from(area.height > 2),
        );
        let content_x = area.x + area.width.saturating_sub(page.built_width) / 2;

        let brand_w = (page.header.brand.chars().count() as u16).min(area.width.saturating_sub(2));
        let brand = Rect::new(area.x + 1, header.y, brand_w, header.height);

        // Right-side controls, laid out from the right edge inward.
        let mut cursor = area.x + area.width.saturating_sub(1);
        let mut take = |width: u16, gap: u16| -> Rect {
            cursor = cursor.saturating_sub(width);
            let rect = Rect::new(cursor, header.y, width, header.height);
            cursor = cursor.saturating_sub(gap);
            rect
        };

        let mut nav = Vec::new();
        let mut switcher = None;
        let mut hamburger = None;
        let theme_btn;
        if page.compact {
            hamburger = Some(take(HAMBURGER.chars().count() as u16, 1));
            theme_btn = take(3, 1);
        } else {
            theme_btn = take(3, 2);
            let switcher_w = switcher_text(page.header.lang_tag).chars().count() as u16;
            switcher = Some(take(switcher_w, 2));
            for (id, label) in page.header.nav.iter().rev() {
                let rect = take(label.chars().count() as u16, 2);
                nav.push((*id, rect));
            }
            nav.reverse();
        }

        let dropdown = match page.dropdown {
            ActiveDropdown::HeaderLang => {
                switcher.map(|anchor| dropdown_layout(page, anchor, area))
            }
            ActiveDropdown::Sheet => None,
            ActiveDropdown::None => None,
        };
        let sheet = match page.dropdown {
            ActiveDropdown::Sheet => Some(sheet_layout(page, area, sheet_offset_rows)),
            _ => None,
        };
        let menu = if page.menu_open && page.compact {
            Some(menu_layout(page, area))
        } else {
            None
        };
        let modal = modal.map(|content| modal_layout(content, area));

        let scroll_top = if page.scroll > body_h {
            let label_w = scroll_top_label.chars().count() as u16 + 2;
            let x = area.x + area.width.saturating_sub(label_w + 1);
            Some(Rect::new(x, status.y, label_w, status.height))
        } else {
            None
        };

        Layout {
            header,
            rule,
            body,
            status,
            content_x,
            brand,
            nav,
            switcher,
            theme_btn,
            hamburger,
            dropdown,
            sheet,
            menu,
            modal,
            scroll_top,
        }
    }

    /// Rows the sheet has been dragged down, derived from gesture units.
    pub fn sheet_rows(offset_units: u32) -> u16 {
        (offset_units / DRAG_UNITS_PER_ROW).min(u16::MAX as u32) as u16
    }
}

fn dropdown_layout(page: &Page, anchor: Rect, area: Rect) -> PanelLayout {
    let label_w = page
        .lang_menu
        .options
        .iter()
        .map(|(_, label)| label.chars().count())
        .max()
        .unwrap_or(0) as u16;
    // marker + space + label, plus borders and padding
    let width = (label_w + 6).min(area.width);
    let height = (page.lang_menu.options.len() as u16 + 2).min(area.height.saturating_sub(1));
    let right = anchor.x + anchor.width;
    let x = right.saturating_sub(width).max(area.x);
    let panel = Rect::new(x, area.y + 1, width, height);

    let options = page
        .lang_menu
        .options
        .iter()
        .enumerate()
        .filter(|(i, _)| (*i as u16) + 2 < panel.height)
        .map(|(i, (locale, _))| {
            (
                *locale,
                Rect::new(
                    panel.x + 1,
                    panel.y + 1 + i as u16,
                    panel.width.saturating_sub(2),
                    1,
                ),
            )
        })
        .collect();
    PanelLayout { panel, options }
}

fn sheet_layout(page: &Page, area: Rect, offset_rows: u16) -> PanelLayout {
    // handle border + title + options + bottom border
    let full_h = page.lang_menu.options.len() as u16 + 3;
    let rest_y = area.y + area.height.saturating_sub(full_h);
    let y = (rest_y + offset_rows).min(area.y + area.height.saturating_sub(1));
    let panel = Rect::new(area.x, y, area.width, area.y + area.height - y);

    let options = page
        .lang_menu
        .options
        .iter()
        .enumerate()
        .map(|(i, (locale, _))| {
            (
                *locale,
                Rect::new(
                    panel.x + 2,
                    panel.y + 2 + i as u16,
                    panel.width.saturating_sub(4),
                    1,
                ),
            )
        })
        .filter(|(_, rect)| rect.y < area.y + area.height)
        .collect();
    PanelLayout { panel, options }
}

fn menu_layout(page: &Page, area: Rect) -> MenuLayout {
    let height = (page.menu.entries.len() as u16 + 3).min(area.height.saturating_sub(1));
    let panel = Rect::new(area.x, area.y + 1, area.width, height);
    let entries = page
        .menu
        .entries
        .iter()
        .enumerate()
        .map(|(i, _)| {
            Rect::new(
                panel.x + 2,
                panel.y + 2 + i as u16,
                panel.width.saturating_sub(4),
                1,
            )
        })
        .filter(|rect| rect.y + 1 < panel.y + panel.height)
        .collect();
    MenuLayout { panel, entries }
}

fn modal_layout(content: &ModalContent, area: Rect) -> ModalLayout {
    let width = area.width.saturating_sub(4).min(56).max(20).min(area.width);
    let inner_w = width.saturating_sub(4) as usize;
    let hint_lines = crate::ui::text::wrap(&content.hint, inner_w).len() as u16;
    // name + 3 detail rows + blank + hint + blank + close
    let height = (7 + hint_lines + 2).min(area.height);
    let panel = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );
    let close_w = content.close.chars().count() as u16 + 4;
    let close = Rect::new(
        panel.x + panel.width.saturating_sub(close_w) / 2,
        panel.y + panel.height.saturating_sub(2),
        close_w,
        1,
    );
    ModalLayout { panel, close }
}

/// Repopulate the hit registry for this frame.
///
/// Always clear-then-register: stale regions from any previous page are
/// impossible by construction. An open overlay claims the whole frame, so
/// only its own controls are registered and any other hit test misses
/// (the session treats a miss as an outside click).
pub fn bind(registry: &mut HitRegistry, page: &Page, layout: &Layout, mail_available: bool) {
    registry.clear();

    if let Some(modal) = &layout.modal {
        registry.register(modal.close, Action::CloseModal);
        return;
    }

    if let Some(sheet) = &layout.sheet {
        for (locale, rect) in &sheet.options {
            registry.register(*rect, Action::SelectLanguage(*locale));
        }
        return;
    }

    if let Some(dropdown) = &layout.dropdown {
        for (locale, rect) in &dropdown.options {
            registry.register(*rect, Action::SelectLanguage(*locale));
        }
        if let Some(rect) = layout.switcher {
            registry.register(rect, Action::ToggleLangMenu);
        }
        return;
    }

    if let Some(menu) = &layout.menu {
        for (rect, entry) in menu.entries.iter().zip(page.menu.entries.iter()) {
            registry.register(*rect, entry.action.clone());
        }
        if let Some(rect) = layout.hamburger {
            registry.register(rect, Action::ToggleMenu);
        }
        return;
    }

    registry.register(layout.brand, Action::Jump(SectionId::Hero));
    for (id, rect) in &layout.nav {
        registry.register(*rect, Action::Jump(*id));
    }
    if let Some(rect) = layout.switcher {
        registry.register(rect, Action::ToggleLangMenu);
    }
    registry.register(layout.theme_btn, Action::ToggleTheme);
    if let Some(rect) = layout.hamburger {
        registry.register(rect, Action::ToggleMenu);
    }
    if let Some(rect) = layout.scroll_top {
        registry.register(rect, Action::ScrollTop);
    }

    bind_body(registry, page, layout, mail_available);
}

/// Visible body rows: span actions and form slots.
fn bind_body(registry: &mut HitRegistry, page: &Page, layout: &Layout, mail_available: bool) {
    let top = (page.scroll as usize).min(page.lines.len());
    let bottom = (top + layout.body.height as usize).min(page.lines.len());
    let right_edge = layout.body.x + layout.body.width;

    for (row, line) in page.lines[top..bottom].iter().enumerate() {
        let y = layout.body.y + row as u16;

        match line.slot {
            Some(Slot::Field(id)) => {
                registry.register(
                    Rect::new(layout.content_x, y, page.built_width, 1),
                    Action::FocusField(id),
                );
                continue;
            }
            Some(Slot::Submit) => {
                if mail_available {
                    let label_w = page.form.labels.submit.chars().count() as u16 + 4;
                    registry.register(
                        Rect::new(layout.content_x, y, label_w, 1),
                        Action::Submit,
                    );
                }
                continue;
            }
            _ => {}
        }

        let mut x = layout.content_x;
        for span in &line.spans {
            let width = span.width();
            if let Some(action) = &span.action {
                let clipped = width.min(right_edge.saturating_sub(x));
                registry.register(Rect::new(x, y, clipped, 1), action.clone());
            }
            x += width;
        }
    }
}

/// Outside-click test for the currently topmost overlay.
pub fn inside_topmost(layout: &Layout, x: u16, y: u16) -> bool {
    let hit = |rect: Rect| {
        x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
    };
    if let Some(modal) = &layout.modal {
        return hit(modal.panel);
    }
    if let Some(sheet) = &layout.sheet {
        return hit(sheet.panel);
    }
    if let Some(dropdown) = &layout.dropdown {
        return hit(dropdown.panel) || layout.switcher.is_some_and(hit);
    }
    if let Some(menu) = &layout.menu {
        return hit(menu.panel) || layout.hamburger.is_some_and(hit);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PROFILE;
    use crate::i18n::{Locale, Translator};
    use crate::ui::compositor::{compose, ComposeFlags};

    fn wide_page() -> Page {
        let t = Translator::embedded(Locale::Es).unwrap();
        compose(
            &t,
            &PROFILE,
            &ComposeFlags {
                viewport_width: 100,
                title_index: 0,
                mail_available: true,
            },
        )
    }

    fn compact_page() -> Page {
        let t = Translator::embedded(Locale::Es).unwrap();
        compose(
            &t,
            &PROFILE,
            &ComposeFlags {
                viewport_width: 60,
                title_index: 0,
                mail_available: true,
            },
        )
    }

    fn area(w: u16, h: u16) -> Rect {
        Rect::new(0, 0, w, h)
    }

    #[test]
    fn bind_is_idempotent_across_repeated_passes() {
        let page = wide_page();
        let layout = Layout::compute(&page, area(100, 30), None, 0, "↑ top");
        let mut registry = HitRegistry::new();

        binds(&mut registry, &page, &layout, 5);
        assert_eq!(registry.count_of(&Action::ToggleTheme), 1);
        assert_eq!(registry.count_of(&Action::ToggleLangMenu), 1);
        for (id, _) in &layout.nav {
            assert_eq!(registry.count_of(&Action::Jump(*id)), 1, "{:?}", id);
        }
    }

    fn binds(registry: &mut HitRegistry, page: &Page, layout: &Layout, times: usize) {
        for _ in 0..times {
            bind(registry, page, layout, true);
        }
    }

    #[test]
    fn wide_layout_has_nav_and_switcher_but_no_hamburger() {
        let page = wide_page();
        let layout = Layout::compute(&page, area(100, 30), None, 0, "↑ top");
        assert_eq!(layout.nav.len(), page.header.nav.len());
        assert!(layout.switcher.is_some());
        assert!(layout.hamburger.is_none());
    }

    #[test]
    fn compact_layout_collapses_into_hamburger() {
        let page = compact_page();
        let layout = Layout::compute(&page, area(60, 30), None, 0, "↑ top");
        assert!(layout.nav.is_empty());
        assert!(layout.switcher.is_none());
        assert!(layout.hamburger.is_some());

        let mut registry = HitRegistry::new();
        bind(&mut registry, &page, &layout, true);
        assert_eq!(registry.count_of(&Action::ToggleMenu), 1);
        assert_eq!(registry.count_of(&Action::ToggleTheme), 1);
    }

    #[test]
    fn open_sheet_gates_out_everything_else() {
        let mut page = compact_page();
        page.dropdown = ActiveDropdown::Sheet;
        let layout = Layout::compute(&page, area(60, 30), None, 0, "↑ top");
        let mut registry = HitRegistry::new();
        bind(&mut registry, &page, &layout, true);

        assert_eq!(registry.count_of(&Action::ToggleTheme), 0);
        assert_eq!(registry.count_of(&Action::ToggleMenu), 0);
        for locale in Locale::ALL {
            assert_eq!(registry.count_of(&Action::SelectLanguage(locale)), 1);
        }
    }

    #[test]
    fn open_modal_registers_only_its_close_control() {
        let page = wide_page();
        let content = ModalContent {
            title: "Certificado".into(),
            name: "CKA".into(),
            issuer: "CNCF".into(),
            year: "2023".into(),
            asset: "assets/cka.pdf".into(),
            hint: "El PDF está incluido junto al binario.".into(),
            close: "Cerrar".into(),
        };
        let layout = Layout::compute(&page, area(100, 30), Some(&content), 0, "↑ top");
        let mut registry = HitRegistry::new();
        bind(&mut registry, &page, &layout, true);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.count_of(&Action::CloseModal), 1);
        let close = layout.modal.as_ref().unwrap().close;
        assert!(!inside_topmost(&layout, 0, 0));
        assert!(inside_topmost(&layout, close.x, close.y));
    }

    #[test]
    fn scrolled_view_registers_only_visible_spans() {
        let page = wide_page();
        let layout = Layout::compute(&page, area(100, 30), None, 0, "↑ top");
        let mut registry = HitRegistry::new();
        bind(&mut registry, &page, &layout, true);
        // hero links are on-screen at the top
        assert_eq!(registry.count_of(&Action::OpenEmail), 1);

        let mut scrolled = wide_page();
        scrolled.scroll = 200;
        let layout = Layout::compute(&scrolled, area(100, 30), None, 0, "↑ top");
        let mut registry = HitRegistry::new();
        bind(&mut registry, &scrolled, &layout, true);
        assert_eq!(registry.count_of(&Action::CopyEmail), 0);
        assert!(layout.scroll_top.is_some());
        assert_eq!(registry.count_of(&Action::ScrollTop), 1);
    }

    #[test]
    fn sheet_drag_offset_moves_panel_down() {
        let mut page = compact_page();
        page.dropdown = ActiveDropdown::Sheet;
        let rest = Layout::compute(&page, area(60, 30), None, 0, "↑ top");
        let dragged = Layout::compute(&page, area(60, 30), None, 2, "↑ top");
        let rest_y = rest.sheet.as_ref().unwrap().panel.y;
        let dragged_y = dragged.sheet.as_ref().unwrap().panel.y;
        assert_eq!(dragged_y, rest_y + 2);
    }
}
