use ratatui::layout::Rect;

use termfolio::content::{SectionId, PROFILE};
use termfolio::i18n::{Locale, Translator};
use termfolio::session::binder::{self, Layout};
use termfolio::session::gesture::{GestureOutcome, SheetGesture, DISMISS_THRESHOLD};
use termfolio::session::registry::HitRegistry;
use termfolio::session::scrollspy;
use termfolio::session::view_state::ViewState;
use termfolio::ui::compositor::{compose, ComposeFlags};
use termfolio::ui::page::{ActiveDropdown, FormFieldId, Page};
use termfolio::ui::Action;

fn page_at(width: u16, locale: Locale) -> Page {
    let t = Translator::embedded(locale).expect("embedded catalogs");
    compose(
        &t,
        &PROFILE,
        &ComposeFlags {
            viewport_width: width,
            title_index: 0,
            mail_available: true,
        },
    )
}

fn bound(page: &Page, area: Rect) -> (Layout, HitRegistry) {
    let layout = Layout::compute(page, area, None, 0, "↑ top");
    let mut registry = HitRegistry::new();
    binder::bind(&mut registry, page, &layout, true);
    (layout, registry)
}

#[test]
fn repeated_rebuild_and_rebind_keeps_exactly_one_region_per_element() {
    let area = Rect::new(0, 0, 100, 30);
    let mut registry = HitRegistry::new();

    // Five full regenerate-then-rebind cycles, as five state changes would
    // produce. Handlers must not stack.
    for _ in 0..5 {
        let page = page_at(100, Locale::Es);
        let layout = Layout::compute(&page, area, None, 0, "↑ top");
        binder::bind(&mut registry, &page, &layout, true);
    }

    let page = page_at(100, Locale::Es);
    assert_eq!(registry.count_of(&Action::ToggleTheme), 1);
    assert_eq!(registry.count_of(&Action::ToggleLangMenu), 1);
    assert_eq!(registry.count_of(&Action::OpenEmail), 1);
    for (id, _) in &page.header.nav {
        assert_eq!(
            registry.count_of(&Action::Jump(*id)),
            1,
            "nav entry {:?} registered more than once",
            id
        );
    }
}

#[test]
fn rebuild_preserves_draft_scroll_focus_and_overlay_across_language_change() {
    let mut before = page_at(100, Locale::Es);
    before.scroll = 42;
    before.form.focus = Some(FormFieldId::Message);
    before.form.name.restore("Ana".to_string(), 3);
    before.form.message.restore("Hola desde el test".to_string(), 5);

    let state = ViewState::capture(&before);
    let mut after = page_at(100, Locale::En);
    state.restore(&mut after);

    assert_eq!(after.scroll, 42);
    assert_eq!(after.form.focus, Some(FormFieldId::Message));
    assert_eq!(after.form.name.value, "Ana");
    assert_eq!(after.form.message.value, "Hola desde el test");
    // the page itself is the new language
    assert_eq!(after.active_locale, Locale::En);
    assert_ne!(after.form.labels.submit, "");
}

#[test]
fn restore_remaps_open_switcher_to_the_new_width_class() {
    let mut compact = page_at(60, Locale::Es);
    compact.dropdown = ActiveDropdown::Sheet;
    compact.menu_open = true;

    let state = ViewState::capture(&compact);
    let mut wide = page_at(120, Locale::Es);
    state.restore(&mut wide);

    // sheet becomes the header dropdown, and the compact-only menu closes
    assert_eq!(wide.dropdown, ActiveDropdown::HeaderLang);
    assert!(!wide.menu_open);

    let state = ViewState::capture(&wide);
    let mut compact_again = page_at(60, Locale::Es);
    state.restore(&mut compact_again);
    assert_eq!(compact_again.dropdown, ActiveDropdown::Sheet);
}

#[test]
fn restored_scroll_clamps_to_the_new_document_height() {
    let mut page = page_at(100, Locale::Es);
    page.scroll = 9999;
    page.clamp_scroll(27);
    assert_eq!(page.scroll, page.max_scroll(27));
}

#[test]
fn overlay_click_containment_matches_the_painted_panel() {
    let mut page = page_at(100, Locale::Es);
    page.dropdown = ActiveDropdown::HeaderLang;
    let (layout, registry) = bound(&page, Rect::new(0, 0, 100, 30));

    let panel = layout.dropdown.as_ref().expect("dropdown layout").panel;
    assert!(binder::inside_topmost(&layout, panel.x, panel.y));
    assert!(!binder::inside_topmost(&layout, 0, 29));

    // only language options (plus the switcher itself) are clickable
    for locale in Locale::ALL {
        assert_eq!(registry.count_of(&Action::SelectLanguage(locale)), 1);
    }
    assert_eq!(registry.count_of(&Action::OpenEmail), 0);
    assert_eq!(registry.count_of(&Action::Submit), 0);
}

#[test]
fn sheet_dismisses_past_the_drag_threshold_and_snaps_back_under_it() {
    let mut gesture = SheetGesture::default();

    gesture.begin(400);
    gesture.drag_to(400 + DISMISS_THRESHOLD + 50);
    assert_eq!(gesture.release(), Some(GestureOutcome::Dismiss));

    gesture.begin(400);
    gesture.drag_to(450);
    assert_eq!(gesture.release(), Some(GestureOutcome::SnapBack));

    // exactly at the threshold still snaps back
    gesture.begin(0);
    gesture.drag_to(DISMISS_THRESHOLD);
    assert_eq!(gesture.release(), Some(GestureOutcome::SnapBack));

    // upward movement never produces a negative offset
    gesture.begin(400);
    gesture.drag_to(100);
    assert_eq!(gesture.offset(), 0);
    assert_eq!(gesture.release(), Some(GestureOutcome::SnapBack));
}

#[test]
fn scroll_spy_tracks_the_section_under_the_reading_band() {
    let page = page_at(100, Locale::Es);
    let viewport = 27;

    assert_eq!(
        scrollspy::active_section(0, viewport, &page.sections),
        None,
        "hero has no nav entry, so nothing is active at the top"
    );

    let about = page.anchor(SectionId::About).unwrap();
    let spied = scrollspy::active_section(about, viewport, &page.sections);
    assert_eq!(spied, Some(SectionId::About));

    let bottom = page.max_scroll(viewport);
    let spied = scrollspy::active_section(bottom, viewport, &page.sections);
    assert!(
        spied == Some(SectionId::Contact) || spied == Some(SectionId::Projects),
        "deep scroll lands on a late section, got {:?}",
        spied
    );
}

#[test]
fn compact_and_wide_layouts_expose_different_header_controls() {
    let wide = page_at(120, Locale::Es);
    assert!(!wide.compact);
    let (layout, registry) = bound(&wide, Rect::new(0, 0, 120, 30));
    assert!(layout.switcher.is_some());
    assert!(layout.hamburger.is_none());
    assert_eq!(registry.count_of(&Action::ToggleMenu), 0);

    let compact = page_at(60, Locale::Es);
    assert!(compact.compact);
    let (layout, registry) = bound(&compact, Rect::new(0, 0, 60, 30));
    assert!(layout.switcher.is_none());
    assert!(layout.hamburger.is_some());
    assert_eq!(registry.count_of(&Action::ToggleMenu), 1);
    assert_eq!(registry.count_of(&Action::ToggleLangMenu), 0);
}

#[test]
fn certification_cards_open_the_modal_by_index() {
    let page = page_at(100, Locale::Es);
    let mut found = Vec::new();
    for line in &page.lines {
        for span in &line.spans {
            if let Some(Action::OpenModal(index)) = &span.action {
                found.push(*index);
            }
        }
    }
    assert!(!found.is_empty(), "certifications compose view links");
    let mut sorted = found.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), found.len(), "one link per certification");
    assert_eq!(sorted[0], 0);
}
