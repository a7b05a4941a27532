use crate::content::{SectionId, NAV_SECTIONS};
use crate::i18n::Locale;
use crate::ui::page::{HeaderModel, LangMenu, MenuEntry, MenuModel};
use crate::ui::Action;

use super::TemplateCtx;

pub fn header(ctx: &TemplateCtx) -> HeaderModel {
    let nav = NAV_SECTIONS
        .iter()
        .filter_map(|&id| id.nav_key().map(|key| (id, ctx.t.t(key))))
        .collect();
    HeaderModel {
        brand: ctx.profile.name.to_string(),
        nav,
        lang_tag: ctx.t.active().tag(),
    }
}

pub fn lang_menu(ctx: &TemplateCtx) -> LangMenu {
    LangMenu {
        title: ctx.t.t("language.title"),
        options: [
            (Locale::Es, Locale::Es.label()),
            (Locale::En, Locale::En.label()),
            (Locale::Pt, Locale::Pt.label()),
        ],
    }
}

/// Compact-layout menu: the nav entries plus the controls that live in the
/// header on wide layouts.
pub fn menu(ctx: &TemplateCtx) -> MenuModel {
    let mut entries: Vec<MenuEntry> = NAV_SECTIONS
        .iter()
        .filter_map(|&id| {
            id.nav_key().map(|key| MenuEntry {
                action: Action::Jump(id),
                label: ctx.t.t(key),
            })
        })
        .collect();
    entries.push(MenuEntry {
        action: Action::ToggleTheme,
        label: ctx.t.t("menu.theme"),
    });
    entries.push(MenuEntry {
        action: Action::ToggleLangMenu,
        label: ctx.t.t("menu.language"),
    });
    entries.push(MenuEntry {
        action: Action::Jump(SectionId::Hero),
        label: ctx.t.t("menu.top"),
    });
    MenuModel {
        title: ctx.t.t("menu.title"),
        entries,
    }
}
