use crate::ui::page::{RichLine, RichSpan, Slot};
use crate::ui::style::StyleRole;
use crate::ui::Action;

use super::{paragraph, spaced_row, TemplateCtx};

pub fn lines(ctx: &TemplateCtx) -> Vec<RichLine> {
    let mut out = vec![RichLine::blank()];

    out.push(RichLine::plain(ctx.t.t("hero.greeting"), StyleRole::Muted));
    out.push(RichLine::plain(
        ctx.profile.name.to_string(),
        StyleRole::Title,
    ));

    // Slotted so the carousel tick repaints it in place instead of
    // rebuilding the page (which would wipe validation errors).
    let titles: Vec<String> = ctx.t.t_list("hero.titles");
    if !titles.is_empty() {
        let title = &titles[ctx.title_index % titles.len()];
        out.push(RichLine::slot(
            Slot::HeroTitle,
            vec![RichSpan::new(format!("» {}", title), StyleRole::Subtitle)],
        ));
    }
    out.push(RichLine::plain(ctx.t.t("hero.location"), StyleRole::Muted));

    out.push(RichLine::blank());
    out.extend(paragraph(ctx, &ctx.t.t("hero.tagline"), StyleRole::Text));
    out.push(RichLine::blank());

    out.push(spaced_row(vec![
        RichSpan::action(
            format!("[{}]", ctx.t.t("hero.openEmail")),
            StyleRole::Link,
            Action::OpenEmail,
        ),
        RichSpan::action(
            format!("[{}]", ctx.t.t("hero.copyEmail")),
            StyleRole::Link,
            Action::CopyEmail,
        ),
        RichSpan::action(
            format!("[{}]", ctx.t.t("hero.downloadCv")),
            StyleRole::Link,
            Action::OpenLink(ctx.profile.cv_asset.to_string()),
        ),
    ]));
    out.push(spaced_row(vec![
        RichSpan::action(
            "GitHub".to_string(),
            StyleRole::Link,
            Action::OpenLink(ctx.profile.github.to_string()),
        ),
        RichSpan::action(
            "LinkedIn".to_string(),
            StyleRole::Link,
            Action::OpenLink(ctx.profile.linkedin.to_string()),
        ),
    ]));
    out.push(RichLine::blank());
    out
}
