use crate::ui::page::{RichLine, RichSpan};
use crate::ui::style::StyleRole;
use crate::ui::Action;

use super::{heading, paragraph, ProjectItem, TemplateCtx};

pub fn lines(ctx: &TemplateCtx) -> Vec<RichLine> {
    let mut out = heading(ctx, &ctx.t.t("projects.title"));

    let link_label = ctx.t.t("projects.linkLabel");
    let items: Vec<ProjectItem> = ctx.t.t_list("projects.items");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(RichLine::blank());
        }
        if item.stack.is_empty() {
            out.push(RichLine::plain(item.name.clone(), StyleRole::Strong));
        } else {
            out.extend(super::title_row(
                ctx,
                RichSpan::new(item.name.clone(), StyleRole::Strong),
                RichSpan::new(format!("[{}]", item.stack.join(" · ")), StyleRole::Badge),
            ));
        }
        out.extend(paragraph(ctx, &item.description, StyleRole::Text));
        out.push(RichLine::from_spans(vec![RichSpan::action(
            format!("{} ↗", link_label),
            StyleRole::Link,
            Action::OpenLink(item.link.clone()),
        )]));
    }
    out.push(RichLine::blank());
    out
}
