use crate::ui::page::{RichLine, RichSpan};
use crate::ui::style::StyleRole;

use super::{heading, paragraph, ExperienceItem, TemplateCtx};

pub fn lines(ctx: &TemplateCtx) -> Vec<RichLine> {
    let mut out = heading(ctx, &ctx.t.t("experience.title"));

    let items: Vec<ExperienceItem> = ctx.t.t_list("experience.items");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(RichLine::blank());
        }
        out.extend(super::title_row(
            ctx,
            RichSpan::new(item.role.clone(), StyleRole::Strong),
            RichSpan::new(item.company.clone(), StyleRole::Subtitle),
        ));
        out.push(RichLine::plain(item.period.clone(), StyleRole::Badge));
        out.extend(paragraph(ctx, &item.summary, StyleRole::Text));
        for highlight in &item.highlights {
            for (j, wrapped) in crate::ui::text::wrap(highlight, ctx.width.saturating_sub(2) as usize)
                .into_iter()
                .enumerate()
            {
                let prefix = if j == 0 { "▸ " } else { "  " };
                out.push(RichLine::from_spans(vec![
                    RichSpan::new(prefix, StyleRole::Muted),
                    RichSpan::new(wrapped, StyleRole::Text),
                ]));
            }
        }
    }
    out.push(RichLine::blank());
    out
}
