use crate::ui::page::{RichLine, RichSpan};
use crate::ui::style::StyleRole;

use super::{heading, paragraph, EducationItem, TemplateCtx};

pub fn lines(ctx: &TemplateCtx) -> Vec<RichLine> {
    let mut out = heading(ctx, &ctx.t.t("education.title"));

    let items: Vec<EducationItem> = ctx.t.t_list("education.items");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(RichLine::blank());
        }
        out.extend(super::title_row(
            ctx,
            RichSpan::new(item.degree.clone(), StyleRole::Strong),
            RichSpan::new(item.school.clone(), StyleRole::Subtitle),
        ));
        out.push(RichLine::plain(item.period.clone(), StyleRole::Badge));
        out.extend(paragraph(ctx, &item.detail, StyleRole::Muted));
    }
    out.push(RichLine::blank());
    out
}
