use crate::ui::page::{RichLine, RichSpan};
use crate::ui::style::StyleRole;
use crate::ui::Action;

use super::{heading, CertItem, TemplateCtx};

pub fn lines(ctx: &TemplateCtx) -> Vec<RichLine> {
    let mut out = heading(ctx, &ctx.t.t("certifications.title"));

    let view_label = ctx.t.t("certifications.view");
    let items: Vec<CertItem> = ctx.t.t_list("certifications.items");
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            out.push(RichLine::blank());
        }
        out.push(RichLine::from_spans(vec![
            RichSpan::new(item.name.clone(), StyleRole::Strong),
            RichSpan::new(format!("  {}", item.year), StyleRole::Badge),
        ]));
        out.push(RichLine::from_spans(vec![
            RichSpan::new(item.issuer.clone(), StyleRole::Muted),
            RichSpan::new("  ", StyleRole::Text),
            RichSpan::action(
                format!("[{}]", view_label),
                StyleRole::Link,
                Action::OpenModal(index),
            ),
        ]));
    }
    out.push(RichLine::blank());
    out
}
