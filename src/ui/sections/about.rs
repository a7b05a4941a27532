use crate::content::SKILLS;
use crate::ui::page::{RichLine, RichSpan};
use crate::ui::style::StyleRole;

use super::{heading, paragraph, TemplateCtx};

pub fn lines(ctx: &TemplateCtx) -> Vec<RichLine> {
    let mut out = heading(ctx, &ctx.t.t("about.title"));

    let paragraphs: Vec<String> = ctx.t.t_list("about.paragraphs");
    for (i, text) in paragraphs.iter().enumerate() {
        if i > 0 {
            out.push(RichLine::blank());
        }
        let interpolated = text.replace("{{years}}", &ctx.profile.years.to_string());
        out.extend(paragraph(ctx, &interpolated, StyleRole::Text));
    }

    out.push(RichLine::blank());
    out.push(RichLine::plain(
        ctx.t.t("about.skillsTitle"),
        StyleRole::Label,
    ));

    let per_row = if ctx.compact { 2 } else { 3 };
    for chunk in SKILLS.chunks(per_row) {
        let mut spans = Vec::new();
        for (i, skill) in chunk.iter().enumerate() {
            if i > 0 {
                spans.push(RichSpan::new("   ", StyleRole::Text));
            }
            spans.push(RichSpan::new(skill.name, StyleRole::Strong));
            spans.push(RichSpan::new(format!(" ({})", skill.tag), StyleRole::Badge));
        }
        out.push(RichLine::from_spans(spans));
    }
    out.push(RichLine::blank());
    out
}
