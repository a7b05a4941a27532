use chrono::Datelike;

use crate::ui::page::RichLine;
use crate::ui::style::StyleRole;

use super::TemplateCtx;

pub fn lines(ctx: &TemplateCtx) -> Vec<RichLine> {
    let year = chrono::Utc::now().year().to_string();
    let copyright = ctx.t.t_args(
        "footer.copyright",
        &[
            ("year", year),
            ("name", ctx.profile.name.to_string()),
        ],
    );
    vec![
        RichLine::plain("─".repeat(ctx.width as usize), StyleRole::Rule),
        RichLine::plain(copyright, StyleRole::Muted),
        RichLine::blank(),
    ]
}
