use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::contact::{FormPhase, NoticeKind};
use crate::content::SectionId;
use crate::theme::{Theme, ThemeMode};
use crate::ui::page::{FormFieldId, Page, RichSpan, Slot};
use crate::ui::style::{resolve, StyleRole};

use super::binder::{self, Layout, ModalContent};

/// Everything the paint pass reads besides the page itself. All of it is
/// per-frame state owned by the session; none of it survives in the page.
pub struct FrameCtx<'a> {
    pub layout: &'a Layout,
    pub theme: &'a Theme,
    pub mode: ThemeMode,
    pub active_nav: Option<SectionId>,
    pub hero_title: Option<&'a str>,
    pub hints: &'a str,
    pub scroll_top_label: &'a str,
    pub modal: Option<&'a ModalContent>,
    pub toast: Option<&'a str>,
    pub mail_available: bool,
}

/// Paint one frame. The page is only mutated to keep input-scroll windows
/// in step with their cursors.
pub fn draw(frame: &mut Frame, page: &mut Page, ctx: &FrameCtx) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }
    let theme = ctx.theme;

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg_base)),
        area,
    );

    draw_header(frame, page, ctx);
    draw_rule(frame, ctx);
    let cursor = draw_body(frame, page, ctx);
    draw_status(frame, ctx);

    draw_dropdown(frame, page, ctx);
    draw_sheet(frame, page, ctx);
    draw_menu(frame, page, ctx);
    draw_modal(frame, ctx);
    draw_toast(frame, ctx);

    // The caret only shows through when nothing covers the body.
    if let Some(pos) = cursor {
        if !page.overlay_open() && ctx.modal.is_none() {
            frame.set_cursor_position(pos);
        }
    }
}

fn chip(frame: &mut Frame, rect: Rect, text: &str, style: Style) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    frame.render_widget(Paragraph::new(text.to_string()).style(style), rect);
}

fn draw_header(frame: &mut Frame, page: &Page, ctx: &FrameCtx) {
    let layout = ctx.layout;
    let theme = ctx.theme;

    chip(
        frame,
        layout.brand,
        &page.header.brand,
        resolve(StyleRole::Brand, theme),
    );

    for ((id, rect), (_, label)) in layout.nav.iter().zip(page.header.nav.iter()) {
        let role = if ctx.active_nav == Some(*id) {
            StyleRole::NavActive
        } else {
            StyleRole::Nav
        };
        chip(frame, *rect, label, resolve(role, theme));
    }

    if let Some(rect) = layout.switcher {
        chip(
            frame,
            rect,
            &binder::switcher_text(page.header.lang_tag),
            resolve(StyleRole::Nav, theme),
        );
    }
    // Icon comes from the live mode, never from the composed page: a theme
    // change repaints this chip without a rebuild.
    chip(
        frame,
        layout.theme_btn,
        &binder::theme_text(ctx.mode.icon()),
        resolve(StyleRole::Nav, theme),
    );
    if let Some(rect) = layout.hamburger {
        chip(frame, rect, binder::HAMBURGER, resolve(StyleRole::Nav, theme));
    }
}

fn draw_rule(frame: &mut Frame, ctx: &FrameCtx) {
    let rule = ctx.layout.rule;
    if rule.height == 0 {
        return;
    }
    chip(
        frame,
        rule,
        &"─".repeat(rule.width as usize),
        resolve(StyleRole::Rule, ctx.theme),
    );
}

/// Visible page rows, with slots filled from live state. Returns the caret
/// position when a focused input row is on screen.
fn draw_body(frame: &mut Frame, page: &mut Page, ctx: &FrameCtx) -> Option<Position> {
    let layout = ctx.layout;
    let theme = ctx.theme;
    let body = layout.body;
    if body.height == 0 {
        return None;
    }

    let width = page
        .built_width
        .min(body.right().saturating_sub(layout.content_x));
    let top = (page.scroll as usize).min(page.lines.len());
    let bottom = (top + body.height as usize).min(page.lines.len());

    let mut cursor = None;
    let mut rows: Vec<Line<'static>> = Vec::with_capacity(bottom - top);
    for idx in top..bottom {
        let y = body.y + (idx - top) as u16;
        let slot = page.lines[idx].slot;
        let row = match slot {
            Some(Slot::HeroTitle) => hero_title_row(&page.lines[idx].spans, ctx),
            Some(Slot::Field(id)) => {
                let (line, caret) = input_row(page, id, width, theme);
                if let Some(col) = caret {
                    cursor = Some(Position::new(layout.content_x + col, y));
                }
                line
            }
            Some(Slot::FieldError(id)) => field_error_row(page, id, theme),
            Some(Slot::Submit) => submit_row(page, ctx),
            Some(Slot::FormStatus) => status_row(page, theme),
            None => styled_line(&page.lines[idx].spans, theme),
        };
        rows.push(row);
    }

    frame.render_widget(
        Paragraph::new(Text::from(rows)),
        Rect::new(layout.content_x, body.y, width, body.height),
    );
    cursor
}

fn styled_line(spans: &[RichSpan], theme: &Theme) -> Line<'static> {
    Line::from(
        spans
            .iter()
            .map(|s| Span::styled(s.text.clone(), resolve(s.role, theme)))
            .collect::<Vec<_>>(),
    )
}

fn hero_title_row(composed: &[RichSpan], ctx: &FrameCtx) -> Line<'static> {
    match ctx.hero_title {
        Some(title) => Line::from(Span::styled(
            format!("» {}", title),
            resolve(StyleRole::Subtitle, ctx.theme),
        )),
        None => styled_line(composed, ctx.theme),
    }
}

/// One input row: ` value……… ` padded to the content width, caret column
/// returned when this field has focus.
fn input_row(
    page: &mut Page,
    id: FormFieldId,
    width: u16,
    theme: &Theme,
) -> (Line<'static>, Option<u16>) {
    let focused = page.form.focus == Some(id);
    let placeholder: String = page
        .slot_line(Slot::Field(id))
        .map(|i| page.lines[i as usize].text())
        .unwrap_or_default();
    let inner_w = width.saturating_sub(2) as usize;

    let field = page.form.field_mut(id);
    let role = if focused {
        StyleRole::InputFocused
    } else if field.value.is_empty() {
        StyleRole::Placeholder
    } else {
        StyleRole::Input
    };

    let (text, caret) = if field.value.is_empty() && !focused {
        (placeholder, None)
    } else {
        field.state.update_scroll(inner_w, &field.value);
        let (window, col) = field.state.window(&field.value, inner_w);
        (window, focused.then_some(col as u16 + 1))
    };

    let padded = format!(" {:<width$} ", text, width = inner_w.max(text.chars().count()));
    (
        Line::from(Span::styled(padded, resolve(role, theme))),
        caret,
    )
}

fn field_error_row(page: &Page, id: FormFieldId, theme: &Theme) -> Line<'static> {
    match page.form.errors.get(id) {
        Some(text) => Line::from(Span::styled(
            text.to_string(),
            resolve(StyleRole::ErrorText, theme),
        )),
        None => Line::default(),
    }
}

fn submit_row(page: &Page, ctx: &FrameCtx) -> Line<'static> {
    let labels = &page.form.labels;
    let (text, role) = if !ctx.mail_available {
        (labels.unavailable.clone(), StyleRole::WarnText)
    } else if page.form.phase.is_sending() {
        (format!("[ {} ]", labels.sending), StyleRole::ButtonBusy)
    } else {
        (format!("[ {} ]", labels.submit), StyleRole::Button)
    };
    Line::from(Span::styled(text, resolve(role, ctx.theme)))
}

fn status_row(page: &Page, theme: &Theme) -> Line<'static> {
    match &page.form.phase {
        FormPhase::Notice { kind, text, .. } => {
            let role = match kind {
                NoticeKind::Success => StyleRole::SuccessText,
                NoticeKind::Error => StyleRole::ErrorText,
            };
            Line::from(Span::styled(text.clone(), resolve(role, theme)))
        }
        _ => Line::default(),
    }
}

fn draw_status(frame: &mut Frame, ctx: &FrameCtx) {
    let status = ctx.layout.status;
    if status.height == 0 {
        return;
    }
    let hints = Rect::new(
        status.x + 1,
        status.y,
        status.width.saturating_sub(2),
        status.height,
    );
    chip(frame, hints, ctx.hints, resolve(StyleRole::Hint, ctx.theme));
    if let Some(rect) = ctx.layout.scroll_top {
        chip(
            frame,
            rect,
            &format!("[{}]", ctx.scroll_top_label),
            resolve(StyleRole::Nav, ctx.theme),
        );
    }
}

fn overlay_block(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_primary))
        .style(Style::default().bg(theme.bg_elevated))
}

fn locale_rows(page: &Page, theme: &Theme, indent: &str) -> Vec<Line<'static>> {
    page.lang_menu
        .options
        .iter()
        .map(|(locale, label)| {
            let marker = if *locale == page.active_locale { "•" } else { " " };
            let role = if *locale == page.active_locale {
                StyleRole::Strong
            } else {
                StyleRole::Text
            };
            Line::from(Span::styled(
                format!("{}{} {}", indent, marker, label),
                resolve(role, theme),
            ))
        })
        .collect()
}

fn draw_dropdown(frame: &mut Frame, page: &Page, ctx: &FrameCtx) {
    let Some(dropdown) = &ctx.layout.dropdown else {
        return;
    };
    frame.render_widget(Clear, dropdown.panel);
    let rows = locale_rows(page, ctx.theme, "");
    frame.render_widget(
        Paragraph::new(Text::from(rows)).block(overlay_block(ctx.theme)),
        dropdown.panel,
    );
}

fn draw_sheet(frame: &mut Frame, page: &Page, ctx: &FrameCtx) {
    let Some(sheet) = &ctx.layout.sheet else {
        return;
    };
    frame.render_widget(Clear, sheet.panel);
    let mut rows = vec![Line::from(Span::styled(
        format!(" {}", page.lang_menu.title),
        resolve(StyleRole::Heading, ctx.theme),
    ))];
    rows.extend(locale_rows(page, ctx.theme, " "));
    frame.render_widget(
        Paragraph::new(Text::from(rows)).block(
            overlay_block(ctx.theme)
                .title(binder::SHEET_HANDLE)
                .title_alignment(Alignment::Center),
        ),
        sheet.panel,
    );
}

fn draw_menu(frame: &mut Frame, page: &Page, ctx: &FrameCtx) {
    let Some(menu) = &ctx.layout.menu else {
        return;
    };
    frame.render_widget(Clear, menu.panel);
    let mut rows = vec![Line::from(Span::styled(
        format!(" {}", page.menu.title),
        resolve(StyleRole::Heading, ctx.theme),
    ))];
    for entry in &page.menu.entries {
        rows.push(Line::from(Span::styled(
            format!(" {}", entry.label),
            resolve(StyleRole::Text, ctx.theme),
        )));
    }
    frame.render_widget(
        Paragraph::new(Text::from(rows)).block(overlay_block(ctx.theme)),
        menu.panel,
    );
}

fn draw_modal(frame: &mut Frame, ctx: &FrameCtx) {
    let (Some(content), Some(modal)) = (ctx.modal, &ctx.layout.modal) else {
        return;
    };
    let theme = ctx.theme;
    frame.render_widget(Clear, modal.panel);

    let inner_w = modal.panel.width.saturating_sub(4) as usize;
    let mut rows = vec![
        Line::from(Span::styled(
            content.name.clone(),
            resolve(StyleRole::Strong, theme),
        )),
        Line::from(Span::styled(
            content.issuer.clone(),
            resolve(StyleRole::Text, theme),
        )),
        Line::from(Span::styled(
            content.year.clone(),
            resolve(StyleRole::Text, theme),
        )),
        Line::from(Span::styled(
            content.asset.clone(),
            resolve(StyleRole::Link, theme),
        )),
        Line::default(),
    ];
    for wrapped in crate::ui::text::wrap(&content.hint, inner_w) {
        rows.push(Line::from(Span::styled(
            wrapped,
            resolve(StyleRole::Muted, theme),
        )));
    }
    frame.render_widget(
        Paragraph::new(Text::from(rows)).block(
            overlay_block(theme)
                .title(format!(" {} ", content.title))
                .padding(ratatui::widgets::Padding::horizontal(1)),
        ),
        modal.panel,
    );
    chip(
        frame,
        modal.close,
        &format!("[ {} ]", content.close),
        resolve(StyleRole::Button, theme),
    );
}

fn draw_toast(frame: &mut Frame, ctx: &FrameCtx) {
    let Some(text) = ctx.toast else {
        return;
    };
    let area = frame.area();
    let width = (text.chars().count() as u16 + 4).min(area.width);
    let rect = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        ctx.layout.status.y.saturating_sub(2),
        width,
        1,
    );
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(format!("  {}  ", text))
            .style(
                Style::default()
                    .bg(ctx.theme.bg_elevated)
                    .fg(ctx.theme.text_primary),
            )
            .alignment(Alignment::Center),
        rect,
    );
}
