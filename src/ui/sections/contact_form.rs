use crate::ui::page::{FormFieldId, FormLabels, RichLine, RichSpan, Slot};
use crate::ui::style::StyleRole;
use crate::ui::Action;

use super::{heading, paragraph, TemplateCtx};

pub fn lines(ctx: &TemplateCtx) -> Vec<RichLine> {
    let mut out = heading(ctx, &ctx.t.t("contact.title"));
    out.extend(paragraph(ctx, &ctx.t.t("contact.intro"), StyleRole::Text));
    out.push(RichLine::from_spans(vec![RichSpan::action(
        ctx.profile.email(),
        StyleRole::Link,
        Action::OpenEmail,
    )]));
    out.push(RichLine::blank());

    field(&mut out, ctx, FormFieldId::Name, "contact.form.nameLabel", "contact.form.namePlaceholder");
    field(&mut out, ctx, FormFieldId::Email, "contact.form.emailLabel", "contact.form.emailPlaceholder");
    field(&mut out, ctx, FormFieldId::Message, "contact.form.messageLabel", "contact.form.messagePlaceholder");

    out.push(RichLine::slot(Slot::Submit, Vec::new()));
    out.push(RichLine::slot(Slot::FormStatus, Vec::new()));
    out.push(RichLine::blank());
    out
}

/// Label line, input slot (placeholder text in the spans), error slot.
fn field(out: &mut Vec<RichLine>, ctx: &TemplateCtx, id: FormFieldId, label_key: &str, placeholder_key: &str) {
    out.push(RichLine::plain(ctx.t.t(label_key), StyleRole::Label));
    out.push(RichLine::slot(
        Slot::Field(id),
        vec![RichSpan::new(ctx.t.t(placeholder_key), StyleRole::Placeholder)],
    ));
    out.push(RichLine::slot(Slot::FieldError(id), Vec::new()));
}

/// Submit-control labels for the composed language.
pub fn labels(ctx: &TemplateCtx) -> FormLabels {
    FormLabels {
        submit: ctx.t.t("contact.form.submit"),
        sending: ctx.t.t("contact.form.sending"),
        unavailable: ctx.t.t("contact.form.unavailable"),
    }
}
