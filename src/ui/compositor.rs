use crate::content::{Profile, SectionId, COMPACT_WIDTH, CONTENT_WIDTH};
use crate::i18n::Translator;

use super::page::{ActiveDropdown, ContactFormState, Page, RichLine, SectionBlock};
use super::sections::{
    self, about, certifications, contact_form, education, experience, footer, header, hero,
    projects,
};

/// Inputs that vary between rebuilds.
#[derive(Debug, Clone, Copy)]
pub struct ComposeFlags {
    pub viewport_width: u16,
    pub title_index: usize,
    pub mail_available: bool,
}

impl ComposeFlags {
    pub fn compact(&self) -> bool {
        self.viewport_width < COMPACT_WIDTH
    }

    pub fn content_width(&self) -> u16 {
        CONTENT_WIDTH.min(self.viewport_width.saturating_sub(4)).max(20)
    }
}

/// Build a fresh page from the templates, in fixed order. The caller swaps
/// it in wholesale; nothing here diffs against or patches the previous page.
pub fn compose(t: &Translator, profile: &Profile, flags: &ComposeFlags) -> Page {
    let ctx = sections::TemplateCtx {
        t,
        profile,
        width: flags.content_width(),
        compact: flags.compact(),
        title_index: flags.title_index,
        mail_available: flags.mail_available,
    };

    let mut lines: Vec<RichLine> = Vec::new();
    let mut blocks: Vec<SectionBlock> = Vec::new();

    let order: [(SectionId, fn(&sections::TemplateCtx) -> Vec<RichLine>); 7] = [
        (SectionId::Hero, hero::lines),
        (SectionId::About, about::lines),
        (SectionId::Experience, experience::lines),
        (SectionId::Education, education::lines),
        (SectionId::Certifications, certifications::lines),
        (SectionId::Projects, projects::lines),
        (SectionId::Contact, contact_form::lines),
    ];

    for (id, template) in order {
        let start = lines.len() as u16;
        let fragment = template(&ctx);
        let len = fragment.len() as u16;
        lines.extend(fragment);
        blocks.push(SectionBlock { id, start, len });
    }
    lines.extend(footer::lines(&ctx));

    log::debug!(
        "compose: {} lines, {} sections, width {}",
        lines.len(),
        blocks.len(),
        ctx.width
    );

    Page {
        lines,
        sections: blocks,
        header: header::header(&ctx),
        lang_menu: header::lang_menu(&ctx),
        menu: header::menu(&ctx),
        form: ContactFormState::new(contact_form::labels(&ctx)),
        active_locale: t.active(),
        built_width: ctx.width,
        compact: ctx.compact,
        scroll: 0,
        menu_open: false,
        dropdown: ActiveDropdown::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PROFILE;
    use crate::i18n::Locale;

    fn flags() -> ComposeFlags {
        ComposeFlags {
            viewport_width: 100,
            title_index: 0,
            mail_available: true,
        }
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let t = Translator::embedded(Locale::Es).unwrap();
        let page = compose(&t, &PROFILE, &flags());

        let ids: Vec<SectionId> = page.sections.iter().map(|b| b.id).collect();
        assert_eq!(
            ids,
            vec![
                SectionId::Hero,
                SectionId::About,
                SectionId::Experience,
                SectionId::Education,
                SectionId::Certifications,
                SectionId::Projects,
                SectionId::Contact,
            ]
        );

        // extents tile the buffer without gaps
        let mut expected_start = 0;
        for block in &page.sections {
            assert_eq!(block.start, expected_start);
            expected_start = block.end();
        }
    }

    #[test]
    fn language_flows_into_every_section() {
        let t = Translator::embedded(Locale::En).unwrap();
        let page = compose(&t, &PROFILE, &flags());
        let all_text: String = page
            .lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(all_text.contains("About me"));
        assert!(all_text.contains("Experience"));
        assert!(all_text.contains("Contact"));

        let t = Translator::embedded(Locale::Es).unwrap();
        let page = compose(&t, &PROFILE, &flags());
        let all_text: String = page
            .lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(all_text.contains("Sobre mí"));
        assert!(all_text.contains("Experiencia"));
    }

    #[test]
    fn compact_layout_narrows_content() {
        let narrow = ComposeFlags {
            viewport_width: 60,
            title_index: 0,
            mail_available: true,
        };
        assert!(narrow.compact());
        let t = Translator::embedded(Locale::Es).unwrap();
        let page = compose(&t, &PROFILE, &narrow);
        assert!(page.compact);
        for line in &page.lines {
            assert!(
                line.width() <= narrow.content_width(),
                "line too wide: {:?}",
                line.text()
            );
        }
    }

    #[test]
    fn form_slots_are_composed_once_each() {
        use crate::ui::page::{FormFieldId, Slot};
        let t = Translator::embedded(Locale::Pt).unwrap();
        let page = compose(&t, &PROFILE, &flags());
        for id in FormFieldId::ALL {
            assert!(page.slot_line(Slot::Field(id)).is_some());
            assert!(page.slot_line(Slot::FieldError(id)).is_some());
        }
        assert!(page.slot_line(Slot::Submit).is_some());
        assert!(page.slot_line(Slot::FormStatus).is_some());

        let field_count = page
            .lines
            .iter()
            .filter(|l| matches!(l.slot, Some(Slot::Field(_))))
            .count();
        assert_eq!(field_count, 3);
    }
}
