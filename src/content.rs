use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Below this terminal width the header collapses into the hamburger menu
/// and the language switcher opens as a bottom sheet.
pub const COMPACT_WIDTH: u16 = 80;

/// Maximum text column for the page body.
pub const CONTENT_WIDTH: u16 = 72;

/// One accepted contact submission per window.
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Toast lifetime.
pub const TOAST_LIFETIME: Duration = Duration::from_millis(1500);

/// How long a success or failure notice stays under the form.
pub const NOTICE_LIFETIME: Duration = Duration::from_secs(5);

/// Hero title rotation period.
pub const TITLE_ROTATE_PERIOD: Duration = Duration::from_secs(4);

/// One dragged terminal row in sheet-gesture units.
pub const DRAG_UNITS_PER_ROW: u32 = 40;

/// Page sections in composition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Hero,
    About,
    Experience,
    Education,
    Certifications,
    Projects,
    Contact,
}

impl SectionId {
    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::About => "about",
            SectionId::Experience => "experience",
            SectionId::Education => "education",
            SectionId::Certifications => "certifications",
            SectionId::Projects => "projects",
            SectionId::Contact => "contact",
        }
    }

    /// Catalog key of the nav label. Hero and certifications have no nav
    /// entry.
    pub fn nav_key(self) -> Option<&'static str> {
        match self {
            SectionId::About => Some("nav.about"),
            SectionId::Experience => Some("nav.experience"),
            SectionId::Education => Some("nav.education"),
            SectionId::Projects => Some("nav.projects"),
            SectionId::Contact => Some("nav.contact"),
            SectionId::Hero | SectionId::Certifications => None,
        }
    }
}

/// Sections reachable from the nav, in order.
pub const NAV_SECTIONS: [SectionId; 5] = [
    SectionId::About,
    SectionId::Experience,
    SectionId::Education,
    SectionId::Projects,
    SectionId::Contact,
];

/// Locale-independent profile data. Locale-dependent records (experience,
/// education, projects, ...) live in the catalogs.
pub struct Profile {
    pub name: &'static str,
    pub years: u32,
    pub github: &'static str,
    pub linkedin: &'static str,
    pub cv_asset: &'static str,
    /// Base64 at rest so the address never appears verbatim in the binary's
    /// string table.
    email_encoded: &'static str,
}

pub const PROFILE: Profile = Profile {
    name: "Andrés Vega",
    years: 8,
    github: "https://github.com/avega-dev",
    linkedin: "https://www.linkedin.com/in/avega-dev",
    cv_asset: "assets/andres-vega-cv.pdf",
    email_encoded: "YW5kcmVzQHZlZ2EuZGV2",
};

impl Profile {
    pub fn email(&self) -> String {
        match BASE64.decode(self.email_encoded) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(addr) => addr,
                Err(e) => {
                    log::warn!("profile: email decode produced invalid UTF-8: {}", e);
                    String::new()
                }
            },
            Err(e) => {
                log::warn!("profile: email decode failed: {}", e);
                String::new()
            }
        }
    }
}

pub struct Skill {
    pub name: &'static str,
    pub tag: &'static str,
}

pub const SKILLS: [Skill; 8] = [
    Skill { name: "Rust", tag: "backend" },
    Skill { name: "Tokio", tag: "async" },
    Skill { name: "PostgreSQL", tag: "data" },
    Skill { name: "Redis", tag: "cache" },
    Skill { name: "Kubernetes", tag: "infra" },
    Skill { name: "AWS", tag: "cloud" },
    Skill { name: "gRPC", tag: "apis" },
    Skill { name: "Terraform", tag: "infra" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_decodes_to_plain_address() {
        let addr = PROFILE.email();
        assert!(addr.contains('@'));
        assert!(!addr.is_empty());
    }

    #[test]
    fn nav_sections_all_carry_labels() {
        for section in NAV_SECTIONS {
            assert!(section.nav_key().is_some(), "{:?}", section);
        }
        assert!(SectionId::Hero.nav_key().is_none());
        assert!(SectionId::Certifications.nav_key().is_none());
    }
}
