//! Preview Composer: header, summary and rendered sections in resume order.
//!
//! Stateless: re-run on every edit. The template only picks presentation styling;
//! what appears is decided by the visibility flags alone.

use serde::Serialize;
use tracing::debug;

use crate::render::markup::{expand_inline, RichText};
use crate::render::section::{render_section, RenderedSection};
use crate::render::styles::{style_for, TemplateStyle};
use crate::resume::models::{PersonalInfo, Resume};
use crate::templates::{category_of, TemplateCategory};

const NAME_PLACEHOLDER: &str = "Your Name";
const SUMMARY_TITLE: &str = "Professional Summary";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewOptions {
    pub dark_mode: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Email,
    Phone,
    Location,
    Website,
    Linkedin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactField {
    pub kind: ContactKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub name: String,
    pub profile_image: Option<String>,
    /// Plain contact line: email, phone, location.
    pub contacts: Vec<ContactField>,
    /// Link line: website, LinkedIn.
    pub links: Vec<ContactField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryBlock {
    pub title: &'static str,
    pub body: RichText,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewDocument {
    pub template_id: String,
    pub category: TemplateCategory,
    pub style: TemplateStyle,
    pub dark_mode: bool,
    pub header: Header,
    pub summary: Option<SummaryBlock>,
    pub sections: Vec<RenderedSection>,
}

/// Composes the full preview for an already-resolved template identifier.
pub fn compose_preview(
    resume: &Resume,
    template_id: &str,
    options: PreviewOptions,
) -> PreviewDocument {
    let category = category_of(template_id);
    let sections: Vec<RenderedSection> =
        resume.sections.iter().filter_map(render_section).collect();

    debug!(
        "Composed preview: template={} category={} sections={}/{}",
        template_id,
        category.as_str(),
        sections.len(),
        resume.sections.len()
    );

    PreviewDocument {
        template_id: template_id.to_string(),
        category,
        style: style_for(category, options.dark_mode),
        dark_mode: options.dark_mode,
        header: compose_header(&resume.personal_info),
        summary: (!resume.personal_info.summary.is_empty()).then(|| SummaryBlock {
            title: SUMMARY_TITLE,
            body: expand_inline(&resume.personal_info.summary),
        }),
        sections,
    }
}

fn compose_header(info: &PersonalInfo) -> Header {
    let field = |kind: ContactKind, value: &str, shown: bool| {
        (shown && !value.is_empty()).then(|| ContactField {
            kind,
            value: value.to_string(),
        })
    };

    let contacts = [
        field(ContactKind::Email, &info.email, true),
        field(ContactKind::Phone, &info.phone, true),
        field(ContactKind::Location, &info.location, info.show_location),
    ];
    let links = [
        field(ContactKind::Website, &info.website, info.show_website),
        field(ContactKind::Linkedin, &info.linkedin, info.show_linkedin),
    ];

    Header {
        name: if info.full_name.is_empty() {
            NAME_PLACEHOLDER.to_string()
        } else {
            info.full_name.clone()
        },
        profile_image: info.profile_image.clone(),
        contacts: contacts.into_iter().flatten().collect(),
        links: links.into_iter().flatten().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::SectionKind;
    use crate::templates::list_templates;
    use serde_json::json;

    fn resume() -> Resume {
        let mut resume = Resume {
            personal_info: PersonalInfo {
                full_name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                location: "London".to_string(),
                website: "https://ada.dev".to_string(),
                linkedin: "https://linkedin.com/in/ada".to_string(),
                summary: "Wrote the **first** program".to_string(),
                show_location: false,
                ..PersonalInfo::default()
            },
            ..Resume::default()
        };
        resume.add_item("experience").unwrap();
        resume
            .update_item(
                "experience",
                0,
                &serde_json::from_value(json!({"position": "Analyst", "company": "Babbage & Co"}))
                    .unwrap(),
            )
            .unwrap();
        resume.add_item("skills").unwrap();
        resume.toggle_item_visibility("skills", 0).unwrap();
        resume
    }

    #[test]
    fn test_header_respects_contact_toggles() {
        let doc = compose_preview(&resume(), "modern", PreviewOptions::default());
        let contact_kinds: Vec<_> = doc.header.contacts.iter().map(|c| c.kind).collect();
        assert_eq!(contact_kinds, vec![ContactKind::Email]);
        let link_kinds: Vec<_> = doc.header.links.iter().map(|c| c.kind).collect();
        assert_eq!(link_kinds, vec![ContactKind::Website, ContactKind::Linkedin]);
        assert_eq!(doc.header.name, "Ada Lovelace");
    }

    #[test]
    fn test_name_placeholder() {
        let doc = compose_preview(&Resume::default(), "modern", PreviewOptions::default());
        assert_eq!(doc.header.name, "Your Name");
        assert!(doc.header.contacts.is_empty());
        assert!(doc.summary.is_none());
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_summary_is_expanded() {
        let doc = compose_preview(&resume(), "classic", PreviewOptions::default());
        let summary = doc.summary.expect("summary");
        assert_eq!(summary.title, "Professional Summary");
        assert_eq!(summary.body.as_str(), "Wrote the <strong>first</strong> program");
    }

    #[test]
    fn test_empty_sections_are_skipped_in_order() {
        let mut resume = resume();
        let extra = resume.add_section(SectionKind::Custom).id.clone();
        resume.add_item(&extra).unwrap();
        let doc = compose_preview(&resume, "modern", PreviewOptions::default());
        let ids: Vec<_> = doc.sections.iter().map(|s| s.id.as_str()).collect();
        // education and projects are empty, the only skill is hidden
        assert_eq!(ids, vec!["experience", extra.as_str()]);
    }

    #[test]
    fn test_template_changes_style_not_content() {
        let resume = resume();
        let baseline = compose_preview(&resume, "modern", PreviewOptions::default());
        for id in list_templates() {
            let doc = compose_preview(&resume, id, PreviewOptions { dark_mode: true });
            assert_eq!(doc.header, baseline.header);
            assert_eq!(doc.summary, baseline.summary);
            assert_eq!(doc.sections, baseline.sections);
        }
        let creative = compose_preview(&resume, "creative-1", PreviewOptions::default());
        assert_eq!(creative.category, TemplateCategory::Creative);
        assert_ne!(creative.style, baseline.style);
    }

    #[test]
    fn test_unknown_template_styles_as_modern() {
        let doc = compose_preview(&resume(), "bogus", PreviewOptions::default());
        assert_eq!(doc.category, TemplateCategory::Modern);
    }

    #[test]
    fn test_hidden_section_is_absent() {
        let mut resume = resume();
        resume.toggle_section_visibility("experience").unwrap();
        let doc = compose_preview(&resume, "modern", PreviewOptions::default());
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_document_shape() {
        let mut resume = Resume::default();
        resume.add_item("skills").unwrap();
        resume
            .update_item("skills", 0, &serde_json::from_value(json!({"name": "Rust"})).unwrap())
            .unwrap();
        let value = serde_json::to_value(compose_preview(
            &resume,
            "minimal",
            PreviewOptions::default(),
        ))
        .unwrap();
        assert_eq!(value["templateId"], "minimal");
        assert_eq!(value["category"], "minimal");
        assert_eq!(value["style"]["header"]["kind"], "bordered");
        assert_eq!(value["sections"][0]["layout"], "skills");
        assert_eq!(value["sections"][0]["badges"][0], "Rust");
    }
}
