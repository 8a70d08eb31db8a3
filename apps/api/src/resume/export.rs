//! Interchange export/import: a direct pretty-printed JSON dump of the [`Resume`].

use std::collections::HashSet;

use thiserror::Error;

use crate::resume::models::Resume;

/// File name offered to the browser for downloads.
pub const EXPORT_FILE_NAME: &str = "resume-data.json";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Malformed resume document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Duplicate section id '{0}'")]
    DuplicateSectionId(String),
}

pub fn export_json(resume: &Resume) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(resume)?)
}

/// Parses an exported document. Section ids must be unique.
pub fn import_json(raw: &str) -> Result<Resume, ExportError> {
    let resume: Resume = serde_json::from_str(raw)?;
    ensure_unique_ids(&resume)?;
    Ok(resume)
}

pub fn ensure_unique_ids(resume: &Resume) -> Result<(), ExportError> {
    let mut seen = HashSet::new();
    for section in &resume.sections {
        if !seen.insert(section.id.as_str()) {
            return Err(ExportError::DuplicateSectionId(section.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::models::{
        CustomItem, ExperienceItem, PersonalInfo, ProjectItem, Section, SectionBody, SectionKind,
    };
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn sample() -> Resume {
        let mut resume = Resume {
            personal_info: PersonalInfo {
                full_name: "Grace Hopper".to_string(),
                email: "grace@example.com".to_string(),
                summary: "Built **compilers**".to_string(),
                show_website: false,
                ..PersonalInfo::default()
            },
            sections: vec![],
        };
        resume.sections.push(Section::with_body(
            "experience",
            "Work",
            SectionBody::Experience {
                items: vec![ExperienceItem {
                    position: "Rear Admiral".to_string(),
                    current: true,
                    achievements: vec!["COBOL".to_string()],
                    image: Some("logo.png".to_string()),
                    ..ExperienceItem::default()
                }],
                show_company_location: false,
                show_dates: true,
            },
        ));
        resume.add_section(SectionKind::Custom);
        resume
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let resume = sample();
        let raw = export_json(&resume).unwrap();
        assert_eq!(import_json(&raw).unwrap(), resume);
    }

    #[test]
    fn test_export_is_plain_structural_dump() {
        let raw = export_json(&sample()).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["personalInfo"]["fullName"], "Grace Hopper");
        assert_eq!(value["personalInfo"]["showWebsite"], false);
        assert_eq!(value["sections"][0]["type"], "experience");
        assert_eq!(value["sections"][0]["showCompanyLocation"], false);
        assert_eq!(value["sections"][0]["items"][0]["current"], true);
        assert_eq!(value["sections"][1]["type"], "custom");
        assert!(raw.contains('\n'), "export should be pretty-printed");
    }

    #[test]
    fn test_import_keeps_unknown_section_type() {
        let section = json!({
            "id": "x",
            "title": "Hobbies",
            "isVisible": true,
            "type": "hobbies",
            "items": [{"isVisible": true, "name": "Climbing"}]
        });
        let raw = json!({ "personalInfo": {}, "sections": [section.clone()] }).to_string();
        let resume = import_json(&raw).unwrap();
        assert_eq!(resume.sections[0].kind(), None);
        assert_eq!(resume.sections[0].body().type_name(), "hobbies");

        let exported: Value = serde_json::from_str(&export_json(&resume).unwrap()).unwrap();
        assert_eq!(exported["sections"][0], section);
    }

    #[test]
    fn test_import_rejects_malformed_known_section() {
        let raw = json!({
            "sections": [{"id": "e", "type": "experience", "title": "Work", "items": "none"}]
        })
        .to_string();
        assert!(matches!(import_json(&raw), Err(ExportError::Malformed(_))));
    }

    #[test]
    fn test_import_rejects_duplicate_ids() {
        let raw = json!({
            "sections": [
                {"id": "a", "type": "skills", "title": "Skills"},
                {"id": "a", "type": "projects", "title": "Projects"}
            ]
        })
        .to_string();
        assert!(matches!(
            import_json(&raw),
            Err(ExportError::DuplicateSectionId(ref id)) if id == "a"
        ));
    }

    #[test]
    fn test_import_fills_missing_fields() {
        let raw = r#"{"sections":[{"id":"p","type":"projects","title":"P","items":[{"name":"vitae"}]}]}"#;
        let resume = import_json(raw).unwrap();
        assert!(resume.personal_info.show_location);
        match resume.sections[0].body() {
            SectionBody::Projects { items } => {
                assert_eq!(items[0].name, "vitae");
                assert!(items[0].is_visible);
            }
            other => panic!("unexpected body {other:?}"),
        }
        assert!(resume.sections[0].is_visible);
    }

    proptest! {
        #[test]
        fn prop_export_round_trip(
            name in ".{0,24}",
            summary in ".{0,64}",
            tech in "[a-zA-Z, ]{0,32}",
            visible in any::<bool>(),
            current in any::<bool>(),
            image in proptest::option::of("[a-z]{1,8}\\.png"),
        ) {
            let resume = Resume {
                personal_info: PersonalInfo {
                    full_name: name.clone(),
                    summary,
                    profile_image: image.clone(),
                    show_location: visible,
                    ..PersonalInfo::default()
                },
                sections: vec![
                    Section::with_body("e", "E", SectionBody::Experience {
                        items: vec![ExperienceItem { company: name.clone(), current, image, ..ExperienceItem::default() }],
                        show_company_location: visible,
                        show_dates: !visible,
                    }),
                    Section::with_body("p", "P", SectionBody::Projects {
                        items: vec![ProjectItem { technologies: tech, is_visible: visible, ..ProjectItem::default() }],
                    }),
                    Section::with_body("c", "C", SectionBody::Custom {
                        items: vec![CustomItem { title: name, ..CustomItem::default() }],
                    }),
                ],
            };
            let raw = export_json(&resume).unwrap();
            prop_assert_eq!(import_json(&raw).unwrap(), resume);
        }
    }
}
