//! Section Renderer: turns one [`Section`] into a display-ready view.
//!
//! A section renders to `None` when it is hidden or when none of its items are
//! visible; a heading is never emitted without content under it.

use serde::Serialize;
use serde_json::Value;

use crate::render::markup::{expand_inline, RichText};
use crate::resume::models::{
    AwardItem, CertificationItem, CustomItem, EducationItem, ExperienceItem, GenericItem,
    LanguageItem, ProjectItem, PublicationItem, Section, SectionBody, VolunteerItem,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSection {
    pub id: String,
    pub title: String,
    /// The section's `type` tag, registered or not.
    pub kind: String,
    #[serde(flatten)]
    pub content: SectionContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum SectionContent {
    Experience { entries: Vec<ExperienceEntry> },
    Education { entries: Vec<EducationEntry> },
    Skills { badges: Vec<String> },
    Projects { entries: Vec<ProjectEntry> },
    /// Labelled field list used by the kinds without a dedicated layout.
    Fields { entries: Vec<Vec<LabeledField>> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub position: String,
    pub company: String,
    pub location: Option<String>,
    pub dates: Option<String>,
    pub description: Option<RichText>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub location: Option<String>,
    pub gpa: Option<String>,
    pub dates: Option<String>,
    pub description: Option<RichText>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub name: String,
    pub url: Option<String>,
    pub github: Option<String>,
    pub technologies: Vec<String>,
    pub dates: Option<String>,
    pub description: Option<RichText>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledField {
    pub label: String,
    pub value: String,
}

pub fn render_section(section: &Section) -> Option<RenderedSection> {
    if !section.is_visible || section.body().visible_item_count() == 0 {
        return None;
    }

    let content = match section.body() {
        SectionBody::Experience {
            items,
            show_company_location,
            show_dates,
        } => SectionContent::Experience {
            entries: items
                .iter()
                .filter(|item| item.is_visible)
                .map(|item| experience_entry(item, *show_company_location, *show_dates))
                .collect(),
        },
        SectionBody::Education {
            items,
            show_location,
            show_gpa,
        } => SectionContent::Education {
            entries: items
                .iter()
                .filter(|item| item.is_visible)
                .map(|item| education_entry(item, *show_location, *show_gpa))
                .collect(),
        },
        SectionBody::Skills { items } => SectionContent::Skills {
            badges: items
                .iter()
                .filter(|item| item.is_visible)
                .map(|item| item.name.clone())
                .collect(),
        },
        SectionBody::Projects { items } => SectionContent::Projects {
            entries: items
                .iter()
                .filter(|item| item.is_visible)
                .map(project_entry)
                .collect(),
        },
        SectionBody::Awards { items } => field_entries(items.iter().filter(|i| i.is_visible)),
        SectionBody::Certifications { items } => {
            field_entries(items.iter().filter(|i| i.is_visible))
        }
        SectionBody::Languages { items } => field_entries(items.iter().filter(|i| i.is_visible)),
        SectionBody::Volunteer { items } => field_entries(items.iter().filter(|i| i.is_visible)),
        SectionBody::Publications { items } => {
            field_entries(items.iter().filter(|i| i.is_visible))
        }
        SectionBody::Custom { items } => field_entries(items.iter().filter(|i| i.is_visible)),
        SectionBody::Other(other) => SectionContent::Fields {
            entries: other
                .items
                .iter()
                .filter(|item| item.is_visible)
                .map(generic_fields)
                .collect(),
        },
    };

    Some(RenderedSection {
        id: section.id.clone(),
        title: section.title.clone(),
        kind: section.body().type_name().to_string(),
        content,
    })
}

fn experience_entry(item: &ExperienceItem, show_location: bool, show_dates: bool) -> ExperienceEntry {
    let dates = if show_dates {
        let end = if item.current { "Present" } else { item.end_date.as_str() };
        // A lone "current" flag with no dates entered shows nothing.
        if item.start_date.is_empty() && item.end_date.is_empty() {
            None
        } else {
            date_range(&item.start_date, end)
        }
    } else {
        None
    };

    ExperienceEntry {
        position: item.position.clone(),
        company: item.company.clone(),
        location: show_location.then(|| non_empty(&item.location)).flatten(),
        dates,
        description: non_empty(&item.description).map(|d| expand_inline(&d)),
        image: item.image.clone(),
    }
}

fn education_entry(item: &EducationItem, show_location: bool, show_gpa: bool) -> EducationEntry {
    EducationEntry {
        degree: item.degree.clone(),
        institution: item.institution.clone(),
        location: show_location.then(|| non_empty(&item.location)).flatten(),
        gpa: show_gpa.then(|| non_empty(&item.gpa)).flatten(),
        dates: date_range(&item.start_date, &item.end_date),
        description: non_empty(&item.description).map(|d| expand_inline(&d)),
        image: item.image.clone(),
    }
}

fn project_entry(item: &ProjectItem) -> ProjectEntry {
    ProjectEntry {
        name: item.name.clone(),
        url: non_empty(&item.url),
        github: non_empty(&item.github),
        technologies: split_technologies(&item.technologies),
        dates: date_range(&item.start_date, &item.end_date),
        description: non_empty(&item.description).map(|d| expand_inline(&d)),
        image: item.image.clone(),
    }
}

/// `start – end`; a range with one side missing shows only the other side.
fn date_range(start: &str, end: &str) -> Option<String> {
    match (start.is_empty(), end.is_empty()) {
        (true, true) => None,
        (false, true) => Some(start.to_string()),
        (true, false) => Some(end.to_string()),
        (false, false) => Some(format!("{start} – {end}")),
    }
}

fn split_technologies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Labelled field layout
// ────────────────────────────────────────────────────────────────────────────

/// Items rendered as a plain label/value list, fields in declaration order.
trait LabeledFields {
    fn labeled_fields(&self) -> Vec<(&'static str, &str)>;
}

impl LabeledFields for AwardItem {
    fn labeled_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Title", self.title.as_str()),
            ("Issuer", self.issuer.as_str()),
            ("Date", self.date.as_str()),
            ("Description", self.description.as_str()),
        ]
    }
}

impl LabeledFields for CertificationItem {
    fn labeled_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Name", self.name.as_str()),
            ("Issuer", self.issuer.as_str()),
            ("Date", self.date.as_str()),
            ("Expires", self.expiry_date.as_str()),
            ("Credential ID", self.credential_id.as_str()),
            ("URL", self.url.as_str()),
        ]
    }
}

impl LabeledFields for LanguageItem {
    fn labeled_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Language", self.language.as_str()),
            ("Proficiency", self.proficiency.as_str()),
        ]
    }
}

impl LabeledFields for VolunteerItem {
    fn labeled_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Organization", self.organization.as_str()),
            ("Role", self.role.as_str()),
            ("Start", self.start_date.as_str()),
            ("End", self.end_date.as_str()),
            ("Description", self.description.as_str()),
        ]
    }
}

impl LabeledFields for PublicationItem {
    fn labeled_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Title", self.title.as_str()),
            ("Publisher", self.publisher.as_str()),
            ("Date", self.date.as_str()),
            ("URL", self.url.as_str()),
            ("Description", self.description.as_str()),
        ]
    }
}

impl LabeledFields for CustomItem {
    fn labeled_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Title", self.title.as_str()),
            ("Subtitle", self.subtitle.as_str()),
            ("Date", self.date.as_str()),
            ("Description", self.description.as_str()),
        ]
    }
}

fn field_entries<'a, T, I>(items: I) -> SectionContent
where
    T: LabeledFields + 'a,
    I: Iterator<Item = &'a T>,
{
    SectionContent::Fields {
        entries: items
            .map(|item| {
                item.labeled_fields()
                    .into_iter()
                    .filter(|(_, value)| !value.is_empty())
                    .map(|(label, value)| LabeledField {
                        label: label.to_string(),
                        value: value.to_string(),
                    })
                    .collect()
            })
            .collect(),
    }
}

/// Fields of an unknown-type item, keyed by their own names. Nulls and empty strings
/// are dropped; nested values are shown as compact JSON.
fn generic_fields(item: &GenericItem) -> Vec<LabeledField> {
    item.fields
        .iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (!value.is_empty()).then(|| LabeledField {
                label: key.clone(),
                value,
            })
        })
        .collect()
}
