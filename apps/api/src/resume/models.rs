//! Resume Data Model: personal information plus an ordered list of typed sections.
//!
//! The serde shape is the interchange format: camelCase keys, sections tagged by `type`,
//! kind-specific toggles stored flat next to the common section fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn visible() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    /// Lightweight-markup text, expanded at render time.
    pub summary: String,
    pub profile_image: Option<String>,
    pub show_location: bool,
    pub show_website: bool,
    #[serde(rename = "showLinkedIn")]
    pub show_linkedin: bool,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        PersonalInfo {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            location: String::new(),
            website: String::new(),
            linkedin: String::new(),
            summary: String::new(),
            profile_image: None,
            show_location: true,
            show_website: true,
            show_linkedin: true,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Items
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceItem {
    pub position: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    pub achievements: Vec<String>,
    pub image: Option<String>,
    pub is_visible: bool,
}

impl Default for ExperienceItem {
    fn default() -> Self {
        ExperienceItem {
            position: String::new(),
            company: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            description: String::new(),
            achievements: Vec::new(),
            image: None,
            is_visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationItem {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
    pub description: String,
    pub image: Option<String>,
    pub is_visible: bool,
}

impl Default for EducationItem {
    fn default() -> Self {
        EducationItem {
            degree: String::new(),
            institution: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            gpa: String::new(),
            description: String::new(),
            image: None,
            is_visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkillItem {
    pub name: String,
    pub level: String,
    pub category: String,
    pub is_visible: bool,
}

impl Default for SkillItem {
    fn default() -> Self {
        SkillItem {
            name: String::new(),
            level: "Intermediate".to_string(),
            category: String::new(),
            is_visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectItem {
    pub name: String,
    pub description: String,
    /// Comma-delimited list, split into tags at render time.
    pub technologies: String,
    pub start_date: String,
    pub end_date: String,
    pub url: String,
    pub github: String,
    pub image: Option<String>,
    pub is_visible: bool,
}

impl Default for ProjectItem {
    fn default() -> Self {
        ProjectItem {
            name: String::new(),
            description: String::new(),
            technologies: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            url: String::new(),
            github: String::new(),
            image: None,
            is_visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AwardItem {
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
    pub is_visible: bool,
}

impl Default for AwardItem {
    fn default() -> Self {
        AwardItem {
            title: String::new(),
            issuer: String::new(),
            date: String::new(),
            description: String::new(),
            is_visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificationItem {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub expiry_date: String,
    pub credential_id: String,
    pub url: String,
    pub is_visible: bool,
}

impl Default for CertificationItem {
    fn default() -> Self {
        CertificationItem {
            name: String::new(),
            issuer: String::new(),
            date: String::new(),
            expiry_date: String::new(),
            credential_id: String::new(),
            url: String::new(),
            is_visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LanguageItem {
    pub language: String,
    pub proficiency: String,
    pub is_visible: bool,
}

impl Default for LanguageItem {
    fn default() -> Self {
        LanguageItem {
            language: String::new(),
            proficiency: "Conversational".to_string(),
            is_visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolunteerItem {
    pub organization: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub is_visible: bool,
}

impl Default for VolunteerItem {
    fn default() -> Self {
        VolunteerItem {
            organization: String::new(),
            role: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
            is_visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PublicationItem {
    pub title: String,
    pub publisher: String,
    pub date: String,
    pub url: String,
    pub description: String,
    pub is_visible: bool,
}

impl Default for PublicationItem {
    fn default() -> Self {
        PublicationItem {
            title: String::new(),
            publisher: String::new(),
            date: String::new(),
            url: String::new(),
            description: String::new(),
            is_visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomItem {
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub description: String,
    pub is_visible: bool,
}

impl Default for CustomItem {
    fn default() -> Self {
        CustomItem {
            title: String::new(),
            subtitle: String::new(),
            date: String::new(),
            description: String::new(),
            is_visible: true,
        }
    }
}

/// Item of a section type this model does not know; its fields are kept as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericItem {
    #[serde(rename = "isVisible", default = "visible")]
    pub is_visible: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Default for GenericItem {
    fn default() -> Self {
        GenericItem {
            is_visible: true,
            fields: Map::new(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Experience,
    Education,
    Skills,
    Projects,
    Awards,
    Certifications,
    Languages,
    Volunteer,
    Publications,
    Custom,
}

impl SectionKind {
    pub const ALL: [SectionKind; 10] = [
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Awards,
        SectionKind::Certifications,
        SectionKind::Languages,
        SectionKind::Volunteer,
        SectionKind::Publications,
        SectionKind::Custom,
    ];

    /// Kind whose `type` tag is `name`, if any.
    pub fn from_name(name: &str) -> Option<SectionKind> {
        SectionKind::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Awards => "awards",
            SectionKind::Certifications => "certifications",
            SectionKind::Languages => "languages",
            SectionKind::Volunteer => "volunteer",
            SectionKind::Publications => "publications",
            SectionKind::Custom => "custom",
        }
    }

    /// Title given to a freshly added section of this kind.
    pub fn default_title(&self) -> &'static str {
        match self {
            SectionKind::Experience => "Work Experience",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Projects => "Projects",
            SectionKind::Awards => "Awards & Achievements",
            SectionKind::Certifications => "Certifications",
            SectionKind::Languages => "Languages",
            SectionKind::Volunteer => "Volunteer Experience",
            SectionKind::Publications => "Publications",
            SectionKind::Custom => "Custom Section",
        }
    }
}

/// Display toggles. Each one is declared by exactly one section kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionToggle {
    #[serde(rename = "showCompanyLocation")]
    ShowCompanyLocation,
    #[serde(rename = "showDates")]
    ShowDates,
    #[serde(rename = "showLocation")]
    ShowLocation,
    #[serde(rename = "showGPA")]
    ShowGpa,
}

/// Kind-specific part of a section: its items and the toggles the kind declares.
///
/// A `type` outside [`SectionKind`] lands in [`SectionBody::Other`] instead of
/// failing, so documents written by newer editors still load and render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "lowercase",
    rename_all_fields = "camelCase",
    expecting = "a section body matching its type"
)]
pub enum SectionBody {
    Experience {
        #[serde(default)]
        items: Vec<ExperienceItem>,
        #[serde(default)]
        show_company_location: bool,
        #[serde(default)]
        show_dates: bool,
    },
    Education {
        #[serde(default)]
        items: Vec<EducationItem>,
        #[serde(default)]
        show_location: bool,
        #[serde(default, rename = "showGPA")]
        show_gpa: bool,
    },
    Skills {
        #[serde(default)]
        items: Vec<SkillItem>,
    },
    Projects {
        #[serde(default)]
        items: Vec<ProjectItem>,
    },
    Awards {
        #[serde(default)]
        items: Vec<AwardItem>,
    },
    Certifications {
        #[serde(default)]
        items: Vec<CertificationItem>,
    },
    Languages {
        #[serde(default)]
        items: Vec<LanguageItem>,
    },
    Volunteer {
        #[serde(default)]
        items: Vec<VolunteerItem>,
    },
    Publications {
        #[serde(default)]
        items: Vec<PublicationItem>,
    },
    Custom {
        #[serde(default)]
        items: Vec<CustomItem>,
    },
    #[serde(untagged)]
    Other(OtherBody),
}

/// Section of an unregistered type. Registered type names are refused here so a
/// malformed `experience` section is an error rather than a silently generic one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOtherBody")]
pub struct OtherBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub items: Vec<GenericItem>,
}

#[derive(Deserialize)]
struct RawOtherBody {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    items: Vec<GenericItem>,
}

impl TryFrom<RawOtherBody> for OtherBody {
    type Error = String;

    fn try_from(raw: RawOtherBody) -> Result<Self, Self::Error> {
        if SectionKind::from_name(&raw.kind).is_some() {
            return Err(format!("malformed '{}' section", raw.kind));
        }
        Ok(OtherBody {
            kind: raw.kind,
            items: raw.items,
        })
    }
}

/// Expands `$e` once per section kind with `$items` bound to that kind's item vector.
macro_rules! with_items {
    ($body:expr, $items:ident => $e:expr) => {
        match $body {
            $crate::resume::models::SectionBody::Experience { items: $items, .. } => $e,
            $crate::resume::models::SectionBody::Education { items: $items, .. } => $e,
            $crate::resume::models::SectionBody::Skills { items: $items } => $e,
            $crate::resume::models::SectionBody::Projects { items: $items } => $e,
            $crate::resume::models::SectionBody::Awards { items: $items } => $e,
            $crate::resume::models::SectionBody::Certifications { items: $items } => $e,
            $crate::resume::models::SectionBody::Languages { items: $items } => $e,
            $crate::resume::models::SectionBody::Volunteer { items: $items } => $e,
            $crate::resume::models::SectionBody::Publications { items: $items } => $e,
            $crate::resume::models::SectionBody::Custom { items: $items } => $e,
            $crate::resume::models::SectionBody::Other($crate::resume::models::OtherBody {
                items: $items,
                ..
            }) => $e,
        }
    };
}
pub(crate) use with_items;

impl SectionBody {
    /// Empty body with the kind's toggles switched on.
    pub fn empty(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Experience => SectionBody::Experience {
                items: Vec::new(),
                show_company_location: true,
                show_dates: true,
            },
            SectionKind::Education => SectionBody::Education {
                items: Vec::new(),
                show_location: true,
                show_gpa: true,
            },
            SectionKind::Skills => SectionBody::Skills { items: Vec::new() },
            SectionKind::Projects => SectionBody::Projects { items: Vec::new() },
            SectionKind::Awards => SectionBody::Awards { items: Vec::new() },
            SectionKind::Certifications => SectionBody::Certifications { items: Vec::new() },
            SectionKind::Languages => SectionBody::Languages { items: Vec::new() },
            SectionKind::Volunteer => SectionBody::Volunteer { items: Vec::new() },
            SectionKind::Publications => SectionBody::Publications { items: Vec::new() },
            SectionKind::Custom => SectionBody::Custom { items: Vec::new() },
        }
    }

    /// Registered kind, or `None` for a section of an unknown type.
    pub fn kind(&self) -> Option<SectionKind> {
        let kind = match self {
            SectionBody::Experience { .. } => SectionKind::Experience,
            SectionBody::Education { .. } => SectionKind::Education,
            SectionBody::Skills { .. } => SectionKind::Skills,
            SectionBody::Projects { .. } => SectionKind::Projects,
            SectionBody::Awards { .. } => SectionKind::Awards,
            SectionBody::Certifications { .. } => SectionKind::Certifications,
            SectionBody::Languages { .. } => SectionKind::Languages,
            SectionBody::Volunteer { .. } => SectionKind::Volunteer,
            SectionBody::Publications { .. } => SectionKind::Publications,
            SectionBody::Custom { .. } => SectionKind::Custom,
            SectionBody::Other(_) => return None,
        };
        Some(kind)
    }

    /// The `type` tag as written in the interchange format.
    pub fn type_name(&self) -> &str {
        match self {
            SectionBody::Other(other) => &other.kind,
            known => known.kind().map(|kind| kind.as_str()).unwrap_or_default(),
        }
    }

    pub fn item_count(&self) -> usize {
        with_items!(self, items => items.len())
    }

    pub fn visible_item_count(&self) -> usize {
        with_items!(self, items => items.iter().filter(|item| item.is_visible).count())
    }

    /// Current value of `toggle`, or `None` when this kind does not declare it.
    pub fn toggle(&self, toggle: SectionToggle) -> Option<bool> {
        match (self, toggle) {
            (
                SectionBody::Experience {
                    show_company_location,
                    ..
                },
                SectionToggle::ShowCompanyLocation,
            ) => Some(*show_company_location),
            (SectionBody::Experience { show_dates, .. }, SectionToggle::ShowDates) => {
                Some(*show_dates)
            }
            (SectionBody::Education { show_location, .. }, SectionToggle::ShowLocation) => {
                Some(*show_location)
            }
            (SectionBody::Education { show_gpa, .. }, SectionToggle::ShowGpa) => Some(*show_gpa),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default = "visible")]
    pub is_visible: bool,
    // The kind is fixed at creation; only the editor reaches inside.
    #[serde(flatten)]
    pub(super) body: SectionBody,
}

impl Section {
    pub fn new(id: impl Into<String>, kind: SectionKind) -> Self {
        Section::with_body(id, kind.default_title(), SectionBody::empty(kind))
    }

    pub fn with_body(id: impl Into<String>, title: impl Into<String>, body: SectionBody) -> Self {
        Section {
            id: id.into(),
            title: title.into(),
            is_visible: true,
            body,
        }
    }

    pub fn kind(&self) -> Option<SectionKind> {
        self.body.kind()
    }

    pub fn body(&self) -> &SectionBody {
        &self.body
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resume
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Default for Resume {
    /// Blank resume seeded with the four standard sections.
    fn default() -> Self {
        Resume {
            personal_info: PersonalInfo::default(),
            sections: [
                SectionKind::Experience,
                SectionKind::Education,
                SectionKind::Skills,
                SectionKind::Projects,
            ]
            .into_iter()
            .map(|kind| Section::new(kind.as_str(), kind))
            .collect(),
        }
    }
}

impl Resume {
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}
