//! Template Registry: static catalogue of template identifiers, categories and metadata.
//!
//! Process-wide immutable reference data. Every lookup is pure and falls back to the
//! `modern` entry when the identifier is unknown.

use serde::{Deserialize, Serialize};

/// Identifier every failed lookup resolves to.
pub const DEFAULT_TEMPLATE_ID: &str = "modern";

/// All registered identifiers, in registry order.
pub const TEMPLATE_IDS: &[&str] = &[
    "modern",
    "classic",
    "minimal",
    "creative",
    "executive",
    "technical",
    "academic",
    "startup",
    "consultant",
    "modern-1",
    "classic-1",
    "creative-1",
    "minimal-1",
    "modern-2",
    "classic-2",
    "creative-2",
    "minimal-2",
    "modern-3",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Modern,
    Classic,
    Creative,
    Minimal,
}

impl TemplateCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::Modern => "modern",
            TemplateCategory::Classic => "classic",
            TemplateCategory::Creative => "creative",
            TemplateCategory::Minimal => "minimal",
        }
    }
}

const CATEGORY_MEMBERS: &[(TemplateCategory, &[&str])] = &[
    (
        TemplateCategory::Modern,
        &["modern", "modern-1", "modern-2", "modern-3", "technical", "startup"],
    ),
    (
        TemplateCategory::Classic,
        &["classic", "classic-1", "classic-2", "executive", "academic"],
    ),
    (
        TemplateCategory::Creative,
        &["creative", "creative-1", "creative-2"],
    ),
    (
        TemplateCategory::Minimal,
        &["minimal", "minimal-1", "minimal-2", "consultant"],
    ),
];

/// Display metadata shown next to a template in the picker and editor header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateMetadata {
    pub name: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
}

const fn meta(
    name: &'static str,
    description: &'static str,
    features: &'static [&'static str],
) -> TemplateMetadata {
    TemplateMetadata {
        name,
        description,
        features,
    }
}

// First entry must stay `modern`: it doubles as the fallback.
static METADATA: &[(&str, TemplateMetadata)] = &[
    (
        "modern",
        meta(
            "Modern",
            "Clean and contemporary design",
            &["ATS-Friendly", "Two-Column Layout"],
        ),
    ),
    (
        "classic",
        meta(
            "Classic",
            "Traditional professional layout",
            &["Single Column", "Professional Typography"],
        ),
    ),
    (
        "minimal",
        meta(
            "Minimal",
            "Simple and elegant design",
            &["Minimalist Design", "Maximum Readability"],
        ),
    ),
    (
        "creative",
        meta(
            "Creative",
            "Bold and eye-catching layout",
            &["Visual Elements", "Custom Graphics"],
        ),
    ),
    (
        "modern-1",
        meta(
            "Modern Professional",
            "Clean, contemporary design perfect for tech professionals",
            &["ATS-Friendly", "Skills Visualization"],
        ),
    ),
    (
        "classic-1",
        meta(
            "Executive Classic",
            "Traditional format ideal for senior positions",
            &["Executive Format", "Leadership Focus"],
        ),
    ),
    (
        "creative-1",
        meta(
            "Creative Designer",
            "Eye-catching design for creative professionals",
            &["Portfolio Section", "Visual Elements"],
        ),
    ),
    (
        "minimal-1",
        meta(
            "Minimal Clean",
            "Simple, elegant design focusing on content",
            &["Clean Typography", "Print Optimized"],
        ),
    ),
    (
        "modern-2",
        meta(
            "Tech Innovator",
            "Modern template designed for tech professionals",
            &["Skills Visualization", "Project Showcase"],
        ),
    ),
    (
        "classic-2",
        meta(
            "Academic Scholar",
            "Perfect for academic positions and research roles",
            &["Publications Section", "Research Focus"],
        ),
    ),
    (
        "creative-2",
        meta(
            "Marketing Pro",
            "Dynamic design for marketing professionals",
            &["Achievement Highlights", "Visual Metrics"],
        ),
    ),
    (
        "minimal-2",
        meta(
            "Simple Elegance",
            "Understated elegance for any professional field",
            &["Clean Typography", "Subtle Accents"],
        ),
    ),
    (
        "modern-3",
        meta(
            "Startup Founder",
            "Bold, innovative design for entrepreneurs",
            &["Leadership Focus", "Venture Highlights"],
        ),
    ),
];

/// One catalogue row, as served to template pickers.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateSummary {
    pub id: &'static str,
    pub category: TemplateCategory,
    pub metadata: &'static TemplateMetadata,
}

pub fn list_templates() -> &'static [&'static str] {
    TEMPLATE_IDS
}

pub fn is_registered(id: &str) -> bool {
    TEMPLATE_IDS.contains(&id)
}

/// Category for `id`; unknown identifiers are treated as `modern`.
pub fn category_of(id: &str) -> TemplateCategory {
    CATEGORY_MEMBERS
        .iter()
        .find(|(_, members)| members.contains(&id))
        .map(|(category, _)| *category)
        .unwrap_or(TemplateCategory::Modern)
}

/// Metadata for `id`, or the `modern` metadata when none is declared.
///
/// Some registered identifiers (`executive`, `technical`, ...) have no metadata of their
/// own and also land on the fallback.
pub fn metadata_of(id: &str) -> &'static TemplateMetadata {
    let (_, metadata) = METADATA
        .iter()
        .find(|(key, _)| *key == id)
        .unwrap_or(&METADATA[0]);
    metadata
}

pub fn template_summaries() -> Vec<TemplateSummary> {
    TEMPLATE_IDS
        .iter()
        .map(|&id| TemplateSummary {
            id,
            category: category_of(id),
            metadata: metadata_of(id),
        })
        .collect()
}
