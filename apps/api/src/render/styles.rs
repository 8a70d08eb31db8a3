//! Presentation tokens per template category. Styling only; content selection never
//! depends on anything in here.

use serde::Serialize;

use crate::templates::TemplateCategory;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeaderBackground {
    Gradient {
        from: &'static str,
        to: &'static str,
    },
    Solid {
        color: &'static str,
    },
    /// Plain page background with a bottom rule; header text keeps the body colour.
    Bordered {
        border: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStyle {
    pub header: HeaderBackground,
    /// Colour of section heading rules.
    pub accent: &'static str,
    pub text: &'static str,
    /// Colour of the name and contact line inside the header.
    pub header_text: &'static str,
    pub section_spacing_rem: f32,
}

impl TemplateStyle {
    /// True when the header sits on a filled background and needs light text.
    pub fn inverted_header(&self) -> bool {
        !matches!(self.header, HeaderBackground::Bordered { .. })
    }
}

pub fn style_for(category: TemplateCategory, dark_mode: bool) -> TemplateStyle {
    let mut style = base_style(category, dark_mode);
    if style.inverted_header() {
        style.header_text = "#ffffff";
    }
    style
}

fn base_style(category: TemplateCategory, dark_mode: bool) -> TemplateStyle {
    let text = if dark_mode { "#ffffff" } else { "#111827" };
    match category {
        TemplateCategory::Modern => TemplateStyle {
            header: HeaderBackground::Gradient {
                from: "#2563eb",
                to: "#9333ea",
            },
            accent: "#2563eb",
            text,
            header_text: text,
            section_spacing_rem: 2.0,
        },
        TemplateCategory::Classic => TemplateStyle {
            header: HeaderBackground::Solid {
                color: if dark_mode { "#1f2937" } else { "#111827" },
            },
            accent: "#4b5563",
            text,
            header_text: text,
            section_spacing_rem: 1.5,
        },
        TemplateCategory::Creative => TemplateStyle {
            header: HeaderBackground::Gradient {
                from: "#ec4899",
                to: "#f97316",
            },
            accent: "#ec4899",
            text,
            header_text: text,
            section_spacing_rem: 2.5,
        },
        TemplateCategory::Minimal => TemplateStyle {
            header: HeaderBackground::Bordered {
                border: if dark_mode { "#374151" } else { "#e5e7eb" },
            },
            accent: "#9ca3af",
            text,
            header_text: text,
            section_spacing_rem: 1.5,
        },
    }
}
