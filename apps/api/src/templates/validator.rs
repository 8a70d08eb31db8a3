//! Template Validator: resolves a candidate identifier against the registry.
//!
//! Never fails: an unusable candidate resolves to `modern` and carries an advisory
//! message the caller is expected to surface.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::templates::registry::{is_registered, list_templates, DEFAULT_TEMPLATE_ID};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateValidation {
    pub is_valid: bool,
    pub resolved_id: String,
    pub error: Option<String>,
}

impl TemplateValidation {
    fn rejected(error: String) -> Self {
        TemplateValidation {
            is_valid: false,
            resolved_id: DEFAULT_TEMPLATE_ID.to_string(),
            error: Some(error),
        }
    }
}

/// Validates a textual candidate. `None` and the empty string count as missing.
pub fn validate_template(candidate: Option<&str>) -> TemplateValidation {
    let id = match candidate {
        Some(id) if !id.is_empty() => id,
        _ => {
            warn!("Template validation failed: missing template id");
            return TemplateValidation::rejected("Invalid template ID".to_string());
        }
    };

    if !is_registered(id) {
        warn!("Template validation failed: unknown template '{id}'");
        return TemplateValidation::rejected(format!(
            "Template \"{}\" not found. Available templates: {}",
            id,
            list_templates().join(", ")
        ));
    }

    TemplateValidation {
        is_valid: true,
        resolved_id: id.to_string(),
        error: None,
    }
}

/// Validates untyped client input; anything but a JSON string is "not a textual identifier".
pub fn validate_template_value(candidate: &Value) -> TemplateValidation {
    validate_template(candidate.as_str())
}
