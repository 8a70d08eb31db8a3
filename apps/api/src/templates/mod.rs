// Template catalogue: the closed set of visual templates and the validator that
// resolves arbitrary client input against it.

pub mod handlers;
pub mod registry;
pub mod validator;

pub use registry::{category_of, list_templates, metadata_of, TemplateCategory};
pub use validator::{validate_template, validate_template_value, TemplateValidation};
