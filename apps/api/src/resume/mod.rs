// Resume data model, its editing operations and the JSON interchange format.

pub mod editor;
pub mod export;
pub mod models;

pub use editor::{EditError, FieldPatch};
pub use export::{export_json, import_json, ExportError, EXPORT_FILE_NAME};
pub use models::{PersonalInfo, Resume, Section, SectionKind, SectionToggle};
