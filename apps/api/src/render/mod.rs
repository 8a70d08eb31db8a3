// Rendering core: inline markup, per-section views and the composed preview.
// Pure and synchronous; nothing in here fails.

pub mod handlers;
pub mod markup;
pub mod preview;
pub mod section;
pub mod styles;

pub use markup::{expand_inline, insert_markup, preview_markup, MarkupAction, Selection};
pub use preview::{compose_preview, PreviewDocument, PreviewOptions};
