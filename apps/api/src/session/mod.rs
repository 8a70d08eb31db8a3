// Editing sessions: each one exclusively owns a resume and its template choice.

pub mod handlers;
pub mod store;

pub use store::{EditorSession, SessionStore};
