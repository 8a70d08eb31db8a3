use std::sync::Arc;

use crate::config::Config;
use crate::preferences::PreferenceStore;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    /// Pluggable preference backend. Default: InMemoryPreferenceStore.
    pub preferences: Arc<dyn PreferenceStore>,
}
