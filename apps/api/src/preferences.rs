//! Key-value preference port. The editor's theme choice lives here, keyed per session,
//! so the rendering core never reaches for ambient storage itself.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Storage backend for small string preferences.
///
/// Carried in `AppState` as `Arc<dyn PreferenceStore>`.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String);
    async fn remove(&self, key: &str);
}

/// Process-local store; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryPreferenceStore {
    values: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) {
        self.values.write().await.insert(key.to_string(), value);
    }

    async fn remove(&self, key: &str) {
        self.values.write().await.remove(key);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown theme '{0}', expected 'light' or 'dark'")]
pub struct UnknownTheme(String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

fn theme_key(session_id: Uuid) -> String {
    format!("theme:{session_id}")
}

/// Stored theme for a session; `fallback` when unset or unreadable.
pub async fn load_theme(store: &dyn PreferenceStore, session_id: Uuid, fallback: Theme) -> Theme {
    store
        .get(&theme_key(session_id))
        .await
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(fallback)
}

pub async fn save_theme(store: &dyn PreferenceStore, session_id: Uuid, theme: Theme) {
    store
        .set(&theme_key(session_id), theme.as_str().to_string())
        .await;
}

pub async fn forget_theme(store: &dyn PreferenceStore, session_id: Uuid) {
    store.remove(&theme_key(session_id)).await;
}
