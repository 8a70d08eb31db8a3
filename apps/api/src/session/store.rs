//! In-memory session store.
//!
//! A session is the single writer of its resume. Mutations run under the store's
//! write lock, so each edit is applied atomically before the next one is seen.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::Resume;
use crate::templates::registry::DEFAULT_TEMPLATE_ID;
use crate::templates::{validate_template, validate_template_value, TemplateValidation};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSession {
    pub id: Uuid,
    pub resume: Resume,
    /// Always a registered identifier.
    pub template_id: String,
    /// Advisory message from the last rejected template choice.
    pub template_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EditorSession {
    /// New session with the default resume. A supplied template is validated; with no
    /// template the session opens on the default one without an advisory.
    pub fn new(template: Option<&str>) -> Self {
        let validation = match template {
            Some(candidate) => validate_template(Some(candidate)),
            None => TemplateValidation {
                is_valid: true,
                resolved_id: DEFAULT_TEMPLATE_ID.to_string(),
                error: None,
            },
        };
        let now = Utc::now();
        EditorSession {
            id: Uuid::new_v4(),
            resume: Resume::default(),
            template_id: validation.resolved_id,
            template_error: validation.error,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn select_template(&mut self, candidate: &Value) -> TemplateValidation {
        let validation = validate_template_value(candidate);
        self.template_id = validation.resolved_id.clone();
        self.template_error = validation.error.clone();
        self.touch();
        validation
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, EditorSession>>>,
    capacity: usize,
    /// Sessions untouched for longer than this are evicted.
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(capacity: usize, idle_ttl: Duration) -> Self {
        SessionStore {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            capacity,
            idle_ttl,
        }
    }

    /// Opens a session. Callers run [`SessionStore::evict_idle`] first so abandoned
    /// sessions do not hold capacity.
    pub async fn create(&self, template: Option<&str>) -> Result<EditorSession, AppError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.capacity {
            return Err(AppError::Conflict(format!(
                "Session limit of {} reached",
                self.capacity
            )));
        }

        let session = EditorSession::new(template);
        info!(
            "Opened session {} (template: {})",
            session.id, session.template_id
        );
        sessions.insert(session.id, session.clone());
        Ok(session)
    }

    pub async fn get(&self, id: Uuid) -> Result<EditorSession, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| session_not_found(id))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| info!("Closed session {id}"))
            .ok_or_else(|| session_not_found(id))
    }

    /// Runs `edit` against the session; on success bumps `updated_at` and returns the
    /// edit's output together with a snapshot of the session.
    pub async fn update<T, F>(&self, id: Uuid, edit: F) -> Result<(T, EditorSession), AppError>
    where
        F: FnOnce(&mut EditorSession) -> Result<T, AppError>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
        let output = edit(session)?;
        session.touch();
        Ok((output, session.clone()))
    }

    /// Drops every session idle for longer than the configured TTL; returns their ids.
    pub async fn evict_idle(&self) -> Vec<Uuid> {
        self.evict_untouched_since(Utc::now() - self.idle_ttl).await
    }

    async fn evict_untouched_since(&self, cutoff: DateTime<Utc>) -> Vec<Uuid> {
        let mut sessions = self.sessions.write().await;
        let stale: Vec<Uuid> = sessions
            .values()
            .filter(|session| session.updated_at < cutoff)
            .map(|session| session.id)
            .collect();
        for id in &stale {
            sessions.remove(id);
        }
        if !stale.is_empty() {
            info!("Evicted {} idle sessions", stale.len());
        }
        stale
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
