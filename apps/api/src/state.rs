use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::llm_client::LlmClient;
use crate::models::resume::{PersonInfo, ResumeContent};
use crate::storage::DocumentStore;

/// Upper bound on concurrently held sessions.
const MAX_SESSIONS: usize = 256;

/// Sessions older than this are evicted on the next insert. Documents stay
/// in the store; only the edit-flow state expires.
const SESSION_TTL_SECS: i64 = 2 * 60 * 60;

/// One generated resume held in memory for the edit/download flow.
/// The rendered PDF itself lives in the document store; the session keeps
/// the structured content so regeneration can re-render without a new LLM
/// call.
#[derive(Debug, Clone)]
pub struct ResumeSession {
    pub person: PersonInfo,
    pub content: ResumeContent,
    pub template: String,
    pub color: String,
    pub font: String,
    /// Filename of the latest rendered document in the store.
    pub filename: String,
    pub page_count: usize,
    pub created_at: DateTime<Utc>,
}

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub store: Arc<dyn DocumentStore>,
    /// In-memory session map keyed by resume id. Process-local; documents
    /// outlive the process through the store. Bounded by
    /// [`AppState::insert_session`].
    pub sessions: Arc<RwLock<HashMap<Uuid, ResumeSession>>>,
}

impl AppState {
    /// Inserts a session, first dropping expired entries and then, while
    /// still at capacity, the oldest ones. Keeps the map bounded over the
    /// lifetime of the process.
    pub async fn insert_session(&self, id: Uuid, session: ResumeSession) {
        let mut sessions = self.sessions.write().await;
        let cutoff = Utc::now() - Duration::seconds(SESSION_TTL_SECS);
        sessions.retain(|_, s| s.created_at > cutoff);
        while sessions.len() >= MAX_SESSIONS {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, s)| s.created_at)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                }
                None => break,
            }
        }
        sessions.insert(id, session);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
