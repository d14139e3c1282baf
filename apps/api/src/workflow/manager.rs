//! Session manager — the single shared home of workflow sessions.
//!
//! Transitions happen under the write lock; engine runs happen OUTSIDE the
//! lock on spawned tasks and re-acquire it only to commit, presenting their
//! run token. User actions therefore serialize in issue order and an
//! in-flight completion can never jump the queue past a cancellation.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::workflow::session::{WorkflowSession, WorkflowView};

#[derive(Clone, Default)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<Uuid, WorkflowSession>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, owner: Uuid) -> WorkflowView {
        let session = WorkflowSession::new(owner);
        let view = session.view();
        self.inner.write().await.insert(session.id, session);
        view
    }

    /// Runs a closure against a session under the write lock.
    pub async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut WorkflowSession) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Workflow session {id} not found")))?;
        f(session)
    }

    pub async fn view(&self, id: Uuid) -> Result<WorkflowView, AppError> {
        let sessions = self.inner.read().await;
        sessions
            .get(&id)
            .map(|s| s.view())
            .ok_or_else(|| AppError::NotFound(format!("Workflow session {id} not found")))
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_view_round_trips() {
        let manager = SessionManager::new();
        let created = manager.create(Uuid::new_v4()).await;
        let view = manager.view(created.session_id).await.unwrap();
        assert_eq!(view.session_id, created.session_id);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let manager = SessionManager::new();
        let err = manager.view(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_remove_discards_session() {
        let manager = SessionManager::new();
        let created = manager.create(Uuid::new_v4()).await;
        assert!(manager.remove(created.session_id).await);
        assert!(manager.view(created.session_id).await.is_err());
    }
}
