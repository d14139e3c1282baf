//! In-memory user/session store. Session-lifetime only — persistence is
//! deliberately out of scope.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::user::{User, UserUpdate};

/// Bearer-token keyed user store. Read-mostly from the workflow's side; the
/// optimization workflow never mutates it.
#[derive(Clone, Default)]
pub struct AuthStore {
    sessions: Arc<RwLock<HashMap<String, User>>>,
}

impl AuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a user and a bearer token. Login and signup share this path —
    /// the reference behavior accepts any credentials.
    pub async fn create_session(&self, email: &str, name: Option<&str>) -> (String, User) {
        let user = User::new(email, name);
        let token = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(token.clone(), user.clone());
        (token, user)
    }

    pub async fn current_user(&self, token: &str) -> Option<User> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Removes the session; returns whether one existed.
    pub async fn end_session(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Merges a partial update into the session's user record.
    pub async fn update_user(&self, token: &str, update: UserUpdate) -> Option<User> {
        let mut sessions = self.sessions.write().await;
        let user = sessions.get_mut(token)?;
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(credits) = update.credits {
            user.credits = credits;
        }
        if let Some(subscription) = update.subscription {
            user.subscription = subscription;
        }
        if update.expires_at.is_some() {
            user.expires_at = update.expires_at;
        }
        Some(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::FREE_PLAN;

    #[tokio::test]
    async fn test_create_session_mints_free_plan_user() {
        let store = AuthStore::new();
        let (token, user) = store.create_session("jane@example.com", None).await;
        assert_eq!(user.subscription, FREE_PLAN);
        let fetched = store.current_user(&token).await.unwrap();
        assert_eq!(fetched.email, "jane@example.com");
    }

    #[tokio::test]
    async fn test_end_session_invalidates_token() {
        let store = AuthStore::new();
        let (token, _) = store.create_session("jane@example.com", None).await;
        assert!(store.end_session(&token).await);
        assert!(store.current_user(&token).await.is_none());
        assert!(!store.end_session(&token).await);
    }

    #[tokio::test]
    async fn test_update_user_merges_partial_fields() {
        let store = AuthStore::new();
        let (token, _) = store.create_session("jane@example.com", None).await;
        let updated = store
            .update_user(
                &token,
                UserUpdate {
                    credits: Some(42),
                    subscription: Some("Pro".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.credits, 42);
        assert_eq!(updated.subscription, "Pro");
        assert_eq!(updated.email, "jane@example.com"); // untouched
    }

    #[tokio::test]
    async fn test_unknown_token_yields_no_user() {
        let store = AuthStore::new();
        assert!(store.current_user("nope").await.is_none());
        assert!(store.update_user("nope", UserUpdate::default()).await.is_none());
    }
}
