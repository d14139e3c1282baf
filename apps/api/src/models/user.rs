//! Session-store user record. The optimization workflow reads this and
//! never mutates it; all mutation goes through the auth store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const FREE_PLAN: &str = "Free";
pub const SIGNUP_CREDITS: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub credits: u32,
    pub subscription: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl User {
    /// Mints a fresh Free-plan user, deriving a display name from the email
    /// local part when none is given.
    pub fn new(email: &str, name: Option<&str>) -> Self {
        let derived = email.split('@').next().unwrap_or(email).to_string();
        User {
            id: Uuid::new_v4(),
            name: name
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .unwrap_or(derived),
            email: email.to_string(),
            credits: SIGNUP_CREDITS,
            subscription: FREE_PLAN.to_string(),
            expires_at: None,
        }
    }
}

/// Partial user update accepted by the auth store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub credits: Option<u32>,
    pub subscription: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_starts_on_free_plan_with_credits() {
        let user = User::new("jane@example.com", None);
        assert_eq!(user.subscription, FREE_PLAN);
        assert_eq!(user.credits, SIGNUP_CREDITS);
        assert!(user.expires_at.is_none());
    }

    #[test]
    fn test_name_falls_back_to_email_local_part() {
        let user = User::new("jane.doe@example.com", None);
        assert_eq!(user.name, "jane.doe");
        let named = User::new("jane@example.com", Some("Jane Doe"));
        assert_eq!(named.name, "Jane Doe");
    }

    #[test]
    fn test_user_serializes_expires_at_camel_case() {
        let user = User::new("jane@example.com", None);
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"expiresAt\":null"));
    }
}
