//! User profile records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A resolved user profile.
///
/// Private fields (`email`, `payout_data`, ...) are only present when the
/// request was authorized as that user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub payout_data: Option<serde_json::Value>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub badges: u64,
    #[serde(default)]
    pub auth_providers: Option<Vec<String>>,
    #[serde(default)]
    pub email_verified: Option<bool>,
    #[serde(default)]
    pub has_password: Option<bool>,
    #[serde(default)]
    pub has_totp: Option<bool>,
    #[serde(default)]
    pub github_id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_public_profile() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "EEFF0011",
            "username": "jellysquid3",
            "name": null,
            "bio": "Hello",
            "avatar_url": "https://cdn.example/avatar.png",
            "created": "2020-11-01T00:00:00Z",
            "role": "developer",
            "badges": 0,
            "github_id": 12345
        }))
        .unwrap();

        assert_eq!(user.username, "jellysquid3");
        assert_eq!(user.role, "developer");
        assert!(user.email.is_none());
        assert!(user.has_totp.is_none());
        assert_eq!(user.github_id, Some(12345));
    }
}
