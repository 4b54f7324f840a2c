//! API key row mapping.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Why a stored key cannot authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRejection {
    Revoked,
    Expired,
}

#[derive(Debug, Clone, FromRow)]
pub struct ApiKeyEntity {
    pub id: i64,
    pub key_hash: String,
    pub key_prefix: String,
    pub name: String,
    /// `None` only for admin keys.
    pub team_id: Option<i64>,
    pub is_active: bool,
    pub is_admin: bool,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ApiKeyEntity {
    /// `None` when the key authenticates at `at`.
    pub fn rejection_at(&self, at: DateTime<Utc>) -> Option<KeyRejection> {
        if !self.is_active {
            Some(KeyRejection::Revoked)
        } else if self.expires_at.is_some_and(|expires| expires < at) {
            Some(KeyRejection::Expired)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn key(is_active: bool, expires_at: Option<DateTime<Utc>>) -> ApiKeyEntity {
        ApiKeyEntity {
            id: 1,
            key_hash: "0".repeat(64),
            key_prefix: "sg_aBcDe123".to_string(),
            name: "Gate camera feed".to_string(),
            team_id: Some(7),
            is_active,
            is_admin: false,
            last_used_at: None,
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[test]
    fn test_active_key_without_expiry() {
        assert_eq!(key(true, None).rejection_at(Utc::now()), None);
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let k = key(true, Some(now));
        assert_eq!(k.rejection_at(now - Duration::seconds(1)), None);
        assert_eq!(
            k.rejection_at(now + Duration::seconds(1)),
            Some(KeyRejection::Expired)
        );
    }

    #[test]
    fn test_revocation_wins_over_expiry() {
        let k = key(false, Some(Utc::now() - Duration::days(1)));
        assert_eq!(k.rejection_at(Utc::now()), Some(KeyRejection::Revoked));
    }
}
