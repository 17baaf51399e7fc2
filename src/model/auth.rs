use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{generate_id, hash_password, sha256_hex, Id};

/// Sessions live for 24 hours from login
const SESSION_TTL_HOURS: i64 = 24;

/// A staff account on the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Id,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Salted SHA-256 of the password; never serialized to API responses
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub salt: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn new(email: String, display_name: Option<String>, password: &str, is_admin: bool) -> Self {
        let now = Utc::now();
        let salt = generate_id();
        let password_hash = hash_password(&salt, password);
        Self {
            id: generate_id(),
            email,
            display_name,
            password_hash,
            salt,
            is_admin,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn verify_password(&self, password: &str) -> bool {
        hash_password(&self.salt, password) == self.password_hash
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUserAccount {
    pub email: String,
    pub display_name: Option<String>,
    pub password: String,
    pub is_admin: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A bearer-token session; only the token hash is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Id,
    pub user_id: Id,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session for the user from a raw token. The raw token is handed
    /// to the client exactly once; only its hash is kept here.
    pub fn create_for_user(user_id: Id, raw_token: &str) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            user_id,
            token_hash: sha256_hex(raw_token),
            created_at: now,
            expires_at: now + Duration::hours(SESSION_TTL_HOURS),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// A registered passkey (WebAuthn credential) for an account.
///
/// Credentials are recorded and listed for device inventory; assertion-based
/// login is not part of this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasskeyCredential {
    pub id: Id,
    pub user_id: Id,
    /// Credential ID as reported by the authenticator, hex-encoded
    pub credential_id: String,
    /// Public key bytes, hex-encoded
    #[serde(skip_serializing)]
    pub public_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPasskeyCredential {
    pub challenge: String,
    pub credential_id: String,
    pub public_key: String,
    pub label: Option<String>,
}

impl NewPasskeyCredential {
    pub fn into_credential(self, user_id: Id) -> PasskeyCredential {
        PasskeyCredential {
            id: generate_id(),
            user_id,
            credential_id: self.credential_id,
            public_key: self.public_key,
            label: self.label,
            created_at: Utc::now(),
        }
    }
}

/// Authenticated caller attached to a request by the bearer-token extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: Id,
    pub email: String,
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_roundtrip() {
        let user = UserAccount::new("ops@label.example".to_string(), None, "s3cret", false);
        assert!(user.verify_password("s3cret"));
        assert!(!user.verify_password("wrong"));
    }

    #[test]
    fn session_stores_hash_not_token() {
        let token = "raw-token-value";
        let session = Session::create_for_user("user-1".to_string(), token);
        assert_ne!(session.token_hash, token);
        assert_eq!(session.token_hash, sha256_hex(token));
        assert!(!session.is_expired());
    }

    #[test]
    fn secrets_never_serialize() {
        let user = UserAccount::new("ops@label.example".to_string(), None, "s3cret", true);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("salt"));
    }
}
