//! Account Model

use serde::{Deserialize, Serialize};
use shared::types::{Role, Timestamp};
use surrealdb::RecordId;

use super::serde_helpers;

/// Account ID type
pub type AccountId = RecordId;

/// Account model matching the `account` table
///
/// The credential hash is never serialized out and never logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<AccountId>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub role: Role,
    pub created_at: Timestamp,
}

impl Account {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Id as a `table:key` string, empty if unsaved
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|t| t.to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_roundtrip() {
        let hash = Account::hash_password("hunter22").unwrap();
        let account = Account {
            id: None,
            name: "Mario".into(),
            email: "mario@trattoria.example".into(),
            hash_pass: hash,
            role: Role::Manager,
            created_at: 0,
        };
        assert!(account.verify_password("hunter22").unwrap());
        assert!(!account.verify_password("wrong").unwrap());
    }

    #[test]
    fn hash_never_serialized() {
        let account = Account {
            id: None,
            name: "Mario".into(),
            email: "mario@trattoria.example".into(),
            hash_pass: "$argon2id$secret".into(),
            role: Role::Manager,
            created_at: 0,
        };
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("hash_pass"));
    }
}
