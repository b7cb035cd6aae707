//! Account Repository

use chrono::Utc;
use shared::types::Role;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Account;

#[derive(Clone)]
pub struct AccountRepository {
    base: BaseRepository,
}

impl AccountRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find account by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM account WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let accounts: Vec<Account> = result.take(0)?;
        Ok(accounts.into_iter().next())
    }

    /// Create a new account with a hashed credential
    ///
    /// Fails with [`RepoError::Duplicate`] on an email collision. The
    /// pre-check gives a clean message; the unique index on `account.email`
    /// is the backstop under concurrency.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> RepoResult<Account> {
        if self.find_by_email(email).await?.is_some() {
            return Err(RepoError::Duplicate("User already exists".to_string()));
        }

        let hash_pass = Account::hash_password(password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE account SET
                    name = $name,
                    email = $email,
                    hash_pass = $hash_pass,
                    role = $role,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("name", name.to_string()))
            .bind(("email", email.to_string()))
            .bind(("hash_pass", hash_pass))
            .bind(("role", role))
            .bind(("created_at", Utc::now().timestamp_millis()))
            .await?;

        let created: Option<Account> = match result.take(0) {
            Ok(created) => created,
            Err(e) if e.to_string().contains("uniq_account_email") => {
                return Err(RepoError::Duplicate("User already exists".to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        created.ok_or_else(|| RepoError::Database("Failed to create account".to_string()))
    }
}
