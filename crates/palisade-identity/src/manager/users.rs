//! User CRUD operations.

use crate::{
    credentials,
    errors::{ManagerError, Result},
    types::{current_timestamp, User},
};
use palisade_storage::{get_key, KEY_DELIMITER, TYPE_USER};
use tracing::info;

use super::Manager;

impl Manager {
    /// Create a user keyed by its name, hashing and storing the secret.
    ///
    /// Fails with a validation error if the name is empty and a duplicate
    /// error if a user with this name already exists. Audit fields are
    /// stamped from the context user.
    pub async fn add_user(&self, context: &User, user: User, secret: &str) -> Result<User> {
        if user.name.is_empty() {
            return Err(ManagerError::Validation(
                "user name must not be empty".to_string(),
            ));
        }

        let key = get_key(TYPE_USER, &[&user.name]);

        if self.system.exists(&key).await? {
            return Err(ManagerError::Duplicate {
                entity: "user",
                name: user.name,
            });
        }

        let now = current_timestamp();
        let stored = User {
            secret_hash: credentials::hash_secret(secret)?,
            created: now,
            updated: now,
            created_by: context.name.clone(),
            updated_by: context.name.clone(),
            ..user
        };

        self.system.put(&key, &stored).await?;

        info!("User added: {}", stored.name);
        Ok(stored)
    }

    /// Get a user by name
    pub async fn get_user(&self, _context: &User, name: &str) -> Result<User> {
        self.system
            .get(&get_key(TYPE_USER, &[name]))
            .await?
            .ok_or_else(|| ManagerError::NotFound {
                entity: "user",
                name: name.to_string(),
            })
    }

    /// List all users
    pub async fn get_all_users(&self, _context: &User) -> Result<Vec<User>> {
        let mut prefix = get_key(TYPE_USER, &[]);
        prefix.extend_from_slice(KEY_DELIMITER.as_bytes());

        let records: Vec<(Vec<u8>, User)> = self.system.get_by_prefix(&prefix).await?;

        Ok(records.into_iter().map(|(_, user)| user).collect())
    }

    /// Verify a user's secret against the stored credential hash.
    ///
    /// Returns the user on success; a mismatch is a validation error so
    /// callers cannot distinguish it from other credential failures.
    pub async fn verify_user_secret(
        &self,
        context: &User,
        name: &str,
        secret: &str,
    ) -> Result<User> {
        let user = self.get_user(context, name).await?;

        if !credentials::verify_secret(secret, &user.secret_hash)? {
            return Err(ManagerError::Validation(format!(
                "invalid secret for user: {name}"
            )));
        }

        Ok(user)
    }
}
