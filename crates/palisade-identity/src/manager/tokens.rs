//! Session token operations against the token store.

use crate::{
    errors::{ManagerError, Result},
    types::{current_timestamp, Token, User},
};
use palisade_storage::{get_key, TYPE_TOKEN};
use tracing::info;
use uuid::Uuid;

use super::Manager;

impl Manager {
    /// Issue a token for an existing user.
    ///
    /// The user is resolved against the system store; the token record
    /// lives in the token store, keyed by its id.
    pub async fn issue_token(
        &self,
        context: &User,
        user_name: &str,
        ttl_secs: u64,
    ) -> Result<Token> {
        let user = self.get_user(context, user_name).await?;

        let now = current_timestamp();
        let token = Token {
            id: Uuid::new_v4().to_string(),
            user_name: user.name,
            created: now,
            expires: now + ttl_secs,
        };

        self.tokens
            .put(&get_key(TYPE_TOKEN, &[&token.id]), &token)
            .await?;

        info!("Token issued for user: {}", token.user_name);
        Ok(token)
    }

    /// Resolve a token to its user.
    ///
    /// Unknown and expired tokens are both reported as not found, so
    /// callers cannot probe for expired-but-real token ids.
    pub async fn get_user_for_token(&self, context: &User, token_id: &str) -> Result<User> {
        let not_found = || ManagerError::NotFound {
            entity: "token",
            name: token_id.to_string(),
        };

        let token: Token = self
            .tokens
            .get(&get_key(TYPE_TOKEN, &[token_id]))
            .await?
            .ok_or_else(not_found)?;

        if token.expires <= current_timestamp() {
            return Err(not_found());
        }

        self.get_user(context, &token.user_name).await
    }
}
