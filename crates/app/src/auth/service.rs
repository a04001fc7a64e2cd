//! Auth service.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::auth::{
    AuthServiceError, IssuedSession, NewSession, Role, Session, UserUuid, generate_session_token,
    hash_session_token, repository::PgAuthRepository,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new session token for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be stored.
    pub async fn issue_session(
        &self,
        user: UserUuid,
        role: Role,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedSession, AuthServiceError> {
        let token = generate_session_token();

        let record = self
            .repository
            .create_session(&NewSession {
                uuid: Uuid::now_v7(),
                user,
                role,
                token_hash: hash_session_token(&token),
                expires_at,
            })
            .await?;

        Ok(IssuedSession { token, record })
    }

    /// Revoke a session by UUID. Returns `true` if the session was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_session(&self, uuid: Uuid) -> Result<bool, AuthServiceError> {
        Ok(self.repository.revoke_session(uuid).await?.is_some())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Session, AuthServiceError> {
        let record = self
            .repository
            .find_active_session(&hash_session_token(bearer_token), Timestamp::now())
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        debug!(user_uuid = %record.user, role = %record.role, "authenticated session");

        Ok(record.session())
    }
}

/// Fixed token table, for development servers and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuthService {
    sessions: HashMap<String, Session>,
}

impl MemoryAuthService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `token` as a bearer token for `session`.
    #[must_use]
    pub fn with_session(mut self, token: impl Into<String>, session: Session) -> Self {
        self.sessions.insert(hash_session_token(&token.into()), session);

        self
    }
}

#[async_trait]
impl AuthService for MemoryAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Session, AuthServiceError> {
        self.sessions
            .get(&hash_session_token(bearer_token))
            .copied()
            .ok_or(AuthServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the session it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Session, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn memory_auth_resolves_known_tokens() -> TestResult {
        let admin = Session::admin(UserUuid::new());
        let auth = MemoryAuthService::new().with_session("secret", admin);

        assert_eq!(auth.authenticate_bearer("secret").await?, admin);

        Ok(())
    }

    #[tokio::test]
    async fn memory_auth_rejects_unknown_tokens() {
        let auth = MemoryAuthService::new().with_session("secret", Session::customer(UserUuid::new()));

        let result = auth.authenticate_bearer("other").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
