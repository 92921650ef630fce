//! Identity sync — verifies bearer tokens against the hosted identity
//! provider and lazily mirrors the account into the local users table.
//!
//! Token verification is fully delegated: the token is passed to the
//! provider's user-info endpoint and the reply is trusted. A valid token for
//! an unknown account creates the local row on first request; an account
//! created before provider login is linked by email.

use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use reqwest::Client;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

const VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// The identity provider's view of the authenticated account.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    pub email: String,
}

/// Thin client for the identity provider's user-info endpoint.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl AuthClient {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(VERIFY_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            anon_key,
        }
    }

    /// Verifies a bearer token with the identity provider. Any failure —
    /// unreachable provider, non-success status, malformed reply — is an
    /// authentication error; the caller never learns which.
    pub async fn verify(&self, token: &str) -> Result<ProviderUser, AppError> {
        let url = format!("{}/auth/v1/user", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                warn!("Identity provider unreachable: {e}");
                AppError::Unauthorized
            })?;

        if !response.status().is_success() {
            return Err(AppError::Unauthorized);
        }

        response.json::<ProviderUser>().await.map_err(|e| {
            warn!("Identity provider returned malformed user payload: {e}");
            AppError::Unauthorized
        })
    }
}

/// Looks up the local user for a verified provider account, creating or
/// linking it as needed. The insert upserts on email so concurrent first
/// logins for the same account cannot duplicate rows.
pub async fn sync_user(pool: &PgPool, provider: &ProviderUser) -> Result<User, AppError> {
    let existing = sqlx::query_as::<_, User>("SELECT * FROM users WHERE provider_id = $1")
        .bind(&provider.id)
        .fetch_optional(pool)
        .await?;

    if let Some(user) = existing {
        return Ok(user);
    }

    // Either a pre-provider account to link by email, or a brand-new user.
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, provider_id, email, is_active)
        VALUES ($1, $2, $3, TRUE)
        ON CONFLICT (email) DO UPDATE SET provider_id = EXCLUDED.provider_id
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&provider.id)
    .bind(&provider.email)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Extractor giving handlers the authenticated, locally-synced user.
/// Every endpoint except /health and the public challenge catalog uses it.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        let provider_user = state.auth.verify(token).await?;
        let user = sync_user(&state.db, &provider_user).await?;
        Ok(CurrentUser(user))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header(AUTHORIZATION, v);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_extracted() {
        let parts = parts_with_auth(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header_yields_none() {
        let parts = parts_with_auth(None);
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_non_bearer_scheme_rejected() {
        let parts = parts_with_auth(Some("Basic dXNlcjpwdw=="));
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_empty_token_rejected() {
        let parts = parts_with_auth(Some("Bearer "));
        assert_eq!(bearer_token(&parts), None);
    }
}
