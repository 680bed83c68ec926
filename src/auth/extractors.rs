use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::User;

/// Resolves the bearer token from the Authorization header to a full
/// user row, which is then handed to the handler explicitly.
pub struct AuthUser(pub User);

/// Like [`AuthUser`], but additionally requires the Admin role.
pub struct AdminUser(pub User);

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthenticated("Missing Authorization header"))?;
    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .ok_or(ApiError::Unauthenticated("Invalid Authorization header"))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user = User::find_by_token(&state.db, token)
            .await?
            .ok_or(ApiError::Unauthenticated("Invalid or expired token"))?;
        Ok(AuthUser(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::warn!(user_id = %user.id, "admin endpoint denied");
            return Err(ApiError::Forbidden);
        }
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/profile");
        if let Some(v) = value {
            builder = builder.header(axum::http::header::AUTHORIZATION, v);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn bearer_token_strips_scheme() {
        let parts = parts_with_auth(Some("Bearer abc123"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc123");
    }

    #[test]
    fn missing_header_is_unauthenticated() {
        let parts = parts_with_auth(None);
        assert!(matches!(
            bearer_token(&parts),
            Err(ApiError::Unauthenticated(_))
        ));
    }

    #[test]
    fn wrong_scheme_is_unauthenticated() {
        let parts = parts_with_auth(Some("Basic abc123"));
        assert!(matches!(
            bearer_token(&parts),
            Err(ApiError::Unauthenticated(_))
        ));
    }
}
