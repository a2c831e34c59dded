use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;

pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized access";
pub const FORBIDDEN_MESSAGE: &str = "forbidden access";

/// Authenticated caller extracted from the token cookie
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
    pub claims: Claims,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email.clone(),
            claims,
        }
    }
}

impl AuthUser {
    /// Callers may only read their own listings
    pub fn ensure_owner(&self, email: &str) -> Result<(), ApiError> {
        if self.email != email {
            tracing::warn!("Token for '{}' used to access listings of '{}'", self.email, email);
            return Err(ApiError::forbidden(FORBIDDEN_MESSAGE));
        }
        Ok(())
    }
}

/// Token guard: verifies the token cookie and injects [`AuthUser`] before
/// the handler runs. Missing or invalid tokens never reach the handler.
pub async fn verify_token(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(state.cookie_name())
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::debug!("Rejected {}: no token cookie", request.uri().path());
            ApiError::unauthorized(UNAUTHORIZED_MESSAGE)
        })?;

    let claims = state.tokens.verify(&token).map_err(|e| {
        tracing::warn!("Rejected {}: {}", request.uri().path(), e);
        ApiError::unauthorized(UNAUTHORIZED_MESSAGE)
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::Map;

    fn user(email: &str) -> AuthUser {
        AuthUser::from(Claims { email: email.to_string(), iat: 0, exp: 0, extra: Map::new() })
    }

    #[test]
    fn owner_passes() {
        assert!(user("a@x.com").ensure_owner("a@x.com").is_ok());
    }

    #[test]
    fn other_email_is_forbidden() {
        let err = user("b@x.com").ensure_owner("a@x.com").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.message(), FORBIDDEN_MESSAGE);
    }
}
