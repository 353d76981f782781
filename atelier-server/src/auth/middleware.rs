use atelier_model::AuthUser;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use super::jwt::validate_token;
use crate::{AppState, errors::AppError};

/// Require a valid bearer token and stash the caller's identity in request
/// extensions for handlers to pick up.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&request)
        .ok_or_else(|| AppError::unauthorized("authentication required"))?;
    let user = resolve_user(&state, &token)
        .ok_or_else(|| AppError::unauthorized("invalid or expired token"))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Like [`auth_middleware`], but anonymous requests pass through with no
/// identity attached.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_bearer_token(&request)
        && let Some(user) = resolve_user(&state, &token)
    {
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

fn extract_bearer_token(request: &Request) -> Option<String> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())?;

    auth_header
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}

fn resolve_user(state: &AppState, token: &str) -> Option<AuthUser> {
    let claims = validate_token(token, &state.config.auth_token_key).ok()?;
    Some(AuthUser::new(claims.sub, claims.roles))
}
