use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use common::auth::bearer_token;
use common::models::UserClaims;

use crate::handlers::ErrorResponse;
use crate::state::AppState;

/// Attach JWT claims to the request when a valid bearer token is present
///
/// Requests without a token, or with one that fails validation, continue
/// anonymously; authorization is decided per route by [`admin_only`].
#[tracing::instrument(skip(state, req, next))]
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token);

    if let Some(token) = token {
        match state.jwt_service.decode_token(token) {
            Ok(claims) => {
                tracing::debug!(username = %claims.username, is_admin = claims.is_admin, "Authenticated request");
                req.extensions_mut().insert(claims);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring invalid bearer token");
            }
        }
    }

    next.run(req).await
}

/// Reject requests that are not made by an admin
pub async fn admin_only(req: Request, next: Next) -> Response {
    match req.extensions().get::<UserClaims>() {
        Some(claims) if claims.is_admin => {
            tracing::info!(
                username = %claims.username,
                method = %req.method(),
                path = %req.uri().path(),
                "Admin operation"
            );
            next.run(req).await
        }
        Some(claims) => {
            tracing::warn!(username = %claims.username, "Non-admin user attempted admin operation");
            ErrorResponse::new("unauthorized", "Unauthorized").into_response()
        }
        None => ErrorResponse::new("unauthorized", "Unauthorized").into_response(),
    }
}
