use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::account::models::Role;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Request-scoped identity, derived fresh from the store on every request.
///
/// Carries only what downstream handlers need; the token itself contributes
/// nothing beyond the subject.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub username: String,
    pub role: Role,
    pub enabled: bool,
}

/// Middleware that resolves a bearer token into an authenticated identity.
///
/// Never rejects a request: a missing header, a non-Bearer scheme, a token
/// that fails verification, or a subject without an account all leave the
/// request unauthenticated and let it continue. Denial is the protected
/// handler's decision, keyed on the absence of [`AuthenticatedAccount`] in
/// the request extensions.
///
/// An identity already present in the extensions is left untouched, so a
/// prior layer (or a test) can pre-seed one.
pub async fn resolve_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if req.extensions().get::<AuthenticatedAccount>().is_none() {
        if let Some(identity) = identity_from_request(&state, req.headers()).await {
            req.extensions_mut().insert(identity);
        }
    }

    next.run(req).await
}

async fn identity_from_request(
    state: &AppState,
    headers: &http::HeaderMap,
) -> Option<AuthenticatedAccount> {
    let token = bearer_token(headers)?;

    if !state.token_codec.verify(token) {
        tracing::warn!("Rejected bearer token");
        return None;
    }

    let subject = state.token_codec.extract_subject(token).ok()?;
    let username = Username::new(subject).ok()?;

    // A token can outlive its account; a missing subject degrades to an
    // unauthenticated request, same as any other resolution failure.
    let account = state.auth_service.find_account(&username).await.ok()??;

    Some(AuthenticatedAccount {
        username: account.username.to_string(),
        role: account.role,
        enabled: account.enabled,
    })
}

/// Extract the raw token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &http::HeaderMap) -> Option<&str> {
    let header = headers.get(http::header::AUTHORIZATION)?;
    header.to_str().ok()?.strip_prefix("Bearer ")
}
