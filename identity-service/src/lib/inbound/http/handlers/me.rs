use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;

/// Return the identity attached to the request by the resolver.
///
/// This is where absence of identity turns into a denial: the resolver never
/// rejects a request itself, so every protected endpoint checks for the
/// attached identity and answers 401 when there is none.
pub async fn me(
    identity: Option<Extension<AuthenticatedAccount>>,
) -> Result<ApiSuccess<IdentityResponseData>, ApiError> {
    let Extension(account) =
        identity.ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        IdentityResponseData {
            username: account.username,
            role: account.role.to_string(),
            enabled: account.enabled,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityResponseData {
    pub username: String,
    pub role: String,
    pub enabled: bool,
}
