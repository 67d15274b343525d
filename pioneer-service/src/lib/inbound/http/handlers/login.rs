use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::CredentialsRequest;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let credentials = CredentialsRequest::parse(payload)
        .ok_or_else(|| ApiError::Forbidden("username or password is missing".to_string()))?;

    let user = state
        .user_service
        .get_user_by_username(&credentials.username)
        .await
        .map_err(|e| match e {
            UserError::NotFoundByUsername(_) => ApiError::NotFound("User not found".to_string()),
            e => {
                tracing::error!(error = %e, "Error logging in");
                ApiError::InternalServerError("Failed to login".to_string())
            }
        })?;

    let claims =
        auth::Claims::for_user(user.username.as_str()).with_lifetime(state.jwt_expiration_hours);

    let result = state
        .authenticator
        .authenticate(&credentials.password, &user.password_hash, &claims)
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => {
                tracing::warn!(username = %user.username, "Login rejected: invalid password");
                ApiError::Unauthorized("Invalid password".to_string())
            }
            e => {
                tracing::error!(username = %user.username, error = %e, "Error logging in");
                ApiError::InternalServerError("Failed to login".to_string())
            }
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            token: result.access_token,
            username: user.username.as_str().to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub username: String,
}
