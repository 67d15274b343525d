use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::ApiError;
use super::ApiSuccess;
use super::CredentialsRequest;
use super::MessageResponseData;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let credentials = CredentialsRequest::parse(payload)
        .ok_or_else(|| ApiError::BadRequest("Missing fields!".to_string()))?;

    state
        .user_service
        .register_user(credentials)
        .await
        .map_err(|e| match e {
            UserError::UsernameAlreadyExists(_) => {
                ApiError::BadRequest("Username already exists".to_string())
            }
            e => {
                tracing::error!(error = %e, "Error registering user");
                ApiError::InternalServerError("Failed to register user".to_string())
            }
        })
        .map(|_| {
            ApiSuccess::new(
                StatusCode::CREATED,
                MessageResponseData::new("User registered successfully"),
            )
        })
}
