use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use super::MessageResponseData;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn protected(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<MessageResponseData> {
    tracing::debug!(username = %user.username, "Protected route accessed");

    ApiSuccess::new(
        StatusCode::OK,
        MessageResponseData::new("Protected route accessed successfully"),
    )
}
