use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::directory::errors::LimitError;
use crate::directory::models::DirectoryListing;
use crate::directory::models::DirectoryQuery;
use crate::directory::models::EntryLimit;
use crate::directory::ports::DirectoryServicePort;
use crate::inbound::http::router::AppState;

/// Raw query string for `/publicapi`. Empty values count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicApiParams {
    category: Option<String>,
    limit: Option<String>,
}

impl PublicApiParams {
    fn try_into_query(self) -> Result<DirectoryQuery, LimitError> {
        let limit = self
            .limit
            .filter(|l| !l.is_empty())
            .map(|l| l.parse::<EntryLimit>())
            .transpose()?;

        Ok(DirectoryQuery {
            category: self.category.filter(|c| !c.is_empty()),
            limit,
        })
    }
}

impl From<LimitError> for ApiError {
    fn from(err: LimitError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

pub async fn public_api(
    State(state): State<AppState>,
    params: Result<Query<PublicApiParams>, QueryRejection>,
) -> Result<ApiSuccess<DirectoryListing>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let query = params.try_into_query()?;

    state
        .directory_service
        .list_entries(query)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error fetching data from the public API");
            ApiError::InternalServerError("Failed to fetch data from the public API".to_string())
        })
        .map(|listing| ApiSuccess::new(StatusCode::OK, listing))
}
