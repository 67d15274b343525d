use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::protected::protected;
use super::handlers::public_api::public_api;
use super::handlers::register::register;
use super::handlers::welcome::welcome;
use super::middleware::authenticate as auth_middleware;
use crate::directory::ports::DirectoryServicePort;
use crate::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub directory_service: Arc<dyn DirectoryServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub jwt_expiration_hours: Option<i64>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    directory_service: Arc<dyn DirectoryServicePort>,
    authenticator: Arc<Authenticator>,
    jwt_expiration_hours: Option<i64>,
) -> Router {
    let state = AppState {
        user_service,
        directory_service,
        authenticator,
        jwt_expiration_hours,
    };

    let public_routes = Router::new()
        .route("/", get(welcome))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/publicapi", get(public_api));

    let protected_routes = Router::new()
        .route("/protected", get(protected))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
