//! HTTP surface: the idea generation endpoint, a health check and CORS.

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, AUTHORIZATION,
            CONTENT_TYPE,
        },
        HeaderValue, Method, StatusCode,
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::error::IdeaError;
use crate::ideas::{IdeaGenerator, IdeaRequest, IdeaResponse};

pub const GENERATE_IDEAS_PATH: &str = "/api/generate-ideas";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    InvalidBody(String),
    #[error("{0}")]
    Generation(#[from] IdeaError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

/// Creates the API router.
pub fn router(generator: Arc<IdeaGenerator>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route(
            GENERATE_IDEAS_PATH,
            post(generate_ideas).fallback(method_not_allowed),
        )
        .route("/health", get(health_check))
        .with_state(generator)
        .layer(cors_layer(allowed_origins))
        .layer(middleware::from_fn(reject_plain_options))
}

// The CORS layer answers every OPTIONS request. Only real preflights, which
// name the method they ask about, may reach it.
async fn reject_plain_options(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS
        && !request.headers().contains_key(ACCESS_CONTROL_REQUEST_METHOD)
    {
        return ApiError::MethodNotAllowed.into_response();
    }
    next.run(request).await
}

/// Cross-origin policy for browser clients. Origins that are not valid header
/// values are skipped. A `*` entry allows every origin by echoing the request's
/// `Origin` back, since a literal wildcard cannot be combined with credentials.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([ACCESS_CONTROL_ALLOW_HEADERS, CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

fn allow_origin(allowed_origins: &[String]) -> AllowOrigin {
    if allowed_origins.iter().any(|origin| origin == "*") {
        log::warn!("allowed origins contain \"*\", accepting requests from any origin");
        return AllowOrigin::mirror_request();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("ignoring invalid allowed origin {:?}", origin);
                None
            }
        })
        .collect();

    AllowOrigin::list(origins)
}

async fn generate_ideas(
    State(generator): State<Arc<IdeaGenerator>>,
    body: Bytes,
) -> Result<Json<IdeaResponse>, ApiError> {
    let request: IdeaRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let ideas = generator
        .generate(&request.domain, &request.description)
        .await
        .map_err(|e| {
            if e.is_content_error() {
                log::warn!("model returned unusable ideas: {}", e);
            } else if e.is_shape_error() {
                log::error!("provider reply was not a chat completion: {}", e);
            } else {
                log::error!("idea generation failed: {}", e);
            }
            ApiError::from(e)
        })?;

    Ok(Json(IdeaResponse { ideas }))
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
