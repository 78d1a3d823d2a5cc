// Error replies shared by the handlers

use serde::Serialize;
use warp::http::StatusCode;
use warp::Reply;

use crate::content::GeneratorError;
use crate::models::{ErrorBody, InvalidField};

/// A failed request: status code plus the `detail` sent to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn bad_gateway(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }

    /// Upstream failures map to 502, unusable model output to 400
    pub fn from_generator(err: GeneratorError, detail: &str) -> Self {
        match err {
            GeneratorError::Generation(e) => {
                tracing::error!(error = %e, "completion request failed");
                Self::bad_gateway(format!("{} The language model is unavailable.", detail))
            }
            GeneratorError::Exhausted { attempts, last } => {
                tracing::warn!(attempts, error = %last, "no usable model output");
                Self::bad_request(detail)
            }
        }
    }
}

impl From<InvalidField> for ApiError {
    fn from(invalid: InvalidField) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, invalid.0)
    }
}

impl Reply for ApiError {
    fn into_response(self) -> warp::reply::Response {
        warp::reply::with_status(
            warp::reply::json(&ErrorBody {
                detail: self.detail,
            }),
            self.status,
        )
        .into_response()
    }
}

/// 200 with the JSON body, or the error reply
pub fn respond<T: Serialize>(result: Result<T, ApiError>) -> warp::reply::Response {
    match result {
        Ok(body) => warp::reply::with_status(warp::reply::json(&body), StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}
