// Rejections turned into `{"detail": ...}` replies

use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use super::error::ApiError;

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let error = rejection_error(&err);
    if error.status.is_server_error() {
        tracing::error!(?err, "unhandled rejection");
    } else {
        tracing::debug!(status = %error.status, detail = %error.detail, "request rejected");
    }
    Ok(error)
}

fn rejection_error(err: &Rejection) -> ApiError {
    if err.is_not_found() {
        ApiError::new(StatusCode::NOT_FOUND, "Not Found")
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        ApiError::bad_request(format!("Invalid request body: {}", e))
    } else if let Some(e) = err.find::<warp::reject::InvalidHeader>() {
        ApiError::bad_request(e.to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        ApiError::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, "Expected a JSON body")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
    } else {
        ApiError::internal("Internal Server Error")
    }
}
