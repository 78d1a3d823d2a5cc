// GET / and GET /health handlers

use std::convert::Infallible;

use crate::models::{HealthResponse, StatusMessage};

pub async fn root_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&StatusMessage {
        message: "Adapt AI is running".to_string(),
    }))
}

pub async fn health_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&HealthResponse {
        status: "healthy".to_string(),
    }))
}
