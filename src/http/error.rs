use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde::Serialize;

use crate::engine::EngineError;

/// Error body: `{"message": "...", "status": 404}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub status: u16,
}

impl ResponseError for EngineError {
    fn status_code(&self) -> StatusCode {
        match self {
            EngineError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            EngineError::NotFound(_) => StatusCode::NOT_FOUND,
            EngineError::Conflict(_) => StatusCode::CONFLICT,
            EngineError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            EngineError::IntegrityAnomaly(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Backend details stay in the logs
        let message = match self {
            EngineError::Store(_) => "storage is temporarily unavailable".to_string(),
            EngineError::IntegrityAnomaly(_) => "stored data is inconsistent".to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(status).json(ErrorBody {
            message,
            status: status.as_u16(),
        })
    }
}

/// Form bodies that fail to extract get the same error body as engine errors
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| malformed_request(err))
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| malformed_request(err))
}

/// Keeps the status actix chose for the extractor failure
fn malformed_request<E: ResponseError + 'static>(err: E) -> actix_web::Error {
    let status = err.status_code();
    let message = err.to_string();
    tracing::warn!(status = status.as_u16(), error = %message, "Malformed request");

    let response = HttpResponse::build(status).json(ErrorBody {
        message,
        status: status.as_u16(),
    });
    InternalError::from_response(err, response).into()
}
