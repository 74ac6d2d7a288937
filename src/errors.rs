use actix_web::{error::BlockingError, HttpResponse};
use derive_more::Display;
use serde_json::json;

use crate::store::StoreError;

#[derive(Debug, Display)]
pub enum ServerError {
    #[display(fmt = "missing required fields: {:?}", _0)]
    Validation(Vec<&'static str>),
    #[display(fmt = "malformed request body: {}", _0)]
    MalformedBody(String),
    #[display(fmt = "wrong password")]
    InvalidCredentials,
    // carries the id for logging only, it is never echoed back
    #[display(fmt = "note {} not found", _0)]
    NotFound(String),
    #[display(fmt = "store error: {}", _0)]
    StoreError(StoreError),
    BlockingError,
    #[display(fmt = "environment error: {}", _0)]
    EnvironmentError(String),
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> ServerError {
        ServerError::StoreError(err)
    }
}

impl From<BlockingError> for ServerError {
    fn from(_: BlockingError) -> ServerError {
        ServerError::BlockingError
    }
}

fn message(body: &str) -> serde_json::Value {
    json!({ "message": body })
}

impl actix_web::error::ResponseError for ServerError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServerError::Validation(fields) => HttpResponse::BadRequest().json(message(&format!(
                "missing required fields: {}",
                fields.join(", ")
            ))),
            ServerError::MalformedBody(_) => {
                HttpResponse::BadRequest().json(message(&self.to_string()))
            }
            ServerError::InvalidCredentials => {
                HttpResponse::Forbidden().json(message("wrong password, access denied"))
            }
            ServerError::NotFound(_) => {
                HttpResponse::NotFound().json(message("note does not exist or has been deleted"))
            }
            ServerError::StoreError(_) => HttpResponse::InternalServerError()
                .json(message("Server Error: failed to store the note, try again later")),
            ServerError::BlockingError => HttpResponse::InternalServerError()
                .json(message("Server Error: worker pool is unavailable")),
            ServerError::EnvironmentError(_) => HttpResponse::InternalServerError()
                .json(message("Server Error: misconfigured environment")),
        }
    }
}
