use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::errors::ServerError;

pub mod note;

pub async fn index() -> impl actix_web::Responder {
    HttpResponse::Ok().finish()
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "message": "endpoint does not exist" }))
}

fn json_error(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("rejected request body: {err}");
    ServerError::MalformedBody(err.to_string()).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/", web::get().to(index))
        .service(
            web::scope("/api")
                .route("/create", web::post().to(note::create))
                .route("/get", web::post().to(note::get))
                .route("/update", web::post().to(note::update))
                .route("/delete", web::post().to(note::delete)),
        );
}
