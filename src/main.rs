use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

mod config;
mod credential;
mod errors;
mod handlers;
mod lifecycle;
mod models;
mod schema;
mod store;
mod utils;

use config::{Config, StoreBackend};
use lifecycle::NoteService;
use store::{MemoryNoteStore, NoteStore, PgNoteStore};

fn invalid_input(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(invalid_input)?;
    let store: Arc<dyn NoteStore> = match &config.store {
        StoreBackend::Postgres {
            database_url,
            pool_size,
        } => Arc::new(PgNoteStore::connect(database_url, *pool_size).map_err(invalid_input)?),
        StoreBackend::Memory => {
            log::warn!("using the in-memory note store, notes are lost on restart");
            Arc::new(MemoryNoteStore::new())
        }
    };
    let service = web::Data::new(NoteService::new(store));

    log::info!("listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_header(header::CONTENT_TYPE)
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(handlers::configure)
            .default_service(web::to(handlers::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
