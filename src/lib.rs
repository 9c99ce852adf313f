use actix_web::{http, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;
use actix_cors::Cors;

pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod handlers;
pub mod league;
pub mod models;
mod routes;
pub mod services;
pub mod telemetry;

use crate::auth::TokenVerifier;
use crate::routes::init_routes;
use crate::services::FixtureSyncService;

pub fn run(
    listener: TcpListener,
    token_verifier: TokenVerifier,
    sync_service: FixtureSyncService,
    allowed_origins: Vec<String>,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let token_verifier = web::Data::new(token_verifier);
    let sync_service = web::Data::new(sync_service);

    let server = HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(token_verifier.clone())
            .app_data(sync_service.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
