use actix_web::web;

pub mod backend_health;
pub mod cron;
pub mod fixtures;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health)
        .service(fixtures::fixtures);

    // The cron route verifies its own bearer token
    cfg.service(
        web::scope("/api")
            .service(cron::cron)
    );
}
