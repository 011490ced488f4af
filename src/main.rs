use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use study_royale_server::{
    app_state::AppState, config::Config, handlers::configure_routes,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if config.is_production() {
        config.validate_for_production();
    }

    let bind_address = (config.web_server_host.clone(), config.web_server_port);

    let state = AppState::new(config).await.map_err(|e| {
        log::error!("failed to initialise application state: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    log::info!(
        "starting HTTP server on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(configure_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}
