use actix_web::HttpServer;
use places_gateway::{AppState, ServerConfig, create_app, init_tracing};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let server_config = ServerConfig::from_env();
    init_tracing(&server_config);

    let state = AppState::from_env().map_err(std::io::Error::other)?;

    if !state.places.has_credential() {
        tracing::warn!("GOOGLE_PLACES_API_KEY is not set; places requests will fail with 500");
    }

    let bind_address = server_config.bind_address();
    tracing::info!(address = ?bind_address, "Server starting");

    HttpServer::new(move || create_app(state.clone()))
        .bind(bind_address)?
        .run()
        .await
}
