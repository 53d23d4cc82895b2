use std::net::SocketAddr;

use dioxus_logger::tracing;

use intake::server::{config::Config, model::app::AppState, router, startup};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    startup::init_logger(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server exited with error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), intake::server::error::Error> {
    let db = startup::connect_to_database(&config).await?;
    let bind_address = config.bind_address.clone();
    let state = AppState::new(db, config)?;

    let app = router::routes(state.clone()).with_state(state);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    tracing::info!("Starting server on {}", bind_address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
