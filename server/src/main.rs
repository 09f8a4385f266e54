mod config;
mod routes;
mod services;
mod state;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("ignoring unreadable .env: {e}");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,layout=info,tower_http=info".into()),
        )
        .init();

    let config = config::ServerConfig::from_env()?;
    let rooms = services::room::RoomStore::open(config.rooms_path()).await?;
    let state = state::AppState::new(rooms);

    let app = routes::app(state, config.cors_allow_origin.as_deref())?;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    tracing::info!(port = config.port, data_dir = %config.data_dir.display(), "seatplan server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
