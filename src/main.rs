mod config;
mod routes;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("cache header: {0}")]
    Header(#[from] axum::http::header::InvalidHeaderValue),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    if let Err(err) = dotenv {
        // A missing .env file is the normal production case.
        if !err.not_found() {
            tracing::warn!(error = %err, "ignoring unreadable .env");
        }
    }

    let config = config::ServerConfig::from_env()?;
    if !config.site_dir.is_dir() {
        tracing::warn!(site_dir = %config.site_dir.display(), "site directory missing; only /healthz will respond");
    }

    let app = routes::app(&config)?;
    let listener = tokio::net::TcpListener::bind(config.addr()).await?;

    tracing::info!(port = %config.port, site_dir = %config.site_dir.display(), "coverview listening");
    axum::serve(listener, app).await?;
    Ok(())
}
