use anyhow::Context;
use incipit::api::{self, app_state::AppState};
use incipit::config::ConfigLoader;
use incipit::observability::init_tracing;
use incipit::services::Catalog;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    ConfigLoader::validate(&config).context("invalid configuration")?;

    let _log_guard = init_tracing(&config.logging);
    info!(
        "Starting {} v{} ({})",
        config.app_name,
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    // The quiz cannot run without its reference data.
    let catalog = Catalog::load(&config.catalog.path).with_context(|| {
        format!(
            "failed to load catalog from {}",
            config.catalog.path.display()
        )
    })?;
    info!(
        "Catalog ready: {} pieces, name policy {:?}, session creation {:?}",
        catalog.len(),
        config.scoring.name_policy,
        config.session.creation
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app_state = AppState::new(config, catalog)?;
    let router = api::build_app(app_state);
    info!("Application state created");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}/", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
