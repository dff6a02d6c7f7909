use fitness_log::storage::load_profile;
use fitness_log::{load_document, router, AppState, Config};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let document = load_document(&config.data_path).await;
    info!(
        path = %config.data_path.display(),
        activities = document.activities.len(),
        workouts = document.workouts.len(),
        hydration = document.hydration.len(),
        "log loaded"
    );

    let profile = load_profile(&config.profile_path).await;
    let state = AppState::new(&config, document, profile);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
