use std::sync::Arc;

use anyhow::Context;
use cinema_scheduler::{create_app, AppState, Config};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinema_scheduler=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let state = AppState::open(&config.data_dir, config.retry)
        .await
        .with_context(|| format!("failed to load data from {}", config.data_dir.display()))?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        cinemas = state.cinemas.len(),
        halls = state.halls.len(),
        movies = state.movies.len(),
        screenings = state.screenings.len(),
        bookings = state.bookings.len(),
        "data loaded"
    );

    let app = create_app(Arc::new(state), &config);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_handler())
        .await?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_handler() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("could not install ctrl+c handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("could not install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
