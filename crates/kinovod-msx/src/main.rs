//! MSX bridge server
//!
//! Binds the extraction core to an HTTP surface: builds the configured
//! page fetcher, wraps it in a cached [`MenuService`], and serves the
//! MSX endpoints.

mod catalog;
mod config;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use kinovod_core::{HttpSignalSource, MenuService, PageSignalSource, Target};

use crate::config::{FetcherKind, ServerConfig};
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        target = %config.target_url,
        fetcher = ?config.fetcher,
        "starting kinovod-msx"
    );

    let target = Target::new(&config.target_url, &config.title)?;
    let source = build_source(&config)?;
    let state = Arc::new(AppState {
        service: MenuService::new(source, target),
        public_base: config.public_base.clone(),
    });

    let app = routes::router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Instantiate the fetcher the configuration asks for
fn build_source(config: &ServerConfig) -> anyhow::Result<Box<dyn PageSignalSource>> {
    match config.fetcher {
        FetcherKind::Http => Ok(Box::new(HttpSignalSource::new()?)),
        FetcherKind::Browser => {
            #[cfg(feature = "browser")]
            {
                return Ok(Box::new(kinovod_core::BrowserSignalSource::new()));
            }
            #[cfg(not(feature = "browser"))]
            {
                tracing::warn!(
                    "browser fetcher requested but the `browser` feature is not compiled in, falling back to http"
                );
                Ok(Box::new(HttpSignalSource::new()?))
            }
        }
    }
}
