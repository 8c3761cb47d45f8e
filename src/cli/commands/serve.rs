//! HTTP server command.

use anyhow::Context;
use std::path::Path;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::auth::JwtKeys;
use crate::config::Config;
use crate::db;
use crate::exhibits::{ExhibitService, ServiceConfig};
use crate::http::{self, AppState, Paging};

/// Secret shipped in the default config
const PLACEHOLDER_SECRET: &str = "change-me";

/// Run the REST API until Ctrl+C
pub fn cmd_serve(
    rt: &Runtime,
    config: &Config,
    bind: Option<&str>,
    db_path: Option<&Path>,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let db_url = match db_path {
            Some(path) => db::db_url(Some(path)),
            None => config.database.url(),
        };
        let pool = db::init_db(&db_url)
            .await
            .with_context(|| format!("Failed to open database {}", db_url))?;
        info!(db = %db_url, "Database ready");

        let exhibits = ExhibitService::new(&ServiceConfig::from(config))
            .context("Failed to build HTTP client")?;

        if config.server.jwt_secret == PLACEHOLDER_SECRET {
            warn!("Using the placeholder JWT secret; set JWT_SECRET before exposing this server");
        }
        let jwt = JwtKeys::from_secret(
            config.server.jwt_secret.as_bytes(),
            Duration::from_secs(config.server.token_ttl_secs),
        );

        let paging = Paging {
            default_page_size: config.aggregator.default_page_size.max(1),
            max_page_size: config.aggregator.max_page_size.max(1),
        };

        spawn_cache_sweeper(exhibits.clone(), config.cache.ttl());

        let app = http::create_router(AppState::new(exhibits, pool, jwt, paging));

        let bind = bind.unwrap_or(&config.server.bind);
        let listener = tokio::net::TcpListener::bind(bind)
            .await
            .with_context(|| format!("Failed to bind {}", bind))?;
        info!("Server is running on http://{}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    })
}

/// Periodically drop expired cache entries so idle keys don't pile up.
fn spawn_cache_sweeper(exhibits: ExhibitService, ttl: Duration) {
    let period = ttl.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.tick().await;
        loop {
            interval.tick().await;
            let removed = exhibits.purge_expired();
            if removed > 0 {
                tracing::debug!(removed, "Purged expired cache entries");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
