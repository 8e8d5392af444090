//! Backend entry-point: wires configuration, the store adapters and the
//! HTTP server.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::ports::SystemClock;
use backend::inbound::http::state::AppState;
use backend::outbound::persistence::{
    DbPool, DieselBookingStore, DieselMenuStore, DieselUserStore, PoolConfig,
};
use backend::server::{self, ServerConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("failed to build database pool: {e}")))?;

    let state = AppState::new(
        Arc::new(DieselUserStore::new(pool.clone())),
        Arc::new(DieselBookingStore::new(pool.clone())),
        Arc::new(DieselMenuStore::new(pool)),
        Arc::new(SystemClock),
    );

    let config = ServerConfig::new(
        key,
        cookie_secure,
        SameSite::Lax,
        SocketAddr::from(([0, 0, 0, 0], 8080)),
    );

    server::run(config, state)?.await
}
