//! jwtgate - minimal bearer-token auth service
//! Routes: /health, /signup, /login, /me (protected)

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use jwtgate_backend::{
    auth::{AuthState, TokenCodec, UserStore},
    build_router,
    config::Config,
};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "jwtgate", about = "Minimal HS256 bearer-token auth service")]
struct Cli {
    /// Address to listen on; a bare `:port` binds on all interfaces
    #[arg(long, env = "ADDR")]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment and logging
    load_env();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_lookup(|key| match key {
        "ADDR" => cli.addr.clone(),
        _ => std::env::var(key).ok(),
    })
    .context("Failed to load configuration")?;

    if config.secret.is_fallback() {
        warn!("JWT_SECRET not set; using the built-in development secret. Set it in production!");
    }

    let user_store = Arc::new(UserStore::with_cost(config.bcrypt_cost));
    let codec = Arc::new(TokenCodec::new(config.secret.clone()));
    let auth_state = AuthState::new(user_store, codec, config.token_ttl);

    info!(
        ttl_minutes = config.token_ttl.num_minutes(),
        "Authentication initialized"
    );

    let app = build_router(auth_state);

    let listener = TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    info!("listening on {}", config.addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Initialize tracing
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jwtgate_backend=debug,jwtgate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    // 1) Standard dotenv search (cwd + parents)
    let _ = dotenv();

    // 2) Also try the crate root .env when launched from elsewhere
    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_addr_flag() {
        let cli = Cli::try_parse_from(["jwtgate", "--addr", ":9000"]).unwrap();
        assert_eq!(cli.addr.as_deref(), Some(":9000"));

        let config = Config::from_lookup(|key| match key {
            "ADDR" => cli.addr.clone(),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.addr, "0.0.0.0:9000");
    }
}
