//! A single jam-sandwich room, configured from the environment.
//!
//! - `GAMEROOM_BIND`: listen address (default `127.0.0.1:9080`)
//! - `GAMEROOM_SITE_ID`: the site this room stands on
//! - `GAMEROOM_SITES_FILE`: JSON document of sites to look the id up in
//! - `RUST_LOG`: log filter (default `info`)

use gameroom::prelude::*;

struct Config {
    bind: String,
    site_id: Option<String>,
    sites_file: Option<String>,
}

fn config_from_env() -> Config {
    let non_empty = |key: &str| {
        std::env::var(key)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    Config {
        bind: non_empty("GAMEROOM_BIND")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        site_id: non_empty("GAMEROOM_SITE_ID"),
        sites_file: non_empty("GAMEROOM_SITES_FILE"),
    }
}

async fn build(config: Config) -> Result<RoomServer, GameroomError> {
    let mut builder = RoomServer::builder().bind(&config.bind);
    if let Some(site_id) = config.site_id {
        builder = builder.site_id(site_id);
    }

    match config.sites_file {
        Some(path) => {
            let lookup = StaticSiteLookup::from_json_file(&path).await?;
            builder.build(&lookup).await
        }
        None => builder.build(&NoSiteLookup).await,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let server = build(config_from_env()).await?;
    tracing::info!(addr = %server.local_addr()?, "jam room ready");

    server.run().await?;
    Ok(())
}
