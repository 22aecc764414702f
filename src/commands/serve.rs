//! Serve command - runs the HTTP service.

use std::net::ToSocketAddrs;

use anyhow::{Context, Result};
use docx_editor::server::{self, DEFAULT_ALLOWED_ORIGINS, ServerConfig};

use crate::cli::ServeArgs;

impl TryFrom<ServeArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: ServeArgs) -> Result<Self> {
        let addr = (args.host.as_str(), args.port)
            .to_socket_addrs()
            .with_context(|| format!("cannot resolve {}:{}", args.host, args.port))?
            .next()
            .with_context(|| format!("{}:{} resolved to no address", args.host, args.port))?;

        let allowed_origins: Vec<String> = args
            .allowed_origins
            .into_iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        let allowed_origins = if allowed_origins.is_empty() {
            DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect()
        } else {
            allowed_origins
        };

        Ok(ServerConfig {
            addr,
            allowed_origins,
            max_upload_bytes: args.max_upload_mb.saturating_mul(1024 * 1024),
        })
    }
}

pub async fn run(args: ServeArgs) -> Result<()> {
    let config = ServerConfig::try_from(args)?;
    server::serve(config).await.context("server failed")
}
