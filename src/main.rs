#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod config;
mod decode;
mod error;
mod fetch;
mod parse;
mod resolve;
mod server;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::{config::Config, fetch::HttpFetcher, resolve::Skhu};

pub use error::Result;

#[cfg(all(target_env = "musl", target_pointer_width = "64"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("shutting down");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    let config = Config::from_env()?;
    log::debug!("{config:?}");

    let skhu = Arc::new(Skhu::new(HttpFetcher::new()?, config.site));
    let app = server::router(skhu);

    let listener = TcpListener::bind(config.addr).await?;
    log::info!("listening on http://{}/api/v1", config.addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
