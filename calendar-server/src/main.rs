use std::env;

use anyhow::Result;
use log::info;
use tokio::{net::TcpListener, signal};

use calendar_server::{cli, router, AppState};

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "calendar_server=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

async fn shutdown_signal() {
    if signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse(env::args().skip(1).collect());

    setup_logging();

    let state = AppState::new(args.events.clone(), args.cache_ttl);
    let listener = TcpListener::bind(args.address).await?;

    info!("Serving events from {} at http://{}", args.events, args.address);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
