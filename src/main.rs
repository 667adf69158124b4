use anyhow::Context;
use log::info;
use std::net::SocketAddr;
use std::time::Instant;

use heat_monitor::configuration::get_configuration;
use heat_monitor::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let _start = Instant::now();
    let configuration = get_configuration().context("Failed to read configuration.")?;
    let addr: SocketAddr = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    )
    .parse()
    .context("Invalid listen address")?;

    info!(
        "weather API at {}, imagery gateway at {} as {}",
        configuration.weather.base_url,
        configuration.imagery.base_url,
        configuration.imagery.service_account
    );

    let state = AppState::from_settings(configuration).context("Failed to build HTTP clients")?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{} (ready in {:?})", addr, _start.elapsed());
    axum::serve(listener, app).await?;

    Ok(())
}
