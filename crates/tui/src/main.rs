mod app;
mod client;
mod config;
mod dashboard;
mod error;
mod forms;
mod local_state;
mod logging;
mod ui;

#[cfg(test)]
mod test_support;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config)?;
    tracing::info!(base_url = %config.base_url, "finboard tui starting");

    let mut app = app::App::new(config)?;
    let result = app.run().await;
    if let Err(err) = &result {
        tracing::error!(error = %err, "finboard tui stopped");
    }
    result
}
