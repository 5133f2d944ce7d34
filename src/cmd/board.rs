//! The interactive board — `taskdeck` / `taskdeck board`.

use anyhow::Result;
use tokio::sync::mpsc;

use taskdeck::api::ApiClient;
use taskdeck::app::App;
use taskdeck::config::Config;

pub async fn cmd_board(config: &Config) -> Result<()> {
    tracing::info!(api_url = %config.api_url, "starting board");
    let client = ApiClient::new(&config.api_url)?;
    let (tx, rx) = mpsc::channel(64);
    App::new(client, tx).run(rx).await
}
