use tokio_util::sync::CancellationToken;
use tracing::info;

use lookout::config::Config;
use lookout::notify::{ChatWebhook, Notifier};
use lookout::session::ApiSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lookout::logging::init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let client = reqwest::Client::new();
    let session = ApiSession::login(
        client.clone(),
        &config.api_url,
        &config.username,
        &config.password,
    )
    .await?;

    let notifier = Notifier::new(ChatWebhook::new(client, config.webhook_url.clone()));

    let cancel = CancellationToken::new();
    let canceller = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
            canceller.cancel();
        }
    });

    info!(mode = ?config.mode, "monitoring");
    lookout::watch::run(&config, &session, &notifier, cancel).await?;

    Ok(())
}
