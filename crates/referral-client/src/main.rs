use tracing::info;

use referral_client_lib::config::ClientConfig;

// One thread: requests and timers interleave cooperatively.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    referral_client_lib::init_tracing();

    info!("Starting referral client v{}", env!("CARGO_PKG_VERSION"));

    let config = ClientConfig::from_env();
    info!(?config, "Loaded configuration");

    referral_client_lib::run(config).await
}
