#![deny(rust_2018_idioms)]

use anyhow::Context;
use tracing::info;

mod config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e).context("Loading .env file"),
    }

    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "warn");
    }

    setup_tracing();

    let config = config::parse_cmd_line().context("Parsing configuration")?;
    let client = config.client().context("Creating oracle client")?;

    client.validate().await.with_context(|| {
        format!(
            r"Validating the oracle endpoint.

This program reads the energy oracle at {} on chain {}. Check that your API key belongs to an app on that network.",
            client.endpoint().address,
            client.endpoint().chain_id,
        )
    })?;

    info!(network = %config.network, "Oracle endpoint ready");

    consumption_reader::run(
        &client,
        std::io::stdin().lock(),
        std::io::stderr(),
        std::io::stdout().lock(),
    )
    .await
    .context("Looking up energy consumption")?;

    Ok(())
}

/// Diagnostics go to stderr. Stdout carries only the result.
fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
