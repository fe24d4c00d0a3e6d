//! `callsheet serve` — Start the HTTP relay server.

use callsheet_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> anyhow::Result<()> {
    let mut config =
        AppConfig::load().map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("Callsheet relay");
    println!(
        "   Listening: {}:{}",
        config.gateway.host, config.gateway.port
    );
    println!("   Provider:  {}", config.default_provider);
    println!("   Model:     {}", config.default_model);

    callsheet_gateway::start(config)
        .await
        .map_err(|e| anyhow::anyhow!("Gateway failed: {e}"))?;

    Ok(())
}
