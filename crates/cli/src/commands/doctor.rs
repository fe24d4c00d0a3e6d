//! `callsheet doctor` — Diagnose configuration health.

use callsheet_config::AppConfig;

pub fn run() -> anyhow::Result<()> {
    println!("Callsheet Doctor — Configuration Diagnostics");
    println!("============================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  [ok] Config file found at {}", config_path.display());
    } else {
        println!("  [--] No config file — defaults will be used");
    }

    match AppConfig::load() {
        Ok(config) => {
            println!("  [ok] Config valid");

            if config.api_key.is_some() || !config.providers.is_empty() {
                println!("  [ok] API key configured");
            } else {
                println!("  [!!] No API key — set CALLSHEET_API_KEY or add api_key to config.toml");
                issues += 1;
            }

            let router = callsheet_providers::router::build_from_config(&config);
            match router.default() {
                Some(provider) => {
                    println!("  [ok] Default provider: {}", provider.name());
                    println!("  [ok] Default model: {}", config.default_model);
                }
                None => {
                    println!("  [!!] Default provider '{}' not resolvable", config.default_provider);
                    issues += 1;
                }
            }
        }
        Err(e) => {
            println!("  [!!] Config invalid: {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  All checks passed.");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
