//! `aerwatch doctor` — Diagnose configuration and provider health.

use aerwatch_config::AppConfig;
use aerwatch_core::{ChatProvider, PollutionSource};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Aerwatch Doctor — System Diagnostics");
    println!("=======================================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_dir().join("config.toml");
    let config = if config_path.exists() {
        match AppConfig::load() {
            Ok(config) => {
                println!("  ✅ Config file valid");
                Some(config)
            }
            Err(e) => {
                println!("  ❌ Config file invalid: {e}");
                issues += 1;
                None
            }
        }
    } else {
        println!("  ⚠️  No config file — run `aerwatch onboard` (using defaults + env)");
        AppConfig::load().ok()
    };

    let Some(config) = config else {
        println!("\n  ⚠️  {issues} issue(s) found. See above for details.");
        return Ok(());
    };

    // Check threshold table
    match super::load_pipeline(&config) {
        Ok((table, mapping)) => {
            println!(
                "  ✅ Threshold table loaded ({} pollutants tracked, {} covered)",
                mapping.len(),
                table.pollutants().len()
            );
        }
        Err(e) => {
            println!("  ❌ Threshold table unusable: {e}");
            issues += 1;
        }
    }

    // Check weather provider
    match aerwatch_providers::pollution_source_from_config(&config) {
        Ok(source) => match source.health_check().await {
            Ok(true) => println!("  ✅ OpenWeather reachable"),
            Ok(false) => {
                println!("  ⚠️  OpenWeather responded with an error status");
                issues += 1;
            }
            Err(e) => {
                println!("  ❌ OpenWeather unreachable: {e}");
                issues += 1;
            }
        },
        Err(e) => {
            println!("  ⚠️  Weather provider not configured: {e}");
            issues += 1;
        }
    }

    // Check chat provider
    match aerwatch_providers::chat_provider_from_config(&config) {
        Ok(provider) => match provider.health_check().await {
            Ok(true) => println!("  ✅ Chat provider reachable"),
            Ok(false) => {
                println!("  ⚠️  Chat provider responded with an error status");
                issues += 1;
            }
            Err(e) => {
                println!("  ❌ Chat provider unreachable: {e}");
                issues += 1;
            }
        },
        Err(e) => {
            println!("  ⚠️  Chat provider not configured: {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
