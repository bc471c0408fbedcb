//! `aerwatch onboard` — First-time setup.

use aerwatch_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");
    let thresholds_path = config_dir.join("thresholds.csv");

    println!("🌬️  Aerwatch — First-Time Setup");
    println!("===============================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    // Starter threshold table (OpenWeather index scale)
    if thresholds_path.exists() {
        println!("  Threshold table exists: {}", thresholds_path.display());
    } else {
        std::fs::write(&thresholds_path, aerwatch_thresholds::STARTER_CSV)?;
        println!("✅ Created thresholds.csv at: {}", thresholds_path.display());
    }

    // Config file
    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Set OPEN_WEATHER_API_KEY and OPENAI_API_KEY (or add them to config.toml)");
        println!("   2. Edit the location in {}", config_path.display());
        println!("   3. Run: aerwatch briefing\n");
    }

    println!("🎉 Setup complete! Run `aerwatch chat` to start.\n");

    Ok(())
}
