//! `promptsmith config` — Configuration management commands.

use promptsmith_config::AppConfig;

pub fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings = Vec::new();
            let catalog_path = config.catalog_path();
            if !catalog_path.exists() {
                if config.catalog.builtin_fallback {
                    warnings.push(format!(
                        "No catalog at {}, the built-in catalog will be used",
                        catalog_path.display()
                    ));
                } else {
                    warnings.push(format!(
                        "No catalog at {} and builtin_fallback is disabled",
                        catalog_path.display()
                    ));
                }
            }
            if config.selection.max_techniques == Some(0) {
                warnings.push("selection.max_techniques = 0 disables every technique".into());
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Catalog:   {}", catalog_path.display());
            println!("   Fallback:  {}", config.catalog.builtin_fallback);
            println!("   Log level: {}", config.logging.level);
            println!("   Output:    {}", config.output.format);
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_dir().join("config.toml");
    println!("{}", config_path.display());
    Ok(())
}
