//! `promptsmith doctor` — Diagnose the installation.

use promptsmith_config::AppConfig;
use promptsmith_core::SelectionRequest;
use promptsmith_selector::TechniqueSelector;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 promptsmith doctor — System Diagnostics");
    println!("==========================================\n");

    let mut issues = 0;

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
        println!("  ⚠️  No config file — run `promptsmith init`");
        issues += 1;
        Some(AppConfig::default())
    };

    if let Some(config) = config {
        let catalog_path = config.catalog_path();
        if catalog_path.exists() {
            println!("  ✅ Catalog file present");
        } else {
            println!("  ⚠️  No catalog at {}", catalog_path.display());
        }

        match config
            .load_catalog()
            .map_err(|e| e.to_string())
            .and_then(|c| TechniqueSelector::new(c).map_err(|e| e.to_string()))
        {
            Ok(selector) => {
                println!(
                    "  ✅ Catalog valid ({} techniques)",
                    selector.catalog().techniques.len()
                );
                let response = selector.select(&SelectionRequest::new("doctor smoke test"));
                if response.reasoning.is_empty() {
                    println!("  ❌ Smoke selection produced no reasoning");
                    issues += 1;
                } else {
                    println!("  ✅ Smoke selection succeeded");
                }
            }
            Err(e) => {
                println!("  ❌ Catalog invalid: {e}");
                issues += 1;
            }
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
