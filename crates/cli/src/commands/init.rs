//! `promptsmith init` — Write default config and catalog files.

use promptsmith_config::AppConfig;
use promptsmith_core::Catalog;
use std::path::Path;

pub fn run(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    println!("🛠  Initialising promptsmith\n");

    let config_dir = AppConfig::config_dir();
    std::fs::create_dir_all(&config_dir)?;

    write_file(
        &config_dir.join("config.toml"),
        &AppConfig::default_toml(),
        force,
    )?;
    write_file(
        &config_dir.join("catalog.toml"),
        Catalog::builtin_toml(),
        force,
    )?;

    println!("\nNext steps:");
    println!("  1. Edit {} to tune techniques", config_dir.join("catalog.toml").display());
    println!("  2. Run `promptsmith catalog validate`");
    println!("  3. Try `promptsmith select \"Explain this step by step\" --intent problem_solving`");
    Ok(())
}

/// Write `content` unless the file exists and `force` is off. Returns whether it wrote.
pub(crate) fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<bool> {
    if path.exists() && !force {
        println!("   ⏭  {} exists (use --force to overwrite)", path.display());
        return Ok(false);
    }
    std::fs::write(path, content)?;
    println!("   ✅ Wrote {}", path.display());
    Ok(true)
}
