pub mod catalog;
pub mod config_cmd;
pub mod doctor;
pub mod init;
pub mod select;

use promptsmith_config::AppConfig;
use promptsmith_selector::TechniqueSelector;
use tracing::debug;

/// Load configuration and build a selector from the resolved catalog.
pub fn load_selector() -> Result<(AppConfig, TechniqueSelector), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    debug!(
        catalog = %config.catalog_path().display(),
        builtin_fallback = config.catalog.builtin_fallback,
        "Resolving technique catalog"
    );
    let catalog = config.load_catalog()?;
    let selector = TechniqueSelector::new(catalog)?;
    Ok((config, selector))
}
