//! CLI commands for inspecting the technique catalog.

use promptsmith_config::AppConfig;
use promptsmith_core::{Catalog, Technique};
use promptsmith_selector::TechniqueSelector;

/// List all techniques with their conditions.
pub fn list() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let catalog = config.load_catalog()?;

    if catalog.techniques.is_empty() {
        println!("No techniques configured.");
        println!("\nRun `promptsmith init` to write the built-in catalog to");
        println!("  {}", config.catalog_path().display());
        return Ok(());
    }

    println!(
        "Techniques ({} enabled of {}):\n",
        catalog.enabled_count(),
        catalog.techniques.len()
    );
    for (i, t) in catalog.techniques.iter().enumerate() {
        let status = if t.enabled { "ON " } else { "OFF" };
        println!(
            "  {}. [{}] {} (priority: {}, template: {})",
            i + 1,
            status,
            t.id,
            t.priority,
            t.template
        );
        if !t.description.is_empty() {
            println!("     {}", t.description);
        }
        for line in describe_conditions(t) {
            println!("     {line}");
        }
    }

    let rules = &catalog.selection_rules;
    println!(
        "\nRules: max {} technique(s), advisory min confidence {:.2}, {:?} packing",
        rules.max_techniques, rules.min_confidence, rules.packing
    );
    for set in &rules.incompatible_combinations {
        println!("  incompatible: {}", set.join(" + "));
    }
    for set in &rules.compatible_combinations {
        println!("  compatible:   {}", set.join(" + "));
    }
    Ok(())
}

/// Validate the configured catalog.
pub fn validate() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let catalog = match config.load_catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Catalog validation failed: {e}");
            std::process::exit(1);
        }
    };
    match TechniqueSelector::new(catalog) {
        Ok(selector) => {
            let summary = selector.catalog().summary();
            println!(
                "Catalog is valid: {} techniques ({} enabled), {} boosted intent(s), {} incompatible set(s).",
                summary.techniques,
                summary.enabled,
                summary.boosted_intents,
                summary.incompatible_sets
            );
        }
        Err(e) => {
            eprintln!("Catalog validation failed: {e}");
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Print the resolved catalog (after config overrides) as TOML.
pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let catalog: Catalog = config.load_catalog()?;
    println!("{}", catalog.to_toml()?);
    Ok(())
}

fn describe_conditions(t: &Technique) -> Vec<String> {
    let c = &t.conditions;
    if c.is_unconditional() {
        return vec!["conditions: none (always matches)".into()];
    }
    let mut lines = Vec::new();
    if let Some(intents) = c.intents.members() {
        let list: Vec<&str> = intents.iter().map(String::as_str).collect();
        lines.push(format!("intents: {}", list.join(", ")));
    }
    if let Some(levels) = c.complexity.members() {
        let list: Vec<&str> = levels.iter().map(|l| l.as_str()).collect();
        lines.push(format!("complexity: {}", list.join(", ")));
    }
    if let Some(range) = c.complexity_range {
        lines.push(format!("score range: {:.2}..={:.2}", range.min, range.max));
    }
    if let Some(keywords) = c.keywords.members() {
        let list: Vec<&str> = keywords.iter().map(String::as_str).collect();
        lines.push(format!("keywords: {}", list.join(", ")));
    }
    lines
}
