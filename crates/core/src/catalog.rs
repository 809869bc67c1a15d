//! The technique catalog: techniques plus the rules that govern selection.
//!
//! A catalog is loaded once, validated, and then shared read-only. Every
//! validation failure here is fatal for engine initialisation.

use crate::error::CatalogError;
use crate::rules::{ComplexityFactors, SelectionRules};
use crate::technique::Technique;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

const BUILTIN_CATALOG: &str = include_str!("../catalog/default.toml");

/// Techniques, selection rules and complexity factors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub techniques: Vec<Technique>,

    #[serde(default, alias = "selectionRules")]
    pub selection_rules: SelectionRules,

    #[serde(default, alias = "complexityFactors")]
    pub complexity_factors: ComplexityFactors,
}

/// Counts reported by `promptsmith catalog validate` and friends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub techniques: usize,
    pub enabled: usize,
    pub boosted_intents: usize,
    pub incompatible_sets: usize,
    pub compatible_sets: usize,
}

impl Catalog {
    pub fn new(
        techniques: Vec<Technique>,
        selection_rules: SelectionRules,
        complexity_factors: ComplexityFactors,
    ) -> Self {
        Self {
            techniques,
            selection_rules,
            complexity_factors,
        }
    }

    /// The catalog that ships with promptsmith.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml(BUILTIN_CATALOG)
    }

    /// Raw TOML of the built-in catalog, used by `promptsmith init`.
    pub fn builtin_toml() -> &'static str {
        BUILTIN_CATALOG
    }

    /// Parse and validate a catalog from TOML.
    pub fn from_toml(toml_str: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(toml_str)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a catalog from JSON (camelCase keys accepted).
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json).map_err(CatalogError::Json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file. `.json` files are parsed as JSON, anything else as TOML.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content)?,
            _ => Self::from_toml(&content)?,
        };
        info!(
            path = %path.display(),
            techniques = catalog.techniques.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Check the load-time invariants.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::with_capacity(self.techniques.len());
        for (index, technique) in self.techniques.iter().enumerate() {
            if technique.id.trim().is_empty() {
                return Err(CatalogError::EmptyTechniqueId { index });
            }
            if !seen.insert(technique.id.as_str()) {
                return Err(CatalogError::DuplicateTechnique(technique.id.clone()));
            }
            if let Some(range) = technique.conditions.complexity_range {
                if !range.is_valid() {
                    return Err(CatalogError::InvalidScoreRange {
                        technique: technique.id.clone(),
                        min: range.min,
                        max: range.max,
                    });
                }
            }
        }

        let rules = &self.selection_rules;
        for (intent, boosts) in &rules.intent_priority_boost {
            for technique in boosts.keys() {
                if !seen.contains(technique.as_str()) {
                    return Err(CatalogError::UnknownBoostTarget {
                        intent: intent.clone(),
                        technique: technique.clone(),
                    });
                }
            }
        }

        if !(0.0..=1.0).contains(&rules.min_confidence) {
            return Err(CatalogError::InvalidRule(format!(
                "min_confidence must be within [0, 1], got {}",
                rules.min_confidence
            )));
        }
        if !rules.score_ceiling.is_finite() || rules.score_ceiling <= 0.0 {
            return Err(CatalogError::InvalidRule(format!(
                "score_ceiling must be positive, got {}",
                rules.score_ceiling
            )));
        }

        for combination in rules
            .incompatible_combinations
            .iter()
            .chain(&rules.compatible_combinations)
        {
            for id in combination {
                if !seen.contains(id.as_str()) {
                    warn!(technique = %id, "Combination references unknown technique");
                }
            }
        }

        self.validate_word_counts()
    }

    fn validate_word_counts(&self) -> Result<(), CatalogError> {
        let mut ranges = self.complexity_factors.word_count.clone();
        ranges.sort_by_key(|r| r.min);
        for range in &ranges {
            if range.max.is_some_and(|max| max <= range.min) {
                return Err(CatalogError::InvalidWordCountRanges(format!(
                    "range starting at {} must end after it starts",
                    range.min
                )));
            }
        }
        for pair in ranges.windows(2) {
            match pair[0].max {
                None => {
                    return Err(CatalogError::InvalidWordCountRanges(format!(
                        "unbounded range starting at {} must be last",
                        pair[0].min
                    )));
                }
                Some(end) if end > pair[1].min => {
                    return Err(CatalogError::InvalidWordCountRanges(format!(
                        "ranges starting at {} and {} overlap",
                        pair[0].min, pair[1].min
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    pub fn technique(&self, id: &str) -> Option<&Technique> {
        self.techniques.iter().find(|t| t.id == id)
    }

    pub fn enabled_count(&self) -> usize {
        self.techniques.iter().filter(|t| t.enabled).count()
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            techniques: self.techniques.len(),
            enabled: self.enabled_count(),
            boosted_intents: self.selection_rules.intent_priority_boost.len(),
            incompatible_sets: self.selection_rules.incompatible_combinations.len(),
            compatible_sets: self.selection_rules.compatible_combinations.len(),
        }
    }

    /// Serialise back to TOML (for `promptsmith catalog show`).
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
