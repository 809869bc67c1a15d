//! Technique data model: the prompt-engineering strategies the engine
//! chooses between and the conditions under which they apply.

use crate::condition::{ConditionSet, ScoreRange};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse task difficulty as reported by the intent classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Simple,
    Moderate,
    Complex,
}

impl ComplexityLevel {
    /// Baseline score seeded by this level before text signals refine it.
    pub fn baseline(self) -> f64 {
        match self {
            Self::Simple => 0.2,
            Self::Moderate => 0.5,
            Self::Complex => 0.8,
        }
    }

    /// The level implied by a numeric score.
    pub fn from_score(score: f64) -> Self {
        if score < 0.35 {
            Self::Simple
        } else if score < 0.65 {
            Self::Moderate
        } else {
            Self::Complex
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Moderate => "moderate",
            Self::Complex => "complex",
        }
    }
}

impl fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComplexityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "moderate" => Ok(Self::Moderate),
            "complex" => Ok(Self::Complex),
            other => Err(format!(
                "unknown complexity '{other}' (expected simple, moderate or complex)"
            )),
        }
    }
}

/// Matching conditions for a technique. Each category is evaluated
/// independently; a wildcard category always passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechniqueConditions {
    /// Intents this technique applies to.
    #[serde(default, skip_serializing_if = "ConditionSet::is_any")]
    pub intents: ConditionSet<String>,

    /// Complexity levels this technique applies to.
    #[serde(default, skip_serializing_if = "ConditionSet::is_any")]
    pub complexity: ConditionSet<ComplexityLevel>,

    /// Estimated complexity score range this technique applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_range: Option<ScoreRange>,

    /// Case-insensitive substrings, any one of which must appear in the text.
    #[serde(default, skip_serializing_if = "ConditionSet::is_any")]
    pub keywords: ConditionSet<String>,
}

impl TechniqueConditions {
    /// True when every category is a wildcard.
    pub fn is_unconditional(&self) -> bool {
        self.intents.is_any()
            && self.complexity.is_any()
            && self.complexity_range.is_none()
            && self.keywords.is_any()
    }
}

/// A named prompt-engineering strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technique {
    /// Unique id within the catalog.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Base score for a match. Higher ranks first.
    #[serde(default)]
    pub priority: i32,

    #[serde(default)]
    pub conditions: TechniqueConditions,

    /// Opaque template reference handed to the prompt generator.
    #[serde(default)]
    pub template: String,

    /// Disabled techniques never match.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Technique {
    pub fn new(id: impl Into<String>, priority: i32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            template: id.clone(),
            id,
            description: String::new(),
            priority,
            conditions: TechniqueConditions::default(),
            enabled: true,
        }
    }

    pub fn with_intents<I, S>(mut self, intents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions.intents = intents.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_complexity(mut self, levels: impl IntoIterator<Item = ComplexityLevel>) -> Self {
        self.conditions.complexity = levels.into_iter().collect();
        self
    }

    pub fn with_score_range(mut self, min: f64, max: f64) -> Self {
        self.conditions.complexity_range = Some(ScoreRange::new(min, max));
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_from_score_boundaries() {
        assert_eq!(ComplexityLevel::from_score(0.0), ComplexityLevel::Simple);
        assert_eq!(ComplexityLevel::from_score(0.34), ComplexityLevel::Simple);
        assert_eq!(ComplexityLevel::from_score(0.35), ComplexityLevel::Moderate);
        assert_eq!(ComplexityLevel::from_score(0.65), ComplexityLevel::Complex);
    }

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("Complex".parse::<ComplexityLevel>(), Ok(ComplexityLevel::Complex));
        assert!("hard".parse::<ComplexityLevel>().is_err());
    }

    #[test]
    fn technique_from_toml() {
        let t: Technique = toml::from_str(
            r#"
id = "few_shot"
name = "Few-shot examples"
priority = 7
template = "few_shot_v1"

[conditions]
complexity = ["simple", "moderate"]
keywords = ["example", "similar"]
"#,
        )
        .unwrap();
        assert_eq!(t.id, "few_shot");
        assert!(t.enabled);
        assert!(t.conditions.intents.is_any());
        assert!(t.conditions.complexity.admits(&ComplexityLevel::Simple));
        assert!(!t.conditions.complexity.admits(&ComplexityLevel::Complex));
        assert!(!t.conditions.is_unconditional());
    }

    #[test]
    fn builder_sets_conditions() {
        let t = Technique::new("cot", 5)
            .with_intents(["problem_solving"])
            .with_score_range(0.5, 1.0);
        assert_eq!(t.template, "cot");
        assert!(t.conditions.intents.admits(&"problem_solving".to_string()));
        assert_eq!(t.conditions.complexity_range, Some(ScoreRange::new(0.5, 1.0)));
        assert!(Technique::new("plain", 1).conditions.is_unconditional());
    }
}
