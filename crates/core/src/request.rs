//! Per-call request and response values.

use crate::technique::ComplexityLevel;
use serde::{Deserialize, Serialize};

/// Complexity as supplied by the caller: a level, a score, both or neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Complexity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<ComplexityLevel>,

    /// Explicit score override in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Complexity {
    pub fn level(level: ComplexityLevel) -> Self {
        Self {
            level: Some(level),
            score: None,
        }
    }

    pub fn score(score: f64) -> Self {
        Self {
            level: None,
            score: Some(score),
        }
    }

    /// The explicit score, if it is a finite number. NaN and infinities
    /// count as no score at all.
    pub fn finite_score(&self) -> Option<f64> {
        self.score.filter(|s| s.is_finite())
    }

    /// Neither a level nor a usable score was supplied.
    pub fn is_unspecified(&self) -> bool {
        self.level.is_none() && self.finite_score().is_none()
    }

    /// The explicit level, or the one implied by an explicit score.
    pub fn effective_level(&self) -> Option<ComplexityLevel> {
        self.level
            .or_else(|| self.finite_score().map(ComplexityLevel::from_score))
    }
}

/// Output of the external intent classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub intent: String,
    #[serde(default)]
    pub complexity: Complexity,
    #[serde(default)]
    pub confidence: f64,
}

/// One call into the selection engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub text: String,

    /// Classified intent. `None` or blank matches every intent condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,

    #[serde(default)]
    pub complexity: Complexity,
}

impl SelectionRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    pub fn with_level(mut self, level: ComplexityLevel) -> Self {
        self.complexity.level = Some(level);
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.complexity.score = Some(score);
        self
    }

    pub fn from_classification(text: impl Into<String>, result: &ClassificationResult) -> Self {
        Self {
            text: text.into(),
            intent: Some(result.intent.clone()),
            complexity: result.complexity,
        }
    }

    /// The intent, if present and non-blank.
    pub fn intent(&self) -> Option<&str> {
        self.intent
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// A technique chosen for the response, in ranked order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedTechnique {
    pub id: String,
    /// Boosted score.
    pub score: i64,
    /// Template reference for the prompt generator.
    pub template: String,
}

/// Result of one selection. An empty technique list is a normal outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub techniques: Vec<SelectedTechnique>,
    pub primary: Option<String>,
    pub confidence: f64,
    /// Whether `confidence` reaches the catalog's advisory threshold.
    pub meets_min_confidence: bool,
    pub complexity_score: f64,
    pub reasoning: String,
}

impl SelectionResponse {
    pub fn technique_ids(&self) -> Vec<&str> {
        self.techniques.iter().map(|t| t.id.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty()
    }
}
