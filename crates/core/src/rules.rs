//! Selection rules and complexity factors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How the compatibility resolver packs the final technique set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingStrategy {
    /// Walk the ranking, skipping conflicts, until the limit is reached.
    #[default]
    Greedy,
    /// Search subsets up to the limit for the highest summed score.
    Exhaustive,
}

/// Global rules applied after matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionRules {
    /// Upper bound on techniques in a response.
    #[serde(default = "default_max_techniques", alias = "maxTechniques")]
    pub max_techniques: usize,

    /// Advisory threshold surfaced to callers; never filters the selection.
    #[serde(default = "default_min_confidence", alias = "minConfidence")]
    pub min_confidence: f64,

    /// Sanctioned pairings. Documentation only.
    #[serde(default, alias = "compatibleCombinations")]
    pub compatible_combinations: Vec<Vec<String>>,

    /// Sets whose members must never co-occur in one response.
    #[serde(default, alias = "incompatibleCombinations")]
    pub incompatible_combinations: Vec<Vec<String>>,

    /// intent -> technique id -> additive boost.
    #[serde(default, alias = "intentPriorityBoost")]
    pub intent_priority_boost: BTreeMap<String, BTreeMap<String, i32>>,

    #[serde(default)]
    pub packing: PackingStrategy,

    /// Boosted score treated as full certainty by the confidence calculator.
    #[serde(default = "default_score_ceiling", alias = "scoreCeiling")]
    pub score_ceiling: f64,
}

fn default_max_techniques() -> usize {
    3
}
fn default_min_confidence() -> f64 {
    0.5
}
fn default_score_ceiling() -> f64 {
    10.0
}

impl Default for SelectionRules {
    fn default() -> Self {
        Self {
            max_techniques: default_max_techniques(),
            min_confidence: default_min_confidence(),
            compatible_combinations: vec![],
            incompatible_combinations: vec![],
            intent_priority_boost: BTreeMap::new(),
            packing: PackingStrategy::default(),
            score_ceiling: default_score_ceiling(),
        }
    }
}

impl SelectionRules {
    /// Boost configured for `technique` under `intent`, if any.
    pub fn boost_for(&self, intent: Option<&str>, technique: &str) -> Option<i32> {
        self.intent_priority_boost
            .get(intent?)
            .and_then(|boosts| boosts.get(technique))
            .copied()
    }

    /// True when `a` and `b` appear together in any incompatible set.
    pub fn conflicts(&self, a: &str, b: &str) -> bool {
        a != b
            && self
                .incompatible_combinations
                .iter()
                .any(|set| set.iter().any(|x| x == a) && set.iter().any(|x| x == b))
    }
}

/// One half-open `[min, max)` word count band. `max = None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WordCountRange {
    pub min: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
    pub score: f64,
}

impl WordCountRange {
    pub fn contains(&self, words: usize) -> bool {
        words >= self.min && self.max.is_none_or(|max| words < max)
    }
}

/// Weights and vocabularies used by the complexity estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityFactors {
    #[serde(default = "default_word_count", alias = "wordCount")]
    pub word_count: Vec<WordCountRange>,

    #[serde(default = "default_multi_part_weight", alias = "multiPartQuestion")]
    pub multi_part_question: f64,

    #[serde(default = "default_technical_weight", alias = "technicalTerms")]
    pub technical_terms: f64,

    #[serde(default = "default_calculation_weight", alias = "requiresCalculation")]
    pub requires_calculation: f64,

    #[serde(default = "default_abstract_weight", alias = "abstractConcepts")]
    pub abstract_concepts: f64,

    #[serde(default = "default_constraints_weight", alias = "multipleConstraints")]
    pub multiple_constraints: f64,

    /// Fraction of words that must be technical terms to fire the signal.
    #[serde(default = "default_density_threshold")]
    pub technical_density_threshold: f64,

    #[serde(default = "default_technical_vocabulary")]
    pub technical_vocabulary: Vec<String>,

    #[serde(default = "default_abstract_vocabulary")]
    pub abstract_vocabulary: Vec<String>,

    #[serde(default = "default_constraint_markers")]
    pub constraint_markers: Vec<String>,

    /// Regex recognising arithmetic in the text.
    #[serde(default = "default_calculation_pattern")]
    pub calculation_pattern: String,
}

fn default_word_count() -> Vec<WordCountRange> {
    vec![
        WordCountRange { min: 0, max: Some(10), score: 0.1 },
        WordCountRange { min: 10, max: Some(30), score: 0.25 },
        WordCountRange { min: 30, max: Some(80), score: 0.4 },
        WordCountRange { min: 80, max: None, score: 0.6 },
    ]
}
fn default_multi_part_weight() -> f64 {
    0.15
}
fn default_technical_weight() -> f64 {
    0.15
}
fn default_calculation_weight() -> f64 {
    0.1
}
fn default_abstract_weight() -> f64 {
    0.1
}
fn default_constraints_weight() -> f64 {
    0.1
}
fn default_density_threshold() -> f64 {
    0.1
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

fn default_technical_vocabulary() -> Vec<String> {
    words(&[
        "algorithm", "api", "async", "cache", "compiler", "concurrency", "database",
        "deploy", "function", "kernel", "latency", "protocol", "query", "recursion",
        "regex", "schema", "server", "thread", "variable",
    ])
}

fn default_abstract_vocabulary() -> Vec<String> {
    words(&[
        "consciousness", "ethics", "freedom", "justice", "meaning", "morality",
        "philosophy", "theory", "truth",
    ])
}

fn default_constraint_markers() -> Vec<String> {
    words(&["and", "but", "must", "should", "without", "while", "unless", "only"])
}

fn default_calculation_pattern() -> String {
    r"\d\s*[-+*/^%=]\s*\d|\b(calculate|compute|sum|average|percent)\b".into()
}

impl Default for ComplexityFactors {
    fn default() -> Self {
        Self {
            word_count: default_word_count(),
            multi_part_question: default_multi_part_weight(),
            technical_terms: default_technical_weight(),
            requires_calculation: default_calculation_weight(),
            abstract_concepts: default_abstract_weight(),
            multiple_constraints: default_constraints_weight(),
            technical_density_threshold: default_density_threshold(),
            technical_vocabulary: default_technical_vocabulary(),
            abstract_vocabulary: default_abstract_vocabulary(),
            constraint_markers: default_constraint_markers(),
            calculation_pattern: default_calculation_pattern(),
        }
    }
}

impl ComplexityFactors {
    /// Base score for a word count. Counts outside every band score zero.
    pub fn word_count_score(&self, words: usize) -> f64 {
        self.word_count
            .iter()
            .find(|r| r.contains(words))
            .map_or(0.0, |r| r.score)
    }
}
