//! Complexity estimation.
//!
//! Turns request text, plus whatever complexity signal the classifier
//! supplied, into a score in `[0, 1]`:
//!
//! ```text
//! explicit score      -> wins outright (clamped)
//! classifier level    -> level baseline + text signal weights
//! neither             -> word count band + text signal weights
//! ```
//!
//! Text signals are independent and additive: multi-part questions,
//! technical term density, arithmetic, abstract concepts and more than one
//! constraint marker.

use promptsmith_core::{CatalogError, Complexity, ComplexityFactors, ComplexityLevel};
use regex_lite::Regex;
use std::collections::HashSet;
use std::fmt;

/// A text feature that raised the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexitySignal {
    MultiPart,
    TechnicalDensity,
    Calculation,
    AbstractConcepts,
    MultipleConstraints,
}

impl fmt::Display for ComplexitySignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MultiPart => "multi-part question",
            Self::TechnicalDensity => "technical terms",
            Self::Calculation => "calculation",
            Self::AbstractConcepts => "abstract concepts",
            Self::MultipleConstraints => "multiple constraints",
        })
    }
}

/// Where the final score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexityBasis {
    Override,
    Level(ComplexityLevel),
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityEstimate {
    pub score: f64,
    pub basis: ComplexityBasis,
    pub word_count: usize,
    pub signals: Vec<ComplexitySignal>,
}

impl ComplexityEstimate {
    /// The level used when reporting this estimate.
    pub fn level(&self) -> ComplexityLevel {
        match self.basis {
            ComplexityBasis::Level(level) => level,
            _ => ComplexityLevel::from_score(self.score),
        }
    }
}

/// Scores text with a compiled copy of the catalog's complexity factors.
#[derive(Debug)]
pub struct ComplexityEstimator {
    factors: ComplexityFactors,
    calculation: Regex,
    technical: HashSet<String>,
    abstracts: HashSet<String>,
    constraints: HashSet<String>,
}

fn vocabulary(words: &[String]) -> HashSet<String> {
    words.iter().map(|w| w.trim().to_lowercase()).collect()
}

impl ComplexityEstimator {
    pub fn new(factors: &ComplexityFactors) -> Result<Self, CatalogError> {
        let calculation =
            Regex::new(&factors.calculation_pattern).map_err(|e| CatalogError::InvalidPattern {
                name: "calculation_pattern".into(),
                detail: e.to_string(),
            })?;
        Ok(Self {
            factors: factors.clone(),
            calculation,
            technical: vocabulary(&factors.technical_vocabulary),
            abstracts: vocabulary(&factors.abstract_vocabulary),
            constraints: vocabulary(&factors.constraint_markers),
        })
    }

    pub fn estimate(&self, text: &str, complexity: &Complexity) -> ComplexityEstimate {
        let tokens = tokenize(text);
        let word_count = tokens.len();

        if let Some(score) = complexity.finite_score() {
            return ComplexityEstimate {
                score: score.clamp(0.0, 1.0),
                basis: ComplexityBasis::Override,
                word_count,
                signals: Vec::new(),
            };
        }

        let signals = self.signals(text, &tokens);
        let added: f64 = signals.iter().map(|s| self.weight(*s)).sum();
        let (baseline, basis) = match complexity.level {
            Some(level) => (level.baseline(), ComplexityBasis::Level(level)),
            None => (self.factors.word_count_score(word_count), ComplexityBasis::Text),
        };

        ComplexityEstimate {
            score: (baseline + added).clamp(0.0, 1.0),
            basis,
            word_count,
            signals,
        }
    }

    fn weight(&self, signal: ComplexitySignal) -> f64 {
        match signal {
            ComplexitySignal::MultiPart => self.factors.multi_part_question,
            ComplexitySignal::TechnicalDensity => self.factors.technical_terms,
            ComplexitySignal::Calculation => self.factors.requires_calculation,
            ComplexitySignal::AbstractConcepts => self.factors.abstract_concepts,
            ComplexitySignal::MultipleConstraints => self.factors.multiple_constraints,
        }
    }

    fn signals(&self, text: &str, tokens: &[String]) -> Vec<ComplexitySignal> {
        let mut signals = Vec::new();

        if count_parts(text) > 1 {
            signals.push(ComplexitySignal::MultiPart);
        }

        if !tokens.is_empty() {
            let technical = tokens.iter().filter(|t| self.technical.contains(*t)).count();
            let density = technical as f64 / tokens.len() as f64;
            if technical > 0 && density >= self.factors.technical_density_threshold {
                signals.push(ComplexitySignal::TechnicalDensity);
            }
        }

        if self.calculation.is_match(&text.to_lowercase()) {
            signals.push(ComplexitySignal::Calculation);
        }

        if tokens.iter().any(|t| self.abstracts.contains(t)) {
            signals.push(ComplexitySignal::AbstractConcepts);
        }

        let constraints = tokens.iter().filter(|t| self.constraints.contains(*t)).count();
        if constraints > 1 {
            signals.push(ComplexitySignal::MultipleConstraints);
        }

        signals
    }
}

/// Lowercased words with surrounding punctuation stripped.
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Question marks plus enumerated lines (`1.`, `2)`, `- `).
fn count_parts(text: &str) -> usize {
    let questions = text.matches('?').count();
    let enumerated = text
        .lines()
        .map(str::trim_start)
        .filter(|line| {
            let digits = line.chars().take_while(char::is_ascii_digit).count();
            (digits > 0 && matches!(line[digits..].chars().next(), Some('.' | ')')))
                || line.starts_with("- ")
                || line.starts_with("* ")
        })
        .count();
    questions + enumerated
}
