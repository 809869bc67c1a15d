//! Technique matching.
//!
//! Each condition category on a technique is evaluated on its own and
//! yields one of three outcomes: wildcard, pass (with the reason) or
//! fail. A technique matches when no category fails.

use promptsmith_core::{ComplexityLevel, Technique};
use std::fmt;

/// Why a category passed. Wildcard passes carry no reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchReason {
    Intent,
    ComplexityLevel,
    ComplexityRange,
    Keyword(String),
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intent => f.write_str("intent"),
            Self::ComplexityLevel => f.write_str("complexity level"),
            Self::ComplexityRange => f.write_str("complexity range"),
            Self::Keyword(k) => write!(f, "keyword '{k}'"),
        }
    }
}

enum Outcome {
    Wildcard,
    Pass(MatchReason),
    Fail,
}

/// The request facts every technique is evaluated against.
#[derive(Debug, Clone)]
pub struct MatchContext<'a> {
    /// `None` matches every intent condition.
    pub intent: Option<&'a str>,
    /// `None` (with `complexity_known == false`) matches every complexity condition.
    pub level: Option<ComplexityLevel>,
    pub complexity_known: bool,
    pub score: f64,
    text_lower: String,
}

impl<'a> MatchContext<'a> {
    pub fn new(
        text: &str,
        intent: Option<&'a str>,
        level: Option<ComplexityLevel>,
        complexity_known: bool,
        score: f64,
    ) -> Self {
        Self {
            intent,
            level,
            complexity_known,
            score,
            text_lower: text.to_lowercase(),
        }
    }
}

/// A technique whose conditions all passed.
#[derive(Debug, Clone)]
pub struct TechniqueMatch<'a> {
    /// Position in the catalog, used for tie-breaking.
    pub index: usize,
    pub technique: &'a Technique,
    pub reasons: Vec<MatchReason>,
}

impl TechniqueMatch<'_> {
    /// Base score before intent boosts.
    pub fn base_score(&self) -> i64 {
        i64::from(self.technique.priority)
    }
}

/// Evaluate one technique. Returns the reasons on a match.
pub fn evaluate(technique: &Technique, ctx: &MatchContext<'_>) -> Option<Vec<MatchReason>> {
    if !technique.enabled {
        return None;
    }
    let mut reasons = Vec::new();
    for outcome in [
        intent_outcome(technique, ctx),
        complexity_outcome(technique, ctx),
        keyword_outcome(technique, ctx),
    ] {
        match outcome {
            Outcome::Wildcard => {}
            Outcome::Pass(reason) => reasons.push(reason),
            Outcome::Fail => return None,
        }
    }
    Some(reasons)
}

/// Evaluate the whole catalog, preserving catalog order.
pub fn match_all<'a>(techniques: &'a [Technique], ctx: &MatchContext<'_>) -> Vec<TechniqueMatch<'a>> {
    techniques
        .iter()
        .enumerate()
        .filter_map(|(index, technique)| {
            evaluate(technique, ctx).map(|reasons| TechniqueMatch {
                index,
                technique,
                reasons,
            })
        })
        .collect()
}

fn intent_outcome(technique: &Technique, ctx: &MatchContext<'_>) -> Outcome {
    let Some(intents) = technique.conditions.intents.members() else {
        return Outcome::Wildcard;
    };
    match ctx.intent {
        None => Outcome::Wildcard,
        Some(intent) if intents.contains(intent) => Outcome::Pass(MatchReason::Intent),
        Some(_) => Outcome::Fail,
    }
}

fn complexity_outcome(technique: &Technique, ctx: &MatchContext<'_>) -> Outcome {
    let conditions = &technique.conditions;
    let levels = &conditions.complexity;
    let range = conditions.complexity_range;
    if (levels.is_any() && range.is_none()) || !ctx.complexity_known {
        return Outcome::Wildcard;
    }

    if !levels.is_any() && ctx.level.is_some_and(|level| levels.admits(&level)) {
        return Outcome::Pass(MatchReason::ComplexityLevel);
    }
    if range.is_some_and(|r| r.contains(ctx.score)) {
        return Outcome::Pass(MatchReason::ComplexityRange);
    }
    Outcome::Fail
}

fn keyword_outcome(technique: &Technique, ctx: &MatchContext<'_>) -> Outcome {
    let Some(keywords) = technique.conditions.keywords.members() else {
        return Outcome::Wildcard;
    };
    keywords
        .iter()
        .find(|k| {
            let needle = k.trim().to_lowercase();
            !needle.is_empty() && ctx.text_lower.contains(&needle)
        })
        .map_or(Outcome::Fail, |k| Outcome::Pass(MatchReason::Keyword(k.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(text: &str, intent: Option<&'a str>, level: Option<ComplexityLevel>) -> MatchContext<'a> {
        MatchContext::new(text, intent, level, level.is_some(), 0.5)
    }

    #[test]
    fn unconditional_technique_matches_without_reasons() {
        let t = Technique::new("plain", 1);
        assert_eq!(evaluate(&t, &ctx("anything", Some("coding"), None)), Some(vec![]));
    }

    #[test]
    fn intent_must_be_a_member() {
        let t = Technique::new("cot", 5).with_intents(["problem_solving"]);
        assert_eq!(
            evaluate(&t, &ctx("x", Some("problem_solving"), None)),
            Some(vec![MatchReason::Intent])
        );
        assert_eq!(evaluate(&t, &ctx("x", Some("creative_writing"), None)), None);
    }

    #[test]
    fn missing_intent_is_a_wildcard() {
        let t = Technique::new("cot", 5).with_intents(["problem_solving"]);
        assert_eq!(evaluate(&t, &ctx("x", None, None)), Some(vec![]));
    }

    #[test]
    fn level_or_range_satisfies_complexity() {
        let t = Technique::new("t", 1)
            .with_complexity([ComplexityLevel::Complex])
            .with_score_range(0.4, 0.6);
        // Level misses, range (0.5) hits.
        assert_eq!(
            evaluate(&t, &ctx("x", None, Some(ComplexityLevel::Simple))),
            Some(vec![MatchReason::ComplexityRange])
        );
        // Level hits.
        assert_eq!(
            evaluate(&t, &ctx("x", None, Some(ComplexityLevel::Complex))),
            Some(vec![MatchReason::ComplexityLevel])
        );
        // Both miss.
        let far = MatchContext::new("x", None, Some(ComplexityLevel::Simple), true, 0.1);
        assert_eq!(evaluate(&t, &far), None);
    }

    #[test]
    fn range_only_technique_ignores_the_level() {
        let t = Technique::new("t", 1).with_score_range(0.7, 1.0);
        let low = MatchContext::new("x", None, Some(ComplexityLevel::Complex), true, 0.3);
        assert_eq!(evaluate(&t, &low), None);
        let high = MatchContext::new("x", None, Some(ComplexityLevel::Simple), true, 0.8);
        assert_eq!(evaluate(&t, &high), Some(vec![MatchReason::ComplexityRange]));
    }

    #[test]
    fn unknown_complexity_is_a_wildcard() {
        let t = Technique::new("t", 1).with_complexity([ComplexityLevel::Complex]);
        assert_eq!(evaluate(&t, &ctx("x", None, None)), Some(vec![]));
    }

    #[test]
    fn keywords_are_case_insensitive_substrings() {
        let t = Technique::new("few_shot", 1).with_keywords(["Example", "similar"]);
        assert_eq!(
            evaluate(&t, &ctx("Write an EXAMPLES section", None, None)),
            Some(vec![MatchReason::Keyword("Example".into())])
        );
        assert_eq!(evaluate(&t, &ctx("nothing relevant", None, None)), None);
    }

    #[test]
    fn every_present_category_must_pass() {
        let t = Technique::new("t", 1)
            .with_intents(["coding"])
            .with_keywords(["refactor"]);
        assert!(evaluate(&t, &ctx("please refactor", Some("coding"), None)).is_some());
        assert!(evaluate(&t, &ctx("please refactor", Some("chat"), None)).is_none());
        assert!(evaluate(&t, &ctx("please rewrite", Some("coding"), None)).is_none());
    }

    #[test]
    fn disabled_techniques_never_match() {
        let t = Technique::new("t", 1).disabled();
        assert_eq!(evaluate(&t, &ctx("x", None, None)), None);
    }

    #[test]
    fn match_all_keeps_catalog_order() {
        let techniques = vec![
            Technique::new("a", 1),
            Technique::new("b", 9).with_intents(["other"]),
            Technique::new("c", 5),
        ];
        let matches = match_all(&techniques, &ctx("x", Some("coding"), None));
        let ids: Vec<_> = matches.iter().map(|m| (m.index, m.technique.id.as_str())).collect();
        assert_eq!(ids, vec![(0, "a"), (2, "c")]);
        assert_eq!(matches[1].base_score(), 5);
    }
}
