//! Human-readable explanation of a selection.
//!
//! Output is built only from the request, the estimate and the ranking, with
//! fixed float precision, so identical inputs always render identical text.

use crate::compatibility::Resolution;
use crate::complexity::{ComplexityBasis, ComplexityEstimate};
use crate::priority::RankedCandidate;
use std::fmt::Write;

pub struct ReasoningInput<'r, 'a> {
    pub intent: Option<&'r str>,
    pub estimate: &'r ComplexityEstimate,
    pub ranked: &'r [RankedCandidate<'a>],
    pub resolution: &'r Resolution,
    pub max_techniques: usize,
}

pub fn explain(input: &ReasoningInput<'_, '_>) -> String {
    let mut out = String::new();

    match input.intent {
        Some(intent) => {
            let _ = write!(out, "Intent '{intent}'");
        }
        None => out.push_str("Intent unspecified"),
    }
    let estimate = input.estimate;
    let level = estimate.level();
    let _ = match estimate.basis {
        ComplexityBasis::Override => {
            write!(out, ", {level} complexity (explicit score {:.2})", estimate.score)
        }
        ComplexityBasis::Level(_) => write!(
            out,
            ", {level} complexity (classifier level, score {:.2})",
            estimate.score
        ),
        ComplexityBasis::Text => write!(
            out,
            ", {level} complexity (estimated from text, score {:.2})",
            estimate.score
        ),
    };
    if !estimate.signals.is_empty() {
        let signals: Vec<String> = estimate.signals.iter().map(ToString::to_string).collect();
        let _ = write!(out, "; signals: {}", signals.join(", "));
    }
    out.push('.');

    if input.resolution.selected.is_empty() {
        if input.ranked.is_empty() {
            out.push_str(" No techniques matched; the request proceeds without technique guidance.");
        } else if input.resolution.omitted > 0 {
            let _ = write!(
                out,
                " {} technique(s) matched but none could be selected (limit {}).",
                input.ranked.len(),
                input.max_techniques
            );
        } else {
            let _ = write!(
                out,
                " {} technique(s) matched but none would raise the total score.",
                input.ranked.len()
            );
        }
        return out;
    }

    out.push_str(" Selected: ");
    let selected: Vec<String> = input
        .resolution
        .selected
        .iter()
        .map(|&i| describe(&input.ranked[i]))
        .collect();
    out.push_str(&selected.join("; "));
    out.push('.');

    if !input.resolution.conflicts.is_empty() {
        let dropped: Vec<String> = input
            .resolution
            .conflicts
            .iter()
            .map(|c| {
                format!(
                    "{} (incompatible with {})",
                    input.ranked[c.dropped].id(),
                    input.ranked[c.blocked_by].id()
                )
            })
            .collect();
        let _ = write!(out, " Dropped: {}.", dropped.join(", "));
    }

    if input.resolution.omitted > 0 {
        let _ = write!(
            out,
            " {} more matched technique(s) omitted by the limit of {}.",
            input.resolution.omitted, input.max_techniques
        );
    }

    if input.resolution.unprofitable > 0 {
        let _ = write!(
            out,
            " {} more matched technique(s) left out because they would lower the total score.",
            input.resolution.unprofitable
        );
    }

    out
}

fn describe(candidate: &RankedCandidate<'_>) -> String {
    let basis = if candidate.reasons.is_empty() {
        "no conditions".to_string()
    } else {
        candidate
            .reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let mut text = format!(
        "{} (score {}, matched on {basis}",
        candidate.id(),
        candidate.score
    );
    if candidate.boost != 0 {
        let _ = write!(text, ", intent boost {:+}", candidate.boost);
    }
    text.push(')');
    text
}
