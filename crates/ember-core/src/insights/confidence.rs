//! Confidence pipeline: visibility filtering, hedged wording, band snapping
//!
//! Raw rule confidence is a heuristic, so the user never sees it directly.
//! Insights under the visibility floor are dropped, weak ones get hedged
//! wording, and the weighted value is snapped to one of four bands.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::debug;

use super::types::{confidence_weight, Insight};

/// Insights below this raw confidence are never shown
pub const VISIBILITY_FLOOR: f64 = 0.4;
/// Insights below this raw confidence are shown with hedged wording
pub const HEDGE_BELOW: f64 = 0.6;
/// Every confidence value that can leave the pipeline
pub const CONFIDENCE_BANDS: [f64; 4] = [0.50, 0.65, 0.80, 0.90];

fn hedge_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(impacts|drain|stabilize)\b").expect("valid regex"))
}

/// Rewrite assertive verbs into hedged equivalents
pub fn soften(text: &str) -> String {
    hedge_regex()
        .replace_all(text, |caps: &Captures| {
            match &caps[1] {
                "impacts" => "may affect",
                "drain" => "might be draining",
                "stabilize" => "seem to stabilize",
                other => other,
            }
            .to_string()
        })
        .into_owned()
}

/// Stage A: drop low-confidence insights and hedge the weak survivors
///
/// Softening only touches display text; the rule identity is unchanged.
pub fn apply_visibility_rules(insights: Vec<Insight>) -> Vec<Insight> {
    let total = insights.len();
    let visible: Vec<Insight> = insights
        .into_iter()
        .filter(|i| i.confidence >= VISIBILITY_FLOOR)
        .map(|mut i| {
            if i.confidence < HEDGE_BELOW {
                i.title = soften(&i.title);
                i.summary = soften(&i.summary);
            }
            i
        })
        .collect();

    debug!(
        total,
        hidden = total - visible.len(),
        "Applied insight visibility rules"
    );
    visible
}

/// Snap a weighted confidence to its display band
pub fn snap_confidence(weighted: f64) -> f64 {
    if weighted < 0.55 {
        0.50
    } else if weighted < 0.70 {
        0.65
    } else if weighted < 0.85 {
        0.80
    } else {
        0.90
    }
}

/// Stage B: weight by rule and snap to a band
pub fn normalize_confidence(mut insight: Insight) -> Insight {
    let weighted = insight.confidence * confidence_weight(insight.rule);
    insight.confidence = snap_confidence(weighted);
    insight
}

/// Run both stages over a raw insight set
pub fn process(raw: Vec<Insight>) -> Vec<Insight> {
    apply_visibility_rules(raw)
        .into_iter()
        .map(normalize_confidence)
        .collect()
}
