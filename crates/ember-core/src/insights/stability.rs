//! Temporal stability check
//!
//! An insight survives only if the same rule also fires independently on
//! both the earlier and the later half of the window. This catches patterns
//! carried by a short blip; it is a reproducibility check, not a
//! significance test.

use std::collections::HashSet;

use tracing::debug;

use crate::normalize::NormalizedLog;

use super::engine::Rule;
use super::types::{Insight, RuleId, Scope};

/// Windows shorter than this pass through unchanged
pub const MIN_STABILITY_WINDOW: usize = 10;

fn fired_rules(rules: &[Box<dyn Rule>], logs: &[NormalizedLog], scope: Scope) -> HashSet<RuleId> {
    rules
        .iter()
        .filter_map(|rule| rule.analyze(logs, scope))
        .map(|insight| insight.rule)
        .collect()
}

/// Keep insights whose rule fires on both halves of `logs`
pub fn filter_stable_insights(
    rules: &[Box<dyn Rule>],
    logs: &[NormalizedLog],
    scope: Scope,
    insights: Vec<Insight>,
) -> Vec<Insight> {
    if logs.len() < MIN_STABILITY_WINDOW {
        return insights;
    }

    let (first, second) = logs.split_at(logs.len() / 2);
    let first_rules = fired_rules(rules, first, scope);
    let second_rules = fired_rules(rules, second, scope);

    let before = insights.len();
    let stable: Vec<Insight> = insights
        .into_iter()
        .filter(|i| first_rules.contains(&i.rule) && second_rules.contains(&i.rule))
        .collect();

    debug!(
        window = logs.len(),
        before,
        after = stable.len(),
        "Applied stability filter"
    );
    stable
}
