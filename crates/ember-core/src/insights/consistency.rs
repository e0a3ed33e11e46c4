//! Weekly/monthly consistency tagging

use std::collections::HashSet;

use super::types::{Insight, RuleId};

/// Weeks of agreement recorded when a weekly insight also holds monthly
pub const CONSISTENT_WEEKS: u32 = 2;

/// Tag weekly insights that also appear in the monthly set
///
/// Monthly-only insights are not returned; this only cross-references two
/// finished sets.
pub fn tag_consistency(weekly: Vec<Insight>, monthly: &[Insight]) -> Vec<Insight> {
    let monthly_rules: HashSet<RuleId> = monthly.iter().map(|i| i.rule).collect();

    weekly
        .into_iter()
        .map(|mut insight| {
            if monthly_rules.contains(&insight.rule) {
                insight.consistency_weeks = Some(CONSISTENT_WEEKS);
            }
            insight
        })
        .collect()
}
