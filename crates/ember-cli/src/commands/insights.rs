//! Insight command implementations

use anyhow::{bail, Result};
use chrono::NaiveDate;
use ember_core::{
    Database, EngineConfig, FeedbackAction, Insight, InsightEngine, InsightKind, LogProvider,
    RuleId, Scope, UserLogs,
};

/// Options for `ember insights`
#[derive(Debug, Clone)]
pub struct InsightsOptions {
    pub scope: Scope,
    pub consistent: bool,
    pub json: bool,
    pub include_dismissed: bool,
}

/// Compute, record and filter insights for display
///
/// Every computed insight is recorded; dismissed ones are only hidden.
pub fn visible_insights(
    db: &Database,
    user: &str,
    config: &EngineConfig,
    today: NaiveDate,
    opts: &InsightsOptions,
) -> Result<Vec<Insight>> {
    let engine = InsightEngine::with_config(config.clone());
    let provider = UserLogs::new(db, user, today);

    let insights = if opts.consistent {
        engine.run_consistent_and_persist(&provider, db, user, opts.scope, today)?
    } else {
        let logs = provider.normalized_logs(opts.scope.lookback_days(config))?;
        let insights = engine.compute_insights(&logs, opts.scope);
        engine.run_and_persist(db, user, opts.scope, today, &insights);
        insights
    };

    if opts.include_dismissed {
        return Ok(insights);
    }
    let dismissed = db.list_dismissed_insight_keys(user)?;
    Ok(insights
        .into_iter()
        .filter(|i| !dismissed.iter().any(|k| k == i.rule.key()))
        .collect())
}

pub fn cmd_insights(
    db: &Database,
    user: &str,
    config: &EngineConfig,
    today: NaiveDate,
    opts: &InsightsOptions,
) -> Result<()> {
    let insights = visible_insights(db, user, config, today, opts)?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    if insights.is_empty() {
        println!("No {} insights yet. Patterns need about a week of logs.", opts.scope);
        return Ok(());
    }

    println!();
    println!("💡 {} Insights", capitalize(opts.scope.as_str()));
    println!("   ─────────────────────────────────────────────────────────────");

    for insight in &insights {
        let icon = match insight.kind() {
            InsightKind::Prediction => "🔮",
            InsightKind::Insight => "•",
        };
        println!(
            "   {} {} ({:.0}% confidence) [{}]",
            icon,
            insight.title,
            insight.confidence * 100.0,
            insight.rule.key()
        );
        println!("     {}", insight.summary);
        for why in &insight.why {
            println!("       - {}", why);
        }
        if let Some(weeks) = insight.consistency_weeks {
            println!("     ✓ Consistent for {}+ weeks", weeks);
        }
    }

    println!();
    println!("   Use 'ember feedback <key> dismissed' to hide an insight.");
    Ok(())
}

pub fn cmd_events(db: &Database, user: &str, limit: usize) -> Result<()> {
    let events = db.list_insight_events(user, limit)?;

    if events.is_empty() {
        println!("No insight events recorded yet.");
        return Ok(());
    }

    println!();
    println!("🗂  Insight Events");
    println!("   ─────────────────────────────────────────────────────────────");

    for event in events {
        println!(
            "   {} │ {:<7} │ {:<10} │ {:>3.0}% │ {}",
            event.period_start,
            event.scope.as_str(),
            event.kind.as_str(),
            event.confidence * 100.0,
            event.title
        );
    }

    Ok(())
}

pub fn cmd_feedback(db: &Database, user: &str, key: &str, action: &str) -> Result<()> {
    if RuleId::from_key(key).is_none() {
        let known: Vec<&str> = RuleId::BUILTIN.iter().map(|r| r.key()).collect();
        bail!("Unknown insight key '{}'. Known keys: {}", key, known.join(", "));
    }
    let action: FeedbackAction = action.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    db.set_insight_feedback(user, key, action)?;

    match action {
        FeedbackAction::Acknowledged => println!("👍 Acknowledged '{}'", key),
        FeedbackAction::Dismissed => {
            println!("🙈 Dismissed '{}'", key);
            println!("   It stays hidden; use 'ember insights --all' to see it.");
        }
    }
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
