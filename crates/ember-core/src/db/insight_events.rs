//! Surfaced-insight event log
//!
//! One row per (user, insight key, scope, period). Re-recording the same
//! insight in the same period is a no-op, so runs can be repeated safely.

use chrono::NaiveDate;
use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::insights::{Insight, InsightKind, InsightSink, Scope};
use crate::models::InsightEvent;

impl InsightSink for Database {
    fn record_insight_events(
        &self,
        user_id: &str,
        insights: &[Insight],
        period_start: NaiveDate,
    ) -> Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let period = period_start.format("%Y-%m-%d").to_string();

        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO insight_events (
                    user_id, insight_key, title, scope, confidence, type, period_start,
                    reasons
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )?;

            for insight in insights {
                let reasons = serde_json::to_string(&insight.why)?;
                inserted += stmt.execute(params![
                    user_id,
                    insight.rule.key(),
                    insight.title,
                    insight.scope.as_str(),
                    insight.confidence,
                    insight.kind().as_str(),
                    period,
                    reasons,
                ])?;
            }
        }

        tx.commit()?;
        Ok(inserted)
    }
}

impl Database {
    /// Most recent events first
    pub fn list_insight_events(&self, user_id: &str, limit: usize) -> Result<Vec<InsightEvent>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, insight_key, title, scope, confidence, type, period_start,
                   reasons, created_at
            FROM insight_events
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )?;

        let events = stmt
            .query_map(params![user_id, limit as i64], Self::row_to_insight_event)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(events)
    }

    fn row_to_insight_event(row: &rusqlite::Row) -> rusqlite::Result<InsightEvent> {
        let scope_str: String = row.get(4)?;
        let kind_str: String = row.get(6)?;
        let period_str: String = row.get(7)?;
        let reasons: Option<String> = row.get(8)?;
        let created_at: String = row.get(9)?;

        Ok(InsightEvent {
            id: row.get(0)?,
            user_id: row.get(1)?,
            insight_key: row.get(2)?,
            title: row.get(3)?,
            scope: scope_str.parse().unwrap_or(Scope::Weekly),
            confidence: row.get(5)?,
            kind: kind_str.parse().unwrap_or(InsightKind::Insight),
            period_start: NaiveDate::parse_from_str(&period_str, "%Y-%m-%d").unwrap_or_default(),
            why: reasons
                .and_then(|j| serde_json::from_str(&j).ok())
                .unwrap_or_default(),
            created_at: parse_datetime(&created_at),
        })
    }
}
