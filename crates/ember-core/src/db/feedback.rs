//! Insight feedback operations

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{FeedbackAction, InsightFeedback};

impl Database {
    /// Record the latest reaction to an insight key, replacing any earlier one
    pub fn set_insight_feedback(
        &self,
        user_id: &str,
        insight_key: &str,
        action: FeedbackAction,
    ) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO insight_feedback (user_id, insight_key, action)
            VALUES (?, ?, ?)
            ON CONFLICT(user_id, insight_key) DO UPDATE SET
                action = excluded.action,
                updated_at = CURRENT_TIMESTAMP
            "#,
            params![user_id, insight_key, action.as_str()],
        )?;
        Ok(())
    }

    pub fn get_insight_feedback(
        &self,
        user_id: &str,
        insight_key: &str,
    ) -> Result<Option<InsightFeedback>> {
        let conn = self.conn()?;
        let feedback = conn
            .query_row(
                r#"
                SELECT user_id, insight_key, action, updated_at
                FROM insight_feedback
                WHERE user_id = ? AND insight_key = ?
                "#,
                params![user_id, insight_key],
                |row| {
                    let action_str: String = row.get(2)?;
                    let updated_at: String = row.get(3)?;
                    Ok(InsightFeedback {
                        user_id: row.get(0)?,
                        insight_key: row.get(1)?,
                        action: action_str.parse().unwrap_or(FeedbackAction::Acknowledged),
                        updated_at: parse_datetime(&updated_at),
                    })
                },
            )
            .optional()?;
        Ok(feedback)
    }

    /// Insight keys the user has dismissed
    pub fn list_dismissed_insight_keys(&self, user_id: &str) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT insight_key FROM insight_feedback WHERE user_id = ? AND action = ? ORDER BY insight_key",
        )?;
        let keys = stmt
            .query_map(params![user_id, FeedbackAction::Dismissed.as_str()], |row| {
                row.get(0)
            })?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}
