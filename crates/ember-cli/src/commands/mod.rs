//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db, parse_scope)
//! - `logs` - Daily log entry, CSV import and listing
//! - `insights` - Insight pipeline, recorded events and feedback
//! - `wellness` - Burnout state, derived indices and weekly summary

pub mod core;
pub mod insights;
pub mod logs;
pub mod wellness;

// Re-export command functions for main.rs
pub use core::*;
pub use insights::*;
pub use logs::*;
pub use wellness::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an optional average for display
pub fn fmt_avg(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| "-".to_string())
}
