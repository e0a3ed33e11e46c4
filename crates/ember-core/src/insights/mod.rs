//! Insight Engine - rule-based wellness insights
//!
//! The engine looks for sustained patterns in a user's daily logs and
//! surfaces them as short, hedged statements with a banded confidence.
//!
//! ## Pipeline
//!
//! 1. **Rules** - six independent detectors, each firing at most once
//! 2. **Confidence** - hide weak insights, hedge borderline ones, snap the
//!    weighted confidence to a band
//! 3. **Stability** - keep only insights that reproduce on both halves of
//!    the window
//! 4. **Consistency** (optional) - tag weekly insights that also hold monthly
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ember_core::insights::{InsightEngine, Scope};
//!
//! let engine = InsightEngine::new();
//! let insights = engine.compute_insights(&logs, Scope::Weekly);
//! ```

pub mod confidence;
pub mod consistency;
pub mod engine;
pub mod rules;
pub mod stability;
pub mod types;

pub use confidence::CONFIDENCE_BANDS;
pub use consistency::tag_consistency;
pub use engine::{
    builtin_rules, crash_probability, period_start, FnRule, InsightEngine, InsightSink,
    LogProvider, Rule,
};
pub use stability::filter_stable_insights;
pub use types::{
    confidence_weight, Insight, InsightKind, RuleId, Scope, DEFAULT_CONFIDENCE_WEIGHT,
};
