//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::RuleTable;
use crate::models::HistoryRecord;

/// Shared application state.
///
/// Holds the immutable rule table and the history snapshot loaded at
/// startup. Both are shared read-only across requests; reloading either
/// means restarting the process.
#[derive(Clone)]
pub struct AppState {
    rules: Arc<RuleTable>,
    history: Arc<Vec<HistoryRecord>>,
}

impl AppState {
    /// Creates a new application state from a rule table and history snapshot.
    pub fn new(rules: RuleTable, history: Vec<HistoryRecord>) -> Self {
        Self {
            rules: Arc::new(rules),
            history: Arc::new(history),
        }
    }

    /// Returns the rule table.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Returns the startup history snapshot, most recent first.
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }
}
