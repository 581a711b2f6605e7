//! Rule table loading functionality.
//!
//! This module provides the [`RulesLoader`] type for loading the rule table
//! from a YAML (or JSON) file.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

use super::types::{RuleTable, RuleTableDocument};

/// Loads and holds the process-wide rule table.
///
/// The table is read once at startup and never mutated afterwards; callers
/// borrow it with [`RulesLoader::rules`] or take ownership with
/// [`RulesLoader::into_rules`].
///
/// # File Format
///
/// ```text
/// social_security_percent: 0.12
/// income_tax_slabs:
///   - { min: 0, max: 250000, rate: 0.05 }
///   - { min: 250000, rate: 0.20 }        # no max: open above
/// professional_tax:
///   Mumbai:
///     - { min: 10001, tax: 200 }
///   default:
///     - { min: 0, tax: 0 }
/// detection:                              # optional, every field defaults
///   min_history_records: 3
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::RulesLoader;
///
/// let loader = RulesLoader::load("./config/rules.yaml").unwrap();
/// println!("Social security: {}", loader.rules().social_security_percent);
/// ```
#[derive(Debug, Clone)]
pub struct RulesLoader {
    rules: RuleTable,
}

impl RulesLoader {
    /// Loads and validates the rule table at `path`.
    ///
    /// # Returns
    ///
    /// Returns a `RulesLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file is not valid YAML/JSON (`ConfigParseError`)
    /// - A required section is absent (`MissingRuleSection`)
    /// - The table is inconsistent (`InvalidRuleTable`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::from_str_with_origin(&content, &path_str)?;
        debug!(
            path = %path_str,
            locations = loader.rules.professional_tax.len(),
            income_tax_slabs = loader.rules.income_tax_slabs.len(),
            "Loaded rule table"
        );
        Ok(loader)
    }

    /// Parses and validates a rule table from an in-memory document.
    ///
    /// `origin` is only used in error messages.
    pub fn from_str_with_origin(content: &str, origin: &str) -> EngineResult<Self> {
        let document: RuleTableDocument =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        let rules = RuleTable::try_from(document).inspect_err(|err| {
            warn!(origin = %origin, error = %err, "Rejected rule table");
        })?;

        Ok(Self { rules })
    }

    /// Returns the loaded rule table.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Consumes the loader, returning the rule table.
    pub fn into_rules(self) -> RuleTable {
        self.rules
    }
}
