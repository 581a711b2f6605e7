//! Rule table configuration for the payroll engine.
//!
//! This module provides functionality to load the rule table (income tax
//! slabs, social security rate, professional tax by location, and detection
//! thresholds) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::RulesLoader;
//!
//! let rules = RulesLoader::load("./config/rules.yaml").unwrap().into_rules();
//! println!("Locations configured: {}", rules.professional_tax.len());
//! ```

mod loader;
mod types;

pub use loader::RulesLoader;
pub use types::{
    DEFAULT_LOCATION, DetectionThresholds, ProfessionalTaxSlab, RuleTable, RuleTableDocument,
    Slab, TaxSlab,
};
