//! Rule table types.
//!
//! This module contains the strongly-typed rule table that drives net pay
//! and anomaly detection, plus the raw document form it is parsed from.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Key of the professional tax table used for unknown or absent locations.
pub const DEFAULT_LOCATION: &str = "default";

/// A range of gross pay, inclusive at both ends.
///
/// A missing upper bound means the range is open above.
pub trait Slab {
    /// Inclusive lower bound.
    fn min(&self) -> Decimal;

    /// Inclusive upper bound, or `None` if unbounded.
    fn max(&self) -> Option<Decimal>;

    /// Returns true if `min <= amount <= max`.
    fn contains(&self, amount: Decimal) -> bool {
        amount >= self.min() && self.max().is_none_or(|max| amount <= max)
    }
}

/// An income tax slab charging `rate` on the whole gross pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    /// Inclusive lower bound.
    pub min: Decimal,
    /// Inclusive upper bound; omitted for the top slab.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
    /// Fraction of gross pay charged (e.g. `0.10`).
    pub rate: Decimal,
}

impl Slab for TaxSlab {
    fn min(&self) -> Decimal {
        self.min
    }

    fn max(&self) -> Option<Decimal> {
        self.max
    }
}

/// A professional tax slab charging a flat amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalTaxSlab {
    /// Inclusive lower bound.
    pub min: Decimal,
    /// Inclusive upper bound; omitted for the top slab.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
    /// Flat amount charged.
    pub tax: Decimal,
}

impl Slab for ProfessionalTaxSlab {
    fn min(&self) -> Decimal {
        self.min
    }

    fn max(&self) -> Option<Decimal> {
        self.max
    }
}

/// Tunable thresholds for the anomaly strategies.
///
/// Every field defaults, so the `detection` section of a rule file may be
/// omitted entirely or only partially specified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionThresholds {
    /// Fewer matching history records than this skips the historical check.
    pub min_history_records: usize,
    /// Number of most recent history records averaged.
    pub history_window: usize,
    /// Relative change in net pay above which an anomaly is raised.
    pub historical_anomaly_ratio: Decimal,
    /// Relative change in net pay above which a review is raised.
    pub historical_review_ratio: Decimal,
    /// Salary above this multiple of the peer average is an anomaly.
    pub peer_anomaly_multiplier: Decimal,
    /// Salary above this multiple of the peer average needs review.
    pub peer_review_multiplier: Decimal,
    /// Bonus above this multiple of salary needs review.
    pub bonus_review_multiplier: Decimal,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            min_history_records: 3,
            history_window: 6,
            historical_anomaly_ratio: Decimal::new(5, 1),
            historical_review_ratio: Decimal::new(2, 1),
            peer_anomaly_multiplier: Decimal::from(3),
            peer_review_multiplier: Decimal::new(15, 1),
            bonus_review_multiplier: Decimal::from(2),
        }
    }
}

impl DetectionThresholds {
    fn validate(&self) -> EngineResult<()> {
        if self.min_history_records == 0 || self.history_window == 0 {
            return Err(invalid(
                "detection.min_history_records and detection.history_window must be at least 1",
            ));
        }
        if self.historical_review_ratio > self.historical_anomaly_ratio {
            return Err(invalid(
                "detection.historical_review_ratio must not exceed detection.historical_anomaly_ratio",
            ));
        }
        if self.peer_review_multiplier > self.peer_anomaly_multiplier {
            return Err(invalid(
                "detection.peer_review_multiplier must not exceed detection.peer_anomaly_multiplier",
            ));
        }
        for (name, value) in [
            ("historical_review_ratio", self.historical_review_ratio),
            ("peer_review_multiplier", self.peer_review_multiplier),
            ("bonus_review_multiplier", self.bonus_review_multiplier),
        ] {
            if value < Decimal::ZERO {
                return Err(invalid(&format!("detection.{} must not be negative", name)));
            }
        }
        Ok(())
    }
}

/// The immutable rule table threaded through every calculation.
///
/// # Example
///
/// ```
/// use payroll_engine::config::{ProfessionalTaxSlab, RuleTable, TaxSlab};
/// use rust_decimal::Decimal;
/// use std::collections::HashMap;
///
/// let rules = RuleTable {
///     social_security_percent: Decimal::new(12, 2),
///     income_tax_slabs: vec![TaxSlab { min: Decimal::ZERO, max: None, rate: Decimal::new(10, 2) }],
///     professional_tax: HashMap::from([(
///         "default".to_string(),
///         vec![ProfessionalTaxSlab { min: Decimal::ZERO, max: None, tax: Decimal::ZERO }],
///     )]),
///     detection: Default::default(),
/// };
/// assert!(rules.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    /// Flat social security rate on gross pay, between 0 and 1.
    pub social_security_percent: Decimal,
    /// Income tax slabs; the single slab containing gross pay applies.
    pub income_tax_slabs: Vec<TaxSlab>,
    /// Professional tax slabs keyed by location, with a required `default`.
    pub professional_tax: HashMap<String, Vec<ProfessionalTaxSlab>>,
    /// Anomaly strategy thresholds.
    #[serde(default)]
    pub detection: DetectionThresholds,
}

impl RuleTable {
    /// Selects the professional tax slabs for a location.
    ///
    /// Looks up the exact location first, then the `default` table. Absent
    /// locations go straight to `default`.
    pub fn professional_tax_slabs(
        &self,
        location: Option<&str>,
    ) -> EngineResult<&[ProfessionalTaxSlab]> {
        if let Some(slabs) = location.and_then(|loc| self.professional_tax.get(loc)) {
            return Ok(slabs);
        }

        self.professional_tax
            .get(DEFAULT_LOCATION)
            .map(Vec::as_slice)
            .ok_or_else(|| EngineError::MissingRuleSection {
                section: format!("professional_tax.{}", DEFAULT_LOCATION),
            })
    }

    /// Checks the table for internal consistency.
    ///
    /// Slabs must have non-negative bounds with `min <= max`, rates must lie
    /// in `[0, 1]`, flat taxes must be non-negative, and slabs in one table
    /// may touch at a shared boundary but must not otherwise overlap.
    pub fn validate(&self) -> EngineResult<()> {
        if self.social_security_percent < Decimal::ZERO
            || self.social_security_percent > Decimal::ONE
        {
            return Err(invalid(&format!(
                "social_security_percent must be between 0 and 1, got {}",
                self.social_security_percent
            )));
        }

        for slab in &self.income_tax_slabs {
            if slab.rate < Decimal::ZERO || slab.rate > Decimal::ONE {
                return Err(invalid(&format!(
                    "income_tax_slabs rate must be between 0 and 1, got {}",
                    slab.rate
                )));
            }
        }
        validate_slab_bounds("income_tax_slabs", &self.income_tax_slabs)?;

        if !self.professional_tax.contains_key(DEFAULT_LOCATION) {
            return Err(EngineError::MissingRuleSection {
                section: format!("professional_tax.{}", DEFAULT_LOCATION),
            });
        }

        let mut locations: Vec<&String> = self.professional_tax.keys().collect();
        locations.sort();
        for location in locations {
            let slabs = &self.professional_tax[location];
            let section = format!("professional_tax.{}", location);
            if let Some(slab) = slabs.iter().find(|s| s.tax < Decimal::ZERO) {
                return Err(invalid(&format!(
                    "{} tax must not be negative, got {}",
                    section, slab.tax
                )));
            }
            validate_slab_bounds(&section, slabs)?;
        }

        self.detection.validate()
    }

    /// Sorts every slab list ascending by lower bound.
    ///
    /// Slab selection takes the first match, so after sorting the lower
    /// slab wins when two slabs share a boundary value.
    pub fn sort_slabs(&mut self) {
        self.income_tax_slabs.sort_by(|a, b| a.min.cmp(&b.min));
        for slabs in self.professional_tax.values_mut() {
            slabs.sort_by(|a, b| a.min.cmp(&b.min));
        }
    }
}

fn validate_slab_bounds<S: Slab>(section: &str, slabs: &[S]) -> EngineResult<()> {
    for slab in slabs {
        if slab.min() < Decimal::ZERO {
            return Err(invalid(&format!(
                "{} slab min must not be negative, got {}",
                section,
                slab.min()
            )));
        }
        if let Some(max) = slab.max().filter(|max| *max < slab.min()) {
            return Err(invalid(&format!(
                "{} slab max {} is below min {}",
                section,
                max,
                slab.min()
            )));
        }
    }

    let mut ordered: Vec<&S> = slabs.iter().collect();
    ordered.sort_by_key(|s| s.min());
    for pair in ordered.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        let overlaps = match lower.max() {
            Some(max) => upper.min() < max,
            None => true,
        };
        if overlaps {
            return Err(invalid(&format!(
                "{} slabs starting at {} and {} overlap",
                section,
                lower.min(),
                upper.min()
            )));
        }
    }

    Ok(())
}

fn invalid(message: &str) -> EngineError {
    EngineError::InvalidRuleTable {
        message: message.to_string(),
    }
}

/// The rule file as written on disk.
///
/// Required sections are optional here so that a missing one is reported
/// by name instead of as a generic parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleTableDocument {
    /// Flat social security rate.
    pub social_security_percent: Option<Decimal>,
    /// Income tax slabs.
    pub income_tax_slabs: Option<Vec<TaxSlab>>,
    /// Professional tax slabs by location.
    pub professional_tax: Option<HashMap<String, Vec<ProfessionalTaxSlab>>>,
    /// Detection thresholds.
    #[serde(default)]
    pub detection: DetectionThresholds,
}

impl TryFrom<RuleTableDocument> for RuleTable {
    type Error = EngineError;

    fn try_from(doc: RuleTableDocument) -> EngineResult<Self> {
        let missing = |section: &str| EngineError::MissingRuleSection {
            section: section.to_string(),
        };

        let mut rules = RuleTable {
            social_security_percent: doc
                .social_security_percent
                .ok_or_else(|| missing("social_security_percent"))?,
            income_tax_slabs: doc
                .income_tax_slabs
                .ok_or_else(|| missing("income_tax_slabs"))?,
            professional_tax: doc
                .professional_tax
                .ok_or_else(|| missing("professional_tax"))?,
            detection: doc.detection,
        };

        rules.sort_slabs();
        rules.validate()?;
        Ok(rules)
    }
}
