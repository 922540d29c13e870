use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{KrediError, KrediResult, Money, Percent};

/// Highest monthly rate an administrator may configure (10% per month).
pub const MAX_MONTHLY_RATE_PCT: Percent = dec!(10);

/// Longest term, in months, a configuration may offer.
pub const MAX_TERM_MONTHS: u32 = 120;

pub const DEFAULT_MONTHLY_RATE_PCT: Percent = dec!(1.3);
pub const DEFAULT_MIN_AMOUNT: Money = dec!(100_000);
pub const DEFAULT_MAX_AMOUNT: Money = dec!(100_000_000);
pub const DEFAULT_TERMS: [u32; 8] = [6, 12, 18, 24, 36, 48, 60, 72];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Policy the official simulator applies: the rate it charges, the amounts
/// it lends and the terms it offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub monthly_rate_pct: Percent,
    pub min_amount: Money,
    pub max_amount: Money,
    pub available_terms: Vec<u32>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Partial update. Absent fields keep their current value; activation is
/// not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rate_pct: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_terms: Option<Vec<u32>>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig::new(
            DEFAULT_MONTHLY_RATE_PCT,
            DEFAULT_MIN_AMOUNT,
            DEFAULT_MAX_AMOUNT,
            DEFAULT_TERMS.to_vec(),
        )
    }
}

impl SimulatorConfig {
    /// Build an inactive, unsaved configuration. Terms are sorted and
    /// de-duplicated; call [`SimulatorConfig::validate`] before use.
    pub fn new(
        monthly_rate_pct: Percent,
        min_amount: Money,
        max_amount: Money,
        available_terms: Vec<u32>,
    ) -> Self {
        SimulatorConfig {
            id: None,
            monthly_rate_pct,
            min_amount,
            max_amount,
            available_terms: normalize_terms(available_terms),
            is_active: false,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> KrediResult<()> {
        if self.monthly_rate_pct <= Decimal::ZERO || self.monthly_rate_pct > MAX_MONTHLY_RATE_PCT {
            return Err(KrediError::InvalidConfig {
                field: "monthly_rate_pct".into(),
                reason: format!("Monthly rate must be above 0% and at most {MAX_MONTHLY_RATE_PCT}%."),
            });
        }
        if self.min_amount <= Decimal::ZERO {
            return Err(KrediError::InvalidConfig {
                field: "min_amount".into(),
                reason: "Minimum amount must be positive.".into(),
            });
        }
        if self.max_amount <= Decimal::ZERO {
            return Err(KrediError::InvalidConfig {
                field: "max_amount".into(),
                reason: "Maximum amount must be positive.".into(),
            });
        }
        if self.min_amount >= self.max_amount {
            return Err(KrediError::InvalidConfig {
                field: "max_amount".into(),
                reason: "Maximum amount must be greater than the minimum amount.".into(),
            });
        }
        if self.available_terms.is_empty() {
            return Err(KrediError::InvalidConfig {
                field: "available_terms".into(),
                reason: "At least one term must be offered.".into(),
            });
        }
        if let Some(bad) = self
            .available_terms
            .iter()
            .find(|t| **t == 0 || **t > MAX_TERM_MONTHS)
        {
            return Err(KrediError::InvalidConfig {
                field: "available_terms".into(),
                reason: format!("Term {bad} is outside 1..={MAX_TERM_MONTHS} months."),
            });
        }
        Ok(())
    }

    /// Merge `patch` into a copy of this config and validate the result.
    /// Identity, activation and creation time are preserved.
    pub fn apply_patch(&self, patch: &ConfigPatch) -> KrediResult<SimulatorConfig> {
        let updated = SimulatorConfig {
            id: self.id,
            monthly_rate_pct: patch.monthly_rate_pct.unwrap_or(self.monthly_rate_pct),
            min_amount: patch.min_amount.unwrap_or(self.min_amount),
            max_amount: patch.max_amount.unwrap_or(self.max_amount),
            available_terms: match &patch.available_terms {
                Some(terms) => normalize_terms(terms.clone()),
                None => self.available_terms.clone(),
            },
            is_active: self.is_active,
            created_at: self.created_at,
        };

        if updated.max_amount <= updated.min_amount {
            return Err(KrediError::InvalidConfig {
                field: "max_amount".into(),
                reason: "Maximum amount must be greater than the minimum amount.".into(),
            });
        }
        updated.validate()?;
        Ok(updated)
    }

    /// Whether `amount` lies within the inclusive lending range.
    pub fn allows_amount(&self, amount: Money) -> bool {
        amount >= self.min_amount && amount <= self.max_amount
    }

    pub fn allows_term(&self, term_months: u32) -> bool {
        self.available_terms.contains(&term_months)
    }
}

fn normalize_terms(mut terms: Vec<u32>) -> Vec<u32> {
    terms.sort_unstable();
    terms.dedup();
    terms
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
