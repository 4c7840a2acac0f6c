//! Base financial parameters per tier
//!
//! The standard table is built once and shared. Adding a tier is a new row,
//! not a new branch.

use agentfin_types::{validate_amount, SettlementPriority, Tier};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;

use crate::TrustError;

/// Unadjusted financial terms for a tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierParameters {
    /// Flash loan capacity in native units
    pub flash_loan_limit: f64,
    /// Share of an agreement's value held in escrow (0-100)
    pub escrow_percentage: u32,
    /// Unsecured credit in native units
    pub credit_line: f64,
    /// Insurance premium in basis points (0-10000)
    pub insurance_premium_bps: u32,
    /// Largest agreement the agent may enter, in native units
    pub max_agreement_value: f64,
    /// Collateral as a share of exposure (0-100)
    pub required_collateral: u32,
    pub settlement_priority: SettlementPriority,
}

impl TierParameters {
    pub const fn new(
        flash_loan_limit: f64,
        escrow_percentage: u32,
        credit_line: f64,
        insurance_premium_bps: u32,
        max_agreement_value: f64,
        required_collateral: u32,
        settlement_priority: SettlementPriority,
    ) -> Self {
        Self {
            flash_loan_limit,
            escrow_percentage,
            credit_line,
            insurance_premium_bps,
            max_agreement_value,
            required_collateral,
            settlement_priority,
        }
    }

    /// Check ranges on every field
    pub fn validate(&self) -> crate::Result<()> {
        validate_amount("flash_loan_limit", self.flash_loan_limit)?;
        validate_amount("credit_line", self.credit_line)?;
        validate_amount("max_agreement_value", self.max_agreement_value)?;
        if self.escrow_percentage > 100 {
            return Err(TrustError::InvalidParameters(format!(
                "escrow percentage {} exceeds 100",
                self.escrow_percentage
            )));
        }
        if self.required_collateral > 100 {
            return Err(TrustError::InvalidParameters(format!(
                "required collateral {} exceeds 100",
                self.required_collateral
            )));
        }
        if self.insurance_premium_bps > 10_000 {
            return Err(TrustError::InvalidParameters(format!(
                "insurance premium {} bps exceeds 10000",
                self.insurance_premium_bps
            )));
        }
        Ok(())
    }
}

const UNVERIFIED: TierParameters =
    TierParameters::new(0.0, 100, 0.0, 5_000, 0.5, 100, SettlementPriority::Manual);

fn standard_rows() -> [(Tier, TierParameters); 6] {
    use SettlementPriority::*;
    [
        (Tier::Blocked, TierParameters::new(0.0, 100, 0.0, 10_000, 0.0, 100, Rejected)),
        (Tier::Unverified, UNVERIFIED),
        (Tier::Bronze, TierParameters::new(1.0, 80, 0.5, 2_500, 5.0, 80, Standard)),
        (Tier::Silver, TierParameters::new(10.0, 50, 5.0, 1_000, 50.0, 50, Standard)),
        (Tier::Gold, TierParameters::new(100.0, 25, 50.0, 500, 500.0, 25, FastTrack)),
        (Tier::Diamond, TierParameters::new(1_000.0, 10, 500.0, 100, 10_000.0, 10, Instant)),
    ]
}

/// Immutable tier to parameter mapping
#[derive(Debug, Clone)]
pub struct ParameterTable {
    rows: HashMap<Tier, TierParameters>,
    fallback: TierParameters,
}

impl ParameterTable {
    /// The shared standard table
    pub fn standard() -> &'static ParameterTable {
        static TABLE: OnceLock<ParameterTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            ParameterTable {
                rows: standard_rows().into_iter().collect(),
                fallback: UNVERIFIED,
            }
        })
    }

    /// Build a custom table. An `Unverified` row is required since it
    /// backs any tier the table leaves out.
    pub fn from_rows(rows: impl IntoIterator<Item = (Tier, TierParameters)>) -> crate::Result<Self> {
        let rows: HashMap<Tier, TierParameters> = rows.into_iter().collect();
        for params in rows.values() {
            params.validate()?;
        }
        let fallback = rows
            .get(&Tier::Unverified)
            .cloned()
            .ok_or_else(|| TrustError::MissingFallback("table has no Unverified row".into()))?;
        Ok(Self { rows, fallback })
    }

    /// Parameters for a tier, falling back to the `Unverified` row
    pub fn get(&self, tier: Tier) -> &TierParameters {
        match self.rows.get(&tier) {
            Some(params) => params,
            None => {
                warn!(%tier, "no parameters for tier, using Unverified row");
                &self.fallback
            }
        }
    }

    pub fn contains(&self, tier: Tier) -> bool {
        self.rows.contains_key(&tier)
    }
}

impl Default for ParameterTable {
    fn default() -> Self {
        Self::standard().clone()
    }
}
