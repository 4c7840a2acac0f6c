use agentfin_types::{SettlementPriority, Tier, TrustSignals};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{classify, Adjustments, ParameterTable};

/// Trust-adjusted financial terms for one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProfile {
    pub tier: Tier,
    /// Flash loan capacity in native units
    pub flash_loan_limit: f64,
    /// Escrow share of an agreement, 5-100
    pub escrow_percentage: u32,
    /// Unsecured credit in native units
    pub credit_line: f64,
    /// Insurance premium in basis points
    pub insurance_premium_rate: u32,
    /// Largest agreement value in native units
    pub max_agreement_value: f64,
    /// Collateral requirement, 5-100
    pub required_collateral: u32,
    pub settlement_priority: SettlementPriority,
}

impl FinancialProfile {
    /// Derive a profile against the standard parameter table
    pub fn derive(signals: &TrustSignals) -> Self {
        Self::derive_with(ParameterTable::standard(), signals)
    }

    /// Derive a profile against a custom parameter table
    pub fn derive_with(table: &ParameterTable, signals: &TrustSignals) -> Self {
        let tier = classify(signals);
        let base = table.get(tier);
        let adjustments = Adjustments::from_signals(signals);

        let profile = Self {
            tier,
            flash_loan_limit: adjustments.scale_capacity(base.flash_loan_limit),
            escrow_percentage: adjustments.scale_risk_percentage(base.escrow_percentage),
            credit_line: adjustments.scale_capacity(base.credit_line),
            insurance_premium_rate: adjustments.scale_risk(base.insurance_premium_bps),
            max_agreement_value: adjustments.scale_capacity(base.max_agreement_value),
            required_collateral: adjustments.scale_risk_percentage(base.required_collateral),
            settlement_priority: base.settlement_priority,
        };

        debug!(
            wallet = signals.wallet(),
            tier = %profile.tier,
            infra_multiplier = adjustments.infra_multiplier,
            stake_factor = adjustments.stake_factor,
            escrow_percentage = profile.escrow_percentage,
            "derived financial profile"
        );
        profile
    }

    /// Insurance premium as a percentage
    pub fn insurance_premium_percent(&self) -> f64 {
        f64::from(self.insurance_premium_rate) / 100.0
    }
}

/// Derive a profile against the standard parameter table
pub fn derive(signals: &TrustSignals) -> FinancialProfile {
    FinancialProfile::derive(signals)
}
