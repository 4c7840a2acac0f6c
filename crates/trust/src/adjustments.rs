use agentfin_types::{InfraType, TrustSignals};
use serde::Serialize;

/// Bonus for trusted execution environments
pub const TEE_MULTIPLIER: f64 = 1.2;
/// Bonus for decentralized physical infrastructure
pub const DEPIN_MULTIPLIER: f64 = 1.1;
/// Bonus for agents with economic stake at risk
pub const STAKE_FACTOR: f64 = 1.15;
/// Escrow and collateral never drop below this percentage
pub const MIN_RISK_PERCENTAGE: u32 = 5;

/// Infrastructure attestation bonus
pub fn infra_multiplier(infra: InfraType) -> f64 {
    match infra {
        InfraType::Tee => TEE_MULTIPLIER,
        InfraType::DePin => DEPIN_MULTIPLIER,
        InfraType::Cloud | InfraType::Unknown => 1.0,
    }
}

/// The two multiplicative factors applied on top of a tier's base row.
///
/// Capacity granted to the agent scales up by both factors; risk borne by
/// the protocol scales down by the same product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustments {
    pub infra_multiplier: f64,
    pub stake_factor: f64,
}

impl Adjustments {
    pub fn from_signals(signals: &TrustSignals) -> Self {
        Self {
            infra_multiplier: infra_multiplier(signals.infra_type),
            stake_factor: if signals.has_economic_stake {
                STAKE_FACTOR
            } else {
                1.0
            },
        }
    }

    pub fn combined(&self) -> f64 {
        self.infra_multiplier * self.stake_factor
    }

    /// Scale a granted amount up, rounded to two decimals
    pub fn scale_capacity(&self, base: f64) -> f64 {
        (base * self.infra_multiplier * self.stake_factor * 100.0).round() / 100.0
    }

    /// Scale a risk figure down, rounded to the nearest integer
    pub fn scale_risk(&self, base: u32) -> u32 {
        (f64::from(base) / self.combined()).round() as u32
    }

    /// Like [`scale_risk`](Self::scale_risk), floored at the minimum percentage
    pub fn scale_risk_percentage(&self, base: u32) -> u32 {
        self.scale_risk(base).max(MIN_RISK_PERCENTAGE)
    }
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            infra_multiplier: 1.0,
            stake_factor: 1.0,
        }
    }
}
