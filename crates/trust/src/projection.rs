//! Projected terms after an agreement is fulfilled
//!
//! A fulfilled agreement earns one more attestation and a fixed score bump.
//! The projection re-derives the profile from the updated signals so the
//! caller can show what the next agreement would cost.

use agentfin_types::{TrustScore, TrustSignals};
use serde::Serialize;

use crate::{FinancialProfile, ParameterTable};

/// Score points granted by a fulfillment attestation
pub const FULFILLMENT_SCORE_BONUS: u8 = 15;

/// Current terms next to the terms after fulfillment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentProjection {
    pub current_score: TrustScore,
    pub projected_score: TrustScore,
    pub current: FinancialProfile,
    pub projected: FinancialProfile,
}

impl FulfillmentProjection {
    /// Whether fulfillment moves the agent into a higher tier
    pub fn promotes(&self) -> bool {
        self.projected.tier > self.current.tier
    }
}

/// Signals as they would read after one fulfilled agreement. The score
/// saturates at 100.
pub fn fulfilled_signals(signals: &TrustSignals) -> TrustSignals {
    TrustSignals {
        trust_score: signals.trust_score.saturating_add(FULFILLMENT_SCORE_BONUS),
        attestation_count: signals.attestation_count.saturating_add(1),
        ..signals.clone()
    }
}

/// Project terms after fulfillment against the standard table
pub fn project_after_fulfillment(signals: &TrustSignals) -> FulfillmentProjection {
    project_after_fulfillment_with(ParameterTable::standard(), signals)
}

pub fn project_after_fulfillment_with(
    table: &ParameterTable,
    signals: &TrustSignals,
) -> FulfillmentProjection {
    let future = fulfilled_signals(signals);
    FulfillmentProjection {
        current_score: signals.trust_score,
        projected_score: future.trust_score,
        current: FinancialProfile::derive_with(table, signals),
        projected: FinancialProfile::derive_with(table, &future),
    }
}
