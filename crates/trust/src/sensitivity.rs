//! Parameter sensitivity across synthetic agents
//!
//! Shows how the same parameter table treats agents at different points of
//! the trust ladder, with the caller's own agent marked in the output.

use agentfin_types::{InfraType, TrustScore, TrustSignals};
use serde::{Deserialize, Serialize};

use crate::{FinancialProfile, ParameterTable};

/// A synthetic combination of trust signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: String,
    pub trust_score: TrustScore,
    pub infra_type: InfraType,
    pub attestation_count: u32,
    pub has_economic_stake: bool,
    pub has_hardware_binding: bool,
}

impl Scenario {
    /// Overlay this scenario on a baseline. Flagged status is always cleared.
    pub fn apply(&self, baseline: &TrustSignals) -> TrustSignals {
        TrustSignals {
            trust_score: self.trust_score,
            infra_type: self.infra_type,
            attestation_count: self.attestation_count,
            has_economic_stake: self.has_economic_stake,
            has_hardware_binding: self.has_hardware_binding,
            is_flagged: false,
            ..baseline.clone()
        }
    }

    fn matches(&self, signals: &TrustSignals) -> bool {
        self.trust_score == signals.trust_score && self.infra_type == signals.infra_type
    }
}

/// One row of a sensitivity table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityRow {
    pub scenario: String,
    pub profile: FinancialProfile,
    /// The scenario has the baseline's score and infrastructure
    pub is_current: bool,
}

/// name, score, infra, attestations, stake, hardware binding
type ScenarioRow = (&'static str, TrustScore, InfraType, u32, bool, bool);

const STANDARD_SCENARIOS: [ScenarioRow; 5] = [
    ("New Agent", TrustScore::ZERO, InfraType::Unknown, 0, false, false),
    ("Bronze (min)", TrustScore::new_const(10), InfraType::Cloud, 0, false, false),
    ("Silver (Cloud)", TrustScore::new_const(30), InfraType::Cloud, 1, false, false),
    ("Gold (TEE)", TrustScore::new_const(55), InfraType::Tee, 2, true, false),
    ("Diamond", TrustScore::new_const(90), InfraType::Tee, 5, true, true),
];

/// The five reference agents, from a fresh registration up to Diamond
pub fn standard_scenarios() -> Vec<Scenario> {
    STANDARD_SCENARIOS
        .iter()
        .map(
            |&(name, trust_score, infra_type, attestation_count, has_economic_stake, has_hardware_binding)| {
                Scenario {
                    name: name.to_string(),
                    trust_score,
                    infra_type,
                    attestation_count,
                    has_economic_stake,
                    has_hardware_binding,
                }
            },
        )
        .collect()
}

/// Derive a profile for every scenario against the standard table
pub fn sensitivity_table(baseline: &TrustSignals, scenarios: &[Scenario]) -> Vec<SensitivityRow> {
    sensitivity_table_with(ParameterTable::standard(), baseline, scenarios)
}

pub fn sensitivity_table_with(
    table: &ParameterTable,
    baseline: &TrustSignals,
    scenarios: &[Scenario],
) -> Vec<SensitivityRow> {
    scenarios
        .iter()
        .map(|scenario| SensitivityRow {
            scenario: scenario.name.clone(),
            profile: FinancialProfile::derive_with(table, &scenario.apply(baseline)),
            is_current: scenario.matches(baseline),
        })
        .collect()
}
