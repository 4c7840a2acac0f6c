use agentfin_types::{TrustScore, TrustSignals};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::GateCriteria;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Outcome of a simple threshold gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDecision {
    pub passed: bool,
    pub reason: String,
}

/// Pass when the trust score meets the threshold.
///
/// Total over every threshold: one above 100 simply never passes.
pub fn simple_gate(trust_score: TrustScore, threshold: u8) -> GateDecision {
    let score = trust_score.value();
    let passed = score >= threshold;
    let op = if passed { ">=" } else { "<" };
    GateDecision {
        passed,
        reason: format!("trust_score {score} {op} threshold {threshold}"),
    }
}

/// The signal a check was made against, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    TrustScore,
    InfraType,
    AttestationCount,
    EconomicStake,
    HardwareBinding,
    VerificationAge,
}

impl Criterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TrustScore => "trust_score",
            Self::InfraType => "infra_type",
            Self::AttestationCount => "attestation_count",
            Self::EconomicStake => "economic_stake",
            Self::HardwareBinding => "hardware_binding",
            Self::VerificationAge => "verification_age",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single criterion check with its audit detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionCheck {
    pub criterion: Criterion,
    pub passed: bool,
    pub detail: String,
}

impl CriterionCheck {
    fn new(criterion: Criterion, passed: bool, detail: String) -> Self {
        Self {
            criterion,
            passed,
            detail,
        }
    }
}

/// Outcome of a multi-criteria gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateResult {
    pub passed: bool,
    pub checks: Vec<CriterionCheck>,
}

impl GateResult {
    /// Checks that did not pass
    pub fn failures(&self) -> impl Iterator<Item = &CriterionCheck> {
        self.checks.iter().filter(|check| !check.passed)
    }
}

fn comparison(passed: bool) -> &'static str {
    if passed {
        ">="
    } else {
        "<"
    }
}

/// Evaluate every criterion that is set.
///
/// Checks are produced in a fixed order: trust score, infrastructure,
/// attestations, stake, hardware binding, verification age. The gate passes
/// when every produced check passes, so an empty criteria set always passes.
pub fn precise_gate(
    signals: &TrustSignals,
    criteria: &GateCriteria,
    now: DateTime<Utc>,
) -> crate::Result<GateResult> {
    criteria.validate()?;
    let mut checks = Vec::new();

    if let Some(min) = criteria.min_trust_score {
        let score = signals.trust_score.value();
        let passed = score >= min;
        checks.push(CriterionCheck::new(
            Criterion::TrustScore,
            passed,
            format!("{score} {} {min}", comparison(passed)),
        ));
    }

    if let Some(accepted) = &criteria.required_infra {
        let passed = accepted.contains(&signals.infra_type);
        let listed = accepted
            .iter()
            .map(|infra| infra.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        checks.push(CriterionCheck::new(
            Criterion::InfraType,
            passed,
            format!(
                "{} {} [{listed}]",
                signals.infra_type,
                if passed { "∈" } else { "∉" }
            ),
        ));
    }

    if let Some(min) = criteria.min_attestations {
        let count = signals.attestation_count;
        let passed = count >= min;
        checks.push(CriterionCheck::new(
            Criterion::AttestationCount,
            passed,
            format!("{count} {} {min}", comparison(passed)),
        ));
    }

    if criteria.require_economic_stake {
        checks.push(CriterionCheck::new(
            Criterion::EconomicStake,
            signals.has_economic_stake,
            signals.has_economic_stake.to_string(),
        ));
    }

    if criteria.require_hardware_binding {
        checks.push(CriterionCheck::new(
            Criterion::HardwareBinding,
            signals.has_hardware_binding,
            signals.has_hardware_binding.to_string(),
        ));
    }

    if let Some(max_days) = criteria.max_age_days {
        let age_days = (now - signals.last_verified).num_seconds() as f64 / SECONDS_PER_DAY;
        let passed = age_days <= max_days;
        checks.push(CriterionCheck::new(
            Criterion::VerificationAge,
            passed,
            format!(
                "{age_days:.1} days {} {max_days}",
                if passed { "<=" } else { ">" }
            ),
        ));
    }

    let passed = checks.iter().all(|check| check.passed);
    debug!(
        wallet = signals.wallet(),
        passed,
        checks = checks.len(),
        "evaluated precise gate"
    );
    Ok(GateResult { passed, checks })
}
