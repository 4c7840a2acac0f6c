//! Trust gates for agentfin
//!
//! This crate implements access-control checks over raw trust signals:
//! - Simple threshold gates on the trust score
//! - Multi-criteria gates with a per-criterion audit trail
//!
//! Gates never look at financial profiles. They only read the signals they
//! are handed and the time the caller supplies.

use agentfin_types::{InfraType, MAX_TRUST_SCORE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod gate;

pub use gate::{precise_gate, simple_gate, CriterionCheck, Criterion, GateDecision, GateResult};

/// Errors that can occur during gate evaluation
#[derive(Error, Debug, PartialEq)]
pub enum VerifyError {
    #[error("Invalid gate criteria: {0}")]
    InvalidCriteria(String),
}

/// Result type for gate operations
pub type Result<T> = std::result::Result<T, VerifyError>;

/// Thresholds for a multi-criteria gate. Anything left unset is not checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateCriteria {
    /// Minimum trust score (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_trust_score: Option<u8>,
    /// Accepted infrastructure types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_infra: Option<Vec<InfraType>>,
    /// Minimum number of active attestations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_attestations: Option<u32>,
    /// Require economic stake
    #[serde(default)]
    pub require_economic_stake: bool,
    /// Require hardware binding
    #[serde(default)]
    pub require_hardware_binding: bool,
    /// Maximum age of the last verification, in days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age_days: Option<f64>,
}

impl GateCriteria {
    /// Create an empty criteria set, which every agent passes
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum trust score
    pub fn with_min_trust_score(mut self, score: u8) -> Self {
        self.min_trust_score = Some(score);
        self
    }

    /// Set the accepted infrastructure types
    pub fn with_required_infra(mut self, infra: impl IntoIterator<Item = InfraType>) -> Self {
        let mut accepted: Vec<InfraType> = Vec::new();
        for kind in infra {
            if !accepted.contains(&kind) {
                accepted.push(kind);
            }
        }
        self.required_infra = Some(accepted);
        self
    }

    /// Set the minimum attestation count
    pub fn with_min_attestations(mut self, count: u32) -> Self {
        self.min_attestations = Some(count);
        self
    }

    /// Require economic stake
    pub fn requiring_economic_stake(mut self) -> Self {
        self.require_economic_stake = true;
        self
    }

    /// Require hardware binding
    pub fn requiring_hardware_binding(mut self) -> Self {
        self.require_hardware_binding = true;
        self
    }

    /// Set the maximum verification age
    pub fn with_max_age_days(mut self, days: f64) -> Self {
        self.max_age_days = Some(days);
        self
    }

    /// Whether no criterion is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Reject criteria no agent could meaningfully be checked against
    pub fn validate(&self) -> Result<()> {
        if let Some(score) = self.min_trust_score {
            if score > MAX_TRUST_SCORE {
                return Err(VerifyError::InvalidCriteria(format!(
                    "minimum trust score {score} exceeds {MAX_TRUST_SCORE}"
                )));
            }
        }
        if let Some(infra) = &self.required_infra {
            if infra.is_empty() {
                return Err(VerifyError::InvalidCriteria(
                    "required infrastructure set is empty".into(),
                ));
            }
        }
        if let Some(days) = self.max_age_days {
            if !days.is_finite() || days < 0.0 {
                return Err(VerifyError::InvalidCriteria(format!(
                    "maximum age must be a non-negative number of days, got {days}"
                )));
            }
        }
        Ok(())
    }
}
