//! Trust-to-finance derivation for agentfin
//!
//! This crate turns an agent's trust signals into financial terms:
//! - Tier classification over an ordered rule list
//! - The base parameter table, one row per tier
//! - Infrastructure and stake adjustments
//! - Trust-adjusted financial profiles
//! - Sensitivity tables over synthetic agents
//! - Projected terms after a fulfilled agreement
//!
//! Every function here is pure. Identical signals always produce identical
//! profiles.

mod adjustments;
mod error;
mod params;
mod profile;
mod projection;
mod sensitivity;
mod tier;

pub use adjustments::{
    infra_multiplier, Adjustments, DEPIN_MULTIPLIER, MIN_RISK_PERCENTAGE, STAKE_FACTOR,
    TEE_MULTIPLIER,
};
pub use error::TrustError;
pub use params::{ParameterTable, TierParameters};
pub use profile::{derive, FinancialProfile};
pub use projection::{
    fulfilled_signals, project_after_fulfillment, project_after_fulfillment_with,
    FulfillmentProjection, FULFILLMENT_SCORE_BONUS,
};
pub use sensitivity::{
    sensitivity_table, sensitivity_table_with, standard_scenarios, Scenario, SensitivityRow,
};
pub use tier::{classify, classify_with_reason, TierDecision};

/// Result type for trust operations
pub type Result<T> = std::result::Result<T, TrustError>;
