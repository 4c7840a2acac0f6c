//! Core pipeline for agentfin.
//!
//! Ties the trust, gate and hashing crates together into the flow an agent
//! runs before committing funds: derive a financial profile, pass a gate,
//! propose a trust-adjusted agreement, and simulate the escrow transfer.
//!
//! [`TrustEngine`] is the entry point. The free functions in each module
//! stay available for callers that do not want the facade.

use thiserror::Error;

pub mod agreement;
pub mod config;
pub mod engine;
pub mod safety;

pub use agentfin_trust::{
    derive, project_after_fulfillment, sensitivity_table, standard_scenarios, FinancialProfile,
    FulfillmentProjection,
};
pub use agentfin_types::{InfraType, SettlementPriority, Tier, TrustScore, TrustSignals};
pub use agentfin_verify::{precise_gate, simple_gate, GateCriteria, GateResult};
pub use agreement::{build_agreement, AgreementBuilder, SimulatedAgreement};
pub use config::{AgreementConfig, EngineConfig, SafetyConfig};
pub use engine::{Clock, EvaluationRequest, SystemClock, TrustEngine, TrustEvaluation};
pub use safety::{simulate, SafetyWarning, TransactionSafetyResult, TransferProposal};

/// Errors that can occur anywhere in the pipeline
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] agentfin_types::ValidationError),

    #[error(transparent)]
    Gate(#[from] agentfin_verify::VerifyError),

    #[error(transparent)]
    Trust(#[from] agentfin_trust::TrustError),

    #[error(transparent)]
    Crypto(#[from] agentfin_crypto::CryptoError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::ConfigError(err.to_string())
    }
}

/// Result type for the core pipeline
pub type Result<T> = std::result::Result<T, CoreError>;
