use agentfin_trust::{
    classify_with_reason, project_after_fulfillment_with, FinancialProfile, FulfillmentProjection,
    ParameterTable, TierDecision,
};
use agentfin_types::{TrustScore, TrustSignals};
use agentfin_verify::{precise_gate, GateCriteria, GateResult};
use chrono::{DateTime, Utc};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::agreement::{AgreementBuilder, SimulatedAgreement};
use crate::config::EngineConfig;
use crate::safety::{TransactionSafetyResult, TransactionSimulator, TransferProposal};
use crate::Result;

/// Source of the current time
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Inputs for a full evaluation beyond the proposer's own signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    #[serde(default)]
    pub criteria: GateCriteria,
    pub base_escrow: f64,
    pub counterparty: String,
    pub vault: String,
    pub sender_pre_balance: f64,
}

/// Everything the pipeline produced for one agent
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustEvaluation {
    pub decision: TierDecision,
    pub profile: FinancialProfile,
    pub gate: GateResult,
    pub agreement: SimulatedAgreement,
    pub safety: TransactionSafetyResult,
}

impl TrustEvaluation {
    /// Whether the agent cleared both the gate and the transfer simulation
    pub fn approved(&self) -> bool {
        self.gate.passed && self.safety.passed
    }
}

/// Facade over the trust-to-finance pipeline
#[derive(Debug, Clone)]
pub struct TrustEngine<C: Clock = SystemClock> {
    config: EngineConfig,
    parameters: ParameterTable,
    simulator: TransactionSimulator,
    builder: AgreementBuilder,
    clock: C,
}

impl TrustEngine<SystemClock> {
    /// Engine on the standard parameter table and the system clock
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for TrustEngine<SystemClock> {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            simulator: TransactionSimulator::new(config.safety.clone()),
            builder: AgreementBuilder::new(config.agreement.clone()),
            parameters: ParameterTable::default(),
            config,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> TrustEngine<C> {
    pub fn with_clock(config: EngineConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            simulator: TransactionSimulator::new(config.safety.clone()),
            builder: AgreementBuilder::new(config.agreement.clone()),
            parameters: ParameterTable::default(),
            config,
            clock,
        })
    }

    /// Swap in a custom parameter table
    pub fn with_parameters(mut self, parameters: ParameterTable) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn parameters(&self) -> &ParameterTable {
        &self.parameters
    }

    /// Derive the agent's financial profile
    pub fn assess(&self, signals: &TrustSignals) -> FinancialProfile {
        FinancialProfile::derive_with(&self.parameters, signals)
    }

    /// Current terms next to the terms after one fulfilled agreement
    pub fn project_fulfillment(&self, signals: &TrustSignals) -> FulfillmentProjection {
        project_after_fulfillment_with(&self.parameters, signals)
    }

    /// Run a precise gate as of the engine clock
    pub fn gate(&self, signals: &TrustSignals, criteria: &GateCriteria) -> Result<GateResult> {
        Ok(precise_gate(signals, criteria, self.clock.now())?)
    }

    /// Derive the proposer's profile and build a trust-adjusted agreement
    pub fn propose_agreement<R: RngCore + CryptoRng>(
        &self,
        proposer: &TrustSignals,
        base_escrow: f64,
        counterparty: &str,
        rng: &mut R,
    ) -> Result<SimulatedAgreement> {
        let profile = self.assess(proposer);
        self.builder
            .build(proposer, &profile, base_escrow, counterparty, self.clock.now(), rng)
    }

    pub fn check_transfer(
        &self,
        proposal: &TransferProposal,
        trust_score: TrustScore,
    ) -> Result<TransactionSafetyResult> {
        self.simulator.simulate(proposal, trust_score)
    }

    /// Run the whole pipeline: classify, gate, build the agreement, then
    /// simulate depositing its adjusted escrow into the vault.
    ///
    /// A failed gate or safety check is reported in the result, not as an
    /// error. Errors are reserved for malformed input.
    pub fn evaluate<R: RngCore + CryptoRng>(
        &self,
        signals: &TrustSignals,
        request: &EvaluationRequest,
        rng: &mut R,
    ) -> Result<TrustEvaluation> {
        let now = self.clock.now();

        let decision = classify_with_reason(signals);
        let profile = self.assess(signals);
        info!(
            wallet = signals.wallet(),
            tier = %decision.tier,
            rule = decision.requirement,
            "assessed agent"
        );

        let gate = precise_gate(signals, &request.criteria, now)?;
        info!(
            wallet = signals.wallet(),
            passed = gate.passed,
            failures = gate.failures().count(),
            "gate evaluated"
        );

        let agreement = self.builder.build(
            signals,
            &profile,
            request.base_escrow,
            &request.counterparty,
            now,
            rng,
        )?;
        info!(
            agreement_id = %agreement.agreement_id,
            escrow = agreement.escrow_amount,
            reduction = agreement.trust_adjustment.escrow_reduction_percent,
            "agreement proposed"
        );

        let proposal = TransferProposal::new(
            signals.wallet(),
            request.vault.clone(),
            agreement.escrow_amount,
            request.sender_pre_balance,
        );
        let safety = self.simulator.simulate(&proposal, signals.trust_score)?;
        info!(
            wallet = signals.wallet(),
            passed = safety.passed,
            warnings = safety.warnings.len(),
            "transfer simulated"
        );

        Ok(TrustEvaluation {
            decision,
            profile,
            gate,
            agreement,
            safety,
        })
    }
}
