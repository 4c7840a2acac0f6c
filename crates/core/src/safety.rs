//! Transaction safety simulation.
//!
//! Simulates an escrow deposit from a sender into a vault and checks the
//! balance deltas against a bound scaled by trust score alone. The bound
//! does not consult the financial profile, so it stays valid even when a
//! profile is stale.

use std::collections::BTreeMap;
use std::fmt;

use agentfin_types::{validate_amount, TrustScore};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SafetyConfig;
use crate::Result;

/// Role an account plays in a simulated transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Sender,
    Vault,
}

/// A proposed escrow deposit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferProposal {
    pub sender: String,
    pub vault: String,
    pub escrow_amount: f64,
    pub sender_pre_balance: f64,
}

impl TransferProposal {
    pub fn new(
        sender: impl Into<String>,
        vault: impl Into<String>,
        escrow_amount: f64,
        sender_pre_balance: f64,
    ) -> Self {
        Self {
            sender: sender.into(),
            vault: vault.into(),
            escrow_amount,
            sender_pre_balance,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_amount("escrow_amount", self.escrow_amount)?;
        validate_amount("sender_pre_balance", self.sender_pre_balance)?;
        Ok(())
    }
}

/// Balance change of one account against its bound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaCheck {
    pub role: AccountRole,
    pub account: String,
    /// Signed balance change
    pub delta: f64,
    /// Largest permitted outflow, `None` when unbounded
    pub max_allowed: Option<f64>,
    pub within_bounds: bool,
}

/// Findings raised alongside the delta checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SafetyWarning {
    /// The sender would be left under the minimum reserve
    BelowReserve { post_balance: f64, minimum: f64 },
    /// The escrow takes most of the sender's balance
    HighBalanceUtilization {
        escrow_amount: f64,
        pre_balance: f64,
        ratio: f64,
    },
    /// The sender's trust score is low
    LowTrust { trust_score: TrustScore, threshold: u8 },
}

impl SafetyWarning {
    /// Only a reserve breach fails the simulation, the rest are advisory
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::BelowReserve { .. })
    }
}

impl fmt::Display for SafetyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowReserve {
                post_balance,
                minimum,
            } => write!(
                f,
                "Sender balance would drop below rent-exempt minimum ({post_balance} < {minimum})"
            ),
            Self::HighBalanceUtilization { ratio, .. } => write!(
                f,
                "Escrow exceeds {:.0}% of sender balance, high risk",
                ratio * 100.0
            ),
            Self::LowTrust { trust_score, .. } => write!(
                f,
                "Low trust score ({trust_score}), additional verification recommended"
            ),
        }
    }
}

/// Outcome of a simulated transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSafetyResult {
    pub pre_balances: BTreeMap<AccountRole, f64>,
    pub post_balances: BTreeMap<AccountRole, f64>,
    pub delta_checks: Vec<DeltaCheck>,
    pub max_allowed_outflow: f64,
    pub passed: bool,
    pub warnings: Vec<SafetyWarning>,
}

impl TransactionSafetyResult {
    pub fn blocking_warnings(&self) -> impl Iterator<Item = &SafetyWarning> {
        self.warnings.iter().filter(|warning| warning.is_blocking())
    }
}

/// Simulates escrow deposits under a safety configuration
#[derive(Debug, Clone, Default)]
pub struct TransactionSimulator {
    config: SafetyConfig,
}

impl TransactionSimulator {
    pub fn new(config: SafetyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SafetyConfig {
        &self.config
    }

    /// Simulate a transfer and check it against trust-scaled bounds
    pub fn simulate(
        &self,
        proposal: &TransferProposal,
        trust_score: TrustScore,
    ) -> Result<TransactionSafetyResult> {
        proposal.validate()?;
        let config = &self.config;
        let escrow = proposal.escrow_amount;
        let pre_balance = proposal.sender_pre_balance;

        let sender_post = pre_balance - escrow - config.tx_fee;
        let pre_balances = BTreeMap::from([(AccountRole::Sender, pre_balance), (AccountRole::Vault, 0.0)]);
        let post_balances = BTreeMap::from([(AccountRole::Sender, sender_post), (AccountRole::Vault, escrow)]);

        let max_allowed_outflow = config.max_allowed_outflow(trust_score);
        let outflow = escrow + config.tx_fee;
        let delta_checks = vec![
            DeltaCheck {
                role: AccountRole::Sender,
                account: proposal.sender.clone(),
                delta: -outflow,
                max_allowed: Some(max_allowed_outflow),
                within_bounds: outflow <= max_allowed_outflow,
            },
            // receiving funds is never restricted
            DeltaCheck {
                role: AccountRole::Vault,
                account: proposal.vault.clone(),
                delta: escrow,
                max_allowed: None,
                within_bounds: true,
            },
        ];

        let mut warnings = Vec::new();
        if sender_post < config.min_reserve {
            warnings.push(SafetyWarning::BelowReserve {
                post_balance: sender_post,
                minimum: config.min_reserve,
            });
        }
        if escrow > pre_balance * config.high_risk_ratio {
            warnings.push(SafetyWarning::HighBalanceUtilization {
                escrow_amount: escrow,
                pre_balance,
                ratio: config.high_risk_ratio,
            });
        }
        if trust_score.value() < config.low_trust_threshold {
            warnings.push(SafetyWarning::LowTrust {
                trust_score,
                threshold: config.low_trust_threshold,
            });
        }

        let passed = delta_checks.iter().all(|check| check.within_bounds)
            && !warnings.iter().any(SafetyWarning::is_blocking);

        if passed {
            debug!(
                sender = %proposal.sender,
                outflow,
                max_allowed_outflow,
                warnings = warnings.len(),
                "transfer within bounds"
            );
        } else {
            warn!(
                sender = %proposal.sender,
                outflow,
                max_allowed_outflow,
                sender_post,
                "transfer rejected by safety simulation"
            );
        }

        Ok(TransactionSafetyResult {
            pre_balances,
            post_balances,
            delta_checks,
            max_allowed_outflow,
            passed,
            warnings,
        })
    }
}

/// Simulate a transfer with the default safety configuration
pub fn simulate(
    sender: &str,
    vault: &str,
    escrow_amount: f64,
    sender_pre_balance: f64,
    trust_score: TrustScore,
) -> Result<TransactionSafetyResult> {
    let proposal = TransferProposal::new(sender, vault, escrow_amount, sender_pre_balance);
    TransactionSimulator::default().simulate(&proposal, trust_score)
}
