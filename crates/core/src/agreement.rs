//! Trust-adjusted agreement builder.
//!
//! Builds the bilateral agreement record a proposer would submit, with the
//! escrow scaled by the proposer's financial profile and the terms pinned by
//! a SHA-256 content hash.

use agentfin_crypto::{agreement_id, content_uri, ContentHash};
use agentfin_trust::FinancialProfile;
use agentfin_types::{validate_amount, InfraType, TrustScore, TrustSignals};
use chrono::{DateTime, Duration, Utc};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::AgreementConfig;
use crate::{CoreError, Result};

/// The canonical terms record that gets hashed.
///
/// `serde_json` writes whole-number floats with a trailing `.0`, so the
/// digest does not match one taken over JavaScript's `JSON.stringify` of the
/// same terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementTerms {
    pub service: String,
    pub escrow_amount: f64,
    pub infra_requirement: InfraType,
    pub trust_threshold: TrustScore,
    pub sla: String,
}

impl AgreementTerms {
    pub fn content_hash(&self) -> Result<ContentHash> {
        Ok(ContentHash::of_json(self)?)
    }
}

/// How trust changed the escrow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustAdjustment {
    pub base_escrow: f64,
    pub adjusted_escrow: f64,
    /// Percentage points of escrow waived, `100 - escrow_percentage`
    pub escrow_reduction_percent: u32,
    pub reason: String,
}

/// A simulated agreement between a proposer and one counterparty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedAgreement {
    pub agreement_id: Uuid,
    pub agreement_type: String,
    pub proposer: String,
    pub counterparty: String,
    pub escrow_amount: f64,
    pub escrow_asset: String,
    pub terms: AgreementTerms,
    pub terms_hash: ContentHash,
    pub terms_uri: String,
    pub num_parties: u8,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub trust_adjustment: TrustAdjustment,
}

impl SimulatedAgreement {
    /// Expiry as Unix seconds
    pub fn expires_at_unix(&self) -> i64 {
        self.expires_at.timestamp()
    }

    /// Raw identifier bytes, as used to derive the on-chain agreement address
    pub fn id_bytes(&self) -> &[u8; 16] {
        self.agreement_id.as_bytes()
    }
}

/// Builds trust-adjusted agreements
#[derive(Debug, Clone, Default)]
pub struct AgreementBuilder {
    config: AgreementConfig,
}

impl AgreementBuilder {
    pub fn new(config: AgreementConfig) -> Self {
        Self { config }
    }

    fn expiry(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        Duration::try_days(self.config.ttl_days)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                CoreError::ConfigError(format!(
                    "agreement expiry out of range: {} days after {now}",
                    self.config.ttl_days
                ))
            })
    }

    /// Build an agreement for `proposer` against `counterparty`.
    ///
    /// Draws 16 bytes for the identifier and then 32 bytes for the content
    /// URI from `rng`. Nothing else is random.
    pub fn build<R: RngCore + CryptoRng>(
        &self,
        proposer: &TrustSignals,
        profile: &FinancialProfile,
        base_escrow: f64,
        counterparty: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<SimulatedAgreement> {
        validate_amount("base_escrow", base_escrow)?;
        let expires_at = self.expiry(now)?;

        let escrow_percentage = profile.escrow_percentage.min(100);
        let adjusted_escrow = base_escrow * (f64::from(escrow_percentage) / 100.0);
        let escrow_reduction_percent = 100 - escrow_percentage;

        let terms = AgreementTerms {
            service: self.config.service.clone(),
            escrow_amount: adjusted_escrow,
            infra_requirement: proposer.infra_type,
            trust_threshold: proposer.trust_score,
            sla: self.config.sla.clone(),
        };
        let terms_hash = terms.content_hash()?;

        let agreement_id = agreement_id(rng)?;
        let terms_uri = content_uri(rng)?;

        let reason = format!(
            "{} tier: {}% escrow required ({}% reduction from trust)",
            profile.tier, escrow_percentage, escrow_reduction_percent
        );

        debug!(
            %agreement_id,
            proposer = proposer.wallet(),
            counterparty,
            base_escrow,
            adjusted_escrow,
            "built trust-adjusted agreement"
        );

        Ok(SimulatedAgreement {
            agreement_id,
            agreement_type: self.config.agreement_type.clone(),
            proposer: proposer.wallet().to_string(),
            counterparty: counterparty.to_string(),
            escrow_amount: adjusted_escrow,
            escrow_asset: self.config.escrow_asset.clone(),
            terms,
            terms_hash,
            terms_uri,
            num_parties: self.config.num_parties,
            created_at: now,
            expires_at,
            trust_adjustment: TrustAdjustment {
                base_escrow,
                adjusted_escrow,
                escrow_reduction_percent,
                reason,
            },
        })
    }
}

/// Build an agreement with the default agreement configuration
pub fn build_agreement<R: RngCore + CryptoRng>(
    proposer: &TrustSignals,
    profile: &FinancialProfile,
    base_escrow: f64,
    counterparty: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<SimulatedAgreement> {
    AgreementBuilder::default().build(proposer, profile, base_escrow, counterparty, now, rng)
}
