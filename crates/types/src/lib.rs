//! Shared types for the agentfin workspace
//!
//! Everything here is plain data: the trust signals handed in by the
//! account-fetching layer, the tier buckets derived from them, and the
//! boundary validation errors raised before any derivation runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Upper bound of the trust score domain
pub const MAX_TRUST_SCORE: u8 = 100;

/// Errors raised when inputs violate the caller contract
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Trust score out of range: {0} (expected 0..=100)")]
    TrustScoreOutOfRange(u8),

    #[error("Invalid amount for {field}: {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    #[error("Unknown infrastructure type: {0}")]
    UnknownInfraType(String),
}

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Reject negative, NaN and infinite monetary amounts.
pub fn validate_amount(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::InvalidAmount { field, value })
    }
}

// Trust score

/// Trust score in the closed range 0..=100
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TrustScore(u8);

impl TrustScore {
    pub const ZERO: TrustScore = TrustScore(0);
    pub const MAX: TrustScore = TrustScore(MAX_TRUST_SCORE);

    /// Create a trust score, rejecting values above 100
    pub fn new(value: u8) -> Result<Self> {
        if value > MAX_TRUST_SCORE {
            return Err(ValidationError::TrustScoreOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Create a trust score in a const context, where a value above 100
    /// fails compilation
    pub const fn new_const(value: u8) -> Self {
        assert!(value <= MAX_TRUST_SCORE, "trust score above 100");
        Self(value)
    }

    /// Create a trust score, clamping values above 100
    pub const fn saturating(value: u8) -> Self {
        if value > MAX_TRUST_SCORE {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Add points, capped at 100
    pub const fn saturating_add(self, points: u8) -> Self {
        Self::saturating(self.0.saturating_add(points))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The score as a fraction of the maximum (0.0 to 1.0)
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / f64::from(MAX_TRUST_SCORE)
    }
}

impl TryFrom<u8> for TrustScore {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TrustScore> for u8 {
    fn from(score: TrustScore) -> Self {
        score.0
    }
}

impl fmt::Display for TrustScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Infrastructure

/// Attested infrastructure the agent runs on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfraType {
    #[default]
    Unknown,
    Cloud,
    #[serde(rename = "TEE")]
    Tee,
    #[serde(rename = "DePIN")]
    DePin,
}

impl InfraType {
    pub const ALL: [InfraType; 4] = [Self::Unknown, Self::Cloud, Self::Tee, Self::DePin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Cloud => "Cloud",
            Self::Tee => "TEE",
            Self::DePin => "DePIN",
        }
    }
}

impl fmt::Display for InfraType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InfraType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|infra| infra.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::UnknownInfraType(s.to_string()))
    }
}

// Signals

/// Identity metadata carried alongside the signals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIdentity {
    /// Owner wallet address
    pub wallet: String,
    /// Display name of the agent
    pub name: String,
}

/// Trust signals for a single agent, as fetched by the account layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustSignals {
    #[serde(flatten)]
    pub identity: AgentIdentity,
    pub trust_score: TrustScore,
    #[serde(default)]
    pub infra_type: InfraType,
    #[serde(default)]
    pub attestation_count: u32,
    #[serde(default)]
    pub has_economic_stake: bool,
    #[serde(default)]
    pub has_hardware_binding: bool,
    /// Overrides every other signal when set
    #[serde(default)]
    pub is_flagged: bool,
    /// Most recent attestation time, only used for age gating
    #[serde(with = "chrono::serde::ts_seconds", default)]
    pub last_verified: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds", default)]
    pub registered_at: DateTime<Utc>,
    /// Revocation nonce at the last signal refresh
    #[serde(default)]
    pub nonce: u64,
}

impl TrustSignals {
    /// Create an unverified signal set for the given wallet
    pub fn new(wallet: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identity: AgentIdentity {
                wallet: wallet.into(),
                name: name.into(),
            },
            trust_score: TrustScore::ZERO,
            infra_type: InfraType::Unknown,
            attestation_count: 0,
            has_economic_stake: false,
            has_hardware_binding: false,
            is_flagged: false,
            last_verified: DateTime::default(),
            registered_at: DateTime::default(),
            nonce: 0,
        }
    }

    pub fn with_trust_score(mut self, score: u8) -> Result<Self> {
        self.trust_score = TrustScore::new(score)?;
        Ok(self)
    }

    pub fn with_infra_type(mut self, infra_type: InfraType) -> Self {
        self.infra_type = infra_type;
        self
    }

    pub fn with_attestations(mut self, count: u32) -> Self {
        self.attestation_count = count;
        self
    }

    pub fn with_economic_stake(mut self, staked: bool) -> Self {
        self.has_economic_stake = staked;
        self
    }

    pub fn with_hardware_binding(mut self, bound: bool) -> Self {
        self.has_hardware_binding = bound;
        self
    }

    pub fn flagged(mut self, flagged: bool) -> Self {
        self.is_flagged = flagged;
        self
    }

    pub fn with_last_verified(mut self, at: DateTime<Utc>) -> Self {
        self.last_verified = at;
        self
    }

    /// Set the verification time from Unix seconds
    pub fn with_last_verified_unix(self, secs: i64) -> Result<Self> {
        let at = DateTime::from_timestamp(secs, 0).ok_or(ValidationError::InvalidTimestamp(secs))?;
        Ok(self.with_last_verified(at))
    }

    pub fn with_registered_at(mut self, at: DateTime<Utc>) -> Self {
        self.registered_at = at;
        self
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn wallet(&self) -> &str {
        &self.identity.wallet
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }
}

// Tiers

/// Financial tier, ordered from least to most trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Flagged agents; every financial capacity is withheld
    Blocked,
    /// No positive trust signal yet
    Unverified,
    Bronze,
    Silver,
    Gold,
    Diamond,
}

impl Tier {
    pub const ALL: [Tier; 6] = [
        Self::Blocked,
        Self::Unverified,
        Self::Bronze,
        Self::Silver,
        Self::Gold,
        Self::Diamond,
    ];
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked => write!(f, "Blocked"),
            Self::Unverified => write!(f, "Unverified"),
            Self::Bronze => write!(f, "Bronze"),
            Self::Silver => write!(f, "Silver"),
            Self::Gold => write!(f, "Gold"),
            Self::Diamond => write!(f, "Diamond"),
        }
    }
}

/// Settlement processing lane granted to a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettlementPriority {
    Rejected,
    Manual,
    Standard,
    FastTrack,
    Instant,
}

impl fmt::Display for SettlementPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected => write!(f, "rejected"),
            Self::Manual => write!(f, "manual"),
            Self::Standard => write!(f, "standard"),
            Self::FastTrack => write!(f, "fast-track"),
            Self::Instant => write!(f, "instant"),
        }
    }
}
