//! Engine configuration.
//!
//! Every setting has a default matching the reference deployment, so an
//! empty JSON object is a complete configuration.

use std::path::Path;

use agentfin_types::TrustScore;
use serde::{Deserialize, Serialize};

use crate::{CoreError, Result};

/// Settings for the transaction safety simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Network fee charged to the sender, in native units
    pub tx_fee: f64,
    /// Sender balance that must remain after the transfer
    pub min_reserve: f64,
    /// Share of the sender's balance above which an escrow is flagged as risky
    pub high_risk_ratio: f64,
    /// Scores below this draw a low-trust warning
    pub low_trust_threshold: u8,
    /// Outflow allowed at trust score 0
    pub base_outflow: f64,
    /// Extra multiples of `base_outflow` allowed at trust score 100
    pub outflow_trust_multiplier: f64,
}

impl SafetyConfig {
    /// Largest outflow permitted for a trust score, interpolated linearly
    /// between `base_outflow` and `base_outflow * (1 + multiplier)`.
    pub fn max_allowed_outflow(&self, trust_score: TrustScore) -> f64 {
        self.base_outflow * (1.0 + trust_score.fraction() * self.outflow_trust_multiplier)
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("tx_fee", self.tx_fee),
            ("min_reserve", self.min_reserve),
            ("high_risk_ratio", self.high_risk_ratio),
            ("base_outflow", self.base_outflow),
            ("outflow_trust_multiplier", self.outflow_trust_multiplier),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::ConfigError(format!(
                    "safety.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            tx_fee: 0.000005,
            min_reserve: 0.001,
            high_risk_ratio: 0.9,
            low_trust_threshold: 20,
            base_outflow: 10.0,
            outflow_trust_multiplier: 9.0,
        }
    }
}

/// Settings for simulated agreements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgreementConfig {
    pub agreement_type: String,
    /// Service label written into the hashed terms
    pub service: String,
    /// Service level written into the hashed terms
    pub sla: String,
    /// Asset the escrow is denominated in
    pub escrow_asset: String,
    /// Days until an agreement expires
    pub ttl_days: i64,
    pub num_parties: u8,
}

impl AgreementConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=3_650).contains(&self.ttl_days) {
            return Err(CoreError::ConfigError(format!(
                "agreement.ttl_days must be between 1 and 3650, got {}",
                self.ttl_days
            )));
        }
        if self.num_parties < 2 {
            return Err(CoreError::ConfigError(
                "agreement.num_parties must be at least 2".into(),
            ));
        }
        Ok(())
    }
}

impl Default for AgreementConfig {
    fn default() -> Self {
        Self {
            agreement_type: "ServiceLevel".to_string(),
            service: "AI Agent Task Execution".to_string(),
            sla: "99.9% uptime, <2s response time".to_string(),
            escrow_asset: "SOL (native)".to_string(),
            ttl_days: 7,
            num_parties: 2,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub safety: SafetyConfig,
    pub agreement: AgreementConfig,
}

impl EngineConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        self.safety.validate()?;
        self.agreement.validate()
    }
}
