//! Transaction safety flows.

use agentfin_core::config::SafetyConfig;
use agentfin_core::safety::{AccountRole, TransactionSimulator};
use agentfin_core::{simulate, SafetyWarning, TransferProposal, TrustScore};

fn score(value: u8) -> TrustScore {
    TrustScore::new(value).unwrap()
}

#[test]
fn test_untrusted_small_transfer_passes() {
    let result = simulate("Sender111", "Vault222", 9.0, 100.0, score(0)).unwrap();
    assert_eq!(result.max_allowed_outflow, 10.0);
    assert!(result.passed);
}

#[test]
fn test_untrusted_large_transfer_fails() {
    let result = simulate("Sender111", "Vault222", 15.0, 100.0, score(0)).unwrap();
    assert_eq!(result.max_allowed_outflow, 10.0);
    assert!(!result.passed);
    assert_eq!(result.blocking_warnings().count(), 0);
}

#[test]
fn test_full_trust_bound() {
    let result = simulate("Sender111", "Vault222", 99.0, 1_000.0, score(100)).unwrap();
    assert_eq!(result.max_allowed_outflow, 100.0);
    assert!(result.passed);

    let result = simulate("Sender111", "Vault222", 100.0, 1_000.0, score(100)).unwrap();
    assert!(!result.passed);
}

#[test]
fn test_draining_balance_is_blocked() {
    let result = simulate("Sender111", "Vault222", 1.0, 1.0, score(60)).unwrap();
    assert!(!result.passed);
    assert!(result.post_balances[&AccountRole::Sender] < 0.0);
    assert!(result.warnings.iter().any(SafetyWarning::is_blocking));
}

#[test]
fn test_custom_reserve() {
    let simulator = TransactionSimulator::new(SafetyConfig {
        min_reserve: 5.0,
        ..SafetyConfig::default()
    });
    let proposal = TransferProposal::new("Sender111", "Vault222", 5.0, 9.0);
    let result = simulator.simulate(&proposal, score(60)).unwrap();
    assert!(!result.passed);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0]
        .to_string()
        .starts_with("Sender balance would drop below rent-exempt minimum"));
}

#[test]
fn test_result_serializes_warning_kind() {
    let result = simulate("Sender111", "Vault222", 1.0, 100.0, score(5)).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["warnings"][0]["kind"], "low_trust");
    assert_eq!(json["passed"], true);
    assert_eq!(json["deltaChecks"][1]["maxAllowed"], serde_json::Value::Null);
}
