//! Scope catalog tests

use super::*;

#[test]
fn test_delete_repo_is_high_risk_and_destructive() {
    let info = lookup("delete_repo").expect("delete_repo must be cataloged");
    assert_eq!(info.risk, RiskTier::High);
    assert!(is_destructive("delete_repo"));
    assert!(is_destructive("delete:packages"));
}

#[test]
fn test_repo_is_high_risk_but_not_destructive() {
    let info = lookup("repo").expect("repo must be cataloged");
    assert_eq!(info.risk, RiskTier::High);
    assert!(!is_destructive("repo"));
}

#[test]
fn test_unknown_scope_is_absent() {
    assert!(lookup("totally_new_scope").is_none());
}

#[test]
fn test_catalog_is_complete() {
    assert_eq!(catalog().len(), 31);
}

#[test]
fn test_every_entry_has_capabilities() {
    for (name, info) in catalog() {
        assert!(
            !info.capabilities.is_empty(),
            "scope {} has no capabilities",
            name
        );
        assert!(!info.description.is_empty());
    }
}

#[test]
fn test_tier_partition_is_exhaustive() {
    let high = scopes_by_tier(RiskTier::High).len();
    let medium = scopes_by_tier(RiskTier::Medium).len();
    let low = scopes_by_tier(RiskTier::Low).len();

    assert_eq!(high, 6);
    assert_eq!(medium, 11);
    assert_eq!(low, 14);
    assert_eq!(high + medium + low, catalog().len());
}

#[test]
fn test_risk_tier_display() {
    assert_eq!(RiskTier::High.to_string(), "HIGH");
    assert_eq!(RiskTier::Medium.to_string(), "MEDIUM");
    assert_eq!(RiskTier::Low.to_string(), "LOW");
}
