use std::path::PathBuf;

use scope_release::analyzer::ModuleAnalyzer;
use scope_release::conventional::RawCommit;
use scope_release::module_config::{ConfigSource, ModuleConfig, ResolvedModule};
use scope_release::rules::{Release, ReleaseRule, RuleSet};
use scope_release::warnings::AnalysisWarning;

fn resolved(source: ConfigSource, rules: RuleSet) -> ResolvedModule {
    ResolvedModule {
        dir: PathBuf::from("modules/azurerm_key_vault"),
        config: ModuleConfig {
            name: "azurerm_key_vault".to_string(),
            title: "Key Vault".to_string(),
            commit_scope: "key-vault".to_string(),
            tag_prefix: "KVv".to_string(),
        },
        source,
        rules,
    }
}

fn warnings_for(source: ConfigSource, rules: RuleSet, headers: &[&str]) -> Vec<AnalysisWarning> {
    let commits: Vec<RawCommit> = headers.iter().map(|h| RawCommit::new(*h, "")).collect();
    let report = ModuleAnalyzer::new(resolved(source, rules)).analyze(&commits);
    AnalysisWarning::for_report(&report)
}

// ============================================================================
// AnalysisWarning Display Tests
// ============================================================================

#[test]
fn test_no_relevant_commits_display() {
    let warning = AnalysisWarning::NoRelevantCommits {
        module: "azurerm_key_vault".to_string(),
        scope: "key-vault".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("No commits with scope 'key-vault'"),
        "Message should name the scope, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("azurerm_key_vault"),
        "Message should name the module, got: {}",
        display_msg
    );
}

#[test]
fn test_no_release_triggered_display() {
    let warning = AnalysisWarning::NoReleaseTriggered {
        module: "core".to_string(),
        relevant: 3,
    };
    assert_eq!(
        warning.to_string(),
        "3 relevant commit(s) for module 'core' but none triggers a release"
    );
}

#[test]
fn test_legacy_config_display() {
    let warning = AnalysisWarning::LegacyConfig {
        module: "core".to_string(),
    };
    assert!(warning.to_string().contains("inferred from legacy config"));
}

// ============================================================================
// Warning Collection Tests
// ============================================================================

#[test]
fn test_clean_release_has_no_warnings() {
    let warnings = warnings_for(
        ConfigSource::Descriptor,
        RuleSet::scoped_defaults("key-vault"),
        &["feat(key-vault): add rbac"],
    );
    assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
}

#[test]
fn test_no_relevant_commits_warning() {
    let warnings = warnings_for(
        ConfigSource::Descriptor,
        RuleSet::scoped_defaults("key-vault"),
        &["fix(virtual-network): subnet bug"],
    );
    assert_eq!(
        warnings,
        vec![AnalysisWarning::NoRelevantCommits {
            module: "azurerm_key_vault".to_string(),
            scope: "key-vault".to_string(),
        }]
    );
}

#[test]
fn test_unmatched_and_no_release_warnings() {
    let rules = RuleSet::new(vec![ReleaseRule::new(Release::Minor).commit_type("feat")]);
    let warnings = warnings_for(
        ConfigSource::Descriptor,
        rules,
        &["chore(key-vault): tidy", "test(key-vault): more"],
    );
    assert_eq!(
        warnings,
        vec![
            AnalysisWarning::UnmatchedCommits {
                module: "azurerm_key_vault".to_string(),
                count: 2,
            },
            AnalysisWarning::NoReleaseTriggered {
                module: "azurerm_key_vault".to_string(),
                relevant: 2,
            },
        ]
    );
}

#[test]
fn test_explicit_no_release_is_not_unmatched() {
    let warnings = warnings_for(
        ConfigSource::Descriptor,
        RuleSet::scoped_defaults("key-vault"),
        &["chore(key-vault): tidy"],
    );
    // the scoped defaults have no rule for chore, so it is unmatched
    assert!(warnings.contains(&AnalysisWarning::UnmatchedCommits {
        module: "azurerm_key_vault".to_string(),
        count: 1,
    }));

    let rules = RuleSet::new(vec![ReleaseRule::new(Release::NoRelease).commit_type("chore")]);
    let warnings = warnings_for(ConfigSource::Descriptor, rules, &["chore(key-vault): tidy"]);
    assert_eq!(
        warnings,
        vec![AnalysisWarning::NoReleaseTriggered {
            module: "azurerm_key_vault".to_string(),
            relevant: 1,
        }]
    );
}

#[test]
fn test_legacy_source_warning_comes_first() {
    let warnings = warnings_for(
        ConfigSource::Legacy,
        RuleSet::scoped_defaults("key-vault"),
        &["fix(key-vault): x"],
    );
    assert_eq!(
        warnings,
        vec![AnalysisWarning::LegacyConfig {
            module: "azurerm_key_vault".to_string(),
        }]
    );
}
