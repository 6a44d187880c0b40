//! The static scope catalog
//!
//! Built once at first use; read-only afterwards. Tiering follows the damage
//! a leaked token could do: high means account- or data-destroying reach,
//! medium means meaningful write access to security-relevant surfaces, low
//! means read access or narrowly scoped writes.

use super::{RiskTier, ScopeInfo};
use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    pub static ref SCOPE_CATALOG: HashMap<&'static str, ScopeInfo> = {
        let mut m = HashMap::new();

        // High risk
        m.insert("admin:org", ScopeInfo {
            risk: RiskTier::High,
            description: "Full administrative access to organizations",
            capabilities: &[
                "Create and delete organizations",
                "Manage organization settings",
                "Add/remove organization members",
                "Manage teams and permissions",
                "Access billing information",
            ],
        });
        m.insert("delete_repo", ScopeInfo {
            risk: RiskTier::High,
            description: "Ability to delete repositories",
            capabilities: &[
                "Delete repositories permanently",
                "Remove repository history",
                "Destroy repository data",
            ],
        });
        m.insert("delete:packages", ScopeInfo {
            risk: RiskTier::High,
            description: "Ability to delete GitHub packages",
            capabilities: &[
                "Delete packages permanently",
                "Remove package versions",
                "Destroy package artifacts",
            ],
        });
        m.insert("repo", ScopeInfo {
            risk: RiskTier::High,
            description: "Complete access to all repositories",
            capabilities: &[
                "Read/write access to all repositories",
                "Access to private repositories",
                "Modify repository settings",
                "Manage collaborators and permissions",
            ],
        });
        m.insert("site_admin", ScopeInfo {
            risk: RiskTier::High,
            description: "GitHub Enterprise site administration",
            capabilities: &[
                "Manage GitHub Enterprise settings",
                "Access all repositories and organizations",
                "Manage all users",
                "System-wide administrative access",
            ],
        });
        m.insert("workflow", ScopeInfo {
            risk: RiskTier::High,
            description: "Access to GitHub Actions workflows",
            capabilities: &[
                "Create and modify workflows",
                "Access workflow secrets",
                "Execute arbitrary code in CI/CD",
                "Access to deployment environments",
            ],
        });

        // Medium risk
        m.insert("admin:public_key", ScopeInfo {
            risk: RiskTier::Medium,
            description: "Manage SSH keys for users",
            capabilities: &[
                "Add SSH keys to user accounts",
                "Remove SSH keys",
                "List all public keys",
            ],
        });
        m.insert("admin:gpg_key", ScopeInfo {
            risk: RiskTier::Medium,
            description: "Full access to GPG keys",
            capabilities: &[
                "Add GPG keys to user accounts",
                "Remove GPG keys",
                "Manage commit signing keys",
            ],
        });
        m.insert("admin:repo_hook", ScopeInfo {
            risk: RiskTier::Medium,
            description: "Full access to repository webhooks",
            capabilities: &[
                "Create repository webhooks",
                "Modify webhook configurations",
                "Delete webhooks",
                "Access webhook payloads",
            ],
        });
        m.insert("admin:org_hook", ScopeInfo {
            risk: RiskTier::Medium,
            description: "Full access to organization webhooks",
            capabilities: &[
                "Create organization webhooks",
                "Modify organization webhook settings",
                "Delete organization webhooks",
            ],
        });
        m.insert("write:org", ScopeInfo {
            risk: RiskTier::Medium,
            description: "Write access to organization and teams",
            capabilities: &[
                "Modify organization settings",
                "Manage teams and memberships",
                "Add/remove organization members",
            ],
        });
        m.insert("write:public_key", ScopeInfo {
            risk: RiskTier::Medium,
            description: "Write access to public keys",
            capabilities: &["Add SSH keys", "Modify existing SSH keys"],
        });
        m.insert("write:gpg_key", ScopeInfo {
            risk: RiskTier::Medium,
            description: "Write access to GPG keys",
            capabilities: &["Add GPG keys", "Modify existing GPG keys"],
        });
        m.insert("write:repo_hook", ScopeInfo {
            risk: RiskTier::Medium,
            description: "Write access to repository hooks",
            capabilities: &[
                "Create repository webhooks",
                "Modify webhook configurations",
            ],
        });
        m.insert("write:packages", ScopeInfo {
            risk: RiskTier::Medium,
            description: "Write access to GitHub packages",
            capabilities: &[
                "Upload packages",
                "Modify package metadata",
                "Publish package versions",
            ],
        });
        m.insert("write:discussion", ScopeInfo {
            risk: RiskTier::Medium,
            description: "Write access to team discussions",
            capabilities: &[
                "Create team discussions",
                "Modify discussion content",
                "Manage discussion settings",
            ],
        });
        m.insert("security_events", ScopeInfo {
            risk: RiskTier::Medium,
            description: "Access to security events and alerts",
            capabilities: &[
                "View security alerts",
                "Access vulnerability data",
                "Manage security policies",
            ],
        });

        // Low risk
        m.insert("public_repo", ScopeInfo {
            risk: RiskTier::Low,
            description: "Access to public repositories only",
            capabilities: &[
                "Read public repositories",
                "Create issues and pull requests",
                "Comment on public repositories",
            ],
        });
        m.insert("user", ScopeInfo {
            risk: RiskTier::Low,
            description: "Access to user profile information",
            capabilities: &[
                "Read user profile data",
                "Access public user information",
            ],
        });
        m.insert("user:email", ScopeInfo {
            risk: RiskTier::Low,
            description: "Access to user email addresses",
            capabilities: &["Read user email addresses", "Access primary email"],
        });
        m.insert("gist", ScopeInfo {
            risk: RiskTier::Low,
            description: "Write access to gists",
            capabilities: &["Create and edit gists", "Delete own gists"],
        });
        m.insert("notifications", ScopeInfo {
            risk: RiskTier::Low,
            description: "Access to notifications",
            capabilities: &["Read notifications", "Mark notifications as read"],
        });
        m.insert("read:org", ScopeInfo {
            risk: RiskTier::Low,
            description: "Read access to organization and teams",
            capabilities: &[
                "View organization information",
                "Read team memberships",
            ],
        });
        m.insert("read:packages", ScopeInfo {
            risk: RiskTier::Low,
            description: "Read access to GitHub packages",
            capabilities: &["Download packages", "View package metadata"],
        });
        m.insert("read:public_key", ScopeInfo {
            risk: RiskTier::Low,
            description: "Read access to public keys",
            capabilities: &["List public SSH keys", "View key information"],
        });
        m.insert("read:gpg_key", ScopeInfo {
            risk: RiskTier::Low,
            description: "Read access to GPG keys",
            capabilities: &["List GPG keys", "View key information"],
        });
        m.insert("read:repo_hook", ScopeInfo {
            risk: RiskTier::Low,
            description: "Read access to repository hooks",
            capabilities: &[
                "List repository webhooks",
                "View webhook configurations",
            ],
        });
        m.insert("read:discussion", ScopeInfo {
            risk: RiskTier::Low,
            description: "Read access to team discussions",
            capabilities: &["View team discussions", "Read discussion content"],
        });
        m.insert("repo:status", ScopeInfo {
            risk: RiskTier::Low,
            description: "Access to commit status",
            capabilities: &["Create commit statuses", "Update build status"],
        });
        m.insert("repo_deployment", ScopeInfo {
            risk: RiskTier::Low,
            description: "Access to deployment statuses",
            capabilities: &["Create deployments", "Update deployment status"],
        });
        m.insert("user:follow", ScopeInfo {
            risk: RiskTier::Low,
            description: "Access to follow/unfollow users",
            capabilities: &["Follow users", "Unfollow users"],
        });

        m
    };
}
