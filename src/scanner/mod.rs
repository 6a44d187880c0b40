//! Token pattern detection
//!
//! Pure pattern matching over arbitrary text. No network access happens
//! here; candidates found by this module still have to be validated
//! against the API before anything is claimed about them.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;


/// The token families GitHub issues, classified by prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `ghp_` - classic personal access token
    Classic,
    /// `gho_` - OAuth app token
    Oauth,
    /// `ghu_` - user-to-server token (GitHub App)
    UserToServer,
    /// `ghs_` - server-to-server token (GitHub App installation)
    ServerToServer,
    /// `ghr_` - refresh token
    Refresh,
    /// `github_pat_` - fine-grained personal access token
    FineGrained,
}

impl TokenKind {
    /// Prefix that identifies this token family.
    pub fn prefix(&self) -> &'static str {
        match self {
            TokenKind::Classic => "ghp_",
            TokenKind::Oauth => "gho_",
            TokenKind::UserToServer => "ghu_",
            TokenKind::ServerToServer => "ghs_",
            TokenKind::Refresh => "ghr_",
            TokenKind::FineGrained => "github_pat_",
        }
    }

    /// Human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::Classic => "Classic PAT",
            TokenKind::Oauth => "OAuth token",
            TokenKind::UserToServer => "User-to-server token",
            TokenKind::ServerToServer => "Server-to-server token",
            TokenKind::Refresh => "Refresh token",
            TokenKind::FineGrained => "Fine-grained PAT",
        }
    }

    const ALL: [TokenKind; 6] = [
        TokenKind::Classic,
        TokenKind::Oauth,
        TokenKind::UserToServer,
        TokenKind::ServerToServer,
        TokenKind::Refresh,
        TokenKind::FineGrained,
    ];
}

lazy_static! {
    // One fixed-shape pattern per token family. Fixed alphabets and exact
    // lengths keep matching linear over attacker-controlled input.
    static ref TOKEN_PATTERNS: Vec<(TokenKind, Regex)> = vec![
        (TokenKind::Classic, Regex::new(r"ghp_[a-zA-Z0-9]{36}").unwrap()),
        (TokenKind::Oauth, Regex::new(r"gho_[a-zA-Z0-9]{36}").unwrap()),
        (TokenKind::UserToServer, Regex::new(r"ghu_[a-zA-Z0-9]{36}").unwrap()),
        (TokenKind::ServerToServer, Regex::new(r"ghs_[a-zA-Z0-9]{36}").unwrap()),
        (TokenKind::Refresh, Regex::new(r"ghr_[a-zA-Z0-9]{36}").unwrap()),
        (TokenKind::FineGrained, Regex::new(r"github_pat_[a-zA-Z0-9_]{82}").unwrap()),
    ];
}

/// Extract all distinct token candidates from arbitrary text.
///
/// Matches are case-sensitive and deduplicated; first-seen order is kept so
/// batch results line up with the input.
pub fn detect_tokens(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();

    for (_, pattern) in TOKEN_PATTERNS.iter() {
        for mat in pattern.find_iter(text) {
            if seen.insert(mat.as_str().to_string()) {
                tokens.push(mat.as_str().to_string());
            }
        }
    }

    tokens
}

/// Classify a token by its prefix, or None if it matches no known family.
pub fn classify(token: &str) -> Option<TokenKind> {
    TokenKind::ALL
        .iter()
        .copied()
        .find(|kind| token.starts_with(kind.prefix()))
}

/// Whether the token uses the fine-grained header dialect.
pub fn is_fine_grained(token: &str) -> bool {
    token.starts_with(TokenKind::FineGrained.prefix())
}

/// Redacted preview of a token: first 10 characters plus an ellipsis.
///
/// This is the only form of a token that ever appears in output.
pub fn redact(token: &str) -> String {
    let preview: String = token.chars().take(10).collect();
    format!("{}...", preview)
}
