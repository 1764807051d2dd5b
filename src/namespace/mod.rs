//! Tiered path resolver.
//!
//! Maps a `(tier, role, franchise)` triple to the URL namespace a user works
//! in. Global tiers live under `a/{role}`, franchise tiers under
//! `b/{franchise}/...`.

use serde::Serialize;
use std::fmt;

use crate::session::Tier;

/// Canonical path prefix, without leading or trailing slash
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Landing page inside the namespace, percent-encoded per segment so it
    /// can go straight into a `Location` header
    pub fn dashboard_path(&self, dashboard_segment: &str) -> String {
        let encoded = self
            .0
            .split('/')
            .chain(std::iter::once(dashboard_segment))
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!("/{}", encoded)
    }

    /// Whether the decoded `path` is this namespace or lies beneath it.
    ///
    /// Matches whole segments, so `/a/broker` does not contain `/a/brokerage`.
    pub fn contains_path(&self, path: &str) -> bool {
        path.strip_prefix('/')
            .and_then(|rest| rest.strip_prefix(self.0.as_str()))
            .is_some_and(|tail| tail.is_empty() || tail.starts_with('/'))
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve the namespace for a session triple.
///
/// Precedence:
/// 1. tier 3 with a franchise: `b/{franchise}/superadmin`
/// 2. tier 4 with a franchise and a role: `b/{franchise}/{role}`
/// 3. anything else: `a/{role}`
///
/// Franchise and role are lowercased but otherwise used as given; franchise
/// names are normalized once, when the session is written. A blank role
/// yields `a/`.
pub fn resolve(tier: Option<Tier>, role: &str, franchise: &str) -> Namespace {
    let role = role.trim().to_lowercase();
    let franchise = franchise.trim().to_lowercase();

    let path = match tier {
        Some(Tier::FranchiseSuperadmin) if !franchise.is_empty() => {
            format!("b/{}/superadmin", franchise)
        }
        Some(Tier::FranchiseRole) if !franchise.is_empty() && !role.is_empty() => {
            format!("b/{}/{}", franchise, role)
        }
        _ => format!("a/{}", role),
    };

    Namespace(path)
}

/// Turn a franchise display name into its URL form: trimmed, lowercased,
/// whitespace runs collapsed to `-`.
pub fn normalize_franchise_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
