// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role resolution.
//!
//! Role data arrives from the session layer in whatever shape the upstream
//! API happened to produce: a proper list, a stringified JSON list (often
//! with single quotes), a comma separated string, or a bare scalar. This
//! module turns all of those into one canonical [`RoleSet`].
//!
//! Resolution never fails. Malformed input degrades to a best-effort parse.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Canonical token for administrators.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Canonical token for baseline authenticated users.
pub const ROLE_USER: &str = "ROLE_USER";

/// Role data as received at the boundary, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRoles {
    /// No role data was supplied.
    Absent,
    /// An ordered sequence of values, already stringified.
    Sequence(Vec<String>),
    /// A single string that may hold a bracketed list or a comma list.
    Text(String),
    /// Any other scalar value, stringified.
    Scalar(String),
}

/// A single canonical role token (trimmed, uppercased, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleToken(String);

impl RoleToken {
    /// Normalizes a raw value into a token.
    ///
    /// Returns `None` when nothing remains after trimming.
    #[must_use]
    pub fn normalize(raw: &str) -> Option<Self> {
        let value: String = raw.trim().to_uppercase();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Roles that carry transition rights in the lifecycle tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Moderation and settlement authority.
    Admin,
    /// Baseline authenticated capability (posting ads, opening transactions).
    User,
}

impl Role {
    /// The canonical token that grants this role.
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::User => ROLE_USER,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::User => "User",
        }
    }
}

/// A canonical, order-independent set of role tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet(BTreeSet<RoleToken>);

impl RoleSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Builds a set from already-split raw entries.
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            entries
                .into_iter()
                .filter_map(|entry| RoleToken::normalize(entry.as_ref()))
                .collect(),
        )
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t.as_str() == token)
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.contains(role.token())
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    #[must_use]
    pub fn is_user(&self) -> bool {
        self.has_role(Role::User)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleToken> {
        self.0.iter()
    }

    /// Tokens in sorted order, as plain strings.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().map(|t| t.as_str().to_string()).collect()
    }
}

/// Resolves raw role data into a canonical role set.
#[must_use]
pub fn resolve(raw: &RawRoles) -> RoleSet {
    match raw {
        RawRoles::Absent => RoleSet::new(),
        RawRoles::Sequence(values) => RoleSet::from_entries(values),
        RawRoles::Text(text) => resolve_text(text),
        RawRoles::Scalar(value) => RoleSet::from_entries([value]),
    }
}

fn resolve_text(text: &str) -> RoleSet {
    let trimmed: &str = text.trim();
    if trimmed.is_empty() {
        return RoleSet::new();
    }

    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        if let Some(entries) = parse_repaired_list(trimmed) {
            return RoleSet::from_entries(entries);
        }
    }

    RoleSet::from_entries(split_loose(trimmed))
}

/// Attempts to read a bracketed list after repairing common damage:
/// single quotes and trailing commas.
fn parse_repaired_list(text: &str) -> Option<Vec<String>> {
    let repaired: String = text.replace('\'', "\"");
    let repaired: String = strip_trailing_comma(&repaired);

    let values: Vec<serde_json::Value> = serde_json::from_str(&repaired).ok()?;
    Some(role_entries(&values))
}

/// Flattens JSON role items into entries.
///
/// Nested arrays contribute their own items and `null` contributes nothing.
/// Other non-string items are kept in their JSON spelling.
#[must_use]
pub fn role_entries(values: &[serde_json::Value]) -> Vec<String> {
    let mut entries: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        match value {
            serde_json::Value::String(s) => entries.push(s.clone()),
            serde_json::Value::Array(items) => entries.extend(role_entries(items)),
            serde_json::Value::Null => {}
            other => entries.push(other.to_string()),
        }
    }
    entries
}

fn strip_trailing_comma(text: &str) -> String {
    let inner: &str = text.strip_prefix('[').unwrap_or(text);
    let inner: &str = inner.strip_suffix(']').unwrap_or(inner);
    let inner: &str = inner.trim_end().trim_end_matches(',');
    format!("[{inner}]")
}

fn split_loose(text: &str) -> Vec<String> {
    text.split(',')
        .map(|piece| {
            piece
                .chars()
                .filter(|c| !matches!(c, '[' | ']' | '"' | '\''))
                .collect::<String>()
        })
        .collect()
}
