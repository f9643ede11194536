//! Turns user supplied identifiers into the canonical values the API expects.
//!
//! Two shapes of reference listing exist: id → display name maps (bridges,
//! stablecoins, pools) and plain sets of lowercase slugs (chains, protocols and
//! the per-category overview sets). Resolution against an empty listing always fails.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use tracing::warn;

use crate::cache::Category;
use crate::error::{LlamaError, Result};
use crate::utils::is_numeric;

/// Canonical id → display name, in upstream order.
pub type NamedListing<K> = IndexMap<K, String>;

/// What a caller passed: a numeric id, or text that may still be a numeric id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Numeric(u64),
    Text(String),
}

impl Identifier {
    pub fn as_numeric(&self) -> Option<u64> {
        match self {
            Identifier::Numeric(n) => Some(*n),
            Identifier::Text(t) if is_numeric(t.trim()) => t.trim().parse().ok(),
            Identifier::Text(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_numeric().is_some()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::Text(t) => f.write_str(t),
        }
    }
}

impl From<u64> for Identifier {
    fn from(n: u64) -> Self {
        Identifier::Numeric(n)
    }
}

impl From<u32> for Identifier {
    fn from(n: u32) -> Self {
        Identifier::Numeric(u64::from(n))
    }
}

impl From<i32> for Identifier {
    fn from(n: i32) -> Self {
        u64::try_from(n)
            .map(Identifier::Numeric)
            .unwrap_or_else(|_| Identifier::Text(n.to_string()))
    }
}

impl From<i64> for Identifier {
    fn from(n: i64) -> Self {
        u64::try_from(n)
            .map(Identifier::Numeric)
            .unwrap_or_else(|_| Identifier::Text(n.to_string()))
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::Text(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Identifier::Text(s)
    }
}

impl From<&String> for Identifier {
    fn from(s: &String) -> Self {
        Identifier::Text(s.clone())
    }
}

/// Key type of a [`NamedListing`]: how a raw identifier maps onto a candidate key.
pub trait ListingKey: Clone + Eq + Hash + fmt::Debug {
    fn from_identifier(raw: &Identifier) -> Option<Self>;
}

impl ListingKey for u64 {
    fn from_identifier(raw: &Identifier) -> Option<Self> {
        raw.as_numeric()
    }
}

impl ListingKey for String {
    fn from_identifier(raw: &Identifier) -> Option<Self> {
        match raw {
            Identifier::Numeric(n) => Some(n.to_string()),
            Identifier::Text(t) => Some(t.trim().to_string()),
        }
    }
}

/// Resolve against an id → name listing.
///
/// A key match wins. Numeric input that is not a key fails without a name search.
/// Otherwise the display names are searched ignoring case, and the first match
/// in listing order is returned.
pub fn resolve_named<K: ListingKey>(raw: &Identifier, listing: &NamedListing<K>, category: Category) -> Result<K> {
    if let Some(key) = K::from_identifier(raw) {
        if listing.contains_key(&key) {
            return Ok(key);
        }
    }
    if !raw.is_numeric() {
        let name = raw.to_string();
        let name = name.trim();
        let lowered = name.to_lowercase();
        let found = listing
            .iter()
            .find(|(_, v)| v.as_str() == name || v.to_lowercase() == lowered);
        if let Some((key, _)) = found {
            return Ok(key.clone());
        }
    }
    Err(unresolved(category, raw, listing))
}

/// Membership check against a slug set, ignoring case. Returns the listing's own entry.
pub fn resolve_member(raw: &str, listing: &[String], category: Category) -> Result<String> {
    let needle = raw.trim().to_lowercase();
    listing
        .iter()
        .find(|entry| entry.to_lowercase() == needle)
        .cloned()
        .ok_or_else(|| unresolved(category, &raw, &listing))
}

/// Outcome of resolving an optional filter: unresolvable input is logged and
/// dropped, every other error still propagates.
pub fn best_effort<T>(outcome: Result<T>, category: Category, raw: &dyn fmt::Display) -> Result<Option<T>> {
    match outcome {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_resolution() => {
            warn!(category = category.label(), input = %raw, "{} not found, ignoring filter", category.label());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn unresolved(category: Category, raw: &dyn fmt::Display, available: &dyn fmt::Debug) -> LlamaError {
    LlamaError::Resolution {
        category: category.label(),
        input: raw.to_string(),
        available: format!("{:?}", available),
    }
}
