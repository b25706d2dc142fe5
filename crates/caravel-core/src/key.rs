//! # Ledger Identity Newtypes
//!
//! Newtype wrappers for the two string-shaped identifiers flowing
//! through the ledger: [`AssetKey`] (the globally unique ledger key of
//! a stored document) and [`DocType`] (the discriminator naming which
//! variant a document represents).
//!
//! Keeping these distinct at the type level prevents a key from being
//! passed where a doc type is expected, and vice versa.

use serde::{Deserialize, Serialize};

/// The globally unique ledger key of a stored asset.
///
/// Keys are either caller-supplied (seed data uses fixed keys like
/// `CAR1562965001`) or derived from a schema name and the transaction
/// timestamp via [`AssetKey::derive`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetKey(String);

impl AssetKey {
    /// Wrap an existing key string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Derive a key for a freshly created asset.
    ///
    /// The key is the upper-cased schema name followed by the enclosing
    /// transaction's timestamp in whole seconds, e.g. a `bike` schema at
    /// epoch second 1700000000 yields `BIKE1700000000`. Two creates for
    /// the same schema in the same second derive the same key; collision
    /// policy is decided by the contract, not here.
    pub fn derive(schema_name: &str, tx_epoch_secs: i64) -> Self {
        Self(format!("{}{}", schema_name.to_uppercase(), tx_epoch_secs))
    }

    /// Access the raw key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssetKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for AssetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The discriminator naming which variant a stored document represents.
///
/// Comparison is case-insensitive: callers pass `CAR` while stored
/// documents carry `car`. The literal `asset` (any case) and the empty
/// string are wildcards that match every stored type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocType(String);

impl DocType {
    /// Wrap a doc-type string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The wildcard doc type that matches any stored document.
    pub fn any() -> Self {
        Self("asset".to_string())
    }

    /// The car variant discriminator.
    pub fn car() -> Self {
        Self("car".to_string())
    }

    /// The owner variant discriminator.
    pub fn owner() -> Self {
        Self("owner".to_string())
    }

    /// Whether this doc type matches every stored document.
    pub fn is_wildcard(&self) -> bool {
        self.0.is_empty() || self.0.eq_ignore_ascii_case("asset")
    }

    /// Whether an expected doc type accepts a stored one.
    ///
    /// Wildcards accept everything; otherwise the match is
    /// case-insensitive equality.
    pub fn matches(&self, stored: &DocType) -> bool {
        self.is_wildcard() || self.0.eq_ignore_ascii_case(&stored.0)
    }

    /// Access the raw discriminator string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for DocType {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for DocType {}

impl From<&str> for DocType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
