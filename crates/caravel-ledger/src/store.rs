//! # Asset Store
//!
//! Thin semantic wrapper over [`LedgerState`]: typed fetches, full
//! overwrite puts, and linear property scans. This is the only module
//! that touches raw document bytes; everything above works with
//! [`Asset`] values.
//!
//! Scans are O(ledger size) on purpose. No secondary index is
//! maintained; the `docType` field is the only discriminator.

use serde_json::Value;

use caravel_core::{Asset, AssetKey, DocType, LedgerError};

use crate::state::LedgerState;

/// Semantic access to assets stored on a ledger transaction's state.
pub struct AssetStore<'a> {
    ledger: &'a mut dyn LedgerState,
}

impl<'a> AssetStore<'a> {
    /// Wrap a ledger transaction's state.
    pub fn new(ledger: &'a mut dyn LedgerState) -> Self {
        Self { ledger }
    }

    /// The enclosing transaction's timestamp in whole epoch seconds.
    pub fn tx_timestamp_secs(&self) -> i64 {
        self.ledger.tx_timestamp_secs()
    }

    /// Whether a document exists at `key`.
    pub fn exists(&self, key: &AssetKey) -> Result<bool, LedgerError> {
        Ok(self.ledger.get(key.as_str())?.is_some())
    }

    /// Fetch the asset at `key`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotFound`] if the key is absent.
    pub fn get(&self, key: &AssetKey) -> Result<Asset, LedgerError> {
        let bytes = self
            .ledger
            .get(key.as_str())?
            .ok_or_else(|| LedgerError::NotFound {
                key: key.to_string(),
            })?;
        let value: Value = serde_json::from_slice(&bytes)?;
        Ok(Asset::from_value(value)?)
    }

    /// Fetch the asset at `key` and check its stored doc type.
    ///
    /// A wildcard `expected` (empty or `asset`) accepts any stored
    /// document, including ones with no discriminator at all.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotFound`] if the key is absent;
    /// [`LedgerError::TypeMismatch`] if the stored `docType` does not
    /// match a non-wildcard `expected`.
    pub fn get_typed(&self, key: &AssetKey, expected: &DocType) -> Result<Asset, LedgerError> {
        let asset = self.get(key)?;
        if expected.is_wildcard() {
            return Ok(asset);
        }
        match asset.doc_type() {
            Some(stored) if expected.matches(&stored) => Ok(asset),
            stored => Err(LedgerError::TypeMismatch {
                key: key.to_string(),
                expected: expected.to_string(),
                actual: stored
                    .map(|dt| dt.to_string())
                    .unwrap_or_else(|| "(none)".to_string()),
            }),
        }
    }

    /// Write `asset` at `key`. Full overwrite, last-writer-wins.
    pub fn put(&mut self, key: &AssetKey, asset: &Asset) -> Result<(), LedgerError> {
        let value = asset.to_value()?;
        let bytes = serde_json::to_vec(&value)?;
        self.ledger.put(key.as_str(), bytes)
    }

    /// Delete the document at `key`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotFound`] if the key is absent.
    pub fn delete(&mut self, key: &AssetKey) -> Result<(), LedgerError> {
        if !self.exists(key)? {
            return Err(LedgerError::NotFound {
                key: key.to_string(),
            });
        }
        self.ledger.delete(key.as_str())
    }

    /// All assets whose stored doc type matches `doc_type`, in key
    /// order.
    ///
    /// Full range scan with client-side filtering, fully materialized
    /// before return. Documents that fail to parse are skipped with a
    /// warning rather than aborting the scan.
    pub fn scan_all(&self, doc_type: &DocType) -> Result<Vec<(AssetKey, Asset)>, LedgerError> {
        self.scan_where(|_, asset| match asset.doc_type() {
            Some(stored) => doc_type.matches(&stored),
            None => doc_type.is_wildcard(),
        })
    }

    /// All assets whose top-level field `name` equals `value`, in key
    /// order. Equality is on the raw stored value, type-sensitive:
    /// the string `"7"` never matches the number `7`.
    pub fn scan_by_property(
        &self,
        name: &str,
        value: &Value,
    ) -> Result<Vec<(AssetKey, Asset)>, LedgerError> {
        self.scan_where(|_, asset| asset.field(name).as_ref() == Some(value))
    }

    /// Range-scan the ledger, keeping entries the predicate accepts.
    fn scan_where(
        &self,
        keep: impl Fn(&str, &Asset) -> bool,
    ) -> Result<Vec<(AssetKey, Asset)>, LedgerError> {
        let mut matched = Vec::new();
        for (key, bytes) in self.ledger.range()? {
            let parsed = serde_json::from_slice::<Value>(&bytes).and_then(Asset::from_value);
            let asset = match parsed {
                Ok(asset) => asset,
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "skipping unparseable document during scan");
                    continue;
                }
            };
            if keep(&key, &asset) {
                matched.push((AssetKey::new(key), asset));
            }
        }
        Ok(matched)
    }
}
