//! # Ledger State Abstraction
//!
//! The narrow key-value interface the contract consumes, plus the
//! in-process [`MemoryLedger`] used by tests and the dev CLI.
//!
//! ## Transaction Boundary
//!
//! [`MemoryLedger::transact`] buffers every write in a
//! [`LedgerTransaction`] and applies the buffer only when the closure
//! returns `Ok`. A failed operation leaves the ledger byte-identical,
//! mirroring the no-partial-commit guarantee of the real platform.
//! The committed write-set is returned so a channel emulation can
//! record it in a block.
//!
//! ## Iterator Lifetime
//!
//! `range()` returns a fully materialized, sorted snapshot. No live
//! cursor ever escapes this module, so there is nothing for a caller
//! to leak.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use caravel_core::LedgerError;

/// The key-value ledger interface consumed by the asset store.
///
/// Implementations are a single transaction's view of state: reads see
/// the transaction's own writes, and the timestamp is the transaction
/// timestamp, identical across every call within one transaction.
pub trait LedgerState {
    /// Fetch the raw document bytes at `key`, if present.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Write `value` at `key`, full overwrite.
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Remove the document at `key`. Removing an absent key is a no-op
    /// at this layer; existence checks live in the store above.
    fn delete(&mut self, key: &str) -> Result<(), LedgerError>;

    /// A materialized, key-ordered snapshot of every (key, value) pair.
    fn range(&self) -> Result<Vec<(String, Vec<u8>)>, LedgerError>;

    /// The enclosing transaction's timestamp in whole epoch seconds.
    fn tx_timestamp_secs(&self) -> i64;
}

/// One entry of a committed transaction's write-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvWrite {
    /// The ledger key written or deleted.
    pub key: String,
    /// Whether this write is a deletion.
    pub is_delete: bool,
    /// The written bytes; `None` for deletions.
    pub value: Option<Vec<u8>>,
}

/// A single transaction's buffered view over a base ledger.
///
/// Reads consult the write buffer before the base state; writes and
/// deletes only touch the buffer. Nothing reaches the base until
/// [`MemoryLedger::transact`] applies the buffer on success.
pub struct LedgerTransaction<'a> {
    base: &'a BTreeMap<String, Vec<u8>>,
    writes: Vec<KvWrite>,
    timestamp_secs: i64,
}

impl<'a> LedgerTransaction<'a> {
    fn new(base: &'a BTreeMap<String, Vec<u8>>, timestamp_secs: i64) -> Self {
        Self {
            base,
            writes: Vec::new(),
            timestamp_secs,
        }
    }

    /// The buffered write-set with one entry per key.
    ///
    /// Later writes to the same key replace the earlier entry in
    /// place, so entries appear in first-write order with last-write
    /// values, matching how the platform folds a transaction's writes.
    fn write_set(&self) -> Vec<KvWrite> {
        let mut folded: Vec<KvWrite> = Vec::new();
        for write in &self.writes {
            match folded.iter_mut().find(|w| w.key == write.key) {
                Some(existing) => *existing = write.clone(),
                None => folded.push(write.clone()),
            }
        }
        folded
    }

    /// The buffer entry for `key`, if the transaction touched it.
    fn buffered(&self, key: &str) -> Option<&KvWrite> {
        self.writes.iter().rev().find(|w| w.key == key)
    }
}

impl LedgerState for LedgerTransaction<'_> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        if let Some(write) = self.buffered(key) {
            return Ok(if write.is_delete {
                None
            } else {
                write.value.clone()
            });
        }
        Ok(self.base.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.writes.push(KvWrite {
            key: key.to_string(),
            is_delete: false,
            value: Some(value),
        });
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), LedgerError> {
        self.writes.push(KvWrite {
            key: key.to_string(),
            is_delete: true,
            value: None,
        });
        Ok(())
    }

    fn range(&self) -> Result<Vec<(String, Vec<u8>)>, LedgerError> {
        let mut merged = self.base.clone();
        for write in &self.writes {
            if write.is_delete {
                merged.remove(&write.key);
            } else if let Some(value) = &write.value {
                merged.insert(write.key.clone(), value.clone());
            }
        }
        Ok(merged.into_iter().collect())
    }

    fn tx_timestamp_secs(&self) -> i64 {
        self.timestamp_secs
    }
}

/// In-process ledger state backed by an ordered map.
///
/// Serves two purposes: the unit-test substrate for the store and
/// contract, and the persistent state of the dev CLI's file-backed
/// sandbox. It is not a platform; consensus, endorsement, and
/// replication stay out of scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryLedger {
    state: BTreeMap<String, Vec<u8>>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// Whether the ledger holds no keys.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Run `f` as one transaction at the given timestamp.
    ///
    /// On `Ok`, the buffered writes are applied to the base state and
    /// returned as the transaction's folded write-set. On `Err`,
    /// nothing is applied.
    pub fn transact<T>(
        &mut self,
        timestamp_secs: i64,
        f: impl FnOnce(&mut LedgerTransaction<'_>) -> Result<T, LedgerError>,
    ) -> Result<(T, Vec<KvWrite>), LedgerError> {
        let mut tx = LedgerTransaction::new(&self.state, timestamp_secs);
        let result = f(&mut tx)?;
        let write_set = tx.write_set();
        let writes = tx.writes;
        for write in writes {
            if write.is_delete {
                self.state.remove(&write.key);
            } else if let Some(value) = write.value {
                self.state.insert(write.key, value);
            }
        }
        Ok((result, write_set))
    }

    /// Run `f` against a read-consistent snapshot, discarding any
    /// writes it buffers. Used for evaluate-mode invocations.
    pub fn view<T>(
        &self,
        timestamp_secs: i64,
        f: impl FnOnce(&mut LedgerTransaction<'_>) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let mut tx = LedgerTransaction::new(&self.state, timestamp_secs);
        f(&mut tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put_str(tx: &mut LedgerTransaction<'_>, key: &str, value: &str) {
        tx.put(key, value.as_bytes().to_vec()).unwrap();
    }

    #[test]
    fn test_transact_applies_writes_on_success() {
        let mut ledger = MemoryLedger::new();
        let (_, writes) = ledger
            .transact(1, |tx| {
                put_str(tx, "a", "1");
                put_str(tx, "b", "2");
                Ok(())
            })
            .unwrap();
        assert_eq!(writes.len(), 2);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_transact_discards_writes_on_failure() {
        let mut ledger = MemoryLedger::new();
        ledger
            .transact(1, |tx| {
                put_str(tx, "a", "1");
                Ok(())
            })
            .unwrap();

        let result: Result<((), Vec<KvWrite>), LedgerError> = ledger.transact(2, |tx| {
            put_str(tx, "a", "changed");
            put_str(tx, "b", "new");
            Err(LedgerError::Commit("simulated failure".to_string()))
        });
        assert!(result.is_err());

        // Nothing from the failed transaction landed.
        ledger
            .view(3, |tx| {
                assert_eq!(tx.get("a").unwrap(), Some(b"1".to_vec()));
                assert_eq!(tx.get("b").unwrap(), None);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_reads_see_own_writes() {
        let mut ledger = MemoryLedger::new();
        ledger
            .transact(1, |tx| {
                put_str(tx, "a", "1");
                assert_eq!(tx.get("a").unwrap(), Some(b"1".to_vec()));
                tx.delete("a").unwrap();
                assert_eq!(tx.get("a").unwrap(), None);
                Ok(())
            })
            .unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_write_set_folds_per_key() {
        let mut ledger = MemoryLedger::new();
        let (_, writes) = ledger
            .transact(1, |tx| {
                put_str(tx, "a", "first");
                put_str(tx, "b", "only");
                put_str(tx, "a", "last");
                Ok(())
            })
            .unwrap();
        // One entry per key, first-write order, last-write value.
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0].key, "a");
        assert_eq!(writes[0].value, Some(b"last".to_vec()));
        assert_eq!(writes[1].key, "b");
    }

    #[test]
    fn test_range_is_sorted_and_merged() {
        let mut ledger = MemoryLedger::new();
        ledger
            .transact(1, |tx| {
                put_str(tx, "b", "2");
                put_str(tx, "a", "1");
                Ok(())
            })
            .unwrap();
        ledger
            .view(2, |tx| {
                put_str(tx, "c", "3");
                tx.delete("a").unwrap();
                let range = tx.range().unwrap();
                let keys: Vec<&str> = range.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, vec!["b", "c"]);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_timestamp_is_stable_within_transaction() {
        let ledger = MemoryLedger::new();
        ledger
            .view(1700000000, |tx| {
                assert_eq!(tx.tx_timestamp_secs(), 1700000000);
                assert_eq!(tx.tx_timestamp_secs(), 1700000000);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_delete_then_put_restores_key() {
        let mut ledger = MemoryLedger::new();
        ledger
            .transact(1, |tx| {
                put_str(tx, "a", "1");
                Ok(())
            })
            .unwrap();
        let (_, writes) = ledger
            .transact(2, |tx| {
                tx.delete("a").unwrap();
                put_str(tx, "a", "2");
                Ok(())
            })
            .unwrap();
        assert_eq!(writes.len(), 1);
        assert!(!writes[0].is_delete);
        ledger
            .view(3, |tx| {
                assert_eq!(tx.get("a").unwrap(), Some(b"2".to_vec()));
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_ledger_serde_round_trip() {
        let mut ledger = MemoryLedger::new();
        ledger
            .transact(1, |tx| {
                put_str(tx, "a", "1");
                Ok(())
            })
            .unwrap();
        let json = serde_json::to_string(&ledger).unwrap();
        let restored: MemoryLedger = serde_json::from_str(&json).unwrap();
        restored
            .view(2, |tx| {
                assert_eq!(tx.get("a").unwrap(), Some(b"1".to_vec()));
                Ok(())
            })
            .unwrap();
    }
}
