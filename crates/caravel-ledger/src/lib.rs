//! # caravel-ledger — The On-Ledger Engine
//!
//! Everything that runs inside a ledger transaction: the key-value
//! state abstraction ([`state::LedgerState`]), the semantic store
//! wrapper ([`store::AssetStore`]), the business operations
//! ([`contract::AssetContract`]), and the named string-argument
//! invocation surface ([`dispatch::invoke`]).
//!
//! ## Transaction Model
//!
//! Each contract operation executes as one serialized ledger
//! transaction. Writes are buffered in a [`state::LedgerTransaction`]
//! and applied only if the operation succeeds; a failed operation
//! commits nothing. Optimistic concurrency across transactions is the
//! platform's job, not this crate's.

pub mod contract;
pub mod dispatch;
pub mod state;
pub mod store;

pub use contract::{AssetContract, AssetRecord, CollisionPolicy, TransferRecord};
pub use dispatch::invoke;
pub use state::{KvWrite, LedgerState, LedgerTransaction, MemoryLedger};
pub use store::AssetStore;
