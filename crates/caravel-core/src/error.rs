//! # Error Types — Shared Taxonomy
//!
//! The single error enum crossing crate boundaries in the Caravel
//! workspace. All errors use `thiserror` for derive-based `Display`
//! and `Error` implementations.
//!
//! ## Design
//!
//! - Every caller-surfaced failure mode gets its own variant, so tests
//!   and gateway callers can match on the kind rather than parse
//!   message strings.
//! - Contract errors abort the enclosing ledger transaction with no
//!   partial commit; that guarantee belongs to the transaction
//!   boundary, not to this enum.
//! - Nothing here is retried. A commit conflict or network failure
//!   surfaces as [`LedgerError::Commit`] as-is.

use thiserror::Error;

/// Top-level error type for the Caravel workspace.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A payload violated its declared schema. Raised before any write.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced ledger key does not exist.
    #[error("asset {key} not found")]
    NotFound {
        /// The absent key.
        key: String,
    },

    /// A stored document's `docType` does not match the expected one.
    #[error("asset {key} has doc type {actual}, expected {expected}")]
    TypeMismatch {
        /// The key that was fetched.
        key: String,
        /// The doc type the caller asked for.
        expected: String,
        /// The doc type actually stored (`(none)` when absent).
        actual: String,
    },

    /// A transfer named an owner that does not hold the car.
    #[error("owner {owner} is not the owner of {car}")]
    OwnershipMismatch {
        /// The claimed current owner.
        owner: String,
        /// The car being transferred.
        car: String,
    },

    /// A derived creation key already exists (strict collision mode only).
    #[error("asset key {key} already exists")]
    DuplicateKey {
        /// The colliding key.
        key: String,
    },

    /// The calling identity is not present in the credential store.
    #[error("identity {name} not found in wallet; enroll or register it first")]
    IdentityNotFound {
        /// The missing identity name.
        name: String,
    },

    /// An invocation named an operation the contract does not expose.
    #[error("unknown contract operation: {0}")]
    UnknownOperation(String),

    /// An invocation carried the wrong arguments for its operation.
    #[error("invalid arguments for {operation}: {reason}")]
    InvalidArguments {
        /// The operation that was invoked.
        operation: String,
        /// What was wrong with the arguments.
        reason: String,
    },

    /// A block index beyond the channel height was requested.
    #[error("block {index} not found (channel height {height})")]
    BlockNotFound {
        /// The requested block index.
        index: u64,
        /// The channel height at the time of the request.
        height: u64,
    },

    /// Platform-level commit or network failure. Never retried here.
    #[error("ledger commit failed: {0}")]
    Commit(String),

    /// Document (de)serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO failure (wallet files, dev ledger file).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
