//! # caravel-core — Foundational Types for the Caravel Asset Ledger
//!
//! This crate is the bedrock of the Caravel workspace. It defines the
//! type-system primitives shared by every other crate: ledger keys,
//! doc-type discriminators, the tagged asset model, and the error
//! taxonomy. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** [`AssetKey`] and
//!    [`DocType`] are newtypes with validated constructors. No bare
//!    strings for ledger identifiers.
//!
//! 2. **Tagged union over duck-typed documents.** [`Asset`] is an enum
//!    over the known variants (Car, Owner) plus a generic fallback,
//!    so exhaustive `match` replaces runtime field-presence checks
//!    wherever the variant is known.
//!
//! 3. **Single error enum.** [`LedgerError`] is the one error type
//!    crossing crate boundaries; every caller-surfaced failure mode
//!    has its own variant.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `caravel-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod asset;
pub mod error;
pub mod key;

pub use asset::{Asset, Car, GenericAsset, Owner, DOC_TYPE_FIELD};
pub use error::LedgerError;
pub use key::{AssetKey, DocType};
