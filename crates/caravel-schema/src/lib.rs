//! # caravel-schema — Declared-Schema Validation
//!
//! A schema in Caravel is transient: it travels with the transaction
//! that declares it, gates the write, and is never persisted. This
//! crate defines the schema model ([`Schema`], [`Property`],
//! [`PropertyType`]) and the pure validation check
//! ([`validate`]) that must run before any state mutation derived
//! from caller-supplied data.
//!
//! ## Trust Boundary
//!
//! Validation is the only structural gate between caller payloads and
//! the ledger. Payloads that fail are rejected with a structured
//! violation list naming every offending property, not just the first.

pub mod schema;
pub mod validate;

pub use schema::{Property, PropertyType, Schema};
pub use validate::{validate, SchemaError, ValidationViolations, Violation};
