//! # caravel-gateway — Client-Side Transaction Gateway
//!
//! The off-ledger half of Caravel: resolves a caller identity from a
//! credential store, opens a session against a named channel, executes
//! submit/evaluate invocations by operation name, and inspects
//! committed blocks for the application writes they carry.
//!
//! ## Session Discipline
//!
//! Every execution path through [`gateway::TransactionGateway`]
//! releases its session before returning, success or failure. There
//! is no retry and no timeout at this layer; a failed call surfaces
//! immediately.
//!
//! ## Platform Boundary
//!
//! The actual ledger platform is consumed through three narrow traits:
//! [`network::LedgerNetwork`] / [`network::ContractSession`] for
//! invocation, [`block::ChannelReader`] for block reads, and
//! [`wallet::CertificateAuthority`] for enrollment. The in-process
//! implementations exist to exercise those seams, not to be a
//! platform.

pub mod block;
pub mod channel;
pub mod config;
pub mod gateway;
pub mod network;
pub mod wallet;

pub use block::{Block, BlockInspector, ChannelReader, ChannelInfo, WriteEntry};
pub use channel::MemoryChannel;
pub use config::GatewayConfig;
pub use gateway::{decode_payload, TransactionGateway};
pub use network::{ContractSession, InProcessNetwork, InvocationMode, LedgerNetwork};
pub use wallet::{
    CertificateAuthority, Credential, CredentialStore, DevCertificateAuthority, FsWallet,
};
