//! # caravel-cli — Caravel Command-Line Interface
//!
//! Operates a file-backed dev sandbox: a memory ledger and channel
//! persisted as JSON between invocations, a filesystem wallet, and an
//! in-process certificate authority. Handlers build the same gateway
//! stack a real client would and print results as pretty JSON.
//!
//! ## Subcommands
//!
//! - `invoke` — Submit or evaluate a contract operation
//! - `block` — Inspect committed blocks
//! - `identity` — Enroll and register wallet identities
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers delegate to `caravel-gateway` and `caravel-ledger`; no
//!   contract semantics live here.

use std::path::PathBuf;

use clap::Args;

use caravel_gateway::GatewayConfig;

pub mod block;
pub mod identity;
pub mod invoke;
pub mod sandbox;

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Path of the sandbox state file.
    #[arg(long, global = true, default_value = "caravel-sandbox.json")]
    pub sandbox: PathBuf,

    /// Directory of the credential wallet.
    #[arg(long, global = true, default_value = "wallet")]
    pub wallet: PathBuf,

    /// Channel to operate against.
    #[arg(long, global = true, default_value = "devchannel")]
    pub channel: String,

    /// Deployed contract name.
    #[arg(long, global = true, default_value = "caravel")]
    pub contract: String,

    /// Identity to invoke as.
    #[arg(long, global = true, default_value = "user0")]
    pub identity: String,
}

impl GlobalOpts {
    /// The gateway configuration these options describe.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            channel: self.channel.clone(),
            contract_name: self.contract.clone(),
            wallet_dir: self.wallet.clone(),
            identity: self.identity.clone(),
        }
    }
}
