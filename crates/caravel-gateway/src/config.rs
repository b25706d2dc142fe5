//! # Gateway Configuration
//!
//! Explicit configuration for the transaction gateway. Everything that
//! used to be a hard-coded constant in ad-hoc client scripts (channel
//! name, contract name, wallet location, calling identity) lives here
//! and is passed in, so two gateways with different targets can
//! coexist in one process.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for a [`crate::TransactionGateway`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Name of the channel to open sessions against.
    pub channel: String,
    /// Name of the deployed contract to invoke.
    pub contract_name: String,
    /// Directory holding wallet credential files.
    pub wallet_dir: PathBuf,
    /// The identity invocations are executed as.
    pub identity: String,
}

impl Default for GatewayConfig {
    /// The dev-sandbox defaults used by the CLI.
    fn default() -> Self {
        Self {
            channel: "devchannel".to_string(),
            contract_name: "caravel".to_string(),
            wallet_dir: PathBuf::from("wallet"),
            identity: "user0".to_string(),
        }
    }
}
