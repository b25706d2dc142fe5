//! # Transaction Gateway
//!
//! The front door for clients: resolve the configured identity from
//! the wallet, open a session, run the invocation, release the
//! session, decode the payload. Session release happens on every
//! path, including failures.
//!
//! ## Payload Decoding
//!
//! Well-behaved contracts JSON-encode their result exactly once, but
//! contracts in the wild sometimes return double- or triple-encoded
//! strings. [`decode_payload`] unwraps string layers until the value
//! stops being a JSON-parseable string, and falls back to the raw
//! string for non-JSON payloads. It never fails.

use serde_json::Value;

use caravel_core::LedgerError;

use crate::config::GatewayConfig;
use crate::network::{InvocationMode, LedgerNetwork};
use crate::wallet::CredentialStore;

/// Decode a contract result, tolerating redundant encoding layers.
pub fn decode_payload(raw: &str) -> Value {
    let mut value = match serde_json::from_str::<Value>(raw) {
        Ok(value) => value,
        Err(_) => return Value::String(raw.to_string()),
    };
    // Unwrap nested string encodings until a non-string or a plain
    // string remains.
    loop {
        let unwrapped = match &value {
            Value::String(inner) => match serde_json::from_str::<Value>(inner) {
                Ok(unwrapped) => unwrapped,
                Err(_) => break,
            },
            _ => break,
        };
        if unwrapped == value {
            break;
        }
        value = unwrapped;
    }
    value
}

/// Executes contract invocations for one configured identity.
#[derive(Debug, Clone)]
pub struct TransactionGateway {
    config: GatewayConfig,
}

impl TransactionGateway {
    /// A gateway for `config`.
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }

    /// The configuration this gateway executes under.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Execute `operation` in the given mode.
    ///
    /// Resolves the configured identity, opens a session, invokes,
    /// and releases the session before surfacing the result either
    /// way. The decoded payload is returned on success.
    pub fn execute(
        &self,
        network: &mut dyn LedgerNetwork,
        wallet: &dyn CredentialStore,
        mode: InvocationMode,
        operation: &str,
        args: &[String],
    ) -> Result<Value, LedgerError> {
        let credential = wallet.lookup(&self.config.identity)?.ok_or_else(|| {
            LedgerError::IdentityNotFound {
                name: self.config.identity.clone(),
            }
        })?;

        tracing::info!(
            operation,
            identity = %credential.name,
            channel = %self.config.channel,
            mode = ?mode,
            "executing contract invocation"
        );

        let mut session = network.connect(&self.config, &credential)?;
        let result = match mode {
            InvocationMode::Submit => session.submit(operation, args),
            InvocationMode::Evaluate => session.evaluate(operation, args),
        };
        session.close();
        let raw = result?;
        Ok(decode_payload(&raw))
    }

    /// Execute as a committed transaction.
    pub fn submit(
        &self,
        network: &mut dyn LedgerNetwork,
        wallet: &dyn CredentialStore,
        operation: &str,
        args: &[String],
    ) -> Result<Value, LedgerError> {
        self.execute(network, wallet, InvocationMode::Submit, operation, args)
    }

    /// Execute read-only.
    pub fn evaluate(
        &self,
        network: &mut dyn LedgerNetwork,
        wallet: &dyn CredentialStore,
        operation: &str,
        args: &[String],
    ) -> Result<Value, LedgerError> {
        self.execute(network, wallet, InvocationMode::Evaluate, operation, args)
    }
}
