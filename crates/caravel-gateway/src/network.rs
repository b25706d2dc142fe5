//! # Network Seam
//!
//! The traits the gateway invokes through, plus the in-process dev
//! network that backs the CLI sandbox and the test suite. A
//! [`LedgerNetwork`] hands out [`ContractSession`]s; a session turns
//! operation names and string arguments into committed transactions
//! or read-only evaluations.
//!
//! The dev network wires a contract, a memory ledger, and a memory
//! channel together: every successful submit commits the write-set to
//! the ledger and records it as a new block on the channel, so the
//! block inspector sees the same history a real channel would carry.

use caravel_core::LedgerError;
use caravel_ledger::{dispatch, AssetContract, MemoryLedger};

use crate::channel::MemoryChannel;
use crate::config::GatewayConfig;
use crate::wallet::Credential;

/// Whether an invocation commits or only reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    /// Execute as a transaction; writes commit on success.
    Submit,
    /// Execute against current state; writes are discarded.
    Evaluate,
}

/// An open session against one contract on one channel.
pub trait ContractSession {
    /// Submit a transaction; on success its writes are committed.
    fn submit(&mut self, operation: &str, args: &[String]) -> Result<String, LedgerError>;

    /// Evaluate an operation read-only.
    fn evaluate(&mut self, operation: &str, args: &[String]) -> Result<String, LedgerError>;

    /// Release the session. Idempotent.
    fn close(&mut self);
}

/// Hands out sessions for a configured channel and identity.
pub trait LedgerNetwork {
    /// Open a session for `credential` against the channel and
    /// contract named in `config`.
    fn connect<'a>(
        &'a mut self,
        config: &GatewayConfig,
        credential: &Credential,
    ) -> Result<Box<dyn ContractSession + 'a>, LedgerError>;
}

/// The dev network: contract, ledger, and channel in one process.
pub struct InProcessNetwork {
    contract: AssetContract,
    ledger: MemoryLedger,
    channel: MemoryChannel,
    clock: Box<dyn Fn() -> i64 + Send>,
    sessions_opened: u64,
    sessions_closed: u64,
}

impl InProcessNetwork {
    /// A fresh network with an empty ledger and a new channel.
    pub fn new(channel_name: impl Into<String>) -> Self {
        Self::from_parts(
            AssetContract::new(),
            MemoryLedger::new(),
            MemoryChannel::new(channel_name),
        )
    }

    /// Rebuild a network around previously persisted state.
    pub fn from_parts(
        contract: AssetContract,
        ledger: MemoryLedger,
        channel: MemoryChannel,
    ) -> Self {
        Self {
            contract,
            ledger,
            channel,
            clock: Box::new(|| chrono::Utc::now().timestamp()),
            sessions_opened: 0,
            sessions_closed: 0,
        }
    }

    /// Replace the transaction-timestamp source. Tests pin this to
    /// get deterministic derived keys.
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// The channel, for block inspection.
    pub fn channel(&self) -> &MemoryChannel {
        &self.channel
    }

    /// The ledger, for direct state assertions.
    pub fn ledger(&self) -> &MemoryLedger {
        &self.ledger
    }

    /// Tear down into the persistable pieces.
    pub fn into_parts(self) -> (MemoryLedger, MemoryChannel) {
        (self.ledger, self.channel)
    }

    /// Sessions handed out so far.
    pub fn sessions_opened(&self) -> u64 {
        self.sessions_opened
    }

    /// Sessions released so far.
    pub fn sessions_closed(&self) -> u64 {
        self.sessions_closed
    }
}

impl LedgerNetwork for InProcessNetwork {
    fn connect<'a>(
        &'a mut self,
        config: &GatewayConfig,
        _credential: &Credential,
    ) -> Result<Box<dyn ContractSession + 'a>, LedgerError> {
        if config.channel != self.channel.name() {
            return Err(LedgerError::Validation(format!(
                "channel '{}' is not served by this network (serving '{}')",
                config.channel,
                self.channel.name()
            )));
        }
        self.sessions_opened += 1;
        Ok(Box::new(InProcessSession {
            contract_name: config.contract_name.clone(),
            network: self,
            closed: false,
        }))
    }
}

struct InProcessSession<'a> {
    network: &'a mut InProcessNetwork,
    contract_name: String,
    closed: bool,
}

impl ContractSession for InProcessSession<'_> {
    fn submit(&mut self, operation: &str, args: &[String]) -> Result<String, LedgerError> {
        let timestamp = (self.network.clock)();
        let contract = &self.network.contract;
        let (result, writes) = self
            .network
            .ledger
            .transact(timestamp, |tx| dispatch::invoke(contract, tx, operation, args))?;
        let block = self
            .network
            .channel
            .append_transaction(&self.contract_name, &writes);
        tracing::debug!(operation, block, writes = writes.len(), "transaction committed");
        Ok(result)
    }

    fn evaluate(&mut self, operation: &str, args: &[String]) -> Result<String, LedgerError> {
        let timestamp = (self.network.clock)();
        let contract = &self.network.contract;
        self.network
            .ledger
            .view(timestamp, |tx| dispatch::invoke(contract, tx, operation, args))
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.network.sessions_closed += 1;
        }
    }
}

impl Drop for InProcessSession<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockInspector, ChannelReader};
    use crate::wallet::{CertificateAuthority, DevCertificateAuthority, ADMIN_NAME, ADMIN_SECRET};

    fn test_credential() -> Credential {
        DevCertificateAuthority::default()
            .enroll(ADMIN_NAME, ADMIN_SECRET)
            .unwrap()
    }

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_submit_commits_and_appends_block() {
        let mut network = InProcessNetwork::new("devchannel").with_clock(|| 1700000000);
        let config = GatewayConfig::default();
        let credential = test_credential();

        {
            let mut session = network.connect(&config, &credential).unwrap();
            session.submit("initLedger", &[]).unwrap();
        }

        assert_eq!(network.ledger().len(), 10);
        // One transaction block past the config prelude.
        let inspector = BlockInspector::new();
        assert_eq!(inspector.block_height(network.channel()).unwrap(), 5);
        let write = inspector.block_writes(network.channel(), 4).unwrap().unwrap();
        assert_eq!(write.key, "CAR1562965001");
    }

    #[test]
    fn test_evaluate_commits_nothing() {
        let mut network = InProcessNetwork::new("devchannel").with_clock(|| 1700000000);
        let config = GatewayConfig::default();
        let credential = test_credential();

        let mut session = network.connect(&config, &credential).unwrap();
        session.evaluate("initLedger", &[]).unwrap();
        drop(session);

        assert!(network.ledger().is_empty());
        assert_eq!(
            network.channel().channel_info().unwrap().height,
            BlockInspector::DEFAULT_CONFIG_BLOCK_COUNT
        );
    }

    #[test]
    fn test_failed_submit_appends_no_block() {
        let mut network = InProcessNetwork::new("devchannel").with_clock(|| 1700000000);
        let config = GatewayConfig::default();
        let credential = test_credential();

        let mut session = network.connect(&config, &credential).unwrap();
        let err = session
            .submit("queryAsset", &strings(&["NOPE"]))
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { .. }));
        drop(session);

        assert_eq!(
            network.channel().channel_info().unwrap().height,
            BlockInspector::DEFAULT_CONFIG_BLOCK_COUNT
        );
    }

    #[test]
    fn test_connect_wrong_channel_fails() {
        let mut network = InProcessNetwork::new("devchannel");
        let config = GatewayConfig {
            channel: "otherchannel".to_string(),
            ..GatewayConfig::default()
        };
        let err = network.connect(&config, &test_credential()).err().unwrap();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn test_sessions_are_released() {
        let mut network = InProcessNetwork::new("devchannel");
        let config = GatewayConfig::default();
        let credential = test_credential();

        {
            let mut session = network.connect(&config, &credential).unwrap();
            let _ = session.submit("initLedger", &[]);
            session.close();
            // Dropping after an explicit close must not double-count.
        }
        {
            let mut session = network.connect(&config, &credential).unwrap();
            let _ = session.submit("unknownOp", &[]);
        }

        assert_eq!(network.sessions_opened(), 2);
        assert_eq!(network.sessions_closed(), 2);
    }

    #[test]
    fn test_network_round_trips_through_parts() {
        let mut network = InProcessNetwork::new("devchannel").with_clock(|| 1700000000);
        let config = GatewayConfig::default();
        let credential = test_credential();
        {
            let mut session = network.connect(&config, &credential).unwrap();
            session.submit("initLedger", &[]).unwrap();
        }

        let (ledger, channel) = network.into_parts();
        let mut revived = InProcessNetwork::from_parts(AssetContract::new(), ledger, channel)
            .with_clock(|| 1700000001);
        let mut session = revived.connect(&config, &credential).unwrap();
        let result = session.evaluate("queryAllAsset", &strings(&["car"])).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 6);
    }
}
