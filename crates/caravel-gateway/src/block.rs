//! # Block Model and Inspection
//!
//! A decoded view of committed blocks and the [`BlockInspector`] that
//! digs application writes out of them. The structs mirror the decoded
//! block JSON shape: envelopes carry transaction actions, actions
//! carry per-namespace read-write sets, and the write entries inside
//! are what the ledger actually changed.
//!
//! ## Named Predicates
//!
//! Nothing here hard-codes block positions inline. What counts as a
//! configuration block and what counts as a system namespace are named
//! predicates on the inspector, so a channel with a different prelude
//! shape only needs a different inspector.

use serde::{Deserialize, Serialize};

use caravel_core::LedgerError;

/// Lifecycle system namespace; its writes are platform bookkeeping,
/// never application data.
pub const SYSTEM_NAMESPACE: &str = "lscc";

/// Height and bookkeeping for a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    /// Number of blocks on the chain; block numbers run `0..height`.
    pub height: u64,
}

/// One committed block: header plus the enveloped transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub data: BlockData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Position of the block on the chain, starting at zero.
    pub number: u64,
    /// Hex digest over the block's transaction data.
    pub data_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockData {
    #[serde(default)]
    pub data: Vec<Envelope>,
}

/// A signed transaction envelope. Configuration blocks carry no
/// envelopes in this model, only transaction blocks do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub payload: EnvelopePayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopePayload {
    pub header: PayloadHeader,
    pub data: PayloadData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadHeader {
    pub channel_header: ChannelHeader,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelHeader {
    /// Transaction identifier assigned at submission.
    #[serde(default)]
    pub tx_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadData {
    #[serde(default)]
    pub actions: Vec<TransactionAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionAction {
    pub payload: ActionPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPayload {
    pub action: EndorsedAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndorsedAction {
    pub proposal_response_payload: ProposalResponsePayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalResponsePayload {
    pub extension: ProposalResponseExtension,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalResponseExtension {
    pub results: TxReadWriteSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReadWriteSet {
    #[serde(default)]
    pub ns_rwset: Vec<NsReadWriteSet>,
}

/// One namespace's slice of a transaction's read-write set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NsReadWriteSet {
    pub namespace: String,
    pub rwset: ReadWriteSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadWriteSet {
    #[serde(default)]
    pub writes: Vec<WriteEntry>,
}

/// A single key written or deleted by a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteEntry {
    pub key: String,
    #[serde(default)]
    pub is_delete: bool,
    /// The written document, UTF-8 decoded; `None` for deletions.
    #[serde(default)]
    pub value: Option<String>,
}

/// Read access to a channel's committed blocks.
pub trait ChannelReader {
    /// Current chain height and bookkeeping.
    fn channel_info(&self) -> Result<ChannelInfo, LedgerError>;

    /// Fetch block `number`, failing with
    /// [`LedgerError::BlockNotFound`] past the chain tip.
    fn query_block(&self, number: u64) -> Result<Block, LedgerError>;
}

/// Extracts application writes from committed blocks.
#[derive(Debug, Clone)]
pub struct BlockInspector {
    config_block_count: u64,
}

impl BlockInspector {
    /// Channels created by the dev tooling open with this many
    /// configuration blocks before the first transaction block.
    pub const DEFAULT_CONFIG_BLOCK_COUNT: u64 = 4;

    /// An inspector for the default channel prelude.
    pub fn new() -> Self {
        Self::with_config_block_count(Self::DEFAULT_CONFIG_BLOCK_COUNT)
    }

    /// An inspector for a channel whose prelude holds a different
    /// number of configuration blocks.
    pub fn with_config_block_count(config_block_count: u64) -> Self {
        Self { config_block_count }
    }

    /// Whether `namespace` belongs to the platform rather than an
    /// application contract.
    pub fn is_system_namespace(namespace: &str) -> bool {
        namespace == SYSTEM_NAMESPACE
    }

    /// Whether block `number` is part of the channel's configuration
    /// prelude.
    pub fn is_config_block(&self, number: u64) -> bool {
        number < self.config_block_count
    }

    /// Current chain height of `reader`'s channel.
    pub fn block_height(&self, reader: &dyn ChannelReader) -> Result<u64, LedgerError> {
        Ok(reader.channel_info()?.height)
    }

    /// The first application write recorded in block `number`.
    ///
    /// Looks at the block's first envelope's first action and scans
    /// its namespaces in order, skipping system namespaces. `None`
    /// when the block carries no application write (configuration
    /// blocks, system-only transactions).
    pub fn block_writes(
        &self,
        reader: &dyn ChannelReader,
        number: u64,
    ) -> Result<Option<WriteEntry>, LedgerError> {
        let block = reader.query_block(number)?;
        let first_action = block
            .data
            .data
            .first()
            .and_then(|envelope| envelope.payload.data.actions.first());
        let Some(action) = first_action else {
            return Ok(None);
        };
        for ns in &action.payload.action.proposal_response_payload.extension.results.ns_rwset {
            if Self::is_system_namespace(&ns.namespace) {
                continue;
            }
            if let Some(write) = ns.rwset.writes.first() {
                return Ok(Some(write.clone()));
            }
        }
        Ok(None)
    }

    /// Application writes for every transaction block, in ascending
    /// block order. Blocks without an application write are omitted.
    pub fn all_block_writes(
        &self,
        reader: &dyn ChannelReader,
    ) -> Result<Vec<(u64, WriteEntry)>, LedgerError> {
        let height = self.block_height(reader)?;
        let mut writes = Vec::new();
        for number in self.config_block_count..height {
            if let Some(write) = self.block_writes(reader, number)? {
                writes.push((number, write));
            }
        }
        Ok(writes)
    }
}

impl Default for BlockInspector {
    fn default() -> Self {
        Self::new()
    }
}
