//! # In-Process Channel
//!
//! A block chain the dev network appends to on every committed
//! transaction. New channels open with the standard configuration
//! prelude (see [`crate::BlockInspector::DEFAULT_CONFIG_BLOCK_COUNT`]),
//! so block numbering matches what the inspector expects from a real
//! channel.
//!
//! Synthesized transaction blocks list the lifecycle system namespace
//! ahead of the application namespace, the way endorsed transactions
//! arrive in practice, which keeps the inspector's namespace filter
//! honest.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use caravel_core::LedgerError;
use caravel_ledger::KvWrite;

use crate::block::{
    ActionPayload, Block, BlockData, BlockHeader, ChannelHeader, ChannelInfo, ChannelReader,
    EndorsedAction, Envelope, EnvelopePayload, NsReadWriteSet, PayloadData, PayloadHeader,
    ProposalResponseExtension, ProposalResponsePayload, ReadWriteSet, TransactionAction,
    TxReadWriteSet, WriteEntry, SYSTEM_NAMESPACE,
};
use crate::BlockInspector;

/// A named, append-only chain of blocks held in memory.
///
/// Serializable so the dev CLI can persist it alongside the ledger
/// between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryChannel {
    name: String,
    blocks: Vec<Block>,
}

impl MemoryChannel {
    /// Create a channel with the standard configuration prelude.
    pub fn new(name: impl Into<String>) -> Self {
        let mut channel = Self {
            name: name.into(),
            blocks: Vec::new(),
        };
        for _ in 0..BlockInspector::DEFAULT_CONFIG_BLOCK_COUNT {
            channel.push_block(Vec::new());
        }
        channel
    }

    /// The channel's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a block recording one committed transaction's write-set
    /// under `contract_name`. Returns the new block's number.
    pub fn append_transaction(&mut self, contract_name: &str, writes: &[KvWrite]) -> u64 {
        let entries: Vec<WriteEntry> = writes
            .iter()
            .map(|w| WriteEntry {
                key: w.key.clone(),
                is_delete: w.is_delete,
                value: w
                    .value
                    .as_ref()
                    .map(|bytes| String::from_utf8_lossy(bytes).into_owned()),
            })
            .collect();

        let ns_rwset = vec![
            NsReadWriteSet {
                namespace: SYSTEM_NAMESPACE.to_string(),
                rwset: ReadWriteSet { writes: Vec::new() },
            },
            NsReadWriteSet {
                namespace: contract_name.to_string(),
                rwset: ReadWriteSet { writes: entries },
            },
        ];

        let envelope = Envelope {
            payload: EnvelopePayload {
                header: PayloadHeader {
                    channel_header: ChannelHeader {
                        tx_id: Uuid::new_v4().to_string(),
                    },
                },
                data: PayloadData {
                    actions: vec![TransactionAction {
                        payload: ActionPayload {
                            action: EndorsedAction {
                                proposal_response_payload: ProposalResponsePayload {
                                    extension: ProposalResponseExtension {
                                        results: TxReadWriteSet { ns_rwset },
                                    },
                                },
                            },
                        },
                    }],
                },
            },
        };

        self.push_block(vec![envelope])
    }

    fn push_block(&mut self, envelopes: Vec<Envelope>) -> u64 {
        let number = self.blocks.len() as u64;
        let data_hash = Self::hash_envelopes(&envelopes);
        self.blocks.push(Block {
            header: BlockHeader { number, data_hash },
            data: BlockData { data: envelopes },
        });
        number
    }

    fn hash_envelopes(envelopes: &[Envelope]) -> String {
        let mut hasher = Sha256::new();
        for envelope in envelopes {
            // Struct-to-JSON serialization cannot fail here.
            if let Ok(bytes) = serde_json::to_vec(envelope) {
                hasher.update(&bytes);
            }
        }
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

impl ChannelReader for MemoryChannel {
    fn channel_info(&self) -> Result<ChannelInfo, LedgerError> {
        Ok(ChannelInfo {
            height: self.blocks.len() as u64,
        })
    }

    fn query_block(&self, number: u64) -> Result<Block, LedgerError> {
        self.blocks
            .get(number as usize)
            .cloned()
            .ok_or(LedgerError::BlockNotFound {
                index: number,
                height: self.blocks.len() as u64,
            })
    }
}
