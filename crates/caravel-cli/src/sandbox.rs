//! # Sandbox State
//!
//! The ledger and channel the CLI operates on, persisted together as
//! one JSON file so state survives between invocations. A missing
//! file means a fresh sandbox; saving is atomic enough for a dev tool
//! (write then rename is not attempted).

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use caravel_gateway::MemoryChannel;
use caravel_ledger::MemoryLedger;

/// Persisted dev-sandbox state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sandbox {
    pub ledger: MemoryLedger,
    pub channel: MemoryChannel,
}

impl Sandbox {
    /// Load the sandbox at `path`, or start a fresh one for
    /// `channel_name` if no file exists yet.
    pub fn load(path: &Path, channel_name: &str) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no sandbox file, starting fresh");
            return Ok(Self {
                ledger: MemoryLedger::new(),
                channel: MemoryChannel::new(channel_name),
            });
        }
        let bytes = fs::read(path)
            .with_context(|| format!("reading sandbox file {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing sandbox file {}", path.display()))
    }

    /// Persist the sandbox to `path`.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(self).context("serializing sandbox state")?;
        fs::write(path, json)
            .with_context(|| format!("writing sandbox file {}", path.display()))?;
        Ok(())
    }
}
