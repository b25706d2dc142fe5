//! # Block Subcommand
//!
//! Read-only inspection of the sandbox channel: chain height, whole
//! blocks, and the application writes the inspector extracts.

use clap::{Args, Subcommand};
use serde_json::json;

use caravel_gateway::{BlockInspector, ChannelReader};

use crate::sandbox::Sandbox;
use crate::GlobalOpts;

/// Arguments for the block subcommand.
#[derive(Args, Debug)]
pub struct BlockArgs {
    #[command(subcommand)]
    pub command: BlockCommand,
}

#[derive(Subcommand, Debug)]
pub enum BlockCommand {
    /// Print the channel height.
    Height,
    /// Print one block in full.
    Get {
        /// Block number, starting at 0.
        number: u64,
    },
    /// Print the application write of each transaction block.
    Writes,
}

/// Run a block inspection against the sandbox channel.
pub fn run(args: &BlockArgs, opts: &GlobalOpts) -> anyhow::Result<()> {
    let sandbox = Sandbox::load(&opts.sandbox, &opts.channel)?;
    let inspector = BlockInspector::new();

    let output = match &args.command {
        BlockCommand::Height => {
            json!({ "height": inspector.block_height(&sandbox.channel)? })
        }
        BlockCommand::Get { number } => serde_json::to_value(sandbox.channel.query_block(*number)?)?,
        BlockCommand::Writes => {
            let writes = inspector.all_block_writes(&sandbox.channel)?;
            let entries: Vec<_> = writes
                .into_iter()
                .map(|(number, write)| json!({ "block": number, "write": write }))
                .collect();
            serde_json::Value::Array(entries)
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
