//! # Invoke Subcommand
//!
//! Submits or evaluates a contract operation through the gateway
//! against the sandbox, printing the decoded result as pretty JSON.
//! Submitted transactions persist their effects back to the sandbox
//! file; evaluations leave it untouched.

use anyhow::Context;
use clap::Args;

use caravel_core::LedgerError;
use caravel_gateway::{InProcessNetwork, TransactionGateway};
use caravel_ledger::{dispatch, AssetContract};

use crate::sandbox::Sandbox;
use crate::GlobalOpts;

/// Arguments for the invoke subcommand.
#[derive(Args, Debug)]
pub struct InvokeArgs {
    /// Operation name, e.g. `initLedger` or `queryAllAsset`.
    pub operation: String,

    /// Operation arguments, in order. JSON-valued arguments are
    /// passed as raw JSON strings.
    pub args: Vec<String>,

    /// Evaluate read-only instead of submitting a transaction.
    #[arg(long)]
    pub evaluate: bool,
}

/// Run an invocation against the sandbox.
pub fn run(args: &InvokeArgs, opts: &GlobalOpts) -> anyhow::Result<()> {
    let sandbox = Sandbox::load(&opts.sandbox, &opts.channel)?;
    let wallet = caravel_gateway::FsWallet::open(&opts.wallet)?;
    let mut network =
        InProcessNetwork::from_parts(AssetContract::new(), sandbox.ledger, sandbox.channel);
    let gateway = TransactionGateway::new(opts.gateway_config());

    let result = if args.evaluate {
        gateway.evaluate(&mut network, &wallet, &args.operation, &args.args)
    } else {
        gateway.submit(&mut network, &wallet, &args.operation, &args.args)
    };

    let result = match result {
        Err(LedgerError::UnknownOperation(name)) => {
            return Err(anyhow::anyhow!(
                "unknown operation '{name}'; available operations: {}",
                dispatch::OPERATIONS.join(", ")
            ));
        }
        other => other.context("invocation failed")?,
    };

    println!("{}", serde_json::to_string_pretty(&result)?);

    if !args.evaluate {
        let (ledger, channel) = network.into_parts();
        Sandbox { ledger, channel }.save(&opts.sandbox)?;
    }
    Ok(())
}
