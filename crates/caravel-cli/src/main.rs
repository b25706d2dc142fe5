//! # caravel CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

use caravel_cli::GlobalOpts;

/// Caravel — schema-driven asset ledger toolchain.
///
/// Invokes contract operations against a file-backed dev sandbox,
/// inspects committed blocks, and manages wallet identities.
#[derive(Parser, Debug)]
#[command(name = "caravel", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Submit or evaluate a contract operation.
    Invoke(caravel_cli::invoke::InvokeArgs),
    /// Inspect committed blocks on the sandbox channel.
    Block(caravel_cli::block::BlockArgs),
    /// Enroll and register wallet identities.
    Identity(caravel_cli::identity::IdentityArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Invoke(args) => caravel_cli::invoke::run(&args, &cli.global),
        Commands::Block(args) => caravel_cli::block::run(&args, &cli.global),
        Commands::Identity(args) => caravel_cli::identity::run(&args, &cli.global),
    }
}
