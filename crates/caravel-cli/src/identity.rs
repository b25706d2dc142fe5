//! # Identity Subcommand
//!
//! Wallet management against the in-process dev certificate
//! authority: enroll the bootstrap admin, register application
//! identities, list what the wallet holds.

use clap::{Args, Subcommand};
use serde_json::json;

use caravel_gateway::{
    wallet::{enroll_admin, register_user},
    CredentialStore, DevCertificateAuthority, FsWallet,
};

use crate::GlobalOpts;

/// Arguments for the identity subcommand.
#[derive(Args, Debug)]
pub struct IdentityArgs {
    #[command(subcommand)]
    pub command: IdentityCommand,
}

#[derive(Subcommand, Debug)]
pub enum IdentityCommand {
    /// Enroll the certificate authority's bootstrap admin.
    EnrollAdmin,
    /// Register and enroll an application identity.
    Register {
        /// Identity name to register.
        name: String,

        /// Affiliation recorded at registration.
        #[arg(long, default_value = "org1.department1")]
        affiliation: String,
    },
    /// List the identities stored in the wallet.
    List,
}

/// Run an identity operation against the configured wallet.
pub fn run(args: &IdentityArgs, opts: &GlobalOpts) -> anyhow::Result<()> {
    let mut wallet = FsWallet::open(&opts.wallet)?;
    let mut ca = DevCertificateAuthority::default();

    let output = match &args.command {
        IdentityCommand::EnrollAdmin => {
            let credential = enroll_admin(&mut wallet, &mut ca)?;
            json!({ "enrolled": credential.name, "mspId": credential.msp_id })
        }
        IdentityCommand::Register { name, affiliation } => {
            let credential = register_user(&mut wallet, &mut ca, name, affiliation)?;
            json!({ "enrolled": credential.name, "mspId": credential.msp_id })
        }
        IdentityCommand::List => json!({ "identities": wallet.list()? }),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
