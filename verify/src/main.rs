// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;

use ledger_kernel::config::{ProtocolParameters, VALIDATOR_TAG};
use ledger_kernel::hash::default_hasher;
use ledger_kernel::types::Identifier;
use ledger_verify::{assign_report, load_snapshot, pack, prove_report, root_report};

#[derive(Parser, Debug)]
#[command(author, version, about = "Offline verifier for ledger snapshots", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the accounts root of a snapshot
    Root { snapshot: PathBuf },

    /// Replay a validator or proposer assignment
    Assign {
        snapshot: PathBuf,
        #[arg(long)]
        entity: Identifier,
        #[arg(long, default_value = VALIDATOR_TAG)]
        tag: String,
        #[arg(long, default_value_t = ProtocolParameters::default().validators_per_entity)]
        count: usize,
        #[arg(long, default_value_t = ProtocolParameters::default().min_stake)]
        min_stake: u64,
    },

    /// Print an account with its membership proof and check it
    Prove {
        snapshot: PathBuf,
        #[arg(long)]
        account: Identifier,
    },

    /// Convert a snapshot to the binary container
    Pack { snapshot: PathBuf, out: PathBuf },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let hasher = default_hasher();

    match args.command {
        Command::Root { snapshot } => {
            let snap = load_snapshot(&snapshot, hasher)?;
            print_json(&root_report(&snap))
        }
        Command::Assign {
            snapshot,
            entity,
            tag,
            count,
            min_stake,
        } => {
            let snap = load_snapshot(&snapshot, hasher.clone())?;
            print_json(&assign_report(&snap, hasher, entity, &tag, count, min_stake)?)
        }
        Command::Prove { snapshot, account } => {
            let snap = load_snapshot(&snapshot, hasher.clone())?;
            let report = prove_report(&snap, hasher, &account)?;
            print_json(&report)?;
            if !report.verified {
                anyhow::bail!("Proof for {} does not verify", account);
            }
            Ok(())
        }
        Command::Pack { snapshot, out } => {
            let snap = load_snapshot(&snapshot, hasher)?;
            let written = pack(&snap, &out)?;
            eprintln!("Wrote {} bytes to {}", written, out.display());
            Ok(())
        }
    }
}
