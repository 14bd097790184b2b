// Path: crates/cli/src/commands/planes.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sentinel_crypto::HyperplaneSet;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct PlanesArgs {
    #[clap(subcommand)]
    pub command: PlanesCommands,
}

#[derive(Subcommand, Debug)]
pub enum PlanesCommands {
    /// Generate a seeded hyperplane matrix and persist it.
    Generate {
        /// Embedding dimension.
        #[clap(long)]
        dimension: usize,
        /// Signature length in bits.
        #[clap(long)]
        bits: usize,
        /// Generation seed.
        #[clap(long)]
        seed: u64,
        /// Destination plane file.
        #[clap(long)]
        out: PathBuf,
    },
    /// Print the shape and fingerprint of a plane file.
    Inspect {
        /// The plane file.
        path: PathBuf,
    },
}

pub fn run(args: PlanesArgs) -> Result<()> {
    match args.command {
        PlanesCommands::Generate {
            dimension,
            bits,
            seed,
            out,
        } => {
            let planes = HyperplaneSet::generate(dimension, bits, seed)
                .context("Failed to generate hyperplanes")?;
            planes
                .save(&out)
                .with_context(|| format!("Failed to write plane file {}", out.display()))?;
            println!("Wrote {}x{} planes to {}", dimension, bits, out.display());
            println!("fingerprint: {}", planes.fingerprint_hex());
        }
        PlanesCommands::Inspect { path } => {
            let planes = HyperplaneSet::load(&path)
                .with_context(|| format!("Failed to load plane file {}", path.display()))?;
            println!("dimension:   {}", planes.dimension());
            println!("bits:        {}", planes.bits());
            match planes.seed() {
                Some(seed) => println!("seed:        {}", seed),
                None => println!("seed:        (none)"),
            }
            println!("fingerprint: {}", planes.fingerprint_hex());
        }
    }
    Ok(())
}
