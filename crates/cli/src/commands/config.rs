// Path: crates/cli/src/commands/config.rs

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

const TEMPLATE: &str = r#"# sentinel deployment configuration

[key]
# Base64-encoded 32-byte key. Create one with `sentinel keys generate`.
path = "aes_key.txt"

[lsh]
dimension = 512
bits = 64
# Every process of a deployment must use the same hyperplanes: either a seed
# or a plane file written by `sentinel planes generate`.
seed = 42
# planes_path = "planes.json"
# expected_fingerprint = "<hex sha256 printed by `sentinel planes inspect`>"
precision = 3

[store]
root = "evidence"
timeout_ms = 10000

[ledger]
timeout_ms = 5000
# "bit_packed" (at most 256 bits) or "sha256"
key_packing = "bit_packed"
"#;

#[derive(Parser, Debug)]
pub struct ConfigCmdArgs {
    #[clap(subcommand)]
    pub command: ConfigSubCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubCommands {
    /// Write a template sentinel.toml.
    New {
        #[clap(long, default_value = "sentinel.toml")]
        out: PathBuf,
        /// Replace an existing file.
        #[clap(long)]
        force: bool,
    },
}

pub fn run(args: ConfigCmdArgs) -> Result<()> {
    match args.command {
        ConfigSubCommands::New { out, force } => {
            if out.exists() && !force {
                bail!("{} already exists; pass --force to replace it", out.display());
            }
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&out, TEMPLATE)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("Wrote configuration template to {}", out.display());
        }
    }
    Ok(())
}
