// Path: crates/cli/src/commands/keys.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sentinel_crypto::{write_key_file, SymmetricKey};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct KeysArgs {
    #[clap(subcommand)]
    pub command: KeysCommands,
}

#[derive(Subcommand, Debug)]
pub enum KeysCommands {
    /// Generate a fresh 256-bit key and write it base64-encoded.
    Generate {
        /// Destination file. Must not exist yet.
        #[clap(long, default_value = "aes_key.txt")]
        out: PathBuf,
    },
}

pub fn run(args: KeysArgs) -> Result<()> {
    match args.command {
        KeysCommands::Generate { out } => {
            let key = SymmetricKey::generate().context("Failed to generate key")?;
            write_key_file(&out, &key)
                .with_context(|| format!("Failed to write key file {}", out.display()))?;
            tracing::info!(target: "cli", path = %out.display(), "key generated");
            println!("Wrote new key to {}", out.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_crypto::load_key_file;

    #[test]
    fn generate_writes_a_loadable_key_and_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("key.txt");
        let generate = || {
            run(KeysArgs {
                command: KeysCommands::Generate { out: out.clone() },
            })
        };

        generate().unwrap();
        let first = load_key_file(&out).unwrap();
        assert!(generate().is_err());
        assert_eq!(load_key_file(&out).unwrap().as_bytes(), first.as_bytes());
    }
}
