// Path: crates/cli/src/commands/evidence.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sentinel_crypto::load_key_file;
use sentinel_pipeline::open_evidence;
use sentinel_storage::{EvidenceStore, FsContentStore};
use sentinel_types::config::SentinelConfig;
use sentinel_types::ContentAddress;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
pub struct EvidenceArgs {
    #[clap(subcommand)]
    pub command: EvidenceCommands,
}

#[derive(Subcommand, Debug)]
pub enum EvidenceCommands {
    /// Fetch, authenticate and decrypt an evidence record.
    Open {
        /// Deployment configuration.
        #[clap(long)]
        config: PathBuf,
        /// Content address of the evidence record.
        address: String,
    },
    /// Print the signature → evidence mapping stored at an address.
    Mapping {
        /// Deployment configuration.
        #[clap(long)]
        config: PathBuf,
        /// Content address of the mapping record.
        address: String,
    },
}

pub async fn run(args: EvidenceArgs) -> Result<()> {
    match args.command {
        EvidenceCommands::Open { config, address } => {
            let config = load_config(&config)?;
            let store = open_store(&config).await?;
            let key = load_key_file(&config.key.path)?;
            let payload = open_evidence(&store, &key, &ContentAddress::new(address)).await?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        EvidenceCommands::Mapping { config, address } => {
            let config = load_config(&config)?;
            let store = open_store(&config).await?;
            let mapping = store.load_mapping(&ContentAddress::new(address)).await?;
            let out = serde_json::json!({
                "lsh": mapping.signature.as_str(),
                "evidence": mapping.address.as_str(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<SentinelConfig> {
    SentinelConfig::load(path).with_context(|| format!("Failed to load config {}", path.display()))
}

async fn open_store(config: &SentinelConfig) -> Result<EvidenceStore> {
    let backend = FsContentStore::open(config.store.root.clone())
        .await
        .with_context(|| format!("Failed to open store at {}", config.store.root.display()))?;
    Ok(EvidenceStore::new(Arc::new(backend), config.store_timeout()))
}
