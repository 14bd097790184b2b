// Path: crates/cli/src/commands/sign.rs

use anyhow::{Context, Result};
use clap::Parser;
use sentinel_client::pack_signature;
use sentinel_pipeline::deployment::load_planes;
use sentinel_types::config::SentinelConfig;
use sentinel_types::{Embedding, Signature};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
pub struct SignArgs {
    /// Deployment configuration.
    #[clap(long)]
    pub config: PathBuf,
    /// JSON array of raw embedding components.
    pub embedding: PathBuf,
}

pub fn run(args: SignArgs) -> Result<()> {
    let config = SentinelConfig::load(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;
    let output = sign_file(&config, &args.embedding)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn sign_file(config: &SentinelConfig, path: &Path) -> Result<serde_json::Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read embedding {}", path.display()))?;
    let raw: Vec<f64> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON array of numbers", path.display()))?;
    let embedding = Embedding::quantize(&raw, config.lsh.precision)?;

    let planes = load_planes(config)?;
    let signature: Signature = planes.sign(&embedding)?;
    let key = pack_signature(&signature, config.ledger.key_packing)?;

    Ok(serde_json::json!({
        "lsh": signature.as_str(),
        "ledger_key": format!("0x{}", hex::encode(key.0)),
        "planes_fingerprint": planes.fingerprint_hex(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &Path) -> SentinelConfig {
        let path = dir.join("sentinel.toml");
        fs::write(
            &path,
            "[key]\npath = \"aes_key.txt\"\n\n[lsh]\ndimension = 4\nbits = 8\nseed = 42\n",
        )
        .unwrap();
        SentinelConfig::load(&path).unwrap()
    }

    #[test]
    fn signs_without_a_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let embedding = dir.path().join("e.json");
        fs::write(&embedding, "[0.12, -0.03, 0.44, 0.9]").unwrap();

        let out = sign_file(&config, &embedding).unwrap();
        let lsh = out["lsh"].as_str().unwrap();
        assert_eq!(lsh.len(), 8);
        assert!(lsh.chars().all(|c| c == '0' || c == '1'));
        assert_eq!(out["ledger_key"].as_str().unwrap().len(), 66);

        // Same input, same answer.
        assert_eq!(sign_file(&config, &embedding).unwrap(), out);
    }

    #[test]
    fn wrong_dimension_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let embedding = dir.path().join("e.json");
        fs::write(&embedding, "[0.1, 0.2]").unwrap();
        assert!(sign_file(&config, &embedding).is_err());
    }
}
