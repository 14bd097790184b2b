// Path: crates/storage/src/fs.rs
//! A content store backed by a directory of files.
//!
//! Layout: `<root>/<first two hex chars>/<sha256 hex>`. Writes go to a
//! temporary file in the shard directory and are renamed into place, so a
//! reader never observes a partial blob. Reads re-hash the file and reject
//! content that no longer matches its name.

use async_trait::async_trait;
use sentinel_api::ContentStore;
use sentinel_crypto::algorithms::hash::sha256;
use sentinel_types::error::StoreError;
use sentinel_types::ContentAddress;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A durable content store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn shard_dir(&self, hex: &str) -> Option<PathBuf> {
        hex.get(..2).map(|shard| self.root.join(shard))
    }

    fn path_for(&self, address: &ContentAddress) -> Option<PathBuf> {
        let hex = address.as_str();
        let well_formed =
            hex.len() == 64 && hex.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !well_formed {
            return None;
        }
        self.shard_dir(hex).map(|dir| dir.join(hex))
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn put(&self, bytes: &[u8]) -> Result<ContentAddress, StoreError> {
        let digest = sha256(bytes);
        let address = ContentAddress::from_digest(&digest);
        let unavailable = |e: std::io::Error| StoreError::Unavailable(e.to_string());

        let (dir, path) = match (self.shard_dir(address.as_str()), self.path_for(&address)) {
            (Some(dir), Some(path)) => (dir, path),
            _ => return Err(StoreError::Encode(format!("bad address {}", address))),
        };
        // An intact copy is left alone; a corrupted one is replaced.
        match tokio::fs::read(&path).await {
            Ok(existing) if sha256(&existing) == digest => return Ok(address),
            Ok(_) => {
                tracing::warn!(target: "store", backend = "fs", %address, "replacing corrupted blob")
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(unavailable(e)),
        }

        tokio::fs::create_dir_all(&dir).await.map_err(unavailable)?;
        let tmp = dir.join(format!(
            ".{}.{}.{}.tmp",
            address,
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        tokio::fs::write(&tmp, bytes).await.map_err(unavailable)?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(unavailable(e));
        }
        tracing::debug!(target: "store", backend = "fs", %address, len = bytes.len(), "wrote blob");
        Ok(address)
    }

    async fn get(&self, address: &ContentAddress) -> Result<Vec<u8>, StoreError> {
        let path = self
            .path_for(address)
            .ok_or_else(|| StoreError::NotFound(address.to_string()))?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(address.to_string()))
            }
            Err(e) => return Err(StoreError::Unavailable(e.to_string())),
        };
        if ContentAddress::from_digest(&sha256(&bytes)) != *address {
            tracing::warn!(target: "store", backend = "fs", %address, "stored blob does not match its address");
            return Err(StoreError::Decode(format!(
                "content at {} does not hash to its address",
                address
            )));
        }
        Ok(bytes)
    }

    fn backend_name(&self) -> &'static str {
        "fs"
    }
}
