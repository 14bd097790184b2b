// Path: crates/pipeline/src/pipeline.rs

use crate::error::PipelineError;
use sentinel_client::LedgerClient;
use sentinel_crypto::{decrypt, encrypt, HyperplaneSet, SymmetricKey};
use sentinel_storage::EvidenceStore;
use sentinel_telemetry::time::StageTimer;
use sentinel_telemetry::{error_metrics, pipeline_metrics};
use sentinel_types::error::ErrorCode;
use sentinel_types::{
    ContentAddress, Embedding, EvidencePayload, EvidenceReceipt, MappingRecord, MatchReport,
    Metadata, ProfileRecord, Signature, Verdict,
};
use std::sync::Arc;
use zeroize::Zeroizing;

/// Signs, records and verifies one capture at a time.
///
/// Holds no mutable state; clone it freely and run it from as many tasks as
/// needed.
#[derive(Debug, Clone)]
pub struct MatchPipeline {
    precision: u32,
    planes: Arc<HyperplaneSet>,
    key: Arc<SymmetricKey>,
    store: EvidenceStore,
    ledger: LedgerClient,
}

impl MatchPipeline {
    /// Assembles a pipeline. Usually built through
    /// [`Deployment::pipeline`](crate::Deployment::pipeline).
    ///
    /// Every embedding handed to [`run`](Self::run) is re-quantized to
    /// `precision` decimal places before it is signed or stored.
    pub fn new(
        precision: u32,
        planes: Arc<HyperplaneSet>,
        key: Arc<SymmetricKey>,
        store: EvidenceStore,
        ledger: LedgerClient,
    ) -> Self {
        Self {
            precision,
            planes,
            key,
            store,
            ledger,
        }
    }

    /// Decimal places embeddings are quantized to.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// The evidence store this pipeline writes to.
    pub fn store(&self) -> &EvidenceStore {
        &self.store
    }

    /// Runs the full pipeline for one capture.
    pub async fn run(
        &self,
        embedding: &Embedding,
        metadata: &Metadata,
    ) -> Result<MatchReport, PipelineError> {
        let result = self.run_steps(embedding, metadata).await;
        match &result {
            Ok(report) => {
                pipeline_metrics().inc_verdict(report.verdict.label());
                tracing::info!(
                    target: "pipeline",
                    lsh = %report.signature,
                    evidence = %report.receipt.evidence_address,
                    mapping = %report.receipt.mapping_address,
                    verdict = report.verdict.label(),
                    "run complete"
                );
            }
            Err(e) => {
                error_metrics().inc_error(e.stage(), e.code());
                tracing::warn!(
                    target: "pipeline",
                    stage = e.stage(),
                    code = e.code(),
                    transient = e.is_transient(),
                    error = %e,
                    "run failed"
                );
            }
        }
        result
    }

    async fn run_steps(
        &self,
        embedding: &Embedding,
        metadata: &Metadata,
    ) -> Result<MatchReport, PipelineError> {
        let (embedding, signature) = {
            let _t = StageTimer::new(pipeline_metrics(), "sign");
            // Idempotent for values already at this precision.
            let embedding = Embedding::quantize(embedding.values(), self.precision)?;
            let signature = self.planes.sign(&embedding)?;
            (embedding, signature)
        };

        let receipt = self.record_evidence(&signature, &embedding, metadata).await?;

        let profile = {
            let _t = StageTimer::new(pipeline_metrics(), "ledger");
            self.ledger.query_profile(&signature).await
        };
        let profile = match profile {
            Ok(profile) => profile,
            Err(source) => return Err(PipelineError::Verification { receipt, source }),
        };

        let verdict = decide(profile, &receipt.evidence_address);
        Ok(MatchReport {
            signature,
            receipt,
            verdict,
        })
    }

    async fn record_evidence(
        &self,
        signature: &Signature,
        embedding: &Embedding,
        metadata: &Metadata,
    ) -> Result<EvidenceReceipt, PipelineError> {
        let blob = {
            let _t = StageTimer::new(pipeline_metrics(), "encrypt");
            let payload = EvidencePayload {
                embedding: embedding.clone(),
                lsh: signature.clone(),
                metadata: metadata.clone(),
            };
            let plaintext = Zeroizing::new(
                serde_json::to_vec(&payload).map_err(|e| PipelineError::Encode(e.to_string()))?,
            );
            encrypt(&plaintext, &self.key)?
        };

        let _t = StageTimer::new(pipeline_metrics(), "store");
        // The mapping embeds the evidence address, so the two puts are sequential.
        let evidence_address = self.store.store_evidence(signature, &blob).await?;
        let mapping_address = self
            .store
            .store_mapping(signature, &evidence_address)
            .await?;
        Ok(EvidenceReceipt {
            evidence_address,
            mapping_address,
        })
    }

    /// Fetches, authenticates, decrypts and parses the evidence at `address`.
    pub async fn open_evidence(
        &self,
        address: &ContentAddress,
    ) -> Result<EvidencePayload, PipelineError> {
        open_evidence(&self.store, &self.key, address).await
    }

    /// Reads the mapping record at `address`.
    pub async fn resolve_mapping(
        &self,
        address: &ContentAddress,
    ) -> Result<MappingRecord, PipelineError> {
        Ok(self.store.load_mapping(address).await?)
    }
}

/// Reads back one evidence record without a ledger in the loop.
pub async fn open_evidence(
    store: &EvidenceStore,
    key: &SymmetricKey,
    address: &ContentAddress,
) -> Result<EvidencePayload, PipelineError> {
    let blob = store.load_evidence(address).await?;
    let plaintext = Zeroizing::new(decrypt(&blob, key)?);
    serde_json::from_slice(&plaintext).map_err(|e| PipelineError::Decode(e.to_string()))
}

/// `None` means the ledger holds nothing for the signature. The evidence
/// address reported on a match is this run's, not the ledger's.
fn decide(profile: Option<ProfileRecord>, evidence_address: &ContentAddress) -> Verdict {
    match profile {
        None => Verdict::NoMatch,
        Some(record) if !record.active => Verdict::ProfileInactive,
        Some(record) => Verdict::ActiveMatch {
            person_id: record.person_id,
            evidence_address: evidence_address.clone(),
            timestamp: record.timestamp,
        },
    }
}
