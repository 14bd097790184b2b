// Path: crates/pipeline/src/error.rs

use sentinel_types::error::{
    CryptoError, EmbeddingError, ErrorCode, LedgerError, SignatureError, StoreError,
};
use sentinel_types::EvidenceReceipt;
use thiserror::Error;

/// Why a pipeline run (or an evidence read-back) failed.
///
/// Runs never continue past a failed step. The only partial outcome is
/// [`PipelineError::Verification`]: evidence and mapping were persisted but
/// the ledger could not answer. It is deliberately not a verdict.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The embedding cannot be quantized.
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
    /// The embedding does not fit the deployment's hyperplanes.
    #[error(transparent)]
    Signature(#[from] SignatureError),
    /// The evidence payload could not be serialized.
    #[error("Failed to encode evidence payload: {0}")]
    Encode(String),
    /// A decrypted payload is not valid evidence JSON.
    #[error("Failed to decode evidence payload: {0}")]
    Decode(String),
    /// Encryption failed, or stored evidence failed authentication.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    /// The store refused, lost or timed out on a record.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Evidence is persisted but the ledger query failed.
    #[error("Evidence stored at {} but verification failed: {source}", receipt.evidence_address)]
    Verification {
        /// Where the evidence and mapping of this run were stored.
        receipt: EvidenceReceipt,
        /// The ledger failure.
        #[source]
        source: LedgerError,
    },
}

impl PipelineError {
    /// `true` for infrastructure outages a caller may retry with backoff.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Store(StoreError::Unavailable(_))
                | Self::Verification {
                    source: LedgerError::Unavailable(_),
                    ..
                }
        )
    }

    /// The evidence receipt, if the run got far enough to persist evidence.
    pub fn receipt(&self) -> Option<&EvidenceReceipt> {
        match self {
            Self::Verification { receipt, .. } => Some(receipt),
            _ => None,
        }
    }

    /// The pipeline stage the failure belongs to, as a metrics label.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Embedding(_) | Self::Signature(_) => "sign",
            Self::Encode(_) | Self::Decode(_) => "encode",
            Self::Crypto(_) => "crypto",
            Self::Store(_) => "store",
            Self::Verification { .. } => "ledger",
        }
    }
}

impl ErrorCode for PipelineError {
    fn code(&self) -> &'static str {
        match self {
            Self::Embedding(e) => e.code(),
            Self::Signature(e) => e.code(),
            Self::Encode(_) => "PIPELINE_ENCODE_ERROR",
            Self::Decode(_) => "PIPELINE_DECODE_ERROR",
            Self::Crypto(e) => e.code(),
            Self::Store(e) => e.code(),
            Self::Verification { source, .. } => source.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_types::ContentAddress;

    fn receipt() -> EvidenceReceipt {
        EvidenceReceipt {
            evidence_address: ContentAddress::new("ev"),
            mapping_address: ContentAddress::new("map"),
        }
    }

    #[test]
    fn only_outages_are_transient() {
        assert!(PipelineError::Store(StoreError::Unavailable("x".into())).is_transient());
        assert!(PipelineError::Verification {
            receipt: receipt(),
            source: LedgerError::Unavailable("x".into())
        }
        .is_transient());

        assert!(!PipelineError::Store(StoreError::NotFound("x".into())).is_transient());
        assert!(!PipelineError::Crypto(CryptoError::AuthenticationOrPadding).is_transient());
        assert!(!PipelineError::Verification {
            receipt: receipt(),
            source: LedgerError::InvalidSignatureEncoding("x".into())
        }
        .is_transient());
    }

    #[test]
    fn verification_failure_keeps_receipt_and_ledger_code() {
        let err = PipelineError::Verification {
            receipt: receipt(),
            source: LedgerError::Unavailable("refused".into()),
        };
        assert_eq!(err.code(), "LEDGER_UNAVAILABLE");
        assert_eq!(err.receipt(), Some(&receipt()));
        assert_eq!(err.stage(), "ledger");
        assert!(err.to_string().contains("Evidence stored at ev"));
    }
}
