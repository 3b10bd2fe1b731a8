//! Content storage for uploaded research data.
//!
//! A stored document is addressed by a content-derived CID and committed to
//! by its chunked Merkle root; the root is what the anchor contract records,
//! the CID is what retrieval uses.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chunked_merkle::{ChunkProof, Sha3Algorithm};
use shared_types::UploadResult;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Derives the content reference for a byte sequence.
///
/// This is a stable stand-in for a real IPFS CID: the `Qm` prefix followed
/// by the first 46 hex characters of the content's Keccak-256 digest. Same
/// bytes, same CID.
pub fn derive_cid(data: &[u8]) -> String {
    let digest = Sha3Algorithm::leaf(data);
    format!("Qm{}", &hex::encode(digest)[..46])
}

/// Commits a byte sequence: CID, Merkle data root and raw size.
pub fn commit_content(data: &[u8]) -> UploadResult {
    UploadResult {
        cid: derive_cid(data),
        data_root: chunked_merkle::compute_root(data),
        size: data.len(),
    }
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Stores `data` and returns its commitment.
    async fn put(&self, name: &str, data: Vec<u8>) -> Result<UploadResult>;

    /// Retrieves the raw bytes for a CID, if present.
    async fn get(&self, cid: &str) -> Result<Option<Arc<Vec<u8>>>>;

    /// Computes the inclusion proof for one chunk of a stored document.
    async fn chunk_proof(&self, cid: &str, chunk_index: usize) -> Result<ChunkProof>;
}

/// In-memory content store, keyed by CID.
#[derive(Default)]
pub struct MemoryContentStore {
    files: RwLock<HashMap<String, Arc<Vec<u8>>>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn put(&self, name: &str, data: Vec<u8>) -> Result<UploadResult> {
        let result = commit_content(&data);
        debug!(
            name,
            cid = %result.cid,
            size = result.size,
            data_root = ?result.data_root,
            "Stored content"
        );
        self.files
            .write()
            .await
            .insert(result.cid.clone(), Arc::new(data));
        Ok(result)
    }

    async fn get(&self, cid: &str) -> Result<Option<Arc<Vec<u8>>>> {
        Ok(self.files.read().await.get(cid).cloned())
    }

    async fn chunk_proof(&self, cid: &str, chunk_index: usize) -> Result<ChunkProof> {
        let data = self
            .get(cid)
            .await?
            .ok_or_else(|| anyhow!("unknown cid: {}", cid))?;
        Ok(chunked_merkle::compute_proof(&data, chunk_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunked_merkle::CHUNK_SIZE;

    #[test]
    fn cid_is_stable_and_well_formed() {
        let cid = derive_cid(b"mintora");
        assert_eq!(cid, derive_cid(b"mintora"));
        assert_ne!(cid, derive_cid(b"mintora!"));
        assert!(cid.starts_with("Qm"));
        assert_eq!(cid.len(), 48);
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = MemoryContentStore::new();
        let data = vec![0x5a_u8; 3 * CHUNK_SIZE + 100];

        let result = store.put("paper.pdf", data.clone()).await.unwrap();
        assert_eq!(result.size, data.len());
        assert_eq!(result.data_root, chunked_merkle::compute_root(&data));

        let fetched = store.get(&result.cid).await.unwrap().unwrap();
        assert_eq!(*fetched, data);

        assert!(store.get("QmMissing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stored_chunk_proofs_validate_against_root() {
        let store = MemoryContentStore::new();
        let data: Vec<u8> = (0..2 * CHUNK_SIZE + 77).map(|i| (i % 256) as u8).collect();
        let result = store.put("data.bin", data.clone()).await.unwrap();

        let leaves = chunked_merkle::leaf_hashes(&data);
        for (index, leaf) in leaves.iter().enumerate() {
            let proof = store.chunk_proof(&result.cid, index).await.unwrap();
            proof.validate(leaf, &result.data_root).unwrap();
        }

        // Past the last chunk there is nothing to prove.
        let empty = store.chunk_proof(&result.cid, leaves.len()).await.unwrap();
        assert!(empty.is_empty());

        assert!(store.chunk_proof("QmMissing", 0).await.is_err());
    }
}
