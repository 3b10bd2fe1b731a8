use crate::{DataRoot, ResearchId};
use anyhow::Result;
use chunked_merkle::Sha3Algorithm;
use ethereum_types::H256;
use serde::{Deserialize, Serialize};

/// Outcome of the integrity evaluation of one research upload.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntegrityVerdict {
    Pass,
    Fail,
    Review,
}

impl IntegrityVerdict {
    /// Derives the verdict from the two analysis scores. Quality is on a
    /// 0-100 scale, plagiarism is a percentage.
    pub fn from_scores(quality_score: u64, plagiarism_percentage: u64) -> Self {
        if quality_score >= 80 && plagiarism_percentage < 10 {
            Self::Pass
        } else if quality_score < 60 || plagiarism_percentage > 20 {
            Self::Fail
        } else {
            Self::Review
        }
    }
}

/// The signed-over statement an analysis produces. Its canonical JSON
/// encoding is what gets hashed and anchored next to the research entry,
/// so field names and order must stay stable.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attestation {
    pub research_id: ResearchId,
    pub cid: String,
    pub merkle_root: DataRoot,
    pub quality_score: u64,
    pub plagiarism_percentage: u64,
    pub integrity_verdict: IntegrityVerdict,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl Attestation {
    /// Keccak-256 over the canonical JSON encoding.
    pub fn hash(&self) -> Result<H256> {
        let encoded = serde_json::to_vec(self)?;
        Ok(Sha3Algorithm::leaf(&encoded))
    }
}

/// What an analysis service reports back to callers.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct AnalysisReport {
    pub quality_score: u64,
    pub plagiarism_percentage: u64,
    pub verdict: IntegrityVerdict,
    pub attestation_hash: H256,
    pub summary: String,
}
