//! Integrity analysis of registered research.
//!
//! The evaluation itself is an external capability (in production a
//! TEE-verified AI service); this crate defines the seam and ships a
//! pseudo-random placeholder so the rest of the pipeline can run end to
//! end.

use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;
use shared_types::{AnalysisReport, Attestation, DataRoot, IntegrityVerdict, ResearchId};
use tracing::info;

/// Evaluates one research upload and produces a hashed attestation.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(
        &self,
        research_id: ResearchId,
        cid: &str,
        data_root: DataRoot,
    ) -> Result<AnalysisReport>;
}

/// Placeholder analysis backend. Scores are drawn uniformly (quality
/// 70..=99, plagiarism 0..=14); everything derived from them (verdict,
/// attestation, summary) follows the real rules, so swapping in an actual
/// service only replaces the score source.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomAnalysis;

impl RandomAnalysis {
    fn report_from_scores(
        research_id: ResearchId,
        cid: &str,
        data_root: DataRoot,
        quality_score: u64,
        plagiarism_percentage: u64,
    ) -> Result<AnalysisReport> {
        let verdict = IntegrityVerdict::from_scores(quality_score, plagiarism_percentage);
        let attestation = Attestation {
            research_id,
            cid: cid.to_string(),
            merkle_root: data_root,
            quality_score,
            plagiarism_percentage,
            integrity_verdict: verdict,
            timestamp: chrono::Utc::now().timestamp_millis() as u64,
        };
        let attestation_hash = attestation.hash()?;

        Ok(AnalysisReport {
            quality_score,
            plagiarism_percentage,
            verdict,
            attestation_hash,
            summary: format!(
                "Research analysis complete. Quality: {}/100, Plagiarism: {}%, Verdict: {:?}",
                quality_score, plagiarism_percentage, verdict
            ),
        })
    }
}

#[async_trait]
impl AnalysisService for RandomAnalysis {
    async fn analyze(
        &self,
        research_id: ResearchId,
        cid: &str,
        data_root: DataRoot,
    ) -> Result<AnalysisReport> {
        let (quality_score, plagiarism_percentage) = {
            let mut rng = rand::thread_rng();
            (rng.gen_range(70..100), rng.gen_range(0..15))
        };
        let report =
            Self::report_from_scores(research_id, cid, data_root, quality_score, plagiarism_percentage)?;
        info!(
            research_id,
            cid,
            quality = report.quality_score,
            plagiarism = report.plagiarism_percentage,
            verdict = ?report.verdict,
            "Analysis finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethereum_types::H256;

    #[tokio::test]
    async fn placeholder_scores_stay_in_range() {
        let service = RandomAnalysis;
        for _ in 0..50 {
            let report = service.analyze(1, "QmAbc", H256::repeat_byte(2)).await.unwrap();
            assert!((70..100).contains(&report.quality_score));
            assert!(report.plagiarism_percentage < 15);
            assert_eq!(
                report.verdict,
                IntegrityVerdict::from_scores(report.quality_score, report.plagiarism_percentage)
            );
            assert_ne!(report.attestation_hash, H256::zero());
        }
    }

    #[test]
    fn report_is_consistent_with_attestation() {
        let report =
            RandomAnalysis::report_from_scores(9, "QmXyz", H256::repeat_byte(3), 85, 4).unwrap();
        assert_eq!(report.verdict, IntegrityVerdict::Pass);
        assert!(report.summary.contains("Quality: 85/100"));
        assert!(report.summary.contains("Plagiarism: 4%"));
    }
}
