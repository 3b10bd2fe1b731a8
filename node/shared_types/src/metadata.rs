use crate::{AnalysisReport, ResearchId};
use ethereum_types::Address;
use serde_json::{json, Value};

/// Builds the ERC-721 metadata document for a research passport token.
pub fn passport_metadata(
    research_id: ResearchId,
    cid: &str,
    analysis: &AnalysisReport,
    researcher: Address,
) -> Value {
    json!({
        "name": format!("Mintora Research Passport #{}", research_id),
        "description": "Verified research credential on Mintora Protocol",
        "image": format!("https://api.mintora.io/passport-image/{}", research_id),
        "external_url": format!("https://mintora.io/research/{}", research_id),
        "attributes": [
            { "trait_type": "Research ID", "value": research_id.to_string() },
            { "trait_type": "IPFS CID", "value": cid },
            { "trait_type": "Quality Score", "value": analysis.quality_score.to_string() },
            { "trait_type": "Plagiarism Check", "value": format!("{}%", analysis.plagiarism_percentage) },
            { "trait_type": "Verification Status", "value": analysis.verdict },
            { "trait_type": "Researcher", "value": format!("{:?}", researcher) },
            { "trait_type": "Platform", "value": "Mintora Protocol" },
            { "trait_type": "Network", "value": "Polygon Amoy" },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IntegrityVerdict;
    use ethereum_types::H256;

    #[test]
    fn metadata_carries_analysis_attributes() {
        let analysis = AnalysisReport {
            quality_score: 88,
            plagiarism_percentage: 3,
            verdict: IntegrityVerdict::Pass,
            attestation_hash: H256::repeat_byte(1),
            summary: String::new(),
        };
        let meta = passport_metadata(7, "QmAbc", &analysis, Address::repeat_byte(0x11));

        assert_eq!(meta["name"], "Mintora Research Passport #7");
        let attributes = meta["attributes"].as_array().unwrap();
        assert_eq!(attributes.len(), 8);
        assert!(attributes
            .iter()
            .any(|a| a["trait_type"] == "IPFS CID" && a["value"] == "QmAbc"));
        assert!(attributes
            .iter()
            .any(|a| a["trait_type"] == "Verification Status" && a["value"] == "PASS"));
        assert!(attributes
            .iter()
            .any(|a| a["trait_type"] == "Plagiarism Check" && a["value"] == "3%"));
    }
}
