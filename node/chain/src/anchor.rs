use crate::contracts::{decode_event, MintoraAnchor, ResearchRegisteredFilter};
use crate::{connect, ChainConfig, MintoraMiddleware};
use anyhow::{anyhow, Result};
use chunked_merkle::ChunkProof;
use contract_wrapper::{submit_with_retry, SubmitConfig, TxConfirmation};
use ethereum_types::{Address, H256, U256};
use shared_types::{DataRoot, ResearchId, ResearchRecord};
use std::sync::Arc;
use tracing::info;

/// Client for the research anchor contract: registers Merkle roots,
/// attaches analysis attestations and answers lookups.
pub struct AnchorClient {
    contract: MintoraAnchor<MintoraMiddleware>,
    middleware: Arc<MintoraMiddleware>,
    submit_config: SubmitConfig,
}

impl AnchorClient {
    pub async fn new(config: &ChainConfig) -> Result<Self> {
        let middleware = connect(config).await?;
        Ok(Self {
            contract: MintoraAnchor::new(config.anchor_address, middleware.clone()),
            middleware,
            submit_config: config.submit_config,
        })
    }

    /// Anchors a research upload on chain and returns the id the contract
    /// assigned to it.
    pub async fn register_research(
        &self,
        merkle_root: DataRoot,
        cid: &str,
        researcher: Address,
    ) -> Result<(ResearchId, TxConfirmation)> {
        let call =
            self.contract
                .register_research(merkle_root.to_fixed_bytes(), cid.to_string(), researcher);
        let receipt = submit_with_retry(call, &self.submit_config, self.middleware.clone()).await?;
        let confirmation = TxConfirmation::from_receipt(&receipt)?;

        let event: ResearchRegisteredFilter = decode_event(&receipt)
            .ok_or_else(|| anyhow!("receipt is missing the ResearchRegistered event"))?;
        let research_id = event.research_id.as_u64();
        info!(
            research_id,
            cid,
            ?merkle_root,
            tx_hash = ?confirmation.tx_hash,
            "Research registered"
        );
        Ok((research_id, confirmation))
    }

    /// Records an analysis attestation next to a registered research entry.
    pub async fn attach_analysis(
        &self,
        research_id: ResearchId,
        analysis_hash: H256,
        quality_score: u64,
    ) -> Result<TxConfirmation> {
        let call = self.contract.attach_analysis(
            U256::from(research_id),
            analysis_hash.to_fixed_bytes(),
            U256::from(quality_score),
        );
        let receipt = submit_with_retry(call, &self.submit_config, self.middleware.clone()).await?;
        let confirmation = TxConfirmation::from_receipt(&receipt)?;
        info!(research_id, ?analysis_hash, quality_score, "Analysis attached");
        Ok(confirmation)
    }

    pub async fn get_research(&self, research_id: ResearchId) -> Result<ResearchRecord> {
        let (merkle_root, cid, researcher, timestamp, verified, analysis_hash, quality_score) =
            self.contract
                .get_research(U256::from(research_id))
                .call()
                .await?;
        Ok(ResearchRecord {
            merkle_root: H256(merkle_root),
            cid,
            researcher,
            timestamp: timestamp.as_u64(),
            verified,
            analysis_hash: H256(analysis_hash),
            quality_score: quality_score.as_u64(),
        })
    }

    pub async fn get_researcher_ids(&self, researcher: Address) -> Result<Vec<ResearchId>> {
        let ids = self.contract.get_researcher_ids(researcher).call().await?;
        Ok(ids.into_iter().map(|id| id.as_u64()).collect())
    }

    /// Asks the contract to check a chunk proof against the anchored root.
    /// The proof layout matches `chunked_merkle`: sibling digests bottom-up,
    /// sorted-pair hashing on both sides.
    pub async fn verify_chunk_proof(
        &self,
        research_id: ResearchId,
        proof: &ChunkProof,
        leaf: H256,
    ) -> Result<bool> {
        let lemma = proof
            .lemma()
            .iter()
            .map(|digest| digest.to_fixed_bytes())
            .collect::<Vec<_>>();
        Ok(self
            .contract
            .verify_merkle_proof(U256::from(research_id), lemma, leaf.to_fixed_bytes())
            .call()
            .await?)
    }

    pub async fn research_count(&self) -> Result<u64> {
        Ok(self.contract.research_count().call().await?.as_u64())
    }
}
