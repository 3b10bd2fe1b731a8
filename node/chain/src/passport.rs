use crate::contracts::{decode_event, MintoraPassport, PassportMintedFilter};
use crate::{connect, ChainConfig, MintoraMiddleware};
use anyhow::{anyhow, Result};
use contract_wrapper::{submit_with_retry, SubmitConfig, TxConfirmation};
use ethereum_types::{Address, U256};
use shared_types::{PassportData, ResearchId, TokenId};
use std::sync::Arc;
use tracing::info;

/// Gas limit for gasless mints, matching what the deployed contract needs.
const MINT_GAS_LIMIT: u64 = 500_000;

/// Client for the research passport token contract. The backend wallet
/// pays gas; the recipient only receives the token.
pub struct PassportClient {
    contract: MintoraPassport<MintoraMiddleware>,
    middleware: Arc<MintoraMiddleware>,
    submit_config: SubmitConfig,
}

impl PassportClient {
    pub async fn new(config: &ChainConfig) -> Result<Self> {
        let middleware = connect(config).await?;
        Ok(Self {
            contract: MintoraPassport::new(config.passport_address, middleware.clone()),
            middleware,
            submit_config: config.submit_config,
        })
    }

    pub async fn mint_passport(
        &self,
        to: Address,
        research_id: ResearchId,
        token_uri: &str,
    ) -> Result<(TokenId, TxConfirmation)> {
        let call = self
            .contract
            .mint_research_passport(to, U256::from(research_id), token_uri.to_string())
            .gas(MINT_GAS_LIMIT);
        let receipt = submit_with_retry(call, &self.submit_config, self.middleware.clone()).await?;
        let confirmation = TxConfirmation::from_receipt(&receipt)?;

        let event: PassportMintedFilter = decode_event(&receipt)
            .ok_or_else(|| anyhow!("receipt is missing the PassportMinted event"))?;
        let token_id = event.token_id.as_u64();
        info!(token_id, research_id, owner = ?to, "Passport minted");
        Ok((token_id, confirmation))
    }

    pub async fn update_passport_data(
        &self,
        token_id: TokenId,
        quality_score: u64,
        is_verified: bool,
    ) -> Result<TxConfirmation> {
        let call = self.contract.update_passport_data(
            U256::from(token_id),
            U256::from(quality_score),
            is_verified,
        );
        let receipt = submit_with_retry(call, &self.submit_config, self.middleware.clone()).await?;
        Ok(TxConfirmation::from_receipt(&receipt)?)
    }

    pub async fn owned_tokens(&self, owner: Address) -> Result<Vec<TokenId>> {
        let tokens = self.contract.get_owned_tokens(owner).call().await?;
        Ok(tokens.into_iter().map(|id| id.as_u64()).collect())
    }

    pub async fn passport_data(&self, token_id: TokenId) -> Result<PassportData> {
        let (research_id, mint_timestamp, quality_score, is_verified) = self
            .contract
            .passport_data(U256::from(token_id))
            .call()
            .await?;
        Ok(PassportData {
            research_id: research_id.as_u64(),
            mint_timestamp: mint_timestamp.as_u64(),
            quality_score: quality_score.as_u64(),
            is_verified,
        })
    }

    pub async fn token_uri(&self, token_id: TokenId) -> Result<String> {
        Ok(self.contract.token_uri(U256::from(token_id)).call().await?)
    }

    pub async fn owner_of(&self, token_id: TokenId) -> Result<Address> {
        Ok(self.contract.owner_of(U256::from(token_id)).call().await?)
    }
}
