use crate::contracts::{decode_event, ListedFilter, MintoraMarketplace};
use crate::{connect, ChainConfig, MintoraMiddleware};
use anyhow::{anyhow, Result};
use contract_wrapper::{submit_with_retry, SubmitConfig, TxConfirmation};
use ethereum_types::{Address, U256};
use shared_types::{Listing, ListingId, TokenId};
use std::sync::Arc;
use tracing::info;

/// Client for the passport marketplace contract.
pub struct MarketplaceClient {
    contract: MintoraMarketplace<MintoraMiddleware>,
    middleware: Arc<MintoraMiddleware>,
    submit_config: SubmitConfig,
}

impl MarketplaceClient {
    pub async fn new(config: &ChainConfig) -> Result<Self> {
        let middleware = connect(config).await?;
        Ok(Self {
            contract: MintoraMarketplace::new(config.marketplace_address, middleware.clone()),
            middleware,
            submit_config: config.submit_config,
        })
    }

    /// Lists a token for sale at `price` wei.
    pub async fn list_nft(
        &self,
        nft_contract: Address,
        token_id: TokenId,
        price: U256,
    ) -> Result<(ListingId, TxConfirmation)> {
        let call = self
            .contract
            .list_nft(nft_contract, U256::from(token_id), price);
        let receipt = submit_with_retry(call, &self.submit_config, self.middleware.clone()).await?;
        let confirmation = TxConfirmation::from_receipt(&receipt)?;

        let event: ListedFilter =
            decode_event(&receipt).ok_or_else(|| anyhow!("receipt is missing the Listed event"))?;
        let listing_id = event.listing_id.as_u64();
        info!(listing_id, token_id, %price, "Token listed");
        Ok((listing_id, confirmation))
    }

    /// Buys a listing, sending the asking price as transaction value.
    pub async fn buy_nft(&self, listing_id: ListingId, price: U256) -> Result<TxConfirmation> {
        let call = self.contract.buy_nft(U256::from(listing_id)).value(price);
        let receipt = submit_with_retry(call, &self.submit_config, self.middleware.clone()).await?;
        let confirmation = TxConfirmation::from_receipt(&receipt)?;
        info!(listing_id, %price, "Listing bought");
        Ok(confirmation)
    }

    pub async fn cancel_listing(&self, listing_id: ListingId) -> Result<TxConfirmation> {
        let call = self.contract.cancel_listing(U256::from(listing_id));
        let receipt = submit_with_retry(call, &self.submit_config, self.middleware.clone()).await?;
        Ok(TxConfirmation::from_receipt(&receipt)?)
    }

    pub async fn update_price(
        &self,
        listing_id: ListingId,
        new_price: U256,
    ) -> Result<TxConfirmation> {
        let call = self
            .contract
            .update_price(U256::from(listing_id), new_price);
        let receipt = submit_with_retry(call, &self.submit_config, self.middleware.clone()).await?;
        Ok(TxConfirmation::from_receipt(&receipt)?)
    }

    /// All currently active listings. Listing ids are one-based positions
    /// in the contract's listing table.
    pub async fn active_listings(&self) -> Result<Vec<Listing>> {
        let listings = self.contract.get_active_listings().call().await?;
        Ok(listings
            .into_iter()
            .enumerate()
            .map(|(index, (seller, nft_contract, token_id, price, active))| Listing {
                listing_id: index as u64 + 1,
                seller,
                nft_contract,
                token_id: token_id.as_u64(),
                price,
                active,
            })
            .collect())
    }

    pub async fn listing(&self, listing_id: ListingId) -> Result<Listing> {
        let (seller, nft_contract, token_id, price, active) = self
            .contract
            .listings(U256::from(listing_id))
            .call()
            .await?;
        Ok(Listing {
            listing_id,
            seller,
            nft_contract,
            token_id: token_id.as_u64(),
            price,
            active,
        })
    }

    pub async fn listing_count(&self) -> Result<u64> {
        Ok(self.contract.listing_count().call().await?.as_u64())
    }
}
