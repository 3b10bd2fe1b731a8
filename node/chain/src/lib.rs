//! Typed clients for the Mintora contracts: research anchoring, passport
//! minting and the marketplace. Each write goes through
//! `contract_wrapper::submit_with_retry` and returns the domain result
//! together with a [`TxConfirmation`].

mod anchor;
mod config;
mod contracts;
mod marketplace;
mod passport;

pub use anchor::AnchorClient;
pub use config::{ChainConfig, ConfigError};
pub use marketplace::MarketplaceClient;
pub use passport::PassportClient;

pub use contract_wrapper::{SubmitConfig, SubmitError, TxConfirmation};

use anyhow::Result;
use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::Signer,
};
use std::sync::Arc;
use tracing::debug;

/// Middleware every Mintora client signs and submits through.
pub type MintoraMiddleware = SignerMiddleware<Provider<Http>, ethers::signers::LocalWallet>;

/// Connects a signing middleware from the validated configuration. The
/// wallet's chain id is taken from the endpoint, not from configuration.
pub async fn connect(config: &ChainConfig) -> Result<Arc<MintoraMiddleware>> {
    let provider = Provider::<Http>::try_from(config.rpc_endpoint_url.as_str())?;
    let chain_id = provider.get_chainid().await?;
    debug!(endpoint = %config.rpc_endpoint_url, %chain_id, "Connected to RPC endpoint");
    let wallet = config.wallet.clone().with_chain_id(chain_id.as_u64());
    Ok(Arc::new(SignerMiddleware::new(provider, wallet)))
}
