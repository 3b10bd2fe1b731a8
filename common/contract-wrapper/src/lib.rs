//! Submits contract calls and awaits their confirmation, with bounded
//! retries and a gas-price bump for mempool/timeout stalls.

use ethereum_types::H256;
use ethers::{
    abi::Detokenize,
    contract::ContractCall,
    providers::{Middleware, ProviderError},
    types::{TransactionReceipt, U256},
};
use serde::Deserialize;
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info};

/// A mined, confirmed transaction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TxConfirmation {
    pub tx_hash: H256,
    pub block_number: u64,
}

impl TxConfirmation {
    pub fn from_receipt(receipt: &TransactionReceipt) -> Result<Self, SubmitError> {
        let tx_hash = receipt.transaction_hash;
        let block_number = receipt
            .block_number
            .ok_or(SubmitError::MalformedReceipt { tx_hash })?;
        Ok(Self {
            tx_hash,
            block_number: block_number.as_u64(),
        })
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// The node rejected the transaction outright.
    #[error("transaction rejected: {0}")]
    Rejected(String),
    /// The configured gas price ceiling was reached while bumping.
    #[error("exceeded max gas price {max_gas_price} while retrying: {reason}")]
    GasPriceExceeded { max_gas_price: U256, reason: String },
    /// The transaction stalled in the mempool and no ceiling was configured
    /// to bump against.
    #[error("mempool/timeout stall with no max gas price configured: {0}")]
    Stalled(String),
    /// Retries for non-gas failures were exhausted.
    #[error("exceeded {retries} submission retries")]
    RetriesExhausted { retries: usize },
    /// The provider failed before a transaction could be sent.
    #[error("provider error: {0}")]
    Provider(String),
    /// A receipt arrived without the fields a confirmation needs.
    #[error("malformed receipt for tx {tx_hash}: missing block number")]
    MalformedReceipt { tx_hash: H256 },
}

/// The result of a single submission attempt.
#[derive(Debug)]
enum SubmissionAction {
    Success(TransactionReceipt),
    /// Retryable failure, with the reason kept so the retry loop can tell
    /// mempool/timeout stalls (gas bump) from other transient errors.
    Retry(String),
    Error(String),
}

/// Retry and gas parameters for transaction submission.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct SubmitConfig {
    /// Gas price for the first attempt; fetched from the network if `None`.
    pub initial_gas_price: Option<U256>,
    /// Ceiling for bumped gas prices. If `None`, mempool/timeout stalls are
    /// not retried with a higher price.
    pub max_gas_price: Option<U256>,
    /// Gas limit applied to every attempt.
    pub max_gas: Option<U256>,
    /// Numerator of the bump factor over 10, e.g. 11 => +10% per bump.
    pub gas_increase_factor: Option<u64>,
    /// Cap on retries for failures that are not gas related.
    pub max_retries: Option<usize>,
    /// Seconds to wait between attempts.
    pub interval_secs: Option<u64>,
}

const DEFAULT_INTERVAL_SECS: u64 = 2;
const DEFAULT_MAX_RETRIES: usize = 5;

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            initial_gas_price: None,
            max_gas_price: None,
            max_gas: None,
            gas_increase_factor: Some(11),
            max_retries: Some(DEFAULT_MAX_RETRIES),
            interval_secs: Some(DEFAULT_INTERVAL_SECS),
        }
    }
}

fn is_mempool_or_timeout_error(error_str: &str) -> bool {
    let lower = error_str.to_lowercase();
    lower.contains("mempool") || lower.contains("timeout")
}

/// Performs a single submission attempt: sends the transaction, awaits the
/// receipt and classifies the outcome.
async fn submit_once<M, T>(call: ContractCall<M, T>) -> SubmissionAction
where
    M: Middleware + 'static,
    T: Detokenize,
{
    let pending_tx = match call.send().await {
        Ok(tx) => tx,
        Err(e) => {
            let msg = e.to_string();
            if is_mempool_or_timeout_error(&msg) {
                return SubmissionAction::Retry(format!("mempool/timeout: {:?}", e));
            }
            debug!("Error sending transaction: {:?}", msg);
            return SubmissionAction::Error(msg);
        }
    };

    debug!("Signed tx hash: {:?}", pending_tx.tx_hash());

    match pending_tx.await {
        Ok(Some(receipt)) => {
            info!(
                tx_hash = ?receipt.transaction_hash,
                block = ?receipt.block_number,
                "Transaction mined"
            );
            SubmissionAction::Success(receipt)
        }
        Ok(None) => {
            debug!("Transaction probably timed out; retrying");
            SubmissionAction::Retry("timeout, receipt is none".to_string())
        }
        Err(ProviderError::HTTPError(e)) => {
            debug!("HTTP error retrieving receipt: {:?}", e);
            SubmissionAction::Retry(format!("http error: {:?}", e))
        }
        Err(e) => SubmissionAction::Error(format!("transaction unrecoverable: {:?}", e)),
    }
}

/// Increase gas price using integer arithmetic: (gp * factor_num) / factor_den
fn increase_gas_price_u256(gp: U256, factor_num: u64, factor_den: u64) -> U256 {
    let num = U256::from(factor_num);
    let den = U256::from(factor_den);
    gp.checked_mul(num).unwrap_or(U256::MAX) / den
}

/// Wraps [`submit_once`] in a gas-price-adjustment loop: mempool/timeout
/// stalls bump the gas price up to `max_gas_price`, other retryable
/// failures are re-attempted up to `max_retries` times at the same price.
///
/// Returns the full receipt so callers can decode emitted events; use
/// [`TxConfirmation::from_receipt`] for the mined-transaction summary.
pub async fn submit_with_retry<M, T>(
    mut call: ContractCall<M, T>,
    config: &SubmitConfig,
    middleware: Arc<M>,
) -> Result<TransactionReceipt, SubmitError>
where
    M: Middleware + 'static,
    T: Detokenize,
{
    if let Some(max_gas) = config.max_gas {
        call = call.gas(max_gas);
    }
    let mut gas_price = if let Some(gp) = config.initial_gas_price {
        gp
    } else {
        middleware
            .get_gas_price()
            .await
            .map_err(|e| SubmitError::Provider(format!("failed to fetch gas price: {:?}", e)))?
    };

    let factor_num = config.gas_increase_factor.unwrap_or(11);
    let factor_den = 10_u64;

    let mut non_gas_retries = 0;
    let max_retries = config.max_retries.unwrap_or(DEFAULT_MAX_RETRIES);

    loop {
        call = call.gas_price(gas_price);

        match submit_once(call.clone()).await {
            SubmissionAction::Success(receipt) => {
                return Ok(receipt);
            }
            SubmissionAction::Retry(reason) => {
                if is_mempool_or_timeout_error(&reason) {
                    let Some(max_gp) = config.max_gas_price else {
                        return Err(SubmitError::Stalled(reason));
                    };
                    if gas_price >= max_gp {
                        return Err(SubmitError::GasPriceExceeded {
                            max_gas_price: max_gp,
                            reason,
                        });
                    }
                    let new_price = increase_gas_price_u256(gas_price, factor_num, factor_den);
                    gas_price = std::cmp::min(new_price, max_gp);
                    debug!("Bumping gas price to {}", gas_price);
                } else {
                    non_gas_retries += 1;
                    if non_gas_retries > max_retries {
                        return Err(SubmitError::RetriesExhausted {
                            retries: max_retries,
                        });
                    }
                    debug!(
                        "Non-gas retry #{} (same gas price: {})",
                        non_gas_retries, gas_price
                    );
                }
            }
            SubmissionAction::Error(e) => {
                return Err(SubmitError::Rejected(e));
            }
        }

        sleep(Duration::from_secs(
            config.interval_secs.unwrap_or(DEFAULT_INTERVAL_SECS),
        ))
        .await;
    }
}
