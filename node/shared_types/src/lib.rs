//! Domain types shared across the Mintora node crates.

mod analysis;
mod metadata;

pub use analysis::{AnalysisReport, Attestation, IntegrityVerdict};
pub use metadata::passport_metadata;

use ethereum_types::{Address, H256, U256};
use serde::{Deserialize, Serialize};

pub use chunked_merkle::DataRoot;

pub type ResearchId = u64;
pub type TokenId = u64;
pub type ListingId = u64;

/// Marketplace platform fee, in basis points (2.5%).
pub const PLATFORM_FEE_BPS: u64 = 250;
/// Creator royalty, in basis points (5%).
pub const ROYALTY_FEE_BPS: u64 = 500;

/// Result of storing a piece of content: its content reference, the Merkle
/// root that gets anchored on chain, and the raw size in bytes.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct UploadResult {
    pub cid: String,
    pub data_root: DataRoot,
    pub size: usize,
}

/// One registered research entry, as recorded by the anchor contract.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct ResearchRecord {
    pub merkle_root: DataRoot,
    pub cid: String,
    pub researcher: Address,
    pub timestamp: u64,
    pub verified: bool,
    pub analysis_hash: H256,
    pub quality_score: u64,
}

/// Per-token state kept by the passport contract.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct PassportData {
    pub research_id: ResearchId,
    pub mint_timestamp: u64,
    pub quality_score: u64,
    pub is_verified: bool,
}

/// A marketplace listing. Prices are kept in wei.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Listing {
    pub listing_id: ListingId,
    pub seller: Address,
    pub nft_contract: Address,
    pub token_id: TokenId,
    pub price: U256,
    pub active: bool,
}
