//! Contract bindings, generated from the deployed Mintora ABIs.

use ethers::abi::RawLog;
use ethers::contract::EthLogDecode;
use ethers::prelude::abigen;
use ethers::types::TransactionReceipt;

abigen!(
    MintoraAnchor,
    r#"[
        struct Research { bytes32 merkleRoot; string cid; address researcher; uint256 timestamp; bool verified; bytes32 analysisHash; uint256 qualityScore }
        function registerResearch(bytes32 merkleRoot, string cid, address researcher) external returns (uint256)
        function attachAnalysis(uint256 researchId, bytes32 analysisHash, uint256 qualityScore) external
        function getResearch(uint256 researchId) external view returns (Research)
        function getResearcherIds(address researcher) external view returns (uint256[])
        function verifyMerkleProof(uint256 researchId, bytes32[] proof, bytes32 leaf) external view returns (bool)
        function researchCount() external view returns (uint256)
        event ResearchRegistered(uint256 indexed researchId, bytes32 merkleRoot, string cid, address indexed researcher, uint256 timestamp)
        event AnalysisAttached(uint256 indexed researchId, bytes32 analysisHash, uint256 qualityScore)
    ]"#
);

abigen!(
    MintoraPassport,
    r#"[
        function mintResearchPassport(address to, uint256 researchId, string uri) external returns (uint256)
        function updatePassportData(uint256 tokenId, uint256 qualityScore, bool isVerified) external
        function getOwnedTokens(address owner) external view returns (uint256[])
        function passportData(uint256 tokenId) external view returns (uint256 researchId, uint256 mintTimestamp, uint256 qualityScore, bool isVerified)
        function tokenURI(uint256 tokenId) external view returns (string)
        function ownerOf(uint256 tokenId) external view returns (address)
        function balanceOf(address owner) external view returns (uint256)
        event PassportMinted(uint256 indexed tokenId, address indexed owner, uint256 indexed researchId, string tokenURI)
    ]"#
);

abigen!(
    MintoraMarketplace,
    r#"[
        struct ListingInfo { address seller; address nftContract; uint256 tokenId; uint256 price; bool active }
        function listNFT(address nftContract, uint256 tokenId, uint256 price) external returns (uint256)
        function buyNFT(uint256 listingId) external payable
        function cancelListing(uint256 listingId) external
        function updatePrice(uint256 listingId, uint256 newPrice) external
        function getActiveListings() external view returns (ListingInfo[])
        function listings(uint256 listingId) external view returns (address seller, address nftContract, uint256 tokenId, uint256 price, bool active)
        function listingCount() external view returns (uint256)
        event Listed(uint256 indexed listingId, address indexed seller, address indexed nftContract, uint256 tokenId, uint256 price)
        event Sale(uint256 indexed listingId, address indexed buyer, address indexed seller, uint256 price)
    ]"#
);

/// Finds and decodes the first log in `receipt` that parses as `E`.
pub(crate) fn decode_event<E: EthLogDecode>(receipt: &TransactionReceipt) -> Option<E> {
    receipt.logs.iter().find_map(|log| {
        let raw = RawLog {
            topics: log.topics.clone(),
            data: log.data.to_vec(),
        };
        E::decode_log(&raw).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::abi::Token;
    use ethers::contract::EthEvent;
    use ethers::types::{Address, Log, H256, U256};

    fn address_topic(address: Address) -> H256 {
        let mut topic = H256::zero();
        topic.0[12..].copy_from_slice(address.as_bytes());
        topic
    }

    #[test]
    fn research_registered_event_decodes_from_receipt() {
        let researcher = Address::repeat_byte(0x22);
        let root = [0xab_u8; 32];

        let log = Log {
            topics: vec![
                ResearchRegisteredFilter::signature(),
                H256::from_low_u64_be(7),
                address_topic(researcher),
            ],
            data: ethers::abi::encode(&[
                Token::FixedBytes(root.to_vec()),
                Token::String("QmTest".to_string()),
                Token::Uint(U256::from(1_700_000_000_u64)),
            ])
            .into(),
            ..Default::default()
        };
        let receipt = TransactionReceipt {
            logs: vec![log],
            ..Default::default()
        };

        let event: ResearchRegisteredFilter = decode_event(&receipt).unwrap();
        assert_eq!(event.research_id, U256::from(7));
        assert_eq!(event.researcher, researcher);
        assert_eq!(event.merkle_root, root);
        assert_eq!(event.cid, "QmTest");

        // A receipt without a matching log decodes to nothing.
        let empty = TransactionReceipt::default();
        assert!(decode_event::<ResearchRegisteredFilter>(&empty).is_none());
    }
}
