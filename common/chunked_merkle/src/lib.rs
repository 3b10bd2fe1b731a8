//! Content-addressed chunking and Merkle commitments for uploaded data.
//!
//! An input byte sequence is split into [`CHUNK_SIZE`] chunks, each chunk is
//! hashed with Keccak-256, and a binary Merkle tree is built over the chunk
//! digests with a sorted-pair combination rule. The root is what gets
//! anchored on chain; [`ChunkProof`]s let a verifier check that a single
//! chunk belongs to an anchored root without re-hashing the whole input.
//!
//! All operations are pure: same input, same output, no state kept across
//! calls.

mod proof;
mod sha3;

pub use proof::ChunkProof;
pub use sha3::Sha3Algorithm;

use ethereum_types::H256;

/// Maximum number of input bytes committed per leaf. Changing this changes
/// every derived root and proof, so it must stay fixed for compatibility
/// with previously anchored roots.
pub const CHUNK_SIZE: usize = 1024;

/// Root digest of a committed byte sequence.
pub type DataRoot = H256;

/// Number of chunks the input splits into. Zero for empty input.
pub fn num_chunks(data_len: usize) -> usize {
    data_len.div_ceil(CHUNK_SIZE)
}

/// Keccak-256 digest of every chunk, in input order (the tree's leaf level).
pub fn leaf_hashes(data: &[u8]) -> Vec<H256> {
    data.chunks(CHUNK_SIZE).map(Sha3Algorithm::leaf).collect()
}

/// Reduces one tree level to the next: adjacent digests are paired left to
/// right and combined; a trailing unpaired digest is carried up unchanged.
fn reduce_level(level: &[H256]) -> Vec<H256> {
    let mut parents = Vec::with_capacity(level.len().div_ceil(2));
    let mut iter = level.chunks_exact(2);
    while let Some([left, right]) = iter.next() {
        parents.push(Sha3Algorithm::parent(left, right));
    }
    if let [last] = iter.remainder() {
        parents.push(*last);
    }
    parents
}

/// Computes the Merkle root committing to `data`.
///
/// Empty input degenerates to the digest of the raw (empty) input; a single
/// chunk degenerates to that chunk's digest.
pub fn compute_root(data: &[u8]) -> DataRoot {
    let mut level = leaf_hashes(data);
    if level.is_empty() {
        return Sha3Algorithm::leaf(data);
    }
    while level.len() > 1 {
        level = reduce_level(&level);
    }
    level[0]
}

/// Computes the inclusion proof for the chunk at `chunk_index`.
///
/// An index at or beyond the chunk count yields an empty proof rather than
/// an error, matching the anchored-root verification flow where absent
/// chunks simply have nothing to prove. Callers that must distinguish "no
/// siblings" from "no such chunk" check [`num_chunks`] first.
pub fn compute_proof(data: &[u8], chunk_index: usize) -> ChunkProof {
    let mut level = leaf_hashes(data);
    if chunk_index >= level.len() {
        return ChunkProof::new_empty();
    }

    let mut lemma = Vec::new();
    let mut index = chunk_index;
    while level.len() > 1 {
        let sibling = if index % 2 == 0 { index + 1 } else { index - 1 };
        if sibling < level.len() {
            lemma.push(level[sibling]);
        }
        level = reduce_level(&level);
        index /= 2;
    }
    ChunkProof::new(lemma)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn root_is_deterministic() {
        let data = bytes(3 * CHUNK_SIZE + 17);
        assert_eq!(compute_root(&data), compute_root(&data));
        assert_ne!(compute_root(&data), compute_root(&data[1..]));
    }

    #[test]
    fn empty_input_root_is_hash_of_empty() {
        assert_eq!(compute_root(b""), Sha3Algorithm::leaf(b""));
        assert_eq!(num_chunks(0), 0);
        assert!(compute_proof(b"", 0).is_empty());
        assert!(compute_proof(b"", 7).is_empty());
    }

    #[test]
    fn single_chunk_root_is_leaf_hash() {
        for len in [1, 100, CHUNK_SIZE] {
            let data = bytes(len);
            assert_eq!(num_chunks(len), 1);
            assert_eq!(compute_root(&data), Sha3Algorithm::leaf(&data));
            // The only leaf is the root, so its proof has no siblings.
            let proof = compute_proof(&data, 0);
            assert!(proof.is_empty());
            proof
                .validate(&Sha3Algorithm::leaf(&data), &compute_root(&data))
                .unwrap();
        }
    }

    #[test]
    fn pair_combination_is_order_independent() {
        let a = Sha3Algorithm::leaf(b"a");
        let b = Sha3Algorithm::leaf(b"b");
        assert_eq!(Sha3Algorithm::parent(&a, &b), Sha3Algorithm::parent(&b, &a));
        // Equal siblings are a valid (if improbable) pair.
        assert_eq!(Sha3Algorithm::parent(&a, &a), Sha3Algorithm::parent(&a, &a));
    }

    #[test]
    fn three_chunk_tree_shape() {
        // 2500 bytes of 0x41: chunks of 1024, 1024 and 452 bytes.
        let data = vec![0x41_u8; 2500];
        let leaves = leaf_hashes(&data);
        assert_eq!(leaves.len(), 3);
        assert_eq!(num_chunks(data.len()), 3);

        // Level 1 pairs chunks 0/1 and carries chunk 2 up unchanged.
        let combined = Sha3Algorithm::parent(&leaves[0], &leaves[1]);
        let root = Sha3Algorithm::parent(&combined, &leaves[2]);
        assert_eq!(compute_root(&data), root);

        // Chunk 2 pairs with nothing at the leaf level, so its proof is
        // just the combined digest of chunks 0/1.
        let proof2 = compute_proof(&data, 2);
        assert_eq!(proof2.lemma(), &[combined]);
        proof2.validate(&leaves[2], &root).unwrap();

        // Chunk 0 needs its leaf sibling and then the carried chunk-2 digest.
        let proof0 = compute_proof(&data, 0);
        assert_eq!(proof0.lemma(), &[leaves[1], leaves[2]]);
        proof0.validate(&leaves[0], &root).unwrap();
    }

    #[test]
    fn proofs_round_trip_for_every_chunk() {
        for len in [
            1,
            CHUNK_SIZE - 1,
            CHUNK_SIZE + 1,
            2 * CHUNK_SIZE,
            5 * CHUNK_SIZE + 3,
            8 * CHUNK_SIZE,
            11 * CHUNK_SIZE + 512,
        ] {
            let data = bytes(len);
            let root = compute_root(&data);
            let leaves = leaf_hashes(&data);
            for (index, leaf) in leaves.iter().enumerate() {
                let proof = compute_proof(&data, index);
                proof
                    .validate(leaf, &root)
                    .unwrap_or_else(|e| panic!("len {} chunk {}: {}", len, index, e));
            }
        }
    }

    #[test]
    fn out_of_range_index_yields_empty_proof() {
        let data = bytes(2 * CHUNK_SIZE + 9);
        assert_eq!(num_chunks(data.len()), 3);
        assert!(compute_proof(&data, 3).is_empty());
        assert!(compute_proof(&data, usize::MAX).is_empty());
    }

    #[test]
    fn validate_rejects_wrong_leaf_and_wrong_root() {
        let data = bytes(4 * CHUNK_SIZE);
        let root = compute_root(&data);
        let leaves = leaf_hashes(&data);
        let proof = compute_proof(&data, 1);

        proof.validate(&leaves[1], &root).unwrap();
        assert!(proof.validate(&leaves[0], &root).is_err());
        assert!(proof.validate(&leaves[1], &H256::zero()).is_err());
    }

    #[test]
    fn proof_length_matches_tree_height() {
        // A full binary tree over 8 chunks has 3 levels above the leaves.
        let data = bytes(8 * CHUNK_SIZE);
        for index in 0..8 {
            assert_eq!(compute_proof(&data, index).len(), 3);
        }
    }

    #[test]
    fn proof_serializes_round_trip() {
        let data = bytes(3 * CHUNK_SIZE);
        let proof = compute_proof(&data, 1);
        let encoded = serde_json::to_string(&proof).unwrap();
        let decoded: ChunkProof = serde_json::from_str(&encoded).unwrap();
        assert_eq!(proof, decoded);
    }
}
