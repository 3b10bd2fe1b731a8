use ethereum_types::H256;
use tiny_keccak::{Hasher, Keccak};

pub struct Sha3Algorithm {}

impl Sha3Algorithm {
    /// Keccak-256 digest of a raw byte sequence. Used both for chunk
    /// leaves and for degenerate (empty-input) roots.
    pub fn leaf(data: &[u8]) -> H256 {
        let mut h = Keccak::v256();
        let mut e = H256::zero();
        h.update(data);
        h.finalize(e.as_mut());
        e
    }

    /// Derives a parent digest from two sibling digests.
    ///
    /// The pair is sorted byte-wise before hashing, so the result does not
    /// depend on which sibling was the left child. Verifiers must apply
    /// the same rule when recomputing a root from a proof.
    pub fn parent(a: &H256, b: &H256) -> H256 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let mut h = Keccak::v256();
        let mut e = H256::zero();
        h.update(lo.as_ref());
        h.update(hi.as_ref());
        h.finalize(e.as_mut());
        e
    }
}
