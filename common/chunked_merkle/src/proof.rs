use crate::sha3::Sha3Algorithm;
use anyhow::{bail, Result};
use ethereum_types::H256;
use serde::{Deserialize, Serialize};

/// Inclusion proof for one chunk of a committed byte sequence.
///
/// `lemma` holds the sibling digests from the leaf level upward. Since
/// parents hash the sorted pair of their children, the proof carries no
/// left/right path bits, and a level where the target node had no sibling
/// (trailing odd entry carried up unchanged) contributes no entry.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct ChunkProof {
    lemma: Vec<H256>,
}

impl ChunkProof {
    pub fn new(lemma: Vec<H256>) -> Self {
        Self { lemma }
    }

    /// An empty proof is returned for out-of-range chunk indexes and is
    /// the valid proof for zero- and single-chunk inputs.
    pub fn new_empty() -> Self {
        Self { lemma: vec![] }
    }

    pub fn is_empty(&self) -> bool {
        self.lemma.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lemma.len()
    }

    /// Sibling digests, ordered from the leaf level to just below the root.
    pub fn lemma(&self) -> &[H256] {
        &self.lemma
    }

    /// Recomputes the root implied by this proof for the given leaf digest.
    pub fn root_from(&self, leaf: &H256) -> H256 {
        self.lemma
            .iter()
            .fold(*leaf, |node, sibling| Sha3Algorithm::parent(&node, sibling))
    }

    /// Checks that this proof connects `leaf` to `root`.
    pub fn validate(&self, leaf: &H256, root: &H256) -> Result<()> {
        let computed = self.root_from(leaf);
        if computed != *root {
            bail!(
                "invalid chunk proof: computed root {:?} does not match {:?}",
                computed,
                root
            );
        }
        Ok(())
    }
}
