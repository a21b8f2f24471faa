use claim_ledger::merkle::{hash_leaf, hash_pair};

use crate::allocation::{Allocation, CommitmentError};

/// Binary hash tree over a committed allocation list.
///
/// Level 0 holds the leaf hashes in index order; each higher level pairs
/// adjacent nodes with [`hash_pair`], duplicating the last node of an odd
/// level, until a single root remains. Because the builder keeps every
/// level, producing a proof is a walk rather than a recomputation.
#[derive(Debug, Clone)]
pub struct CommitmentTree {
    levels: Vec<Vec<[u8; 32]>>,
}

impl CommitmentTree {
    /// Validates the allocation list and builds the full tree.
    ///
    /// The input does not need to be sorted; leaves are placed by their
    /// committed index, so any permutation of the same allocations yields
    /// the same root.
    pub fn build(allocations: &[Allocation]) -> Result<Self, CommitmentError> {
        Allocation::validate(allocations)?;

        let mut leaves = vec![[0u8; 32]; allocations.len()];
        for allocation in allocations {
            leaves[allocation.index as usize] =
                hash_leaf(allocation.index, &allocation.recipient, allocation.amount);
        }

        let mut levels = vec![leaves];
        while levels.last().unwrap().len() > 1 {
            let prev = levels.last().unwrap();
            let mut next = Vec::with_capacity(prev.len().div_ceil(2));
            for pair in prev.chunks(2) {
                let left = &pair[0];
                // Odd node at the end of a level is paired with itself
                let right = pair.get(1).unwrap_or(left);
                next.push(hash_pair(left, right));
            }
            levels.push(next);
        }

        Ok(CommitmentTree { levels })
    }

    /// The committed root digest.
    pub fn root(&self) -> [u8; 32] {
        self.levels.last().unwrap()[0]
    }

    /// Leaf hashes in index order.
    pub fn leaves(&self) -> &[[u8; 32]] {
        &self.levels[0]
    }

    /// Number of committed allocations.
    pub fn num_leaves(&self) -> u64 {
        self.levels[0].len() as u64
    }

    /// Minimal sibling path for the leaf at `index`, ordered leaf to root.
    /// For a tree of N leaves the path has ceil(log2(N)) entries.
    pub fn proof_for(&self, index: u64) -> Result<Vec<[u8; 32]>, CommitmentError> {
        if index >= self.num_leaves() {
            return Err(CommitmentError::IndexOutOfRange {
                index,
                num_leaves: self.num_leaves(),
            });
        }

        let mut proof = Vec::with_capacity(self.levels.len() - 1);
        let mut position = index as usize;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = if position % 2 == 0 {
                // Left child: sibling is the right neighbor, or the node
                // itself at the odd end of a level
                *level.get(position + 1).unwrap_or(&level[position])
            } else {
                level[position - 1]
            };
            proof.push(sibling);
            position /= 2;
        }
        Ok(proof)
    }
}
