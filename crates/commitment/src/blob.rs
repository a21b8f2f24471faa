use anchor_lang::prelude::Pubkey;
use serde::{Deserialize, Serialize};

use crate::allocation::{Allocation, CommitmentError};
use crate::tree::CommitmentTree;

/// Campaign-level metadata published alongside the per-recipient claims.
/// Digests are hex, account identifiers base58, timestamps Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobMetadata {
    pub root: String,
    pub token: String,
    pub total_amount: u64,
    pub claim_deadline: i64,
    pub unlock_timestamp: i64,
    pub created_at: i64,
}

/// One recipient's claim material: everything needed to call the claim
/// instruction. Proof entries are ordered leaf-to-root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimEntry {
    pub index: u64,
    pub account: String,
    pub amount: u64,
    pub proof: Vec<String>,
}

/// The commitment blob published to content-addressed storage. Recipients
/// fetch it by the handle recorded on-ledger and look up their own entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitmentBlob {
    pub metadata: BlobMetadata,
    pub claims: Vec<ClaimEntry>,
}

impl CommitmentBlob {
    /// Assembles the publishable blob from a built tree and its allocation
    /// list. The timestamps come from the caller because the ledger, not
    /// the builder, is the authority on creation time.
    pub fn assemble(
        tree: &CommitmentTree,
        allocations: &[Allocation],
        token: &Pubkey,
        claim_deadline: i64,
        unlock_timestamp: i64,
        created_at: i64,
    ) -> Result<Self, CommitmentError> {
        let total_amount = Allocation::total_amount(allocations)?;

        let mut claims = Vec::with_capacity(allocations.len());
        for allocation in allocations {
            let proof = tree.proof_for(allocation.index)?;
            claims.push(ClaimEntry {
                index: allocation.index,
                account: allocation.recipient.to_string(),
                amount: allocation.amount,
                proof: proof.iter().map(hex::encode).collect(),
            });
        }

        Ok(CommitmentBlob {
            metadata: BlobMetadata {
                root: hex::encode(tree.root()),
                token: token.to_string(),
                total_amount,
                claim_deadline,
                unlock_timestamp,
                created_at,
            },
            claims,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vec<Allocation> {
        (0..4u64)
            .map(|i| Allocation {
                index: i,
                recipient: Pubkey::new_from_array([i as u8 + 1; 32]),
                amount: (i + 1) * 100,
            })
            .collect()
    }

    #[test]
    fn blob_carries_every_allocation_and_the_total() {
        let allocations = fixture();
        let tree = CommitmentTree::build(&allocations).unwrap();
        let token = Pubkey::new_unique();
        let blob =
            CommitmentBlob::assemble(&tree, &allocations, &token, 2_000, 3_000, 1_000).unwrap();

        assert_eq!(blob.claims.len(), 4);
        assert_eq!(blob.metadata.total_amount, 1_000);
        assert_eq!(blob.metadata.root, hex::encode(tree.root()));
        assert_eq!(blob.metadata.token, token.to_string());
        for (entry, allocation) in blob.claims.iter().zip(&allocations) {
            assert_eq!(entry.index, allocation.index);
            assert_eq!(entry.amount, allocation.amount);
            assert_eq!(entry.account, allocation.recipient.to_string());
            assert_eq!(entry.proof.len(), 2);
        }
    }

    #[test]
    fn json_uses_the_published_field_names() {
        let allocations = fixture();
        let tree = CommitmentTree::build(&allocations).unwrap();
        let blob = CommitmentBlob::assemble(
            &tree,
            &allocations,
            &Pubkey::new_unique(),
            2_000,
            3_000,
            1_000,
        )
        .unwrap();

        let json = serde_json::to_string(&blob).unwrap();
        for field in [
            "\"metadata\"",
            "\"root\"",
            "\"token\"",
            "\"totalAmount\"",
            "\"claimDeadline\"",
            "\"unlockTimestamp\"",
            "\"createdAt\"",
            "\"claims\"",
            "\"account\"",
            "\"proof\"",
        ] {
            assert!(json.contains(field), "missing {} in {}", field, json);
        }

        let parsed: CommitmentBlob = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.claims.len(), blob.claims.len());
        assert_eq!(parsed.metadata.root, blob.metadata.root);
    }
}
