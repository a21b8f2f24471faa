//! End-to-end exercise of the off-ledger half against the on-ledger types:
//! build a commitment, verify every proof with the program's own verifier,
//! and walk the claimed-bitmap through a campaign where three of four
//! recipients redeem.

use anchor_lang::prelude::Pubkey;
use claim_commitment::{Allocation, CommitmentBlob, CommitmentTree};
use claim_ledger::constants::{CLAIM_WINDOW, RECLAIM_DELAY};
use claim_ledger::merkle::{hash_leaf, verify};
use claim_ledger::state::ClaimLedger;

fn campaign() -> Vec<Allocation> {
    (0..4u64)
        .map(|i| Allocation {
            index: i,
            recipient: Pubkey::new_from_array([i as u8 + 10; 32]),
            amount: (i + 1) * 100,
        })
        .collect()
}

fn ledger_for(allocations: &[Allocation], tree: &CommitmentTree, created_at: i64) -> ClaimLedger {
    let num_leaves = allocations.len() as u64;
    ClaimLedger {
        root: tree.root(),
        total_amount: Allocation::total_amount(allocations).unwrap(),
        num_leaves,
        created_at,
        claim_deadline: created_at + CLAIM_WINDOW,
        unlock_time: created_at + RECLAIM_DELAY,
        claimed_words: vec![0u64; ClaimLedger::word_count(num_leaves) as usize],
        ..Default::default()
    }
}

#[test]
fn three_of_four_claim_and_the_remainder_is_conserved() {
    let allocations = campaign();
    let tree = CommitmentTree::build(&allocations).unwrap();
    let mut ledger = ledger_for(&allocations, &tree, 1_000);

    assert_eq!(ledger.total_amount, 1_000);

    // Recipients 0, 1, 2 redeem; each proof must fold to the stored root
    // and each bit must flip exactly once
    let mut paid_out = 0u64;
    for allocation in &allocations[..3] {
        let proof = tree.proof_for(allocation.index).unwrap();
        let leaf = hash_leaf(allocation.index, &allocation.recipient, allocation.amount);
        assert!(verify(&proof, ledger.root, leaf));
        assert!(!ledger.is_claimed(allocation.index).unwrap());
        ledger.set_claimed(allocation.index).unwrap();
        paid_out += allocation.amount;
    }
    assert_eq!(paid_out, 600);

    // Resubmission of an already-redeemed index is terminal
    assert!(ledger.set_claimed(0).is_err());

    // The unclaimed remainder is exactly the sum of unredeemed allocations
    let remainder: u64 = allocations
        .iter()
        .filter(|a| !ledger.is_claimed(a.index).unwrap())
        .map(|a| a.amount)
        .sum();
    assert_eq!(remainder, 400);
    assert_eq!(paid_out + remainder, ledger.total_amount);
}

#[test]
fn tampered_amount_never_reaches_the_root() {
    let allocations = campaign();
    let tree = CommitmentTree::build(&allocations).unwrap();
    let ledger = ledger_for(&allocations, &tree, 1_000);

    // Correct proof, committed amount doubled: the recomputed leaf differs,
    // so verification fails and no state would change
    let target = &allocations[1];
    let proof = tree.proof_for(target.index).unwrap();
    let doubled = hash_leaf(target.index, &target.recipient, target.amount * 2);
    assert!(!verify(&proof, ledger.root, doubled));
    assert!(!ledger.is_claimed(target.index).unwrap());
}

#[test]
fn entries_absent_from_the_committed_list_cannot_verify() {
    let allocations = campaign();
    let tree = CommitmentTree::build(&allocations).unwrap();
    let root = tree.root();

    let outsider = Pubkey::new_from_array([99u8; 32]);
    for allocation in &allocations {
        let proof = tree.proof_for(allocation.index).unwrap();
        let leaf = hash_leaf(allocation.index, &outsider, allocation.amount);
        assert!(!verify(&proof, root, leaf));
    }
}

#[test]
fn windows_run_concurrently_from_creation() {
    let allocations = campaign();
    let tree = CommitmentTree::build(&allocations).unwrap();
    let created_at = 50_000;
    let ledger = ledger_for(&allocations, &tree, created_at);

    assert_eq!(ledger.claim_deadline, created_at + CLAIM_WINDOW);
    assert_eq!(ledger.unlock_time, created_at + RECLAIM_DELAY);
    assert!(ledger.claim_deadline < ledger.unlock_time);
    assert_eq!(ledger.days_to_claim(created_at), 60);
    assert_eq!(ledger.days_to_unlock(created_at), 90);
}

#[test]
fn blob_round_trips_into_claimable_proofs() {
    let allocations = campaign();
    let tree = CommitmentTree::build(&allocations).unwrap();
    let token = Pubkey::new_unique();
    let blob = CommitmentBlob::assemble(&tree, &allocations, &token, 2_000, 3_000, 1_000).unwrap();

    let json = serde_json::to_string_pretty(&blob).unwrap();
    let fetched: CommitmentBlob = serde_json::from_str(&json).unwrap();

    // A recipient decoding its entry out of storage must end up with a
    // proof the program accepts
    for entry in &fetched.claims {
        let recipient: Pubkey = entry.account.parse().unwrap();
        let proof: Vec<[u8; 32]> = entry
            .proof
            .iter()
            .map(|h| {
                let bytes = hex::decode(h).unwrap();
                <[u8; 32]>::try_from(bytes.as_slice()).unwrap()
            })
            .collect();
        let leaf = hash_leaf(entry.index, &recipient, entry.amount);
        let root = <[u8; 32]>::try_from(hex::decode(&fetched.metadata.root).unwrap().as_slice())
            .unwrap();
        assert!(verify(&proof, root, leaf));
    }
}
