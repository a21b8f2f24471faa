use anchor_lang::solana_program::hash::hashv;
use anchor_lang::solana_program::pubkey::Pubkey;

/**
 * Shared Merkle encoding module
 *
 * Both sides of the commitment must agree byte-for-byte on leaf encoding
 * and hashing, or no proof ever verifies. The off-ledger builder links this
 * program crate (no-entrypoint) and calls these exact functions, so there is
 * a single implementation rather than two hand-maintained copies.
 *
 * Encoding:
 * - Leaf: SHA-256 over index (8 bytes LE) || recipient (32 bytes) || amount (8 bytes LE),
 *   no delimiters, no prefix
 * - Interior node: SHA-256 over the two child digests, lexicographically
 *   smaller digest first
 * - An odd node at any level is paired with itself
 * - A single-leaf tree has root == leaf and an empty proof
 */

/// Computes the leaf hash for one committed allocation.
///
/// The integer fields are encoded little-endian at fixed width. Field order
/// is index, recipient, amount; changing any single field changes the leaf.
pub fn hash_leaf(index: u64, recipient: &Pubkey, amount: u64) -> [u8; 32] {
    hashv(&[
        &index.to_le_bytes(),
        &recipient.to_bytes(),
        &amount.to_le_bytes(),
    ])
    .to_bytes()
}

/// Hashes an ordered pair of child digests.
///
/// The pair is ordered by numeric comparison of the digests so that the tree
/// shape and root are deterministic regardless of which side a sibling
/// arrived on.
pub fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    if a <= b {
        hashv(&[a, b]).to_bytes()
    } else {
        hashv(&[b, a]).to_bytes()
    }
}

/// Folds a leaf-to-root sibling path upward and compares to the expected root.
pub fn verify(proof: &[[u8; 32]], root: [u8; 32], leaf: [u8; 32]) -> bool {
    let computed = proof
        .iter()
        .fold(leaf, |node, sibling| hash_pair(&node, sibling));
    computed == root
}
