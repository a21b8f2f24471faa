use anchor_lang::prelude::*;

use crate::constants::{BITMAP_WORD_BITS, SECONDS_PER_DAY};
use crate::error::ClaimLedgerError;

/**
 * Claim ledger state account
 *
 * One account per distribution campaign. The committed fields (root, owner,
 * token, total, deadlines) are written once during create_and_fund and have
 * no update path afterwards; only total_claimed and the claimed-bitmap words
 * mutate over the instance's lifetime. The instance is never closed.
 *
 * Derivation: ["ledger", owner, seed]
 *
 * Lifecycle:
 * 1. Created and funded atomically by create_and_fund
 * 2. Bitmap bits set one at a time as claims land
 * 3. Remaining balance swept by the owner once the time lock expires
 */
#[account]
#[derive(Default, Debug)]
pub struct ClaimLedger {
    /// Bump seed for PDA derivation
    /// - Saved to avoid recomputation during claim operations
    pub bump: u8,

    /// Caller-supplied creation seed
    /// - Part of the PDA derivation, so instance addresses are predictable
    ///   off-ledger before creation
    pub seed: u64,

    /// Owner of the ledger
    /// - Sole beneficiary of reclaim after the time lock expires
    pub owner: Pubkey,

    /// Token mint address
    /// - Specifies which token is being distributed
    pub token_mint: Pubkey,

    /// Token vault account address
    /// - PDA that holds the committed funding
    /// - Controlled by the ledger PDA
    /// - Derived from: ["vault", ledger_key]
    pub token_vault: Pubkey,

    /// Committed Merkle root over the allocation list
    /// - Immutable after creation; there is no setter instruction
    pub root: [u8; 32],

    /// Total amount committed and deposited at creation
    pub total_amount: u64,

    /// Total amount paid out across all successful claims
    pub total_claimed: u64,

    /// Number of allocations in the committed list
    /// - Indices are dense, 0..num_leaves
    pub num_leaves: u64,

    /// Creation timestamp (Unix)
    pub created_at: i64,

    /// Claim deadline (Unix timestamp)
    /// - created_at + CLAIM_WINDOW; no claims accepted after this time
    pub claim_deadline: i64,

    /// Reclaim unlock time (Unix timestamp)
    /// - created_at + RECLAIM_DELAY; reclaim is impossible before this time
    ///   under any caller, including the owner
    pub unlock_time: i64,

    /// Content address of the published commitment blob
    /// - Opaque to the program; recipients fetch the blob to obtain proofs
    pub metadata_handle: [u8; 32],

    /// Packed claimed-bitmap
    /// - Bit (index % 64) of word (index / 64) marks index as claimed
    /// - A set bit is never cleared
    pub claimed_words: Vec<u64>,
}

impl ClaimLedger {
    /// Fixed portion of the account layout: 8-byte discriminator plus every
    /// field up to the bitmap, plus the 4-byte Vec length prefix.
    pub const FIXED_LEN: usize = 8   // discriminator
        + 1                          // bump
        + 8                          // seed
        + 32 * 3                     // owner, token_mint, token_vault
        + 32                         // root
        + 8 * 3                      // total_amount, total_claimed, num_leaves
        + 8 * 3                      // created_at, claim_deadline, unlock_time
        + 32                         // metadata_handle
        + 4; // bitmap length prefix

    /// Account space for a campaign of `num_leaves` allocations.
    /// The bitmap is sized at creation and never grows.
    pub fn space(num_leaves: u64) -> usize {
        Self::FIXED_LEN + (Self::word_count(num_leaves) as usize) * 8
    }

    /// Number of bitmap words needed for `num_leaves` indices.
    pub fn word_count(num_leaves: u64) -> u64 {
        num_leaves.div_ceil(BITMAP_WORD_BITS)
    }

    /// Returns whether allocation `index` has already been claimed.
    pub fn is_claimed(&self, index: u64) -> Result<bool> {
        require!(index < self.num_leaves, ClaimLedgerError::IndexOutOfRange);
        let word = (index / BITMAP_WORD_BITS) as usize;
        let bit = index % BITMAP_WORD_BITS;
        Ok(self.claimed_words[word] & (1u64 << bit) != 0)
    }

    /// Marks allocation `index` as claimed. Rejects a bit that is already
    /// set, so double-redemption is impossible even if the caller skipped
    /// the read-side check.
    pub fn set_claimed(&mut self, index: u64) -> Result<()> {
        require!(index < self.num_leaves, ClaimLedgerError::IndexOutOfRange);
        let word = (index / BITMAP_WORD_BITS) as usize;
        let bit = index % BITMAP_WORD_BITS;
        require!(
            self.claimed_words[word] & (1u64 << bit) == 0,
            ClaimLedgerError::AlreadyClaimed
        );
        self.claimed_words[word] |= 1u64 << bit;
        Ok(())
    }

    /// Whole days until the claim deadline. Derived convenience for client
    /// tooling, not authoritative; the deadline comparison in claim is.
    pub fn days_to_claim(&self, now: i64) -> i64 {
        if now >= self.claim_deadline {
            0
        } else {
            (self.claim_deadline - now) / SECONDS_PER_DAY
        }
    }

    /// Whole days until the reclaim time lock expires. Derived convenience,
    /// not authoritative.
    pub fn days_to_unlock(&self, now: i64) -> i64 {
        if now >= self.unlock_time {
            0
        } else {
            (self.unlock_time - now) / SECONDS_PER_DAY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CLAIM_WINDOW, RECLAIM_DELAY};

    fn ledger_with(num_leaves: u64) -> ClaimLedger {
        ClaimLedger {
            num_leaves,
            claimed_words: vec![0u64; ClaimLedger::word_count(num_leaves) as usize],
            ..Default::default()
        }
    }

    #[test]
    fn bitmap_word_packing() {
        let mut ledger = ledger_with(130);
        assert_eq!(ledger.claimed_words.len(), 3);

        ledger.set_claimed(0).unwrap();
        ledger.set_claimed(63).unwrap();
        ledger.set_claimed(64).unwrap();
        ledger.set_claimed(129).unwrap();

        assert_eq!(ledger.claimed_words[0], 1 | (1u64 << 63));
        assert_eq!(ledger.claimed_words[1], 1);
        assert_eq!(ledger.claimed_words[2], 1u64 << 1);
    }

    #[test]
    fn set_bit_is_terminal() {
        let mut ledger = ledger_with(4);
        assert!(!ledger.is_claimed(2).unwrap());
        ledger.set_claimed(2).unwrap();
        assert!(ledger.is_claimed(2).unwrap());
        // second attempt for the same index must be rejected
        assert!(ledger.set_claimed(2).is_err());
        // neighbors are untouched
        assert!(!ledger.is_claimed(1).unwrap());
        assert!(!ledger.is_claimed(3).unwrap());
    }

    #[test]
    fn index_out_of_range_is_rejected() {
        let mut ledger = ledger_with(4);
        assert!(ledger.is_claimed(4).is_err());
        assert!(ledger.set_claimed(4).is_err());
    }

    #[test]
    fn space_accounts_for_bitmap_words() {
        assert_eq!(ClaimLedger::word_count(1), 1);
        assert_eq!(ClaimLedger::word_count(64), 1);
        assert_eq!(ClaimLedger::word_count(65), 2);
        assert_eq!(
            ClaimLedger::space(65),
            ClaimLedger::FIXED_LEN + 2 * 8
        );
    }

    #[test]
    fn days_helpers_clamp_at_boundaries() {
        let ledger = ClaimLedger {
            created_at: 1_000,
            claim_deadline: 1_000 + CLAIM_WINDOW,
            unlock_time: 1_000 + RECLAIM_DELAY,
            ..ledger_with(1)
        };
        assert_eq!(ledger.days_to_claim(1_000), 60);
        assert_eq!(ledger.days_to_claim(1_000 + CLAIM_WINDOW), 0);
        assert_eq!(ledger.days_to_claim(1_000 + CLAIM_WINDOW + 1), 0);
        assert_eq!(ledger.days_to_unlock(1_000), 90);
        assert_eq!(ledger.days_to_unlock(1_000 + RECLAIM_DELAY - 1), 0);
        assert_eq!(ledger.days_to_unlock(1_000 + RECLAIM_DELAY), 0);
    }
}
