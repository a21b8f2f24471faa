use anchor_lang::prelude::*;

/// Creation record, emitted when a new ledger instance is created and funded.
/// Consumed by discovery tooling to find campaigns without scanning accounts.
#[event]
pub struct LedgerCreated {
    /// The ledger account public key
    pub ledger: Pubkey,
    /// Creator and owner of the ledger
    pub creator: Pubkey,
    /// Caller-supplied creation seed
    pub seed: u64,
    /// Token mint address
    pub token_mint: Pubkey,
    /// Token vault address
    pub token_vault: Pubkey,
    /// Committed Merkle root
    pub root: [u8; 32],
    /// Content address of the published commitment blob
    pub metadata_handle: [u8; 32],
    /// Committed total amount moved into the vault
    pub total_amount: u64,
    /// Number of committed allocations
    pub num_leaves: u64,
    /// Creation timestamp
    pub created_at: i64,
    /// No claims accepted after this timestamp
    pub claim_deadline: i64,
    /// Owner may reclaim at or after this timestamp
    pub unlock_time: i64,
}

/// Claim record, emitted on each successful claim.
#[event]
pub struct AllocationClaimed {
    /// The ledger account public key
    pub ledger: Pubkey,
    /// Allocation index that was claimed
    pub index: u64,
    /// Recipient of the payout
    pub recipient: Pubkey,
    /// Amount transferred to the recipient
    pub amount: u64,
    /// Running total paid out across all claims
    pub total_claimed: u64,
}

/// Reclaim record, emitted when the owner sweeps the remaining balance.
#[event]
pub struct Reclaimed {
    /// The ledger account public key
    pub ledger: Pubkey,
    /// Owner who reclaimed the remainder
    pub owner: Pubkey,
    /// Amount swept back to the owner
    pub amount: u64,
}
