use anchor_lang::prelude::*;

#[error_code]
pub enum ClaimLedgerError {
    // Access control errors
    #[msg("Only owner can perform this action")]
    OnlyOwner,

    // Temporal errors
    #[msg("Claim window has closed")]
    ClaimWindowClosed,
    #[msg("Reclaim is still time-locked")]
    ReclaimLocked,

    // State errors
    #[msg("Allocation index already claimed")]
    AlreadyClaimed,

    // Merkle proof errors
    #[msg("Merkle root cannot be empty")]
    EmptyRoot,
    #[msg("Invalid proof")]
    InvalidProof,

    // Input validation errors
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Leaf count must be greater than zero")]
    InvalidLeafCount,
    #[msg("Allocation index out of range")]
    IndexOutOfRange,

    // System level errors
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Insufficient vault balance for this claim")]
    InsufficientVaultBalance,
    #[msg("Token mint does not match ledger's token mint")]
    TokenMintMismatch,
}
