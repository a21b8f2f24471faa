use anchor_lang::prelude::*;

/**
 * Program Constants
 *
 * This module defines the constant values used throughout the claim ledger program.
 * These constants control the two calendar windows and PDA derivation.
 */

#[constant]
/// ===== TIMING CONSTANTS =====

/// Claim window measured from ledger creation (60 days)
/// - Claims are accepted while current_time <= created_at + CLAIM_WINDOW
/// - The window never reopens once it elapses
/// - Value: 60 days * 24 hours * 60 minutes * 60 seconds = 5,184,000 seconds
pub const CLAIM_WINDOW: i64 = 60 * 24 * 60 * 60; // 60 days in seconds

/// Reclaim delay measured from ledger creation (90 days)
/// - The owner may sweep the remaining balance once current_time >= created_at + RECLAIM_DELAY
/// - Runs concurrently with the claim window, both anchored at creation time
/// - Value: 90 days * 24 hours * 60 minutes * 60 seconds = 7,776,000 seconds
pub const RECLAIM_DELAY: i64 = 90 * 24 * 60 * 60; // 90 days in seconds

/// Seconds in one day, used by the derived days-remaining helpers
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// ===== PDA SEED CONSTANTS =====

/// Seed for ledger PDA derivation
/// - Used in: ["ledger", owner, seed]
/// - The seed component is caller-supplied, so an instance address is
///   computable off-ledger before creation
pub const LEDGER_SEED: &str = "ledger";

/// Seed for token vault PDA derivation
/// - Used in: ["vault", ledger_key]
/// - Creates a unique vault for each ledger instance
/// - Ensures the vault is controlled by the ledger PDA
pub const VAULT_SEED: &str = "vault";

/// ===== BITMAP CONSTANTS =====

/// Width of one claimed-bitmap word
/// - Bit (index % 64) of word (index / 64) marks index as claimed
pub const BITMAP_WORD_BITS: u64 = 64;
