use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::merkle;
use crate::state::*;
use crate::utils::transfer_vault_tokens;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{TokenAccount, TokenInterface};

/**
 * Account context for claiming one committed allocation
 *
 * The claimant proves inclusion of (index, claimant, amount) under the
 * committed root. The leaf is recomputed from the claimant's own signing
 * key, so nobody can redeem an allocation on someone else's behalf.
 *
 * Access Control: the allocation's recipient, self-custodied
 */
#[event_cpi]
#[derive(Accounts)]
pub struct Claim<'info> {
    /// The ledger account holding the committed root and claimed-bitmap
    /// - Will be modified to set the claimed bit and bump total_claimed
    #[account(mut)]
    pub ledger: Account<'info, ClaimLedger>,

    /// Token vault holding the committed funding
    /// - Controlled by the ledger PDA
    /// - Derived from: ["vault", ledger_key]
    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), ledger.key().as_ref()],
        bump
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// Claimant's token account to receive the payout
    /// - Must be owned by the claimant
    /// - Must be for the committed token mint
    #[account(
        mut,
        token::mint = ledger.token_mint,
        token::authority = claimant,
        token::token_program = token_program,
    )]
    pub claimant_token_account: InterfaceAccount<'info, TokenAccount>,

    /// The token mint for verification
    /// - Must match the ledger's committed token mint
    #[account(
        token::token_program = token_program,
        constraint = token_mint.key() == ledger.token_mint @ ClaimLedgerError::TokenMintMismatch
    )]
    pub token_mint: InterfaceAccount<'info, anchor_spl::token_interface::Mint>,

    /// The recipient redeeming their allocation
    /// - Must sign; the leaf hash is recomputed from this key
    pub claimant: Signer<'info>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Redeems one committed allocation, exactly once
 *
 * @param ctx - The account context containing all required accounts
 * @param index - The allocation's position in the committed list
 * @param amount - The committed amount for this allocation
 * @param proof - Leaf-to-root sibling digests from the commitment blob
 *
 * Validation Process:
 * 1. Index in range, amount nonzero, claim window still open
 * 2. Claimed bit for index must be unset
 * 3. Recompute the leaf from (index, claimant, amount) and fold the proof
 *    up to the committed root
 * 4. Set the bit, then transfer
 */
pub fn handle_claim(
    ctx: Context<Claim>,
    index: u64,
    amount: u64,
    proof: Vec<[u8; 32]>,
) -> Result<()> {
    let ledger = &mut ctx.accounts.ledger;

    // ===== VALIDATION PHASE =====

    require!(index < ledger.num_leaves, ClaimLedgerError::IndexOutOfRange);
    require!(amount > 0, ClaimLedgerError::InvalidAmount);

    // The claim window is terminal: once the deadline passes no proof is
    // ever accepted again
    let current_time = Clock::get()?.unix_timestamp;
    require!(
        current_time <= ledger.claim_deadline,
        ClaimLedgerError::ClaimWindowClosed
    );

    // Rejecting a set bit here (and again inside set_claimed) makes the
    // double-claim error distinct from a proof failure
    require!(!ledger.is_claimed(index)?, ClaimLedgerError::AlreadyClaimed);

    // ===== MERKLE PROOF VERIFICATION =====

    // Recompute the leaf from the claimant's own key. A proof generated for
    // a different recipient, index, or amount folds to a different root.
    let leaf = merkle::hash_leaf(index, &ctx.accounts.claimant.key(), amount);
    require!(
        merkle::verify(&proof, ledger.root, leaf),
        ClaimLedgerError::InvalidProof
    );

    // ===== EFFECTS PHASE (State Updates) =====

    // By construction the vault holds the full committed total, so a valid
    // claim can only hit this if the underlying commitment overstated itself
    require!(
        ctx.accounts.token_vault.amount >= amount,
        ClaimLedgerError::InsufficientVaultBalance
    );

    // Mark the index claimed before the transfer CPI. The bit is never
    // cleared, so a reverted transfer cannot leave a retryable half-claim.
    ledger.set_claimed(index)?;

    let new_total_claimed = ledger
        .total_claimed
        .checked_add(amount)
        .ok_or(ClaimLedgerError::ArithmeticOverflow)?;
    ledger.total_claimed = new_total_claimed;

    // Immutable copies for the PDA signer seeds
    let owner_key = ledger.owner;
    let seed_bytes = ledger.seed.to_le_bytes();
    let ledger_bump = ledger.bump;
    let ledger_key = ledger.key();

    // ===== INTERACTIONS PHASE (Token Transfer) =====

    let seeds = &[
        LEDGER_SEED.as_bytes(),
        owner_key.as_ref(),
        seed_bytes.as_ref(),
        &[ledger_bump],
    ];
    let signer = &[&seeds[..]];

    transfer_vault_tokens(
        ctx.accounts.ledger.to_account_info(),
        ctx.accounts.token_vault.to_account_info(),
        ctx.accounts.claimant_token_account.to_account_info(),
        ctx.accounts.token_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.token_mint.decimals,
        Some(signer), // Vault authority is the ledger PDA
    )?;

    // Emit the claim record for off-chain indexing
    emit_cpi!(AllocationClaimed {
        ledger: ledger_key,
        index,
        recipient: ctx.accounts.claimant.key(),
        amount,
        total_claimed: new_total_claimed,
    });

    Ok(())
}
