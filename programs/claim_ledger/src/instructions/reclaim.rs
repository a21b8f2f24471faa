use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::transfer_vault_tokens;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{TokenAccount, TokenInterface};

/**
 * Account context for reclaiming the undistributed remainder
 *
 * After the time lock expires the owner may sweep whatever the recipients
 * left unclaimed. The ledger and vault accounts stay open afterwards; the
 * instance is never explicitly deleted, it just ends up with a zero balance
 * and an immutable claim history.
 *
 * Access Control: Only the owner can reclaim
 */
#[event_cpi]
#[derive(Accounts)]
pub struct Reclaim<'info> {
    /// The ledger account being swept
    #[account(mut)]
    pub ledger: Account<'info, ClaimLedger>,

    /// Token vault containing the remaining balance
    /// - Controlled by the ledger PDA
    /// - Derived from: ["vault", ledger_key]
    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), ledger.key().as_ref()],
        bump
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// Owner's token account to receive the remainder
    /// - Must be owned by the owner
    /// - Must be for the committed token mint
    #[account(
        mut,
        token::mint = ledger.token_mint,
        token::authority = owner,
        token::token_program = token_program,
    )]
    pub owner_token_account: InterfaceAccount<'info, TokenAccount>,

    /// The token mint for verification
    /// - Must match the ledger's committed token mint
    #[account(
        token::token_program = token_program,
        constraint = token_mint.key() == ledger.token_mint @ ClaimLedgerError::TokenMintMismatch
    )]
    pub token_mint: InterfaceAccount<'info, anchor_spl::token_interface::Mint>,

    /// The owner of the ledger
    /// - Must match the owner stored at creation
    #[account(
        constraint = owner.key() == ledger.owner @ ClaimLedgerError::OnlyOwner
    )]
    pub owner: Signer<'info>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Sweeps the entire remaining vault balance back to the owner
 *
 * @param ctx - The account context containing all required accounts
 *
 * Validation Rules:
 * - Rejected with ReclaimLocked for every call strictly before unlock_time,
 *   under any caller including the owner
 */
pub fn handle_reclaim(ctx: Context<Reclaim>) -> Result<()> {
    let ledger = &ctx.accounts.ledger;

    // ===== VALIDATION PHASE =====

    let current_time = Clock::get()?.unix_timestamp;
    require!(
        current_time >= ledger.unlock_time,
        ClaimLedgerError::ReclaimLocked
    );

    let remaining_balance = ctx.accounts.token_vault.amount;

    // ===== INTERACTIONS PHASE (Token Transfer) =====

    let seed_bytes = ledger.seed.to_le_bytes();
    let seeds = &[
        LEDGER_SEED.as_bytes(),
        ledger.owner.as_ref(),
        seed_bytes.as_ref(),
        &[ledger.bump],
    ];
    let signer = &[&seeds[..]];

    if remaining_balance > 0 {
        transfer_vault_tokens(
            ctx.accounts.ledger.to_account_info(),
            ctx.accounts.token_vault.to_account_info(),
            ctx.accounts.owner_token_account.to_account_info(),
            ctx.accounts.token_mint.to_account_info(),
            ctx.accounts.token_program.to_account_info(),
            remaining_balance,
            ctx.accounts.token_mint.decimals,
            Some(signer), // Vault authority is the ledger PDA
        )?;
    }

    // Emit the reclaim record for off-chain indexing
    emit_cpi!(Reclaimed {
        ledger: ledger.key(),
        owner: ctx.accounts.owner.key(),
        amount: remaining_balance,
    });

    Ok(())
}
