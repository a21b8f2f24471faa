use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::transfer_vault_tokens;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/**
 * Account context for creating and funding a new claim ledger
 *
 * This is the factory path, and the only creation path: it initializes the
 * ledger PDA, initializes the vault PDA, and deposits the committed total
 * from the creator, all within one instruction. If the deposit fails the
 * whole instruction reverts, so a ledger that exists but is unfunded is
 * never observable.
 *
 * The ledger address is derived from ["ledger", owner, seed] with a
 * caller-supplied seed, so the instance identity is computable off-ledger
 * before creation.
 *
 * Access Control: the creator signs and becomes the owner
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(seed: u64, root: [u8; 32], total_amount: u64, num_leaves: u64)]
pub struct CreateAndFund<'info> {
    /// The ledger account (PDA)
    /// - Stores the committed root, windows, and claimed-bitmap
    /// - Space is sized from num_leaves; the bitmap never grows afterwards
    #[account(
        init,
        payer = owner,
        space = ClaimLedger::space(num_leaves),
        seeds = [
            LEDGER_SEED.as_bytes(),
            owner.key().as_ref(),
            seed.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub ledger: Account<'info, ClaimLedger>,

    /// Token vault account (PDA) that holds the committed funding
    /// - Controlled by the ledger PDA as token authority
    /// - Derived from: ["vault", ledger_key]
    #[account(
        init,
        token::mint = token_mint,
        token::authority = ledger,
        token::token_program = token_program,
        seeds = [VAULT_SEED.as_bytes(), ledger.key().as_ref()],
        bump,
        payer = owner,
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// The token mint for the tokens being distributed
    /// - Supports both SPL Token and Token 2022 programs
    #[account(
        token::token_program = token_program,
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// Owner's token account containing the tokens to be committed
    /// - Must be owned by the owner signer
    #[account(
        mut,
        token::mint = token_mint,
        token::authority = owner,
        token::token_program = token_program,
    )]
    pub owner_token_account: InterfaceAccount<'info, TokenAccount>,

    /// The creator and owner of the ledger
    /// - Funds the full committed amount in this instruction
    /// - Sole beneficiary of reclaim after the time lock
    #[account(mut)]
    pub owner: Signer<'info>,

    /// System program for account creation
    pub system_program: Program<'info, System>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Creates a new claim ledger and funds it atomically
 *
 * @param ctx - The account context containing all required accounts
 * @param seed - Caller-supplied seed for deterministic addressing
 * @param root - Committed Merkle root over the allocation list
 * @param total_amount - Committed total, deposited in full here
 * @param num_leaves - Number of allocations in the committed list
 * @param metadata_handle - Content address of the published commitment blob
 */
pub fn handle_create_and_fund(
    ctx: Context<CreateAndFund>,
    seed: u64,
    root: [u8; 32],
    total_amount: u64,
    num_leaves: u64,
    metadata_handle: [u8; 32],
) -> Result<()> {
    // ===== VALIDATION PHASE =====

    require!(total_amount > 0, ClaimLedgerError::InvalidAmount);
    require!(num_leaves > 0, ClaimLedgerError::InvalidLeafCount);

    // An all-zero root would commit to nothing claimable
    require!(root != [0; 32], ClaimLedgerError::EmptyRoot);

    // ===== EFFECTS PHASE (State Initialization) =====

    // Both windows are anchored at the creation instant and are immutable
    // afterwards; there is no instruction that can move them
    let now = Clock::get()?.unix_timestamp;
    let claim_deadline = now
        .checked_add(CLAIM_WINDOW)
        .ok_or(ClaimLedgerError::ArithmeticOverflow)?;
    let unlock_time = now
        .checked_add(RECLAIM_DELAY)
        .ok_or(ClaimLedgerError::ArithmeticOverflow)?;

    let ledger = &mut ctx.accounts.ledger;
    ledger.bump = ctx.bumps.ledger;
    ledger.seed = seed;
    ledger.owner = ctx.accounts.owner.key();
    ledger.token_mint = ctx.accounts.token_mint.key();
    ledger.token_vault = ctx.accounts.token_vault.key();
    ledger.root = root;
    ledger.total_amount = total_amount;
    ledger.num_leaves = num_leaves;
    ledger.created_at = now;
    ledger.claim_deadline = claim_deadline;
    ledger.unlock_time = unlock_time;
    ledger.metadata_handle = metadata_handle;
    ledger.claimed_words = vec![0u64; ClaimLedger::word_count(num_leaves) as usize];
    // Note: total_claimed starts at the default value (0)

    let ledger_key = ledger.key();

    // ===== INTERACTIONS PHASE (Funding Deposit) =====

    // Move the full committed amount from the owner into the vault. If the
    // owner's balance or approval is insufficient this CPI fails and the
    // transaction reverts, undoing the account creation above.
    transfer_vault_tokens(
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.owner_token_account.to_account_info(),
        ctx.accounts.token_vault.to_account_info(),
        ctx.accounts.token_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        total_amount,
        ctx.accounts.token_mint.decimals,
        None, // Owner-signed deposit, no PDA seeds needed
    )?;

    // Emit the creation record for off-chain discovery
    emit_cpi!(LedgerCreated {
        ledger: ledger_key,
        creator: ctx.accounts.owner.key(),
        seed,
        token_mint: ctx.accounts.token_mint.key(),
        token_vault: ctx.accounts.token_vault.key(),
        root,
        metadata_handle,
        total_amount,
        num_leaves,
        created_at: now,
        claim_deadline,
        unlock_time,
    });

    Ok(())
}
