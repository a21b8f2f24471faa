use anchor_lang::prelude::*;
use anchor_spl::token_interface::{transfer_checked, TransferChecked};

/// Moves tokens out of (or into) a campaign vault.
///
/// Goes through `transfer_checked` so both SPL Token and Token 2022 mints
/// work. Pass `signer_seeds` when the vault authority is the ledger PDA
/// (claim and reclaim payouts); pass `None` when the owner signs directly
/// (the funding deposit during create_and_fund).
pub fn transfer_vault_tokens<'a>(
    authority: AccountInfo<'a>,
    from: AccountInfo<'a>,
    to: AccountInfo<'a>,
    mint: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    amount: u64,
    decimals: u8,
    signer_seeds: Option<&[&[&[u8]]]>,
) -> Result<()> {
    let accounts = TransferChecked {
        from,
        mint,
        to,
        authority,
    };

    let ctx = match signer_seeds {
        Some(seeds) => CpiContext::new_with_signer(token_program, accounts, seeds),
        None => CpiContext::new(token_program, accounts),
    };

    transfer_checked(ctx, amount, decimals)
}
