use anchor_lang::prelude::*;

declare_id!("3mQSiEwL65Kmo3n2SPdUNgmTVGfJVRULNsSnuJcgvhjU");

pub mod constants;
pub mod error;
pub mod event;
pub mod instructions;
pub mod merkle;
pub mod state;
pub mod utils;


use instructions::*;

/**
 * Claim Ledger Program
 *
 * A Solana program that lets a distributor commit to a fixed list of
 * (recipient, amount) allocations via a Merkle root, fund the full amount
 * atomically at creation, and let each recipient redeem its own allocation
 * exactly once with an inclusion proof.
 *
 * Key Properties:
 * - Merkle proof verification against a root that is immutable after creation
 * - Packed claimed-bitmap inside the ledger account (no per-claimant accounts)
 * - Creation and funding happen in one irreducible instruction
 * - Fixed claim window and reclaim time lock, both anchored at creation
 * - Deterministic instance addresses from (owner, caller-supplied seed)
 * - Support for both SPL Token and Token 2022
 *
 * Architecture:
 * - Ledger PDA: committed parameters plus the claimed-bitmap
 * - Token Vault PDA: holds the committed funding, authority is the ledger PDA
 *
 * Workflow:
 * 1. Distributor builds the commitment off-ledger (crates/commitment),
 *    publishes the proof blob, and calls create_and_fund
 * 2. Recipients fetch their (index, amount, proof) entry and claim
 * 3. After the time lock, the distributor reclaims whatever is left
 */
#[program]
pub mod claim_ledger {
    use super::*;

    /**
     * Creates a new claim ledger and funds it in the same instruction
     *
     * The committed root, total, and both deadlines are fixed here and have
     * no update path afterwards. If the funding deposit fails, the entire
     * creation reverts with it.
     *
     * @param ctx - Account context containing ledger, vault, and owner accounts
     * @param seed - Caller-supplied seed for deterministic addressing
     * @param root - 32-byte Merkle root over the committed allocation list
     * @param total_amount - Total amount of tokens committed and deposited
     * @param num_leaves - Number of allocations in the committed list
     * @param metadata_handle - Content address of the published commitment blob
     *
     * Access Control: the creator signs and becomes the owner
     */
    pub fn create_and_fund(
        ctx: Context<CreateAndFund>,
        seed: u64,
        root: [u8; 32],
        total_amount: u64,
        num_leaves: u64,
        metadata_handle: [u8; 32],
    ) -> Result<()> {
        handle_create_and_fund(ctx, seed, root, total_amount, num_leaves, metadata_handle)
    }

    /**
     * Redeems one committed allocation with a Merkle inclusion proof
     *
     * @param ctx - Account context containing ledger, vault, and claimant accounts
     * @param index - The allocation's position in the committed list
     * @param amount - The committed amount for this allocation
     * @param proof - Array of 32-byte sibling digests, leaf to root
     *
     * Access Control: the allocation's recipient; the leaf is recomputed
     * from the signer's key, so delegated claiming is impossible
     */
    pub fn claim(
        ctx: Context<Claim>,
        index: u64,
        amount: u64,
        proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        handle_claim(ctx, index, amount, proof)
    }

    /**
     * Sweeps the undistributed remainder back to the owner
     *
     * Impossible before the unlock time under any caller. The ledger and
     * vault accounts remain open; only the balance moves.
     *
     * @param ctx - Account context containing ledger, vault, and owner accounts
     *
     * Access Control: Owner only
     */
    pub fn reclaim(ctx: Context<Reclaim>) -> Result<()> {
        handle_reclaim(ctx)
    }
}
