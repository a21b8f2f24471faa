use std::collections::HashSet;
use std::str::FromStr;

use anchor_lang::prelude::Pubkey;
use thiserror::Error;

/// One committed (index, recipient, amount) entry. Immutable once the list
/// is committed; `index` is the entry's position in the committed list and
/// doubles as its bitmap slot on-ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub index: u64,
    pub recipient: Pubkey,
    pub amount: u64,
}

/// Rejections produced while validating rows or building the tree. Each is
/// a caller error; the builder has no retry or repair behavior.
#[derive(Debug, Error)]
pub enum CommitmentError {
    #[error("allocation list is empty")]
    EmptyList,
    #[error("duplicate allocation index {0}")]
    DuplicateIndex(u64),
    #[error("allocation indices must be dense over 0..{expected}, missing {missing}")]
    NonDenseIndices { expected: u64, missing: u64 },
    #[error("allocation {0} has zero amount")]
    ZeroAmount(u64),
    #[error("allocation index {index} out of range for {num_leaves} leaves")]
    IndexOutOfRange { index: u64, num_leaves: u64 },
    #[error("malformed recipient identifier: {0}")]
    MalformedRecipient(String),
    #[error("total committed amount overflows u64")]
    TotalOverflow,
}

impl Allocation {
    /// Validates ingested rows and assigns indices.
    ///
    /// Index assignment policy: indices are assigned in input-accepted
    /// order — the first accepted row gets index 0, the second index 1, and
    /// so on. The same row order therefore always produces the same
    /// commitment and the same per-recipient proofs.
    ///
    /// A recipient may appear in more than one row; each occurrence is a
    /// separate allocation with its own index and its own claim.
    pub fn from_rows<I, S>(rows: I) -> Result<Vec<Allocation>, CommitmentError>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut allocations = Vec::new();
        for (recipient, amount) in rows {
            let recipient = Pubkey::from_str(recipient.as_ref())
                .map_err(|_| CommitmentError::MalformedRecipient(recipient.as_ref().to_owned()))?;
            let index = allocations.len() as u64;
            if amount == 0 {
                return Err(CommitmentError::ZeroAmount(index));
            }
            allocations.push(Allocation {
                index,
                recipient,
                amount,
            });
        }
        if allocations.is_empty() {
            return Err(CommitmentError::EmptyList);
        }
        Ok(allocations)
    }

    /// Checks that a caller-assembled list is committable: non-empty,
    /// positive amounts, and indices dense and unique over 0..N.
    pub fn validate(allocations: &[Allocation]) -> Result<(), CommitmentError> {
        if allocations.is_empty() {
            return Err(CommitmentError::EmptyList);
        }
        let num_leaves = allocations.len() as u64;
        let mut seen = HashSet::with_capacity(allocations.len());
        for allocation in allocations {
            if allocation.index >= num_leaves {
                return Err(CommitmentError::IndexOutOfRange {
                    index: allocation.index,
                    num_leaves,
                });
            }
            if !seen.insert(allocation.index) {
                return Err(CommitmentError::DuplicateIndex(allocation.index));
            }
            if allocation.amount == 0 {
                return Err(CommitmentError::ZeroAmount(allocation.index));
            }
        }
        // Unique indices all below N imply density, but report the first
        // hole explicitly if the two checks ever disagree
        for index in 0..num_leaves {
            if !seen.contains(&index) {
                return Err(CommitmentError::NonDenseIndices {
                    expected: num_leaves,
                    missing: index,
                });
            }
        }
        Ok(())
    }

    /// Checked sum of all committed amounts. The result must fit the
    /// ledger's u64 arithmetic width or the list cannot be funded.
    pub fn total_amount(allocations: &[Allocation]) -> Result<u64, CommitmentError> {
        allocations
            .iter()
            .try_fold(0u64, |sum, a| sum.checked_add(a.amount))
            .ok_or(CommitmentError::TotalOverflow)
    }
}
