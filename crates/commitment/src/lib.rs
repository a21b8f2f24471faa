//! Off-ledger commitment builder.
//!
//! Turns a validated allocation list into the canonical Merkle commitment
//! the on-ledger program verifies against: leaf hashes, the root digest,
//! one inclusion proof per allocation, and the publishable proof blob.
//!
//! Leaf encoding and pair ordering come straight from
//! [`claim_ledger::merkle`]; there is deliberately no second hashing
//! implementation here. Everything in this crate is a pure function of its
//! input — publishing the blob and submitting the create transaction are
//! the caller's business.

pub mod allocation;
pub mod blob;
pub mod tree;

pub use allocation::{Allocation, CommitmentError};
pub use blob::{BlobMetadata, ClaimEntry, CommitmentBlob};
pub use tree::CommitmentTree;
