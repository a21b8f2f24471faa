pub mod claim;
pub mod create_and_fund;
pub mod reclaim;

pub use claim::*;
pub use create_and_fund::*;
pub use reclaim::*;
