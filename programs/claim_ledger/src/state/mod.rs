pub mod ledger_state;

pub use ledger_state::*;
