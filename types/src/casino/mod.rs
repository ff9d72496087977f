//! Casino domain types.
//!
//! Defines card/session/variant/wallet/statistics state and constants used by the execution
//! layer and the simulator.

mod card;
mod constants;
mod ledger;
mod session;
mod stats;
mod variant;

pub use card::*;
pub use constants::*;
pub use ledger::*;
pub use session::*;
pub use stats::*;
pub use variant::*;
