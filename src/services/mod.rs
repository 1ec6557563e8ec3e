// Service exports
pub mod directory;
pub mod ledger;

pub use directory::{DirectoryClient, DirectoryError};
pub use ledger::{IntroLedger, LedgerError, PeriodStats, TransitionOutcome};
