// Bank Console - Core Library
// Exposes the account model and registry for the console binary and tests

pub mod entities;
pub mod error;
pub mod ui;

// Re-export commonly used types
pub use entities::{
    Account, AccountKind, AccountNumber, AccountSummary, Bank, CurrentAccount, SavingsAccount,
    CURRENT_OVERDRAFT_LIMIT, SAVINGS_INTEREST_RATE,
};
pub use error::{BankResult, BankingError};
pub use ui::{run_console, ConsoleOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
