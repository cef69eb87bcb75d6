// Entity Models
// "The account NUMBER is identity, the balance is its changing value"
//
// - account: the capability set and its Savings / Current variants
// - bank: the registry that owns every account

pub mod account;
pub mod bank;

pub use account::{
    Account, AccountCore, AccountKind, AccountNumber, AccountSummary, CurrentAccount,
    SavingsAccount, CURRENT_OVERDRAFT_LIMIT, SAVINGS_INTEREST_RATE,
};
pub use bank::Bank;
