// 🏦 Bank Registry - exclusive owner of every account
//
// Accounts are keyed by account number. Callers borrow an account for the
// length of one operation; the bank keeps ownership until it is dropped.

use std::collections::HashMap;
use tracing::{debug, warn};

use super::account::{Account, AccountNumber, AccountSummary, CurrentAccount, SavingsAccount};
use crate::error::{BankResult, BankingError};

/// Registry of all open accounts
///
/// Constructed explicitly (no global instance) and passed to whoever needs it.
#[derive(Debug, Default)]
pub struct Bank {
    accounts: HashMap<AccountNumber, Box<dyn Account>>,
}

impl Bank {
    /// Create new empty bank
    pub fn new() -> Self {
        Bank {
            accounts: HashMap::new(),
        }
    }

    /// Store an account under its number.
    ///
    /// An existing account with the same number is replaced, and handed back
    /// so the caller can tell it happened.
    pub fn create_account(&mut self, account: Box<dyn Account>) -> Option<Box<dyn Account>> {
        let number = account.account_number();
        let previous = self.accounts.insert(number, account);

        match &previous {
            Some(old) => warn!(
                account = number,
                previous_holder = old.holder_name(),
                "account number reused, previous account replaced"
            ),
            None => debug!(account = number, "account created"),
        }

        previous
    }

    /// Open a Savings account (see [`Bank::create_account`] for duplicates)
    pub fn open_savings(
        &mut self,
        number: AccountNumber,
        holder_name: impl Into<String>,
        initial_balance: f64,
    ) -> Option<Box<dyn Account>> {
        self.create_account(Box::new(SavingsAccount::new(number, holder_name, initial_balance)))
    }

    /// Open a Current account (see [`Bank::create_account`] for duplicates)
    pub fn open_current(
        &mut self,
        number: AccountNumber,
        holder_name: impl Into<String>,
        initial_balance: f64,
    ) -> Option<Box<dyn Account>> {
        self.create_account(Box::new(CurrentAccount::new(number, holder_name, initial_balance)))
    }

    /// Borrow an account mutably for one operation
    pub fn get_account(&mut self, number: AccountNumber) -> BankResult<&mut dyn Account> {
        let boxed = self
            .accounts
            .get_mut(&number)
            .ok_or_else(|| {
                debug!(account = number, "lookup of unknown account");
                BankingError::AccountNotFound
            })?;
        let account: &mut dyn Account = &mut **boxed;
        Ok(account)
    }

    /// Read-only lookup
    pub fn find_account(&self, number: AccountNumber) -> Option<&dyn Account> {
        let boxed = self.accounts.get(&number)?;
        let account: &dyn Account = &**boxed;
        Some(account)
    }

    pub fn contains(&self, number: AccountNumber) -> bool {
        self.accounts.contains_key(&number)
    }

    /// Count open accounts
    pub fn count(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// All account numbers, ascending
    pub fn account_numbers(&self) -> Vec<AccountNumber> {
        let mut numbers: Vec<AccountNumber> = self.accounts.keys().copied().collect();
        numbers.sort_unstable();
        numbers
    }

    /// Snapshot of every account, ordered by account number
    pub fn summaries(&self) -> Vec<AccountSummary> {
        let mut summaries: Vec<AccountSummary> =
            self.accounts.values().map(|acc| acc.summary()).collect();
        summaries.sort_by_key(|s| s.account_number);
        summaries
    }

    /// Calculate total balance across all accounts
    pub fn total_balance(&self) -> f64 {
        self.accounts.values().map(|acc| acc.balance()).sum()
    }

    /// Accounts with negative balance, ordered by account number
    pub fn overdrawn_accounts(&self) -> Vec<AccountSummary> {
        self.summaries()
            .into_iter()
            .filter(|s| s.balance < 0.0)
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
