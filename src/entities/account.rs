// 💳 Account Entity - Savings and Current variants behind one capability set
//
// "The account NUMBER is identity (never changes), the BALANCE is a value
//  that only moves through deposit / withdraw / interest"
//
// Policies:
// - Savings: never below zero, earns 4% per interest calculation
// - Current: may overdraw down to -5000, never earns interest

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{BankResult, BankingError};

/// Unique integer identifying one account inside the bank
pub type AccountNumber = i32;

/// Interest applied by each Savings interest calculation (percent)
pub const SAVINGS_INTEREST_RATE: f64 = 4.0;

/// How far below zero a Current account may go
pub const CURRENT_OVERDRAFT_LIMIT: f64 = 5000.0;

// ============================================================================
// ACCOUNT KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountKind {
    /// Interest-bearing, no overdraft
    Savings,

    /// Overdraft allowed, no interest
    Current,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Savings => "Savings",
            AccountKind::Current => "Current",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ACCOUNT SUMMARY
// ============================================================================

/// Point-in-time view of an account, used for display and listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub account_number: AccountNumber,
    pub holder_name: String,
    pub kind: AccountKind,
    pub balance: f64,
}

impl fmt::Display for AccountSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Account No: {}", self.account_number)?;
        writeln!(f, "Holder: {}", self.holder_name)?;
        write!(f, "Balance: {}", self.balance)
    }
}

// ============================================================================
// ACCOUNT CAPABILITIES
// ============================================================================

/// Operations every account variant supports.
///
/// Variants differ only in `withdraw` and `calculate_interest`; everything
/// else is shared through [`AccountCore`].
pub trait Account: fmt::Debug {
    fn account_number(&self) -> AccountNumber;

    fn holder_name(&self) -> &str;

    fn kind(&self) -> AccountKind;

    /// Current balance (never fails, no side effects)
    fn balance(&self) -> f64;

    /// Add `amount` to the balance. Fails with `InvalidAmount` unless `amount > 0`.
    fn deposit(&mut self, amount: f64) -> BankResult<()>;

    /// Take `amount` from the balance, subject to the variant's policy.
    fn withdraw(&mut self, amount: f64) -> BankResult<()>;

    /// Apply one round of interest (repeated calls compound).
    fn calculate_interest(&mut self);

    /// Interest rate in percent
    fn interest_rate(&self) -> f64 {
        0.0
    }

    fn overdraft_limit(&self) -> f64 {
        0.0
    }

    /// Largest amount a single withdrawal could take right now
    fn available_funds(&self) -> f64 {
        self.balance() + self.overdraft_limit()
    }

    fn summary(&self) -> AccountSummary {
        AccountSummary {
            account_number: self.account_number(),
            holder_name: self.holder_name().to_string(),
            kind: self.kind(),
            balance: self.balance(),
        }
    }

    /// Multi-line rendering: number, holder, balance
    fn display(&self) -> String {
        self.summary().to_string()
    }
}

/// Fields and bookkeeping shared by both variants
#[derive(Debug, Clone, PartialEq)]
pub struct AccountCore {
    account_number: AccountNumber,
    holder_name: String,
    balance: f64,
}

impl AccountCore {
    /// Initial balance is taken as-is; validation happens before construction
    pub fn new(account_number: AccountNumber, holder_name: impl Into<String>, balance: f64) -> Self {
        AccountCore {
            account_number,
            holder_name: holder_name.into(),
            balance,
        }
    }

    fn deposit(&mut self, amount: f64) -> BankResult<()> {
        ensure_positive(amount)?;
        self.balance += amount;
        debug!(account = self.account_number, amount, balance = self.balance, "deposit");
        Ok(())
    }

    /// Debit without policy checks; callers enforce their own floor first
    fn debit(&mut self, amount: f64) {
        self.balance -= amount;
        debug!(account = self.account_number, amount, balance = self.balance, "withdraw");
    }
}

/// Rejects zero, negative, NaN and infinite amounts
fn ensure_positive(amount: f64) -> BankResult<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(BankingError::InvalidAmount);
    }
    Ok(())
}

// ============================================================================
// SAVINGS ACCOUNT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SavingsAccount {
    core: AccountCore,
    interest_rate: f64,
}

impl SavingsAccount {
    pub fn new(account_number: AccountNumber, holder_name: impl Into<String>, balance: f64) -> Self {
        SavingsAccount {
            core: AccountCore::new(account_number, holder_name, balance),
            interest_rate: SAVINGS_INTEREST_RATE,
        }
    }
}

impl Account for SavingsAccount {
    fn account_number(&self) -> AccountNumber {
        self.core.account_number
    }

    fn holder_name(&self) -> &str {
        &self.core.holder_name
    }

    fn kind(&self) -> AccountKind {
        AccountKind::Savings
    }

    fn balance(&self) -> f64 {
        self.core.balance
    }

    fn deposit(&mut self, amount: f64) -> BankResult<()> {
        self.core.deposit(amount)
    }

    fn withdraw(&mut self, amount: f64) -> BankResult<()> {
        ensure_positive(amount)?;
        if amount > self.core.balance {
            return Err(BankingError::InsufficientBalance);
        }
        self.core.debit(amount);
        Ok(())
    }

    fn calculate_interest(&mut self) {
        let interest = self.core.balance * self.interest_rate / 100.0;
        self.core.balance += interest;
        debug!(account = self.core.account_number, interest, balance = self.core.balance, "interest applied");
    }

    fn interest_rate(&self) -> f64 {
        self.interest_rate
    }
}

// ============================================================================
// CURRENT ACCOUNT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentAccount {
    core: AccountCore,
    overdraft_limit: f64,
}

impl CurrentAccount {
    pub fn new(account_number: AccountNumber, holder_name: impl Into<String>, balance: f64) -> Self {
        CurrentAccount {
            core: AccountCore::new(account_number, holder_name, balance),
            overdraft_limit: CURRENT_OVERDRAFT_LIMIT,
        }
    }
}

impl Account for CurrentAccount {
    fn account_number(&self) -> AccountNumber {
        self.core.account_number
    }

    fn holder_name(&self) -> &str {
        &self.core.holder_name
    }

    fn kind(&self) -> AccountKind {
        AccountKind::Current
    }

    fn balance(&self) -> f64 {
        self.core.balance
    }

    fn deposit(&mut self, amount: f64) -> BankResult<()> {
        self.core.deposit(amount)
    }

    fn withdraw(&mut self, amount: f64) -> BankResult<()> {
        ensure_positive(amount)?;
        if amount > self.core.balance + self.overdraft_limit {
            return Err(BankingError::InsufficientBalance);
        }
        self.core.debit(amount);
        Ok(())
    }

    // Current accounts earn nothing
    fn calculate_interest(&mut self) {}

    fn overdraft_limit(&self) -> f64 {
        self.overdraft_limit
    }
}

// ============================================================================
// TESTS
// ============================================================================
