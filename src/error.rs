// 🚫 Banking Errors - one taxonomy for every domain failure
//
// Account and registry operations return these; only the console loop
// recovers from them (prints the message, keeps going).

use thiserror::Error;

/// Domain failures raised by accounts and the bank registry.
///
/// `Display` yields the human-readable message shown to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BankingError {
    /// Deposit/withdrawal amount is not a positive number
    #[error("Invalid transaction amount")]
    InvalidAmount,

    /// Withdrawal would break the account's balance/overdraft policy
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// No account is registered under this number
    #[error("Account not found")]
    AccountNotFound,
}

pub type BankResult<T> = std::result::Result<T, BankingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BankingError::InvalidAmount.to_string(),
            "Invalid transaction amount"
        );
        assert_eq!(
            BankingError::InsufficientBalance.to_string(),
            "Insufficient balance"
        );
        assert_eq!(
            BankingError::AccountNotFound.to_string(),
            "Account not found"
        );
    }

    #[test]
    fn test_errors_convert_into_anyhow() {
        let err: anyhow::Error = BankingError::AccountNotFound.into();
        assert_eq!(
            err.downcast_ref::<BankingError>(),
            Some(&BankingError::AccountNotFound)
        );
    }
}
