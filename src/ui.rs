// Console front-end: numbered menu, line prompts, error reporting.
//
// Generic over any BufRead/Write pair so sessions can be scripted.

use anyhow::Result;
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::{debug, info};

use crate::entities::{AccountNumber, Bank, CurrentAccount, SavingsAccount};
use crate::error::{BankResult, BankingError};

const MENU: &str = "\n1. Create Savings Account\n\
                    2. Create Current Account\n\
                    3. Deposit\n\
                    4. Withdraw\n\
                    5. Check Balance\n\
                    6. Calculate Interest\n\
                    7. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CreateSavings,
    CreateCurrent,
    Deposit,
    Withdraw,
    CheckBalance,
    CalculateInterest,
    Exit,
}

impl MenuChoice {
    pub fn from_number(number: i64) -> Option<Self> {
        match number {
            1 => Some(MenuChoice::CreateSavings),
            2 => Some(MenuChoice::CreateCurrent),
            3 => Some(MenuChoice::Deposit),
            4 => Some(MenuChoice::Withdraw),
            5 => Some(MenuChoice::CheckBalance),
            6 => Some(MenuChoice::CalculateInterest),
            7 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    /// Print the numbered menu before every choice prompt
    pub show_menu: bool,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        ConsoleOptions { show_menu: true }
    }
}

/// Input ran out in the middle of the session
#[derive(Error, Debug)]
#[error("input closed")]
struct InputClosed;

struct Console<R, W> {
    input: R,
    output: W,
    options: ConsoleOptions,
}

/// Run the interactive loop until Exit (choice 7) or end of input.
///
/// Banking errors are reported and the loop continues; only I/O failures
/// on `input`/`output` end the session with an error.
pub fn run_console<R: BufRead, W: Write>(
    bank: &mut Bank,
    input: R,
    output: W,
    options: ConsoleOptions,
) -> Result<()> {
    let mut console = Console {
        input,
        output,
        options,
    };
    console.run(bank)
}

impl<R: BufRead, W: Write> Console<R, W> {
    fn run(&mut self, bank: &mut Bank) -> Result<()> {
        info!("console session started");

        loop {
            if self.options.show_menu {
                writeln!(self.output, "{}", MENU)?;
            }

            let raw = match self.ask("Enter choice: ") {
                Ok(raw) => raw,
                Err(err) if err.is::<InputClosed>() => return self.close(),
                Err(err) => return Err(err),
            };

            let choice = match raw.parse::<i64>() {
                Ok(number) => MenuChoice::from_number(number),
                Err(_) => {
                    self.say("Invalid input. Try again.")?;
                    continue;
                }
            };

            let choice = match choice {
                Some(MenuChoice::Exit) => return self.close(),
                Some(choice) => choice,
                None => {
                    self.say("Invalid menu option.")?;
                    continue;
                }
            };

            debug!(?choice, "menu choice");

            match self.execute(bank, choice) {
                Ok(reply) => self.say(&reply)?,
                Err(err) if err.is::<InputClosed>() => return self.close(),
                Err(err) => match err.downcast_ref::<BankingError>() {
                    Some(banking) => {
                        debug!(?choice, error = %banking, "operation rejected");
                        self.say(&format!("Error: {}", banking))?;
                    }
                    None => return Err(err),
                },
            }
        }
    }

    /// Carry out one menu operation and return the line to print
    fn execute(&mut self, bank: &mut Bank, choice: MenuChoice) -> Result<String> {
        let raw_number = self.ask("Enter Account Number: ")?;
        let number = parse_account_number(&raw_number)?;

        let reply = match choice {
            MenuChoice::CreateSavings | MenuChoice::CreateCurrent => {
                let name = self.ask_name()?;
                let raw_balance = self.ask("Enter Initial Balance: ")?;
                let balance = parse_amount(&raw_balance)?;

                if choice == MenuChoice::CreateSavings {
                    bank.create_account(Box::new(SavingsAccount::new(number, name, balance)));
                } else {
                    bank.create_account(Box::new(CurrentAccount::new(number, name, balance)));
                }
                "Account created successfully.".to_string()
            }
            MenuChoice::Deposit => {
                let amount = self.ask_amount()?;
                bank.get_account(number)?.deposit(amount)?;
                "Deposit successful.".to_string()
            }
            MenuChoice::Withdraw => {
                let amount = self.ask_amount()?;
                bank.get_account(number)?.withdraw(amount)?;
                "Withdrawal successful.".to_string()
            }
            MenuChoice::CheckBalance => bank.get_account(number)?.display(),
            MenuChoice::CalculateInterest => {
                bank.get_account(number)?.calculate_interest();
                "Interest calculated.".to_string()
            }
            MenuChoice::Exit => return Err(InputClosed.into()),
        };

        Ok(reply)
    }

    fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputClosed.into());
        }
        Ok(line.trim().to_string())
    }

    // Blank names are asked again
    fn ask_name(&mut self) -> Result<String> {
        loop {
            let name = self.ask("Enter Name: ")?;
            if !name.is_empty() {
                return Ok(name);
            }
        }
    }

    fn ask_amount(&mut self) -> Result<f64> {
        let raw = self.ask("Enter Amount: ")?;
        Ok(parse_amount(&raw)?)
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.say("Exiting...")?;
        self.output.flush()?;
        info!("console session ended");
        Ok(())
    }
}

/// Unparseable account numbers can't name any account
fn parse_account_number(raw: &str) -> BankResult<AccountNumber> {
    raw.parse().map_err(|_| BankingError::AccountNotFound)
}

fn parse_amount(raw: &str) -> BankResult<f64> {
    match raw.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(BankingError::InvalidAmount),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    fn run_script(bank: &mut Bank, script: &str) -> String {
        let mut output = Vec::new();
        run_console(
            bank,
            Cursor::new(script),
            &mut output,
            ConsoleOptions { show_menu: false },
        )
        .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_menu_choice_mapping() {
        assert_eq!(MenuChoice::from_number(1), Some(MenuChoice::CreateSavings));
        assert_eq!(MenuChoice::from_number(6), Some(MenuChoice::CalculateInterest));
        assert_eq!(MenuChoice::from_number(7), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_number(0), None);
        assert_eq!(MenuChoice::from_number(8), None);
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_account_number("42"), Ok(42));
        assert_eq!(parse_account_number("-3"), Ok(-3));
        assert_eq!(parse_account_number("abc"), Err(BankingError::AccountNotFound));
        assert_eq!(parse_account_number(""), Err(BankingError::AccountNotFound));

        assert_eq!(parse_amount("12.5"), Ok(12.5));
        assert_eq!(parse_amount("-7"), Ok(-7.0));
        assert_eq!(parse_amount("lots"), Err(BankingError::InvalidAmount));
        assert_eq!(parse_amount("inf"), Err(BankingError::InvalidAmount));
        assert_eq!(parse_amount("NaN"), Err(BankingError::InvalidAmount));
    }

    #[test]
    fn test_alice_session() {
        let mut bank = Bank::new();
        let output = run_script(
            &mut bank,
            "1\n1\nAlice\n1000\n\
             3\n1\n500\n\
             4\n1\n2000\n\
             6\n1\n\
             5\n1\n\
             7\n",
        );

        assert!(output.contains("Account created successfully."));
        assert!(output.contains("Deposit successful."));
        assert!(output.contains("Error: Insufficient balance"));
        assert!(output.contains("Interest calculated."));
        assert!(output.contains("Account No: 1\nHolder: Alice\nBalance: 1560\n"));
        assert!(output.ends_with("Exiting...\n"));

        let balance = bank.find_account(1).unwrap().balance();
        assert!((balance - 1560.0).abs() < 1e-9);
    }

    #[test]
    fn test_bob_overdraft_session() {
        let mut bank = Bank::new();
        let output = run_script(
            &mut bank,
            "2\n2\nBob\n0\n\
             4\n2\n3000\n\
             4\n2\n3000\n\
             5\n2\n\
             7\n",
        );

        assert!(output.contains("Withdrawal successful."));
        assert!(output.contains("Error: Insufficient balance"));
        assert!(output.contains("Balance: -3000\n"));
        assert_eq!(bank.find_account(2).unwrap().balance(), -3000.0);
    }

    #[test]
    fn test_unknown_account_reported() {
        let mut bank = Bank::new();
        let output = run_script(&mut bank, "5\n999\n3\nxyz\n7\n");

        assert_eq!(output.matches("Error: Account not found").count(), 2);
    }

    #[test]
    fn test_deposit_amount_read_before_lookup() {
        let mut bank = Bank::new();
        let output = run_script(&mut bank, "3\n999\nlots\n7\n");

        assert!(output.contains("Enter Amount: "));
        assert!(output.contains("Error: Invalid transaction amount"));
    }

    #[test]
    fn test_invalid_amounts_reported() {
        let mut bank = Bank::new();
        let output = run_script(
            &mut bank,
            "1\n1\nAlice\nlots\n\
             1\n1\nAlice\n100\n\
             3\n1\n-5\n\
             4\n1\n0\n\
             7\n",
        );

        assert_eq!(output.matches("Error: Invalid transaction amount").count(), 3);
        assert_eq!(bank.count(), 1);
        assert_eq!(bank.find_account(1).unwrap().balance(), 100.0);
    }

    #[test]
    fn test_bad_menu_input_recovers() {
        let mut bank = Bank::new();
        let output = run_script(&mut bank, "abc\n\n9\n0\n7\n");

        assert_eq!(output.matches("Invalid input. Try again.").count(), 2);
        assert_eq!(output.matches("Invalid menu option.").count(), 2);
        assert!(!output.contains("Enter Account Number: "));
        assert!(output.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_blank_name_asked_again() {
        let mut bank = Bank::new();
        let output = run_script(&mut bank, "2\n4\n\n   \nDana Scully\n50\n7\n");

        assert_eq!(output.matches("Enter Name: ").count(), 3);
        assert_eq!(bank.find_account(4).unwrap().holder_name(), "Dana Scully");
    }

    #[test]
    fn test_negative_initial_balance_accepted() {
        let mut bank = Bank::new();
        run_script(&mut bank, "1\n3\nCarol\n-250\n7\n");

        assert_eq!(bank.find_account(3).unwrap().balance(), -250.0);
    }

    #[test]
    fn test_duplicate_number_replaces_account() {
        let mut bank = Bank::new();
        let output = run_script(&mut bank, "1\n5\nAlice\n10\n2\n5\nBob\n20\n7\n");

        assert_eq!(output.matches("Account created successfully.").count(), 2);
        assert_eq!(bank.count(), 1);
        assert_eq!(bank.find_account(5).unwrap().holder_name(), "Bob");
    }

    #[test]
    fn test_end_of_input_exits_cleanly() {
        let mut bank = Bank::new();

        let output = run_script(&mut bank, "");
        assert_eq!(output, "Enter choice: Exiting...\n");

        // Input stops in the middle of account creation
        let output = run_script(&mut bank, "1\n4\nBob\n");
        assert!(output.ends_with("Exiting...\n"));
        assert!(bank.is_empty());
    }

    #[test]
    fn test_menu_is_printed_by_default() {
        let mut bank = Bank::new();
        let mut output = Vec::new();
        run_console(&mut bank, Cursor::new("7\n"), &mut output, ConsoleOptions::default()).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("1. Create Savings Account"));
        assert!(output.contains("7. Exit\nEnter choice: "));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_output_failure_ends_session() {
        let mut bank = Bank::new();
        let result = run_console(&mut bank, Cursor::new("7\n"), BrokenPipe, ConsoleOptions::default());

        let err = result.unwrap_err();
        assert!(err.downcast_ref::<io::Error>().is_some());
    }
}
