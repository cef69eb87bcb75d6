use anyhow::Result;
use clap::Parser;
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

// Use library instead of local modules
use bank_console::{run_console, Bank, ConsoleOptions, VERSION};

#[derive(Parser, Debug)]
#[command(name = "bank-console")]
#[command(about = "In-memory savings and current account manager.")]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. "debug", "bank_console=trace")
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Don't print the menu before each choice (useful with piped input)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    info!(version = VERSION, "starting bank console");

    // Lives for the whole session; every account is dropped with it
    let mut bank = Bank::new();

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_console(
        &mut bank,
        stdin.lock(),
        stdout.lock(),
        ConsoleOptions {
            show_menu: !cli.quiet,
        },
    )?;

    info!(accounts = bank.count(), "bank console closed");
    Ok(())
}

/// Logs go to stderr so they never interleave with the console dialogue
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
