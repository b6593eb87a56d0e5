//! agreement-ledger - run one call against an agreement ledger
//!
//! Opens the ledger file given by `--db` (or a throwaway in-memory ledger),
//! performs a single `setup`, `invoke`, or `query`, and prints any output.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use agreement_server::storage::ledgers::MemoryLedger;
#[cfg(feature = "redb")]
use agreement_server::storage::ledgers::RedbLedger;
use agreement_server::{AgreementLedger, LedgerConfig, LedgerPort};
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// agreement-ledger - agreement records on a key-value ledger
#[derive(Parser, Debug)]
#[command(name = "agreement-ledger")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the ledger database file; in-memory when omitted
    #[arg(long, env = "AGREEMENT_LEDGER_DB")]
    db: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the diagnostic seed and reset the index
    Setup {
        /// Setup arguments (exactly one seed value)
        args: Vec<String>,
    },

    /// Run a mutating operation (create_agreement, update_po, delete_po)
    Invoke {
        /// Operation name
        operation: String,
        /// Positional arguments
        args: Vec<String>,
    },

    /// Run a read-only operation (getAgreement_byID, getAgreement_byBuyer, ...)
    Query {
        /// Operation name
        operation: String,
        /// Positional arguments
        args: Vec<String>,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn open_ledger(db: Option<&PathBuf>) -> anyhow::Result<Arc<dyn LedgerPort>> {
    match db {
        #[cfg(feature = "redb")]
        Some(path) => {
            let ledger = RedbLedger::open(path)
                .with_context(|| format!("failed to open ledger at {}", path.display()))?;
            Ok(Arc::new(ledger))
        }
        #[cfg(not(feature = "redb"))]
        Some(path) => anyhow::bail!(
            "cannot open {}: built without the redb feature",
            path.display()
        ),
        None => Ok(Arc::new(MemoryLedger::new())),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let ledger = match open_ledger(cli.db.as_ref()) {
        Ok(ledger) => ledger,
        Err(err) => {
            eprintln!("{err:#}");
            return ExitCode::FAILURE;
        }
    };
    let agreements = AgreementLedger::new(ledger, LedgerConfig::default());

    let result = match cli.command {
        Commands::Setup { args } => agreements.setup(args).await,
        Commands::Invoke { operation, args } => agreements.invoke(&operation, args).await,
        Commands::Query { operation, args } => agreements.query(&operation, args).await,
    };

    match result {
        Ok(bytes) => {
            if !bytes.is_empty() {
                let mut stdout = std::io::stdout().lock();
                if let Err(err) = stdout.write_all(&bytes).and_then(|()| writeln!(stdout)) {
                    eprintln!("failed to write output: {err}");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}: {err}", err.kind());
            ExitCode::FAILURE
        }
    }
}
