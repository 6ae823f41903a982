use clap::Parser;
use miette::{IntoDiagnostic, Result};
use mintpay::application::engine::GrantEngine;
use mintpay::application::notifier::Notifier;
use mintpay::domain::account::{Actor, PlayerId, Recipient};
use mintpay::domain::ports::{CurrencyRegistryBox, LedgerBox, MessageCatalogBox, MessengerBox};
use mintpay::infrastructure::catalog::StaticMessageCatalog;
use mintpay::infrastructure::console::ConsoleMessenger;
use mintpay::infrastructure::in_memory::{InMemoryCurrencyRegistry, InMemoryLedger};
#[cfg(feature = "storage-rocksdb")]
use mintpay::infrastructure::rocksdb::RocksDbLedger;
use mintpay::interfaces::csv::balance_writer::BalanceWriter;
use mintpay::interfaces::csv::grant_reader::GrantReader;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Recipient player id
    #[arg(required_unless_present = "batch")]
    recipient: Option<u64>,

    /// Raw amount string (signed; two decimals kept, extra digits truncated)
    #[arg(required_unless_present = "batch", allow_hyphen_values = true)]
    amount: Option<String>,

    /// Currency name (defaults to the registry's default currency)
    currency: Option<String>,

    /// Display name used for the recipient in notifications
    #[arg(long)]
    recipient_name: Option<String>,

    /// Name the grants are attributed to
    #[arg(long, default_value = "console")]
    actor: String,

    /// CSV file of grants to apply instead of a single grant
    #[arg(long, conflicts_with_all = ["recipient", "amount", "currency"])]
    batch: Option<PathBuf>,

    /// Path to persistent ledger (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// JSON file overriding the built-in currency registry
    #[arg(long)]
    currencies: Option<PathBuf>,

    /// JSON file overriding the built-in notification templates
    #[arg(long)]
    messages: Option<PathBuf>,
}

fn open_ledger(db_path: Option<PathBuf>) -> Result<LedgerBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => Ok(Box::new(RocksDbLedger::open(path).into_diagnostic()?)),
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemoryLedger::new()))
        }
        None => Ok(Box::new(InMemoryLedger::new())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("mintpay=info".parse().into_diagnostic()?),
        )
        .with_writer(io::stderr)
        .init();

    let ledger = open_ledger(cli.db_path)?;
    let registry: CurrencyRegistryBox = match &cli.currencies {
        Some(path) => Box::new(InMemoryCurrencyRegistry::from_path(path).into_diagnostic()?),
        None => Box::new(InMemoryCurrencyRegistry::with_defaults()),
    };
    let catalog: MessageCatalogBox = match &cli.messages {
        Some(path) => Box::new(StaticMessageCatalog::from_path(path).into_diagnostic()?),
        None => Box::new(StaticMessageCatalog::default()),
    };
    let messenger: MessengerBox = Box::new(ConsoleMessenger);

    let engine = GrantEngine::new(ledger, registry, Notifier::new(catalog, messenger));
    let actor = Actor::named(&cli.actor);

    if let Some(batch) = &cli.batch {
        // Apply every row; a bad row is reported and skipped, not fatal.
        let file = File::open(batch).into_diagnostic()?;
        let reader = GrantReader::new(file);
        for record in reader.grants() {
            match record {
                Ok(record) => {
                    let recipient = Recipient::new(PlayerId(record.player), &record.name);
                    if let Err(e) = engine
                        .grant(&actor, &recipient, &record.amount, record.currency.as_deref())
                        .await
                    {
                        eprintln!("Error applying grant: {}", e);
                    }
                }
                Err(e) => {
                    eprintln!("Error reading grant: {}", e);
                }
            }
        }
    } else {
        let (Some(recipient_id), Some(raw_amount)) = (cli.recipient, cli.amount.as_deref())
        else {
            return Err(miette::miette!("recipient and amount are required"));
        };
        let name = cli
            .recipient_name
            .unwrap_or_else(|| format!("player-{recipient_id}"));
        let recipient = Recipient::new(PlayerId(recipient_id), &name);

        engine
            .grant(&actor, &recipient, raw_amount, cli.currency.as_deref())
            .await
            .into_diagnostic()?;
    }

    // Output final state
    let report = engine.into_report().await.into_diagnostic()?;
    let stdout = io::stdout();
    let mut writer = BalanceWriter::new(stdout.lock());
    writer.write_balances(report).into_diagnostic()?;

    Ok(())
}
