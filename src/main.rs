use anchor_core::application::context::{DEFAULT_MORE_INFO_PATH, RenderContext};
use anchor_core::application::presenter::TransactionPresenter;
use anchor_core::application::service::AnchorService;
use anchor_core::domain::card::CardNumber;
use anchor_core::domain::ports::{AssetStore, TransactionStore};
use anchor_core::error::AnchorError;
use anchor_core::infrastructure::in_memory::{InMemoryAssetStore, InMemoryTransactionStore};
use anchor_core::interfaces::csv::asset_reader::AssetReader;
use anchor_core::interfaces::csv::transaction_reader::TransactionReader;
use anchor_core::interfaces::json::representation_writer::RepresentationWriter;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize and Luhn-check a card number
    Card {
        /// Card number; spaces and hyphens are ignored
        #[arg(allow_hyphen_values = true)]
        number: String,
    },
    /// Validate an amount against an asset's deposit bounds
    Amount {
        /// Assets CSV file
        #[arg(long)]
        assets: PathBuf,
        /// Asset code to validate against
        #[arg(long)]
        asset: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Render transactions as JSON Lines
    Render {
        /// Assets CSV file
        #[arg(long)]
        assets: PathBuf,
        /// Transactions CSV file
        #[arg(long)]
        transactions: PathBuf,
        /// Only render this asset's transactions, with a single asset lookup
        #[arg(long)]
        asset: Option<String>,
        /// Scheme, host and mount prefix used for more_info_url
        #[arg(long, env = "ANCHOR_BASE_URL")]
        base_url: Option<String>,
        /// Route of the more info page
        #[arg(long, env = "ANCHOR_MORE_INFO_PATH", default_value = DEFAULT_MORE_INFO_PATH)]
        more_info_path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "anchor_core=info".into()),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Card { number } => {
            let card = CardNumber::validate(&number).into_diagnostic()?;
            println!("{card}");
        }
        Command::Amount {
            assets,
            asset,
            amount,
        } => {
            let service = AnchorService::new(
                Box::new(load_assets(&assets).await?),
                Box::new(InMemoryTransactionStore::new()),
                TransactionPresenter::default(),
            );
            match service.validate_amount(&asset, &amount).await.into_diagnostic()? {
                Ok(rounded) => println!("{rounded}"),
                Err(errors) => return Err(miette!("{errors}")),
            }
        }
        Command::Render {
            assets,
            transactions,
            asset,
            base_url,
            more_info_path,
        } => {
            let context = base_url
                .map(|url| RenderContext::new(&url, &more_info_path))
                .transpose()
                .into_diagnostic()?;
            let (store, ids) = load_transactions(&transactions).await?;
            let service = AnchorService::new(
                Box::new(load_assets(&assets).await?),
                Box::new(store),
                TransactionPresenter::new(context),
            );

            let stdout = io::stdout();
            let mut writer = RepresentationWriter::new(stdout.lock());
            if let Some(code) = asset {
                let reps = service.transactions_for_asset(&code).await.into_diagnostic()?;
                writer.write_all(&reps).into_diagnostic()?;
            } else {
                for id in ids {
                    match service.transaction(id).await {
                        Ok(rep) => writer.write(&rep).into_diagnostic()?,
                        Err(e @ AnchorError::AssetNotFound(_)) => {
                            warn!(transaction = %id, "skipping transaction: {e}");
                        }
                        Err(e) => {
                            error!(transaction = %id, "render failed: {e}");
                            return Err(e).into_diagnostic();
                        }
                    }
                }
                writer.flush().into_diagnostic()?;
            }
        }
    }

    Ok(())
}

async fn load_assets(path: &Path) -> Result<InMemoryAssetStore> {
    let store = InMemoryAssetStore::new();
    let file = File::open(path).into_diagnostic()?;
    let mut count = 0usize;
    for asset in AssetReader::new(file).assets() {
        match asset {
            Ok(asset) => {
                store.store(asset).await.into_diagnostic()?;
                count += 1;
            }
            Err(e) => warn!("skipping asset record: {e}"),
        }
    }
    info!(count, path = %path.display(), "loaded assets");
    Ok(store)
}

async fn load_transactions(path: &Path) -> Result<(InMemoryTransactionStore, Vec<uuid::Uuid>)> {
    let store = InMemoryTransactionStore::new();
    let mut ids = Vec::new();
    let mut seen = HashSet::new();
    let file = File::open(path).into_diagnostic()?;
    for tx in TransactionReader::new(file).transactions() {
        match tx {
            Ok(tx) if !seen.insert(tx.id) => {
                warn!(transaction = %tx.id, "skipping duplicate transaction id");
            }
            Ok(tx) => {
                ids.push(tx.id);
                store.store(tx).await.into_diagnostic()?;
            }
            Err(e) => warn!("skipping transaction record: {e}"),
        }
    }
    info!(count = ids.len(), path = %path.display(), "loaded transactions");
    Ok((store, ids))
}
