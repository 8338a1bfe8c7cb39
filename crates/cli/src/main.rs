//! CompliantToken CLI - Main entry point

use anyhow::Context;
use clap::{Parser, Subcommand};
use ctoken_cli::{commands, AppContext};
use ctoken_core::{Address, ComplianceId};
use ctoken_journal::KeySigner;
use ctoken_token::TokenConfig;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const KEY_ENV: &str = "CTOKEN_KEY";

#[derive(Parser)]
#[command(name = "ctoken")]
#[command(about = "CompliantToken - regulated token with compliance signoff", long_about = None)]
struct Cli {
    /// Data directory path
    #[arg(short, long, default_value = "./data")]
    data: PathBuf,

    /// Caller key file (hex seed); falls back to the CTOKEN_KEY env var
    #[arg(short, long, global = true)]
    key: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a new token
    Init {
        /// Display name
        #[arg(long)]
        name: String,
        /// Ticker symbol
        #[arg(long)]
        symbol: String,
        /// Document registry reference
        #[arg(long)]
        registry: String,
        /// Issuer address (defaults to the caller key's address)
        #[arg(long)]
        issuer: Option<Address>,
        /// Display decimals
        #[arg(long, default_value_t = ctoken_core::DEFAULT_DECIMALS)]
        decimals: u32,
        /// Compliance version in force at deployment
        #[arg(long, default_value_t = ComplianceId::default())]
        compliance_id: ComplianceId,
    },

    /// Generate a new participant key
    Keygen {
        /// Output file path
        #[arg(long, default_value = "holder.key")]
        output: PathBuf,
    },

    /// Mint tokens to a holder (issuer)
    Issue {
        /// Holder address
        holder: Address,
        /// Amount in display units
        amount: Decimal,
    },

    /// Propose a new compliance version (issuer)
    #[command(alias = "propose")]
    OpenRound {
        /// New compliance id from the document registry
        compliance_id: ComplianceId,
    },

    /// Accept the pending compliance version
    Accept,

    /// Decline the pending compliance version
    Decline,

    /// Transfer tokens to another address
    Transfer {
        /// Receiver address
        receiver: Address,
        /// Amount in display units
        amount: Decimal,
    },

    /// Show a holder's balance and compliance status
    Balance {
        /// Holder address (defaults to the caller key's address)
        holder: Option<Address>,
    },

    /// Show token metadata and round state
    Status,

    /// List holders
    Holders {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify the journal (hash chain, signatures, replay)
    Audit,
}

fn load_signer(key: Option<&Path>) -> Result<KeySigner, anyhow::Error> {
    if let Some(path) = key {
        return KeySigner::from_file(path)
            .with_context(|| format!("Failed to load key from {}", path.display()));
    }

    let hex = std::env::var(KEY_ENV)
        .with_context(|| format!("No caller key: pass --key or set {}", KEY_ENV))?;
    Ok(KeySigner::from_hex(&hex)?)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let key = cli.key.as_deref();

    match cli.command {
        Commands::Init {
            name,
            symbol,
            registry,
            issuer,
            decimals,
            compliance_id,
        } => {
            let issuer = match issuer {
                Some(issuer) => issuer,
                None => load_signer(key)?.address(),
            };
            let config = TokenConfig::new(name, symbol, registry, issuer)
                .with_decimals(decimals)
                .with_initial_compliance_id(compliance_id);
            commands::init(&cli.data, config)?;
        }

        Commands::Keygen { output } => {
            commands::keygen(&output)?;
        }

        Commands::Issue { holder, amount } => {
            let signer = load_signer(key)?;
            let mut ctx = AppContext::open(&cli.data)?;
            commands::issue(&mut ctx, &signer, holder, amount)?;
        }

        Commands::OpenRound { compliance_id } => {
            let signer = load_signer(key)?;
            let mut ctx = AppContext::open(&cli.data)?;
            commands::open_round(&mut ctx, &signer, compliance_id)?;
        }

        Commands::Accept => {
            let signer = load_signer(key)?;
            let mut ctx = AppContext::open(&cli.data)?;
            commands::accept(&mut ctx, &signer)?;
        }

        Commands::Decline => {
            let signer = load_signer(key)?;
            let mut ctx = AppContext::open(&cli.data)?;
            commands::decline(&mut ctx, &signer)?;
        }

        Commands::Transfer { receiver, amount } => {
            let signer = load_signer(key)?;
            let mut ctx = AppContext::open(&cli.data)?;
            commands::transfer(&mut ctx, &signer, receiver, amount)?;
        }

        Commands::Balance { holder } => {
            let holder = match holder {
                Some(holder) => holder,
                None => load_signer(key)?.address(),
            };
            let ctx = AppContext::open(&cli.data)?;
            commands::balance(&ctx, holder)?;
        }

        Commands::Status => {
            let ctx = AppContext::open(&cli.data)?;
            commands::status(&ctx)?;
        }

        Commands::Holders { json } => {
            let ctx = AppContext::open(&cli.data)?;
            commands::holders(&ctx, json)?;
        }

        Commands::Audit => {
            commands::audit(&cli.data)?;
        }
    }

    Ok(())
}
