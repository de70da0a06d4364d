//! Ruster Shield - Heuristic fraud risk scoring
//!
//! Command-line front end over the scoring engine:
//! - `wallet <address>` scores an address with optional behavior / geo evidence
//! - `domain <domain>` runs the phishing heuristic on a domain name
//!
//! Reports are printed to stdout as JSON; logs go to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use ruster_shield::utils::constants::{APP_NAME, APP_VERSION};
use ruster_shield::{
    EngineConfig, FraudAnalyzer, GeoEvidence, ScoringWeights, TransactionEvidence,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "ruster_shield",
    version,
    about = "Fraud risk scoring for blockchain addresses and crypto domains"
)]
struct Args {
    /// Wallet reference database (JSON); built-in data when omitted
    #[arg(long, env = "RUSTER_REFERENCE_DB", global = true)]
    reference_db: Option<PathBuf>,

    /// Domain reference database (JSON); built-in data when omitted
    #[arg(long, env = "RUSTER_DOMAIN_DB", global = true)]
    domain_db: Option<PathBuf>,

    /// Print debug logs for every scoring dimension
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a wallet address
    Wallet {
        address: String,

        /// Observed transactions per hour
        #[arg(long)]
        tx_per_hour: Option<f64>,

        /// Number of dust-sized transactions
        #[arg(long, default_value_t = 0)]
        small_tx: u32,

        /// Country of the transacting party
        #[arg(long)]
        country: Option<String>,

        /// Scale weights so a wallet scan can reach 1.0
        #[arg(long)]
        renormalize: bool,
    },
    /// Score a domain name
    Domain { domain: String },
}

fn main() -> Result<()> {
    let args = Args::parse();

    FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    info!("🛡️ {} v{}", APP_NAME, APP_VERSION);

    let renormalize = matches!(args.command, Command::Wallet { renormalize: true, .. });
    let config = EngineConfig {
        reference_db_path: args.reference_db,
        domain_db_path: args.domain_db,
        weights: if renormalize {
            ScoringWeights::renormalized()
        } else {
            ScoringWeights::default()
        },
    };
    let analyzer = FraudAnalyzer::from_config(&config)?;

    match args.command {
        Command::Wallet {
            address,
            tx_per_hour,
            small_tx,
            country,
            ..
        } => {
            // Behavior evidence only exists when the caller supplied some
            let transaction = (tx_per_hour.is_some() || small_tx > 0)
                .then(|| TransactionEvidence::new(tx_per_hour.unwrap_or(0.0), small_tx));
            let geo = country.map(GeoEvidence::country);

            let report = analyzer.scan_wallet(&address, transaction.as_ref(), geo.as_ref())?;
            info!("{}", report.summary());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Domain { domain } => {
            let assessment = analyzer.scan_domain(&domain)?;
            info!(
                "{} {} risk for {} ({:.2})",
                assessment.risk_level.emoji(),
                assessment.risk_level,
                assessment.domain,
                assessment.risk_score()
            );
            println!("{}", serde_json::to_string_pretty(&assessment)?);
        }
    }

    Ok(())
}
