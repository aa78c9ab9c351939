use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use sumup_reader::application::checkout::CheckoutInitiator;
use sumup_reader::application::poller::{
    DEFAULT_INTERVAL_MS, DEFAULT_MAX_ATTEMPTS, PollOptions, StatusPoller,
};
use sumup_reader::config::{AppConfig, DEFAULT_CONFIG_FILE};
use sumup_reader::domain::transaction::StatusQuery;
use sumup_reader::infrastructure::sumup::SumUpClient;
use sumup_reader::interfaces::cli::result_writer::ResultWriter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a checkout on the card reader and print its client transaction ID
    Checkout,

    /// Poll a transaction until it settles and print the final status
    Status {
        /// Client transaction ID returned by `checkout`
        transaction_id: String,

        #[command(flatten)]
        poll: PollArgs,
    },

    /// Create a checkout, then poll it until it settles
    Pay {
        #[command(flatten)]
        poll: PollArgs,
    },
}

#[derive(Args)]
struct PollArgs {
    /// Maximum number of status requests
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Delay between status requests, in milliseconds
    #[arg(long, default_value_t = DEFAULT_INTERVAL_MS)]
    interval_ms: u64,
}

impl PollArgs {
    fn options(&self) -> PollOptions {
        PollOptions {
            max_attempts: self.max_attempts,
            interval: Duration::from_millis(self.interval_ms),
        }
    }
}

/// Resolves on Ctrl-C. If the handler cannot be installed it never resolves.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Results go to stdout, everything else to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::load(&cli.config).into_diagnostic()?;
    let mut writer = ResultWriter::new(io::stdout());

    match cli.command {
        Command::Checkout => {
            let target = config.reader_target().into_diagnostic()?;
            let request = config.checkout_request().into_diagnostic()?;
            let client =
                SumUpClient::new(config.base_url(), config.bearer_token.as_str()).into_diagnostic()?;

            let initiator = CheckoutInitiator::new(Box::new(client), target);
            let result = initiator.initiate(&request).await.into_diagnostic()?;
            writer.write_checkout(&result).into_diagnostic()?;
        }
        Command::Status {
            transaction_id,
            poll,
        } => {
            let query = StatusQuery::new(&config.merchant_code, &transaction_id).into_diagnostic()?;
            let client =
                SumUpClient::new(config.base_url(), config.bearer_token.as_str()).into_diagnostic()?;

            let poller = StatusPoller::new(Box::new(client), poll.options());
            let status = poller
                .poll_until(&query, shutdown_signal())
                .await
                .into_diagnostic()?;
            writer.write_status(status).into_diagnostic()?;
        }
        Command::Pay { poll } => {
            let target = config.reader_target().into_diagnostic()?;
            let request = config.checkout_request().into_diagnostic()?;
            let client =
                SumUpClient::new(config.base_url(), config.bearer_token.as_str()).into_diagnostic()?;

            let initiator = CheckoutInitiator::new(Box::new(client.clone()), target);
            let checkout = initiator.initiate(&request).await.into_diagnostic()?;
            eprintln!(
                "Checkout {} created, waiting for the card...",
                checkout.transaction_id
            );

            let query =
                StatusQuery::new(&config.merchant_code, &checkout.transaction_id).into_diagnostic()?;
            let poller = StatusPoller::new(Box::new(client), poll.options());
            let status = poller
                .poll_until(&query, shutdown_signal())
                .await
                .into_diagnostic()?;
            writer.write_status(status).into_diagnostic()?;
        }
    }

    Ok(())
}
