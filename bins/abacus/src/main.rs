//! Abacus
//!
//! Line-oriented driver for the calculator, finance forms and currency
//! converter. Rate refreshes run in the background and are applied between
//! commands.

mod app;
mod command;

use std::time::Instant;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use abacus_core::calculator::CalculatorMode;
use abacus_core::currency::{CurrencyConverter, CurrencySelection};
use abacus_rates::ExchangeRateApiClient;
use abacus_shared::{AppConfig, CurrencyCode};

use crate::app::{App, Reply};
use crate::command::Command;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays the command transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "abacus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load()?;
    let mode: CalculatorMode = config
        .calculator
        .default_mode
        .parse()
        .map_err(anyhow::Error::msg)?;
    let from: CurrencyCode = config
        .rates
        .default_from
        .parse()
        .map_err(anyhow::Error::msg)?;
    let to: CurrencyCode = config
        .rates
        .default_to
        .parse()
        .map_err(anyhow::Error::msg)?;

    let provider = ExchangeRateApiClient::from_config(&config.rates)?;
    let converter = CurrencyConverter::new(provider, config.rates.timeout());
    info!(
        api_url = %config.rates.api_url,
        from = %from,
        to = %to,
        mode = %mode,
        "Abacus started"
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(
        mode,
        converter,
        CurrencySelection::new(from, to),
        config.rates.status_message_ttl(),
        tx,
    );
    app.start(config.rates.startup_delay());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(completion) = rx.recv() => {
                for line in app.apply(completion, Instant::now()) {
                    println!("{line}");
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => match app.handle(command, Instant::now()) {
                        Reply::Lines(output) => {
                            for line in output {
                                println!("{line}");
                            }
                        }
                        Reply::Quit => break,
                    },
                    Err(err) => println!("{err}"),
                }
            }
        }
    }

    info!("Abacus stopped");
    Ok(())
}
