// float_cmp: only in tests where assert_eq! on f64 is intentional.
#![cfg_attr(test, allow(clippy::float_cmp))]

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expirank::data::yahoo::YahooSource;
use expirank::engine::core;
use expirank::engine::types::{OptionType, Selection};
use expirank::report;

#[derive(Parser)]
#[command(name = "expirank")]
#[command(about = "Rank option expirations by premium collected per day", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Emit the full report as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a single call or put at one strike
    Single {
        ticker: String,
        strike: f64,
        /// Option type: c for calls, p for puts
        option_type: String,
    },
    /// Rank a put/call strangle
    Strangle {
        ticker: String,
        /// Put strike; a trailing p/c suffix is tolerated (e.g. 800p)
        put_strike: String,
        /// Call strike; a trailing p/c suffix is tolerated (e.g. 1200c)
        call_strike: String,
    },
}

fn parse_option_type(flag: &str) -> Result<OptionType> {
    if flag.contains('c') {
        Ok(OptionType::Call)
    } else if flag.contains('p') {
        Ok(OptionType::Put)
    } else {
        bail!("option type must be c or p, got {flag:?}");
    }
}

fn parse_strike(arg: &str) -> Result<f64> {
    let digits = arg.strip_suffix(['p', 'c']).unwrap_or(arg);
    digits
        .parse()
        .with_context(|| format!("invalid strike: {arg:?}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let (ticker, selection) = match &cli.command {
        Commands::Single {
            ticker,
            strike,
            option_type,
        } => (
            ticker.clone(),
            Selection::single(*strike, parse_option_type(option_type)?),
        ),
        Commands::Strangle {
            ticker,
            put_strike,
            call_strike,
        } => (
            ticker.clone(),
            Selection::strangle(parse_strike(put_strike)?, parse_strike(call_strike)?)?,
        ),
    };

    tracing::info!(
        "fetching quotes for ${} {}",
        ticker.to_uppercase(),
        selection.describe()
    );

    let source = YahooSource::new()?;
    let ranking = core::rank(&source, &ticker, &selection).await?;

    if cli.json {
        println!("{}", report::render_json(&ranking)?);
    } else {
        print!("{}", report::render_text(&ranking));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_type_letter_forms() {
        assert_eq!(parse_option_type("p").unwrap(), OptionType::Put);
        assert_eq!(parse_option_type("calls").unwrap(), OptionType::Call);
        assert!(parse_option_type("x").is_err());
    }

    #[test]
    fn strike_suffix_is_stripped() {
        assert_eq!(parse_strike("800").unwrap(), 800.0);
        assert_eq!(parse_strike("800p").unwrap(), 800.0);
        assert_eq!(parse_strike("1200c").unwrap(), 1200.0);
        assert!(parse_strike("800x").is_err());
    }
}
