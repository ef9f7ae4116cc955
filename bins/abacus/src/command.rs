//! Driver command parsing.

use std::str::FromStr;

use abacus_core::calculator::CalculatorMode;
use abacus_shared::CurrencyCode;
use thiserror::Error;

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  key <label>...            press calculator keys (e.g. key 7 + 3 =)
  mode <basic|scientific|financial>
  simple <P> <rate%> <years>
  compound <P> <rate%> <years> <n per year>
  loan <P> <annual rate%> <years>
  from <CODE>               select source currency (refetches rates)
  to <CODE>                 select target currency
  convert <amount>
  update                    refetch rates for the source currency
  currencies                list supported currencies
  status                    show rate status
  help
  quit";

/// One line of driver input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Press keypad labels in order.
    Keys(Vec<String>),
    /// Switch calculator mode.
    Mode(CalculatorMode),
    /// Simple interest form fields.
    Simple {
        /// Principal.
        principal: String,
        /// Annual rate in percent.
        rate: String,
        /// Years.
        years: String,
    },
    /// Compound interest form fields.
    Compound {
        /// Principal.
        principal: String,
        /// Annual rate in percent.
        rate: String,
        /// Years.
        years: String,
        /// Compounding periods per year.
        periods: String,
    },
    /// Loan form fields.
    Loan {
        /// Principal.
        principal: String,
        /// Annual rate in percent.
        rate: String,
        /// Term in years.
        years: String,
    },
    /// Select source currency.
    From(CurrencyCode),
    /// Select target currency.
    To(CurrencyCode),
    /// Convert the typed amount.
    Convert(String),
    /// Manual rate refresh.
    Update,
    /// List supported currencies.
    Currencies,
    /// Show rate status.
    Status,
    /// Show help.
    Help,
    /// Exit.
    Quit,
}

/// Errors that can occur while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Blank line.
    #[error("empty command")]
    Empty,

    /// First word is not a command.
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    /// Wrong number of arguments.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// Argument could not be parsed.
    #[error("{0}")]
    InvalidArgument(String),
}

fn exact<'a, const N: usize>(
    args: &[&'a str],
    usage: &'static str,
) -> Result<[&'a str; N], CommandError> {
    <[&str; N]>::try_from(args).map_err(|_| CommandError::Usage(usage))
}

fn currency(arg: &str) -> Result<CurrencyCode, CommandError> {
    let code: CurrencyCode = arg.parse().map_err(CommandError::InvalidArgument)?;
    if code.is_supported() {
        Ok(code)
    } else {
        Err(CommandError::InvalidArgument(format!(
            "Unsupported currency: {code}"
        )))
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        match name.to_ascii_lowercase().as_str() {
            "key" | "keys" if !args.is_empty() => Ok(Self::Keys(
                args.iter().map(ToString::to_string).collect(),
            )),
            "key" | "keys" => Err(CommandError::Usage("key <label>...")),
            "mode" => {
                let [mode] = exact(&args, "mode <basic|scientific|financial>")?;
                mode.parse()
                    .map(Self::Mode)
                    .map_err(CommandError::InvalidArgument)
            }
            "simple" => {
                let [principal, rate, years] = exact(&args, "simple <P> <rate%> <years>")?;
                Ok(Self::Simple {
                    principal: principal.to_string(),
                    rate: rate.to_string(),
                    years: years.to_string(),
                })
            }
            "compound" => {
                let [principal, rate, years, periods] =
                    exact(&args, "compound <P> <rate%> <years> <n per year>")?;
                Ok(Self::Compound {
                    principal: principal.to_string(),
                    rate: rate.to_string(),
                    years: years.to_string(),
                    periods: periods.to_string(),
                })
            }
            "loan" => {
                let [principal, rate, years] = exact(&args, "loan <P> <annual rate%> <years>")?;
                Ok(Self::Loan {
                    principal: principal.to_string(),
                    rate: rate.to_string(),
                    years: years.to_string(),
                })
            }
            "from" => {
                let [code] = exact(&args, "from <CODE>")?;
                currency(code).map(Self::From)
            }
            "to" => {
                let [code] = exact(&args, "to <CODE>")?;
                currency(code).map(Self::To)
            }
            "convert" => {
                let [amount] = exact(&args, "convert <amount>")?;
                Ok(Self::Convert(amount.to_string()))
            }
            "update" => Ok(Self::Update),
            "currencies" => Ok(Self::Currencies),
            "status" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
