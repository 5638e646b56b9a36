use clap::{Parser, Subcommand};
use zeroize::Zeroizing;

use crate::domain::{GroupSpec, IterationExponent};

/// Parses a group given as `T/N`: T of N members recover the group
fn parse_group(s: &str) -> Result<GroupSpec, String> {
    let (threshold, count) = s
        .split_once('/')
        .ok_or_else(|| format!("'{s}' is not of the form THRESHOLD/COUNT, e.g. 2/3"))?;

    let threshold: u8 = threshold
        .trim()
        .parse()
        .map_err(|_| format!("'{threshold}' is not a valid number"))?;
    let count: u8 = count
        .trim()
        .parse()
        .map_err(|_| format!("'{count}' is not a valid number"))?;

    GroupSpec::new(threshold, count).map_err(|e| e.to_string())
}

/// Copies `line` without surrounding whitespace into a buffer wiped on drop
///
/// Takes the line already wrapped so the unwiped original never outlives the read.
#[must_use]
pub fn trim_line(line: &Zeroizing<String>) -> Zeroizing<String> {
    Zeroizing::new(line.trim().to_string())
}

/// Validates the PBKDF2 iteration exponent (0..=15)
fn parse_iteration_exponent(s: &str) -> Result<IterationExponent, String> {
    let value: u8 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    IterationExponent::new(value).map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "slip39")]
#[command(about = "Split a master secret into SLIP-39 mnemonic shares and combine them again")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a hex master secret (read from stdin) into shares
    Split {
        /// Group as THRESHOLD/COUNT; repeat for multiple groups
        #[arg(short, long = "group", value_parser = parse_group, required = true)]
        groups: Vec<GroupSpec>,

        /// Number of groups needed to recover the secret
        #[arg(short = 't', long, default_value_t = 1)]
        group_threshold: u8,

        /// PBKDF2 iteration exponent: 10000 << E iterations in total
        #[arg(short = 'e', long, default_value = "0", value_parser = parse_iteration_exponent)]
        iteration_exponent: IterationExponent,

        /// Create an extendable backup
        #[arg(long)]
        extendable: bool,

        /// Prompt for a passphrase protecting the master secret
        #[arg(short, long)]
        passphrase: bool,
    },
    /// Combine shares (one per line) to recover the master secret
    Combine {
        /// Prompt for the passphrase used at split time
        #[arg(short, long)]
        passphrase: bool,
    },
    /// Show the metadata of a single share
    Inspect,
}
