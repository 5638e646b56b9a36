use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Parser;
use zeroize::Zeroizing;

use slip39_codec::cli::{Cli, Commands, trim_line};
use slip39_codec::commands::{combine_shares, inspect_share, split_secret};
use slip39_codec::domain::SplitConfig;

/// Read one line securely from stdin (hidden input when TTY available)
fn read_secret_line(prompt: &str) -> Result<Zeroizing<String>> {
    if atty::is(atty::Stream::Stdin) {
        eprintln!("{prompt}");
        let line =
            Zeroizing::new(rpassword::read_password().context("Failed to read from stdin")?);
        Ok(trim_line(&line))
    } else {
        // Non-interactive mode (piped input) - read directly from stdin
        let stdin = io::stdin();
        let mut handle = stdin.lock();
        // sized for a 256-bit hex secret or a 33-word share
        let mut line = Zeroizing::new(String::with_capacity(512));
        handle
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        Ok(trim_line(&line))
    }
}

/// Prompt for a passphrase on the terminal, or use the empty passphrase
fn read_passphrase(prompt: bool) -> Result<Zeroizing<String>> {
    if !prompt {
        return Ok(Zeroizing::new(String::new()));
    }
    let passphrase = rpassword::prompt_password("Enter passphrase: ")
        .context("Failed to read passphrase")?;
    Ok(Zeroizing::new(passphrase))
}

/// Read shares securely from stdin (hidden input when TTY available)
/// User should input shares one per line, followed by an empty line to finish
fn read_shares() -> Result<Vec<String>> {
    let mut shares = Vec::new();

    if atty::is(atty::Stream::Stdin) {
        // Interactive mode - use rpassword for hidden input
        eprintln!("Enter SLIP-39 shares (one per line, empty line to finish):");

        loop {
            let share = Zeroizing::new(
                rpassword::read_password().context("Failed to read share from stdin")?,
            );

            // Empty line signals we're done
            if share.trim().is_empty() {
                break;
            }

            shares.push(share.trim().to_string());
        }
    } else {
        // Non-interactive mode - read from stdin
        let stdin = io::stdin();
        let handle = stdin.lock();

        for line in handle.lines() {
            let line = Zeroizing::new(line.context("Failed to read line from stdin")?);
            let trimmed = line.trim();

            // Empty line signals we're done
            if trimmed.is_empty() {
                break;
            }

            shares.push(trimmed.to_string());
        }
    }

    if shares.is_empty() {
        anyhow::bail!("No shares provided");
    }

    Ok(shares)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            groups,
            group_threshold,
            iteration_exponent,
            extendable,
            passphrase,
        } => {
            let config = SplitConfig::new(group_threshold, groups)?
                .with_iteration_exponent(iteration_exponent)
                .with_extendable(extendable);

            let secret = read_secret_line("Enter master secret (hex):")?;
            let passphrase = read_passphrase(passphrase)?;

            let groups = split_secret(&secret, &config, &passphrase)?;
            for (group_idx, group) in groups.iter().enumerate() {
                let spec = &config.groups()[group_idx];
                println!(
                    "Group {} of {} ({} of {} shares required):",
                    group_idx + 1,
                    groups.len(),
                    *spec.threshold(),
                    *spec.count()
                );
                for mnemonic in group {
                    println!("{}", mnemonic.as_str());
                }
                println!();
            }
        }
        Commands::Combine { passphrase } => {
            let shares = read_shares()?;
            let passphrase = read_passphrase(passphrase)?;

            let secret = combine_shares(&shares, &passphrase)?;
            println!("{}", secret.as_str());
        }
        Commands::Inspect => {
            let share = read_secret_line("Enter share:")?;
            println!("{}", inspect_share(&share)?);
        }
    }

    Ok(())
}
