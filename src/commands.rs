use anyhow::{Context, Result, bail};
use zeroize::Zeroizing;

use crate::codec::Share;
use crate::domain::SplitConfig;
use crate::slip39;

/// Split a hex-encoded master secret into SLIP-39 share mnemonics
///
/// Returns one vector of mnemonics per group.
///
/// # Errors
/// Returns an error if the hex is malformed, or the secret, passphrase or
/// configuration is rejected
pub fn split_secret(
    secret_hex: &str,
    config: &SplitConfig,
    passphrase: &str,
) -> Result<Vec<Vec<Zeroizing<String>>>> {
    let secret = Zeroizing::new(
        hex::decode(secret_hex.trim()).context("Master secret must be hex encoded")?,
    );

    let groups = slip39::split_master_secret(config, &secret, passphrase.as_bytes())
        .context("Failed to split master secret")?;

    let mut mnemonics = Vec::with_capacity(groups.len());
    for (group_idx, group) in groups.iter().enumerate() {
        let mut members = Vec::with_capacity(group.len());
        for share in group {
            let mnemonic = share
                .to_mnemonic()
                .with_context(|| format!("Failed to encode share of group #{}", group_idx + 1))?;
            members.push(Zeroizing::new(mnemonic.as_str().to_string()));
        }
        mnemonics.push(members);
    }

    Ok(mnemonics)
}

/// Combine SLIP-39 share mnemonics into the hex-encoded master secret
///
/// # Errors
/// Returns an error if a share fails to decode or the share set cannot be combined
pub fn combine_shares(share_strings: &[String], passphrase: &str) -> Result<Zeroizing<String>> {
    if share_strings.is_empty() {
        bail!("No shares provided");
    }

    let mut shares = Vec::with_capacity(share_strings.len());
    for (idx, share_str) in share_strings.iter().enumerate() {
        let share = Share::from_mnemonic(share_str)
            .with_context(|| format!("Failed to parse share #{}", idx + 1))?;
        shares.push(share);
    }

    let ems = slip39::combine_shares(&shares).context("Failed to combine shares")?;
    let secret = ems
        .decrypt(passphrase.as_bytes())
        .context("Failed to decrypt master secret")?;

    Ok(Zeroizing::new(hex::encode(&*secret)))
}

/// Describe the metadata of a single share, one field per line
///
/// # Errors
/// Returns an error if the share fails to decode
pub fn inspect_share(share_str: &str) -> Result<String> {
    let share = Share::from_mnemonic(share_str).context("Failed to parse share")?;
    let m = share.metadata();

    Ok(format!(
        "identifier: {}\n\
         extendable: {}\n\
         iteration exponent: {}\n\
         group: {} of {} (threshold {})\n\
         member: {} (threshold {})\n\
         words: {}\n\
         secret length: {} bits",
        m.identifier,
        m.extendable,
        *m.iteration_exponent,
        *m.group_index + 1,
        *m.group_count,
        *m.group_threshold,
        *m.member_index + 1,
        *m.member_threshold,
        share.word_count(),
        share.value().len() * 8,
    ))
}
