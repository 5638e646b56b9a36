//! Share-by-share recovery
//!
//! Entry points for an interactive recovery flow, where shares are typed in
//! one at a time and each is checked as soon as it is complete:
//!
//! 1. [`check_first_share`] validates the first share and reveals how many
//!    more are needed.
//! 2. [`check_share`] validates every following share and rejects, before even
//!    looking at the checksum, one that belongs to a different backup.
//! 3. [`get_master_secret`] combines the collected shares of a single group.
//! 4. [`get_seed`] derives the seed for a passphrase from the encrypted master
//!    secret, so the passphrase can be asked for after the shares.
//!
//! [`RecoverySession`] bundles these steps into one caller-owned object.

use log::{debug, warn};
use zeroize::Zeroizing;

use crate::codec::{MIN_MNEMONIC_LENGTH_WORDS, Share, ShareMetadata};
use crate::domain::{Identifier, IterationExponent};
use crate::error::{Result, Slip39Error};
use crate::slip39::{self, EncryptedMasterSecret};
use crate::wordlist;

/// Word count of a share carrying a 128-bit secret
pub const WORD_COUNT_128: usize = MIN_MNEMONIC_LENGTH_WORDS;

/// Word count of a share carrying a 256-bit secret
pub const WORD_COUNT_256: usize = 33;

/// A recovered backup: the encrypted master secret and the secret it decrypts
/// to under the empty passphrase
#[derive(Clone)]
pub struct RecoveredSecret {
    pub ems: EncryptedMasterSecret,
    pub master_secret: Zeroizing<Vec<u8>>,
}

impl std::fmt::Debug for RecoveredSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecoveredSecret")
            .field("ems", &self.ems)
            .finish_non_exhaustive()
    }
}

fn check_word_count(word_count: usize) -> Result<()> {
    if word_count == WORD_COUNT_128 || word_count == WORD_COUNT_256 {
        Ok(())
    } else {
        Err(Slip39Error::InvalidShardBuffer("word count must be 20 or 33"))
    }
}

fn parse_words(mnemonic: &str, word_count: usize) -> Result<Zeroizing<Vec<u16>>> {
    check_word_count(word_count)?;
    let words = wordlist::mnemonic_to_indices(mnemonic)?;
    if words.len() < word_count {
        return Err(Slip39Error::NotEnoughMnemonicWords {
            got: words.len(),
            min: word_count,
        });
    }
    if words.len() > word_count {
        return Err(Slip39Error::InvalidShardBuffer("mnemonic has too many words"));
    }
    Ok(words)
}

/// Validates the first share of a recovery and returns its metadata
///
/// # Errors
/// - [`Slip39Error::InvalidShardBuffer`] if `word_count` is not 20 or 33, or
///   the mnemonic is longer than that
/// - [`Slip39Error::NotEnoughMnemonicWords`] if it is shorter
/// - any decoding error from [`Share::from_words`]
pub fn check_first_share(mnemonic: &str, word_count: usize) -> Result<ShareMetadata> {
    let words = parse_words(mnemonic, word_count)?;
    let share = Share::from_words(&words)?;
    Ok(*share.metadata())
}

/// Validates a follow-up share against the backup being recovered
///
/// The identifier, extendable flag and iteration exponent are read from the
/// first two words and compared before the share is decoded.
///
/// # Errors
/// - [`Slip39Error::NotBelongThisWallet`] if the share is from another backup
/// - otherwise the same as [`check_first_share`]
pub fn check_share(
    mnemonic: &str,
    word_count: usize,
    identifier: Identifier,
    extendable: bool,
    iteration_exponent: IterationExponent,
) -> Result<ShareMetadata> {
    let words = parse_words(mnemonic, word_count)?;

    let share_identifier = (words[0] << 5) | (words[1] >> 5);
    let share_extendable = (words[1] >> 4) & 1 == 1;
    let share_exponent = words[1] & 0xf;
    if share_identifier != *identifier
        || share_extendable != extendable
        || share_exponent != u16::from(*iteration_exponent)
    {
        warn!("share does not belong to backup {identifier}");
        return Err(Slip39Error::NotBelongThisWallet);
    }

    let share = Share::from_words(&words)?;
    Ok(*share.metadata())
}

/// Combines the shares of a single group and decrypts with the empty passphrase
///
/// # Errors
/// - [`Slip39Error::NotEnoughMemberShards`] if fewer than `member_threshold`
///   mnemonics are given
/// - [`Slip39Error::InvalidShardSet`] if the shares disagree with
///   `member_threshold` or with each other
/// - word count and decoding errors as for [`check_first_share`]
pub fn get_master_secret<S: AsRef<str>>(
    member_threshold: u8,
    word_count: usize,
    mnemonics: &[S],
) -> Result<RecoveredSecret> {
    if mnemonics.is_empty() {
        return Err(Slip39Error::EmptyMnemonicSet);
    }

    let mut shares = Vec::with_capacity(mnemonics.len());
    for mnemonic in mnemonics {
        let words = parse_words(mnemonic.as_ref(), word_count)?;
        shares.push(Share::from_words(&words)?);
    }

    let first = *shares[0].metadata();
    if *first.member_threshold != member_threshold {
        return Err(Slip39Error::InvalidShardSet(
            "member threshold does not match the shares",
        ));
    }
    if shares.len() < member_threshold as usize {
        return Err(Slip39Error::NotEnoughMemberShards {
            group: *first.group_index,
            needed: member_threshold,
            got: shares.len(),
        });
    }

    let ems = slip39::combine_shares(&shares)?;
    let master_secret = ems.decrypt(b"")?;
    debug!("recovered backup {}", ems.identifier());

    Ok(RecoveredSecret { ems, master_secret })
}

/// Derives the seed for `passphrase` from an encrypted master secret
///
/// # Errors
/// - [`Slip39Error::InvalidPassphrase`] if the passphrase is not printable ASCII
/// - [`Slip39Error::SecretTooShort`] or [`Slip39Error::InvalidSecretLength`]
///   for an unsupported length
pub fn get_seed(
    ems: &[u8],
    passphrase: &[u8],
    iteration_exponent: IterationExponent,
    extendable: bool,
    identifier: Identifier,
) -> Result<Zeroizing<Vec<u8>>> {
    EncryptedMasterSecret::new(
        identifier,
        extendable,
        iteration_exponent,
        Zeroizing::new(ems.to_vec()),
    )?
    .decrypt(passphrase)
}

/// Progress of a [`RecoverySession`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Shares accepted so far
    pub collected: usize,
    /// Shares needed, known once the first share is in
    pub needed: Option<u8>,
}

/// Caller-owned state of a share-by-share recovery
///
/// ```rust
/// use slip39_codec::recovery::RecoverySession;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut session = RecoverySession::new(20)?;
/// session.add_mnemonic(
///     "duckling enlarge academic academic agency result length solution fridge kidney \
///      coal piece deal husband erode duke ajar critical decision keyboard",
/// )?;
/// assert!(session.is_complete());
///
/// let secret = session.finish(b"TREZOR")?;
/// assert_eq!(hex::encode(&*secret), "bb54aac4b89dc868ba37d9cc21b2cece");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RecoverySession {
    word_count: usize,
    shares: Vec<Share>,
}

impl RecoverySession {
    /// Starts a recovery of shares with `word_count` words
    ///
    /// # Errors
    /// Returns [`Slip39Error::InvalidShardBuffer`] unless `word_count` is 20 or 33
    pub fn new(word_count: usize) -> Result<Self> {
        check_word_count(word_count)?;
        Ok(Self {
            word_count,
            shares: Vec::new(),
        })
    }

    /// Checks one share and keeps it
    ///
    /// Returns the share's metadata. A rejected share leaves the session unchanged.
    ///
    /// # Errors
    /// - [`Slip39Error::NotBelongThisWallet`] for a share of another backup
    /// - [`Slip39Error::InvalidShardSet`] if it disagrees on group parameters
    /// - [`Slip39Error::DuplicateMemberIndex`] if the member was already added
    /// - word count and decoding errors as for [`check_first_share`]
    pub fn add_mnemonic(&mut self, mnemonic: &str) -> Result<ShareMetadata> {
        let metadata = match self.shares.first() {
            None => check_first_share(mnemonic, self.word_count)?,
            Some(first) => {
                let m = first.metadata();
                let metadata = check_share(
                    mnemonic,
                    self.word_count,
                    m.identifier,
                    m.extendable,
                    m.iteration_exponent,
                )?;
                if metadata.group_threshold != m.group_threshold
                    || metadata.group_count != m.group_count
                {
                    return Err(Slip39Error::InvalidShardSet(
                        "shares have different group parameters",
                    ));
                }
                if self.shares.iter().any(|s| {
                    s.metadata().group_index == metadata.group_index
                        && s.metadata().member_index == metadata.member_index
                }) {
                    return Err(Slip39Error::DuplicateMemberIndex {
                        group: *metadata.group_index,
                        member: *metadata.member_index,
                    });
                }
                metadata
            }
        };

        self.shares.push(Share::from_mnemonic(mnemonic)?);
        debug!(
            "accepted member {} of group {} ({} shares)",
            *metadata.member_index,
            *metadata.group_index,
            self.shares.len()
        );
        Ok(metadata)
    }

    /// Shares collected and shares needed from the first share's group
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            collected: self.shares.len(),
            needed: self
                .shares
                .first()
                .map(|s| *s.metadata().member_threshold),
        }
    }

    /// Whether enough shares are in to attempt recovery of a single-group backup
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self.progress() {
            Progress {
                collected,
                needed: Some(needed),
            } => {
                collected >= needed as usize
                    && self
                        .shares
                        .first()
                        .is_some_and(|s| *s.metadata().group_threshold == 1)
            }
            _ => false,
        }
    }

    /// Metadata of the first accepted share
    #[must_use]
    pub fn backup(&self) -> Option<&ShareMetadata> {
        self.shares.first().map(Share::metadata)
    }

    /// Combines the collected shares and decrypts with `passphrase`
    ///
    /// # Errors
    /// Same as [`slip39::combine_shares`] and [`EncryptedMasterSecret::decrypt`]
    pub fn finish(self, passphrase: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        slip39::combine_shares(&self.shares)?.decrypt(passphrase)
    }
}
