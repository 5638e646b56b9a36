//! Two-level SLIP-39 split and combine
//!
//! The master secret is first encrypted with the passphrase into an
//! [`EncryptedMasterSecret`]. That value is Shamir-split into group secrets
//! (`group_threshold` of `group_count`), and each group secret is split again
//! into member shares according to its [`GroupSpec`](crate::domain::GroupSpec).
//! Combining runs the same steps backwards and checks that every share belongs
//! to the same backup before interpolating anything.

use std::collections::BTreeMap;

use log::{debug, warn};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::cipher;
use crate::codec::{Share, ShareMetadata, ShareMnemonic};
use crate::domain::{Identifier, IterationExponent, ShareCount, ShareIndex, SplitConfig};
use crate::error::{Result, Slip39Error};
use crate::shamir::{self, MIN_SECRET_LENGTH_BYTES};

/// Longest supported master secret in bytes (256 bits)
pub const MAX_SECRET_LENGTH_BYTES: usize = 32;

/// Checks that a master secret length is supported: even, 16 to 32 bytes
///
/// # Errors
/// - [`Slip39Error::SecretTooShort`] below 16 bytes
/// - [`Slip39Error::InvalidSecretLength`] for odd lengths or above 32 bytes
pub fn validate_secret_length(len: usize) -> Result<()> {
    if len < MIN_SECRET_LENGTH_BYTES {
        return Err(Slip39Error::SecretTooShort {
            got: len,
            min: MIN_SECRET_LENGTH_BYTES,
        });
    }
    if len % 2 != 0 || len > MAX_SECRET_LENGTH_BYTES {
        return Err(Slip39Error::InvalidSecretLength(len));
    }
    Ok(())
}

/// The passphrase-encrypted master secret together with its parameters
///
/// This is the value that is actually split into shares. Whoever holds it
/// can derive the master secret for any passphrase.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedMasterSecret {
    identifier: Identifier,
    extendable: bool,
    iteration_exponent: IterationExponent,
    value: Zeroizing<Vec<u8>>,
}

impl std::fmt::Debug for EncryptedMasterSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedMasterSecret")
            .field("identifier", &self.identifier)
            .field("extendable", &self.extendable)
            .field("iteration_exponent", &self.iteration_exponent)
            .field("value", &format_args!("<{} bytes>", self.value.len()))
            .finish()
    }
}

impl EncryptedMasterSecret {
    /// Wraps an already encrypted value
    ///
    /// # Errors
    /// Same as [`validate_secret_length`]
    pub fn new(
        identifier: Identifier,
        extendable: bool,
        iteration_exponent: IterationExponent,
        value: Zeroizing<Vec<u8>>,
    ) -> Result<Self> {
        validate_secret_length(value.len())?;
        Ok(Self {
            identifier,
            extendable,
            iteration_exponent,
            value,
        })
    }

    /// Encrypts `master_secret` under `passphrase`
    ///
    /// # Errors
    /// - [`Slip39Error::SecretTooShort`] or [`Slip39Error::InvalidSecretLength`]
    ///   for an unsupported secret length
    /// - [`Slip39Error::InvalidPassphrase`] if the passphrase is not printable ASCII
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slip39_codec::domain::{Identifier, IterationExponent};
    /// use slip39_codec::slip39::EncryptedMasterSecret;
    ///
    /// let secret = [0x11u8; 16];
    /// let ems = EncryptedMasterSecret::from_master_secret(
    ///     &secret,
    ///     b"correct horse",
    ///     Identifier::new(42).unwrap(),
    ///     false,
    ///     IterationExponent::default(),
    /// )
    /// .unwrap();
    ///
    /// assert_ne!(ems.value(), &secret);
    /// assert_eq!(ems.decrypt(b"correct horse").unwrap().as_slice(), &secret);
    /// ```
    pub fn from_master_secret(
        master_secret: &[u8],
        passphrase: &[u8],
        identifier: Identifier,
        extendable: bool,
        iteration_exponent: IterationExponent,
    ) -> Result<Self> {
        validate_secret_length(master_secret.len())?;
        let value = cipher::encrypt(
            master_secret,
            passphrase,
            identifier,
            extendable,
            iteration_exponent,
        )?;
        Ok(Self {
            identifier,
            extendable,
            iteration_exponent,
            value,
        })
    }

    /// Recovers the master secret for `passphrase`
    ///
    /// Any printable passphrase succeeds; a wrong one yields a different secret.
    ///
    /// # Errors
    /// Returns [`Slip39Error::InvalidPassphrase`] if the passphrase is not printable ASCII
    pub fn decrypt(&self, passphrase: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        cipher::decrypt(
            &self.value,
            passphrase,
            self.identifier,
            self.extendable,
            self.iteration_exponent,
        )
    }

    /// Gets the backup identifier
    #[must_use]
    pub fn identifier(&self) -> Identifier {
        self.identifier
    }

    /// Whether the backup is extendable
    #[must_use]
    pub fn extendable(&self) -> bool {
        self.extendable
    }

    /// Gets the iteration exponent
    #[must_use]
    pub fn iteration_exponent(&self) -> IterationExponent {
        self.iteration_exponent
    }

    /// Gets the encrypted value
    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

/// Splits a master secret into shares under a fresh random identifier
///
/// Returns one vector of shares per group, in group-index order.
///
/// # Errors
/// See [`split_master_secret_with_rng`]
pub fn split_master_secret(
    config: &SplitConfig,
    master_secret: &[u8],
    passphrase: &[u8],
) -> Result<Vec<Vec<Share>>> {
    split_master_secret_with_rng(config, master_secret, passphrase, &mut OsRng)
}

/// Same as [`split_master_secret`] with a caller-provided RNG
///
/// # Errors
/// - [`Slip39Error::SecretTooShort`] or [`Slip39Error::InvalidSecretLength`]
///   for an unsupported secret length
/// - [`Slip39Error::InvalidPassphrase`] if the passphrase is not printable ASCII
pub fn split_master_secret_with_rng<R: RngCore + CryptoRng>(
    config: &SplitConfig,
    master_secret: &[u8],
    passphrase: &[u8],
    rng: &mut R,
) -> Result<Vec<Vec<Share>>> {
    let identifier = Identifier::random(rng);
    debug!(
        "encrypting master secret for backup {identifier} (exponent {}, extendable {})",
        *config.iteration_exponent(),
        config.extendable()
    );
    let ems = EncryptedMasterSecret::from_master_secret(
        master_secret,
        passphrase,
        identifier,
        config.extendable(),
        config.iteration_exponent(),
    )?;
    split_ems_with_rng(config, &ems, rng)
}

/// Splits an already encrypted master secret into shares
///
/// The identifier, extendable flag and iteration exponent come from `ems`;
/// only the group layout is taken from `config`.
///
/// # Errors
/// See [`split_ems_with_rng`]
pub fn split_ems(config: &SplitConfig, ems: &EncryptedMasterSecret) -> Result<Vec<Vec<Share>>> {
    split_ems_with_rng(config, ems, &mut OsRng)
}

/// Same as [`split_ems`] with a caller-provided RNG
///
/// # Errors
/// Propagates [`shamir::split_secret`] failures
pub fn split_ems_with_rng<R: RngCore + CryptoRng>(
    config: &SplitConfig,
    ems: &EncryptedMasterSecret,
    rng: &mut R,
) -> Result<Vec<Vec<Share>>> {
    let group_threshold = config.group_threshold();
    let group_count = config.group_count();
    debug!(
        "splitting backup {} into {group_count} groups, threshold {}",
        ems.identifier(),
        *group_threshold
    );

    let typed_group_count = ShareCount::new(group_count)?;
    let group_secrets = shamir::split_secret(*group_threshold, group_count, ems.value(), rng)?;

    let mut groups = Vec::with_capacity(config.groups().len());
    for ((group_index, group_secret), spec) in group_secrets.iter().zip(config.groups()) {
        debug!(
            "splitting group {group_index} into {} members, threshold {}",
            *spec.count(),
            *spec.threshold()
        );
        let member_secrets =
            shamir::split_secret(*spec.threshold(), *spec.count(), group_secret, rng)?;

        let mut members = Vec::with_capacity(member_secrets.len());
        for (member_index, value) in member_secrets {
            let metadata = ShareMetadata {
                identifier: ems.identifier(),
                extendable: ems.extendable(),
                iteration_exponent: ems.iteration_exponent(),
                group_index: ShareIndex::new(*group_index)?,
                group_threshold,
                group_count: typed_group_count,
                member_index: ShareIndex::new(member_index)?,
                member_threshold: spec.threshold(),
            };
            members.push(Share::new(metadata, value)?);
        }
        groups.push(members);
    }

    debug!("encoded {} groups", groups.len());
    Ok(groups)
}

/// Splits a master secret straight into mnemonics
///
/// `groups` lists `(member_threshold, member_count)` per group.
///
/// # Errors
/// - [`Slip39Error::InvalidGroupThreshold`] if the group threshold is out of range
/// - [`Slip39Error::InvalidSingletonMember`] for a 1-of-n group with n > 1
/// - [`Slip39Error::InvalidMemberThreshold`] if a member threshold exceeds its count
/// - secret length and passphrase errors as for [`split_master_secret`]
///
/// # Examples
///
/// ```rust
/// use slip39_codec::slip39::{combine_mnemonics, generate_mnemonic_words};
///
/// let secret = [0x5au8; 16];
/// let groups = generate_mnemonic_words(&secret, 0, b"", &[(2, 3)], 1).unwrap();
/// assert_eq!(groups[0].len(), 3);
///
/// let recovered = combine_mnemonics(&[groups[0][0].as_str(), groups[0][2].as_str()], b"").unwrap();
/// assert_eq!(recovered.as_slice(), &secret);
/// ```
pub fn generate_mnemonic_words(
    master_secret: &[u8],
    iteration_exponent: u8,
    passphrase: &[u8],
    groups: &[(u8, u8)],
    group_threshold: u8,
) -> Result<Vec<Vec<ShareMnemonic>>> {
    let config = SplitConfig::from_descriptors(group_threshold, groups)?
        .with_iteration_exponent(IterationExponent::new(iteration_exponent)?);

    split_master_secret(&config, master_secret, passphrase)?
        .iter()
        .map(|group| group.iter().map(Share::to_mnemonic).collect())
        .collect()
}

/// Recovers the encrypted master secret from a set of shares
///
/// Shares may come from any mix of groups. Groups with fewer members than
/// their threshold are skipped as long as enough complete groups remain.
///
/// # Errors
/// - [`Slip39Error::EmptyMnemonicSet`] for no shares
/// - [`Slip39Error::InvalidShardSet`] if the shares disagree on backup
///   parameters or fail the digest check
/// - [`Slip39Error::DuplicateMemberIndex`] if a member appears twice
/// - [`Slip39Error::NotEnoughGroups`] if fewer groups than the threshold are present
/// - [`Slip39Error::NotEnoughMemberShards`] if too few groups are complete
pub fn combine_shares(shares: &[Share]) -> Result<EncryptedMasterSecret> {
    let Some(first) = shares.first() else {
        return Err(Slip39Error::EmptyMnemonicSet);
    };
    let common = first.metadata();
    debug!(
        "combining {} shares of backup {}",
        shares.len(),
        common.identifier
    );

    for share in &shares[1..] {
        check_same_backup(first, share)?;
    }

    let mut groups: BTreeMap<u8, Vec<&Share>> = BTreeMap::new();
    for share in shares {
        let metadata = share.metadata();
        let members = groups.entry(*metadata.group_index).or_default();
        if let Some(other) = members.first() {
            if other.metadata().member_threshold != metadata.member_threshold {
                warn!(
                    "member thresholds differ within group {}",
                    *metadata.group_index
                );
                return Err(Slip39Error::InvalidShardSet(
                    "member thresholds differ within a group",
                ));
            }
        }
        if members
            .iter()
            .any(|s| s.metadata().member_index == metadata.member_index)
        {
            warn!(
                "member {} of group {} given twice",
                *metadata.member_index, *metadata.group_index
            );
            return Err(Slip39Error::DuplicateMemberIndex {
                group: *metadata.group_index,
                member: *metadata.member_index,
            });
        }
        members.push(share);
    }

    let group_threshold = *common.group_threshold;
    if groups.len() < group_threshold as usize {
        warn!(
            "shares from {} groups, {group_threshold} required",
            groups.len()
        );
        return Err(Slip39Error::NotEnoughGroups {
            needed: group_threshold,
            got: groups.len(),
        });
    }

    let mut group_secrets: Vec<shamir::Point> = Vec::with_capacity(groups.len());
    let mut first_incomplete = None;
    for (&group_index, members) in &groups {
        let member_threshold = *members[0].metadata().member_threshold;
        if members.len() < member_threshold as usize {
            first_incomplete.get_or_insert(Slip39Error::NotEnoughMemberShards {
                group: group_index,
                needed: member_threshold,
                got: members.len(),
            });
            continue;
        }

        let points: Vec<(u8, &[u8])> = members
            .iter()
            .map(|s| (*s.metadata().member_index, s.value()))
            .collect();
        let secret = shamir::recover_secret(member_threshold, &points)?;
        debug!(
            "recovered group {group_index} from {} members",
            members.len()
        );
        group_secrets.push((group_index, secret));
    }

    if group_secrets.len() < group_threshold as usize {
        let err = first_incomplete.unwrap_or(Slip39Error::NotEnoughGroups {
            needed: group_threshold,
            got: group_secrets.len(),
        });
        warn!("{err}");
        return Err(err);
    }

    let points: Vec<(u8, &[u8])> = group_secrets
        .iter()
        .map(|(x, value)| (*x, value.as_slice()))
        .collect();
    let value = shamir::recover_secret(group_threshold, &points)?;
    debug!("recovered encrypted master secret of backup {}", common.identifier);

    EncryptedMasterSecret::new(
        common.identifier,
        common.extendable,
        common.iteration_exponent,
        value,
    )
}

/// Recovers and decrypts the master secret from mnemonics
///
/// # Errors
/// [`Slip39Error::EmptyMnemonicSet`] for no mnemonics, decoding errors from
/// [`Share::from_mnemonic`], then the same as [`combine_shares`] and
/// [`EncryptedMasterSecret::decrypt`]
pub fn combine_mnemonics<S: AsRef<str>>(
    mnemonics: &[S],
    passphrase: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    if mnemonics.is_empty() {
        return Err(Slip39Error::EmptyMnemonicSet);
    }
    let shares = mnemonics
        .iter()
        .map(|m| Share::from_mnemonic(m.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    combine_shares(&shares)?.decrypt(passphrase)
}

fn check_same_backup(first: &Share, share: &Share) -> Result<()> {
    let a = first.metadata();
    let b = share.metadata();

    let mismatch = if a.identifier != b.identifier {
        Some("shares have different identifiers")
    } else if a.extendable != b.extendable {
        Some("shares disagree on the extendable flag")
    } else if a.iteration_exponent != b.iteration_exponent {
        Some("shares have different iteration exponents")
    } else if a.group_threshold != b.group_threshold || a.group_count != b.group_count {
        Some("shares have different group parameters")
    } else if first.value().len() != share.value().len() {
        Some("share values differ in length")
    } else {
        None
    };

    match mismatch {
        Some(reason) => {
            warn!("rejecting share set: {reason}");
            Err(Slip39Error::InvalidShardSet(reason))
        }
        None => Ok(()),
    }
}
