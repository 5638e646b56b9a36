//! SLIP-39 share encoding
//!
//! A share is serialized as a sequence of 10-bit words:
//!
//! ```text
//! id (15) | ext (1) | e (4) | GI (4) | Gt-1 (4) | g-1 (4) | I (4) | t-1 (4) | padded value | checksum (30)
//! ```
//!
//! The first 40 bits are the metadata and fill exactly four words. The share
//! value is left-padded with zero bits to a whole number of words, and three
//! RS1024 checksum words close the share. Each word maps to one entry of the
//! [wordlist](crate::wordlist).
//!
//! # Examples
//!
//! ```rust
//! use slip39_codec::codec::Share;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mnemonic = "duckling enlarge academic academic agency result length solution \
//!                 fridge kidney coal piece deal husband erode duke ajar critical \
//!                 decision keyboard";
//!
//! let share = Share::from_mnemonic(mnemonic)?;
//! assert_eq!(*share.metadata().identifier, 7945);
//! assert_eq!(*share.metadata().member_threshold, 1);
//! assert_eq!(share.value().len(), 16);
//!
//! // Encoding is canonical
//! assert_eq!(share.to_mnemonic()?.as_str(), mnemonic.split_whitespace().collect::<Vec<_>>().join(" "));
//! # Ok(())
//! # }
//! ```

use zeroize::Zeroizing;

use crate::domain::{Identifier, IterationExponent, ShareCount, ShareIndex, Threshold};
use crate::error::{Result, Slip39Error};
use crate::rs1024;
use crate::wordlist::{self, RADIX_BITS};

/// Words taken by the metadata
pub const METADATA_LENGTH_WORDS: usize = 4;

/// Words taken by the RS1024 checksum
pub const CHECKSUM_LENGTH_WORDS: usize = rs1024::CHECKSUM_LENGTH_WORDS;

/// Metadata plus checksum: every word of a share that is not value
pub const OVERHEAD_LENGTH_WORDS: usize = METADATA_LENGTH_WORDS + CHECKSUM_LENGTH_WORDS;

/// Shortest valid share, carrying a 128-bit value
pub const MIN_MNEMONIC_LENGTH_WORDS: usize = 20;

/// Shortest share value in bytes
pub const MIN_VALUE_LENGTH_BYTES: usize = 16;

const WORD_MASK: u16 = (1 << RADIX_BITS) - 1;

/// A SLIP-39 share mnemonic
///
/// Wraps the mnemonic in `Zeroizing` to ensure secure memory cleanup.
#[derive(Clone, PartialEq, Eq)]
pub struct ShareMnemonic(Zeroizing<String>);

impl ShareMnemonic {
    /// Wraps an already encoded mnemonic
    pub(crate) fn new_unchecked(s: Zeroizing<String>) -> Self {
        Self(s)
    }

    /// Gets the mnemonic as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the words of the mnemonic
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    /// Decodes the mnemonic back into a share
    ///
    /// # Errors
    /// Same as [`Share::from_mnemonic`]
    pub fn parse(&self) -> Result<Share> {
        Share::from_mnemonic(self.as_str())
    }
}

impl std::fmt::Display for ShareMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &*self.0)
    }
}

impl std::fmt::Debug for ShareMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ShareMnemonic(<redacted>)")
    }
}

/// Everything a share carries besides its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareMetadata {
    pub identifier: Identifier,
    pub extendable: bool,
    pub iteration_exponent: IterationExponent,
    pub group_index: ShareIndex,
    pub group_threshold: Threshold,
    pub group_count: ShareCount,
    pub member_index: ShareIndex,
    pub member_threshold: Threshold,
}

impl ShareMetadata {
    /// Packs the metadata into its four words
    #[must_use]
    pub fn encode_words(&self) -> [u16; METADATA_LENGTH_WORDS] {
        let id = *self.identifier;
        let ext = u16::from(self.extendable);
        let e = u16::from(*self.iteration_exponent);
        let gi = u16::from(*self.group_index);
        let gt = u16::from(*self.group_threshold - 1);
        let gc = u16::from(*self.group_count - 1);
        let mi = u16::from(*self.member_index);
        let mt = u16::from(*self.member_threshold - 1);

        [
            id >> 5,
            ((id & 0x1f) << 5) | (ext << 4) | e,
            (gi << 6) | (gt << 2) | (gc >> 2),
            ((gc & 0x3) << 8) | (mi << 4) | mt,
        ]
    }

    /// Unpacks metadata from the first four words of a share
    ///
    /// # Errors
    /// Returns [`Slip39Error::InvalidGroupThreshold`] if the group threshold
    /// exceeds the group count
    #[allow(
        clippy::cast_possible_truncation,
        reason = "every field is masked to at most 4 bits before narrowing"
    )]
    pub fn decode_words(words: &[u16; METADATA_LENGTH_WORDS]) -> Result<Self> {
        let [w0, w1, w2, w3] = (*words).map(|w| w & WORD_MASK);

        let identifier = Identifier::new((w0 << 5) | (w1 >> 5))?;
        let extendable = (w1 >> 4) & 1 == 1;
        let iteration_exponent = IterationExponent::new((w1 & 0xf) as u8)?;
        let group_index = ShareIndex::new((w2 >> 6) as u8)?;
        let group_threshold = ((w2 >> 2) & 0xf) as u8 + 1;
        let group_count = ((((w2 & 0x3) << 2) | (w3 >> 8)) & 0xf) as u8 + 1;
        let member_index = ShareIndex::new(((w3 >> 4) & 0xf) as u8)?;
        let member_threshold = Threshold::new((w3 & 0xf) as u8 + 1)?;

        if group_threshold > group_count {
            return Err(Slip39Error::InvalidGroupThreshold {
                threshold: group_threshold,
                count: group_count,
            });
        }

        Ok(Self {
            identifier,
            extendable,
            iteration_exponent,
            group_index,
            group_threshold: Threshold::new(group_threshold)?,
            group_count: ShareCount::new(group_count)?,
            member_index,
            member_threshold,
        })
    }
}

/// One decoded SLIP-39 share: metadata plus value
#[derive(Clone, PartialEq, Eq)]
pub struct Share {
    metadata: ShareMetadata,
    value: Zeroizing<Vec<u8>>,
}

impl std::fmt::Debug for Share {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Share")
            .field("metadata", &self.metadata)
            .field("value", &format_args!("<{} bytes>", self.value.len()))
            .finish()
    }
}

impl Share {
    /// Creates a share from its parts
    ///
    /// # Errors
    /// - [`Slip39Error::SecretTooShort`] if the value is shorter than 16 bytes
    /// - [`Slip39Error::InvalidSecretLength`] if the value length is odd
    pub fn new(metadata: ShareMetadata, value: Zeroizing<Vec<u8>>) -> Result<Self> {
        if value.len() < MIN_VALUE_LENGTH_BYTES {
            return Err(Slip39Error::SecretTooShort {
                got: value.len(),
                min: MIN_VALUE_LENGTH_BYTES,
            });
        }
        if value.len() % 2 != 0 {
            return Err(Slip39Error::InvalidSecretLength(value.len()));
        }
        Ok(Self { metadata, value })
    }

    /// Gets the share metadata
    #[must_use]
    pub fn metadata(&self) -> &ShareMetadata {
        &self.metadata
    }

    /// Gets the share value
    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Number of words this share encodes to
    #[must_use]
    pub fn word_count(&self) -> usize {
        OVERHEAD_LENGTH_WORDS + value_length_words(self.value.len())
    }

    /// Encodes the share into a caller-provided word buffer
    ///
    /// Returns the number of words written.
    ///
    /// # Errors
    /// Returns [`Slip39Error::InsufficientSpace`] if `out` is shorter than [`Share::word_count`]
    pub fn write_words(&self, out: &mut [u16]) -> Result<usize> {
        let needed = self.word_count();
        if out.len() < needed {
            return Err(Slip39Error::InsufficientSpace {
                needed,
                available: out.len(),
            });
        }

        self.encode_into(&mut out[..needed]);
        Ok(needed)
    }

    /// Encodes the share into its 10-bit words
    #[must_use]
    pub fn to_words(&self) -> Zeroizing<Vec<u16>> {
        let mut words = Zeroizing::new(vec![0u16; self.word_count()]);
        self.encode_into(&mut words);
        words
    }

    /// `out` must be exactly [`Share::word_count`] words long
    fn encode_into(&self, out: &mut [u16]) {
        let body_len = out.len() - CHECKSUM_LENGTH_WORDS;
        out[..METADATA_LENGTH_WORDS].copy_from_slice(&self.metadata.encode_words());
        encode_value(&self.value, &mut out[METADATA_LENGTH_WORDS..body_len]);

        let checksum = rs1024::create_checksum(
            rs1024::customization_string(self.metadata.extendable),
            &out[..body_len],
        );
        out[body_len..].copy_from_slice(&checksum);
    }

    /// Encodes the share as a mnemonic
    ///
    /// # Errors
    /// Propagates wordlist lookup failures
    pub fn to_mnemonic(&self) -> Result<ShareMnemonic> {
        let words = self.to_words();
        Ok(ShareMnemonic::new_unchecked(wordlist::indices_to_mnemonic(
            &words,
        )?))
    }

    /// Decodes a share from its 10-bit words
    ///
    /// Checks are applied in this order: length, checksum, metadata, padding.
    ///
    /// # Errors
    /// - [`Slip39Error::NotEnoughMnemonicWords`] for fewer than 20 words
    /// - [`Slip39Error::InvalidMnemonicChecksum`] if the RS1024 checksum fails
    /// - [`Slip39Error::InvalidGroupThreshold`] if group threshold exceeds group count
    /// - [`Slip39Error::InvalidPadding`] for a malformed value padding
    pub fn from_words(words: &[u16]) -> Result<Self> {
        if words.len() < MIN_MNEMONIC_LENGTH_WORDS {
            return Err(Slip39Error::NotEnoughMnemonicWords {
                got: words.len(),
                min: MIN_MNEMONIC_LENGTH_WORDS,
            });
        }
        if words.iter().any(|&w| w > WORD_MASK) {
            return Err(Slip39Error::InvalidShardBuffer("word value exceeds 10 bits"));
        }

        let extendable = (words[1] >> 4) & 1 == 1;
        if !rs1024::verify_checksum(rs1024::customization_string(extendable), words) {
            return Err(Slip39Error::InvalidMnemonicChecksum);
        }

        let mut head = [0u16; METADATA_LENGTH_WORDS];
        head.copy_from_slice(&words[..METADATA_LENGTH_WORDS]);
        let metadata = ShareMetadata::decode_words(&head)?;

        let value = decode_value(&words[METADATA_LENGTH_WORDS..words.len() - CHECKSUM_LENGTH_WORDS])?;

        Self::new(metadata, value)
    }

    /// Decodes a share from a whitespace-separated mnemonic
    ///
    /// # Errors
    /// [`Slip39Error::InvalidMnemonicWord`] for a word outside the wordlist,
    /// otherwise the same as [`Share::from_words`]
    pub fn from_mnemonic(mnemonic: &str) -> Result<Self> {
        let words = wordlist::mnemonic_to_indices(mnemonic)?;
        Self::from_words(&words)
    }
}

/// Words needed for a value of `len` bytes
#[must_use]
pub const fn value_length_words(len: usize) -> usize {
    (len * 8).div_ceil(RADIX_BITS)
}

/// Writes `value` as 10-bit words, left-padded with zero bits
///
/// `out` must hold exactly [`value_length_words`] words.
#[allow(
    clippy::cast_possible_truncation,
    reason = "words are masked to 10 bits"
)]
fn encode_value(value: &[u8], out: &mut [u16]) {
    let padding = out.len() * RADIX_BITS - value.len() * 8;

    let mut acc: u32 = 0;
    let mut bits = padding;
    let mut words = out.iter_mut();
    for &byte in value {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;
        while bits >= RADIX_BITS {
            bits -= RADIX_BITS;
            if let Some(word) = words.next() {
                *word = ((acc >> bits) as u16) & WORD_MASK;
            }
        }
        acc &= (1 << bits) - 1;
    }
}

/// Reads a value back from its padded 10-bit words
#[allow(
    clippy::cast_possible_truncation,
    reason = "bytes are masked to 8 bits"
)]
fn decode_value(words: &[u16]) -> Result<Zeroizing<Vec<u8>>> {
    let total_bits = words.len() * RADIX_BITS;
    let padding = total_bits % 16;
    if padding > 8 {
        return Err(Slip39Error::InvalidPadding);
    }
    let Some(&first) = words.first() else {
        return Err(Slip39Error::InvalidPadding);
    };
    if first >> (RADIX_BITS - padding) != 0 {
        return Err(Slip39Error::InvalidPadding);
    }

    let mut value = Zeroizing::new(Vec::with_capacity((total_bits - padding) / 8));
    let mut acc: u32 = 0;
    let mut bits: usize = 0;
    for (i, &word) in words.iter().enumerate() {
        acc = (acc << RADIX_BITS) | u32::from(word);
        bits += RADIX_BITS;
        if i == 0 {
            bits -= padding;
        }
        while bits >= 8 {
            bits -= 8;
            value.push((acc >> bits) as u8);
        }
        acc &= (1 << bits) - 1;
    }

    Ok(value)
}
