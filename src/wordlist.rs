//! The SLIP-39 English wordlist
//!
//! 1024 words, one per 10-bit value. Words are 4 to 8 letters long, sorted, and
//! uniquely identified by their first four letters, which makes prefix
//! completion on a small keyboard unambiguous.

use std::collections::HashMap;
use std::sync::LazyLock;

use zeroize::Zeroizing;

use crate::error::{Result, Slip39Error};

/// Bits encoded by a single word
pub const RADIX_BITS: usize = 10;

/// Number of words in the list
pub const RADIX: usize = 1 << RADIX_BITS;

static WORDLIST: LazyLock<Vec<&'static str>> =
    LazyLock::new(|| include_str!("wordlist.txt").lines().collect());

/// Static `HashMap` for O(1) word-to-index lookups
static WORD_TO_INDEX_MAP: LazyLock<HashMap<&'static str, u16>> = LazyLock::new(|| {
    WORDLIST
        .iter()
        .zip(0u16..)
        .map(|(&word, idx)| (word, idx))
        .collect()
});

/// All 1024 words in index order
#[must_use]
pub fn words() -> &'static [&'static str] {
    &WORDLIST
}

/// Looks up the 10-bit value of a word (case-insensitive)
///
/// # Errors
/// Returns [`Slip39Error::InvalidMnemonicWord`] at position 0 if the word is
/// not in the list
///
/// # Examples
///
/// ```rust
/// use slip39_codec::wordlist;
///
/// assert_eq!(wordlist::word_to_index("academic").unwrap(), 0);
/// assert_eq!(wordlist::word_to_index("Zero").unwrap(), 1023);
/// assert!(wordlist::word_to_index("bitcoin").is_err());
/// ```
pub fn word_to_index(word: &str) -> Result<u16> {
    if let Some(&idx) = WORD_TO_INDEX_MAP.get(word) {
        return Ok(idx);
    }
    let lower = Zeroizing::new(word.to_ascii_lowercase());
    WORD_TO_INDEX_MAP
        .get(lower.as_str())
        .copied()
        .ok_or(Slip39Error::InvalidMnemonicWord { position: 0 })
}

/// Returns the word for a 10-bit value, or `None` if the value is out of range
#[must_use]
pub fn word_from_index(index: u16) -> Option<&'static str> {
    WORDLIST.get(index as usize).copied()
}

/// All words starting with `prefix` (case-insensitive), in list order
#[must_use]
pub fn words_with_prefix(prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.to_ascii_lowercase();
    let start = WORDLIST.partition_point(|w| *w < prefix.as_str());
    WORDLIST[start..]
        .iter()
        .take_while(|w| w.starts_with(&prefix))
        .copied()
        .collect()
}

/// The single word completing `prefix`, if exactly one word matches
///
/// Four letters always identify a word uniquely.
///
/// ```rust
/// use slip39_codec::wordlist;
///
/// assert_eq!(wordlist::complete_word("duck"), Some("duckling"));
/// assert_eq!(wordlist::complete_word("ac"), None);
/// ```
#[must_use]
pub fn complete_word(prefix: &str) -> Option<&'static str> {
    match words_with_prefix(prefix).as_slice() {
        [word] => Some(*word),
        _ => None,
    }
}

/// Splits a mnemonic on whitespace and maps every word to its value
///
/// The result is allocated once at its final size, so no partial copy of the
/// indices is left behind by a reallocation.
///
/// # Errors
/// Returns [`Slip39Error::InvalidMnemonicWord`] with the position of the first
/// unknown word
pub fn mnemonic_to_indices(mnemonic: &str) -> Result<Zeroizing<Vec<u16>>> {
    let count = mnemonic.split_whitespace().count();
    let mut indices = Zeroizing::new(Vec::with_capacity(count));
    for (position, word) in mnemonic.split_whitespace().enumerate() {
        let index = word_to_index(word)
            .map_err(|_| Slip39Error::InvalidMnemonicWord { position })?;
        indices.push(index);
    }
    Ok(indices)
}

/// Joins the words for `indices` with single spaces
///
/// # Errors
/// Returns [`Slip39Error::InvalidShardBuffer`] if a value does not fit in 10 bits
pub fn indices_to_mnemonic(indices: &[u16]) -> Result<Zeroizing<String>> {
    let mut mnemonic = Zeroizing::new(String::with_capacity(indices.len() * 9));
    for (i, &index) in indices.iter().enumerate() {
        let word = word_from_index(index)
            .ok_or(Slip39Error::InvalidShardBuffer("word value exceeds 10 bits"))?;
        if i > 0 {
            mnemonic.push(' ');
        }
        mnemonic.push_str(word);
    }
    Ok(mnemonic)
}
