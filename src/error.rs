//! Error taxonomy for the SLIP-39 codec
//!
//! Every failure the codec can report is a [`Slip39Error`] variant. Each variant
//! maps to a stable negative integer through [`Slip39Error::code`], so callers
//! that speak in status codes (firmware glue, FFI shims, the wasm layer) can
//! keep doing so. Zero is success.

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T, E = Slip39Error> = std::result::Result<T, E>;

/// Status code reported for a successful call
pub const OK: i32 = 0;

/// Errors produced while splitting, encoding, decoding or combining shares
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Slip39Error {
    #[error("mnemonic has {got} words, at least {min} are required")]
    NotEnoughMnemonicWords { got: usize, min: usize },

    #[error("invalid mnemonic checksum")]
    InvalidMnemonicChecksum,

    #[error("master secret must be at least {min} bytes, got {got}")]
    SecretTooShort { got: usize, min: usize },

    #[error("group threshold {threshold} must be between 1 and the group count {count}")]
    InvalidGroupThreshold { threshold: u8, count: u8 },

    #[error("a group with member threshold 1 must have exactly one member, got {count}")]
    InvalidSingletonMember { count: u8 },

    #[error("output buffer too small: need {needed} words, have {available}")]
    InsufficientSpace { needed: usize, available: usize },

    #[error("unsupported master secret length: {0} bytes")]
    InvalidSecretLength(usize),

    #[error("passphrase must contain only printable ASCII characters")]
    InvalidPassphrase,

    #[error("invalid share set: {0}")]
    InvalidShardSet(&'static str),

    #[error("no mnemonics provided")]
    EmptyMnemonicSet,

    #[error("duplicate member index {member} in group {group}")]
    DuplicateMemberIndex { group: u8, member: u8 },

    #[error("group {group} needs {needed} member shares, got {got}")]
    NotEnoughMemberShards { group: u8, needed: u8, got: usize },

    #[error("member threshold {0} is out of range")]
    InvalidMemberThreshold(u8),

    #[error("invalid padding in share value")]
    InvalidPadding,

    #[error("need shares from {needed} groups, got {got}")]
    NotEnoughGroups { needed: u8, got: usize },

    #[error("malformed share buffer: {0}")]
    InvalidShardBuffer(&'static str),

    #[error("word #{} is not in the SLIP-39 wordlist", .position + 1)]
    InvalidMnemonicWord { position: usize },

    #[error("share does not belong to this wallet")]
    NotBelongThisWallet,
}

impl Slip39Error {
    /// Stable negative status code for this error
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slip39_codec::Slip39Error;
    ///
    /// assert_eq!(Slip39Error::InvalidMnemonicChecksum.code(), -2);
    /// assert_eq!(Slip39Error::NotBelongThisWallet.code(), -18);
    /// ```
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::NotEnoughMnemonicWords { .. } => -1,
            Self::InvalidMnemonicChecksum => -2,
            Self::SecretTooShort { .. } => -3,
            Self::InvalidGroupThreshold { .. } => -4,
            Self::InvalidSingletonMember { .. } => -5,
            Self::InsufficientSpace { .. } => -6,
            Self::InvalidSecretLength(_) => -7,
            Self::InvalidPassphrase => -8,
            Self::InvalidShardSet(_) => -9,
            Self::EmptyMnemonicSet => -10,
            Self::DuplicateMemberIndex { .. } => -11,
            Self::NotEnoughMemberShards { .. } => -12,
            Self::InvalidMemberThreshold(_) => -13,
            Self::InvalidPadding => -14,
            Self::NotEnoughGroups { .. } => -15,
            Self::InvalidShardBuffer(_) => -16,
            Self::InvalidMnemonicWord { .. } => -17,
            Self::NotBelongThisWallet => -18,
        }
    }
}

/// Collapses a result into its status code ([`OK`] on success)
#[must_use]
pub fn status_code<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => OK,
        Err(e) => e.code(),
    }
}
