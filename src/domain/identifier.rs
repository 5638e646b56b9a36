//! Backup identifier

use rand::{CryptoRng, RngCore};

use crate::error::{Result, Slip39Error};

/// Random 15-bit identifier shared by every share of one backup
///
/// Shares carrying different identifiers can never be combined. For
/// non-extendable backups the identifier is also mixed into the encryption
/// salt, so it must be kept alongside the shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(u16);

impl Identifier {
    /// Number of bits in an identifier
    pub const BITS: u32 = 15;

    /// Largest valid identifier (0x7fff)
    pub const MAX: u16 = (1 << Self::BITS) - 1;

    /// Creates an identifier from a known value
    ///
    /// # Errors
    /// Returns [`Slip39Error::InvalidShardBuffer`] if the value needs more than 15 bits
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slip39_codec::domain::Identifier;
    ///
    /// let id = Identifier::new(7945).unwrap();
    /// assert_eq!(*id, 7945);
    /// assert!(Identifier::new(0x8000).is_err());
    /// ```
    pub fn new(value: u16) -> Result<Self> {
        if value > Self::MAX {
            return Err(Slip39Error::InvalidShardBuffer("identifier exceeds 15 bits"));
        }
        Ok(Self(value))
    }

    /// Draws a fresh identifier from `rng`
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 2];
        rng.fill_bytes(&mut bytes);
        Self(u16::from_be_bytes(bytes) & Self::MAX)
    }

    /// Big-endian bytes, as mixed into the encryption salt
    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl std::ops::Deref for Identifier {
    type Target = u16;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
