//! PBKDF2 iteration exponent

use crate::error::{Result, Slip39Error};

/// Exponent `e` selecting `10000 << e` PBKDF2 iterations in total (0..=15)
///
/// Each of the four Feistel rounds runs a quarter of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IterationExponent(u8);

impl IterationExponent {
    /// Largest exponent representable in the 4-bit metadata field
    pub const MAX: u8 = 15;

    /// Iterations per Feistel round at exponent zero
    pub const BASE_ROUND_ITERATIONS: u32 = 2500;

    /// Creates a new iteration exponent
    ///
    /// # Errors
    /// Returns [`Slip39Error::InvalidShardBuffer`] if the exponent exceeds 15
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slip39_codec::domain::IterationExponent;
    ///
    /// let e = IterationExponent::new(2).unwrap();
    /// assert_eq!(e.round_iterations(), 10_000);
    /// assert!(IterationExponent::new(16).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX {
            return Err(Slip39Error::InvalidShardBuffer(
                "iteration exponent cannot exceed 15",
            ));
        }
        Ok(Self(value))
    }

    /// PBKDF2 iterations for one Feistel round
    #[must_use]
    pub const fn round_iterations(self) -> u32 {
        Self::BASE_ROUND_ITERATIONS << self.0
    }
}

impl std::ops::Deref for IterationExponent {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
