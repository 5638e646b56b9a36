//! Threshold newtype for SLIP-39 sharing

use crate::error::{Result, Slip39Error};

/// Number of shares needed to recover a secret (1..=16)
///
/// Used both for member thresholds inside a group and for the group threshold.
/// A threshold of 1 is allowed: SLIP-39 uses it for single-member groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Threshold(u8);

impl Threshold {
    /// Minimum valid threshold
    pub const MIN: u8 = 1;

    /// Maximum valid threshold (16)
    pub const MAX: u8 = 16;

    /// Creates a new threshold
    ///
    /// # Errors
    /// Returns [`Slip39Error::InvalidMemberThreshold`] if the value is outside 1..=16
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slip39_codec::domain::Threshold;
    ///
    /// let threshold = Threshold::new(3).unwrap();
    /// assert_eq!(*threshold, 3);
    ///
    /// assert!(Threshold::new(1).is_ok());
    /// assert!(Threshold::new(0).is_err());
    /// assert!(Threshold::new(17).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(Slip39Error::InvalidMemberThreshold(value));
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for Threshold {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
