//! `ShareCount` newtype for SLIP-39 sharing

use crate::error::{Result, Slip39Error};

/// Number of shares to create at one level (1..=16)
///
/// Share indices are 4 bits wide, so a group holds at most 16 members and a
/// backup at most 16 groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShareCount(u8);

impl ShareCount {
    /// Minimum valid share count
    pub const MIN: u8 = 1;

    /// Maximum valid share count (16)
    pub const MAX: u8 = 16;

    /// Creates a new share count
    ///
    /// # Errors
    /// Returns [`Slip39Error::InvalidShardBuffer`] if count is 0 or above 16
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slip39_codec::domain::ShareCount;
    ///
    /// let count = ShareCount::new(5).unwrap();
    /// assert_eq!(*count, 5);
    ///
    /// let max_count = ShareCount::new(ShareCount::MAX).unwrap();
    /// assert_eq!(*max_count, 16);
    ///
    /// assert!(ShareCount::new(0).is_err());
    /// assert!(ShareCount::new(17).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if value < Self::MIN {
            return Err(Slip39Error::InvalidShardBuffer("share count must be at least 1"));
        }
        if value > Self::MAX {
            return Err(Slip39Error::InvalidShardBuffer("share count cannot exceed 16"));
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for ShareCount {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
