//! `ShareIndex` newtype for SLIP-39 sharing

use crate::error::{Result, Slip39Error};

/// Index of a group or of a member within its group (0..=15)
///
/// Stored in 4 bits of the share metadata. Note that the index is the x
/// coordinate the share was evaluated at, so it never collides with the
/// reserved digest (254) and secret (255) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShareIndex(u8);

impl ShareIndex {
    /// Maximum valid share index (15)
    pub const MAX: u8 = 15;

    /// Creates a new share index
    ///
    /// # Errors
    /// Returns [`Slip39Error::InvalidShardBuffer`] if the index does not fit in 4 bits
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slip39_codec::domain::ShareIndex;
    ///
    /// let index = ShareIndex::new(0).unwrap();
    /// assert_eq!(*index, 0);
    ///
    /// let max_index = ShareIndex::new(ShareIndex::MAX).unwrap();
    /// assert_eq!(*max_index, 15);
    ///
    /// assert!(ShareIndex::new(16).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX {
            return Err(Slip39Error::InvalidShardBuffer("share index cannot exceed 15"));
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for ShareIndex {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
