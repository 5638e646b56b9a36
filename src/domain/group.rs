//! Group descriptor

use super::{ShareCount, Threshold};
use crate::error::{Result, Slip39Error};

/// Member threshold and member count of one group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpec {
    threshold: Threshold,
    count: ShareCount,
}

impl GroupSpec {
    /// Creates a group requiring `threshold` of `count` members
    ///
    /// # Errors
    /// - [`Slip39Error::InvalidMemberThreshold`] if the threshold is 0, above 16, or above `count`
    /// - [`Slip39Error::InvalidShardBuffer`] if `count` is 0 or above 16
    /// - [`Slip39Error::InvalidSingletonMember`] for a threshold of 1 with more than one member
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slip39_codec::domain::GroupSpec;
    /// use slip39_codec::Slip39Error;
    ///
    /// let group = GroupSpec::new(3, 5).unwrap();
    /// assert_eq!(*group.threshold(), 3);
    /// assert_eq!(*group.count(), 5);
    ///
    /// assert!(GroupSpec::new(1, 1).is_ok());
    /// assert_eq!(
    ///     GroupSpec::new(1, 3),
    ///     Err(Slip39Error::InvalidSingletonMember { count: 3 })
    /// );
    /// assert_eq!(GroupSpec::new(4, 3), Err(Slip39Error::InvalidMemberThreshold(4)));
    /// ```
    pub fn new(threshold: u8, count: u8) -> Result<Self> {
        let threshold = Threshold::new(threshold)?;
        let count = ShareCount::new(count)?;
        if *threshold > *count {
            return Err(Slip39Error::InvalidMemberThreshold(*threshold));
        }
        if *threshold == 1 && *count > 1 {
            return Err(Slip39Error::InvalidSingletonMember { count: *count });
        }
        Ok(Self { threshold, count })
    }

    /// Members needed to recover the group
    #[must_use]
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Members in the group
    #[must_use]
    pub fn count(&self) -> ShareCount {
        self.count
    }
}
