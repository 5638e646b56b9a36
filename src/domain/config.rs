//! Configuration validation for SLIP-39 splits

use super::{GroupSpec, IterationExponent, Threshold};
use crate::error::{Result, Slip39Error};

/// Validated layout of a SLIP-39 backup
///
/// Holds the group threshold, one [`GroupSpec`] per group, and the parameters
/// of the passphrase encryption. The group threshold never exceeds the number
/// of groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    group_threshold: Threshold,
    groups: Vec<GroupSpec>,
    iteration_exponent: IterationExponent,
    extendable: bool,
}

impl SplitConfig {
    /// Maximum number of groups
    pub const MAX_GROUPS: usize = 16;

    /// Creates a new split configuration with exponent 0, not extendable
    ///
    /// # Errors
    /// - [`Slip39Error::InvalidShardBuffer`] if there are no groups or more than 16
    /// - [`Slip39Error::InvalidGroupThreshold`] if the group threshold is 0 or
    ///   exceeds the number of groups
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slip39_codec::domain::{GroupSpec, SplitConfig};
    ///
    /// // Two of three groups; the first is a single share
    /// let config = SplitConfig::new(
    ///     2,
    ///     vec![
    ///         GroupSpec::new(1, 1).unwrap(),
    ///         GroupSpec::new(2, 3).unwrap(),
    ///         GroupSpec::new(3, 5).unwrap(),
    ///     ],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(*config.group_threshold(), 2);
    /// assert_eq!(config.groups().len(), 3);
    ///
    /// // Invalid: group threshold > group count
    /// assert!(SplitConfig::new(2, vec![GroupSpec::new(1, 1).unwrap()]).is_err());
    /// ```
    pub fn new(group_threshold: u8, groups: Vec<GroupSpec>) -> Result<Self> {
        if groups.is_empty() {
            return Err(Slip39Error::InvalidShardBuffer("at least one group is required"));
        }
        if groups.len() > Self::MAX_GROUPS {
            return Err(Slip39Error::InvalidShardBuffer("no more than 16 groups allowed"));
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "group count was checked to be at most 16"
        )]
        let count = groups.len() as u8;
        if group_threshold == 0 || group_threshold > count {
            return Err(Slip39Error::InvalidGroupThreshold {
                threshold: group_threshold,
                count,
            });
        }
        let group_threshold = Threshold::new(group_threshold)?;

        Ok(Self {
            group_threshold,
            groups,
            iteration_exponent: IterationExponent::default(),
            extendable: false,
        })
    }

    /// Builds a configuration from `(member_threshold, member_count)` pairs
    ///
    /// The group threshold is validated before any group.
    ///
    /// # Errors
    /// Same as [`SplitConfig::new`] and [`GroupSpec::new`]
    pub fn from_descriptors(group_threshold: u8, descriptors: &[(u8, u8)]) -> Result<Self> {
        if descriptors.len() <= Self::MAX_GROUPS {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "group count was checked to be at most 16"
            )]
            let count = descriptors.len() as u8;
            if group_threshold == 0 || group_threshold > count {
                return Err(Slip39Error::InvalidGroupThreshold {
                    threshold: group_threshold,
                    count,
                });
            }
        }
        let groups = descriptors
            .iter()
            .map(|&(threshold, count)| GroupSpec::new(threshold, count))
            .collect::<Result<Vec<_>>>()?;
        Self::new(group_threshold, groups)
    }

    /// Single group of `threshold`-of-`count` members, group threshold 1
    ///
    /// # Errors
    /// Same as [`GroupSpec::new`]
    pub fn single_group(threshold: u8, count: u8) -> Result<Self> {
        Self::new(1, vec![GroupSpec::new(threshold, count)?])
    }

    /// Sets the PBKDF2 iteration exponent
    #[must_use]
    pub fn with_iteration_exponent(mut self, iteration_exponent: IterationExponent) -> Self {
        self.iteration_exponent = iteration_exponent;
        self
    }

    /// Marks the backup as extendable
    #[must_use]
    pub fn with_extendable(mut self, extendable: bool) -> Self {
        self.extendable = extendable;
        self
    }

    /// Groups required to recover the secret
    #[must_use]
    pub fn group_threshold(&self) -> Threshold {
        self.group_threshold
    }

    /// Group descriptors in group-index order
    #[must_use]
    pub fn groups(&self) -> &[GroupSpec] {
        &self.groups
    }

    /// Number of groups
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "group count is validated to be at most 16"
    )]
    pub fn group_count(&self) -> u8 {
        self.groups.len() as u8
    }

    /// Gets the iteration exponent
    #[must_use]
    pub fn iteration_exponent(&self) -> IterationExponent {
        self.iteration_exponent
    }

    /// Whether the backup is extendable
    #[must_use]
    pub fn extendable(&self) -> bool {
        self.extendable
    }
}
