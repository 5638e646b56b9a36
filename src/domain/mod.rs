//! Domain types for SLIP-39 backups
//!
//! Validated newtypes and configuration for splitting a master secret:
//! - [`Threshold`] - Shares required to recover a group or the secret (1..=16)
//! - [`ShareCount`] - Number of shares at one level (1..=16)
//! - [`ShareIndex`] - Position of a share within its level (0..=15)
//! - [`Identifier`] - Random 15-bit tag shared by all shares of one backup
//! - [`IterationExponent`] - PBKDF2 cost exponent (0..=15)
//! - [`GroupSpec`] - Member threshold and member count of one group
//! - [`SplitConfig`] - Group threshold, groups, and encryption parameters

mod config;
mod group;
mod identifier;
mod iteration_exponent;
mod share_count;
mod share_index;
mod threshold;

pub use config::SplitConfig;
pub use group::GroupSpec;
pub use identifier::Identifier;
pub use iteration_exponent::IterationExponent;
pub use share_count::ShareCount;
pub use share_index::ShareIndex;
pub use threshold::Threshold;
