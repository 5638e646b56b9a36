//! SLIP-39 Shamir backup codec
//!
//! Splits a master secret into groups of mnemonic shares and recovers it from
//! any qualifying subset, bit-compatible with other SLIP-39 implementations.
//!
//! ```rust
//! use slip39_codec::domain::SplitConfig;
//! use slip39_codec::slip39::{combine_mnemonics, split_master_secret};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let secret = b"ABCDEFGHIJKLMNOP";
//! let config = SplitConfig::single_group(2, 3)?;
//!
//! let groups = split_master_secret(&config, secret, b"")?;
//! let mnemonics = [groups[0][0].to_mnemonic()?, groups[0][2].to_mnemonic()?];
//!
//! let recovered = combine_mnemonics(&[mnemonics[0].as_str(), mnemonics[1].as_str()], b"")?;
//! assert_eq!(recovered.as_slice(), secret);
//! # Ok(())
//! # }
//! ```

pub mod cipher;
#[cfg(feature = "cli")]
pub mod cli;
pub mod codec;
pub mod commands;
pub mod domain;
pub mod error;
pub mod gf256;
pub mod recovery;
pub mod rs1024;
pub mod shamir;
pub mod slip39;
pub mod wasm;
pub mod wordlist;

pub use error::{Result, Slip39Error};
