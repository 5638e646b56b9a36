//! WASM bindings for the SLIP-39 codec
//!
//! Each binding wraps a plain function returning `Result<String, String>`;
//! the plain functions carry the logic and are what the native tests exercise.
//! Successful results are JSON (or hex for secrets).

use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use zeroize::Zeroizing;

use crate::codec::Share;
use crate::commands;
use crate::domain::{IterationExponent, SplitConfig};

/// Initialize panic hook for better error messages in the browser console
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Use wee_alloc as the global allocator for smaller WASM binary size
#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Result of a split operation (for JSON serialization)
#[derive(Serialize, Deserialize)]
pub struct SplitResult {
    /// Share mnemonics, one list per group
    pub groups: Vec<Vec<String>>,
    /// Number of groups needed to recover the secret
    pub group_threshold: u8,
    /// Member threshold of each group
    pub member_thresholds: Vec<u8>,
}

/// Metadata of a parsed share (for JSON serialization)
#[derive(Serialize, Deserialize)]
pub struct ShareInfo {
    pub identifier: u16,
    pub extendable: bool,
    pub iteration_exponent: u8,
    pub group_index: u8,
    pub group_threshold: u8,
    pub group_count: u8,
    pub member_index: u8,
    pub member_threshold: u8,
    pub word_count: usize,
}

fn split_with_config(secret_hex: &str, passphrase: &str, config: &SplitConfig) -> Result<String, String> {
    let groups = commands::split_secret(secret_hex, config, passphrase)
        .map_err(|e| format!("Split failed: {e:#}"))?;

    let result = SplitResult {
        groups: groups
            .iter()
            .map(|group| group.iter().map(|m| m.to_string()).collect())
            .collect(),
        group_threshold: *config.group_threshold(),
        member_thresholds: config.groups().iter().map(|g| *g.threshold()).collect(),
    };

    serde_json::to_string(&result).map_err(|e| format!("Serialization failed: {e}"))
}

/// Single-group split; see [`wasm_split`]
///
/// # Errors
/// Returns a message describing the invalid input or the split failure
pub fn split(
    secret_hex: &str,
    passphrase: &str,
    threshold: u8,
    shares: u8,
) -> Result<String, String> {
    let config = SplitConfig::single_group(threshold, shares)
        .map_err(|e| format!("Invalid configuration: {e}"))?;
    split_with_config(secret_hex, passphrase, &config)
}

/// Multi-group split; see [`wasm_split_groups`]
///
/// # Errors
/// Returns a message describing the invalid input or the split failure
pub fn split_groups(
    secret_hex: &str,
    passphrase: &str,
    groups_json: &str,
    group_threshold: u8,
    iteration_exponent: u8,
    extendable: bool,
) -> Result<String, String> {
    let descriptors: Vec<(u8, u8)> = serde_json::from_str(groups_json)
        .map_err(|e| format!("Invalid groups (expected [[threshold, count], ...]): {e}"))?;
    let iteration_exponent = IterationExponent::new(iteration_exponent)
        .map_err(|e| format!("Invalid iteration exponent: {e}"))?;

    let config = SplitConfig::from_descriptors(group_threshold, &descriptors)
        .map_err(|e| format!("Invalid configuration: {e}"))?
        .with_iteration_exponent(iteration_exponent)
        .with_extendable(extendable);

    split_with_config(secret_hex, passphrase, &config)
}

/// Recover the hex master secret; see [`wasm_combine`]
///
/// # Errors
/// Returns a message describing why the shares could not be combined
pub fn combine(shares: &[String], passphrase: &str) -> Result<String, String> {
    commands::combine_shares(shares, passphrase)
        .map(|secret| secret.to_string())
        .map_err(|e| format!("Combine failed: {e:#}"))
}

/// Share metadata as JSON; see [`wasm_parse_share`]
///
/// # Errors
/// Returns a message if the share does not decode
pub fn parse_share(share: &str) -> Result<String, String> {
    let share = Share::from_mnemonic(share).map_err(|e| format!("Parse failed: {e}"))?;
    let m = share.metadata();

    let info = ShareInfo {
        identifier: *m.identifier,
        extendable: m.extendable,
        iteration_exponent: *m.iteration_exponent,
        group_index: *m.group_index,
        group_threshold: *m.group_threshold,
        group_count: *m.group_count,
        member_index: *m.member_index,
        member_threshold: *m.member_threshold,
        word_count: share.word_count(),
    };

    serde_json::to_string(&info).map_err(|e| format!("Serialization failed: {e}"))
}

/// Random master secret as hex; see [`wasm_generate_master_secret`]
///
/// # Errors
/// Returns a message unless `bits` is 128 or 256
pub fn generate_master_secret(bits: u16) -> Result<String, String> {
    if bits != 128 && bits != 256 {
        return Err("Invalid strength: must be 128 or 256 bits".to_string());
    }

    // OsRng goes through getrandom, which uses crypto.getRandomValues() in the browser
    let mut secret = Zeroizing::new(vec![0u8; usize::from(bits / 8)]);
    OsRng
        .try_fill_bytes(&mut secret)
        .map_err(|e| format!("Failed to generate random secret: {e}"))?;

    Ok(hex::encode(&*secret))
}

/// Split a hex master secret into a single group of SLIP-39 shares
///
/// # Returns
/// JSON [`SplitResult`], or an error message
///
/// # Example (JavaScript)
/// ```javascript
/// const result = JSON.parse(wasm_split("00112233445566778899aabbccddeeff", "", 3, 5));
/// for (const share of result.groups[0]) {
///     console.log(share);
/// }
/// ```
#[wasm_bindgen]
pub fn wasm_split(
    secret_hex: &str,
    passphrase: &str,
    threshold: u8,
    shares: u8,
) -> Result<String, JsValue> {
    split(secret_hex, passphrase, threshold, shares).map_err(|e| JsValue::from_str(&e))
}

/// Split a hex master secret into several groups of SLIP-39 shares
///
/// `groups_json` lists `[member_threshold, member_count]` per group.
///
/// # Example (JavaScript)
/// ```javascript
/// const result = JSON.parse(
///     wasm_split_groups(secretHex, "", "[[1,1],[2,3],[3,5]]", 2, 0, false)
/// );
/// ```
#[wasm_bindgen]
pub fn wasm_split_groups(
    secret_hex: &str,
    passphrase: &str,
    groups_json: &str,
    group_threshold: u8,
    iteration_exponent: u8,
    extendable: bool,
) -> Result<String, JsValue> {
    split_groups(
        secret_hex,
        passphrase,
        groups_json,
        group_threshold,
        iteration_exponent,
        extendable,
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Combine SLIP-39 shares to recover the hex master secret
///
/// # Example (JavaScript)
/// ```javascript
/// const secretHex = wasm_combine([share1, share2, share3], "");
/// ```
#[wasm_bindgen]
pub fn wasm_combine(shares: Vec<String>, passphrase: &str) -> Result<String, JsValue> {
    combine(&shares, passphrase).map_err(|e| JsValue::from_str(&e))
}

/// Parse a SLIP-39 share and return its metadata as JSON [`ShareInfo`]
#[wasm_bindgen]
pub fn wasm_parse_share(share: &str) -> Result<String, JsValue> {
    parse_share(share).map_err(|e| JsValue::from_str(&e))
}

/// Generate a random 128- or 256-bit master secret as hex
#[wasm_bindgen]
pub fn wasm_generate_master_secret(bits: u16) -> Result<String, JsValue> {
    generate_master_secret(bits).map_err(|e| JsValue::from_str(&e))
}
