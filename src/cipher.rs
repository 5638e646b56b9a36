//! Passphrase encryption of the master secret
//!
//! A four-round Feistel network whose round function is
//! PBKDF2-HMAC-SHA256. The password of round `i` is `i || passphrase` and the
//! salt is the right half of the state, prefixed with `"shamir" || identifier`
//! for non-extendable backups. Decrypting with the wrong passphrase does not
//! fail: it yields a different, equally valid-looking secret.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::domain::{Identifier, IterationExponent};
use crate::error::{Result, Slip39Error};

/// Number of Feistel rounds
pub const ROUND_COUNT: u8 = 4;

const SALT_PREFIX: &[u8] = b"shamir";

/// Checks that a passphrase holds only printable ASCII (0x20..=0x7e)
///
/// # Errors
/// Returns [`Slip39Error::InvalidPassphrase`] otherwise
///
/// # Examples
///
/// ```rust
/// use slip39_codec::cipher::validate_passphrase;
///
/// assert!(validate_passphrase(b"TREZOR").is_ok());
/// assert!(validate_passphrase(b"").is_ok());
/// assert!(validate_passphrase("pässword".as_bytes()).is_err());
/// ```
pub fn validate_passphrase(passphrase: &[u8]) -> Result<()> {
    if passphrase.iter().all(|b| (0x20..=0x7e).contains(b)) {
        Ok(())
    } else {
        Err(Slip39Error::InvalidPassphrase)
    }
}

/// Encrypts a master secret into an encrypted master secret of the same length
///
/// # Errors
/// - [`Slip39Error::InvalidSecretLength`] if the secret is empty or of odd length
/// - [`Slip39Error::InvalidPassphrase`] if the passphrase is not printable ASCII
pub fn encrypt(
    master_secret: &[u8],
    passphrase: &[u8],
    identifier: Identifier,
    extendable: bool,
    iteration_exponent: IterationExponent,
) -> Result<Zeroizing<Vec<u8>>> {
    feistel(
        master_secret,
        passphrase,
        0..ROUND_COUNT,
        &salt_prefix(identifier, extendable),
        iteration_exponent,
    )
}

/// Decrypts an encrypted master secret
///
/// # Errors
/// Same as [`encrypt`]
pub fn decrypt(
    encrypted: &[u8],
    passphrase: &[u8],
    identifier: Identifier,
    extendable: bool,
    iteration_exponent: IterationExponent,
) -> Result<Zeroizing<Vec<u8>>> {
    feistel(
        encrypted,
        passphrase,
        (0..ROUND_COUNT).rev(),
        &salt_prefix(identifier, extendable),
        iteration_exponent,
    )
}

fn salt_prefix(identifier: Identifier, extendable: bool) -> Vec<u8> {
    if extendable {
        Vec::new()
    } else {
        let mut prefix = SALT_PREFIX.to_vec();
        prefix.extend_from_slice(&identifier.to_be_bytes());
        prefix
    }
}

fn feistel(
    input: &[u8],
    passphrase: &[u8],
    rounds: impl Iterator<Item = u8>,
    salt_prefix: &[u8],
    iteration_exponent: IterationExponent,
) -> Result<Zeroizing<Vec<u8>>> {
    if input.is_empty() || input.len() % 2 != 0 {
        return Err(Slip39Error::InvalidSecretLength(input.len()));
    }
    validate_passphrase(passphrase)?;

    let half = input.len() / 2;
    let mut left = Zeroizing::new(input[..half].to_vec());
    let mut right = Zeroizing::new(input[half..].to_vec());

    let iterations = iteration_exponent.round_iterations();
    let mut password = Zeroizing::new(Vec::with_capacity(passphrase.len() + 1));
    let mut salt = Zeroizing::new(Vec::with_capacity(salt_prefix.len() + half));
    let mut round_key = Zeroizing::new(vec![0u8; half]);

    for round in rounds {
        password.clear();
        password.push(round);
        password.extend_from_slice(passphrase);

        salt.clear();
        salt.extend_from_slice(salt_prefix);
        salt.extend_from_slice(&right);

        pbkdf2_hmac::<Sha256>(&password, &salt, iterations, &mut round_key);

        for (l, k) in left.iter_mut().zip(round_key.iter()) {
            *l ^= k;
        }
        std::mem::swap(&mut left, &mut right);
    }

    let mut output = Zeroizing::new(Vec::with_capacity(input.len()));
    output.extend_from_slice(&right);
    output.extend_from_slice(&left);
    Ok(output)
}
