//! Shamir secret sharing over GF(256) with a digest share
//!
//! This is the SLIP-39 flavour of Shamir's scheme. A secret `S` of `n` bytes is
//! hidden at x = [`SECRET_INDEX`] on a polynomial of degree `threshold - 1`,
//! and a digest share `D = HMAC-SHA256(key=R, msg=S)[..4] || R` sits at
//! x = [`DIGEST_INDEX`]. Recovering `D` alongside `S` lets us detect a share set
//! that interpolates to the wrong polynomial, something the per-share checksum
//! cannot catch.
//!
//! The same two primitives, [`split_secret`] and [`recover_secret`], serve both
//! the group level and the member level of a SLIP-39 backup.

use hmac::{Hmac, Mac};
use rand::{CryptoRng, RngCore};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{Result, Slip39Error};
use crate::gf256;

type HmacSha256 = Hmac<Sha256>;

/// x coordinate holding the shared secret
pub const SECRET_INDEX: u8 = 255;

/// x coordinate holding the digest share
pub const DIGEST_INDEX: u8 = 254;

/// Number of digest bytes at the front of the digest share
pub const DIGEST_LENGTH_BYTES: usize = 4;

/// Maximum number of shares at either level
pub const MAX_SHARE_COUNT: u8 = 16;

/// Minimum length of a shared secret in bytes (128 bits)
pub const MIN_SECRET_LENGTH_BYTES: usize = 16;

/// A point on the sharing polynomial: x coordinate and byte-wise y values
pub type Point = (u8, Zeroizing<Vec<u8>>);

/// Evaluates the polynomial through `points` at `x`
///
/// Interpolation is done independently for every byte position using
/// Lagrange basis polynomials. When `x` is one of the given indices its value
/// is returned as is.
///
/// # Errors
/// Returns [`Slip39Error::InvalidShardSet`] if no points are given, the
/// indices are not unique, or the values differ in length
pub fn interpolate(points: &[(u8, &[u8])], x: u8) -> Result<Zeroizing<Vec<u8>>> {
    let Some(&(_, first)) = points.first() else {
        return Err(Slip39Error::InvalidShardSet("no shares to interpolate"));
    };
    let len = first.len();

    if points.iter().any(|(_, value)| value.len() != len) {
        return Err(Slip39Error::InvalidShardSet("share values differ in length"));
    }

    for (i, (xi, _)) in points.iter().enumerate() {
        if points[i + 1..].iter().any(|(xj, _)| xj == xi) {
            return Err(Slip39Error::InvalidShardSet("share indices are not unique"));
        }
    }

    if let Some(&(_, value)) = points.iter().find(|(xi, _)| *xi == x) {
        return Ok(Zeroizing::new(value.to_vec()));
    }

    let mut result = Zeroizing::new(vec![0u8; len]);
    for &(xi, value) in points {
        let mut numerator = 1u8;
        let mut denominator = 1u8;
        for &(xj, _) in points {
            if xj != xi {
                numerator = gf256::mul(numerator, gf256::sub(x, xj));
                denominator = gf256::mul(denominator, gf256::sub(xi, xj));
            }
        }
        // denominator is a product of non-zero differences of distinct indices
        let basis = gf256::div(numerator, denominator)
            .ok_or(Slip39Error::InvalidShardSet("share indices are not unique"))?;

        for (out, &y) in result.iter_mut().zip(value) {
            *out = gf256::add(*out, gf256::mul(y, basis));
        }
    }

    Ok(result)
}

/// Splits `secret` into `share_count` shares, any `threshold` of which recover it
///
/// Shares are returned with x coordinates `0..share_count`.
///
/// # Errors
/// - [`Slip39Error::InvalidMemberThreshold`] if `threshold` is zero or exceeds `share_count`
/// - [`Slip39Error::InvalidShardBuffer`] if `share_count` exceeds [`MAX_SHARE_COUNT`]
/// - [`Slip39Error::SecretTooShort`] if the secret is shorter than 16 bytes
pub fn split_secret<R: RngCore + CryptoRng>(
    threshold: u8,
    share_count: u8,
    secret: &[u8],
    rng: &mut R,
) -> Result<Vec<Point>> {
    if threshold == 0 || threshold > share_count {
        return Err(Slip39Error::InvalidMemberThreshold(threshold));
    }
    if share_count > MAX_SHARE_COUNT {
        return Err(Slip39Error::InvalidShardBuffer(
            "no more than 16 shares can be created",
        ));
    }
    if secret.len() < MIN_SECRET_LENGTH_BYTES {
        return Err(Slip39Error::SecretTooShort {
            got: secret.len(),
            min: MIN_SECRET_LENGTH_BYTES,
        });
    }

    if threshold == 1 {
        return Ok((0..share_count)
            .map(|x| (x, Zeroizing::new(secret.to_vec())))
            .collect());
    }

    let random_share_count = threshold - 2;
    let mut shares: Vec<Point> = Vec::with_capacity(share_count as usize);
    for x in 0..random_share_count {
        let mut value = Zeroizing::new(vec![0u8; secret.len()]);
        rng.fill_bytes(&mut value);
        shares.push((x, value));
    }

    let mut digest_share = Zeroizing::new(vec![0u8; secret.len()]);
    rng.fill_bytes(&mut digest_share[DIGEST_LENGTH_BYTES..]);
    let digest = create_digest(&digest_share[DIGEST_LENGTH_BYTES..], secret);
    digest_share[..DIGEST_LENGTH_BYTES].copy_from_slice(&digest);

    let mut base: Vec<(u8, &[u8])> = shares.iter().map(|(x, v)| (*x, v.as_slice())).collect();
    base.push((DIGEST_INDEX, digest_share.as_slice()));
    base.push((SECRET_INDEX, secret));

    let mut derived = Vec::with_capacity((share_count - random_share_count) as usize);
    for x in random_share_count..share_count {
        derived.push((x, interpolate(&base, x)?));
    }
    drop(base);

    shares.extend(derived);
    Ok(shares)
}

/// Recovers the secret from at least `threshold` points
///
/// The first `threshold` points determine the polynomial. The digest share is
/// checked against the recovered secret, and every point beyond the threshold
/// must lie on the same polynomial.
///
/// # Errors
/// Returns [`Slip39Error::InvalidShardSet`] if there are too few points, the
/// digest does not match, or a redundant point disagrees
pub fn recover_secret(threshold: u8, points: &[(u8, &[u8])]) -> Result<Zeroizing<Vec<u8>>> {
    let threshold = threshold as usize;
    if threshold == 0 || points.len() < threshold {
        return Err(Slip39Error::InvalidShardSet(
            "fewer shares than the threshold",
        ));
    }

    let (base, redundant) = points.split_at(threshold);

    let secret = if threshold == 1 {
        Zeroizing::new(base[0].1.to_vec())
    } else {
        let secret = interpolate(base, SECRET_INDEX)?;
        let digest_share = interpolate(base, DIGEST_INDEX)?;
        let digest = create_digest(&digest_share[DIGEST_LENGTH_BYTES..], &secret);
        if digest[..] != digest_share[..DIGEST_LENGTH_BYTES] {
            return Err(Slip39Error::InvalidShardSet("share digest mismatch"));
        }
        secret
    };

    for &(x, value) in redundant {
        let expected = if threshold == 1 {
            Zeroizing::new(base[0].1.to_vec())
        } else {
            interpolate(base, x)?
        };
        if expected.as_slice() != value {
            return Err(Slip39Error::InvalidShardSet(
                "redundant share does not match the others",
            ));
        }
    }

    Ok(secret)
}

fn create_digest(random_data: &[u8], secret: &[u8]) -> [u8; DIGEST_LENGTH_BYTES] {
    let mut mac =
        <HmacSha256 as Mac>::new_from_slice(random_data).unwrap_or_else(|_| {
            unreachable!("HMAC accepts keys of any length")
        });
    mac.update(secret);
    let tag = mac.finalize().into_bytes();

    let mut digest = [0u8; DIGEST_LENGTH_BYTES];
    digest.copy_from_slice(&tag[..DIGEST_LENGTH_BYTES]);
    digest
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const SECRET: [u8; 16] = *b"0123456789abcdef";

    fn as_points(shares: &[Point]) -> Vec<(u8, &[u8])> {
        shares.iter().map(|(x, v)| (*x, v.as_slice())).collect()
    }

    #[test]
    fn test_interpolate_returns_known_point() {
        let a = [1u8, 2, 3];
        let b = [4u8, 5, 6];
        let points = [(0u8, &a[..]), (1u8, &b[..])];
        assert_eq!(*interpolate(&points, 1).unwrap(), b.to_vec());
    }

    #[test]
    fn test_interpolate_line() {
        // y = 7 + 3x over GF(256)
        let f = |x: u8| gf256::add(7, gf256::mul(3, x));
        let y1 = [f(1)];
        let y2 = [f(2)];
        let points = [(1u8, &y1[..]), (2u8, &y2[..])];
        assert_eq!(*interpolate(&points, 0).unwrap(), vec![7]);
        assert_eq!(*interpolate(&points, 200).unwrap(), vec![f(200)]);
    }

    #[test]
    fn test_interpolate_rejects_duplicate_indices() {
        let a = [1u8];
        let points = [(3u8, &a[..]), (3u8, &a[..])];
        assert_eq!(
            interpolate(&points, 0),
            Err(Slip39Error::InvalidShardSet("share indices are not unique"))
        );
    }

    #[test]
    fn test_interpolate_rejects_length_mismatch() {
        let a = [1u8, 2];
        let b = [1u8];
        let points = [(0u8, &a[..]), (1u8, &b[..])];
        assert!(interpolate(&points, 5).is_err());
        assert!(interpolate(&[], 5).is_err());
    }

    #[test]
    fn test_threshold_one_copies_secret() {
        let mut rng = StdRng::seed_from_u64(1);
        let shares = split_secret(1, 1, &SECRET, &mut rng).unwrap();
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].0, 0);
        assert_eq!(*shares[0].1, SECRET.to_vec());

        let recovered = recover_secret(1, &as_points(&shares)).unwrap();
        assert_eq!(*recovered, SECRET.to_vec());
    }

    #[test]
    fn test_split_and_recover_every_pair() {
        let mut rng = StdRng::seed_from_u64(2);
        let shares = split_secret(2, 4, &SECRET, &mut rng).unwrap();
        assert_eq!(shares.len(), 4);

        for i in 0..4 {
            for j in 0..4 {
                if i == j {
                    continue;
                }
                let owned = [shares[i].clone(), shares[j].clone()];
                let pair = as_points(&owned);
                let recovered = recover_secret(2, &pair).unwrap();
                assert_eq!(*recovered, SECRET.to_vec(), "pair {i},{j}");
            }
        }
    }

    #[test]
    fn test_split_max_threshold() {
        let mut rng = StdRng::seed_from_u64(3);
        let secret = [0xa5u8; 32];
        let shares = split_secret(16, 16, &secret, &mut rng).unwrap();
        let recovered = recover_secret(16, &as_points(&shares)).unwrap();
        assert_eq!(*recovered, secret.to_vec());
    }

    #[test]
    fn test_digest_share_lies_on_polynomial() {
        let mut rng = StdRng::seed_from_u64(4);
        let shares = split_secret(3, 5, &SECRET, &mut rng).unwrap();
        let points = as_points(&shares[..3]);
        let digest_share = interpolate(&points, DIGEST_INDEX).unwrap();
        let expected = create_digest(&digest_share[DIGEST_LENGTH_BYTES..], &SECRET);
        assert_eq!(&digest_share[..DIGEST_LENGTH_BYTES], &expected[..]);
    }

    #[test]
    fn test_recover_detects_tampered_share() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut shares = split_secret(2, 3, &SECRET, &mut rng).unwrap();
        shares[0].1[0] ^= 0x01;

        let result = recover_secret(2, &as_points(&shares[..2]));
        assert_eq!(
            result,
            Err(Slip39Error::InvalidShardSet("share digest mismatch"))
        );
    }

    #[test]
    fn test_recover_checks_redundant_points() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut shares = split_secret(2, 3, &SECRET, &mut rng).unwrap();

        let recovered = recover_secret(2, &as_points(&shares)).unwrap();
        assert_eq!(*recovered, SECRET.to_vec());

        shares[2].1[5] ^= 0x80;
        let result = recover_secret(2, &as_points(&shares));
        assert_eq!(
            result,
            Err(Slip39Error::InvalidShardSet(
                "redundant share does not match the others"
            ))
        );
    }

    #[test]
    fn test_recover_needs_threshold_points() {
        let mut rng = StdRng::seed_from_u64(7);
        let shares = split_secret(3, 5, &SECRET, &mut rng).unwrap();
        let result = recover_secret(3, &as_points(&shares[..2]));
        assert!(matches!(result, Err(Slip39Error::InvalidShardSet(_))));
    }

    #[test]
    fn test_split_parameter_validation() {
        let mut rng = StdRng::seed_from_u64(8);
        assert_eq!(
            split_secret(0, 3, &SECRET, &mut rng).unwrap_err(),
            Slip39Error::InvalidMemberThreshold(0)
        );
        assert_eq!(
            split_secret(4, 3, &SECRET, &mut rng).unwrap_err(),
            Slip39Error::InvalidMemberThreshold(4)
        );
        assert!(matches!(
            split_secret(2, 17, &SECRET, &mut rng),
            Err(Slip39Error::InvalidShardBuffer(_))
        ));
        assert_eq!(
            split_secret(2, 3, &SECRET[..15], &mut rng).unwrap_err(),
            Slip39Error::SecretTooShort { got: 15, min: 16 }
        );
    }

    #[test]
    fn test_shares_are_randomized() {
        let mut rng = StdRng::seed_from_u64(9);
        let first = split_secret(2, 2, &SECRET, &mut rng).unwrap();
        let second = split_secret(2, 2, &SECRET, &mut rng).unwrap();
        assert_ne!(*first[0].1, *second[0].1);
    }
}
