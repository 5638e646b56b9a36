//! Arithmetic in GF(256)
//!
//! Elements are bytes; addition is XOR and multiplication goes through
//! discrete log/antilog tables. The field is defined by the Rijndael
//! polynomial x^8 + x^4 + x^3 + x + 1 with generator 3, which is what SLIP-39
//! shares are computed over. The tables are built at compile time.

/// Reduction polynomial x^8 + x^4 + x^3 + x + 1
const POLYNOMIAL: u16 = 0x11b;

struct Tables {
    exp: [u8; 255],
    log: [u8; 256],
}

const TABLES: Tables = build_tables();

#[allow(
    clippy::cast_possible_truncation,
    reason = "value is reduced below 0x100 on every step and power stays below 255"
)]
const fn build_tables() -> Tables {
    let mut exp = [0u8; 255];
    let mut log = [0u8; 256];
    let mut value: u16 = 1;
    let mut power = 0;
    while power < 255 {
        exp[power] = value as u8;
        log[value as usize] = power as u8;
        // multiply by the generator 3 = x + 1
        value = (value << 1) ^ value;
        if value & 0x100 != 0 {
            value ^= POLYNOMIAL;
        }
        power += 1;
    }
    Tables { exp, log }
}

#[inline]
fn exp(power: usize) -> u8 {
    TABLES.exp[power % 255]
}

#[inline]
fn log(a: u8) -> usize {
    TABLES.log[a as usize] as usize
}

/// Adds two field elements
#[inline]
#[must_use]
pub const fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Subtracts two field elements (identical to [`add`] in characteristic 2)
#[inline]
#[must_use]
pub const fn sub(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Multiplies two field elements
#[inline]
#[must_use]
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    exp(log(a) + log(b))
}

/// Divides `a` by `b`, or `None` when `b` is zero
///
/// # Examples
///
/// ```rust
/// use slip39_codec::gf256;
///
/// let q = gf256::div(0x53, 0xca).unwrap();
/// assert_eq!(gf256::mul(q, 0xca), 0x53);
/// assert_eq!(gf256::div(7, 0), None);
/// ```
#[inline]
#[must_use]
pub fn div(a: u8, b: u8) -> Option<u8> {
    if b == 0 {
        return None;
    }
    if a == 0 {
        return Some(0);
    }
    Some(exp(log(a) + 255 - log(b)))
}

/// Multiplicative inverse, or `None` for zero
#[inline]
#[must_use]
pub fn inv(a: u8) -> Option<u8> {
    div(1, a)
}
