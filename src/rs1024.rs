//! RS1024 checksum over GF(1024)
//!
//! A Reed-Solomon code that detects any error affecting at most 3 words of a
//! share. The checksum is keyed by a customization string so that extendable
//! and non-extendable shares cannot be confused for one another.

/// Generator polynomial coefficients
const GEN: [u32; 10] = [
    0x00e0_e040,
    0x01c1_c080,
    0x0383_8100,
    0x0707_0200,
    0x0e0e_0009,
    0x1c0c_2412,
    0x3808_6c24,
    0x3090_fc48,
    0x21b1_f890,
    0x03f3_f120,
];

/// Customization string for non-extendable shares
pub const SHAMIR: &[u8] = b"shamir";

/// Customization string for extendable shares
pub const SHAMIR_EXTENDABLE: &[u8] = b"shamir_extendable";

/// Number of 10-bit words in a checksum
pub const CHECKSUM_LENGTH_WORDS: usize = 3;

/// Picks the customization string for a share's extendable flag
#[must_use]
pub const fn customization_string(extendable: bool) -> &'static [u8] {
    if extendable { SHAMIR_EXTENDABLE } else { SHAMIR }
}

fn polymod(customization: &[u8], data: &[u16]) -> u32 {
    let values = customization
        .iter()
        .map(|&b| u32::from(b))
        .chain(data.iter().map(|&w| u32::from(w)));

    let mut chk: u32 = 1;
    for value in values {
        let b = chk >> 20;
        chk = ((chk & 0x000f_ffff) << 10) ^ value;
        for (i, generator) in GEN.iter().enumerate() {
            if (b >> i) & 1 != 0 {
                chk ^= generator;
            }
        }
    }
    chk
}

/// Computes the three checksum words for `data`
///
/// # Examples
///
/// ```rust
/// use slip39_codec::rs1024;
///
/// let data = [100u16, 200, 300, 400];
/// let checksum = rs1024::create_checksum(rs1024::SHAMIR, &data);
///
/// let mut full = data.to_vec();
/// full.extend_from_slice(&checksum);
/// assert!(rs1024::verify_checksum(rs1024::SHAMIR, &full));
/// assert!(!rs1024::verify_checksum(rs1024::SHAMIR_EXTENDABLE, &full));
/// ```
#[must_use]
pub fn create_checksum(customization: &[u8], data: &[u16]) -> [u16; CHECKSUM_LENGTH_WORDS] {
    let mut padded = Vec::with_capacity(data.len() + CHECKSUM_LENGTH_WORDS);
    padded.extend_from_slice(data);
    padded.extend_from_slice(&[0; CHECKSUM_LENGTH_WORDS]);

    let chk = polymod(customization, &padded) ^ 1;

    #[allow(
        clippy::cast_possible_truncation,
        reason = "each value is masked to 10 bits"
    )]
    let checksum = [
        ((chk >> 20) & 0x3ff) as u16,
        ((chk >> 10) & 0x3ff) as u16,
        (chk & 0x3ff) as u16,
    ];
    checksum
}

/// Checks that the last three words of `data` are a valid checksum
#[must_use]
pub fn verify_checksum(customization: &[u8], data: &[u16]) -> bool {
    polymod(customization, data) == 1
}
