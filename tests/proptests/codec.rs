//! Property tests for the share codec

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use slip39_codec::codec::{OVERHEAD_LENGTH_WORDS, Share, ShareMetadata, value_length_words};
use slip39_codec::domain::{Identifier, IterationExponent, ShareCount, ShareIndex, Threshold};
use slip39_codec::Slip39Error;
use zeroize::Zeroizing;

/// Wrapper for any well-formed share (16 to 32 byte even-length value)
#[derive(Clone, Debug)]
struct ValidShare(Share);

impl Arbitrary for ValidShare {
    fn arbitrary(g: &mut Gen) -> Self {
        let group_count = u8::arbitrary(g) % 16 + 1;
        let group_threshold = u8::arbitrary(g) % group_count + 1;

        let metadata = ShareMetadata {
            identifier: Identifier::new(u16::arbitrary(g) & 0x7fff).unwrap(),
            extendable: bool::arbitrary(g),
            iteration_exponent: IterationExponent::new(u8::arbitrary(g) % 16).unwrap(),
            group_index: ShareIndex::new(u8::arbitrary(g) % group_count).unwrap(),
            group_threshold: Threshold::new(group_threshold).unwrap(),
            group_count: ShareCount::new(group_count).unwrap(),
            member_index: ShareIndex::new(u8::arbitrary(g) % 16).unwrap(),
            member_threshold: Threshold::new(u8::arbitrary(g) % 16 + 1).unwrap(),
        };

        // 16, 18, ..., 32 bytes
        let len = 16 + 2 * usize::from(u8::arbitrary(g) % 9);
        let value: Vec<u8> = (0..len).map(|_| u8::arbitrary(g)).collect();

        ValidShare(Share::new(metadata, Zeroizing::new(value)).unwrap())
    }
}

/// Test that words decode back to the same share
#[quickcheck]
fn prop_words_round_trip(share: ValidShare) -> bool {
    let ValidShare(share) = share;
    let words = share.to_words();
    Share::from_words(&words).is_ok_and(|decoded| decoded == share)
}

/// Test that mnemonics decode back to the same share
#[quickcheck]
fn prop_mnemonic_round_trip(share: ValidShare) -> bool {
    let ValidShare(share) = share;
    let Ok(mnemonic) = share.to_mnemonic() else {
        return false;
    };
    Share::from_mnemonic(mnemonic.as_str()).is_ok_and(|decoded| decoded == share)
}

/// Test that the word count follows from the value length
#[quickcheck]
fn prop_word_count(share: ValidShare) -> bool {
    let ValidShare(share) = share;
    let expected = OVERHEAD_LENGTH_WORDS + value_length_words(share.value().len());
    share.word_count() == expected && share.to_words().len() == expected
}

/// Test that changing any one word is caught by the checksum
#[quickcheck]
fn prop_single_word_change_is_detected(share: ValidShare, position: usize, delta: u16) -> bool {
    let ValidShare(share) = share;
    let mut words = share.to_words().to_vec();
    let position = position % words.len();
    // non-zero change that stays inside the wordlist
    let delta = delta % 1023 + 1;
    words[position] = (words[position] + delta) % 1024;

    Share::from_words(&words) == Err(Slip39Error::InvalidMnemonicChecksum)
}

/// Test that a buffer one word short is rejected
#[quickcheck]
fn prop_short_buffer_is_rejected(share: ValidShare) -> bool {
    let ValidShare(share) = share;
    let mut out = vec![0u16; share.word_count() - 1];
    matches!(
        share.write_words(&mut out),
        Err(Slip39Error::InsufficientSpace { .. })
    )
}
