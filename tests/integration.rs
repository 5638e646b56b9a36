use slip39_codec::codec::Share;
use slip39_codec::domain::{GroupSpec, Identifier, IterationExponent, SplitConfig};
use slip39_codec::error::status_code;
use slip39_codec::slip39::{
    EncryptedMasterSecret, combine_mnemonics, combine_shares, generate_mnemonic_words,
    split_ems_with_rng, split_master_secret,
};
use slip39_codec::{Slip39Error, wordlist};

use rand::SeedableRng;
use rand::rngs::StdRng;

const VECTOR_1: &str = "duckling enlarge academic academic agency result length solution fridge kidney coal piece deal husband erode duke ajar critical decision keyboard";
const VECTOR_2: &str = "duckling enlarge academic academic agency result length solution fridge kidney coal piece deal husband erode duke ajar critical decision kidney";
const VECTOR_3: &str = "duckling enlarge academic academic email result length solution fridge kidney coal piece deal husband erode duke ajar music cargo fitness";
const VECTOR_4: [&str; 2] = [
    "shadow pistol academic always adequate wildlife fancy gross oasis cylinder mustang wrist rescue view short owner flip making coding armed",
    "shadow pistol academic acid actress prayer class unknown daughter sweater depict flip twice unkind craft early superior advocate guest smoking",
];

const EXTENDABLE_VECTOR: &str = "testify swimming academic academic column loyalty smear include exotic bedroom exotic wrist lobe cover grief golden smart junior estimate learn";

const SCENARIO_SECRET: [u8; 16] = [
    0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
];

fn mnemonics(shares: &[&Share]) -> Vec<String> {
    shares
        .iter()
        .map(|s| s.to_mnemonic().unwrap().as_str().to_string())
        .collect()
}

#[test]
fn test_vector_single_share() {
    let secret = combine_mnemonics(&[VECTOR_1], b"TREZOR").unwrap();
    assert_eq!(hex::encode(&*secret), "bb54aac4b89dc868ba37d9cc21b2cece");
}

#[test]
fn test_vector_invalid_checksum() {
    let result = combine_mnemonics(&[VECTOR_2], b"TREZOR");
    assert_eq!(result, Err(Slip39Error::InvalidMnemonicChecksum));
    assert_eq!(status_code(&result), -2);
}

#[test]
fn test_vector_invalid_padding() {
    let result = combine_mnemonics(&[VECTOR_3], b"TREZOR");
    assert_eq!(result, Err(Slip39Error::InvalidPadding));
    assert_eq!(status_code(&result), -14);
}

#[test]
fn test_vector_two_of_three() {
    let secret = combine_mnemonics(&VECTOR_4, b"TREZOR").unwrap();
    assert_eq!(hex::encode(&*secret), "b43ceb7e57a0ea8766221624d01b0864");

    // order does not matter
    let reversed = [VECTOR_4[1], VECTOR_4[0]];
    assert_eq!(combine_mnemonics(&reversed, b"TREZOR").unwrap(), secret);
}

#[test]
fn test_vector_two_of_three_single_share() {
    assert_eq!(
        combine_mnemonics(&VECTOR_4[..1], b"TREZOR"),
        Err(Slip39Error::NotEnoughMemberShards {
            group: 0,
            needed: 2,
            got: 1
        })
    );
}

#[test]
fn test_three_of_five_scenario() {
    let config = SplitConfig::single_group(3, 5).unwrap();
    let groups = split_master_secret(&config, &SCENARIO_SECRET, b"").unwrap();
    assert_eq!(groups.len(), 1);
    let members = &groups[0];
    assert_eq!(members.len(), 5);
    for share in members {
        assert_eq!(share.to_mnemonic().unwrap().words().count(), 20);
    }

    // every 3-subset recovers the same EMS; decrypt once
    let mut recovered = Vec::new();
    for a in 0..5 {
        for b in a + 1..5 {
            for c in b + 1..5 {
                let subset = vec![
                    members[a].clone(),
                    members[b].clone(),
                    members[c].clone(),
                ];
                recovered.push(combine_shares(&subset).unwrap());
            }
        }
    }
    assert_eq!(recovered.len(), 10);
    assert!(recovered.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(
        recovered[0].decrypt(b"").unwrap().as_slice(),
        &SCENARIO_SECRET
    );

    // any 3 mnemonics end to end
    let picked = mnemonics(&[&members[4], &members[1], &members[2]]);
    assert_eq!(
        combine_mnemonics(&picked, b"").unwrap().as_slice(),
        &SCENARIO_SECRET
    );

    let two = mnemonics(&[&members[0], &members[3]]);
    assert!(matches!(
        combine_mnemonics(&two, b""),
        Err(Slip39Error::NotEnoughMemberShards {
            needed: 3,
            got: 2,
            ..
        })
    ));
}

#[test]
fn test_multi_group_backup() {
    let secret = [0x42u8; 32];
    let groups =
        generate_mnemonic_words(&secret, 1, b"passphrase", &[(1, 1), (2, 3), (3, 5)], 2).unwrap();
    assert_eq!(groups.len(), 3);
    assert!(groups.iter().flatten().all(|m| m.words().count() == 33));

    let recovered = combine_mnemonics(
        &[
            groups[2][0].as_str(),
            groups[0][0].as_str(),
            groups[2][3].as_str(),
            groups[2][1].as_str(),
        ],
        b"passphrase",
    )
    .unwrap();
    assert_eq!(recovered.as_slice(), &secret);

    // one complete group is not enough
    assert_eq!(
        combine_mnemonics(&[groups[1][0].as_str(), groups[1][2].as_str()], b"passphrase"),
        Err(Slip39Error::NotEnoughGroups { needed: 2, got: 1 })
    );
}

#[test]
fn test_singleton_rule() {
    let secret = [1u8; 16];
    assert_eq!(
        generate_mnemonic_words(&secret, 0, b"", &[(1, 3)], 1).unwrap_err(),
        Slip39Error::InvalidSingletonMember { count: 3 }
    );
    assert!(generate_mnemonic_words(&secret, 0, b"", &[(1, 1)], 1).is_ok());
    assert_eq!(
        GroupSpec::new(1, 2).unwrap_err().code(),
        Slip39Error::InvalidSingletonMember { count: 2 }.code()
    );
}

#[test]
fn test_duplicate_share_is_rejected() {
    let result = combine_mnemonics(&[VECTOR_4[0], VECTOR_4[0]], b"TREZOR");
    assert_eq!(
        result,
        Err(Slip39Error::DuplicateMemberIndex {
            group: 0,
            member: 2
        })
    );
    assert_eq!(status_code(&result), -11);
}

#[test]
fn test_digest_detects_shares_of_different_secrets() {
    let mut rng = StdRng::seed_from_u64(99);
    let id = Identifier::new(4242).unwrap();
    let config = SplitConfig::single_group(2, 3).unwrap();

    let ems_a = EncryptedMasterSecret::new(
        id,
        false,
        IterationExponent::default(),
        zeroize::Zeroizing::new(vec![0xaa; 16]),
    )
    .unwrap();
    let ems_b = EncryptedMasterSecret::new(
        id,
        false,
        IterationExponent::default(),
        zeroize::Zeroizing::new(vec![0xbb; 16]),
    )
    .unwrap();

    let a = split_ems_with_rng(&config, &ems_a, &mut rng).unwrap();
    let b = split_ems_with_rng(&config, &ems_b, &mut rng).unwrap();

    // metadata agrees, only the values come from different polynomials
    let mixed = vec![a[0][0].clone(), b[0][1].clone()];
    assert_eq!(
        combine_shares(&mixed),
        Err(Slip39Error::InvalidShardSet("share digest mismatch"))
    );
}

#[test]
fn test_every_bit_flip_is_rejected() {
    let words = wordlist::mnemonic_to_indices(VECTOR_4[1]).unwrap();
    for position in 0..words.len() {
        for bit in 0..10 {
            let mut corrupted = words.to_vec();
            corrupted[position] ^= 1 << bit;
            assert_eq!(
                Share::from_words(&corrupted),
                Err(Slip39Error::InvalidMnemonicChecksum),
                "bit {bit} of word {position}"
            );
        }
    }
}

#[test]
fn test_combine_is_deterministic() {
    let first = combine_mnemonics(&VECTOR_4, b"").unwrap();
    let second = combine_mnemonics(&VECTOR_4, b"").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_extendable_backup_round_trip() {
    let config = SplitConfig::single_group(2, 2)
        .unwrap()
        .with_extendable(true)
        .with_iteration_exponent(IterationExponent::new(1).unwrap());
    let groups = split_master_secret(&config, &SCENARIO_SECRET, b"TREZOR").unwrap();
    assert!(groups[0][0].metadata().extendable);

    let picked = mnemonics(&[&groups[0][1], &groups[0][0]]);
    assert_eq!(
        combine_mnemonics(&picked, b"TREZOR").unwrap().as_slice(),
        &SCENARIO_SECRET
    );
}

#[test]
fn test_unknown_word_and_empty_set() {
    let result = combine_mnemonics(&[VECTOR_1.replace("keyboard", "keyboards")], b"");
    assert_eq!(
        result,
        Err(Slip39Error::InvalidMnemonicWord { position: 19 })
    );
    assert_eq!(status_code(&result), -17);

    let empty: Vec<String> = Vec::new();
    assert_eq!(
        status_code(&combine_mnemonics(&empty, b"")),
        Slip39Error::EmptyMnemonicSet.code()
    );
}

#[test]
fn test_vector_extendable_single_share() {
    let share = Share::from_mnemonic(EXTENDABLE_VECTOR).unwrap();
    let m = share.metadata();
    assert_eq!(*m.identifier, 29019);
    assert!(m.extendable);
    assert_eq!(*m.iteration_exponent, 3);

    let secret = combine_mnemonics(&[EXTENDABLE_VECTOR], b"TREZOR").unwrap();
    assert_eq!(hex::encode(&*secret), "1679b4516e0ee5954351d288a838f45e");
}
