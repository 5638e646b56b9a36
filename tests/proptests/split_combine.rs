//! Property tests for split/combine workflows

use quickcheck::{Arbitrary, Gen, QuickCheck};
use quickcheck_macros::quickcheck;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use slip39_codec::Slip39Error;
use slip39_codec::codec::Share;
use slip39_codec::domain::{GroupSpec, Identifier, IterationExponent, SplitConfig};
use slip39_codec::slip39::{
    EncryptedMasterSecret, combine_mnemonics, combine_shares, split_ems_with_rng,
    split_master_secret_with_rng,
};
use zeroize::Zeroizing;

/// Wrapper for 128 or 256 bit secrets
#[derive(Clone, Debug)]
struct Secret(Vec<u8>);

impl Arbitrary for Secret {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = if bool::arbitrary(g) { 16 } else { 32 };
        Secret((0..len).map(|_| u8::arbitrary(g)).collect())
    }
}

/// Wrapper for valid group layouts (kept small so the tests stay quick)
#[derive(Clone, Debug)]
struct ValidLayout {
    group_threshold: u8,
    groups: Vec<(u8, u8)>,
}

impl Arbitrary for ValidLayout {
    fn arbitrary(g: &mut Gen) -> Self {
        let group_count = u8::arbitrary(g) % 4 + 1;
        let group_threshold = u8::arbitrary(g) % group_count + 1;

        let groups = (0..group_count)
            .map(|_| {
                let count = u8::arbitrary(g) % 5 + 1;
                // threshold 1 only for single-member groups
                let threshold = if count == 1 {
                    1
                } else {
                    u8::arbitrary(g) % (count - 1) + 2
                };
                (threshold, count)
            })
            .collect();

        ValidLayout {
            group_threshold,
            groups,
        }
    }
}

impl ValidLayout {
    fn config(&self) -> SplitConfig {
        SplitConfig::from_descriptors(self.group_threshold, &self.groups).unwrap()
    }
}

fn ems(secret: &Secret, identifier: u16) -> EncryptedMasterSecret {
    EncryptedMasterSecret::new(
        Identifier::new(identifier & 0x7fff).unwrap(),
        false,
        IterationExponent::default(),
        Zeroizing::new(secret.0.clone()),
    )
    .unwrap()
}

/// Picks `group_threshold` random groups and `member_threshold` random members of each
fn pick_shares(groups: &[Vec<Share>], group_threshold: u8, rng: &mut StdRng) -> Vec<Share> {
    let mut group_order: Vec<usize> = (0..groups.len()).collect();
    group_order.shuffle(rng);

    let mut picked = Vec::new();
    for &gi in group_order.iter().take(group_threshold.into()) {
        let members = &groups[gi];
        let needed = usize::from(*members[0].metadata().member_threshold);
        picked.extend(members.choose_multiple(rng, needed).cloned());
    }
    picked.shuffle(rng);
    picked
}

/// Test that any qualifying subset recovers the encrypted master secret
#[quickcheck]
fn prop_threshold_subset_recovers(
    secret: Secret,
    layout: ValidLayout,
    identifier: u16,
    seed: u64,
) -> bool {
    let mut rng = StdRng::seed_from_u64(seed);
    let original = ems(&secret, identifier);
    let Ok(groups) = split_ems_with_rng(&layout.config(), &original, &mut rng) else {
        return false;
    };

    let picked = pick_shares(&groups, layout.group_threshold, &mut rng);
    combine_shares(&picked).is_ok_and(|recovered| recovered == original)
}

/// Test that handing over every share also recovers the secret
#[quickcheck]
fn prop_all_shares_recover(secret: Secret, layout: ValidLayout, seed: u64) -> bool {
    let mut rng = StdRng::seed_from_u64(seed);
    let original = ems(&secret, 7);
    let Ok(groups) = split_ems_with_rng(&layout.config(), &original, &mut rng) else {
        return false;
    };

    let all: Vec<Share> = groups.into_iter().flatten().collect();
    combine_shares(&all).is_ok_and(|recovered| recovered == original)
}

/// Test that one member short in a required group fails
#[quickcheck]
fn prop_missing_member_fails(secret: Secret, layout: ValidLayout, seed: u64) -> bool {
    let mut rng = StdRng::seed_from_u64(seed);
    let Ok(groups) = split_ems_with_rng(&layout.config(), &ems(&secret, 9), &mut rng) else {
        return false;
    };

    let mut picked = pick_shares(&groups, layout.group_threshold, &mut rng);
    picked.pop();

    matches!(
        combine_shares(&picked),
        Err(Slip39Error::NotEnoughMemberShards { .. }
            | Slip39Error::NotEnoughGroups { .. }
            | Slip39Error::EmptyMnemonicSet)
    )
}

/// Test that every share of a split carries the same backup parameters
#[quickcheck]
fn prop_shares_agree_on_backup(layout: ValidLayout, identifier: u16, seed: u64) -> bool {
    let mut rng = StdRng::seed_from_u64(seed);
    let secret = Secret(vec![0x11; 16]);
    let Ok(groups) = split_ems_with_rng(&layout.config(), &ems(&secret, identifier), &mut rng)
    else {
        return false;
    };

    groups.iter().enumerate().all(|(gi, members)| {
        members.len() == usize::from(layout.groups[gi].1)
            && members.iter().enumerate().all(|(mi, share)| {
                let m = share.metadata();
                *m.identifier == identifier & 0x7fff
                    && usize::from(*m.group_index) == gi
                    && usize::from(*m.member_index) == mi
                    && *m.group_threshold == layout.group_threshold
                    && *m.member_threshold == layout.groups[gi].0
            })
    })
}

fn mnemonic_round_trip_with_passphrase(secret: Secret, seed: u64, pass: u32) -> bool {
    let mut rng = StdRng::seed_from_u64(seed);
    let passphrase = format!("pass-{pass}");
    let config = SplitConfig::new(1, vec![GroupSpec::new(2, 3).unwrap()]).unwrap();
    let Ok(groups) =
        split_master_secret_with_rng(&config, &secret.0, passphrase.as_bytes(), &mut rng)
    else {
        return false;
    };

    let mnemonics: Vec<String> = groups[0][1..]
        .iter()
        .filter_map(|share| share.to_mnemonic().ok())
        .map(|m| m.as_str().to_string())
        .collect();

    combine_mnemonics(&mnemonics, passphrase.as_bytes())
        .is_ok_and(|recovered| recovered.as_slice() == secret.0.as_slice())
}

/// Test the full mnemonic and passphrase path on a single group
///
/// Each case runs the PBKDF2 rounds twice, so fewer cases are generated.
#[test]
fn prop_mnemonic_round_trip_with_passphrase() {
    QuickCheck::new()
        .tests(10)
        .quickcheck(mnemonic_round_trip_with_passphrase as fn(Secret, u64, u32) -> bool);
}
