// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::collections::HashSet;

use proptest::prelude::*;

use crate::assignment::{Assignment, ValidatorAssigner};
use crate::config::{PROPOSER_TAG, VALIDATOR_TAG};
use crate::error::KernelError;
use crate::snapshot::{Snapshot, SnapshotBuilder};
use crate::tests::fixtures::{account, block_id, hasher, id, FakeSnapshot};
use crate::types::Identifier;

const MIN_STAKE: u64 = 10;

/// Ten accounts: indices 0..6 are staked, 6..10 are below the minimum.
fn mixed_snapshot() -> FakeSnapshot {
    let accounts = (0..10u8)
        .map(|i| {
            let stake = if i < 6 { MIN_STAKE + i as u64 } else { MIN_STAKE - 1 };
            account(i, stake, 100, block_id(0))
        })
        .collect();
    FakeSnapshot::new(block_id(0), 0, accounts)
}

fn assigner() -> ValidatorAssigner {
    ValidatorAssigner::new(hasher(), MIN_STAKE)
}

#[test]
fn test_assignment_add_rejects_duplicates() {
    let mut a = Assignment::new();
    a.add(id(1)).unwrap();
    a.add(id(2)).unwrap();
    assert!(matches!(a.add(id(1)), Err(KernelError::InvalidArgument(_))));
    assert_eq!(a.all(), &[id(1), id(2)]);
    assert!(a.has(&id(2)));
    assert!(!a.has(&id(3)));
    assert_eq!(a.iter().count(), 2);
}

#[test]
fn test_five_of_six_staked() {
    let snap = mixed_snapshot();
    let staked: HashSet<Identifier> = (0..6).map(id).collect();

    let a = assigner().assign_validators(&id(200), &snap, 5).unwrap();
    assert_eq!(a.len(), 5);
    let distinct: HashSet<Identifier> = a.iter().copied().collect();
    assert_eq!(distinct.len(), 5, "no duplicates");
    assert!(distinct.is_subset(&staked), "only staked accounts are eligible");
}

#[test]
fn test_same_result_from_built_snapshot() {
    let fake = mixed_snapshot();
    let mut builder = SnapshotBuilder::new(block_id(0), 0);
    for a in fake.all() {
        builder.add_account(a.clone()).unwrap();
    }
    let built = builder.build(hasher()).unwrap();

    let from_fake = assigner().assign_validators(&id(77), &fake, 4).unwrap();
    let from_built = assigner().assign_validators(&id(77), &built, 4).unwrap();
    assert_eq!(from_fake, from_built);
}

#[test]
fn test_exhaustion_fails_before_selection() {
    let snap = mixed_snapshot();
    let err = assigner().assign_validators(&id(1), &snap, 7).unwrap_err();
    assert_eq!(err, KernelError::InsufficientCandidates { requested: 7, available: 6 });
    assert!(assigner().assign_validators(&id(1), &snap, 6).is_ok());
}

#[test]
fn test_zero_count_is_invalid() {
    let err = assigner().assign_validators(&id(1), &mixed_snapshot(), 0).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_first_pick_is_predecessor_of_target() {
    let h = hasher();
    let snap = mixed_snapshot();
    let entity = id(123);

    let mut seed_input = entity.bytes().to_vec();
    seed_input.extend_from_slice(VALIDATOR_TAG.as_bytes());
    let seed = h.digest_bytes(&seed_input);
    let mut target_input = seed.bytes().to_vec();
    target_input.extend_from_slice(&1u64.to_be_bytes());
    let target = h.digest_bytes(&target_input);

    let mut pool: Vec<Identifier> = (0..6).map(id).collect();
    pool.sort();
    let expected = pool
        .iter()
        .rev()
        .find(|c| **c <= target)
        .or_else(|| pool.last())
        .copied()
        .unwrap();

    let a = assigner().assign(&entity, VALIDATOR_TAG, &snap, 1).unwrap();
    assert_eq!(a.all()[0], expected);
}

#[test]
fn test_tag_separates_selections() {
    let snap = mixed_snapshot();
    let select = |n: u8, tag: &str| assigner().assign(&id(n), tag, &snap, 6).unwrap();

    let all_v = select(9, VALIDATOR_TAG);
    let all_p = select(9, PROPOSER_TAG);
    let set_v: HashSet<_> = all_v.iter().collect();
    let set_p: HashSet<_> = all_p.iter().collect();
    assert_eq!(set_v, set_p, "taking the whole pool yields the same members");

    let reordered = (0..8).any(|n| select(n, VALIDATOR_TAG).all() != select(n, PROPOSER_TAG).all());
    assert!(reordered, "the tag changes the selection order");
}

#[test]
fn test_proposer_is_first_proposer_pick() {
    let snap = mixed_snapshot();
    let proposer = assigner().assign_proposer(&block_id(5), &snap).unwrap();
    let a = assigner().assign(&block_id(5), PROPOSER_TAG, &snap, 1).unwrap();
    assert_eq!(a.all(), &[proposer]);
    assert!(snap.get_account(&proposer).unwrap().is_stake_eligible(MIN_STAKE));
}

#[test]
fn test_proposer_needs_an_eligible_account() {
    let snap = FakeSnapshot::new(block_id(0), 0, vec![account(1, 1, 100, block_id(0))]);
    assert!(matches!(
        assigner().assign_proposer(&block_id(1), &snap),
        Err(KernelError::InsufficientCandidates { requested: 1, available: 0 })
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_assignment_is_deterministic(entity in any::<[u8; 32]>(), num in 1usize..=6) {
        let snap = mixed_snapshot();
        let entity = Identifier::new(entity);
        let first = assigner().assign_validators(&entity, &snap, num).unwrap();
        let second = assigner().assign_validators(&entity, &snap, num).unwrap();
        prop_assert_eq!(&first, &second);

        let distinct: HashSet<_> = first.iter().collect();
        prop_assert_eq!(distinct.len(), num);
        for member in first.iter() {
            let acct = snap.get_account(member).unwrap();
            prop_assert!(acct.stake >= MIN_STAKE);
        }
    }

    #[test]
    fn test_prefix_stable_across_counts(entity in any::<[u8; 32]>(), num in 1usize..6) {
        let snap = mixed_snapshot();
        let entity = Identifier::new(entity);
        let shorter = assigner().assign_validators(&entity, &snap, num).unwrap();
        let longer = assigner().assign_validators(&entity, &snap, num + 1).unwrap();
        prop_assert_eq!(shorter.all(), &longer.all()[..num]);
    }
}
