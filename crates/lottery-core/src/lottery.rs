//! Pairing engine: shuffle a roster and cut it into pairs.
//!
//! The shuffle is a plain Fisher–Yates walk from the last index down to 1,
//! so every permutation of the roster is equally likely. The shuffled list is
//! then cut left to right into pairs; an odd leftover joins the last pair.

use crate::error::{LotteryError, Result};
use crate::model::{PairingGroup, PairingRun, Participant};
use chrono::Utc;
use rand::Rng;

pub const MIN_PARTICIPANTS: usize = 2;

/// Run the lottery with the thread-local RNG.
pub fn run_lottery(members: &[Participant]) -> Result<PairingRun> {
    run_lottery_with(members, &mut rand::thread_rng())
}

/// Run the lottery with a caller-supplied RNG.
pub fn run_lottery_with<R: Rng + ?Sized>(
    members: &[Participant],
    rng: &mut R,
) -> Result<PairingRun> {
    if members.len() < MIN_PARTICIPANTS {
        return Err(LotteryError::InsufficientParticipants {
            found: members.len(),
        });
    }

    let mut shuffled = members.to_vec();
    shuffle(&mut shuffled, rng);

    Ok(PairingRun {
        run_timestamp: Utc::now(),
        groups: partition(shuffled),
    })
}

/// In-place Fisher–Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Cut `members` into consecutive pairs with 1-based group ids.
///
/// A single leftover member is appended to the last pair. With no pair to
/// join it becomes a group of one rather than being dropped.
fn partition(members: Vec<Participant>) -> Vec<PairingGroup> {
    let mut groups: Vec<PairingGroup> = Vec::with_capacity(members.len() / 2 + 1);
    let mut iter = members.into_iter();
    while let Some(first) = iter.next() {
        match iter.next() {
            Some(second) => groups.push(PairingGroup {
                group_id: groups.len() as u32 + 1,
                members: vec![first, second],
            }),
            None => match groups.last_mut() {
                Some(last) => last.members.push(first),
                None => groups.push(PairingGroup {
                    group_id: 1,
                    members: vec![first],
                }),
            },
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn roster(n: usize) -> Vec<Participant> {
        (1..=n)
            .map(|i| {
                Participant::new(
                    &format!("P{i}"),
                    &format!("p{i}@example.com"),
                    &format!("@p{i}"),
                    Utc::now(),
                )
                .unwrap()
            })
            .collect()
    }

    fn assert_well_formed(n: usize, run: &PairingRun) {
        assert_eq!(run.participant_count(), n);

        let names: HashSet<&str> = run
            .groups
            .iter()
            .flat_map(|g| g.members.iter().map(|m| m.name.as_str()))
            .collect();
        assert_eq!(names.len(), n, "every participant appears exactly once");

        let triples = run.groups.iter().filter(|g| g.len() == 3).count();
        assert!(run.groups.iter().all(|g| g.len() == 2 || g.len() == 3));
        assert_eq!(triples, n % 2);

        for (i, g) in run.groups.iter().enumerate() {
            assert_eq!(g.group_id as usize, i + 1);
        }
    }

    #[test]
    fn rejects_empty_and_single_rosters() {
        for n in 0..2 {
            let members = roster(n);
            let err = run_lottery(&members).unwrap_err();
            assert!(matches!(
                err,
                LotteryError::InsufficientParticipants { found } if found == n
            ));
            assert_eq!(members.len(), n);
        }
    }

    #[test]
    fn groups_cover_every_participant_for_many_sizes() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 2..=25 {
            let run = run_lottery_with(&roster(n), &mut rng).unwrap();
            assert_well_formed(n, &run);
        }
    }

    #[test]
    fn five_participants_make_a_pair_and_a_triple() {
        let run = run_lottery(&roster(5)).unwrap();
        assert_eq!(run.groups.len(), 2);
        let mut sizes: Vec<usize> = run.groups.iter().map(PairingGroup::len).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![2, 3]);
    }

    #[test]
    fn odd_leftover_joins_last_pair() {
        let groups = partition(roster(3));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[0].members[2].name, "P3");
    }

    #[test]
    fn lone_member_is_kept() {
        let groups = partition(roster(1));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members[0].name, "P1");
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let members = roster(10);
        let a = run_lottery_with(&members, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = run_lottery_with(&members, &mut StdRng::seed_from_u64(42)).unwrap();
        let names = |run: &PairingRun| -> Vec<String> {
            run.groups
                .iter()
                .flat_map(|g| g.members.iter().map(|m| m.name.clone()))
                .collect()
        };
        assert_eq!(names(&a), names(&b));
    }

    #[test]
    fn shuffle_reaches_every_permutation_of_three() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = HashSet::new();
        for _ in 0..600 {
            let mut items = [1, 2, 3];
            shuffle(&mut items, &mut rng);
            seen.insert(items);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn shuffle_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut first_position = [0u32; 4];
        let trials = 8000;
        for _ in 0..trials {
            let mut items = [0usize, 1, 2, 3];
            shuffle(&mut items, &mut rng);
            first_position[items[0]] += 1;
        }
        // Expected 2000 each; allow a generous band.
        for count in first_position {
            assert!((1700..=2300).contains(&count), "skewed count {count}");
        }
    }
}
