use rand::seq::SliceRandom;
use rand::Rng;

/// Candidate ids `a`..`z`, then `c27`, `c28`, ...
pub fn candidate_names(candidates: usize) -> Vec<String> {
    (0..candidates)
        .map(|i| match i {
            0..=25 => ((b'a' + i as u8) as char).to_string(),
            _ => format!("c{}", i + 1),
        })
        .collect()
}

/// `voters` independent uniformly random strict rankings over `candidates` candidates.
pub fn random_profile<R: Rng + ?Sized>(
    voters: usize,
    candidates: usize,
    rng: &mut R,
) -> Vec<Vec<String>> {
    let names = candidate_names(candidates);
    (0..voters)
        .map(|_| {
            let mut ranking = names.clone();
            ranking.shuffle(rng);
            ranking
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    #[test]
    fn names_roll_over_after_z() {
        let names = candidate_names(28);
        assert_eq!(names[0], "a");
        assert_eq!(names[25], "z");
        assert_eq!(names[26], "c27");
        assert_eq!(names[27], "c28");
    }

    #[test]
    fn rankings_are_permutations() {
        let mut rng = SmallRng::seed_from_u64(7);
        let profile = random_profile(10, 4, &mut rng);

        assert_eq!(profile.len(), 10);
        let expected: BTreeSet<String> = candidate_names(4).into_iter().collect();
        for ranking in &profile {
            assert_eq!(ranking.len(), 4);
            assert_eq!(ranking.iter().cloned().collect::<BTreeSet<_>>(), expected);
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = random_profile(5, 5, &mut SmallRng::seed_from_u64(42));
        let b = random_profile(5, 5, &mut SmallRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
