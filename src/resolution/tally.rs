//! Vote tallies with uniform tie-breaking among the leaders

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TraitorsError};
use crate::core::random;
use crate::core::types::PlayerId;

/// Vote counts per target, in first-vote order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    counts: Vec<(PlayerId, u32)>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_votes<I: IntoIterator<Item = PlayerId>>(votes: I) -> Self {
        let mut tally = Self::new();
        for target in votes {
            tally.add(target);
        }
        tally
    }

    pub fn add(&mut self, target: PlayerId) {
        match self.counts.iter_mut().find(|(id, _)| *id == target) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((target, 1)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn count(&self, target: PlayerId) -> u32 {
        self.counts
            .iter()
            .find(|(id, _)| *id == target)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Every target sharing the strictly highest count
    pub fn leaders(&self) -> Vec<PlayerId> {
        let max = self.counts.iter().map(|(_, count)| *count).max().unwrap_or(0);
        self.counts
            .iter()
            .filter(|(_, count)| *count == max)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Uniformly random pick among the leaders
    pub fn pick_winner<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PlayerId> {
        random::choose(&self.leaders(), rng)
            .copied()
            .ok_or(TraitorsError::EmptyVotePool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const A: PlayerId = PlayerId(1);
    const B: PlayerId = PlayerId(2);
    const C: PlayerId = PlayerId(3);

    #[test]
    fn test_counts() {
        let tally = Tally::from_votes([A, B, A, C]);
        assert_eq!(tally.count(A), 2);
        assert_eq!(tally.count(B), 1);
        assert_eq!(tally.count(PlayerId(9)), 0);
    }

    #[test]
    fn test_single_leader_always_wins() {
        let tally = Tally::from_votes([C, A, C]);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(tally.pick_winner(&mut rng).unwrap(), C);
        }
    }

    #[test]
    fn test_tie_break_never_picks_trailing_target() {
        let tally = Tally::from_votes([A, B, C, A, B]);
        assert_eq!(tally.leaders(), vec![A, B]);

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut wins = [0u32; 4];
        for _ in 0..1000 {
            let winner = tally.pick_winner(&mut rng).unwrap();
            assert_ne!(winner, C);
            wins[winner.seat()] += 1;
        }
        assert!(wins[1] > 400 && wins[2] > 400, "wins: {:?}", wins);
    }

    #[test]
    fn test_empty_tally_is_empty_vote_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let tally = Tally::new();
        assert!(tally.is_empty());
        assert!(matches!(
            tally.pick_winner(&mut rng),
            Err(TraitorsError::EmptyVotePool)
        ));
    }
}
