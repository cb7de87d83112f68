//! Suspicion adjustment rules
//!
//! These are the only places suspicion changes after setup. Every rule
//! keeps scores non-negative.

use rand::Rng;

use crate::core::config::Tuning;
use crate::core::random;
use crate::roster::player::Player;

/// After a night kill: survivors grow uneasy, living traitors cool off
pub fn after_night_kill<R: Rng + ?Sized>(players: &mut [Player], tuning: &Tuning, rng: &mut R) {
    for player in players.iter_mut().filter(|p| p.alive) {
        player.adjust_suspicion(random::unit_scaled(tuning.night_survivor_bump_max, rng));
    }
    for traitor in players.iter_mut().filter(|p| p.alive && p.is_traitor()) {
        traitor.adjust_suspicion(-tuning.traitor_night_decay);
    }
}

/// A vote lands on `target`
pub fn after_vote(target: &mut Player, by_human: bool, tuning: &Tuning) {
    let weight = if by_human {
        tuning.human_vote_weight
    } else {
        tuning.ai_vote_weight
    };
    target.adjust_suspicion(weight);
}

/// After a banishment every living player is nudged a little
pub fn after_banishment<R: Rng + ?Sized>(players: &mut [Player], tuning: &Tuning, rng: &mut R) {
    for player in players.iter_mut().filter(|p| p.alive) {
        player.adjust_suspicion(random::unit_scaled(tuning.banishment_bump_max, rng));
    }
}
