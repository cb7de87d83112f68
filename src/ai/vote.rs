//! Day vote selection for AI players

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use rand::Rng;

use crate::core::config::Tuning;
use crate::core::random;
use crate::core::types::PlayerId;
use crate::roster::player::Player;

/// Choose whom `voter` votes to banish
///
/// Traitors protect each other: they vote the most suspected faithful, but
/// blend in with a random faithful some of the time, and only turn on a
/// fellow traitor when no faithful is left. Faithful voters follow the
/// suspicion ranking, hedging among the top of it now and then.
pub fn pick_vote<R: Rng + ?Sized>(
    voter: &Player,
    players: &[Player],
    tuning: &Tuning,
    rng: &mut R,
) -> Option<PlayerId> {
    let others: Vec<&Player> = players
        .iter()
        .filter(|p| p.alive && p.id != voter.id)
        .collect();

    if voter.is_traitor() {
        traitor_vote(&others, tuning, rng)
    } else {
        faithful_vote(others, tuning, rng)
    }
}

fn traitor_vote<R: Rng + ?Sized>(others: &[&Player], tuning: &Tuning, rng: &mut R) -> Option<PlayerId> {
    let non_traitors: Vec<&Player> = others.iter().copied().filter(|p| !p.is_traitor()).collect();

    if non_traitors.is_empty() {
        return random::choose(others, rng).map(|p| p.id);
    }

    if random::chance(tuning.traitor_blend_in_chance, rng) {
        return random::choose(&non_traitors, rng).map(|p| p.id);
    }

    // First maximum in seat order wins ties
    non_traitors
        .iter()
        .min_by_key(|p| Reverse(OrderedFloat(p.suspicion)))
        .map(|p| p.id)
}

fn faithful_vote<R: Rng + ?Sized>(mut others: Vec<&Player>, tuning: &Tuning, rng: &mut R) -> Option<PlayerId> {
    // Stable: equal suspicion keeps seat order
    others.sort_by_key(|p| Reverse(OrderedFloat(p.suspicion)));

    if random::chance(tuning.faithful_top_pick_chance, rng) {
        return others.first().map(|p| p.id);
    }

    let shortlist = &others[..others.len().min(tuning.faithful_shortlist)];
    random::choose(shortlist, rng).map(|p| p.id)
}
