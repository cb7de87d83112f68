//! Traitor night-target selection

use rand::Rng;

use crate::core::config::Tuning;
use crate::core::random;
use crate::core::types::PlayerId;
use crate::roster::player::Player;

/// Noisy-greedy choice of whom `traitor` wants eliminated tonight
///
/// Candidates are living non-traitors other than the actor. The head of a
/// suspicion-descending order is taken, with every comparison perturbed by
/// `uniform(-noise, noise)`: usually the most suspected faithful, now and
/// then a near rival. `None` when nobody qualifies.
pub fn pick_night_target<R: Rng + ?Sized>(
    traitor: &Player,
    players: &[Player],
    tuning: &Tuning,
    rng: &mut R,
) -> Option<PlayerId> {
    let candidates: Vec<&Player> = players
        .iter()
        .filter(|p| p.alive && p.id != traitor.id && !p.is_traitor())
        .collect();

    random::noisy_max_by_key(&candidates, tuning.night_target_noise, rng, |p| p.suspicion)
        .map(|p| p.id)
}
