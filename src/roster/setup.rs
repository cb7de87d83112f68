//! Roster construction and role assignment

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::core::config::Tuning;
use crate::core::error::{Result, TraitorsError};
use crate::core::random;
use crate::core::types::PlayerId;
use crate::roster::player::{Player, Role};

/// Seat-indexed AI names; seat `i` takes entry `i`
pub const NAME_POOL: [&str; 8] = [
    "Alex", "Sam", "Riley", "Jordan", "Taylor", "Casey", "Morgan", "Jamie",
];

/// Display name used when the human leaves theirs blank
pub const DEFAULT_HUMAN_NAME: &str = "You";

/// Number of traitors for a roster of `players`
///
/// The `> 8` arm is unreachable under the default clamp but kept so the
/// table stays total if the bounds ever grow.
pub fn traitor_count(players: usize) -> usize {
    match players {
        0..=5 => 1,
        6..=8 => 2,
        _ => 3,
    }
}

/// Validate a requested roster size against the tuning bounds
pub fn validate_player_count(requested: i64, tuning: &Tuning) -> Result<usize> {
    let in_range = usize::try_from(requested)
        .ok()
        .filter(|n| (tuning.min_players..=tuning.max_players).contains(n));
    in_range.ok_or(TraitorsError::InvalidPlayerCount {
        requested,
        min: tuning.min_players,
        max: tuning.max_players,
    })
}

/// Clamp a requested roster size into range, logging when it had to move
pub fn clamp_player_count(requested: i64, tuning: &Tuning) -> usize {
    match validate_player_count(requested, tuning) {
        Ok(n) => n,
        Err(err) => {
            let clamped = requested.clamp(tuning.min_players as i64, tuning.max_players as i64) as usize;
            warn!(%err, clamped, "Clamping player count");
            clamped
        }
    }
}

fn ai_name(seat: usize) -> String {
    NAME_POOL
        .get(seat)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("NPC{}", seat))
}

/// Build a fresh roster: seat 0 human, traitors by uniform permutation
pub fn build_roster<R: Rng + ?Sized>(
    requested: i64,
    human_name: &str,
    tuning: &Tuning,
    rng: &mut R,
) -> Vec<Player> {
    let count = clamp_player_count(requested, tuning);
    let human_name = match human_name.trim() {
        "" => DEFAULT_HUMAN_NAME.to_string(),
        name => name.to_string(),
    };

    let mut players: Vec<Player> = (0..count)
        .map(|seat| {
            let is_human = seat == 0;
            let name = if is_human { human_name.clone() } else { ai_name(seat) };
            Player::new(PlayerId(seat as u32), name, is_human)
        })
        .collect();

    let mut seats: Vec<usize> = (0..count).collect();
    seats.shuffle(rng);
    for &seat in seats.iter().take(traitor_count(count)) {
        players[seat].role = Role::Traitor;
    }

    for player in &mut players {
        player.suspicion = random::unit_scaled(tuning.initial_suspicion_max, rng);
    }

    debug!(
        players = count,
        traitors = traitor_count(count),
        "Roster built"
    );

    players
}
