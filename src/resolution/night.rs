//! Night kill resolution

use rand::Rng;
use tracing::{debug, info};

use crate::ai;
use crate::core::config::Tuning;
use crate::core::error::{Result, TraitorsError};
use crate::core::types::PlayerId;
use crate::game::events::GameEvent;
use crate::game::state::GameState;
use crate::resolution::suspicion;
use crate::resolution::tally::Tally;

/// Let every living traitor pick a target and carry out the kill
///
/// The victim is drawn uniformly from the most-voted targets. On success the
/// victim is marked dead, recorded as the night kill and suspicion shifts.
/// Returns `NoValidTargets` when no traitor lives or none found a target.
pub fn resolve_night<R: Rng + ?Sized>(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut R,
) -> Result<PlayerId> {
    let traitors: Vec<PlayerId> = state
        .alive_players()
        .filter(|p| p.is_traitor())
        .map(|p| p.id)
        .collect();
    if traitors.is_empty() {
        return Err(TraitorsError::NoValidTargets);
    }

    let mut tally = Tally::new();
    for traitor_id in traitors {
        let Some(traitor) = state.player(traitor_id) else {
            continue;
        };
        let choice = ai::pick_night_target(traitor, &state.players, tuning, rng);
        let traitor_ref = traitor.to_ref();
        debug!(traitor = %traitor_id, target = ?choice, "Traitor chose night target");
        if let Some(target) = choice {
            tally.add(target);
        }
        state.log(GameEvent::TraitorDeliberating { traitor: traitor_ref });
    }

    let victim_id = tally
        .pick_winner(rng)
        .map_err(|_| TraitorsError::NoValidTargets)?;
    let victim = state
        .player_mut(victim_id)
        .ok_or(TraitorsError::NoValidTargets)?;
    victim.alive = false;
    let victim_ref = victim.to_ref();

    state.night_kill = Some(victim_id);
    info!(round = state.round, victim = %victim_ref.name, "Night kill");
    state.log(GameEvent::NightKill { victim: victim_ref });

    suspicion::after_night_kill(&mut state.players, tuning, rng);

    Ok(victim_id)
}
