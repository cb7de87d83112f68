//! Day vote casting and banishment

use rand::Rng;
use tracing::{debug, info};

use crate::core::config::Tuning;
use crate::core::error::{Result, TraitorsError};
use crate::core::types::PlayerId;
use crate::game::events::GameEvent;
use crate::game::state::GameState;
use crate::resolution::suspicion;
use crate::resolution::tally::Tally;

/// Record `voter`'s vote against `target` and raise the target's suspicion
///
/// Both must be living players and distinct; anything else is rejected with
/// `InvalidChoice` before the state changes.
pub fn cast_vote(
    state: &mut GameState,
    voter_id: PlayerId,
    target_id: PlayerId,
    tuning: &Tuning,
) -> Result<()> {
    let invalid = |reason: &str| TraitorsError::InvalidChoice {
        target: target_id,
        reason: reason.to_string(),
    };

    let voter = state.player(voter_id).ok_or_else(|| invalid("unknown voter"))?;
    if !voter.alive {
        return Err(invalid("eliminated players cannot vote"));
    }
    if voter_id == target_id {
        return Err(invalid("cannot vote for yourself"));
    }
    let by_human = voter.is_human;
    let voter_ref = voter.to_ref();

    let target = state
        .player_mut(target_id)
        .ok_or_else(|| invalid("not a player in this game"))?;
    if !target.alive {
        return Err(invalid("already eliminated"));
    }
    suspicion::after_vote(target, by_human, tuning);
    let target_ref = target.to_ref();

    if let Some(voter) = state.player_mut(voter_id) {
        voter.last_vote = Some(target_id);
    }
    debug!(voter = %voter_id, target = %target_id, by_human, "Vote cast");
    state.log(GameEvent::VoteCast {
        voter: voter_ref,
        target: target_ref,
        by_human,
    });
    Ok(())
}

/// Tally the living players' votes and banish the leader
///
/// Ties are broken uniformly at random. Returns `EmptyVotePool` when
/// nobody voted and `InvalidChoice` when the leader is not on the roster. Does not clear votes; the vote phase does that itself.
pub fn resolve_banishment<R: Rng + ?Sized>(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut R,
) -> Result<PlayerId> {
    let tally = Tally::from_votes(state.alive_players().filter_map(|p| p.last_vote));
    let banished_id = tally.pick_winner(rng)?;

    let banished = state
        .player_mut(banished_id)
        .ok_or_else(|| TraitorsError::InvalidChoice {
            target: banished_id,
            reason: "not a player in this game".to_string(),
        })?;
    banished.alive = false;
    let banished_ref = banished.to_ref();

    info!(
        round = state.round,
        player = %banished_ref.name,
        votes = tally.count(banished_id),
        "Banished by vote"
    );
    state.log(GameEvent::Banished {
        player: banished_ref,
    });

    suspicion::after_banishment(&mut state.players, tuning, rng);

    Ok(banished_id)
}
