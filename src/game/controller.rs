//! Phase state machine
//!
//! `GameController` owns the `GameState`, the tuning, the seeded RNG and the
//! observers. Every public method is one presentation-layer trigger; it either
//! runs to the next point that needs outside input or is rejected before
//! touching the state.
//!
//! ```text
//! lobby -> reveal -> night -> day -> vote -> night ...
//!                      \                 \
//!                       `-> ended         `-> ended
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::ai;
use crate::core::config::Tuning;
use crate::core::error::{Result, TraitorsError};
use crate::core::types::{GameId, PlayerId};
use crate::game::events::GameEvent;
use crate::game::observer::StateObserver;
use crate::game::state::{Ballot, GameOutcome, GameState, Phase};
use crate::game::win::{self, WinCheck};
use crate::resolution::{self, banishment};
use crate::roster::{self, setup, Player, Role};

pub struct GameController {
    state: GameState,
    tuning: Tuning,
    rng: ChaCha8Rng,
    observers: Vec<Box<dyn StateObserver + Send>>,
}

impl GameController {
    pub fn new(tuning: Tuning, mut rng: ChaCha8Rng) -> Result<Self> {
        tuning.validate()?;
        Ok(Self {
            state: GameState::lobby(GameId::generate(&mut rng)),
            tuning,
            rng,
            observers: Vec::new(),
        })
    }

    /// Default tuning with a deterministic RNG
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self {
            state: GameState::lobby(GameId::generate(&mut rng)),
            tuning: Tuning::default(),
            rng,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: StateObserver + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    // === PRESENTATION TRIGGERS ===

    /// Build a roster for `requested` players and begin the reveal
    ///
    /// Out-of-range counts are clamped into the tuning bounds.
    pub fn start_game(&mut self, requested: i64, human_name: &str) -> Result<()> {
        self.expect_phase(Phase::Lobby, "start a game")?;
        let players = roster::build_roster(requested, human_name, &self.tuning, &mut self.rng);
        self.begin(players);
        Ok(())
    }

    /// Begin the reveal with a prepared roster
    ///
    /// The roster is checked before anything changes; a malformed one leaves
    /// the lobby untouched.
    pub fn load_roster(&mut self, players: Vec<Player>) -> Result<()> {
        self.expect_phase(Phase::Lobby, "load a roster")?;
        validate_roster(&players, &self.tuning)?;
        self.begin(players);
        Ok(())
    }

    /// Show the next reveal card; past the last seat the first night falls
    pub fn advance_reveal(&mut self) -> Result<()> {
        self.expect_phase(Phase::Reveal, "advance the reveal")?;
        self.state.reveal_index += 1;
        self.notify();

        if self.state.reveal_index >= self.state.players.len() {
            self.enter_night()?;
        }
        Ok(())
    }

    /// Close the discussion and run the vote up to the human's turn
    pub fn start_vote(&mut self) -> Result<()> {
        self.expect_phase(Phase::Day, "start the vote")?;
        self.set_phase(Phase::Vote);
        self.state.log(GameEvent::VotingBegan);

        debug_assert!(self.state.votes_cleared(), "stale votes at vote start");
        self.state.clear_votes();

        let voters: Vec<PlayerId> = self.state.alive_players().map(|p| p.id).collect();
        self.state.ballot = Some(Ballot::new(voters));
        self.notify();

        self.run_ballot()
    }

    /// Resume the vote with the human's choice
    ///
    /// Non-candidates are rejected with `InvalidChoice` and the ballot stays
    /// parked on the human.
    pub fn submit_human_vote(&mut self, target: PlayerId) -> Result<()> {
        let request = self
            .state
            .pending_human_vote()
            .ok_or(TraitorsError::InvalidTransition {
                action: "cast a vote",
                phase: self.state.phase,
            })?;

        if !request.allows(target) {
            let reason = match self.state.player(target) {
                None => "not a player in this game",
                Some(p) if p.id == request.voter.id => "you cannot vote for yourself",
                Some(p) if !p.alive => "already eliminated",
                Some(_) => "not a candidate",
            };
            debug!(%target, reason, "Rejected human vote");
            return Err(TraitorsError::InvalidChoice {
                target,
                reason: reason.to_string(),
            });
        }

        banishment::cast_vote(&mut self.state, request.voter.id, target, &self.tuning)?;
        if let Some(ballot) = self.state.ballot.as_mut() {
            ballot.advance();
        }
        self.notify();

        self.run_ballot()
    }

    /// Discard the current game and return to the lobby
    pub fn restart(&mut self) {
        self.state = GameState::lobby(GameId::generate(&mut self.rng));
        info!("Game reset to lobby");
        self.notify();
    }

    pub fn clear_history(&mut self) {
        self.state.history.clear();
        self.notify();
    }

    // === PHASES ===

    fn begin(&mut self, players: Vec<Player>) {
        let traitors = players.iter().filter(|p| p.is_traitor()).count();
        let count = players.len();

        self.state = GameState::with_players(GameId::generate(&mut self.rng), players);
        self.state.phase = Phase::Reveal;
        self.state.log(GameEvent::GameStarted {
            players: count,
            traitors,
        });
        info!(game = ?self.state.id, players = count, traitors, "Game started");
        self.notify();
    }

    fn enter_night(&mut self) -> Result<()> {
        self.state.round += 1;
        self.state.night_kill = None;
        self.set_phase(Phase::Night);
        self.state.log(GameEvent::NightBegan);
        self.notify();

        if self.state.alive_traitors() == 0 {
            self.check_win();
            return Ok(());
        }

        match resolution::resolve_night(&mut self.state, &self.tuning, &mut self.rng) {
            Ok(_) => {
                self.notify();
                if self.check_win() {
                    return Ok(());
                }
            }
            Err(TraitorsError::NoValidTargets) => {
                debug!(round = self.state.round, "Night passed without a kill");
                self.state.log(GameEvent::NoValidTargets);
                self.notify();
            }
            Err(err) => return Err(err),
        }

        self.enter_day();
        Ok(())
    }

    fn enter_day(&mut self) {
        self.set_phase(Phase::Day);
        self.state.log(GameEvent::DayBegan);
        let victim = self.state.night_kill_player().map(Player::to_ref);
        self.state.log(GameEvent::NightRecap { victim });
        self.notify();
    }

    /// Walk the ballot until it needs the human or runs out of voters
    fn run_ballot(&mut self) -> Result<()> {
        loop {
            let Some(voter_id) = self.state.ballot.as_ref().and_then(Ballot::current_voter) else {
                return self.finish_vote();
            };

            let Some(voter) = self.state.player(voter_id).filter(|p| p.alive) else {
                self.advance_ballot();
                continue;
            };

            if voter.is_human {
                if self.state.pending_human_vote().is_some() {
                    debug!(voter = %voter_id, "Waiting for human vote");
                    return Ok(());
                }
                self.advance_ballot();
                continue;
            }

            let choice = ai::pick_vote(voter, &self.state.players, &self.tuning, &mut self.rng);
            match choice {
                Some(target) => {
                    banishment::cast_vote(&mut self.state, voter_id, target, &self.tuning)?
                }
                None => debug!(voter = %voter_id, "No one left to vote for"),
            }
            self.advance_ballot();
            self.notify();
        }
    }

    fn advance_ballot(&mut self) {
        if let Some(ballot) = self.state.ballot.as_mut() {
            ballot.advance();
        }
    }

    fn finish_vote(&mut self) -> Result<()> {
        match banishment::resolve_banishment(&mut self.state, &self.tuning, &mut self.rng) {
            Ok(_) => {}
            Err(TraitorsError::EmptyVotePool) => self.state.log(GameEvent::NoVotes),
            Err(err) => return Err(err),
        }

        self.state.clear_votes();
        self.state.ballot = None;
        self.notify();

        if self.check_win() {
            return Ok(());
        }
        self.enter_night()
    }

    /// Consult the win evaluator; ends the game on a terminal result
    fn check_win(&mut self) -> bool {
        match win::evaluate(&self.state.players) {
            WinCheck::Continue => false,
            WinCheck::Won(winner) => {
                self.end_game(winner);
                true
            }
        }
    }

    fn end_game(&mut self, winner: Role) {
        let outcome = GameOutcome::for_winner(winner);
        self.state.ballot = None;
        self.set_phase(Phase::Ended);
        self.state.log(GameEvent::GameOver {
            winner,
            title: outcome.title.clone(),
            message: outcome.message.clone(),
        });
        info!(%winner, round = self.state.round, "Game over");
        self.state.outcome = Some(outcome);
        self.notify();
    }

    // === HELPERS ===

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<()> {
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(TraitorsError::InvalidTransition {
                action,
                phase: self.state.phase,
            })
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        debug!(from = %self.state.phase, to = %phase, "Phase change");
        self.state.phase = phase;
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer.on_state_changed(&self.state);
        }
    }
}

/// Reject rosters the state machine cannot run
fn validate_roster(players: &[Player], tuning: &Tuning) -> Result<()> {
    setup::validate_player_count(players.len() as i64, tuning)?;

    if let Some((seat, p)) = players
        .iter()
        .enumerate()
        .find(|(seat, p)| p.id != PlayerId(*seat as u32))
    {
        return Err(TraitorsError::InvalidRoster(format!(
            "seat {} holds {}, expected {}",
            seat,
            p.id,
            PlayerId(seat as u32)
        )));
    }

    if !players.first().is_some_and(|p| p.is_human) {
        return Err(TraitorsError::InvalidRoster("seat 0 must be the human".into()));
    }
    let humans = players.iter().filter(|p| p.is_human).count();
    if humans != 1 {
        return Err(TraitorsError::InvalidRoster(format!(
            "expected exactly one human, found {}",
            humans
        )));
    }

    if let Some(p) = players.iter().find(|p| !p.alive || p.last_vote.is_some()) {
        return Err(TraitorsError::InvalidRoster(format!(
            "{} must start alive with no vote",
            p.id
        )));
    }

    if let Some(p) = players.iter().find(|p| !(p.suspicion >= 0.0)) {
        return Err(TraitorsError::InvalidRoster(format!(
            "{} has negative suspicion",
            p.id
        )));
    }

    Ok(())
}
