//! GameState - the single mutable game record

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::{GameId, PlayerId, PlayerRef};
use crate::game::events::{GameEvent, HistoryLog};
use crate::roster::player::{self, Player, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Lobby,
    Reveal,
    Night,
    Day,
    Vote,
    Ended,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Lobby => "lobby",
            Phase::Reveal => "reveal",
            Phase::Night => "night",
            Phase::Day => "day",
            Phase::Vote => "vote",
            Phase::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// Sequential vote in progress
///
/// The voter list is fixed in seat order when voting opens; `next` is the
/// resume point across the human's turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub voters: Vec<PlayerId>,
    pub next: usize,
}

impl Ballot {
    pub fn new(voters: Vec<PlayerId>) -> Self {
        Self { voters, next: 0 }
    }

    pub fn current_voter(&self) -> Option<PlayerId> {
        self.voters.get(self.next).copied()
    }

    pub fn advance(&mut self) {
        self.next += 1;
    }
}

/// What the presentation layer must ask the human for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanVoteRequest {
    pub voter: PlayerRef,
    pub candidates: Vec<PlayerRef>,
}

impl HumanVoteRequest {
    pub fn allows(&self, target: PlayerId) -> bool {
        self.candidates.iter().any(|c| c.id == target)
    }
}

/// One step of the private role reveal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealCard {
    /// The human sees their own role
    Own { name: String, role: Role },
    /// Pacing placeholder for an AI seat
    PassDevice { name: String },
}

/// Final result shown on the end card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: Role,
    pub title: String,
    pub message: String,
}

impl GameOutcome {
    pub fn for_winner(winner: Role) -> Self {
        let (title, message) = match winner {
            Role::Faithful => (
                "Faithfuls win",
                "All traitors have been eliminated. You win!",
            ),
            Role::Traitor => (
                "Traitors win",
                "The traitors are now equal or greater. Traitors win.",
            ),
        };
        Self {
            winner,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub id: GameId,
    pub players: Vec<Player>,
    pub round: u32,
    pub phase: Phase,
    pub reveal_index: usize,
    pub night_kill: Option<PlayerId>,
    pub history: HistoryLog,
    pub ballot: Option<Ballot>,
    pub outcome: Option<GameOutcome>,
}

impl GameState {
    /// Empty state waiting for setup
    pub fn lobby(id: GameId) -> Self {
        Self::with_players(id, Vec::new())
    }

    /// Fresh game instance for a prepared roster, still in the lobby
    pub fn with_players(id: GameId, players: Vec<Player>) -> Self {
        Self {
            id,
            players,
            round: 0,
            phase: Phase::Lobby,
            reveal_index: 0,
            night_kill: None,
            history: HistoryLog::new(),
            ballot: None,
            outcome: None,
        }
    }

    pub fn log(&mut self, event: GameEvent) {
        self.history.push(self.round, self.phase, event);
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        player::find(&self.players, id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        player::find_mut(&mut self.players, id)
    }

    pub fn human(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_human)
    }

    pub fn alive_players(&self) -> impl Iterator<Item = &Player> {
        player::alive(&self.players)
    }

    pub fn alive_count(&self) -> usize {
        self.alive_players().count()
    }

    pub fn alive_traitors(&self) -> usize {
        self.alive_players().filter(|p| p.is_traitor()).count()
    }

    pub fn alive_faithful(&self) -> usize {
        self.alive_players().filter(|p| !p.is_traitor()).count()
    }

    pub fn night_kill_player(&self) -> Option<&Player> {
        self.night_kill.and_then(|id| self.player(id))
    }

    /// Current card of the reveal walk, `None` once it is finished
    pub fn reveal_card(&self) -> Option<RevealCard> {
        if self.phase != Phase::Reveal {
            return None;
        }
        self.players.get(self.reveal_index).map(|p| {
            if p.is_human {
                RevealCard::Own {
                    name: p.name.clone(),
                    role: p.role,
                }
            } else {
                RevealCard::PassDevice {
                    name: p.name.clone(),
                }
            }
        })
    }

    /// The pending human decision, if the ballot is parked on the human
    pub fn pending_human_vote(&self) -> Option<HumanVoteRequest> {
        if self.phase != Phase::Vote {
            return None;
        }
        let voter = self
            .ballot
            .as_ref()
            .and_then(Ballot::current_voter)
            .and_then(|id| self.player(id))
            .filter(|p| p.is_human && p.alive)?;

        let candidates: Vec<PlayerRef> = self
            .alive_players()
            .filter(|p| p.id != voter.id)
            .map(Player::to_ref)
            .collect();
        if candidates.is_empty() {
            return None;
        }

        Some(HumanVoteRequest {
            voter: voter.to_ref(),
            candidates,
        })
    }

    pub fn clear_votes(&mut self) {
        for player in &mut self.players {
            player.last_vote = None;
        }
    }

    pub fn votes_cleared(&self) -> bool {
        self.players.iter().all(|p| p.last_vote.is_none())
    }
}
