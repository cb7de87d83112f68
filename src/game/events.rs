//! Game history log

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::PlayerRef;
use crate::game::state::Phase;
use crate::roster::player::Role;

/// Something that happened during play
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted { players: usize, traitors: usize },
    NightBegan,
    /// Only meaningful to an omniscient viewer; front ends hide it
    TraitorDeliberating { traitor: PlayerRef },
    NightKill { victim: PlayerRef },
    NoValidTargets,
    DayBegan,
    NightRecap { victim: Option<PlayerRef> },
    VotingBegan,
    VoteCast { voter: PlayerRef, target: PlayerRef, by_human: bool },
    Banished { player: PlayerRef },
    NoVotes,
    GameOver { winner: Role, title: String, message: String },
}

impl GameEvent {
    /// Whether the event leaks hidden roles
    pub fn is_secret(&self) -> bool {
        matches!(self, GameEvent::TraitorDeliberating { .. })
    }
}

/// A history entry stamped with the round and phase it happened in
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub round: u32,
    pub phase: Phase,
    pub event: GameEvent,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.event {
            GameEvent::GameStarted { players, traitors } => {
                write!(f, "A new game begins with {} players and {} traitor(s).", players, traitors)
            }
            GameEvent::NightBegan => write!(f, "--- Night {} begins ---", self.round),
            GameEvent::TraitorDeliberating { traitor } => {
                write!(f, "{} (traitor) is choosing...", traitor.name)
            }
            GameEvent::NightKill { victim } => {
                write!(f, "{} was killed during the night.", victim.name)
            }
            GameEvent::NoValidTargets => write!(f, "No valid targets."),
            GameEvent::DayBegan => write!(f, "--- Day {} begins ---", self.round),
            GameEvent::NightRecap { victim: Some(victim) } => {
                write!(f, "During the night, {} was killed.", victim.name)
            }
            GameEvent::NightRecap { victim: None } => write!(f, "No one was killed last night."),
            GameEvent::VotingBegan => write!(f, "Voting begins."),
            GameEvent::VoteCast { voter, target, by_human: true } => {
                write!(f, "{} votes for {}.", voter.name, target.name)
            }
            GameEvent::VoteCast { voter, .. } => write!(f, "{} votes.", voter.name),
            GameEvent::Banished { player } => write!(f, "{} was banished by vote.", player.name),
            GameEvent::NoVotes => write!(f, "No votes cast. No elimination."),
            GameEvent::GameOver { title, message, .. } => {
                write!(f, "--- Game Over ---\n{} - {}", title, message)
            }
        }
    }
}

/// Ordered game history
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryLog {
    pub entries: Vec<LogEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, round: u32, phase: Phase, event: GameEvent) {
        self.entries.push(LogEntry { round, phase, event });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn entries_for_round(&self, round: u32) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.round == round)
    }
}
