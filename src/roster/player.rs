//! Player record and faction role

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, PlayerRef};

/// Secret faction role, fixed at setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Faithful,
    Traitor,
}

impl Role {
    pub fn is_traitor(self) -> bool {
        self == Role::Traitor
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Faithful => write!(f, "faithful"),
            Role::Traitor => write!(f, "traitor"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_human: bool,
    pub role: Role,
    pub alive: bool,
    /// Heuristic score steering AI targeting; never negative
    pub suspicion: f64,
    /// Vote cast in the current vote phase
    pub last_vote: Option<PlayerId>,
}

impl Player {
    pub fn new(id: PlayerId, name: String, is_human: bool) -> Self {
        Self {
            id,
            name,
            is_human,
            role: Role::Faithful,
            alive: true,
            suspicion: 0.0,
            last_vote: None,
        }
    }

    pub fn is_traitor(&self) -> bool {
        self.role.is_traitor()
    }

    pub fn to_ref(&self) -> PlayerRef {
        PlayerRef {
            id: self.id,
            name: self.name.clone(),
        }
    }

    /// Add to suspicion, keeping the score non-negative
    pub fn adjust_suspicion(&mut self, delta: f64) {
        self.suspicion = (self.suspicion + delta).max(0.0);
    }
}

/// Look up a player by id
pub fn find(players: &[Player], id: PlayerId) -> Option<&Player> {
    players.iter().find(|p| p.id == id)
}

pub fn find_mut(players: &mut [Player], id: PlayerId) -> Option<&mut Player> {
    players.iter_mut().find(|p| p.id == id)
}

pub fn alive(players: &[Player]) -> impl Iterator<Item = &Player> {
    players.iter().filter(|p| p.alive)
}
