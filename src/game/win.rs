//! Win evaluation by faction headcount

use serde::{Deserialize, Serialize};

use crate::roster::player::{self, Player, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinCheck {
    Continue,
    Won(Role),
}

/// Faithful win when no traitor lives; traitors win on parity or better
pub fn evaluate(players: &[Player]) -> WinCheck {
    let (traitors, faithful) = player::alive(players).fold((0usize, 0usize), |(t, f), p| {
        if p.is_traitor() {
            (t + 1, f)
        } else {
            (t, f + 1)
        }
    });

    if traitors == 0 {
        WinCheck::Won(Role::Faithful)
    } else if traitors >= faithful {
        WinCheck::Won(Role::Traitor)
    } else {
        WinCheck::Continue
    }
}
