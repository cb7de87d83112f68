//! State change notifications for the presentation layer

use crate::game::state::GameState;

/// Receives a snapshot after every mutation of the game state
pub trait StateObserver {
    fn on_state_changed(&mut self, state: &GameState);
}

impl<F> StateObserver for F
where
    F: FnMut(&GameState),
{
    fn on_state_changed(&mut self, state: &GameState) {
        self(state)
    }
}
