//! Game flow: state record, history, win check and the phase controller

pub mod controller;
pub mod events;
pub mod observer;
pub mod session;
pub mod state;
pub mod win;

pub use controller::GameController;
pub use events::{GameEvent, HistoryLog, LogEntry};
pub use observer::StateObserver;
pub use session::{Command, SessionHandle};
pub use state::{Ballot, GameOutcome, GameState, HumanVoteRequest, Phase, RevealCard};
pub use win::WinCheck;
