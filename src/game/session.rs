//! Async session around a `GameController`
//!
//! The controller runs on its own tokio task. Front ends hold a cloneable
//! `SessionHandle`: commands go in over an `mpsc` channel with a `oneshot`
//! reply, and state snapshots come back out through a `watch` channel.

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::core::error::{Result, TraitorsError};
use crate::core::types::PlayerId;
use crate::game::controller::GameController;
use crate::game::state::GameState;

const COMMAND_BUFFER: usize = 16;

/// One presentation-layer trigger
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    StartGame { players: i64, human_name: String },
    AdvanceReveal,
    StartVote,
    CastVote { target: PlayerId },
    Restart,
    ClearHistory,
}

struct Request {
    command: Command,
    reply: oneshot::Sender<Result<()>>,
}

#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Request>,
    state: watch::Receiver<GameState>,
}

impl SessionHandle {
    /// Send a command and wait for the controller's answer
    pub async fn send(&self, command: Command) -> Result<()> {
        let (reply, answer) = oneshot::channel();
        self.commands
            .send(Request { command, reply })
            .await
            .map_err(|_| TraitorsError::SessionClosed)?;
        answer.await.map_err(|_| TraitorsError::SessionClosed)?
    }

    pub async fn start_game(&self, players: i64, human_name: impl Into<String>) -> Result<()> {
        self.send(Command::StartGame {
            players,
            human_name: human_name.into(),
        })
        .await
    }

    pub async fn advance_reveal(&self) -> Result<()> {
        self.send(Command::AdvanceReveal).await
    }

    pub async fn start_vote(&self) -> Result<()> {
        self.send(Command::StartVote).await
    }

    pub async fn cast_vote(&self, target: PlayerId) -> Result<()> {
        self.send(Command::CastVote { target }).await
    }

    pub async fn restart(&self) -> Result<()> {
        self.send(Command::Restart).await
    }

    pub async fn clear_history(&self) -> Result<()> {
        self.send(Command::ClearHistory).await
    }

    /// Latest published state
    pub fn snapshot(&self) -> GameState {
        self.state.borrow().clone()
    }

    /// Receiver that wakes on every published state
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.state.clone()
    }
}

/// Move the controller onto a task and hand back a handle to drive it
///
/// The task ends once every handle is dropped and returns the controller.
pub fn spawn(mut controller: GameController) -> (SessionHandle, JoinHandle<GameController>) {
    let (publisher, state) = watch::channel(controller.state().clone());
    controller.subscribe(move |snapshot: &GameState| {
        publisher.send_replace(snapshot.clone());
    });

    let (commands, mut inbox) = mpsc::channel::<Request>(COMMAND_BUFFER);
    let task = tokio::spawn(async move {
        while let Some(Request { command, reply }) = inbox.recv().await {
            let result = apply(&mut controller, command);
            if let Err(err) = &result {
                if err.is_recoverable() {
                    debug!(%err, "Command rejected");
                } else {
                    warn!(%err, "Command failed");
                }
            }
            if reply.send(result).is_err() {
                debug!("Caller went away before the reply");
            }
        }
        debug!("Session closed");
        controller
    });

    (SessionHandle { commands, state }, task)
}

fn apply(controller: &mut GameController, command: Command) -> Result<()> {
    match command {
        Command::StartGame {
            players,
            human_name,
        } => controller.start_game(players, &human_name),
        Command::AdvanceReveal => controller.advance_reveal(),
        Command::StartVote => controller.start_vote(),
        Command::CastVote { target } => controller.submit_human_vote(target),
        Command::Restart => {
            controller.restart();
            Ok(())
        }
        Command::ClearHistory => {
            controller.clear_history();
            Ok(())
        }
    }
}
