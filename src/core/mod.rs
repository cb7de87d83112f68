pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::{SessionConfig, Tuning};
pub use error::{Result, TraitorsError};
pub use types::{GameId, PlayerId, PlayerRef};
