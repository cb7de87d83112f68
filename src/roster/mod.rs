//! Player records and roster construction

pub mod player;
pub mod setup;

pub use player::{Player, Role};
pub use setup::{
    build_roster, clamp_player_count, traitor_count, validate_player_count, DEFAULT_HUMAN_NAME,
    NAME_POOL,
};
