//! Resolution engine: night kills, banishment votes and suspicion dynamics

pub mod banishment;
pub mod night;
pub mod suspicion;
pub mod tally;

pub use banishment::{cast_vote, resolve_banishment};
pub use night::resolve_night;
pub use tally::Tally;
