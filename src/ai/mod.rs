//! AI decision heuristics
//!
//! Pure functions of (actor, roster, tuning, rng). They never mutate the
//! roster; the resolution engine applies suspicion bumps and records votes
//! right after a decision comes back.

pub mod night_target;
pub mod vote;

pub use night_target::pick_night_target;
pub use vote::pick_vote;
