//! Game tuning and session configuration
//!
//! All heuristic constants are collected in [`Tuning`] with notes on what
//! they drive. [`SessionConfig`] holds the per-run settings a player can
//! change: roster size, display name, seed and log filter.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TraitorsError};

/// Smallest playable roster
pub const MIN_PLAYERS: usize = 4;
/// Largest playable roster
pub const MAX_PLAYERS: usize = 8;

/// Heuristic constants for AI behaviour and suspicion dynamics
///
/// These values reproduce the classic solo game. They are not exposed to
/// config files; tests build custom tunings to make games deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    // === ROSTER ===
    /// Lower clamp bound for the requested player count
    pub min_players: usize,

    /// Upper clamp bound for the requested player count
    pub max_players: usize,

    /// Initial suspicion is drawn uniformly from `[0, initial_suspicion_max)`
    pub initial_suspicion_max: f64,

    // === AI DECISIONS ===
    /// Amplitude of the uniform noise added to each night-target comparison
    ///
    /// A comparison between two candidates is
    /// `(b.suspicion - a.suspicion) + uniform(-noise, noise)`.
    /// At 0.5 the traitors usually pick the most suspected faithful, but
    /// any gap below 0.5 can be overturned. Tunable, not load-bearing.
    pub night_target_noise: f64,

    /// Probability a traitor votes a random faithful to blend in
    pub traitor_blend_in_chance: f64,

    /// Probability a faithful AI votes the single most suspected player
    ///
    /// Otherwise it picks uniformly among the top `faithful_shortlist`.
    pub faithful_top_pick_chance: f64,

    /// Size of the shortlist a faithful AI picks from when hedging
    pub faithful_shortlist: usize,

    // === SUSPICION DYNAMICS ===
    /// Survivors of a night kill gain `uniform[0, night_survivor_bump_max)`
    pub night_survivor_bump_max: f64,

    /// Living traitors lose this much after a successful kill (floored at 0)
    pub traitor_night_decay: f64,

    /// Suspicion added to the target of a human vote
    pub human_vote_weight: f64,

    /// Suspicion added to the target of an AI vote
    pub ai_vote_weight: f64,

    /// After a banishment every living player gains
    /// `uniform[0, banishment_bump_max)`
    pub banishment_bump_max: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            min_players: MIN_PLAYERS,
            max_players: MAX_PLAYERS,
            initial_suspicion_max: 0.2,

            night_target_noise: 0.5,
            traitor_blend_in_chance: 0.2,
            faithful_top_pick_chance: 0.7,
            faithful_shortlist: 3,

            night_survivor_bump_max: 0.08,
            traitor_night_decay: 0.05,
            human_vote_weight: 0.08,
            ai_vote_weight: 0.06,
            banishment_bump_max: 0.02,
        }
    }
}

impl Tuning {
    /// Tuning with every AI coin flip pinned, so decisions follow suspicion
    /// alone. Random suspicion bumps are left in place.
    pub fn deterministic_ai() -> Self {
        Self {
            night_target_noise: 0.0,
            traitor_blend_in_chance: 0.0,
            faithful_top_pick_chance: 1.0,
            ..Self::default()
        }
    }

    /// Validate tuning for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.min_players == 0 || self.min_players > self.max_players {
            return Err(TraitorsError::Config(format!(
                "min_players ({}) must be positive and <= max_players ({})",
                self.min_players, self.max_players
            )));
        }

        for (name, p) in [
            ("traitor_blend_in_chance", self.traitor_blend_in_chance),
            ("faithful_top_pick_chance", self.faithful_top_pick_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(TraitorsError::Config(format!(
                    "{} ({}) must be a probability in [0, 1]",
                    name, p
                )));
            }
        }

        let magnitudes = [
            ("initial_suspicion_max", self.initial_suspicion_max),
            ("night_target_noise", self.night_target_noise),
            ("night_survivor_bump_max", self.night_survivor_bump_max),
            ("traitor_night_decay", self.traitor_night_decay),
            ("human_vote_weight", self.human_vote_weight),
            ("ai_vote_weight", self.ai_vote_weight),
            ("banishment_bump_max", self.banishment_bump_max),
        ];
        if let Some((name, value)) = magnitudes.iter().find(|(_, v)| !(*v >= 0.0)) {
            return Err(TraitorsError::Config(format!(
                "{} ({}) must be non-negative",
                name, value
            )));
        }

        if self.faithful_shortlist == 0 {
            return Err(TraitorsError::Config(
                "faithful_shortlist must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

/// Per-run settings, loadable from a TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Requested roster size (clamped at game start)
    pub players: i64,
    /// Display name of the human seat
    pub human_name: String,
    /// RNG seed; a random one is drawn when absent
    pub seed: Option<u64>,
    /// `tracing_subscriber` env-filter directive
    pub log_filter: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            players: 6,
            human_name: "You".to_string(),
            seed: None,
            log_filter: "traitors_solo=info".to_string(),
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load session settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
