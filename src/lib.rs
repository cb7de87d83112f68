//! Traitors: Solo - single-device hidden-traitor social deduction game
//!
//! One human plays against AI seats. Traitors remove a player each night,
//! everyone votes to banish someone each day, and a suspicion score per
//! player drives the AI decisions.

pub mod ai;
pub mod core;
pub mod game;
pub mod resolution;
pub mod roster;
