//! Mancala - a Kalah rules engine
//!
//! This crate provides the core game logic, including:
//! - Pits and the two players
//! - Board representation with sowing, capture and end-of-game collapse
//! - Party state machine with turn enforcement
//! - Computer opponents
//!
//! # Architecture
//!
//! Every type here is a plain value: a move takes a `Board` or `Party` by
//! reference and returns a new one. Nothing in this crate performs I/O, so
//! storing snapshots and serving them is left to the caller.
//!
//! # Modules
//!
//! - [`pit`]: Players, pit kinds and the pit value
//! - [`board`]: Board layout validation and the move transition
//! - [`party`]: Turn order and party lifecycle
//! - [`bot`]: AI players

pub mod board;
pub mod bot;
pub mod party;
pub mod pit;

// Re-export commonly used types
pub use board::{Board, BoardError};
pub use bot::{Bot, BotDifficulty};
pub use party::{
    Outcome, Party, PartyError, PartyRules, PartySettings, PartyStatus,
    DEFAULT_HOUSES_PER_PLAYER, DEFAULT_STONES_PER_HOUSE,
};
pub use pit::{Pit, PitType, Player};
