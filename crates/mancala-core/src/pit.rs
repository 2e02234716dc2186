//! Players, pit kinds and the pit value type.
//!
//! This module contains:
//! - `Player`, the two seats at the table
//! - `PitType`, distinguishing sowable houses from scoring stores
//! - `Pit`, an immutable (owner, kind, stones) value

use serde::{Deserialize, Serialize};

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Player {
    PlayerOne,
    PlayerTwo,
}

impl Player {
    /// Both players, in seating order
    pub const ALL: [Player; 2] = [Player::PlayerOne, Player::PlayerTwo];

    /// The other player
    pub fn opponent(&self) -> Player {
        match self {
            Player::PlayerOne => Player::PlayerTwo,
            Player::PlayerTwo => Player::PlayerOne,
        }
    }

    /// Seat index (0 or 1), for per-player tallies
    pub fn index(&self) -> usize {
        match self {
            Player::PlayerOne => 0,
            Player::PlayerTwo => 1,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::PlayerOne => write!(f, "Player 1"),
            Player::PlayerTwo => write!(f, "Player 2"),
        }
    }
}

/// Kind of pit on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PitType {
    /// Playable pit; a move starts from one of the mover's houses
    House,
    /// Scoring pit; never starts a move, skipped by the opponent's sowing
    Store,
}

/// A single pit. Every change produces a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pit {
    owner: Player,
    kind: PitType,
    stones: u32,
}

impl Pit {
    pub fn new(owner: Player, kind: PitType, stones: u32) -> Self {
        Self {
            owner,
            kind,
            stones,
        }
    }

    /// Create a house pit
    pub fn house(owner: Player, stones: u32) -> Self {
        Self::new(owner, PitType::House, stones)
    }

    /// Create a store pit
    pub fn store(owner: Player, stones: u32) -> Self {
        Self::new(owner, PitType::Store, stones)
    }

    pub fn owner(&self) -> Player {
        self.owner
    }

    pub fn kind(&self) -> PitType {
        self.kind
    }

    pub fn stones(&self) -> u32 {
        self.stones
    }

    pub fn is_house(&self) -> bool {
        matches!(self.kind, PitType::House)
    }

    pub fn is_store(&self) -> bool {
        matches!(self.kind, PitType::Store)
    }

    pub fn is_empty(&self) -> bool {
        self.stones == 0
    }

    /// Same pit with a different stone count
    pub fn with_stones(&self, stones: u32) -> Self {
        Self { stones, ..*self }
    }

    /// Same pit holding `amount` more stones
    pub fn add_stones(&self, amount: u32) -> Self {
        self.with_stones(self.stones + amount)
    }

    /// Whether `player`'s sowing deposits into this pit.
    ///
    /// Every pit accepts stones except the opponent's store.
    pub fn accepts_sowing_from(&self, player: Player) -> bool {
        match self.kind {
            PitType::House => true,
            PitType::Store => self.owner == player,
        }
    }
}
