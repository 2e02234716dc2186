//! Party (game) state machine.
//!
//! A `Party` wraps a `Board` with the player whose turn it is and the party
//! status. Each accepted move returns a new `Party`; the old snapshot stays
//! valid so the storage layer can compare versions.

use crate::board::{Board, BoardError};
use crate::pit::Player;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Houses per player on a standard Kalah board
pub const DEFAULT_HOUSES_PER_PLAYER: usize = 6;

/// Stones per house at the start of a standard Kalah game
pub const DEFAULT_STONES_PER_HOUSE: u32 = 6;

/// Lifecycle of a party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartyStatus {
    InProgress,
    Finished,
}

/// Turn rules that vary between Kalah tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyRules {
    /// The mover plays again when the last stone lands in their own store
    pub extra_turn_on_store: bool,
}

impl Default for PartyRules {
    fn default() -> Self {
        Self {
            extra_turn_on_store: true,
        }
    }
}

/// Everything needed to set up a new party
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartySettings {
    pub houses_per_player: usize,
    pub stones_per_house: u32,
    pub rules: PartyRules,
}

impl Default for PartySettings {
    fn default() -> Self {
        Self {
            houses_per_player: DEFAULT_HOUSES_PER_PLAYER,
            stones_per_house: DEFAULT_STONES_PER_HOUSE,
            rules: PartyRules::default(),
        }
    }
}

/// Result of a finished party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

/// Errors that can occur when making a move in a party
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartyError {
    #[error("Not your turn ({player} tried to move)")]
    NotYourTurn { player: Player },

    #[error("Party is over")]
    GameOver,

    #[error("Party status {status:?} does not match its board")]
    StatusMismatch { status: PartyStatus },

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// A snapshot of one party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PartySnapshot")]
pub struct Party {
    id: Uuid,
    status: PartyStatus,
    board: Board,
    turn_owner: Player,
    /// Optimistic-locking counter, owned by the storage layer
    version: u32,
    rules: PartyRules,
}

/// Unchecked wire form of a party; the status must agree with the board.
#[derive(Deserialize)]
struct PartySnapshot {
    id: Uuid,
    status: PartyStatus,
    board: Board,
    turn_owner: Player,
    version: u32,
    #[serde(default)]
    rules: PartyRules,
}

impl TryFrom<PartySnapshot> for Party {
    type Error = PartyError;

    fn try_from(snapshot: PartySnapshot) -> Result<Self, Self::Error> {
        let finished = matches!(snapshot.status, PartyStatus::Finished);
        if finished != snapshot.board.is_finished() {
            return Err(PartyError::StatusMismatch {
                status: snapshot.status,
            });
        }
        Ok(Self {
            id: snapshot.id,
            status: snapshot.status,
            board: snapshot.board,
            turn_owner: snapshot.turn_owner,
            version: snapshot.version,
            rules: snapshot.rules,
        })
    }
}

impl Party {
    /// Create a party around an existing board. `PlayerOne` moves first.
    pub fn new(id: Uuid, board: Board, rules: PartyRules) -> Self {
        let status = if board.is_finished() {
            PartyStatus::Finished
        } else {
            PartyStatus::InProgress
        };
        Self {
            id,
            status,
            board,
            turn_owner: Player::PlayerOne,
            version: 0,
            rules,
        }
    }

    /// Create a party with a fresh opening board
    pub fn start(id: Uuid, settings: PartySettings) -> Result<Self, BoardError> {
        let board = Board::initial(settings.houses_per_player, settings.stones_per_house)?;
        Ok(Self::new(id, board, settings.rules))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> PartyStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn_owner(&self) -> Player {
        self.turn_owner
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn rules(&self) -> PartyRules {
        self.rules
    }

    /// Same snapshot under a different storage version
    pub fn with_version(&self, version: u32) -> Self {
        Self {
            version,
            ..self.clone()
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, PartyStatus::Finished)
    }

    /// Winner or draw, once the party is finished.
    ///
    /// Each side scores its store plus anything left in its houses, which
    /// only matters for a board that was already finished when loaded.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_finished() {
            return None;
        }
        let [one, two] = Player::ALL
            .map(|player| self.board.store_stones(player) + self.board.house_stones(player));
        Some(match one.cmp(&two) {
            std::cmp::Ordering::Greater => Outcome::Winner(Player::PlayerOne),
            std::cmp::Ordering::Less => Outcome::Winner(Player::PlayerTwo),
            std::cmp::Ordering::Equal => Outcome::Draw,
        })
    }

    /// Houses the turn owner may move from
    pub fn valid_moves(&self) -> Vec<usize> {
        if self.is_finished() {
            return Vec::new();
        }
        self.board.valid_moves(self.turn_owner)
    }

    /// Apply a move and return the next snapshot
    pub fn make_move(&self, player: Player, pit_index: usize) -> Result<Party, PartyError> {
        if self.is_finished() {
            return Err(PartyError::GameOver);
        }
        if player != self.turn_owner {
            return Err(PartyError::NotYourTurn { player });
        }

        let board = self.board.make_move(player, pit_index)?;

        let (status, turn_owner) = if board.is_finished() {
            (PartyStatus::Finished, player)
        } else if self.rules.extra_turn_on_store && landed_in_own_store(&board, player) {
            (PartyStatus::InProgress, player)
        } else {
            (PartyStatus::InProgress, player.opponent())
        };

        Ok(Party {
            id: self.id,
            status,
            board,
            turn_owner,
            version: self.version,
            rules: self.rules,
        })
    }
}

fn landed_in_own_store(board: &Board, player: Player) -> bool {
    board
        .last_used_pit()
        .is_some_and(|pit| pit.is_store() && pit.owner() == player)
}
