//! Board representation and the sowing rules.
//!
//! This module contains:
//! - `Board`, an immutable ring of pits split into two equal halves
//! - Board validation on construction and on deserialization
//! - The move transition: sowing, capture, and end-of-game collapse
//!
//! Layout: the first half of the pits belongs to `PlayerOne`, the second half
//! to `PlayerTwo`, and each half ends with its owner's store. Sowing runs
//! forward through the indices and wraps around.

use crate::pit::{Pit, PitType, Player};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a board or applying a move to it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    // ==================== Illegal arguments ====================
    #[error("Pits cannot be null")]
    MissingPits,

    #[error("Pits cannot contain null (index {index})")]
    MissingPit { index: usize },

    #[error("Last used pit index {index} is out of bounds for {len} pits")]
    LastUsedPitOutOfBounds { index: usize, len: usize },

    // ==================== Invalid setup ====================
    #[error("Players must have the same number of pits ({player_one} vs {player_two})")]
    UnequalPitCounts { player_one: usize, player_two: usize },

    #[error("Pits in the {player} half must all belong to {player}")]
    MixedOwnership { player: Player },

    #[error("{player} must have exactly 1 store pit, found {found}")]
    StoreCount { player: Player, found: usize },

    #[error("{player} must have at least 1 house pit")]
    NoHouse { player: Player },

    #[error("The last pit of the {player} half must be a store")]
    StoreNotLast { player: Player },

    #[error("Board holds more than {} stones", u32::MAX)]
    TooManyStones,

    // ==================== Move preconditions ====================
    #[error("Pit index {index} is out of bounds for {len} pits")]
    PitIndexOutOfBounds { index: usize, len: usize },

    #[error("{player} cannot start a move from pit {index}, it's not theirs")]
    NotPitOwner { index: usize, player: Player },

    #[error("Cannot start a move from pit {index}, it's not a house")]
    NotAHouse { index: usize },

    #[error("Cannot start a move from pit {index}, there are no stones")]
    EmptyPit { index: usize },
}

impl BoardError {
    /// Whether this error came from board construction rather than a move
    pub fn is_setup_error(&self) -> bool {
        !matches!(
            self,
            BoardError::PitIndexOutOfBounds { .. }
                | BoardError::NotPitOwner { .. }
                | BoardError::NotAHouse { .. }
                | BoardError::EmptyPit { .. }
        )
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    pits: Vec<Pit>,
    /// Where the most recent move's sowing ended
    last_used_pit_index: Option<usize>,
}

/// Unchecked wire form of a board; converting it runs full validation.
#[derive(Deserialize)]
struct BoardSnapshot {
    pits: Option<Vec<Option<Pit>>>,
    #[serde(default)]
    last_used_pit_index: Option<usize>,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = BoardError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self, Self::Error> {
        let slots = snapshot.pits.ok_or(BoardError::MissingPits)?;
        let pits = slots
            .into_iter()
            .enumerate()
            .map(|(index, pit)| pit.ok_or(BoardError::MissingPit { index }))
            .collect::<Result<Vec<_>, _>>()?;
        Board::new(&pits, snapshot.last_used_pit_index)
    }
}

impl Board {
    /// Create a board from a pit layout, validating its structure.
    ///
    /// The pits are copied; later changes to `pits` do not reach the board.
    pub fn new(pits: &[Pit], last_used_pit_index: Option<usize>) -> Result<Self, BoardError> {
        let player_one = pits
            .iter()
            .filter(|pit| pit.owner() == Player::PlayerOne)
            .count();
        let player_two = pits.len() - player_one;
        if player_one != player_two {
            return Err(BoardError::UnequalPitCounts {
                player_one,
                player_two,
            });
        }

        let half = pits.len() / 2;
        Self::validate_half(&pits[..half], Player::PlayerOne)?;
        Self::validate_half(&pits[half..], Player::PlayerTwo)?;

        // moves only redistribute stones, so no pit can overflow later
        pits.iter()
            .try_fold(0u32, |total, pit| total.checked_add(pit.stones()))
            .ok_or(BoardError::TooManyStones)?;

        if let Some(index) = last_used_pit_index {
            if index >= pits.len() {
                return Err(BoardError::LastUsedPitOutOfBounds {
                    index,
                    len: pits.len(),
                });
            }
        }

        Ok(Self {
            pits: pits.to_vec(),
            last_used_pit_index,
        })
    }

    /// Create the opening board: `houses_per_player` houses of
    /// `stones_per_house` stones on each side, stores empty.
    pub fn initial(houses_per_player: usize, stones_per_house: u32) -> Result<Self, BoardError> {
        let houses = vec![stones_per_house; houses_per_player];
        Self::from_stones(&houses, 0, &houses, 0)
    }

    /// Create a board from per-side house counts and store counts
    pub fn from_stones(
        one_houses: &[u32],
        one_store: u32,
        two_houses: &[u32],
        two_store: u32,
    ) -> Result<Self, BoardError> {
        let mut pits = Vec::with_capacity(one_houses.len() + two_houses.len() + 2);
        for (player, houses, store) in [
            (Player::PlayerOne, one_houses, one_store),
            (Player::PlayerTwo, two_houses, two_store),
        ] {
            pits.extend(houses.iter().map(|&stones| Pit::house(player, stones)));
            pits.push(Pit::store(player, store));
        }
        Self::new(&pits, None)
    }

    fn validate_half(half: &[Pit], player: Player) -> Result<(), BoardError> {
        if half.iter().any(|pit| pit.owner() != player) {
            return Err(BoardError::MixedOwnership { player });
        }

        let stores = half.iter().filter(|pit| pit.is_store()).count();
        if stores != 1 {
            return Err(BoardError::StoreCount {
                player,
                found: stores,
            });
        }

        if !half.iter().any(|pit| pit.is_house()) {
            return Err(BoardError::NoHouse { player });
        }

        match half.last().map(|pit| pit.kind()) {
            Some(PitType::Store) => Ok(()),
            Some(PitType::House) | None => Err(BoardError::StoreNotLast { player }),
        }
    }

    /// A copy of all pits in board order
    pub fn pits(&self) -> Vec<Pit> {
        self.pits.clone()
    }

    /// Get a pit by index
    pub fn pit(&self, index: usize) -> Option<Pit> {
        self.pits.get(index).copied()
    }

    /// Number of pits on the board (houses and stores of both players)
    pub fn len(&self) -> usize {
        self.pits.len()
    }

    /// Always false: a valid board has at least two houses and two stores
    pub fn is_empty(&self) -> bool {
        self.pits.is_empty()
    }

    pub fn last_used_pit_index(&self) -> Option<usize> {
        self.last_used_pit_index
    }

    /// The pit where the most recent move's last stone landed.
    ///
    /// `None` on a board no move has been made on yet.
    pub fn last_used_pit(&self) -> Option<Pit> {
        self.last_used_pit_index.and_then(|index| self.pit(index))
    }

    /// Index of a player's store (the last pit of their half)
    pub fn store_index(&self, player: Player) -> usize {
        store_index(self.pits.len(), player)
    }

    /// Stones in a player's store
    pub fn store_stones(&self, player: Player) -> u32 {
        self.pits[self.store_index(player)].stones()
    }

    /// Stones left in a player's houses
    pub fn house_stones(&self, player: Player) -> u32 {
        self.pits
            .iter()
            .filter(|pit| pit.owner() == player && pit.is_house())
            .map(Pit::stones)
            .sum()
    }

    /// All stones on the board
    pub fn total_stones(&self) -> u32 {
        self.pits.iter().map(Pit::stones).sum()
    }

    /// Whether either side has run out of stones in its houses
    pub fn is_finished(&self) -> bool {
        Player::ALL
            .iter()
            .any(|&player| houses_empty(&self.pits, player))
    }

    /// Indices of the houses `player` may start a move from
    pub fn valid_moves(&self, player: Player) -> Vec<usize> {
        self.pits
            .iter()
            .enumerate()
            .filter(|(_, pit)| pit.owner() == player && pit.is_house() && !pit.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    /// Sow the stones of pit `pit_index` for `player` and return the
    /// resulting board. `self` is left unchanged.
    pub fn make_move(&self, player: Player, pit_index: usize) -> Result<Board, BoardError> {
        let start = self
            .pit(pit_index)
            .ok_or(BoardError::PitIndexOutOfBounds {
                index: pit_index,
                len: self.pits.len(),
            })?;
        if start.owner() != player {
            return Err(BoardError::NotPitOwner {
                index: pit_index,
                player,
            });
        }
        if !start.is_house() {
            return Err(BoardError::NotAHouse { index: pit_index });
        }
        if start.is_empty() {
            return Err(BoardError::EmptyPit { index: pit_index });
        }

        let mut pits = self.pits.clone();
        let mut stones_in_hand = start.stones();
        pits[pit_index] = start.with_stones(0);

        let mut index = pit_index;
        while stones_in_hand > 0 {
            index = (index + 1) % pits.len();
            let pit = pits[index];
            if !pit.accepts_sowing_from(player) {
                continue;
            }
            pits[index] = pit.add_stones(1);
            stones_in_hand -= 1;
        }

        let landing = pits[index];
        if landing.owner() == player && landing.is_house() && landing.stones() == 1 {
            capture_opposite(&mut pits, index, player);
        }

        if Player::ALL.iter().any(|&p| houses_empty(&pits, p)) {
            collapse_into_stores(&mut pits);
        }

        Ok(Board {
            pits,
            last_used_pit_index: Some(index),
        })
    }
}

fn store_index(len: usize, player: Player) -> usize {
    match player {
        Player::PlayerOne => len / 2 - 1,
        Player::PlayerTwo => len - 1,
    }
}

/// Index of the pit facing `index` across the board.
///
/// Only meaningful for house indices on a validated board: both halves have
/// the same length and end with their store, so house `i` of one side faces
/// house `len - i - 2` of the other.
fn opposite_index(len: usize, index: usize) -> Option<usize> {
    len.checked_sub(index + 2)
}

/// Move the stones of the landing house and the house facing it into the
/// mover's store, provided the facing house is an opponent's non-empty house.
fn capture_opposite(pits: &mut [Pit], landing_index: usize, player: Player) {
    let Some(opposite_index) = opposite_index(pits.len(), landing_index) else {
        return;
    };
    let landing = pits[landing_index];
    let opposite = pits[opposite_index];

    if opposite.owner() == player || !opposite.is_house() || opposite.is_empty() {
        return;
    }

    let store_index = store_index(pits.len(), player);
    pits[landing_index] = landing.with_stones(0);
    pits[opposite_index] = opposite.with_stones(0);
    pits[store_index] = pits[store_index].add_stones(landing.stones() + opposite.stones());
}

fn houses_empty(pits: &[Pit], player: Player) -> bool {
    pits.iter()
        .filter(|pit| pit.owner() == player && pit.is_house())
        .all(Pit::is_empty)
}

/// End-of-game sweep: every player's stones end up in their own store.
fn collapse_into_stores(pits: &mut [Pit]) {
    let mut totals = [0u32; 2];
    for pit in pits.iter() {
        totals[pit.owner().index()] += pit.stones();
    }

    for pit in pits.iter_mut() {
        *pit = match pit.kind() {
            PitType::Store => pit.with_stones(totals[pit.owner().index()]),
            PitType::House => pit.with_stones(0),
        };
    }
}
