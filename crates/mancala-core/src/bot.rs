//! AI bot players.
//!
//! This module provides different difficulty levels of AI players:
//! - Easy: Random valid moves
//! - Medium: Greedy one-move lookahead on the store difference
//! - Hard: Minimax search a few moves deep

use crate::party::{Outcome, Party};
use crate::pit::Player;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// How many moves ahead the hard bot searches
const HARD_SEARCH_DEPTH: u32 = 4;

/// Bonus added to the evaluation of a won position
const WIN_BONUS: i64 = 1_000;

/// Bot difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotDifficulty {
    Easy,
    Medium,
    Hard,
}

/// A bot player that can decide on moves
pub struct Bot {
    pub player: Player,
    pub difficulty: BotDifficulty,
    rng: StdRng,
}

impl Bot {
    pub fn new(player: Player, difficulty: BotDifficulty) -> Self {
        Self {
            player,
            difficulty,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(player: Player, difficulty: BotDifficulty, seed: u64) -> Self {
        Self {
            player,
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose the pit to sow from, or `None` if the bot cannot move
    pub fn choose_move(&mut self, party: &Party) -> Option<usize> {
        if party.turn_owner() != self.player {
            return None;
        }
        let moves = party.valid_moves();
        if moves.is_empty() {
            return None;
        }

        match self.difficulty {
            BotDifficulty::Easy => moves.choose(&mut self.rng).copied(),
            BotDifficulty::Medium => self.choose_medium(party, &moves),
            BotDifficulty::Hard => self.choose_hard(party, &moves),
        }
    }

    /// Medium: best store difference after one move, keeping the turn breaks ties
    fn choose_medium(&mut self, party: &Party, moves: &[usize]) -> Option<usize> {
        let scored: Vec<(usize, (i64, bool))> = moves
            .iter()
            .filter_map(|&pit| {
                let next = party.make_move(self.player, pit).ok()?;
                let keeps_turn = !next.is_finished() && next.turn_owner() == self.player;
                Some((pit, (evaluate(&next, self.player), keeps_turn)))
            })
            .collect();
        self.pick_best(scored)
    }

    /// Hard: minimax over the next few moves, extra turns included
    fn choose_hard(&mut self, party: &Party, moves: &[usize]) -> Option<usize> {
        let scored: Vec<(usize, i64)> = moves
            .iter()
            .filter_map(|&pit| {
                let next = party.make_move(self.player, pit).ok()?;
                Some((pit, minimax(&next, self.player, HARD_SEARCH_DEPTH - 1)))
            })
            .collect();
        self.pick_best(scored)
    }

    /// Pick randomly among the moves sharing the best score
    fn pick_best<S: Ord + Copy>(&mut self, scored: Vec<(usize, S)>) -> Option<usize> {
        let best = scored.iter().map(|(_, score)| *score).max()?;
        let candidates: Vec<usize> = scored
            .into_iter()
            .filter(|(_, score)| *score == best)
            .map(|(pit, _)| pit)
            .collect();
        candidates.choose(&mut self.rng).copied()
    }
}

/// Store difference from `player`'s point of view, with a bonus for a decided game
fn evaluate(party: &Party, player: Player) -> i64 {
    let board = party.board();
    let diff =
        i64::from(board.store_stones(player)) - i64::from(board.store_stones(player.opponent()));
    match party.outcome() {
        Some(Outcome::Winner(winner)) if winner == player => diff + WIN_BONUS,
        Some(Outcome::Winner(_)) => diff - WIN_BONUS,
        Some(Outcome::Draw) | None => diff,
    }
}

fn minimax(party: &Party, player: Player, depth: u32) -> i64 {
    if depth == 0 || party.is_finished() {
        return evaluate(party, player);
    }

    let mover = party.turn_owner();
    let values = party.valid_moves().into_iter().filter_map(|pit| {
        party
            .make_move(mover, pit)
            .ok()
            .map(|next| minimax(&next, player, depth - 1))
    });

    let best = if mover == player {
        values.max()
    } else {
        values.min()
    };
    best.unwrap_or_else(|| evaluate(party, player))
}
