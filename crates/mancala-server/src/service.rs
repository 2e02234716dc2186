//! Party service: creates parties and applies player moves.

use crate::config::PartyConfig;
use crate::repository::{PartyRepository, RepositoryError};
use mancala_core::{BoardError, Outcome, Party, PartyError, Player};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid party setup: {0}")]
    Setup(#[from] BoardError),

    #[error(transparent)]
    Party(#[from] PartyError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Entry point for everything a client can do with a party
pub struct PartyService<R: PartyRepository> {
    config: PartyConfig,
    repository: R,
}

impl<R: PartyRepository> PartyService<R> {
    pub fn new(config: PartyConfig, repository: R) -> Self {
        Self { config, repository }
    }

    /// Start a new party with the configured board size
    pub fn create_party(&self) -> Result<Party, ServiceError> {
        let party = Party::start(Uuid::new_v4(), self.config.settings())?;
        let party = self.repository.save_party(&party)?;
        info!(
            party_id = %party.id(),
            houses = self.config.houses_per_player,
            stones = self.config.stones_per_house,
            "Party created"
        );
        Ok(party)
    }

    pub fn find_party(&self, id: Uuid) -> Result<Party, ServiceError> {
        Ok(self.repository.load_party(id)?)
    }

    /// Apply a move to the stored party and store the result
    pub fn player_move(
        &self,
        id: Uuid,
        player: Player,
        pit_index: usize,
    ) -> Result<Party, ServiceError> {
        let party = self.repository.load_party(id)?;

        let next = match party.make_move(player, pit_index) {
            Ok(next) => next,
            Err(e) => {
                warn!(party_id = %id, %player, pit_index, "Move rejected: {}", e);
                return Err(e.into());
            }
        };

        let saved = self.repository.save_party(&next)?;
        debug!(
            party_id = %id,
            %player,
            pit_index,
            next_turn = %saved.turn_owner(),
            version = saved.version(),
            "Move applied"
        );

        match saved.outcome() {
            Some(Outcome::Winner(winner)) => {
                info!(party_id = %id, %winner, "Party finished");
            }
            Some(Outcome::Draw) => {
                info!(party_id = %id, "Party finished in a draw");
            }
            None => {}
        }

        Ok(saved)
    }
}
