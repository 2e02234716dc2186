//! Party storage with optimistic versioning.
//!
//! Parties are kept as serialized snapshots. Saving compares the incoming
//! snapshot's version with the stored one, so a move computed from a stale
//! snapshot is rejected instead of overwriting a newer one.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use mancala_core::Party;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Party {id} not found")]
    NotFound { id: Uuid },

    #[error("Party {id} was modified concurrently (stored version {expected}, got {found})")]
    VersionConflict { id: Uuid, expected: u32, found: u32 },

    #[error("Corrupt party snapshot: {0}")]
    Snapshot(String),
}

/// Loads and saves party snapshots
pub trait PartyRepository: Send + Sync {
    fn load_party(&self, id: Uuid) -> Result<Party, RepositoryError>;

    /// Store `party` if its version matches the stored one; returns the
    /// party under its new version.
    fn save_party(&self, party: &Party) -> Result<Party, RepositoryError>;
}

struct StoredParty {
    version: u32,
    snapshot: String,
}

/// Process-local repository backed by a concurrent map
pub struct InMemoryPartyRepository {
    parties: DashMap<Uuid, StoredParty>,
}

impl InMemoryPartyRepository {
    pub fn new() -> Self {
        Self {
            parties: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }
}

impl Default for InMemoryPartyRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PartyRepository for InMemoryPartyRepository {
    fn load_party(&self, id: Uuid) -> Result<Party, RepositoryError> {
        let stored = self
            .parties
            .get(&id)
            .ok_or(RepositoryError::NotFound { id })?;
        let party: Party = serde_json::from_str(&stored.snapshot)
            .map_err(|e| RepositoryError::Snapshot(e.to_string()))?;
        Ok(party.with_version(stored.version))
    }

    fn save_party(&self, party: &Party) -> Result<Party, RepositoryError> {
        let id = party.id();
        let found = party.version();
        let next = party.with_version(found + 1);
        let snapshot =
            serde_json::to_string(&next).map_err(|e| RepositoryError::Snapshot(e.to_string()))?;
        let stored = StoredParty {
            version: next.version(),
            snapshot,
        };

        // the entry holds the shard lock, so check and write are one step
        match self.parties.entry(id) {
            Entry::Occupied(mut entry) => {
                let expected = entry.get().version;
                if expected != found {
                    return Err(RepositoryError::VersionConflict {
                        id,
                        expected,
                        found,
                    });
                }
                entry.insert(stored);
            }
            Entry::Vacant(entry) => {
                if found != 0 {
                    return Err(RepositoryError::VersionConflict {
                        id,
                        expected: 0,
                        found,
                    });
                }
                entry.insert(stored);
            }
        }

        Ok(next)
    }
}
