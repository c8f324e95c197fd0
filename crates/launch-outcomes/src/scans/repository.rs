use super::domain::{ScanId, ScanRecord};
use super::leads::{LeadId, LeadRecord};
use super::leaderboard::LeaderboardEntry;

/// Storage abstraction; the service only ever talks to this trait.
pub trait ScanRepository: Send + Sync {
    fn insert(&self, record: ScanRecord) -> Result<ScanRecord, RepositoryError>;
    fn update(&self, record: ScanRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ScanId) -> Result<Option<ScanRecord>, RepositoryError>;
}

/// Opt-in leaderboard storage.
pub trait LeaderboardRepository: Send + Sync {
    fn insert(&self, entry: LeaderboardEntry) -> Result<LeaderboardEntry, RepositoryError>;
    fn entries(&self) -> Result<Vec<LeaderboardEntry>, RepositoryError>;
}

pub trait LeadRepository: Send + Sync {
    fn insert(&self, lead: LeadRecord) -> Result<LeadRecord, RepositoryError>;
    fn update(&self, lead: LeadRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
