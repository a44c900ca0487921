use crate::domain::model::{GenreList, RestaurantList};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Raw reply from one round trip to the compute service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl BackendReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The compute service that hosts validation and partitioning.
///
/// Implementations make exactly one attempt per call and return transport
/// failures (connect, timeout) as errors; any HTTP status is a reply.
#[async_trait]
pub trait ShuffleBackend: Send + Sync {
    async fn shuffle(&self, body: Vec<u8>) -> Result<BackendReply>;
}

/// Read-only source of nearby restaurant listings.
#[async_trait]
pub trait RestaurantSource: Send + Sync {
    async fn nearby(&self, genre: Option<&str>) -> Result<RestaurantList>;
    async fn genres(&self) -> Result<GenreList>;
}
