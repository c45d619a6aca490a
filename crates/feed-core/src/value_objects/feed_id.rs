//! Feed ID - opaque unique identifier for all feed entities
//!
//! Backed by a UUID so ids minted on the client never collide with ids
//! assigned by the hosted backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque unique identifier (UUID-backed)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FeedId(Uuid);

impl FeedId {
    /// Create a FeedId from a raw UUID value
    #[inline]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random FeedId
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID value
    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Check if the id is nil (uninitialized)
    #[inline]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, FeedIdParseError> {
        Uuid::parse_str(s)
            .map(FeedId)
            .map_err(|_| FeedIdParseError::InvalidFormat)
    }
}

/// Error when parsing a FeedId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FeedIdParseError {
    #[error("invalid feed id format")]
    InvalidFormat,
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for FeedId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<FeedId> for Uuid {
    fn from(id: FeedId) -> Self {
        id.0
    }
}

impl std::str::FromStr for FeedId {
    type Err = FeedIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeedId::parse(s)
    }
}
