//! # feed-backend
//!
//! Backend layer implementing the `feed-core` ports against the hosted
//! backend's JSON API, plus an in-memory implementation for tests and local
//! development.
//!
//! ## Overview
//!
//! - Wire models (`models`) mirroring the hosted backend's JSON shapes
//! - Entity ↔ record mappers (`mappers`)
//! - `RemoteBackend`: `reqwest`-based client implementing `FeedItemSource`
//!   and `EngagementStore`
//! - `MemoryBackend`: in-process tables behind locks, honoring the same
//!   contracts (expiry filtering, reaction uniqueness)

pub mod mappers;
pub mod memory;
pub mod models;
pub mod remote;

// Re-export commonly used types
pub use memory::MemoryBackend;
pub use remote::RemoteBackend;
