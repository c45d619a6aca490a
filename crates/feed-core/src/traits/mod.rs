//! Backend traits (ports) for the external collaborators

mod backend;

pub use backend::{
    BackendResult, ContactChannel, EngagementStore, FeedItemSource, IdentityProvider,
};
