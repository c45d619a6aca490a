//! HTTP client for the hosted backend

mod client;

pub use client::RemoteBackend;
