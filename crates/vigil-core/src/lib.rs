//! Core services for vigil: configuration, logging, and the GraphQL client.

pub mod client;
pub mod config;
pub mod logging;
