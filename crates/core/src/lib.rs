//! Devdocs domain core.
//!
//! This crate holds the publishing domain with zero knowledge of HTTP or
//! Postgres: the content aggregate and its state machine, the command and
//! query handlers, the collaborator traits they depend on, and the typed
//! dispatcher that routes each request kind to exactly one handler.
//!
//! Persistence, caching, and event delivery are supplied by the `db`,
//! `api`, and `events` crates through the traits in [`store`].

pub mod commands;
pub mod content;
pub mod dispatch;
pub mod error;
pub mod memory;
pub mod queries;
pub mod store;
pub mod topic;
pub mod types;
