//! # World Graph
//!
//! The single source of truth for a story world: every entity, its relation
//! containers, and the resolver that answers "what can I see" and "where can I go".
//! This crate knows nothing about the script language that populates it.

pub mod config;
pub mod entities;
pub mod error;
pub mod mechanics;
pub mod world_state;

pub use config::*;
pub use entities::*;
pub use error::*;
pub use mechanics::*;
pub use world_state::*;
