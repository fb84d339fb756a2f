//! # Storyscript
//!
//! An interpreter for stories written as plain declarative sentences. A script such as
//!
//! ```text
//! the bedroom is a place
//! you are in the bedroom
//! the door is in the bedroom
//! the door is locked
//! the door leads to the bathroom
//! if you unlock the door then the door is unlocked
//! ```
//!
//! compiles into a `world_graph::WorldState` plus a book of rules, which the player
//! then drives with short commands.
//!
//! ## Core Components
//!
//! - **grammar**: the ordered pattern table and the clauses it produces
//! - **compiler**: declarative facts and conditional rules, line by line
//! - **rules**: compiled events, evaluated against the live world
//! - **program**: the query surface the command layer talks to
//! - **command**: player command parsing and the interactive session

pub mod command;
pub mod compiler;
pub mod grammar;
pub mod normalize;
pub mod program;
pub mod rules;
pub mod snapshot;

pub use command::*;
pub use compiler::*;
pub use grammar::*;
pub use normalize::*;
pub use program::*;
pub use rules::*;
pub use snapshot::*;
