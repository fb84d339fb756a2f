//! Statement grammar - the sentence shapes a script is written in.
//!
//! - **pattern**: the ordered pattern table classifying one sentence
//! - **clause**: a classified sentence bound to a world relation

mod clause;
mod pattern;

pub use clause::*;
pub use pattern::*;
