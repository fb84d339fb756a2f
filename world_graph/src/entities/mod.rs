//! Entity definitions for the world graph.

mod components;
mod entity;

pub use components::*;
pub use entity::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Articles stripped from the front of a noun phrase.
pub const ARTICLES: [&str; 3] = ["a", "an", "the"];

/// Unique identifier for compiled rules attached to an entity's triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleId(pub Uuid);

impl RuleId {
    /// Create a new random rule ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RuleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A noun phrase split into its canonical key and the article it was written with.
///
/// "The Black Cat" becomes `{ article: "the", key: "black cat" }`. A phrase without
/// an article keeps an empty article.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NounPhrase {
    pub article: String,
    pub key: String,
}

impl NounPhrase {
    /// Canonicalize raw noun phrase text.
    pub fn parse(text: &str) -> Self {
        let lowered = text.trim().to_lowercase();
        let key: Vec<&str> = lowered.split_whitespace().collect();

        match key.split_first() {
            Some((first, rest)) if !rest.is_empty() && ARTICLES.contains(first) => Self {
                article: (*first).to_string(),
                key: rest.join(" "),
            },
            _ => Self {
                article: String::new(),
                key: key.join(" "),
            },
        }
    }

    /// Reconstruct the phrase for messages ("the black cat").
    pub fn display(&self) -> String {
        if self.article.is_empty() {
            self.key.clone()
        } else {
            format!("{} {}", self.article, self.key)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

impl std::fmt::Display for NounPhrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Canonical key for raw noun phrase text.
pub fn canonical_key(text: &str) -> String {
    NounPhrase::parse(text).key
}

/// Join items the way a sentence lists them.
///
/// `["a"]` -> `a`, `["a", "b"]` -> `a and b`, `["a", "b", "c"]` -> `a, b, and c`.
pub fn comma_join<S: AsRef<str>>(items: &[S], logic: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} {} {}", first.as_ref(), logic, second.as_ref()),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|s| s.as_ref()).collect();
            format!("{}, {} {}", head.join(", "), logic, last.as_ref())
        }
    }
}
