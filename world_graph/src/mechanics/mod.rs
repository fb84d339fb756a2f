//! World mechanics: relation kinds, prepositions and mutually exclusive traits.

use serde::{Deserialize, Serialize};

/// Trait marking an entity the agent can enter.
pub const PLACE: &str = "place";

/// Trait hiding an entity from the agent.
pub const INVISIBLE: &str = "invisible";

/// Trait closing an entity's exits.
pub const LOCKED: &str = "locked";

/// Terminal trait the agent gains on reaching a winning location.
pub const WINNER: &str = "winner";

/// Pairs of traits that can never be held at the same time.
pub const STANDARD_OPPOSITES: [(&str, &str); 2] = [("visible", "invisible"), ("locked", "unlocked")];

/// Spatial prepositions, one containment set each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preposition {
    In,
    On,
    Under,
    Near,
}

impl Preposition {
    pub const ALL: [Preposition; 4] = [
        Preposition::In,
        Preposition::On,
        Preposition::Under,
        Preposition::Near,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preposition::In => "in",
            Preposition::On => "on",
            Preposition::Under => "under",
            Preposition::Near => "near",
        }
    }
}

impl std::fmt::Display for Preposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set-valued relations on an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetRelation {
    /// Generic "is" facts.
    Traits,
    /// "has" ownership.
    Possessions,
    /// "leads to" navigation edges.
    Exits,
    /// Spatial relations.
    Containment(Preposition),
}

/// Every relation a clause can name, resolved once at compile time.
///
/// Evaluation matches on this closed set instead of inspecting container shapes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// Membership in one of the entity's sets.
    Set(SetRelation),
    /// A property keyed by name ("color" in "the color of the cat is red").
    Property(String),
    /// The line the entity speaks.
    Utterance,
    /// A verb the agent can perform on the object.
    Capability(String),
}

/// Mutually exclusive trait pairs, injected into every trait-set mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opposites(pub Vec<(String, String)>);

impl Opposites {
    /// The trait that `value` evicts, if any.
    pub fn opposite_of(&self, value: &str) -> Option<&str> {
        self.0.iter().find_map(|(a, b)| {
            if a == value {
                Some(b.as_str())
            } else if b == value {
                Some(a.as_str())
            } else {
                None
            }
        })
    }
}

impl Default for Opposites {
    fn default() -> Self {
        Self(
            STANDARD_OPPOSITES
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        )
    }
}
