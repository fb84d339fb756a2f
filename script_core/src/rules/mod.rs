//! Rules - compiled "if ... then ..." sentences and the book that owns them.
//!
//! A rule is plain data. It never holds the world; the world is handed to `fire`,
//! so every invocation reads the state as it is at that moment.

mod book;

pub use book::*;

use serde::{Deserialize, Serialize};
use world_graph::{RuleId, WorldState};

use crate::grammar::Clause;

/// A compiled conditional rule bound to a trigger verb on one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: RuleId,
    pub verb: String,
    /// Key of the entity the verb is performed on.
    pub target: String,
    /// All must hold.
    pub conditions: Vec<Clause>,
    /// Applied in order.
    pub effects: Vec<Clause>,
}

impl Event {
    pub fn new(
        verb: impl Into<String>,
        target: impl Into<String>,
        conditions: Vec<Clause>,
        effects: Vec<Clause>,
    ) -> Self {
        Self {
            id: RuleId::new(),
            verb: verb.into(),
            target: target.into(),
            conditions,
            effects,
        }
    }

    /// Whether every condition currently holds.
    pub fn is_satisfied(&self, world: &WorldState) -> bool {
        self.conditions.iter().all(|condition| condition.holds(world))
    }

    /// Run the rule, returning newline-joined messages or the configured
    /// "nothing happened" text.
    ///
    /// An effect whose subject has vanished stops the rule. Effects applied before it
    /// stay applied.
    pub fn fire(&self, world: &mut WorldState) -> String {
        let nothing = world.config.nothing_happened.clone();

        if !self.is_satisfied(world) {
            tracing::debug!(rule = %self.id, verb = %self.verb, target = %self.target, "conditions not met");
            return nothing;
        }

        let mut messages = Vec::with_capacity(self.effects.len());
        for effect in &self.effects {
            match effect.apply(world) {
                Ok(message) => messages.push(message),
                Err(err) => {
                    tracing::warn!(rule = %self.id, error = %err, "effect aborted");
                    return nothing;
                }
            }
        }

        if messages.is_empty() {
            nothing
        } else {
            messages.join("\n")
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use world_graph::NounPhrase;

    proptest! {
        #[test]
        fn unmet_rule_never_mutates(fires in 1usize..20, lock_first in any::<bool>()) {
            let mut world = WorldState::new();
            world.upsert(&NounPhrase::parse("the door"));
            if lock_first {
                world.relate("door", world_graph::SetRelation::Traits, "locked").unwrap();
            }
            let event = Event::new(
                "open",
                "door",
                vec![Clause::parse("the door is ajar").unwrap()],
                vec![Clause::parse("the door is open").unwrap()],
            );
            let before = world.clone();

            for _ in 0..fires {
                prop_assert_eq!(event.fire(&mut world), "nothing happened");
            }
            prop_assert_eq!(world, before);
        }
    }
}
