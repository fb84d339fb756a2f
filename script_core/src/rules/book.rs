//! The rule book - every compiled rule, keyed by id.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use world_graph::{RuleId, WorldState};

use super::Event;

/// Owns all rules; entities refer to them by `RuleId` in their trigger maps.
///
/// Serialized as a plain list of rules, each carrying its own id.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(from = "Vec<Event>", into = "Vec<Event>")]
pub struct RuleBook {
    rules: HashMap<RuleId, Event>,
}

impl RuleBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a rule and return its id.
    pub fn insert(&mut self, event: Event) -> RuleId {
        let id = event.id;
        self.rules.insert(id, event);
        id
    }

    pub fn get(&self, id: RuleId) -> Option<&Event> {
        self.rules.get(&id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.rules.values()
    }

    /// Fire the given rules in order, collecting what happened.
    ///
    /// Rules that changed nothing contribute no message; if none did, the result is
    /// the configured "nothing happened" text.
    pub fn fire_all(&self, ids: &[RuleId], world: &mut WorldState) -> String {
        let nothing = world.config.nothing_happened.clone();
        let messages: Vec<String> = ids
            .iter()
            .filter_map(|id| self.get(*id))
            .map(|event| event.fire(world))
            .filter(|message| *message != nothing)
            .collect();

        if messages.is_empty() {
            nothing
        } else {
            messages.join("\n")
        }
    }
}

impl From<Vec<Event>> for RuleBook {
    fn from(events: Vec<Event>) -> Self {
        Self {
            rules: events.into_iter().map(|event| (event.id, event)).collect(),
        }
    }
}

impl From<RuleBook> for Vec<Event> {
    fn from(book: RuleBook) -> Self {
        book.rules.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Clause;
    use world_graph::NounPhrase;

    #[test]
    fn test_insert_and_get() {
        let mut book = RuleBook::new();
        let id = book.insert(Event::new("kick", "table", vec![], vec![]));

        assert_eq!(book.len(), 1);
        assert_eq!(book.get(id).unwrap().verb, "kick");
        assert!(book.get(RuleId::new()).is_none());
    }

    #[test]
    fn test_fire_all_skips_silent_rules() {
        let mut world = WorldState::new();
        world.upsert(&NounPhrase::parse("the table"));

        let mut book = RuleBook::new();
        let silent = book.insert(Event::new(
            "kick",
            "table",
            vec![Clause::parse("the table is broken").unwrap()],
            vec![Clause::parse("the table is fixed").unwrap()],
        ));
        let loud = book.insert(Event::new(
            "kick",
            "table",
            vec![],
            vec![Clause::parse("the table says \"ouch\"").unwrap()],
        ));

        assert_eq!(book.fire_all(&[silent, loud], &mut world), "the table says \"ouch\"");
        assert_eq!(book.fire_all(&[silent], &mut world), "nothing happened");
        assert_eq!(book.fire_all(&[], &mut world), "nothing happened");
    }
}
