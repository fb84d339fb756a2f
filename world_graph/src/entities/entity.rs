//! Entity records: rooms, objects and the agent alike.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{insert_exclusive, Containment, KeySet, NounPhrase, RuleId};
use crate::mechanics::{Opposites, Preposition, SetRelation};

/// A node in the world graph with all of its relation containers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entity {
    pub key: String,
    /// Article the entity was first written with, possibly empty.
    pub article: String,
    pub utterance: Option<String>,

    pub traits: KeySet,
    pub possessions: KeySet,
    pub exits: KeySet,
    pub containment: Containment,

    /// Last write wins.
    pub properties: BTreeMap<String, String>,

    /// Verb -> rules it fires. An empty list is a declared capability with no effect yet.
    pub triggers: BTreeMap<String, Vec<RuleId>>,
}

impl Entity {
    /// Create an entity from a parsed noun phrase.
    pub fn new(phrase: &NounPhrase) -> Self {
        Self {
            key: phrase.key.clone(),
            article: phrase.article.clone(),
            utterance: None,
            traits: KeySet::new(),
            possessions: KeySet::new(),
            exits: KeySet::new(),
            containment: Containment::default(),
            properties: BTreeMap::new(),
            triggers: BTreeMap::new(),
        }
    }

    /// The entity as it reads in a message ("the black cat").
    pub fn display_name(&self) -> String {
        if self.article.is_empty() {
            self.key.clone()
        } else {
            format!("{} {}", self.article, self.key)
        }
    }

    pub fn set(&self, relation: SetRelation) -> &KeySet {
        match relation {
            SetRelation::Traits => &self.traits,
            SetRelation::Possessions => &self.possessions,
            SetRelation::Exits => &self.exits,
            SetRelation::Containment(preposition) => self.containment.get(preposition),
        }
    }

    pub fn set_mut(&mut self, relation: SetRelation) -> &mut KeySet {
        match relation {
            SetRelation::Traits => &mut self.traits,
            SetRelation::Possessions => &mut self.possessions,
            SetRelation::Exits => &mut self.exits,
            SetRelation::Containment(preposition) => self.containment.get_mut(preposition),
        }
    }

    /// Check membership in one of the entity's sets.
    pub fn holds(&self, relation: SetRelation, value: &str) -> bool {
        self.set(relation).contains(value)
    }

    /// Insert into a set, evicting any opposite value.
    pub fn insert(&mut self, relation: SetRelation, value: &str, opposites: &Opposites) -> bool {
        insert_exclusive(self.set_mut(relation), value, opposites)
    }

    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.contains(name)
    }

    /// Keys of the places this entity is in.
    pub fn location(&self) -> &KeySet {
        self.containment.get(Preposition::In)
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Register a verb, keeping any rules already attached to it.
    pub fn declare_trigger(&mut self, verb: impl Into<String>) {
        self.triggers.entry(verb.into()).or_default();
    }

    /// Attach a compiled rule to a verb.
    pub fn attach_rule(&mut self, verb: impl Into<String>, rule: RuleId) {
        let rules = self.triggers.entry(verb.into()).or_default();
        if !rules.contains(&rule) {
            rules.push(rule);
        }
    }

    pub fn rules_for(&self, verb: &str) -> Option<&[RuleId]> {
        self.triggers.get(verb).map(Vec::as_slice)
    }
}
