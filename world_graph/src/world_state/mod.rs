//! World state management - the entity store holding all game data.

mod resolver;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::WorldConfig;
use crate::entities::{Entity, NounPhrase};
use crate::error::{ResolveError, ResolveResult};
use crate::mechanics::SetRelation;

/// The complete world graph: every entity keyed by its canonical name.
///
/// Compilation and play both mutate this one store, so a rule always sees the
/// state left behind by the previous command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorldState {
    pub config: WorldConfig,
    entities: HashMap<String, Entity>,
}

impl Default for WorldState {
    fn default() -> Self {
        Self::with_config(WorldConfig::default())
    }
}

impl WorldState {
    /// Create a world holding only the agent.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WorldConfig) -> Self {
        let mut world = Self {
            config,
            entities: HashMap::new(),
        };
        let agent = NounPhrase::parse(&world.config.agent);
        world.config.agent = world.upsert(&agent);
        world
    }

    pub fn agent_key(&self) -> &str {
        &self.config.agent
    }

    pub fn is_agent(&self, key: &str) -> bool {
        key == self.config.agent
    }

    /// Get the agent, which every well-formed store contains.
    pub fn agent(&self) -> ResolveResult<&Entity> {
        self.entities
            .get(&self.config.agent)
            .ok_or_else(|| ResolveError::NotFound(self.config.agent.clone()))
    }

    pub fn agent_mut(&mut self) -> ResolveResult<&mut Entity> {
        let key = self.config.agent.clone();
        self.entities
            .get_mut(&key)
            .ok_or(ResolveError::NotFound(key))
    }

    /// Get or create the entity a noun phrase names, returning its key.
    ///
    /// An existing entity keeps the article it was first written with.
    pub fn upsert(&mut self, phrase: &NounPhrase) -> String {
        if !self.entities.contains_key(&phrase.key) {
            tracing::debug!(key = %phrase.key, "created entity");
            self.entities
                .insert(phrase.key.clone(), Entity::new(phrase));
        }
        phrase.key.clone()
    }

    pub fn get(&self, key: &str) -> Option<&Entity> {
        self.entities.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entities.contains_key(key)
    }

    /// Get an entity or fail with `NotFound`.
    pub fn require(&self, key: &str) -> ResolveResult<&Entity> {
        self.entities
            .get(key)
            .ok_or_else(|| ResolveError::NotFound(key.to_string()))
    }

    pub fn require_mut(&mut self, key: &str) -> ResolveResult<&mut Entity> {
        self.entities
            .get_mut(key)
            .ok_or_else(|| ResolveError::NotFound(key.to_string()))
    }

    /// How an entity reads in a message, falling back to the bare key.
    pub fn display_name(&self, key: &str) -> String {
        self.entities
            .get(key)
            .map(Entity::display_name)
            .unwrap_or_else(|| key.to_string())
    }

    /// Insert `value` into one of `subject`'s sets, applying the configured opposites.
    pub fn relate(&mut self, subject: &str, relation: SetRelation, value: &str) -> ResolveResult<bool> {
        let opposites = &self.config.opposites;
        let entity = self
            .entities
            .get_mut(subject)
            .ok_or_else(|| ResolveError::NotFound(subject.to_string()))?;
        Ok(entity.insert(relation, value, opposites))
    }

    /// All entity keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entities.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}
