//! Runtime queries and mutations the command layer runs against the world.
//!
//! Only the `in` relation counts for co-location: `on`, `under` and `near` never
//! make anything visible or reachable.

use std::collections::BTreeSet;

use super::WorldState;
use crate::entities::KeySet;
use crate::error::{ResolveError, ResolveResult};
use crate::mechanics::{Preposition, SetRelation, INVISIBLE, LOCKED, PLACE, WINNER};

impl WorldState {
    /// Whether the agent can see `key`.
    ///
    /// Held items count only when `count_held` is set. Invisible entities are never
    /// seen; anything else must be where the agent is, or be that place itself.
    pub fn can_see(&self, key: &str, count_held: bool) -> ResolveResult<bool> {
        let target = self.require(key)?;
        let agent = self.agent()?;

        if count_held && agent.possessions.contains(key) {
            return Ok(true);
        }
        if target.has_trait(INVISIBLE) {
            return Ok(false);
        }

        let here = agent.location();
        Ok(here.contains(key) || !here.is_disjoint(target.location()))
    }

    /// Keys of everything co-located with the agent and not invisible, in sorted order.
    ///
    /// Held items are excluded: taking an item detaches it from the room.
    pub fn visible(&self) -> Vec<String> {
        self.keys()
            .into_iter()
            .filter(|key| !self.is_agent(key))
            .filter(|key| matches!(self.can_see(key, false), Ok(true)))
            .map(str::to_string)
            .collect()
    }

    /// Places one step away through an exit of some visible, unlocked entity.
    pub fn reachable(&self) -> KeySet {
        self.visible()
            .iter()
            .filter_map(|key| self.get(key))
            .filter(|entity| !entity.has_trait(LOCKED))
            .flat_map(|entity| entity.exits.iter().cloned())
            .collect()
    }

    /// Move the agent to `destination`, returning what the place says on arrival.
    ///
    /// `force` skips the reachability check but never the place or same-location checks.
    pub fn enter(&mut self, destination: &str, force: bool) -> ResolveResult<String> {
        let target = self.require(destination)?;
        let name = target.display_name();

        if !target.has_trait(PLACE) {
            return Err(ResolveError::NotPlace(name));
        }
        if self.agent()?.location().contains(destination) {
            return Err(ResolveError::AlreadyThere(name));
        }
        if !force && !self.reachable().contains(destination) {
            return Err(ResolveError::Unreachable(name));
        }

        let utterance = target.utterance.clone().unwrap_or_default();
        let win_phrase = self.config.win_phrase.clone();

        let agent = self.agent_mut()?;
        *agent.containment.get_mut(Preposition::In) = BTreeSet::from([destination.to_string()]);
        tracing::info!(location = %destination, forced = force, "agent moved");

        if !win_phrase.is_empty() && utterance.contains(&win_phrase) {
            agent.traits.insert(WINNER.to_string());
            tracing::info!(location = %destination, "agent won");
        }

        Ok(utterance)
    }

    /// Pick up something the agent can see or already holds.
    pub fn take(&mut self, name: &str) -> ResolveResult<()> {
        if self.is_agent(name) {
            return Err(ResolveError::CannotTakeSelf);
        }
        if !self.can_see(name, true)? {
            return Err(ResolveError::NotFound(name.to_string()));
        }

        self.require_mut(name)?.containment.clear();
        let opposites = self.config.opposites.clone();
        self.agent_mut()?
            .insert(SetRelation::Possessions, name, &opposites);
        tracing::debug!(item = %name, "taken");
        Ok(())
    }

    /// Put a held item down wherever the agent is.
    pub fn drop_item(&mut self, name: &str) -> ResolveResult<()> {
        let agent = self.agent()?;
        if !agent.possessions.contains(name) {
            return Err(ResolveError::NotHeld(self.display_name(name)));
        }
        let here = agent.location().clone();

        self.require_mut(name)?
            .containment
            .get_mut(Preposition::In)
            .extend(here);
        self.agent_mut()?.possessions.remove(name);
        tracing::debug!(item = %name, "dropped");
        Ok(())
    }

    /// Every declared capability as `(verb, object key)`, sorted by object then verb.
    pub fn capabilities(&self) -> Vec<(String, String)> {
        let mut capabilities: Vec<(String, String)> = self
            .entities()
            .flat_map(|entity| {
                entity
                    .triggers
                    .keys()
                    .map(move |verb| (verb.clone(), entity.key.clone()))
            })
            .collect();
        capabilities.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        capabilities
    }
}
