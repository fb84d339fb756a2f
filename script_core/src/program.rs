//! A compiled program and the queries the command layer runs against it.

use std::path::Path;

use thiserror::Error;
use world_graph::{
    canonical_key, comma_join, Entity, Preposition, ResolveError, ResolveResult, WorldConfig,
    WorldState, WINNER,
};

use crate::compiler::{CompileError, Compiler};
use crate::normalize::normalize;
use crate::rules::RuleBook;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// A world compiled from a script, together with its rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub(crate) world: WorldState,
    pub(crate) rules: RuleBook,
}

impl Program {
    /// Compile a script with the default configuration.
    pub fn compile(source: &str) -> Result<Self, CompileError> {
        Self::compile_with_config(source, WorldConfig::default())
    }

    /// Compile a script line by line, stopping at the first rejected line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn compile_with_config(source: &str, config: WorldConfig) -> Result<Self, CompileError> {
        let mut world = WorldState::with_config(config);
        let mut rules = RuleBook::new();
        let mut compiler = Compiler::new(&mut world, &mut rules);

        for (index, raw) in source.lines().enumerate() {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let sentence = normalize(trimmed);
            if sentence.is_empty() {
                continue;
            }

            compiler.compile(&sentence).map_err(|reason| CompileError {
                line: index + 1,
                text: raw.to_string(),
                reason,
            })?;
        }

        tracing::info!(entities = world.entity_count(), rules = rules.len(), "program compiled");
        Ok(Self { world, rules })
    }

    /// Read and compile a script file.
    pub fn load(path: impl AsRef<Path>, config: WorldConfig) -> Result<Self, LoadError> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::compile_with_config(&source, config)?)
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    pub fn has_won(&self) -> bool {
        self.world
            .agent()
            .map(|agent| agent.has_trait(WINNER))
            .unwrap_or(false)
    }

    fn names<'a>(&self, keys: impl IntoIterator<Item = &'a String>) -> Vec<String> {
        keys.into_iter()
            .map(|key| self.world.display_name(key))
            .collect()
    }

    pub fn where_am_i(&self) -> String {
        let Ok(agent) = self.world.agent() else {
            return "you are nowhere".to_string();
        };
        let here = agent.location();
        if here.is_empty() {
            return "you are nowhere".to_string();
        }

        let mut reply = format!("you are in {}", comma_join(&self.names(here), "and"));
        let spoken = here
            .iter()
            .filter_map(|key| self.world.get(key))
            .filter_map(|place| place.utterance.as_deref());
        for line in spoken {
            reply.push('\n');
            reply.push_str(line);
        }
        reply
    }

    pub fn who_am_i(&self) -> String {
        match self.world.agent() {
            Ok(agent) if !agent.traits.is_empty() => {
                format!("you are {}", comma_join(&self.names(&agent.traits), "and"))
            }
            _ => "you are nobody in particular".to_string(),
        }
    }

    pub fn what_do_i_have(&self) -> String {
        match self.world.agent() {
            Ok(agent) if !agent.possessions.is_empty() => {
                format!("you have {}", comma_join(&self.names(&agent.possessions), "and"))
            }
            _ => "you have nothing".to_string(),
        }
    }

    pub fn what_can_i_do(&self) -> String {
        let capabilities: Vec<String> = self
            .world
            .capabilities()
            .into_iter()
            .map(|(verb, key)| format!("{} {}", verb, self.world.display_name(&key)))
            .collect();

        if capabilities.is_empty() {
            "you cannot do anything special".to_string()
        } else {
            format!("you can {}", comma_join(&capabilities, "or"))
        }
    }

    pub fn look_around(&self) -> String {
        let visible = self.world.visible();
        let mut reply = if visible.is_empty() {
            "you see nothing".to_string()
        } else {
            format!("you see {}", comma_join(&self.names(&visible), "and"))
        };

        let reachable = self.world.reachable();
        if !reachable.is_empty() {
            reply.push_str(&format!(
                "\nyou can go to {}",
                comma_join(&self.names(&reachable), "or")
            ));
        }
        reply
    }

    /// Describe everything known about a visible or held entity.
    pub fn look_at(&self, name: &str) -> ResolveResult<String> {
        let key = canonical_key(name);
        let entity = self.world.require(&key)?;
        if !self.world.can_see(&key, true)? {
            return Err(ResolveError::NotVisible(entity.display_name()));
        }
        Ok(self.describe(entity))
    }

    fn describe(&self, entity: &Entity) -> String {
        let name = entity.display_name();
        let mut lines = Vec::new();

        if let Some(utterance) = &entity.utterance {
            lines.push(format!("{name} says \"{utterance}\""));
        }
        if !entity.traits.is_empty() {
            lines.push(format!("{name} is {}", comma_join(&self.names(&entity.traits), "and")));
        }
        for preposition in Preposition::ALL {
            let set = entity.containment.get(preposition);
            if !set.is_empty() {
                lines.push(format!(
                    "{name} is {preposition} {}",
                    comma_join(&self.names(set), "and")
                ));
            }
        }
        if !entity.possessions.is_empty() {
            lines.push(format!(
                "{name} has {}",
                comma_join(&self.names(&entity.possessions), "and")
            ));
        }
        if !entity.exits.is_empty() {
            lines.push(format!(
                "{name} leads to {}",
                comma_join(&self.names(&entity.exits), "and")
            ));
        }
        for (key, value) in &entity.properties {
            lines.push(format!("the {key} of {name} is {value}"));
        }

        if lines.is_empty() {
            format!("you see nothing special about {name}")
        } else {
            lines.join("\n")
        }
    }

    /// Walk to a reachable place.
    pub fn enter(&mut self, name: &str) -> ResolveResult<String> {
        let key = canonical_key(name);
        let utterance = self.world.enter(&key, false)?;
        if utterance.is_empty() {
            Ok(format!("you are in {}", self.world.display_name(&key)))
        } else {
            Ok(utterance)
        }
    }

    pub fn take(&mut self, name: &str) -> ResolveResult<String> {
        let key = canonical_key(name);
        self.world.take(&key)?;
        Ok(format!("you take {}", self.world.display_name(&key)))
    }

    pub fn drop_item(&mut self, name: &str) -> ResolveResult<String> {
        let key = canonical_key(name);
        self.world.drop_item(&key)?;
        Ok(format!("you drop {}", self.world.display_name(&key)))
    }

    /// Perform a verb on an entity, firing every rule attached to it.
    pub fn act(&mut self, verb: &str, name: &str) -> ResolveResult<String> {
        let key = canonical_key(name);
        let verb = verb.to_lowercase();

        if !self.world.can_see(&key, true)? {
            return Err(ResolveError::NotVisible(self.world.display_name(&key)));
        }
        let ids = self
            .world
            .require(&key)?
            .rules_for(&verb)
            .map(<[_]>::to_vec)
            .ok_or_else(|| ResolveError::NoSuchCapability {
                verb: verb.clone(),
                name: self.world.display_name(&key),
            })?;

        tracing::debug!(verb = %verb, target = %key, rules = ids.len(), "acting");
        Ok(self.rules.fire_all(&ids, &mut self.world))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUSE: &str = r#"
# a tiny house
the bedroom is a place
the bathroom is a place
you are in the bedroom
the bedroom says "a small bedroom"
the bathroom says "you win"
the door is in the bedroom
the door is locked
the door leads to the bathroom
the lamp is in the bedroom
you can unlock the door
if you unlock the door then the door is unlocked
"#;

    #[test]
    fn test_compile_error_names_line() {
        let err = Program::compile("the cat is red\n\nthe cat sleeps soundly.").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.text, "the cat sleeps soundly.");
        assert!(err.to_string().starts_with("line 3:"));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let program = Program::compile("# nothing here\n\n   # indented comment\n").unwrap();
        assert_eq!(program.world().entity_count(), 1);
    }

    #[test]
    fn test_where_and_who() {
        let program = Program::compile(HOUSE).unwrap();
        assert_eq!(program.where_am_i(), "you are in the bedroom\na small bedroom");
        assert_eq!(program.who_am_i(), "you are nobody in particular");
        assert_eq!(program.what_do_i_have(), "you have nothing");
        assert_eq!(program.what_can_i_do(), "you can unlock the door");
    }

    #[test]
    fn test_look_around() {
        let program = Program::compile(HOUSE).unwrap();
        assert_eq!(
            program.look_around(),
            "you see the bedroom, the door, and the lamp"
        );
    }

    #[test]
    fn test_look_at() {
        let program = Program::compile(HOUSE).unwrap();
        let description = program.look_at("the door").unwrap();
        assert!(description.contains("the door is locked"));
        assert!(description.contains("the door is in the bedroom"));
        assert!(description.contains("the door leads to the bathroom"));

        assert_eq!(
            program.look_at("bathroom"),
            Err(ResolveError::NotVisible("the bathroom".to_string()))
        );
        assert_eq!(
            program.look_at("unicorn"),
            Err(ResolveError::NotFound("unicorn".to_string()))
        );
    }

    #[test]
    fn test_unlock_then_enter() {
        let mut program = Program::compile(HOUSE).unwrap();

        assert_eq!(
            program.enter("the bathroom"),
            Err(ResolveError::Unreachable("the bathroom".to_string()))
        );
        assert_eq!(program.act("unlock", "the door").unwrap(), "the door is unlocked");

        let door = program.world().get("door").unwrap();
        assert!(door.has_trait("unlocked"));
        assert!(!door.has_trait("locked"));

        assert_eq!(program.enter("the bathroom").unwrap(), "you win");
        assert!(program.has_won());
        assert_eq!(program.who_am_i(), "you are winner");
    }

    #[test]
    fn test_act_failures() {
        let mut program = Program::compile(HOUSE).unwrap();
        assert_eq!(
            program.act("kick", "lamp"),
            Err(ResolveError::NoSuchCapability {
                verb: "kick".to_string(),
                name: "the lamp".to_string()
            })
        );
        assert_eq!(
            program.act("unlock", "bathroom"),
            Err(ResolveError::NotVisible("the bathroom".to_string()))
        );
    }

    #[test]
    fn test_capability_granted_by_rule() {
        let script = "you are in the hall\nthe box is in the hall\nthe lid is in the hall\nif you open the box then you can lift the lid";
        let mut program = Program::compile(script).unwrap();
        assert_eq!(program.rules().len(), 1);

        assert_eq!(
            program.act("lift", "lid"),
            Err(ResolveError::NoSuchCapability {
                verb: "lift".to_string(),
                name: "the lid".to_string()
            })
        );
        assert_eq!(program.act("open", "box").unwrap(), "you can lift the lid");
        assert_eq!(program.act("lift", "the lid").unwrap(), "nothing happened");
        assert_eq!(program.what_can_i_do(), "you can open the box or lift the lid");
    }

    #[test]
    fn test_declared_capability_without_rule() {
        let mut program = Program::compile("you are in the hall\nthe box is in the hall\nyou can open the box").unwrap();
        assert_eq!(program.act("open", "box").unwrap(), "nothing happened");
    }

    #[test]
    fn test_take_and_drop_messages() {
        let mut program = Program::compile(HOUSE).unwrap();
        assert_eq!(program.take("the lamp").unwrap(), "you take the lamp");
        assert_eq!(program.what_do_i_have(), "you have the lamp");
        assert_eq!(program.drop_item("lamp").unwrap(), "you drop the lamp");
        assert_eq!(
            program.drop_item("lamp"),
            Err(ResolveError::NotHeld("the lamp".to_string()))
        );
        assert_eq!(program.take("you"), Err(ResolveError::CannotTakeSelf));
    }
}
