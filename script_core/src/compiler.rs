//! The statement compiler - turns script sentences into world facts and rules.
//!
//! A declarative sentence mutates the world directly. A conditional sentence
//! ("if you kick the table then the key is visible") compiles into an [`Event`]
//! attached to the entity the trigger verb acts on.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use world_graph::{NounPhrase, Relation, ResolveError, WorldState};

use crate::grammar::{split_clauses, strip_prefix_ci, Clause};
use crate::rules::{Event, RuleBook};

/// Words that stand for the subject of the previous sentence.
const PRONOUNS: [&str; 4] = ["it", "he", "she", "they"];

static CONDITIONAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^if (?P<conditions>.+?),? then (?P<effects>.+)$")
        .expect("conditional pattern must compile")
});

/// Why a sentence was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileErrorKind {
    #[error("sentence matches no known shape")]
    NoPatternMatched,

    #[error("first condition must read \"{agent} <verb> <object>\"")]
    BadTrigger { agent: String },

    #[error("effect \"{clause}\" matches no known shape")]
    BadEffect { clause: String },

    #[error("conditional sentence is missing \"then\"")]
    MissingThen,

    #[error("only {agent} can declare a capability")]
    CapabilityNotAgent { agent: String },

    #[error("\"{pronoun}\" does not refer to anything yet")]
    DanglingPronoun { pronoun: String },

    #[error(transparent)]
    World(#[from] ResolveError),
}

/// A rejected script line. Compilation stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}: {text}")]
pub struct CompileError {
    /// 1-based line number.
    pub line: usize,
    /// The line as written.
    pub text: String,
    pub reason: CompileErrorKind,
}

fn is_pronoun(phrase: &NounPhrase) -> bool {
    PRONOUNS.contains(&phrase.key.as_str())
}

/// Replace a pronoun subject with `antecedent`.
fn refer_to(mut clause: Clause, antecedent: &NounPhrase) -> Clause {
    if is_pronoun(&clause.subject) {
        clause.subject = antecedent.clone();
    }
    clause
}

/// Compiles sentences into a world and rule book it borrows.
pub struct Compiler<'a> {
    world: &'a mut WorldState,
    rules: &'a mut RuleBook,
    last_subject: Option<NounPhrase>,
}

impl<'a> Compiler<'a> {
    pub fn new(world: &'a mut WorldState, rules: &'a mut RuleBook) -> Self {
        Self {
            world,
            rules,
            last_subject: None,
        }
    }

    /// Compile one normalized sentence.
    ///
    /// A rejected sentence leaves the world untouched.
    pub fn compile(&mut self, sentence: &str) -> Result<(), CompileErrorKind> {
        match CONDITIONAL.captures(sentence) {
            Some(caps) => self.compile_conditional(&caps["conditions"], &caps["effects"]),
            None if strip_prefix_ci(sentence, "if ").is_some() => Err(CompileErrorKind::MissingThen),
            None => self.compile_declaration(sentence),
        }
    }

    fn compile_declaration(&mut self, sentence: &str) -> Result<(), CompileErrorKind> {
        let mut clause = Clause::parse(sentence).ok_or(CompileErrorKind::NoPatternMatched)?;

        if is_pronoun(&clause.subject) {
            clause.subject = self
                .last_subject
                .clone()
                .ok_or_else(|| CompileErrorKind::DanglingPronoun {
                    pronoun: clause.subject.key.clone(),
                })?;
        }
        self.check_capability(&clause)?;

        clause.create_entities(self.world);
        clause.apply(self.world)?;
        tracing::debug!(subject = %clause.subject.key, verb = %clause.verb, object = %clause.object.as_str(), "declared");

        self.last_subject = Some(clause.subject);
        Ok(())
    }

    fn compile_conditional(&mut self, conditions: &str, effects: &str) -> Result<(), CompileErrorKind> {
        let conditions = split_clauses(conditions);
        let (trigger, rest) = conditions.split_first().ok_or_else(|| self.bad_trigger())?;
        let (verb, target) = self.parse_trigger(trigger)?;

        // Pronouns inside a rule stand for the object the trigger verb acts on.
        let conditions: Vec<Clause> = rest
            .iter()
            .filter_map(|text| {
                let clause = Clause::parse(text);
                if clause.is_none() {
                    tracing::debug!(clause = %text, "dropped unrecognized condition");
                }
                clause
            })
            .map(|clause| refer_to(clause, &target))
            .collect();

        let effects = split_clauses(effects)
            .into_iter()
            .map(|text| match Clause::parse(&text) {
                Some(clause) => Ok(refer_to(clause, &target)),
                None => Err(CompileErrorKind::BadEffect { clause: text }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        for effect in &effects {
            self.check_capability(effect)?;
        }

        let target_key = self.world.upsert(&target);
        for effect in &effects {
            effect.create_entities(self.world);
        }

        let event = Event::new(verb.clone(), target_key.clone(), conditions, effects);
        let id = self.rules.insert(event);
        if let Some(entity) = self.world.get_mut(&target_key) {
            entity.attach_rule(verb.clone(), id);
        }
        tracing::debug!(rule = %id, verb = %verb, target = %target_key, "registered rule");
        Ok(())
    }

    /// Split "you <verb> <object>" into the verb and the object phrase.
    fn parse_trigger(&self, clause: &str) -> Result<(String, NounPhrase), CompileErrorKind> {
        let mut words = clause.splitn(3, ' ');
        let (Some(agent), Some(verb), Some(object)) = (words.next(), words.next(), words.next())
        else {
            return Err(self.bad_trigger());
        };

        let object = NounPhrase::parse(object);
        if !agent.eq_ignore_ascii_case(self.world.agent_key()) || object.is_empty() {
            return Err(self.bad_trigger());
        }
        Ok((verb.to_lowercase(), object))
    }

    fn check_capability(&self, clause: &Clause) -> Result<(), CompileErrorKind> {
        match clause.relation {
            Relation::Capability(_) if !self.world.is_agent(&clause.subject.key) => {
                Err(CompileErrorKind::CapabilityNotAgent {
                    agent: self.world.agent_key().to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    fn bad_trigger(&self) -> CompileErrorKind {
        CompileErrorKind::BadTrigger {
            agent: self.world.agent_key().to_string(),
        }
    }
}
