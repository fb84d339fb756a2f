//! Clauses - classified sentences bound to a concrete world relation.

use serde::{Deserialize, Serialize};
use world_graph::{
    canonical_key, NounPhrase, Relation, ResolveError, ResolveResult, SetRelation, WorldState,
    PLACE,
};

use super::pattern::{classify, RelationKind, Statement};

/// The object side of a clause: another entity, or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Entity(NounPhrase),
    Text(String),
}

impl Operand {
    /// The entity key, or the text itself.
    pub fn as_str(&self) -> &str {
        match self {
            Operand::Entity(phrase) => &phrase.key,
            Operand::Text(text) => text,
        }
    }

    pub fn entity(&self) -> Option<&NounPhrase> {
        match self {
            Operand::Entity(phrase) => Some(phrase),
            Operand::Text(_) => None,
        }
    }
}

/// One "subject relation object" fact, used as a declaration, condition or effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub subject: NounPhrase,
    /// Linking words as written, for messages.
    pub verb: String,
    pub relation: Relation,
    pub object: Operand,
}

impl Clause {
    /// Classify a sentence and bind it to a relation.
    pub fn parse(sentence: &str) -> Option<Self> {
        classify(sentence).map(Self::from_statement)
    }

    pub fn from_statement(statement: Statement) -> Self {
        let Statement {
            kind,
            subject,
            verb,
            object,
            key,
        } = statement;

        let entity = |text: &str| Operand::Entity(NounPhrase::parse(text));
        let (relation, object) = match kind {
            RelationKind::Says => (Relation::Utterance, Operand::Text(object)),
            RelationKind::Attribute => (
                Relation::Property(canonical_key(key.as_deref().unwrap_or_default())),
                Operand::Text(object),
            ),
            RelationKind::Containment(preposition) => (
                Relation::Set(SetRelation::Containment(preposition)),
                entity(&object),
            ),
            RelationKind::Trait => (Relation::Set(SetRelation::Traits), entity(&object)),
            RelationKind::Capability => (Relation::Capability(verb.clone()), entity(&object)),
            RelationKind::Possession => (Relation::Set(SetRelation::Possessions), entity(&object)),
            RelationKind::Exit => (Relation::Set(SetRelation::Exits), entity(&object)),
        };

        Self {
            subject: NounPhrase::parse(&subject),
            verb,
            relation,
            object,
        }
    }

    /// Whether the clause is currently true of the world.
    ///
    /// A missing subject makes it false, as does any relation that is neither a set
    /// nor a property.
    pub fn holds(&self, world: &WorldState) -> bool {
        let Some(subject) = world.get(&self.subject.key) else {
            return false;
        };

        match &self.relation {
            Relation::Set(relation) => subject.holds(*relation, self.object.as_str()),
            Relation::Property(key) => subject.property(key) == Some(self.object.as_str()),
            Relation::Utterance | Relation::Capability(_) => false,
        }
    }

    /// Make the clause true, returning a message describing the change.
    ///
    /// Fails with `NotFound` when the subject is missing; nothing is changed then.
    pub fn apply(&self, world: &mut WorldState) -> ResolveResult<String> {
        let subject = self.subject.key.as_str();
        if !world.contains(subject) {
            return Err(ResolveError::NotFound(subject.to_string()));
        }
        let object = self.object.as_str();

        match &self.relation {
            Relation::Set(relation) => {
                world.relate(subject, *relation, object)?;
                if *relation == SetRelation::Exits && world.contains(object) {
                    world.relate(object, SetRelation::Traits, PLACE)?;
                }
                Ok(format!(
                    "{} {} {}",
                    world.display_name(subject),
                    self.verb,
                    world.display_name(object)
                ))
            }
            Relation::Property(key) => {
                world.require_mut(subject)?.set_property(key.as_str(), object);
                Ok(format!(
                    "the {} of {} {} {}",
                    key,
                    world.display_name(subject),
                    self.verb,
                    object
                ))
            }
            Relation::Utterance => {
                world.require_mut(subject)?.utterance = Some(object.to_string());
                Ok(format!("{} says \"{}\"", world.display_name(subject), object))
            }
            Relation::Capability(verb) => {
                world.require_mut(object)?.declare_trigger(verb.as_str());
                Ok(format!(
                    "{} can {} {}",
                    world.display_name(subject),
                    verb,
                    world.display_name(object)
                ))
            }
        }
    }

    /// Create the subject and any entity object.
    pub fn create_entities(&self, world: &mut WorldState) {
        world.upsert(&self.subject);
        if let Some(object) = self.object.entity() {
            world.upsert(object);
        }
    }
}

/// Split a conjunction on commas and "and", ignoring separators inside quotes.
pub fn split_clauses(text: &str) -> Vec<String> {
    let mut clauses = Vec::new();
    let mut start = 0;
    let mut quoted = false;

    for (index, c) in text.char_indices() {
        if index < start {
            continue;
        }
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                clauses.push(&text[start..index]);
                start = index + 1;
            }
            ' ' if !quoted && is_and(&text[index..]) => {
                clauses.push(&text[start..index]);
                start = index + " and ".len();
            }
            _ => {}
        }
    }
    clauses.push(&text[start..]);

    clauses
        .into_iter()
        .map(|clause| {
            let clause = clause.trim();
            strip_prefix_ci(clause, "and ").unwrap_or(clause).trim().to_string()
        })
        .filter(|clause| !clause.is_empty())
        .collect()
}

fn is_and(rest: &str) -> bool {
    rest.get(..5)
        .is_some_and(|head| head.eq_ignore_ascii_case(" and "))
}

/// Strip an ASCII prefix, ignoring case.
pub fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}
