//! The pattern table - ordered sentence shapes, first match wins.

use once_cell::sync::Lazy;
use regex::Regex;
use world_graph::Preposition;

/// What a matched sentence declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// `S says "text"`
    Says,
    /// `[the] K of S is V`
    Attribute,
    /// `S is in|on|under|near O`
    Containment(Preposition),
    /// `S is O`
    Trait,
    /// `S can V O`
    Capability,
    /// `S has O`
    Possession,
    /// `S leads to O`
    Exit,
}

/// The parts captured from a sentence.
///
/// `verb` holds the linking words as written ("is on", "has", "leads to"), except
/// for capabilities where it is the capability verb itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub kind: RelationKind,
    pub subject: String,
    pub verb: String,
    pub object: String,
    /// Property name, for attributes only.
    pub key: Option<String>,
}

struct Pattern {
    kind: RelationKind,
    regex: Regex,
}

impl Pattern {
    fn new(kind: RelationKind, pattern: &str) -> Self {
        let regex = Regex::new(&format!("(?i)^{pattern}$")).expect("sentence pattern must compile");
        Self { kind, regex }
    }

    fn capture(&self, sentence: &str) -> Option<Statement> {
        let caps = self.regex.captures(sentence)?;
        let part = |name: &str| caps.name(name).map(|m| m.as_str().trim().to_string());

        Some(Statement {
            kind: self.kind,
            subject: part("subject")?,
            verb: part("verb")?.to_lowercase(),
            object: part("object")?,
            key: part("key"),
        })
    }
}

/// Shapes in priority order. Prepositional shapes must precede the generic trait
/// shape or "the cat is on the table" would read as the trait "on the table".
static PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    let mut patterns = vec![
        Pattern::new(
            RelationKind::Says,
            r#"(?P<subject>.+?) (?P<verb>says) "(?P<object>[^"]*)""#,
        ),
        Pattern::new(
            RelationKind::Attribute,
            r"(?:the )?(?P<key>.+?) of (?P<subject>.+?) (?P<verb>is|are|becomes) (?P<object>.+)",
        ),
    ];

    for preposition in Preposition::ALL {
        patterns.push(Pattern::new(
            RelationKind::Containment(preposition),
            &format!(
                r"(?P<subject>.+?) (?P<verb>(?:is|are|moves) {}) (?P<object>.+)",
                preposition.as_str()
            ),
        ));
    }

    patterns.extend([
        Pattern::new(
            RelationKind::Trait,
            r"(?P<subject>.+?) (?P<verb>is|are|becomes) (?P<object>.+)",
        ),
        Pattern::new(
            RelationKind::Capability,
            r"(?P<subject>.+?) can (?P<verb>\S+) (?P<object>.+)",
        ),
        Pattern::new(
            RelationKind::Possession,
            r"(?P<subject>.+?) (?P<verb>has|have) (?P<object>.+)",
        ),
        Pattern::new(
            RelationKind::Exit,
            r"(?P<subject>.+?) (?P<verb>leads to) (?P<object>.+)",
        ),
    ]);

    patterns
});

/// Classify a normalized sentence by the first shape it matches.
pub fn classify(sentence: &str) -> Option<Statement> {
    PATTERNS.iter().find_map(|pattern| pattern.capture(sentence))
}
