//! Whole-program snapshots: the world and its rules, saved and restored together.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use world_graph::WorldState;

use crate::program::Program;
use crate::rules::RuleBook;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to access snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid snapshot: {0}")]
    Format(#[from] serde_json::Error),
}

/// Everything needed to resume play exactly where it stopped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub world: WorldState,
    pub rules: RuleBook,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(source: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(source)?)
    }
}

impl Program {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            world: self.world.clone(),
            rules: self.rules.clone(),
        }
    }

    /// Replace the whole program with a snapshot.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.world = snapshot.world;
        self.rules = snapshot.rules;
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        std::fs::write(path, self.snapshot().to_json()?)?;
        Ok(())
    }

    pub fn load_snapshot(&mut self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let source = std::fs::read_to_string(path)?;
        self.restore(Snapshot::from_json(&source)?);
        tracing::info!(entities = self.world.entity_count(), rules = self.rules.len(), "snapshot restored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
the hall is a place
you are in the hall
the box is in the hall
you can open the box
if you open the box then the box is open and the box says "creak, creak"
"#;

    #[test]
    fn test_snapshot_preserves_rules_and_state() {
        let mut program = Program::compile(SCRIPT).unwrap();
        program.take("box").unwrap();

        let json = program.snapshot().to_json().unwrap();
        let mut restored = Program::default();
        restored.restore(Snapshot::from_json(&json).unwrap());

        assert_eq!(restored, program);
        assert_eq!(
            restored.act("open", "box").unwrap(),
            "the box is open\nthe box says \"creak, creak\""
        );
    }

    #[test]
    fn test_restore_replaces_world() {
        let mut program = Program::compile(SCRIPT).unwrap();
        let before = program.snapshot();

        program.act("open", "box").unwrap();
        assert!(program.world().get("box").unwrap().has_trait("open"));

        program.restore(before);
        assert!(!program.world().get("box").unwrap().has_trait("open"));
    }

    #[test]
    fn test_invalid_snapshot() {
        assert!(matches!(
            Snapshot::from_json("{\"world\": 3}"),
            Err(SnapshotError::Format(_))
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("storyscript-{}.json", uuid::Uuid::new_v4()));
        let mut program = Program::compile(SCRIPT).unwrap();
        program.save(&path).unwrap();

        program.take("box").unwrap();
        program.load_snapshot(&path).unwrap();
        assert_eq!(program.what_do_i_have(), "you have nothing");

        std::fs::remove_file(&path).unwrap();
    }
}
