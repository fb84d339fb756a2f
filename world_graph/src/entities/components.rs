//! Relation containers attached to every entity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::mechanics::{Opposites, Preposition};

/// A duplicate-free set of keys or trait tokens.
pub type KeySet = BTreeSet<String>;

/// Insert `value`, evicting its opposite first.
///
/// Returns whether the set changed.
pub fn insert_exclusive(set: &mut KeySet, value: &str, opposites: &Opposites) -> bool {
    let evicted = opposites
        .opposite_of(value)
        .map(|opposite| set.remove(opposite))
        .unwrap_or(false);
    let inserted = set.insert(value.to_string());
    evicted || inserted
}

/// The four independent spatial relations.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Containment {
    #[serde(rename = "in")]
    pub inside: KeySet,
    pub on: KeySet,
    pub under: KeySet,
    pub near: KeySet,
}

impl Containment {
    pub fn get(&self, preposition: Preposition) -> &KeySet {
        match preposition {
            Preposition::In => &self.inside,
            Preposition::On => &self.on,
            Preposition::Under => &self.under,
            Preposition::Near => &self.near,
        }
    }

    pub fn get_mut(&mut self, preposition: Preposition) -> &mut KeySet {
        match preposition {
            Preposition::In => &mut self.inside,
            Preposition::On => &mut self.on,
            Preposition::Under => &mut self.under,
            Preposition::Near => &mut self.near,
        }
    }

    /// Detach from the spatial graph entirely.
    pub fn clear(&mut self) {
        self.inside.clear();
        self.on.clear();
        self.under.clear();
        self.near.clear();
    }

    pub fn is_empty(&self) -> bool {
        Preposition::ALL.iter().all(|p| self.get(*p).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_exclusive_evicts_opposite() {
        let opposites = Opposites::default();
        let mut set = KeySet::new();

        insert_exclusive(&mut set, "visible", &opposites);
        insert_exclusive(&mut set, "invisible", &opposites);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["invisible"]);

        insert_exclusive(&mut set, "visible", &opposites);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["visible"]);
    }

    #[test]
    fn test_insert_exclusive_keeps_unrelated_traits() {
        let opposites = Opposites::default();
        let mut set = KeySet::new();

        insert_exclusive(&mut set, "red", &opposites);
        insert_exclusive(&mut set, "locked", &opposites);
        insert_exclusive(&mut set, "unlocked", &opposites);

        assert!(set.contains("red"));
        assert!(set.contains("unlocked"));
        assert!(!set.contains("locked"));
    }

    #[test]
    fn test_insert_exclusive_reports_change() {
        let opposites = Opposites::default();
        let mut set = KeySet::new();

        assert!(insert_exclusive(&mut set, "locked", &opposites));
        assert!(!insert_exclusive(&mut set, "locked", &opposites));
    }

    #[test]
    fn test_containment_clear() {
        let mut containment = Containment::default();
        containment.get_mut(Preposition::On).insert("table".to_string());
        containment.get_mut(Preposition::In).insert("kitchen".to_string());
        assert!(!containment.is_empty());

        containment.clear();
        assert!(containment.is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn opposite_traits_never_coexist(ops in proptest::collection::vec(0usize..4, 1..40)) {
            let tokens = ["visible", "invisible", "locked", "unlocked"];
            let opposites = Opposites::default();
            let mut set = KeySet::new();

            for op in &ops {
                insert_exclusive(&mut set, tokens[*op], &opposites);
            }

            prop_assert!(!(set.contains("visible") && set.contains("invisible")));
            prop_assert!(!(set.contains("locked") && set.contains("unlocked")));
            let last = tokens[*ops.last().unwrap()];
            prop_assert!(set.contains(last));
        }
    }
}
