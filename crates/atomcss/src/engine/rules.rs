//! The table of generated rules and its assembly into output rules.

use indexmap::IndexMap;

use crate::stylesheet::{Declaration, RenderedRule, Selector};

/// A rule produced by the atomizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedRule {
    /// One declaration under one atomic class.
    Atomic {
        class_name: String,
        pseudo_suffix: String,
        declaration: Declaration,
    },
    /// A non-class rule copied through unchanged.
    Passthrough {
        selectors: Vec<String>,
        declarations: Vec<Declaration>,
    },
}

impl GeneratedRule {
    pub fn atomic(
        class_name: impl Into<String>,
        pseudo_suffix: impl Into<String>,
        declaration: Declaration,
    ) -> Self {
        GeneratedRule::Atomic {
            class_name: class_name.into(),
            pseudo_suffix: pseudo_suffix.into(),
            declaration,
        }
    }

    /// A passthrough rule for `selectors`, keeping every declaration.
    pub fn passthrough<'a>(
        selectors: impl IntoIterator<Item = &'a Selector>,
        declarations: &[Declaration],
    ) -> Self {
        GeneratedRule::Passthrough {
            selectors: selectors.into_iter().map(|s| s.original.clone()).collect(),
            declarations: declarations.to_vec(),
        }
    }

    /// Table key: the rendered selector of an atomic rule, or the joined
    /// original selectors of a passthrough rule.
    pub fn key(&self) -> String {
        match self {
            GeneratedRule::Atomic {
                class_name,
                pseudo_suffix,
                ..
            } => format!("{}{}", class_name, pseudo_suffix),
            GeneratedRule::Passthrough { selectors, .. } => selectors.join(", "),
        }
    }

    pub fn to_rendered(&self) -> RenderedRule {
        match self {
            GeneratedRule::Atomic { declaration, .. } => {
                RenderedRule::new(vec![self.key()], vec![declaration.clone()])
            }
            GeneratedRule::Passthrough {
                selectors,
                declarations,
            } => RenderedRule::new(selectors.clone(), declarations.clone()),
        }
    }
}

/// Table slot. Atomic rules are unique by rendered selector; every
/// passthrough rule gets its own slot even when selector texts repeat.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Slot {
    text: String,
    passthrough: Option<usize>,
}

/// Insertion-ordered table of generated rules, keyed by [`GeneratedRule::key`].
///
/// Inserting an atomic rule whose key already exists replaces it in place.
/// Passthrough rules are always appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedRules {
    rules: IndexMap<Slot, GeneratedRule>,
    passthrough_count: usize,
}

impl GeneratedRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rule: GeneratedRule) {
        let passthrough = match rule {
            GeneratedRule::Atomic { .. } => None,
            GeneratedRule::Passthrough { .. } => {
                self.passthrough_count += 1;
                Some(self.passthrough_count)
            }
        };
        let slot = Slot {
            text: rule.key(),
            passthrough,
        };
        self.rules.insert(slot, rule);
    }

    /// Looks up an atomic rule by its rendered selector.
    pub fn get(&self, key: &str) -> Option<&GeneratedRule> {
        self.rules.get(&Slot {
            text: key.to_string(),
            passthrough: None,
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.rules.keys().map(|slot| &slot.text)
    }

    pub fn values(&self) -> impl Iterator<Item = &GeneratedRule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Builds a copy with atomic class names replaced through `mapping`.
    ///
    /// Rules that are not renamed come first in their table order, followed
    /// by the renamed rules in theirs. Renamed rules keep their pseudo suffix.
    pub fn renamed(&self, mapping: &IndexMap<String, String>) -> GeneratedRules {
        let (renamed, kept): (Vec<&GeneratedRule>, Vec<&GeneratedRule>) =
            self.rules.values().partition(|rule| match rule {
                GeneratedRule::Atomic { class_name, .. } => mapping.contains_key(class_name),
                GeneratedRule::Passthrough { .. } => false,
            });

        let mut table = GeneratedRules::new();
        for rule in kept {
            table.insert(rule.clone());
        }
        for rule in renamed {
            if let GeneratedRule::Atomic {
                class_name,
                pseudo_suffix,
                declaration,
            } = rule
            {
                table.insert(GeneratedRule::atomic(
                    mapping.get(class_name).unwrap_or(class_name).clone(),
                    pseudo_suffix.clone(),
                    declaration.clone(),
                ));
            }
        }
        table
    }

    /// Assembles the table into the ordered rule list the stringifier consumes.
    pub fn to_rule_list(&self) -> Vec<RenderedRule> {
        self.rules.values().map(GeneratedRule::to_rendered).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stylesheet::SelectorChunk;

    #[test]
    fn test_atomic_key_includes_pseudo_suffix() {
        let rule = GeneratedRule::atomic(
            ".rp__color__--COLONred___-HOVER",
            ":hover",
            Declaration::new("color", "red"),
        );
        assert_eq!(rule.key(), ".rp__color__--COLONred___-HOVER:hover");
        assert_eq!(
            rule.to_rendered(),
            RenderedRule::new(
                vec![".rp__color__--COLONred___-HOVER:hover".into()],
                vec![Declaration::new("color", "red")]
            )
        );
    }

    #[test]
    fn test_passthrough_keeps_all_selectors() {
        let selectors = vec![
            Selector::new(vec![SelectorChunk::Tag("h1".into())], "h1"),
            Selector::new(vec![SelectorChunk::Tag("h2".into())], "h2"),
        ];
        let declarations = vec![Declaration::new("margin", "0"), Declaration::new("padding", "0")];
        let generated = GeneratedRule::passthrough(&selectors, &declarations);
        assert_eq!(generated.key(), "h1, h2");

        let rendered = generated.to_rendered();
        assert_eq!(rendered.selectors, vec!["h1", "h2"]);
        assert_eq!(rendered.declarations.len(), 2);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut table = GeneratedRules::new();
        table.insert(GeneratedRule::atomic(".a", "", Declaration::new("a", "1")));
        table.insert(GeneratedRule::atomic(".b", "", Declaration::new("b", "1")));
        table.insert(GeneratedRule::atomic(".a", "", Declaration::new("a", "1")));

        let keys: Vec<_> = table.keys().cloned().collect();
        assert_eq!(keys, vec![".a", ".b"]);
    }

    #[test]
    fn test_repeated_passthrough_selectors_are_all_kept() {
        let mut table = GeneratedRules::new();
        table.insert(GeneratedRule::Passthrough {
            selectors: vec!["h1".into()],
            declarations: vec![Declaration::new("color", "red")],
        });
        table.insert(GeneratedRule::Passthrough {
            selectors: vec!["h1".into()],
            declarations: vec![Declaration::new("margin", "0")],
        });

        let rendered = table.to_rule_list();
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].declarations, vec![Declaration::new("color", "red")]);
        assert_eq!(rendered[1].declarations, vec![Declaration::new("margin", "0")]);
        assert!(table.get("h1").is_none());
    }

    #[test]
    fn test_renamed_rules_move_after_passthrough() {
        let mut table = GeneratedRules::new();
        table.insert(GeneratedRule::atomic(".long-a", "", Declaration::new("a", "1")));
        table.insert(GeneratedRule::Passthrough {
            selectors: vec!["h1:hover".into()],
            declarations: vec![Declaration::new("color", "#F00")],
        });
        table.insert(GeneratedRule::atomic(".long-b", ":hover", Declaration::new("b", "1")));

        let mapping: IndexMap<String, String> = [
            (".long-a".to_string(), ".rp__0".to_string()),
            (".long-b".to_string(), ".rp__1".to_string()),
        ]
        .into_iter()
        .collect();

        let renamed = table.renamed(&mapping);
        let keys: Vec<_> = renamed.keys().cloned().collect();
        assert_eq!(keys, vec!["h1:hover", ".rp__0", ".rp__1:hover"]);
    }

    #[test]
    fn test_to_rule_list_in_insertion_order() {
        let mut table = GeneratedRules::new();
        table.insert(GeneratedRule::atomic(".b", "", Declaration::new("b", "1")));
        table.insert(GeneratedRule::atomic(".a", "", Declaration::new("a", "1")));

        let selectors: Vec<_> = table
            .to_rule_list()
            .into_iter()
            .map(|r| r.selectors[0].clone())
            .collect();
        assert_eq!(selectors, vec![".b", ".a"]);
    }
}
