//! Uglify pass: derive one short name per atomic class, then rebuild.
//!
//! The mapping is computed from the rule table alone before anything is
//! rewritten, so the class map and the table are always renamed with the same
//! names no matter how many selectors share a class.

use indexmap::IndexMap;

use super::class_map::ClassMap;
use super::rules::{GeneratedRule, GeneratedRules};
use crate::uglify::Uglifier;

/// Maps each atomic class name to its uglified replacement, in table order.
///
/// Passthrough rules are not renamed. A class name seen twice (same
/// declaration and pseudo chain under a differently written suffix) keeps
/// the name it was given first.
pub fn rename_mapping(rules: &GeneratedRules) -> IndexMap<String, String> {
    let mut uglifier = Uglifier::new();
    let mut mapping = IndexMap::new();
    for rule in rules.values() {
        match rule {
            GeneratedRule::Atomic { class_name, .. } => {
                if !mapping.contains_key(class_name) {
                    mapping.insert(class_name.clone(), uglifier.next_name());
                }
            }
            GeneratedRule::Passthrough { .. } => {}
        }
    }
    mapping
}

/// Renames every atomic class in both structures.
pub fn uglify_class_names(
    class_map: &ClassMap,
    rules: &GeneratedRules,
) -> (ClassMap, GeneratedRules) {
    let mapping = rename_mapping(rules);
    log::debug!("uglifying {} atomic classes", mapping.len());
    (class_map.renamed(&mapping), rules.renamed(&mapping))
}
