//! The atomization engine.
//!
//! Walks parsed rules once, in order:
//!
//! - A **class rule** (first chunk of its first selector is a class) is split
//!   into one atomic rule per declaration and class alternative. Each atomic
//!   class is appended to the class map under the alternative's original text
//!   minus its pseudo suffix. Alternatives that are not classes (`.a, h1`)
//!   are kept together as one passthrough rule with every declaration.
//! - Any other rule is a **passthrough** rule and is copied unchanged.
//!
//! Afterwards each class map entry is deduplicated (last occurrence wins) and,
//! when requested, every atomic class is renamed to a short uglified token.

mod class_map;
mod rename;
mod rules;

pub use class_map::ClassMap;
pub use rename::{rename_mapping, uglify_class_names};
pub use rules::{GeneratedRule, GeneratedRules};

use crate::diagnostics::Diagnostics;
use crate::encoding::encode_class_name;
use crate::stylesheet::{Rule, Selector, SelectorChunk};

/// Output of [`atomize_rules`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Atomized {
    pub class_map: ClassMap,
    pub rules: GeneratedRules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleKind {
    Class,
    Passthrough,
}

fn classify(rule: &Rule) -> RuleKind {
    match rule.selectors.first() {
        Some(selector) if is_class_selector(selector) => RuleKind::Class,
        _ => RuleKind::Passthrough,
    }
}

fn is_class_selector(selector: &Selector) -> bool {
    match selector.first() {
        Some(SelectorChunk::Class(_)) => true,
        Some(SelectorChunk::Attribute { name, .. }) => name == "class",
        Some(SelectorChunk::Tag(_))
        | Some(SelectorChunk::Id(_))
        | Some(SelectorChunk::Pseudo(_))
        | None => false,
    }
}

/// Atomizes `rules`, optionally uglifying the generated class names.
///
/// Malformed declarations are reported to `diagnostics` and still atomized.
pub fn atomize_rules(rules: &[Rule], uglify: bool, diagnostics: &mut Diagnostics) -> Atomized {
    let mut class_map = ClassMap::new();
    let mut generated = GeneratedRules::new();

    for rule in rules {
        match classify(rule) {
            RuleKind::Class => atomize_class_rule(rule, &mut class_map, &mut generated, diagnostics),
            RuleKind::Passthrough => {
                log::trace!("passing through '{}'", rule.selector_text());
                generated.insert(GeneratedRule::passthrough(&rule.selectors, &rule.declarations));
            }
        }
    }

    class_map.remove_identical_properties();
    log::debug!(
        "atomized {} rules into {} generated rules for {} selectors",
        rules.len(),
        generated.len(),
        class_map.len()
    );

    if uglify {
        let (class_map, rules) = uglify_class_names(&class_map, &generated);
        return Atomized { class_map, rules };
    }

    Atomized {
        class_map,
        rules: generated,
    }
}

fn atomize_class_rule(
    rule: &Rule,
    class_map: &mut ClassMap,
    generated: &mut GeneratedRules,
    diagnostics: &mut Diagnostics,
) {
    let (classes, others): (Vec<&Selector>, Vec<&Selector>) = rule
        .selectors
        .iter()
        .partition(|selector| is_class_selector(selector));

    if !others.is_empty() {
        log::trace!("passing through {} non-class alternatives", others.len());
        generated.insert(GeneratedRule::passthrough(others, &rule.declarations));
    }

    for declaration in &rule.declarations {
        for selector in &classes {
            let pseudos = selector.pseudos();
            let encoded = encode_class_name(declaration, &pseudos, diagnostics);

            class_map.push(selector.base(), encoded.class_name.clone());
            generated.insert(GeneratedRule::atomic(
                encoded.class_name,
                encoded.pseudo_suffix,
                declaration.clone(),
            ));
        }
    }
}
