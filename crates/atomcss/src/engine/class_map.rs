//! The map from original selectors to the atomic classes replacing them.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

/// Original selector (`.cow`) to ordered atomic class names.
///
/// Keys keep first-insertion order. Serializes as a plain JSON object:
///
/// ```json
/// { ".cow": [".rp__0", ".rp__1"], ".moo": [".rp__2", ".rp__1"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassMap(IndexMap<String, Vec<String>>);

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `class_name` to the list for `selector`.
    pub fn push(&mut self, selector: impl Into<String>, class_name: impl Into<String>) {
        self.0
            .entry(selector.into())
            .or_default()
            .push(class_name.into());
    }

    pub fn get(&self, selector: &str) -> Option<&[String]> {
        self.0.get(selector).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drops repeated class names, keeping only the last occurrence of each.
    ///
    /// A later identical declaration wins the cascade, so earlier copies are
    /// redundant. Survivors keep their relative order:
    /// `[A, B, A, C, A, D]` becomes `[B, C, A, D]`.
    pub fn remove_identical_properties(&mut self) {
        for classes in self.0.values_mut() {
            let mut seen = HashSet::new();
            let mut kept: Vec<String> = classes
                .drain(..)
                .rev()
                .filter(|class| seen.insert(class.clone()))
                .collect();
            kept.reverse();
            *classes = kept;
        }
    }

    /// Builds a copy with every class name replaced through `mapping`.
    ///
    /// Names absent from the mapping are kept as they are.
    pub fn renamed(&self, mapping: &IndexMap<String, String>) -> ClassMap {
        let renamed = self
            .0
            .iter()
            .map(|(selector, classes)| {
                let classes = classes
                    .iter()
                    .map(|class| mapping.get(class).unwrap_or(class).clone())
                    .collect();
                (selector.clone(), classes)
            })
            .collect();
        ClassMap(renamed)
    }

    pub fn into_inner(self) -> IndexMap<String, Vec<String>> {
        self.0
    }
}

impl<K, V, C> FromIterator<(K, V)> for ClassMap
where
    K: Into<String>,
    V: IntoIterator<Item = C>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ClassMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }
}
