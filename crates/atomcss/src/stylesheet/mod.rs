//! Structured stylesheet representation.
//!
//! The atomizer never looks at raw CSS text. [`parse_stylesheet`] turns text
//! into a list of [`Rule`]s, the engine turns those into atomic rules, and
//! [`stringify`] writes the assembled [`RenderedRule`]s back out.
//!
//! # Selector model
//!
//! A rule's prelude is split on top-level commas into [`Selector`]
//! alternatives. Each alternative keeps its trimmed source text in
//! [`Selector::original`] and a list of [`SelectorChunk`]s for the simple
//! selectors it is built from:
//!
//! ```text
//! .cow.dog:hover::after   =>  [Class(cow), Class(dog), Pseudo(hover), Pseudo(::after)]
//! h1[lang="en"]           =>  [Tag(h1), Attribute { lang, Some(en) }]
//! ```
//!
//! Combinators produce no chunk. They only survive in `original`.

mod parser;
mod stringify;

use serde::Serialize;

pub use parser::parse_stylesheet;
pub use stringify::stringify;

/// A single `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// A pseudo-class or pseudo-element chunk such as `:hover` or `::before`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pseudo {
    /// Lowercased name without colons (`hover`, `nth-child`).
    pub name: String,
    /// Text between the parentheses of a functional pseudo (`2n+1`).
    pub argument: Option<String>,
    /// Written with a double colon.
    pub element: bool,
}

impl Pseudo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument: None,
            element: false,
        }
    }

    /// Name plus parenthesized argument, without leading colons.
    pub fn label(&self) -> String {
        match &self.argument {
            Some(arg) => format!("{}({})", self.name, arg),
            None => self.name.clone(),
        }
    }

    /// The selector text this chunk renders to.
    pub fn rendered(&self) -> String {
        let colons = if self.element { "::" } else { ":" };
        format!("{}{}", colons, self.label())
    }
}

/// One simple selector inside a [`Selector`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectorChunk {
    /// Type selector (`h1`) or the universal selector (`*`).
    Tag(String),
    /// `#name`
    Id(String),
    /// `.name`
    Class(String),
    /// `[name]` or `[name=value]` with any match operator.
    Attribute { name: String, value: Option<String> },
    Pseudo(Pseudo),
}

/// One comma-separated alternative of a selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub chunks: Vec<SelectorChunk>,
    /// Source text of this alternative, trimmed.
    pub original: String,
}

impl Selector {
    pub fn new(chunks: Vec<SelectorChunk>, original: impl Into<String>) -> Self {
        Self {
            chunks,
            original: original.into(),
        }
    }

    pub fn first(&self) -> Option<&SelectorChunk> {
        self.chunks.first()
    }

    /// Pseudo chunks in source order.
    pub fn pseudos(&self) -> Vec<&Pseudo> {
        self.chunks
            .iter()
            .filter_map(|chunk| match chunk {
                SelectorChunk::Pseudo(pseudo) => Some(pseudo),
                SelectorChunk::Tag(_)
                | SelectorChunk::Id(_)
                | SelectorChunk::Class(_)
                | SelectorChunk::Attribute { .. } => None,
            })
            .collect()
    }

    /// The original text up to its first pseudo colon (`.cow:hover` => `.cow`).
    ///
    /// Colons inside attribute brackets, parentheses or quotes are not pseudo
    /// separators and are skipped.
    pub fn base(&self) -> &str {
        let mut depth = 0usize;
        let mut quote: Option<char> = None;
        for (i, c) in self.original.char_indices() {
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(c),
                (None, '[' | '(') => depth += 1,
                (None, ']' | ')') => depth = depth.saturating_sub(1),
                (None, ':') if depth == 0 => return self.original[..i].trim_end(),
                _ => {}
            }
        }
        &self.original
    }
}

/// A `selector-list { declarations }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

impl Rule {
    pub fn new(selectors: Vec<Selector>, declarations: Vec<Declaration>) -> Self {
        Self {
            selectors,
            declarations,
        }
    }

    /// Original texts of all alternatives joined with `", "`.
    pub fn selector_text(&self) -> String {
        self.selectors
            .iter()
            .map(|s| s.original.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A parsed stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

/// An output rule in the shape the stringifier consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRule {
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
}

impl RenderedRule {
    pub fn new(selectors: Vec<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            selectors,
            declarations,
        }
    }
}
