//! # AtomCSS - Atomic CSS Generation
//!
//! `atomcss` rewrites a stylesheet so that every distinct declaration lives in
//! its own single-declaration rule, addressed by a deterministic class name.
//! Alongside the CSS it returns a class map from each original selector to the
//! atomic classes that replace it, ready for a markup rewriting step.
//!
//! ## Quick Start
//!
//! ```rust
//! use atomcss::{atomize, Options};
//!
//! let output = atomize(Options::new().input(
//!     ".pseudo { color: #F00; } .pseudo:hover { color: #A00; }",
//! ));
//!
//! assert_eq!(
//!     output.class_map.get(".pseudo").unwrap(),
//!     &[
//!         ".rp__color__--COLON__--OCTOTHORPF00",
//!         ".rp__color__--COLON__--OCTOTHORPA00___-HOVER",
//!     ]
//! );
//! assert!(output
//!     .atomized_css
//!     .contains(".rp__color__--COLON__--OCTOTHORPA00___-HOVER:hover {\n  color: #A00;\n}"));
//! ```
//!
//! ## Pipeline
//!
//! - [`parse_stylesheet`]: CSS text to [`Rule`]s (built on `cssparser`)
//! - [`atomize_rules`]: the engine; classifies rules, encodes declarations with
//!   [`encode_class_name`], builds and deduplicates the [`ClassMap`], and
//!   optionally uglifies names with [`uglify`](uglify::uglify)
//! - [`GeneratedRules::to_rule_list`]: assembles output rules in table order
//! - [`stringify`]: rules back to CSS text
//!
//! [`atomize`] runs the whole pipeline and never fails. Problems are collected
//! as [`Diagnostic`]s in [`AtomizeOutput::style_errors`] and, when verbose,
//! forwarded to the custom logger or the `log` facade.
//!
//! ## Non-class rules
//!
//! Rules whose first selector starts with a tag, id, non-class attribute or
//! pseudo (`h1`, `#main`, `[lang]`, `:root`) are copied through unchanged and
//! never appear in the class map. In a class rule such as `.a, h1 { .. }`
//! only `.a` is atomized; `h1` keeps the whole block as its own rule.

mod atomize;
pub mod diagnostics;
pub mod encoding;
pub mod engine;
mod error;
mod options;
pub mod stylesheet;
pub mod uglify;

pub use atomize::{atomize, atomize_str, AtomizeOutput};
pub use diagnostics::{Diagnostic, Diagnostics, LoggerFn};
pub use encoding::{encode_class_name, encode_declaration, EncodedClass};
pub use engine::{atomize_rules, Atomized, ClassMap, GeneratedRule, GeneratedRules};
pub use error::{AtomizeError, Result};
pub use options::{Config, Options};
pub use stylesheet::{
    parse_stylesheet, stringify, Declaration, Pseudo, RenderedRule, Rule, Selector,
    SelectorChunk, Stylesheet,
};
