//! The public entry point: CSS text in, atomized CSS and class map out.

use serde::Serialize;

use crate::diagnostics::{Diagnostic, INVALID_INPUT, PARSE_FAILURE};
use crate::engine::{atomize_rules, ClassMap};
use crate::options::Options;
use crate::stylesheet::{parse_stylesheet, stringify};

/// Result of an atomization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomizeOutput {
    /// Original selectors to the atomic classes replacing them.
    pub class_map: ClassMap,
    /// The atomized stylesheet.
    pub atomized_css: String,
    /// Everything reported during the run, in order.
    pub style_errors: Vec<Diagnostic>,
    /// Set when there was no usable input or it could not be parsed.
    #[serde(skip)]
    pub failed: bool,
}

impl AtomizeOutput {
    fn failure(style_errors: Vec<Diagnostic>) -> Self {
        Self {
            class_map: ClassMap::new(),
            atomized_css: String::new(),
            style_errors,
            failed: true,
        }
    }

    /// True when the input could not be parsed and nothing was produced.
    pub fn is_failure(&self) -> bool {
        self.failed
    }
}

/// Atomizes the CSS in `options`.
///
/// Never fails: missing input and unparseable CSS are reported in
/// `style_errors` and produce an empty class map and empty CSS.
///
/// # Example
///
/// ```rust
/// use atomcss::{atomize, Options};
///
/// let output = atomize(
///     Options::new()
///         .input(".example { padding: 10px; margin: 10px; }")
///         .uglify(true),
/// );
///
/// assert_eq!(output.class_map.get(".example").unwrap(), &[".rp__0", ".rp__1"]);
/// assert_eq!(
///     output.atomized_css,
///     ".rp__0 {\n  padding: 10px;\n}\n.rp__1 {\n  margin: 10px;\n}"
/// );
/// assert!(output.style_errors.is_empty());
/// ```
pub fn atomize(options: Options) -> AtomizeOutput {
    let mut diagnostics = options.diagnostics();
    let options = options.validate(&mut diagnostics);

    let input = match options.input_text() {
        Some(input) => input,
        None => {
            diagnostics.report(INVALID_INPUT, None);
            diagnostics.report(PARSE_FAILURE, None);
            return AtomizeOutput::failure(diagnostics.into_vec());
        }
    };

    let stylesheet = match parse_stylesheet(input, &mut diagnostics) {
        Ok(stylesheet) => stylesheet,
        Err(err) => {
            log::debug!("parse failed: {}", err);
            diagnostics.report(PARSE_FAILURE, Some(err.to_string()));
            diagnostics.report(PARSE_FAILURE, Some(input.to_string()));
            return AtomizeOutput::failure(diagnostics.into_vec());
        }
    };

    let atomized = atomize_rules(&stylesheet.rules, options.is_uglify(), &mut diagnostics);
    let atomized_css = stringify(&atomized.rules.to_rule_list());

    AtomizeOutput {
        class_map: atomized.class_map,
        atomized_css,
        style_errors: diagnostics.into_vec(),
        failed: false,
    }
}

/// Shorthand for atomizing a string with non-verbose defaults.
pub fn atomize_str(css: &str, uglify: bool) -> AtomizeOutput {
    atomize(Options::new().input(css).uglify(uglify).verbose(false))
}
