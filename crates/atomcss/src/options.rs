//! Run options and file-based configuration.
//!
//! [`Options`] is what [`atomize`](crate::atomize) consumes. It is built in
//! code:
//!
//! ```rust
//! use atomcss::Options;
//!
//! let options = Options::new()
//!     .input(".example { padding: 10px; }")
//!     .uglify(true)
//!     .verbose(false);
//! ```
//!
//! [`Config`] holds the subset that makes sense in a file and can be layered
//! over a set of options:
//!
//! ```yaml
//! uglify: true
//! verbose: false
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::diagnostics::{Diagnostics, LoggerFn, EMPTY_INPUT_OPTION};
use crate::error::Result;

/// Options for a single atomization run.
#[derive(Clone)]
pub struct Options {
    input: Option<String>,
    uglify: bool,
    verbose: bool,
    custom_logger: Option<LoggerFn>,
}

impl Options {
    /// Default options: no input, long class names, verbose logging.
    pub fn new() -> Self {
        Self {
            input: None,
            uglify: false,
            verbose: true,
            custom_logger: None,
        }
    }

    /// Sets the CSS text to atomize.
    pub fn input(mut self, css: impl Into<String>) -> Self {
        self.input = Some(css.into());
        self
    }

    /// Replace atomic class names with short tokens (`.rp__0`).
    pub fn uglify(mut self, uglify: bool) -> Self {
        self.uglify = uglify;
        self
    }

    /// Forward diagnostics to a logger as they are reported.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Receives diagnostics instead of the `log` facade when verbose.
    pub fn custom_logger<F>(mut self, logger: F) -> Self
    where
        F: Fn(&str, Option<&str>) + Send + Sync + 'static,
    {
        self.custom_logger = Some(Arc::new(logger));
        self
    }

    pub fn input_text(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn is_uglify(&self) -> bool {
        self.uglify
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Creates the diagnostics collector for a run with these options.
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::new(self.verbose, self.custom_logger.clone())
    }

    /// Normalizes the options, reporting problems to `diagnostics`.
    ///
    /// A zero-length input is reported and treated as no input at all.
    pub fn validate(mut self, diagnostics: &mut Diagnostics) -> Self {
        if matches!(self.input.as_deref(), Some("")) {
            diagnostics.report(EMPTY_INPUT_OPTION, None);
            self.input = None;
        }
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("input", &self.input)
            .field("uglify", &self.uglify)
            .field("verbose", &self.verbose)
            .field("custom_logger", &self.custom_logger.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// File-level configuration. Unset fields leave the options untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub uglify: Option<bool>,
    #[serde(default)]
    pub verbose: Option<bool>,
}

impl Config {
    /// Parses a YAML (or JSON) config document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Overlays the set fields onto `options`.
    pub fn apply(&self, mut options: Options) -> Options {
        if let Some(uglify) = self.uglify {
            options = options.uglify(uglify);
        }
        if let Some(verbose) = self.verbose {
            options = options.verbose(verbose);
        }
        options
    }
}
