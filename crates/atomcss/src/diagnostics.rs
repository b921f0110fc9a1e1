//! Diagnostics collected during a single atomization run.
//!
//! Every stage of the pipeline receives the same [`Diagnostics`] collector by
//! `&mut`. Reported messages are always kept so they can be returned to the
//! caller as `style_errors`. When the run is verbose they are also forwarded to
//! a logger: the caller's custom callback if one was given, otherwise the
//! [`log`] facade at error level.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Callback receiving diagnostics instead of the default log output.
///
/// Called with the human readable message and, when available, a detail such
/// as the underlying parser error or the offending input.
pub type LoggerFn = Arc<dyn Fn(&str, Option<&str>) + Send + Sync>;

/// Reported when no stylesheet text is available to parse.
pub const INVALID_INPUT: &str = "Invalid CSS input.";

/// Reported when the stylesheet could not be turned into rules.
pub const PARSE_FAILURE: &str = "Error parsing CSS.";

/// Reported by option validation when the input is an empty string.
pub const EMPTY_INPUT_OPTION: &str = "CSS Input must be a string with length > 0.";

/// Reported when a declaration is missing its property or value.
pub const INVALID_DECLARATION: &str = "Invalid declaration: missing property or value.";

const BANNER: &str = "_________________________";
const TOOL_NAME: &str = "AtomCSS:";

/// A single reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Human readable message.
    pub message: String,
    /// Optional supporting detail (parser error text, raw input, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            message: message.into(),
            detail,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} ({})", self.message, detail),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Per-run collector for [`Diagnostic`]s.
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    verbose: bool,
    logger: Option<LoggerFn>,
}

impl Diagnostics {
    /// Creates a collector that forwards to `logger` (or the log facade) when verbose.
    pub fn new(verbose: bool, logger: Option<LoggerFn>) -> Self {
        Self {
            entries: Vec::new(),
            verbose,
            logger,
        }
    }

    /// Creates a collector that records but never logs.
    pub fn silent() -> Self {
        Self::new(false, None)
    }

    /// Records a diagnostic and, when verbose, forwards it to the logger.
    pub fn report(&mut self, message: impl Into<String>, detail: Option<String>) {
        let diagnostic = Diagnostic::new(message, detail);
        if self.verbose {
            match &self.logger {
                Some(logger) => logger(&diagnostic.message, diagnostic.detail.as_deref()),
                None => log::error!("{}", wrap(&diagnostic)),
            }
        }
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if any recorded diagnostic carries `message`.
    pub fn contains(&self, message: &str) -> bool {
        self.entries.iter().any(|d| d.message == message)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(true, None)
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("entries", &self.entries)
            .field("verbose", &self.verbose)
            .field("logger", &self.logger.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Formats a diagnostic the way the default log path prints it.
pub fn wrap(diagnostic: &Diagnostic) -> String {
    let mut out = format!("{}\n{}\n{}", BANNER, TOOL_NAME, diagnostic.message);
    if let Some(detail) = &diagnostic.detail {
        out.push('\n');
        out.push_str(detail);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording_logger() -> (LoggerFn, Arc<Mutex<Vec<(String, Option<String>)>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let logger: LoggerFn = Arc::new(move |message: &str, detail: Option<&str>| {
            sink.lock()
                .unwrap()
                .push((message.to_string(), detail.map(str::to_string)));
        });
        (logger, calls)
    }

    #[test]
    fn test_report_always_records() {
        let mut diagnostics = Diagnostics::silent();
        diagnostics.report(INVALID_INPUT, None);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.contains(INVALID_INPUT));
    }

    #[test]
    fn test_verbose_forwards_to_custom_logger() {
        let (logger, calls) = recording_logger();
        let mut diagnostics = Diagnostics::new(true, Some(logger));
        diagnostics.report(PARSE_FAILURE, Some(".a {".to_string()));

        let calls = calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[(PARSE_FAILURE.to_string(), Some(".a {".to_string()))]
        );
    }

    #[test]
    fn test_quiet_skips_custom_logger() {
        let (logger, calls) = recording_logger();
        let mut diagnostics = Diagnostics::new(false, Some(logger));
        diagnostics.report(PARSE_FAILURE, None);

        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_wrap_format() {
        let plain = Diagnostic::new(INVALID_INPUT, None);
        assert_eq!(
            wrap(&plain),
            "_________________________\nAtomCSS:\nInvalid CSS input."
        );

        let detailed = Diagnostic::new(PARSE_FAILURE, Some("1:8: oops".to_string()));
        assert!(wrap(&detailed).ends_with("Error parsing CSS.\n1:8: oops"));
    }

    #[test]
    fn test_display_includes_detail() {
        let d = Diagnostic::new("message", Some("detail".to_string()));
        assert_eq!(d.to_string(), "message (detail)");
    }
}
