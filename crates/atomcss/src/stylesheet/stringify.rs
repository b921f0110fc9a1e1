//! Serializes rendered rules back to CSS text.
//!
//! Output is readable, not minified:
//!
//! ```text
//! .rp__0,
//! .rp__1 {
//!   padding: 10px;
//! }
//! .rp__2 {
//!   margin: 10px;
//! }
//! ```
//!
//! Rules without declarations are omitted. There is no trailing newline.

use super::RenderedRule;

const INDENT: &str = "  ";

/// Renders `rules` as CSS text.
pub fn stringify(rules: &[RenderedRule]) -> String {
    rules
        .iter()
        .filter(|rule| !rule.declarations.is_empty())
        .map(render_rule)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_rule(rule: &RenderedRule) -> String {
    let mut out = rule.selectors.join(",\n");
    out.push_str(" {\n");
    for declaration in &rule.declarations {
        out.push_str(INDENT);
        out.push_str(&declaration.property);
        out.push_str(": ");
        out.push_str(&declaration.value);
        out.push_str(";\n");
    }
    out.push('}');
    out
}
