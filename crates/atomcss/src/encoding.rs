//! Class-name encoding for declarations.
//!
//! Every declaration is turned into a class token that can be decoded back
//! into its `property:value` text by eye:
//!
//! ```text
//! background: #F00          =>  .rp__background__--COLON__--OCTOTHORPF00
//! content: '' (:hover:after) =>  .rp__content__--COLON__--SINGLEQUOTE__--SINGLEQUOTE___-HOVER___-AFTER
//! ```
//!
//! Symbols get a readable name behind the `__--` prefix, a space becomes
//! `_____-`, and anything else outside printable ASCII becomes `__--U` followed
//! by the decimal value of each UTF-16 code unit. Letters, digits, `-` and `_`
//! pass through unchanged.
//!
//! There is no length limit worth worrying about: browsers accept class names
//! far longer than any declaration will produce.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::diagnostics::{Diagnostics, INVALID_DECLARATION};
use crate::stylesheet::{Declaration, Pseudo};

/// Namespace prefix of every generated class.
pub const CLASS_PREFIX: &str = "rp__";

/// Prefix of a named symbol escape.
pub const SYMBOL_PREFIX: &str = "__--";

/// Escape for a space.
pub const SPACE_ESCAPE: &str = "_____-";

/// Prefix of a pseudo-class marker appended to the class name.
pub const PSEUDO_MARKER: &str = "___-";

/// Stands in for a missing property or value.
const PLACEHOLDER: &str = "undefined";

/// Named symbols in table order.
pub const SYMBOLS: &[(char, &str)] = &[
    ('&', "AMPERSAND"),
    ('*', "ASTERISK"),
    ('@', "ATSIGN"),
    ('\\', "BACKSLASH"),
    ('^', "CARET"),
    ('¢', "CENT"),
    ('>', "CLOSEANGLEBRACKET"),
    ('}', "CLOSECURLYBRACE"),
    (')', "CLOSEPAREN"),
    (']', "CLOSESQUAREBRACKET"),
    (':', "COLON"),
    (',', "COMMA"),
    ('©', "COPYRIGHT"),
    ('¤', "CURRENCY"),
    ('°', "DEGREE"),
    ('÷', "DIVIDE"),
    ('$', "DOLARSIGN"),
    ('.', "DOT"),
    ('"', "DOUBLEQUOTE"),
    ('=', "EQUAL"),
    ('!', "EXCLAMATION"),
    ('/', "FORWARDSLASH"),
    ('`', "GRAVE"),
    ('½', "HALF"),
    ('µ', "MU"),
    ('#', "OCTOTHORP"),
    ('<', "OPENANGLEBRACKET"),
    ('{', "OPENCURLYBRACE"),
    ('(', "OPENPAREN"),
    ('[', "OPENSQUAREBRACKET"),
    ('¶', "PARAGRAPH"),
    ('%', "PERCENT"),
    ('|', "PIPE"),
    ('+', "PLUS"),
    ('±', "PLUSMINUS"),
    ('£', "POUNDSTERLING"),
    ('¼', "QUARTER"),
    ('?', "QUESTIONMARK"),
    ('®', "REGISTERED"),
    (';', "SEMICOLON"),
    ('\'', "SINGLEQUOTE"),
    ('¾', "THREEQUARTERS"),
    ('~', "TILDE"),
    ('¥', "YENYUAN"),
];

static ENCODING_MAP: Lazy<HashMap<char, String>> = Lazy::new(|| {
    let mut map: HashMap<char, String> = SYMBOLS
        .iter()
        .map(|(c, name)| (*c, format!("{}{}", SYMBOL_PREFIX, name)))
        .collect();
    map.insert(' ', SPACE_ESCAPE.to_string());
    map
});

/// Escapes `text` so it is safe inside a class token.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut units = [0u16; 2];
    for c in text.chars() {
        if let Some(escaped) = ENCODING_MAP.get(&c) {
            out.push_str(escaped);
        } else if !(33..=126).contains(&(c as u32)) {
            for unit in c.encode_utf16(&mut units) {
                out.push_str(SYMBOL_PREFIX);
                out.push('U');
                out.push_str(&unit.to_string());
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Encodes a declaration as a bare class token, `.rp__<property:value>`.
///
/// An empty property or value is reported to `diagnostics` and encoded as the
/// literal `undefined`, so the caller always gets a usable name.
pub fn encode_declaration(declaration: &Declaration, diagnostics: &mut Diagnostics) -> String {
    let property = present(&declaration.property);
    let value = present(&declaration.value);
    if property.is_none() || value.is_none() {
        diagnostics.report(INVALID_DECLARATION, Some(format!("{:?}", declaration)));
    }

    let text = format!(
        "{}:{}",
        property.unwrap_or(PLACEHOLDER),
        value.unwrap_or(PLACEHOLDER)
    );
    format!(".{}{}", CLASS_PREFIX, escape(&text))
}

fn present(field: &str) -> Option<&str> {
    if field.trim().is_empty() {
        None
    } else {
        Some(field)
    }
}

/// An atomic class name together with the pseudo suffix its rule renders with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedClass {
    /// Class token including pseudo markers, e.g. `.rp__color__--COLONred___-HOVER`.
    pub class_name: String,
    /// Selector suffix for the generated rule, e.g. `:hover`. Empty without pseudos.
    pub pseudo_suffix: String,
}

impl EncodedClass {
    /// The selector the generated rule is rendered with.
    pub fn selector(&self) -> String {
        format!("{}{}", self.class_name, self.pseudo_suffix)
    }
}

/// Encodes a declaration in the context of a selector's pseudo chain.
///
/// One uppercase marker per pseudo is appended to the class name in chain
/// order, and the lowercase pseudo text is collected separately as the
/// rendered suffix.
pub fn encode_class_name(
    declaration: &Declaration,
    pseudos: &[&Pseudo],
    diagnostics: &mut Diagnostics,
) -> EncodedClass {
    let mut class_name = encode_declaration(declaration, diagnostics);
    let mut pseudo_suffix = String::new();
    for pseudo in pseudos {
        class_name.push_str(PSEUDO_MARKER);
        class_name.push_str(&escape(&pseudo.label()).to_ascii_uppercase());
        pseudo_suffix.push_str(&pseudo.rendered());
    }
    EncodedClass {
        class_name,
        pseudo_suffix,
    }
}
