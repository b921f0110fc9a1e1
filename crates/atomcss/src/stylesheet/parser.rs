//! CSS text parsing.
//!
//! Built on `cssparser`, which handles tokenizing, comments, escapes and
//! block nesting. This module only decides what a rule looks like:
//!
//! - Qualified rules become [`Rule`]s. The prelude is split on commas into
//!   [`Selector`]s; the block must contain declarations only.
//! - At-rules are consumed and reported as skipped. Their contents are not
//!   atomized.
//! - Anything else that does not parse (nested rules, a prelude without a
//!   block, an empty selector) fails the whole stylesheet.

use std::fmt;

use cssparser::{
    AtRuleParser, BasicParseErrorKind, CowRcStr, DeclarationParser, ParseError, ParseErrorKind,
    Parser, ParserInput, ParserState, QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
    Token,
};

use super::{Declaration, Pseudo, Rule, Selector, SelectorChunk, Stylesheet};
use crate::diagnostics::Diagnostics;
use crate::error::{AtomizeError, Result};

/// Parses CSS text into rules.
///
/// At-rules are skipped with a diagnostic. Any malformed qualified rule is
/// returned as [`AtomizeError::Parse`].
pub fn parse_stylesheet(css: &str, diagnostics: &mut Diagnostics) -> Result<Stylesheet> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut top_level = TopLevelParser;

    let mut rules = Vec::new();
    for result in cssparser::StyleSheetParser::new(&mut parser, &mut top_level) {
        match result {
            Ok(Item::Rule(rule)) => rules.push(rule),
            Ok(Item::AtRule(name)) => {
                log::debug!("skipping at-rule @{}", name);
                diagnostics.report(format!("Unsupported at-rule '@{}' was skipped.", name), None);
            }
            Err((error, _slice)) => return Err(convert_error(error)),
        }
    }

    log::trace!("parsed {} rules", rules.len());
    Ok(Stylesheet { rules })
}

/// Parser-specific failures carried inside `cssparser::ParseError`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SyntaxError {
    EmptySelector,
    ExpectedIdentifier(&'static str),
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::EmptySelector => write!(f, "empty selector"),
            SyntaxError::ExpectedIdentifier(after) => {
                write!(f, "expected identifier after '{}'", after)
            }
        }
    }
}

fn convert_error(error: ParseError<'_, SyntaxError>) -> AtomizeError {
    let message = match error.kind {
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            format!("unexpected token {:?}", token)
        }
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            "unexpected end of input".to_string()
        }
        ParseErrorKind::Basic(BasicParseErrorKind::QualifiedRuleInvalid) => {
            "invalid rule".to_string()
        }
        ParseErrorKind::Basic(other) => format!("{:?}", other),
        ParseErrorKind::Custom(custom) => custom.to_string(),
    };
    AtomizeError::Parse {
        line: error.location.line + 1,
        column: error.location.column,
        message,
    }
}

enum Item {
    Rule(Rule),
    AtRule(String),
}

struct TopLevelParser;

impl<'i> QualifiedRuleParser<'i> for TopLevelParser {
    type Prelude = Vec<Selector>;
    type QualifiedRule = Item;
    type Error = SyntaxError;

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        input.parse_comma_separated(parse_selector)
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let mut decl_parser = DeclarationListParser;
        let body = RuleBodyParser::new(input, &mut decl_parser);

        let mut declarations = Vec::new();
        for result in body {
            match result {
                Ok(declaration) => declarations.push(declaration),
                Err((error, _slice)) => return Err(error),
            }
        }
        Ok(Item::Rule(Rule::new(prelude, declarations)))
    }
}

impl<'i> AtRuleParser<'i> for TopLevelParser {
    type Prelude = String;
    type AtRule = Item;
    type Error = SyntaxError;

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        while input.next().is_ok() {}
        Ok(name.as_ref().to_string())
    }

    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
    ) -> std::result::Result<Self::AtRule, ()> {
        Ok(Item::AtRule(prelude))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::AtRule, ParseError<'i, Self::Error>> {
        while input.next().is_ok() {}
        Ok(Item::AtRule(prelude))
    }
}

fn parse_selector<'i, 't>(
    input: &mut Parser<'i, 't>,
) -> std::result::Result<Selector, ParseError<'i, SyntaxError>> {
    input.skip_whitespace();
    let start = input.position();
    let mut chunks = Vec::new();

    loop {
        let token = match input.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::Ident(name) => chunks.push(SelectorChunk::Tag(name.as_ref().to_string())),
            Token::Delim('*') => chunks.push(SelectorChunk::Tag("*".to_string())),
            Token::IDHash(name) | Token::Hash(name) => {
                chunks.push(SelectorChunk::Id(name.as_ref().to_string()))
            }
            Token::Delim('.') => {
                let name = expect_adjacent_ident(input, ".")?;
                chunks.push(SelectorChunk::Class(name));
            }
            Token::SquareBracketBlock => {
                chunks.push(input.parse_nested_block(parse_attribute)?);
            }
            Token::Colon => chunks.push(SelectorChunk::Pseudo(parse_pseudo(input)?)),
            // Combinators only live on in the original text.
            Token::WhiteSpace(_) | Token::Delim('>') | Token::Delim('+') | Token::Delim('~') => {}
            other => return Err(input.new_unexpected_token_error(other)),
        }
    }

    if chunks.is_empty() {
        return Err(input.new_custom_error(SyntaxError::EmptySelector));
    }
    let original = input.slice_from(start).trim().to_string();
    Ok(Selector::new(chunks, original))
}

fn expect_adjacent_ident<'i, 't>(
    input: &mut Parser<'i, 't>,
    after: &'static str,
) -> std::result::Result<String, ParseError<'i, SyntaxError>> {
    let name = match input.next_including_whitespace() {
        Ok(Token::Ident(name)) => Some(name.as_ref().to_string()),
        _ => None,
    };
    name.ok_or_else(|| input.new_custom_error(SyntaxError::ExpectedIdentifier(after)))
}

fn parse_attribute<'i, 't>(
    input: &mut Parser<'i, 't>,
) -> std::result::Result<SelectorChunk, ParseError<'i, SyntaxError>> {
    let name = input.expect_ident()?.as_ref().to_string();

    let mut value = None;
    while let Ok(token) = input.next() {
        match token {
            Token::Ident(v) | Token::QuotedString(v) if value.is_none() => {
                value = Some(v.as_ref().to_string());
            }
            // Match operators and the trailing `i`/`s` flag.
            _ => {}
        }
    }
    Ok(SelectorChunk::Attribute { name, value })
}

fn parse_pseudo<'i, 't>(
    input: &mut Parser<'i, 't>,
) -> std::result::Result<Pseudo, ParseError<'i, SyntaxError>> {
    let mut element = false;
    let mut token = input.next_including_whitespace()?.clone();
    if token == Token::Colon {
        element = true;
        token = input.next_including_whitespace()?.clone();
    }

    match token {
        Token::Ident(name) => Ok(Pseudo {
            name: name.as_ref().to_ascii_lowercase(),
            argument: None,
            element,
        }),
        Token::Function(name) => {
            let argument = input.parse_nested_block(|input| {
                let start = input.position();
                while input.next_including_whitespace_and_comments().is_ok() {}
                Ok::<_, ParseError<'i, SyntaxError>>(input.slice_from(start).trim().to_string())
            })?;
            Ok(Pseudo {
                name: name.as_ref().to_ascii_lowercase(),
                argument: Some(argument),
                element,
            })
        }
        _ => Err(input.new_custom_error(SyntaxError::ExpectedIdentifier(":"))),
    }
}

struct DeclarationListParser;

impl<'i> DeclarationParser<'i> for DeclarationListParser {
    type Declaration = Declaration;
    type Error = SyntaxError;

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Declaration, ParseError<'i, Self::Error>> {
        // Values are kept verbatim, `!important` included.
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let value = input.slice_from(start).trim();
        Ok(Declaration::new(name.as_ref(), value))
    }
}

impl<'i> AtRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = SyntaxError;
}

impl<'i> QualifiedRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = SyntaxError;
}

impl<'i> RuleBodyItemParser<'i, Declaration, SyntaxError> for DeclarationListParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(css: &str) -> Stylesheet {
        parse_stylesheet(css, &mut Diagnostics::silent()).unwrap()
    }

    #[test]
    fn test_parse_single_class_rule() {
        let sheet = parse(".test { background: #F00; }");
        assert_eq!(sheet.rules.len(), 1);

        let rule = &sheet.rules[0];
        assert_eq!(rule.selectors.len(), 1);
        assert_eq!(rule.selectors[0].original, ".test");
        assert_eq!(
            rule.selectors[0].chunks,
            vec![SelectorChunk::Class("test".into())]
        );
        assert_eq!(rule.declarations, vec![Declaration::new("background", "#F00")]);
    }

    #[test]
    fn test_parse_comma_separated_selectors() {
        let sheet = parse(".cat:hover, .bat:hover { margin: 2px; }");
        let selectors = &sheet.rules[0].selectors;
        assert_eq!(selectors.len(), 2);
        assert_eq!(selectors[0].original, ".cat:hover");
        assert_eq!(selectors[1].original, ".bat:hover");
        assert_eq!(
            selectors[1].chunks,
            vec![
                SelectorChunk::Class("bat".into()),
                SelectorChunk::Pseudo(Pseudo::new("hover")),
            ]
        );
    }

    #[test]
    fn test_parse_non_class_selectors() {
        let sheet = parse("h1 { color: red; } [attr=\"123\"] { top: 0; } #id { z-index: 2; }");
        assert_eq!(sheet.rules[0].selectors[0].chunks, vec![SelectorChunk::Tag("h1".into())]);
        assert_eq!(
            sheet.rules[1].selectors[0].chunks,
            vec![SelectorChunk::Attribute {
                name: "attr".into(),
                value: Some("123".into())
            }]
        );
        assert_eq!(sheet.rules[1].selectors[0].original, "[attr=\"123\"]");
        assert_eq!(sheet.rules[2].selectors[0].chunks, vec![SelectorChunk::Id("id".into())]);
    }

    #[test]
    fn test_parse_pseudo_chain_and_elements() {
        let sheet = parse(".a:hover::after { content: ''; } .b:nth-child(2n + 1) { top: 0; }");
        let pseudos = sheet.rules[0].selectors[0].pseudos();
        assert_eq!(pseudos.len(), 2);
        assert_eq!(pseudos[0].rendered(), ":hover");
        assert_eq!(pseudos[1].rendered(), "::after");

        let nth = sheet.rules[1].selectors[0].pseudos();
        assert_eq!(nth[0].rendered(), ":nth-child(2n + 1)");
    }

    #[test]
    fn test_values_are_verbatim() {
        let sheet = parse(".a { border: 1px solid #00F; color: red !important; content: '' }");
        let values: Vec<_> = sheet.rules[0]
            .declarations
            .iter()
            .map(|d| d.value.as_str())
            .collect();
        assert_eq!(values, vec!["1px solid #00F", "red !important", "''"]);
    }

    #[test]
    fn test_empty_value_is_kept() {
        let sheet = parse(".a { color: ; }");
        assert_eq!(sheet.rules[0].declarations, vec![Declaration::new("color", "")]);
    }

    #[test]
    fn test_comments_are_ignored() {
        let sheet = parse("/* header */ .a { /* inner */ color: red; }");
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].declarations.len(), 1);
    }

    #[test]
    fn test_combinators_kept_in_original_only() {
        let sheet = parse(".nav > .item a { color: red; }");
        let sel = &sheet.rules[0].selectors[0];
        assert_eq!(sel.original, ".nav > .item a");
        assert_eq!(
            sel.chunks,
            vec![
                SelectorChunk::Class("nav".into()),
                SelectorChunk::Class("item".into()),
                SelectorChunk::Tag("a".into()),
            ]
        );
    }

    #[test]
    fn test_at_rules_are_skipped_with_diagnostic() {
        let mut diagnostics = Diagnostics::silent();
        let sheet = parse_stylesheet(
            "@charset \"utf-8\"; @media (min-width: 10px) { .a { color: red; } } .b { top: 0; }",
            &mut diagnostics,
        )
        .unwrap();

        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].selectors[0].original, ".b");
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.contains("Unsupported at-rule '@media' was skipped."));
    }

    #[test]
    fn test_nested_rule_is_a_parse_error() {
        let result = parse_stylesheet(
            ".dog { .cow { background: 13px ]",
            &mut Diagnostics::silent(),
        );
        assert!(matches!(result, Err(AtomizeError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_prelude_without_block_is_a_parse_error() {
        let result = parse_stylesheet(".a { color: red; } .b", &mut Diagnostics::silent());
        assert!(matches!(result, Err(AtomizeError::Parse { .. })));
    }

    #[test]
    fn test_empty_stylesheet() {
        assert!(parse("").rules.is_empty());
        assert!(parse("   /* nothing */ ").rules.is_empty());
    }
}
