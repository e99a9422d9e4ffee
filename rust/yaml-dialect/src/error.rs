// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Error types for dialect parsing.

use crate::span::{Position, Span};
use crate::token::Lexeme;

/// A structural error encountered while parsing a document.
///
/// Errors carry the name of the source they were raised for and, when
/// known, the position and byte span of the offending token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error
    pub kind: ErrorKind,
    /// Name of the parsed source (usually a file path)
    pub source_name: String,
    /// 1-based line/column of the offending token
    pub position: Option<Position>,
    /// The span in the source where the error occurred
    pub span: Option<Span>,
    /// Expected tokens/patterns (for diagnostic messages)
    pub expected: Vec<String>,
    /// What was actually found (for diagnostic messages)
    pub found: Option<String>,
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unexpected token for the current context
    UnexpectedToken,

    /// Quoted string without its closing quote
    UnterminatedQuote,

    /// Block scalar marker without any body line
    UnterminatedBlockScalar,

    /// Alias to an anchor that was never defined (only raised when resolving aliases)
    UndefinedAlias(String),

    /// Nesting exceeded the configured depth limit
    NestingTooDeep { limit: usize },

    /// Alias expansions exceeded the configured limit
    TooManyAliases { limit: usize },
}

impl ErrorKind {
    /// Get a suggestion for how to fix this error.
    ///
    /// Returns `Some(suggestion)` if a helpful fix suggestion is available,
    /// or `None` if no specific suggestion applies.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::UnterminatedQuote => Some("Add the matching closing quote character"),
            Self::UnterminatedBlockScalar => Some(
                "Indent the block scalar content on the lines following the | or > marker",
            ),
            Self::UndefinedAlias(_) => {
                Some("Define the anchor with &name before referencing it with *name")
            }
            Self::NestingTooDeep { .. } => {
                Some("Flatten the document or raise the max_depth parse option")
            }
            Self::TooManyAliases { .. } => {
                Some("Reduce alias usage or raise the max_alias_expansions parse option")
            }
            // No specific suggestion for these
            Self::UnexpectedToken => None,
        }
    }
}

impl ParseError {
    /// Create a new error with just a kind and a source name.
    #[must_use]
    pub fn new(kind: ErrorKind, source_name: impl Into<String>) -> Self {
        Self {
            kind,
            source_name: source_name.into(),
            position: None,
            span: None,
            expected: Vec::new(),
            found: None,
        }
    }

    /// Create an error located at a token.
    #[must_use]
    pub fn at(kind: ErrorKind, source_name: impl Into<String>, lexeme: &Lexeme) -> Self {
        Self::new(kind, source_name)
            .with_position(lexeme.position)
            .with_span(lexeme.span)
    }

    /// Add the source position to the error.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Add the source span to the error.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Add expected tokens to the error.
    #[must_use]
    pub fn with_expected(mut self, expected: Vec<String>) -> Self {
        self.expected = expected;
        self
    }

    /// Add the found token to the error.
    #[must_use]
    pub fn with_found(mut self, found: String) -> Self {
        self.found = Some(found);
        self
    }

    /// Get a suggestion for how to fix this error.
    ///
    /// Delegates to [`ErrorKind::suggestion()`].
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        self.kind.suggestion()
    }

    /// The error message without the source location prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.kind {
            ErrorKind::UnexpectedToken => {
                let mut message = match &self.found {
                    Some(found) => format!("unexpected {found}"),
                    None => "unexpected token".to_owned(),
                };
                if !self.expected.is_empty() {
                    message.push_str(", expected ");
                    message.push_str(&self.expected.join(" or "));
                }
                message
            }
            ErrorKind::UnterminatedQuote => "unterminated quoted string".to_owned(),
            ErrorKind::UnterminatedBlockScalar => {
                "block scalar marker without content".to_owned()
            }
            ErrorKind::UndefinedAlias(name) => {
                format!("undefined alias '*{name}': anchor '&{name}' not defined")
            }
            ErrorKind::NestingTooDeep { limit } => {
                format!("nesting exceeds the maximum depth of {limit}")
            }
            ErrorKind::TooManyAliases { limit } => {
                format!("alias expansions exceed the limit of {limit}")
            }
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some(position) => write!(f, "{}:{position}: {}", self.source_name, self.message()),
            None => write!(f, "{}: {}", self.source_name, self.message()),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::span;
    use crate::token::Token;

    #[test]
    fn test_error_display() {
        let err = ParseError::new(ErrorKind::UnterminatedQuote, "config.yaml")
            .with_position(Position::new(3, 7));
        assert_eq!(
            err.to_string(),
            "config.yaml:3:7: unterminated quoted string"
        );
    }

    #[test]
    fn test_error_display_without_position() {
        let err = ParseError::new(ErrorKind::TooManyAliases { limit: 8 }, "inline");
        assert_eq!(
            err.to_string(),
            "inline: alias expansions exceed the limit of 8"
        );
    }

    #[test]
    fn test_error_display_with_context() {
        let test_cases = [
            (
                ParseError::new(ErrorKind::UnexpectedToken, "a.yaml")
                    .with_expected(vec!["','".to_owned(), "']'".to_owned()])
                    .with_found("end of input".to_owned()),
                "a.yaml: unexpected end of input, expected ',' or ']'",
            ),
            (
                ParseError::new(ErrorKind::UndefinedAlias("base".to_owned()), "a.yaml"),
                "a.yaml: undefined alias '*base': anchor '&base' not defined",
            ),
            (
                ParseError::new(ErrorKind::NestingTooDeep { limit: 4 }, "a.yaml"),
                "a.yaml: nesting exceeds the maximum depth of 4",
            ),
            (
                ParseError::new(ErrorKind::UnterminatedBlockScalar, "a.yaml"),
                "a.yaml: block scalar marker without content",
            ),
        ];

        for (err, expected_msg) in test_cases {
            assert_eq!(err.to_string(), expected_msg);
        }
    }

    #[test]
    fn test_error_at_lexeme() {
        let lexeme = Lexeme::new(Token::Colon, span(4, 5), Position::new(2, 1));
        let err = ParseError::at(ErrorKind::UnexpectedToken, "x.yml", &lexeme);
        assert_eq!(err.position, Some(Position::new(2, 1)));
        assert_eq!(err.span, Some(span(4, 5)));
        assert_eq!(err.source_name, "x.yml");
    }

    #[test]
    fn test_error_suggestions() {
        let with_suggestions = [
            ErrorKind::UnterminatedQuote,
            ErrorKind::UnterminatedBlockScalar,
            ErrorKind::UndefinedAlias("foo".to_owned()),
            ErrorKind::NestingTooDeep { limit: 1 },
            ErrorKind::TooManyAliases { limit: 1 },
        ];

        for kind in with_suggestions {
            assert!(
                kind.suggestion().is_some(),
                "{kind:?} should have a suggestion"
            );
        }

        assert!(ErrorKind::UnexpectedToken.suggestion().is_none());
    }
}
