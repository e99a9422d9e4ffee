// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Token types produced by the lexer.

use crate::span::{Position, Span};

/// Quote style for quoted strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// Single quote (')
    Single,
    /// Double quote (")
    Double,
}

/// Block scalar chomping indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Chomping {
    /// (default) or `-`: strip all trailing newlines
    #[default]
    Strip,
    /// `+` keep all trailing newlines
    Keep,
}

/// A dialect token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// End of input. Always the last token of a stream.
    Eof,

    // Scalars
    /// A run of word characters (`[A-Za-z0-9_-]`), usable as a mapping key
    Word(String),
    /// Any other bare text, consumed up to whitespace or an indicator
    Value(String),
    /// A quoted string with escapes already processed
    Quoted {
        text: String,
        style: QuoteStyle,
        /// `false` when the input ended before the closing quote
        terminated: bool,
    },

    // Indicators
    /// `:` mapping value indicator
    Colon,
    /// `-` block sequence entry indicator
    Dash,
    /// `|` literal block scalar marker
    Literal(Chomping),
    /// `>` folded block scalar marker
    Folded(Chomping),
    /// The raw lines following a block scalar marker, indentation included
    BlockText(String),
    /// `[` flow sequence start
    FlowSeqStart,
    /// `]` flow sequence end
    FlowSeqEnd,
    /// `{` flow mapping start
    FlowMapStart,
    /// `}` flow mapping end
    FlowMapEnd,
    /// `,` flow entry separator
    Comma,

    // Trivia
    /// Comment content (after `#`, without the `#` prefix)
    Comment(String),
    /// Line break; the indentation of the next line is the column of its first token
    Newline,

    // Anchors and aliases
    /// Anchor definition (`&name`)
    Anchor(String),
    /// Alias reference (`*name`)
    Alias(String),

    // Document markers
    /// `---` document start
    DocStart,
    /// `...` document end
    DocEnd,
}

impl Token {
    /// Returns `true` for bare scalar tokens that join into one plain scalar.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        matches!(self, Self::Word(_) | Self::Value(_))
    }

    /// Returns `true` for tokens that terminate a document.
    #[must_use]
    pub const fn ends_document(&self) -> bool {
        matches!(self, Self::Eof | Self::DocStart | Self::DocEnd)
    }

    /// Returns `true` if this is a flow indicator.
    #[must_use]
    pub const fn is_flow_indicator(&self) -> bool {
        matches!(
            self,
            Self::FlowMapStart
                | Self::FlowMapEnd
                | Self::FlowSeqStart
                | Self::FlowSeqEnd
                | Self::Comma
        )
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eof => write!(f, "end of input"),
            Self::Word(value) | Self::Value(value) => write!(f, "plain scalar '{value}'"),
            Self::Quoted { text, .. } => write!(f, "quoted scalar '{text}'"),
            Self::Colon => write!(f, "':'"),
            Self::Dash => write!(f, "'-'"),
            Self::Literal(_) => write!(f, "'|'"),
            Self::Folded(_) => write!(f, "'>'"),
            Self::BlockText(_) => write!(f, "block scalar content"),
            Self::FlowSeqStart => write!(f, "'['"),
            Self::FlowSeqEnd => write!(f, "']'"),
            Self::FlowMapStart => write!(f, "'{{'"),
            Self::FlowMapEnd => write!(f, "'}}'"),
            Self::Comma => write!(f, "','"),
            Self::Comment(comment) => write!(f, "comment '{comment}'"),
            Self::Newline => write!(f, "line break"),
            Self::Anchor(name) => write!(f, "anchor '&{name}'"),
            Self::Alias(name) => write!(f, "alias '*{name}'"),
            Self::DocStart => write!(f, "'---'"),
            Self::DocEnd => write!(f, "'...'"),
        }
    }
}

/// A token with its source span and the position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub span: Span,
    pub position: Position,
}

impl Lexeme {
    #[must_use]
    pub fn new(token: Token, span: Span, position: Position) -> Self {
        Self {
            token,
            span,
            position,
        }
    }
}

impl std::fmt::Display for Lexeme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.token.fmt(f)
    }
}
