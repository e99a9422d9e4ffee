// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Recursive descent parser.
//!
//! This module implements the second phase of parsing: converting the token
//! stream into one node tree per document. The parser is single pass and
//! never backtracks. Block collections record the column of their first
//! token; siblings share it, deeper tokens belong to the current entry and a
//! smaller column closes the collection.
//!
//! Unlike the lexer, the parser is strict: the first structural problem
//! aborts the whole call.

mod block;
mod flow;
mod scalar;

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{ErrorKind, ParseError};
use crate::node::{Node, NodeKind};
use crate::options::ParseOptions;
use crate::span::Position;
use crate::token::{Lexeme, Token};

/// Returned when peeking past the end of the token stream.
static EOF: Token = Token::Eof;

/// Parse a token stream into one node per document.
pub(crate) fn parse_tokens(
    tokens: &[Lexeme],
    input: &str,
    source_name: &str,
    options: &ParseOptions,
) -> Result<Vec<Node>, ParseError> {
    Parser::new(tokens, input, source_name, options).parse_stream()
}

/// Parser state. Created for a single call and dropped with its anchor table.
pub(crate) struct Parser<'a> {
    tokens: &'a [Lexeme],
    input: &'a str,
    source_name: &'a str,
    options: &'a ParseOptions,
    pos: usize,
    /// Current nesting of `parse_node` calls
    depth: usize,
    /// Number of unclosed flow collections
    flow_depth: usize,
    /// Map of anchor names to a snapshot of their nodes
    anchors: HashMap<String, Rc<Node>>,
}

impl<'a> Parser<'a> {
    pub fn new(
        tokens: &'a [Lexeme],
        input: &'a str,
        source_name: &'a str,
        options: &'a ParseOptions,
    ) -> Self {
        Self {
            tokens,
            input,
            source_name,
            options,
            pos: 0,
            depth: 0,
            flow_depth: 0,
            anchors: HashMap::new(),
        }
    }

    /// Peek at the current token without consuming it.
    fn peek(&self) -> Option<&'a Lexeme> {
        self.tokens.get(self.pos)
    }

    fn token_at(&self, index: usize) -> &'a Token {
        self.tokens
            .get(index)
            .map_or(&EOF, |lexeme| &lexeme.token)
    }

    fn peek_token(&self) -> &'a Token {
        self.token_at(self.pos)
    }

    fn previous_token(&self) -> Option<&'a Token> {
        self.pos.checked_sub(1).map(|index| self.token_at(index))
    }

    /// Consume the current token and return it.
    fn advance(&mut self) -> Option<&'a Lexeme> {
        let lexeme = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(lexeme)
    }

    fn current_position(&self) -> Position {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|lexeme| lexeme.position)
            .unwrap_or_default()
    }

    /// The current token is the first one on its line.
    fn at_line_start(&self) -> bool {
        matches!(self.previous_token(), None | Some(Token::Newline))
    }

    /// Skip comments on the current line.
    fn skip_comments(&mut self) {
        while let Token::Comment(_) = self.peek_token() {
            self.advance();
        }
    }

    /// Skip comments and line breaks.
    fn skip_trivia(&mut self) {
        while let Token::Comment(_) | Token::Newline = self.peek_token() {
            self.advance();
        }
    }

    /// The rest of the current line holds nothing but comments.
    fn at_line_end(&self) -> bool {
        let mut index = self.pos;
        while let Token::Comment(_) = self.token_at(index) {
            index += 1;
        }
        let token = self.token_at(index);
        *token == Token::Newline || token.ends_document()
    }

    /// Require the end of the current line after a value.
    fn expect_line_end(&mut self) -> Result<(), ParseError> {
        if self.at_line_start() {
            // A nested block collection already consumed the line break.
            return Ok(());
        }
        if self.at_line_end() {
            self.skip_comments();
            return Ok(());
        }
        Err(self.unexpected(&["line break"]))
    }

    /// A mapping key (a quoted scalar or a run of plain tokens) followed by
    /// `:` starts at the current token.
    fn key_ahead(&self) -> bool {
        match self.peek_token() {
            Token::Quoted { .. } => *self.token_at(self.pos + 1) == Token::Colon,
            token if token.is_plain() => {
                let mut index = self.pos;
                while self.token_at(index).is_plain() {
                    index += 1;
                }
                *self.token_at(index) == Token::Colon
            }
            _ => false,
        }
    }

    /// Build an unexpected-token error at the current token.
    fn unexpected(&self, expected: &[&str]) -> ParseError {
        let error = ParseError::new(ErrorKind::UnexpectedToken, self.source_name)
            .with_found(self.peek_token().to_string())
            .with_expected(expected.iter().map(|item| (*item).to_owned()).collect());
        match self.peek() {
            Some(lexeme) => error.with_position(lexeme.position).with_span(lexeme.span),
            None => error,
        }
    }

    /// Build an error of the given kind located at a token.
    fn error_at(&self, kind: ErrorKind, lexeme: &Lexeme) -> ParseError {
        ParseError::at(kind, self.source_name, lexeme)
    }

    /// Parse all documents in the stream.
    pub fn parse_stream(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut documents = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek_token() {
                Token::Eof => break,
                Token::DocEnd => {
                    self.advance();
                }
                Token::DocStart => {
                    self.advance();
                    documents.push(self.parse_document()?);
                }
                _ => documents.push(self.parse_document()?),
            }
        }
        Ok(documents)
    }

    /// Parse one document up to the next document marker or the end of input.
    fn parse_document(&mut self) -> Result<Node, ParseError> {
        self.skip_trivia();
        if self.peek_token().ends_document() {
            return Ok(Node::null(self.current_position()));
        }

        let node = self.parse_node(1)?;
        self.skip_trivia();
        if self.peek_token().ends_document() {
            Ok(node)
        } else {
            Err(self.unexpected(&["end of document"]))
        }
    }

    /// Parse the node starting at the next significant token.
    ///
    /// A token that starts a line left of `min_column` belongs to an
    /// enclosing collection, so the node is empty.
    pub(crate) fn parse_node(&mut self, min_column: usize) -> Result<Node, ParseError> {
        self.depth += 1;
        let result = if self.depth > self.options.max_depth {
            let limit = self.options.max_depth;
            let position = self.current_position();
            Err(ParseError::new(ErrorKind::NestingTooDeep { limit }, self.source_name)
                .with_position(position))
        } else {
            self.parse_node_content(min_column)
        };
        self.depth -= 1;
        result
    }

    fn parse_node_content(&mut self, min_column: usize) -> Result<Node, ParseError> {
        self.skip_trivia();
        let Some(lexeme) = self.peek() else {
            return Ok(Node::null(self.current_position()));
        };
        let position = lexeme.position;
        if lexeme.token.ends_document() || (self.at_line_start() && position.column < min_column)
        {
            return Ok(Node::null(position));
        }

        match &lexeme.token {
            Token::Anchor(name) => {
                self.advance();
                let node = self.parse_node(min_column)?.with_anchor(name.clone());
                self.anchors.insert(name.clone(), Rc::new(node.clone()));
                Ok(node)
            }
            Token::Alias(name) => {
                self.advance();
                let target = self.anchors.get(name).cloned();
                Ok(Node::new(
                    NodeKind::Alias {
                        name: name.clone(),
                        target,
                    },
                    position,
                ))
            }
            Token::Dash => self.parse_block_sequence(),
            Token::FlowSeqStart => self.parse_flow_sequence(),
            Token::FlowMapStart => self.parse_flow_mapping(),
            Token::Literal(_) | Token::Folded(_) => self.parse_block_scalar(min_column),
            Token::Word(_) | Token::Value(_) | Token::Quoted { .. } => {
                if self.flow_depth == 0 && self.key_ahead() {
                    if self.previous_token() == Some(&Token::Colon) {
                        // `a: b: c`
                        self.skip_key();
                        return Err(self.unexpected(&["line break"]));
                    }
                    return self.parse_block_mapping();
                }
                self.parse_scalar()
            }
            _ => Err(self.unexpected(&["a value"])),
        }
    }

    /// Move past a key so errors point at the colon that follows it.
    fn skip_key(&mut self) {
        while self.peek_token().is_plain() || matches!(self.peek_token(), Token::Quoted { .. }) {
            self.advance();
        }
    }
}
