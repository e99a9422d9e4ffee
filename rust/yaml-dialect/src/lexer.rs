// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Lexer (tokenizer) for the configuration dialect.
//!
//! This module implements the first phase of parsing: converting the
//! character stream into a finite token stream. The lexer is lenient and
//! never fails: characters it cannot classify become best-effort value
//! tokens, and a missing closing quote is flagged on the token so the parser
//! can report it with a position.
//!
//! Like the parser, the lexer is context aware. It tracks the flow depth
//! (`,[]{}` are delimiters only inside flow collections) and the previous
//! token (quotes, anchors, block markers and flow openers only have a meaning
//! where a node can start).

use crate::span::{Position, span};
use crate::token::{Chomping, Lexeme, QuoteStyle, Token};

/// Characters allowed in a key candidate (`Word`) token.
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-')
}

/// Characters allowed in anchor and alias names.
fn is_anchor_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '-')
}

fn is_flow_indicator(ch: char) -> bool {
    matches!(ch, ',' | '[' | ']' | '{' | '}')
}

/// Whitespace, a line break or the end of input.
fn is_separator(ch: Option<char>) -> bool {
    matches!(ch, None | Some(' ' | '\t' | '\n' | '\r'))
}

/// Tokenize the full source text.
///
/// The returned stream always ends with [`Token::Eof`].
#[must_use]
pub fn tokenize(input: &str) -> Vec<Lexeme> {
    Lexer::new(input).tokenize()
}

/// Lexer state. The cursor is a byte offset into the input.
pub struct Lexer<'input> {
    input: &'input str,
    byte_pos: usize,
    /// Current line (1-based)
    line: usize,
    /// Characters consumed on the current line (0 at line start)
    column: usize,
    /// Leading whitespace of the current line
    line_indent: usize,
    /// Number of unclosed `[` or `{`
    flow_depth: usize,
    /// Indentation a block scalar body must exceed, set by a marker whose
    /// body starts at the next line break.
    block_indent: Option<usize>,
    tokens: Vec<Lexeme>,
}

impl<'input> Lexer<'input> {
    pub fn new(input: &'input str) -> Self {
        let mut lexer = Self {
            input,
            byte_pos: 0,
            line: 1,
            column: 0,
            line_indent: 0,
            flow_depth: 0,
            block_indent: None,
            tokens: Vec::new(),
        };
        lexer.line_indent = lexer.measure_indent();
        lexer
    }

    /// Consume the lexer and produce the token stream.
    pub fn tokenize(mut self) -> Vec<Lexeme> {
        while let Some(ch) = self.peek() {
            match ch {
                '\n' => self.lex_newline(),
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '#' => self.lex_comment(),
                _ => self.lex_token(ch),
            }
        }

        let end = self.byte_pos;
        let position = self.position();
        self.tokens
            .push(Lexeme::new(Token::Eof, span(end, end), position));
        self.tokens
    }

    fn rest(&self) -> &'input str {
        self.input.get(self.byte_pos..).unwrap_or_default()
    }

    /// Peek the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Peek `n` characters ahead (0 = current character).
    fn peek_n(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// Advance to the next character and return the current one.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.byte_pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
            self.line_indent = self.measure_indent();
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn measure_indent(&self) -> usize {
        self.rest()
            .chars()
            .take_while(|ch| matches!(ch, ' ' | '\t'))
            .count()
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column + 1)
    }

    fn push(&mut self, token: Token, start: usize, position: Position) {
        self.tokens
            .push(Lexeme::new(token, span(start, self.byte_pos), position));
    }

    fn slice(&self, start: usize) -> String {
        self.input
            .get(start..self.byte_pos)
            .unwrap_or_default()
            .to_owned()
    }

    fn last_token(&self) -> Option<&Token> {
        self.tokens.last().map(|lexeme| &lexeme.token)
    }

    /// No token has been produced on the current line yet.
    fn at_line_start(&self) -> bool {
        matches!(self.last_token(), None | Some(Token::Newline))
    }

    /// The previous token leaves room for a new node.
    fn at_node_start(&self) -> bool {
        matches!(
            self.last_token(),
            None | Some(
                Token::Newline
                    | Token::Colon
                    | Token::Dash
                    | Token::Anchor(_)
                    | Token::DocStart
                    | Token::FlowSeqStart
                    | Token::FlowMapStart
                    | Token::Comma
            )
        )
    }

    /// A `:` at the cursor is a mapping indicator rather than scalar text.
    fn colon_is_indicator(&self) -> bool {
        if self.colon_ends_plain() {
            return true;
        }
        // After a JSON-like value (`{"a":1}`) the colon is always an indicator.
        self.flow_depth > 0
            && matches!(
                self.last_token(),
                Some(Token::Quoted { .. } | Token::FlowSeqEnd | Token::FlowMapEnd)
            )
    }

    /// A `:` at the cursor terminates a plain scalar.
    fn colon_ends_plain(&self) -> bool {
        let next = self.peek_n(1);
        is_separator(next) || (self.flow_depth > 0 && next.is_some_and(is_flow_indicator))
    }

    fn lex_newline(&mut self) {
        let start = self.byte_pos;
        let position = self.position();
        self.advance();
        self.push(Token::Newline, start, position);

        if let Some(threshold) = self.block_indent.take() {
            self.lex_block_body(threshold);
        }
    }

    fn lex_comment(&mut self) {
        let start = self.byte_pos;
        let position = self.position();
        self.advance(); // '#'
        let text_start = self.byte_pos;
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
        let text = self.slice(text_start).trim_end_matches('\r').to_owned();
        self.push(Token::Comment(text), start, position);
    }

    fn lex_token(&mut self, ch: char) {
        let start = self.byte_pos;
        let position = self.position();

        if self.column == 0 && self.flow_depth == 0 {
            if let Some(marker) = self.document_marker() {
                for _ in 0..3 {
                    self.advance();
                }
                self.push(marker, start, position);
                return;
            }
        }

        match ch {
            '-' if self.flow_depth == 0
                && (self.at_line_start()
                    || matches!(self.last_token(), Some(Token::Dash | Token::DocStart)))
                && is_separator(self.peek_n(1)) =>
            {
                self.advance();
                self.push(Token::Dash, start, position);
            }
            ':' if self.colon_is_indicator() => {
                self.advance();
                self.push(Token::Colon, start, position);
            }
            '[' | '{' if self.flow_depth > 0 || self.at_node_start() => {
                self.advance();
                self.flow_depth += 1;
                let token = if ch == '[' {
                    Token::FlowSeqStart
                } else {
                    Token::FlowMapStart
                };
                self.push(token, start, position);
            }
            ']' | '}' | ',' if self.flow_depth > 0 => {
                self.advance();
                let token = match ch {
                    ']' => Token::FlowSeqEnd,
                    '}' => Token::FlowMapEnd,
                    _ => Token::Comma,
                };
                if token != Token::Comma {
                    self.flow_depth -= 1;
                }
                self.push(token, start, position);
            }
            '|' | '>' if self.flow_depth == 0 && self.at_node_start() => {
                if !self.lex_block_marker(ch, start, position) {
                    self.lex_plain(start, position);
                }
            }
            '&' | '*' if self.at_node_start() => {
                if !self.lex_anchor(ch, start, position) {
                    self.lex_plain(start, position);
                }
            }
            '"' | '\'' if self.at_node_start() => self.lex_quoted(ch, start, position),
            _ => self.lex_plain(start, position),
        }
    }

    /// `---` or `...` at column 1 followed by a separator.
    fn document_marker(&self) -> Option<Token> {
        let rest = self.rest();
        let after = rest.get(3..).and_then(|tail| tail.chars().next());
        if !is_separator(after) {
            return None;
        }
        if rest.starts_with("---") {
            Some(Token::DocStart)
        } else if rest.starts_with("...") {
            Some(Token::DocEnd)
        } else {
            None
        }
    }

    /// Lex `|` or `>` with an optional chomping indicator.
    ///
    /// Returns `false` (consuming nothing) when the character is not followed
    /// by a separator, in which case it is plain text.
    fn lex_block_marker(&mut self, ch: char, start: usize, position: Position) -> bool {
        let (chomping, width) = match self.peek_n(1) {
            Some('+') => (Chomping::Keep, 2),
            Some('-') => (Chomping::Strip, 2),
            _ => (Chomping::Strip, 1),
        };
        if !is_separator(self.peek_n(width)) {
            return false;
        }
        for _ in 0..width {
            self.advance();
        }
        let token = if ch == '|' {
            Token::Literal(chomping)
        } else {
            Token::Folded(chomping)
        };
        self.block_indent = Some(self.block_threshold());
        self.push(token, start, position);
        true
    }

    /// Indentation the body of a block scalar marker must exceed: the column
    /// of the key or dash owning the marker, or the line indentation.
    fn block_threshold(&self) -> usize {
        let mut previous = self
            .tokens
            .iter()
            .rev()
            .skip_while(|lexeme| matches!(lexeme.token, Token::Anchor(_)));
        match previous.next() {
            Some(lexeme) if lexeme.token == Token::Colon => {
                let mut key_column = None;
                for lexeme in previous {
                    match &lexeme.token {
                        Token::Quoted { .. } => {
                            key_column = Some(lexeme.position.column);
                            break;
                        }
                        token if token.is_plain() => key_column = Some(lexeme.position.column),
                        _ => break,
                    }
                }
                key_column.map_or(self.line_indent, |column| column - 1)
            }
            Some(lexeme) if lexeme.token == Token::Dash => lexeme.position.column - 1,
            _ => self.line_indent,
        }
    }

    /// Capture the lines following a block scalar marker.
    ///
    /// Blank lines and lines indented deeper than `threshold` belong to the
    /// body. They are kept verbatim so comment and quote characters inside
    /// the body are never tokenized.
    fn lex_block_body(&mut self, threshold: usize) {
        let start = self.byte_pos;
        let position = self.position();
        let mut lines: Vec<&'input str> = Vec::new();

        loop {
            let rest = self.rest();
            if rest.is_empty() {
                break;
            }
            let line = rest.split('\n').next().unwrap_or_default();
            let content = line.trim_end_matches('\r');
            let is_blank = content.trim().is_empty();
            let indent = content.chars().take_while(|ch| *ch == ' ').count();
            if !is_blank && indent <= threshold {
                break;
            }
            lines.push(content);

            let consumed = line.len() + usize::from(rest.len() > line.len());
            let target = self.byte_pos + consumed;
            while self.byte_pos < target {
                self.advance();
            }
        }

        if lines.is_empty() {
            return;
        }
        self.push(Token::BlockText(lines.join("\n")), start, position);
        if self.column == 0 && self.byte_pos > start {
            let end = self.byte_pos;
            let position = self.position();
            self.tokens
                .push(Lexeme::new(Token::Newline, span(end, end), position));
        }
    }

    /// Lex `&name` or `*name`. Returns `false` when no name follows the sigil.
    fn lex_anchor(&mut self, sigil: char, start: usize, position: Position) -> bool {
        let name_len: usize = self
            .rest()
            .chars()
            .skip(1)
            .take_while(|ch| is_anchor_char(*ch))
            .map(char::len_utf8)
            .sum();
        if name_len == 0 {
            return false;
        }

        self.advance(); // sigil
        let name_start = self.byte_pos;
        while self.byte_pos < name_start + name_len {
            self.advance();
        }
        let name = self.slice(name_start);
        let token = if sigil == '&' {
            Token::Anchor(name)
        } else {
            Token::Alias(name)
        };
        self.push(token, start, position);
        true
    }

    /// Lex a quoted string, processing escape sequences.
    ///
    /// Single-quoted strings may span lines; double-quoted strings end at the
    /// line break. Either way a missing closing quote only marks the token as
    /// unterminated.
    fn lex_quoted(&mut self, quote: char, start: usize, position: Position) {
        let style = if quote == '"' {
            QuoteStyle::Double
        } else {
            QuoteStyle::Single
        };
        self.advance(); // opening quote

        let mut text = String::new();
        let mut terminated = false;
        while let Some(ch) = self.peek() {
            match ch {
                '\r' if self.peek_n(1) == Some('\n') => {
                    self.advance();
                }
                '\n' if style == QuoteStyle::Double => break,
                '\\' => {
                    self.advance();
                    match self.advance() {
                        Some('n') => text.push('\n'),
                        Some('t') => text.push('\t'),
                        Some('r') => text.push('\r'),
                        Some('0') => text.push('\0'),
                        Some(escaped @ ('\\' | '"' | '\'')) => text.push(escaped),
                        Some(other) => {
                            text.push('\\');
                            text.push(other);
                        }
                        None => text.push('\\'),
                    }
                }
                _ if ch == quote => {
                    self.advance();
                    // `''` is a literal quote inside single quotes
                    if style == QuoteStyle::Single && self.peek() == Some('\'') {
                        self.advance();
                        text.push('\'');
                        continue;
                    }
                    terminated = true;
                    break;
                }
                _ => {
                    text.push(ch);
                    self.advance();
                }
            }
        }

        self.push(
            Token::Quoted {
                text,
                style,
                terminated,
            },
            start,
            position,
        );
    }

    /// Lex bare text up to whitespace, an indicator colon or (in flow
    /// context) a flow indicator.
    fn lex_plain(&mut self, start: usize, position: Position) {
        let mut is_word = true;
        while let Some(ch) = self.peek() {
            if matches!(ch, ' ' | '\t' | '\n' | '\r')
                || (ch == ':' && self.colon_ends_plain())
                || (self.flow_depth > 0 && is_flow_indicator(ch))
            {
                break;
            }
            is_word &= is_word_char(ch);
            self.advance();
        }
        // Always make progress, even on a character no rule accepts.
        if self.byte_pos == start && self.advance().is_some() {
            is_word = false;
        }

        let text = self.slice(start);
        let token = if is_word {
            Token::Word(text)
        } else {
            Token::Value(text)
        };
        self.push(token, start, position);
    }
}
