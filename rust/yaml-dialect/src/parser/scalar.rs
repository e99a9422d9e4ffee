// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Scalar parsing: plain runs, quoted strings, mapping keys and block scalars.

use crate::error::{ErrorKind, ParseError};
use crate::node::{Node, ScalarStyle};
use crate::span::Position;
use crate::token::{Chomping, Lexeme, QuoteStyle, Token};

use super::Parser;

impl From<QuoteStyle> for ScalarStyle {
    fn from(style: QuoteStyle) -> Self {
        match style {
            QuoteStyle::Single => Self::SingleQuoted,
            QuoteStyle::Double => Self::DoubleQuoted,
        }
    }
}

impl Parser<'_> {
    /// Parse a plain or quoted scalar.
    pub(super) fn parse_scalar(&mut self) -> Result<Node, ParseError> {
        let position = self.current_position();
        let (text, style) = self.parse_scalar_text()?;
        Ok(Node::scalar(text, style, position))
    }

    /// Parse a mapping key: the text of a quoted or plain scalar.
    pub(super) fn parse_key(&mut self) -> Result<(String, Position), ParseError> {
        let position = self.current_position();
        let (text, _) = self.parse_scalar_text()?;
        Ok((text, position))
    }

    fn parse_scalar_text(&mut self) -> Result<(String, ScalarStyle), ParseError> {
        let Some(first) = self.peek() else {
            return Err(self.unexpected(&["a scalar"]));
        };
        match &first.token {
            Token::Quoted {
                text,
                style,
                terminated,
            } => {
                if !terminated {
                    return Err(self.error_at(ErrorKind::UnterminatedQuote, first));
                }
                self.advance();
                Ok((text.clone(), ScalarStyle::from(*style)))
            }
            token if token.is_plain() => Ok((self.parse_plain_run(first), ScalarStyle::Plain)),
            _ => Err(self.unexpected(&["a scalar"])),
        }
    }

    /// Join consecutive plain tokens into one scalar. The text is the exact
    /// source slice, so inner whitespace is preserved.
    fn parse_plain_run(&mut self, first: &Lexeme) -> String {
        let start = first.span.start;
        let mut end = first.span.end;
        while let Some(lexeme) = self.peek() {
            if !lexeme.token.is_plain() {
                break;
            }
            end = lexeme.span.end;
            self.advance();
        }
        self.input.get(start..end).unwrap_or_default().to_owned()
    }

    /// Parse a `|` or `>` block scalar from the body captured by the lexer.
    ///
    /// The first non-blank body line fixes the content indentation. Every
    /// other non-blank line must be indented at least as much.
    pub(super) fn parse_block_scalar(&mut self, min_column: usize) -> Result<Node, ParseError> {
        let Some(marker) = self.advance() else {
            return Err(self.unexpected(&["'|'", "'>'"]));
        };
        let (folded, chomping) = match marker.token {
            Token::Literal(chomping) => (false, chomping),
            Token::Folded(chomping) => (true, chomping),
            _ => return Err(self.error_at(ErrorKind::UnexpectedToken, marker)),
        };

        self.skip_comments();
        match self.peek_token() {
            Token::Newline => {
                self.advance();
            }
            Token::Eof => return Err(self.error_at(ErrorKind::UnterminatedBlockScalar, marker)),
            _ => return Err(self.unexpected(&["line break"])),
        }

        let Some(body) = self.peek() else {
            return Err(self.error_at(ErrorKind::UnterminatedBlockScalar, marker));
        };
        let Token::BlockText(raw) = &body.token else {
            return Err(self.error_at(ErrorKind::UnterminatedBlockScalar, marker));
        };
        self.advance();

        let lines: Vec<&str> = raw.split('\n').collect();
        let indent = lines
            .iter()
            .find(|line| !line.trim().is_empty())
            .map_or(0, |line| line.chars().take_while(|ch| *ch == ' ').count());
        if indent < min_column.saturating_sub(1) {
            return Err(self.error_at(ErrorKind::UnexpectedToken, body)
                .with_expected(vec!["indented block scalar content".to_owned()]));
        }

        let mut content = Vec::with_capacity(lines.len());
        for (offset, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                content.push("");
                continue;
            }
            let dedented = line
                .get(..indent)
                .filter(|prefix| prefix.bytes().all(|byte| byte == b' '))
                .and_then(|_| line.get(indent..));
            let Some(dedented) = dedented else {
                let position = Position::new(body.position.line + offset, 1);
                return Err(ParseError::new(ErrorKind::UnexpectedToken, self.source_name)
                    .with_position(position)
                    .with_found("less indented line".to_owned())
                    .with_expected(vec![format!("{indent} spaces of indentation")]));
            };
            content.push(dedented);
        }

        let trailing_blank = content.iter().rev().take_while(|line| line.is_empty()).count();
        content.truncate(content.len() - trailing_blank);

        let mut text = if folded {
            fold_lines(&content)
        } else {
            content.join("\n")
        };
        if chomping == Chomping::Keep && !content.is_empty() {
            text.push('\n');
            text.push_str(&"\n".repeat(trailing_blank));
        }

        let style = if folded {
            ScalarStyle::Folded
        } else {
            ScalarStyle::Literal
        };
        Ok(Node::scalar(text, style, marker.position))
    }
}

/// Join lines with spaces; blank lines become line breaks. The result is trimmed.
fn fold_lines(lines: &[&str]) -> String {
    let mut folded = String::new();
    for line in lines {
        if line.is_empty() {
            folded.push('\n');
            continue;
        }
        if !folded.is_empty() && !folded.ends_with('\n') {
            folded.push(' ');
        }
        folded.push_str(line);
    }
    folded.trim().to_owned()
}
