// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Block structure parsing (block sequences and mappings).

use log::debug;
use ordermap::OrderMap;

use crate::error::ParseError;
use crate::node::{Node, NodeKind};
use crate::span::Position;
use crate::token::Token;

use super::Parser;

impl Parser<'_> {
    /// Parse a block mapping: `key: value` entries sharing the column of the first key.
    pub(super) fn parse_block_mapping(&mut self) -> Result<Node, ParseError> {
        let position = self.current_position();
        let column = position.column;
        let mut entries: OrderMap<String, Node> = OrderMap::new();

        loop {
            let (key, key_position) = self.parse_key()?;
            if *self.peek_token() != Token::Colon {
                return Err(self.unexpected(&["':'"]));
            }
            let colon_position = self.current_position();
            self.advance();

            let value = self.parse_mapping_value(column, colon_position)?;
            if entries.contains_key(&key) {
                debug!("Duplicate key '{key}' at {key_position}, keeping the last value");
            }
            entries.insert(key, value);

            self.skip_trivia();
            let Some(next) = self.peek() else { break };
            if next.token.ends_document() || next.position.column < column {
                break;
            }
            if next.position.column > column || !self.key_ahead() {
                return Err(self.unexpected(&["mapping key"]));
            }
        }

        Ok(Node::new(NodeKind::Mapping(entries), position))
    }

    /// Parse the value after a mapping key's colon.
    ///
    /// A value on the same line must end the line. Otherwise the value is
    /// the deeper indented content on the following lines, a block sequence
    /// at the key's own column, or null.
    fn parse_mapping_value(
        &mut self,
        column: usize,
        colon_position: Position,
    ) -> Result<Node, ParseError> {
        if !self.at_line_end() {
            let node = self.parse_node(column + 1)?;
            self.expect_line_end()?;
            return Ok(node);
        }

        self.skip_trivia();
        let Some(next) = self.peek() else {
            return Ok(Node::null(colon_position));
        };
        if next.token.ends_document() {
            return Ok(Node::null(colon_position));
        }
        if next.position.column > column {
            return self.parse_node(column + 1);
        }
        if next.position.column == column && next.token == Token::Dash {
            return self.parse_node(column);
        }
        Ok(Node::null(colon_position))
    }

    /// Parse a block sequence: `- item` lines sharing the column of the first dash.
    pub(super) fn parse_block_sequence(&mut self) -> Result<Node, ParseError> {
        let position = self.current_position();
        let column = position.column;
        let mut items = Vec::new();

        loop {
            let dash_position = self.current_position();
            self.advance(); // '-'
            items.push(self.parse_sequence_item(column, dash_position)?);

            self.skip_trivia();
            let Some(next) = self.peek() else { break };
            if next.token.ends_document() || next.position.column < column {
                break;
            }
            if next.position.column > column {
                return Err(self.unexpected(&["'-'"]));
            }
            if next.token != Token::Dash {
                // A mapping key at the column of a sequence nested under its parent key
                break;
            }
        }

        Ok(Node::new(NodeKind::Sequence(items), position))
    }

    fn parse_sequence_item(
        &mut self,
        column: usize,
        dash_position: Position,
    ) -> Result<Node, ParseError> {
        if !self.at_line_end() {
            let node = self.parse_node(column + 1)?;
            self.expect_line_end()?;
            return Ok(node);
        }

        self.skip_trivia();
        match self.peek() {
            Some(next) if !next.token.ends_document() && next.position.column > column => {
                self.parse_node(column + 1)
            }
            _ => Ok(Node::null(dash_position)),
        }
    }
}
