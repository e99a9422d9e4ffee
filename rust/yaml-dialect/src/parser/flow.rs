// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Flow collection parsing: `[a, b]` and `{a: 1, b: 2}`.
//!
//! Flow collections may span lines; indentation is not significant inside them.

use log::debug;
use ordermap::OrderMap;

use crate::error::ParseError;
use crate::node::{Node, NodeKind};
use crate::token::Token;

use super::Parser;

impl Parser<'_> {
    /// Parse a flow sequence. A trailing comma is allowed and `key: value`
    /// items become single-pair mappings.
    pub(super) fn parse_flow_sequence(&mut self) -> Result<Node, ParseError> {
        let position = self.current_position();
        self.advance(); // '['
        self.flow_depth += 1;
        let mut items = Vec::new();

        loop {
            self.skip_trivia();
            match self.peek_token() {
                Token::FlowSeqEnd => {
                    self.advance();
                    break;
                }
                token if token.ends_document() => return Err(self.unexpected(&["']'"])),
                _ => {}
            }

            let item = if self.key_ahead() {
                let pair_position = self.current_position();
                let (key, _) = self.parse_key()?;
                self.advance(); // ':'
                let value = self.parse_flow_value()?;
                let mut pair = OrderMap::new();
                pair.insert(key, value);
                Node::new(NodeKind::Mapping(pair), pair_position)
            } else {
                self.parse_node(0)?
            };
            items.push(item);

            self.skip_trivia();
            match self.peek_token() {
                Token::Comma => {
                    self.advance();
                }
                Token::FlowSeqEnd => {
                    self.advance();
                    break;
                }
                _ => return Err(self.unexpected(&["','", "']'"])),
            }
        }

        self.flow_depth -= 1;
        Ok(Node::new(NodeKind::Sequence(items), position))
    }

    /// Parse a flow mapping. A key without a colon maps to null.
    pub(super) fn parse_flow_mapping(&mut self) -> Result<Node, ParseError> {
        let position = self.current_position();
        self.advance(); // '{'
        self.flow_depth += 1;
        let mut entries: OrderMap<String, Node> = OrderMap::new();

        loop {
            self.skip_trivia();
            match self.peek_token() {
                Token::FlowMapEnd => {
                    self.advance();
                    break;
                }
                Token::Word(_) | Token::Value(_) | Token::Quoted { .. } => {}
                token if token.ends_document() => return Err(self.unexpected(&["'}'"])),
                _ => return Err(self.unexpected(&["mapping key"])),
            }

            let (key, key_position) = self.parse_key()?;
            self.skip_trivia();
            let value = if *self.peek_token() == Token::Colon {
                self.advance();
                self.parse_flow_value()?
            } else {
                Node::null(key_position)
            };
            if entries.contains_key(&key) {
                debug!("Duplicate key '{key}' at {key_position}, keeping the last value");
            }
            entries.insert(key, value);

            self.skip_trivia();
            match self.peek_token() {
                Token::Comma => {
                    self.advance();
                }
                Token::FlowMapEnd => {
                    self.advance();
                    break;
                }
                _ => return Err(self.unexpected(&["','", "'}'"])),
            }
        }

        self.flow_depth -= 1;
        Ok(Node::new(NodeKind::Mapping(entries), position))
    }

    /// Parse the value after a colon inside a flow collection.
    fn parse_flow_value(&mut self) -> Result<Node, ParseError> {
        self.skip_trivia();
        match self.peek_token() {
            Token::Comma | Token::FlowSeqEnd | Token::FlowMapEnd => {
                Ok(Node::null(self.current_position()))
            }
            _ => self.parse_node(0),
        }
    }
}
