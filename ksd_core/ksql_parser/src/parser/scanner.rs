//! Keyword scanner used by the statement grammars.
//!
//! Statements are lexed with `sqlparser`'s tokenizer; a statement it rejects
//! (an unterminated literal or quoted identifier) yields no tokens and so
//! matches no grammar.

use log::debug;
use sqlparser::dialect::GenericDialect;
use sqlparser::tokenizer::{Token, Tokenizer};

/// Significant tokens of `statement`, or `None` when it cannot be lexed.
pub(crate) fn tokenize(statement: &str) -> Option<Vec<Token>> {
    match Tokenizer::new(&GenericDialect {}, statement).tokenize() {
        Ok(tokens) => Some(
            tokens
                .into_iter()
                .filter(|tok| !matches!(tok, Token::Whitespace(_) | Token::EOF))
                .collect(),
        ),
        Err(e) => {
            debug!("cannot tokenize `{statement}`: {e}");
            None
        }
    }
}

pub(crate) fn is_keyword(tok: &Token, keyword: &str) -> bool {
    matches!(tok, Token::Word(w) if w.quote_style.is_none() && w.value.eq_ignore_ascii_case(keyword))
}

/// Cursor over a tokenized statement. Every `parse_*` method either consumes
/// what it matched or leaves the cursor where it was.
pub(crate) struct Scanner<'a> {
    tokens: &'a [Token],
    index: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, index: 0 }
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.tokens.len()
    }

    pub fn parse_keyword(&mut self, keyword: &str) -> bool {
        let matched = self
            .tokens
            .get(self.index)
            .is_some_and(|tok| is_keyword(tok, keyword));
        if matched {
            self.index += 1;
        }
        matched
    }

    /// Consumes all of `keywords` in order, or none of them.
    pub fn parse_keywords(&mut self, keywords: &[&str]) -> bool {
        let checkpoint = self.index;
        for keyword in keywords {
            if !self.parse_keyword(keyword) {
                self.index = checkpoint;
                return false;
            }
        }
        true
    }

    pub fn parse_if_not_exists(&mut self) -> bool {
        self.parse_keywords(&["IF", "NOT", "EXISTS"])
    }

    /// A bare or quoted identifier, spelled as written (quotes included).
    pub fn parse_object_name(&mut self) -> Option<String> {
        match self.tokens.get(self.index)? {
            Token::Word(w) => {
                self.index += 1;
                Some(w.to_string())
            }
            _ => None,
        }
    }

    /// A balanced `( ... )` group; returns the tokens between the parentheses.
    pub fn parse_parenthesized(&mut self) -> Option<&'a [Token]> {
        if self.tokens.get(self.index) != Some(&Token::LParen) {
            return None;
        }
        let open = self.index;
        let close = self.matching_close(open)?;
        self.index = close + 1;
        Some(&self.tokens[open + 1..close])
    }

    /// `WITH ( ... )`; returns the property list tokens.
    pub fn parse_with_clause(&mut self) -> Option<&'a [Token]> {
        let checkpoint = self.index;
        if !self.parse_keyword("WITH") {
            return None;
        }
        let clause = self.parse_parenthesized();
        if clause.is_none() {
            self.index = checkpoint;
        }
        clause
    }

    /// A `WITH ( ... )` group that ends the statement and lies after the cursor,
    /// e.g. one trailing a `SELECT` body. Does not move the cursor.
    pub fn trailing_with_clause(&self) -> Option<&'a [Token]> {
        let tokens = self.tokens;
        let last = tokens.len().checked_sub(1)?;
        if tokens[last] != Token::RParen {
            return None;
        }
        let open = self.matching_open(last)?;
        let with = open.checked_sub(1)?;
        if with < self.index || !is_keyword(&tokens[with], "WITH") {
            return None;
        }
        Some(&tokens[open + 1..last])
    }

    fn matching_close(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (idx, tok) in self.tokens.iter().enumerate().skip(open) {
            match tok {
                Token::LParen => depth += 1,
                Token::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(idx);
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn matching_open(&self, close: usize) -> Option<usize> {
        let mut depth = 0usize;
        for idx in (0..=close).rev() {
            match self.tokens[idx] {
                Token::RParen => depth += 1,
                Token::LParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(idx);
                    }
                }
                _ => {}
            }
        }
        None
    }
}
