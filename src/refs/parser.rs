use std::iter::Peekable;

use crate::error::ParseError;

use super::{
    lexer::{Token, TokenIter, TokenKind},
    row_index, Ref,
};

pub(super) struct Parser<'a> {
    input: &'a str,
    iter: Peekable<TokenIter<'a>>,
}

impl<'a> Parser<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        Self {
            input,
            iter: TokenIter::new(input).peekable(),
        }
    }

    fn malformed(&self) -> ParseError {
        ParseError::MalformedRef(self.input.to_owned())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        match self.iter.next() {
            Some(tok) if tok.kind == kind => Ok(tok),
            _ => Err(self.malformed()),
        }
    }

    pub(super) fn parse_ref(&mut self) -> Result<Ref, ParseError> {
        let letters = self.expect(TokenKind::Letters)?;
        let digits = self.expect(TokenKind::Digits)?;
        if self.iter.peek().is_some() {
            return Err(self.malformed());
        }

        let row = row_index(&self.input[letters.span])?;
        let hole = self.input[digits.span]
            .parse::<usize>()
            .map_err(|_| self.malformed())?;
        Ref::new(row, hole)
    }
}
