use logos::{Logos, SpannedIter};

pub(super) struct Token {
    pub(super) kind: TokenKind,
    pub(super) span: logos::Span,
}

pub(super) struct TokenIter<'a> {
    iter: SpannedIter<'a, LogosTokenKind>,
}

impl<'a> TokenIter<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        Self {
            iter: LogosTokenKind::lexer(input).spanned(),
        }
    }
}

impl<'a> Iterator for TokenIter<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let (kind, span) = self.iter.next()?;
        let kind = match kind {
            Ok(LogosTokenKind::Letters) => TokenKind::Letters,
            Ok(LogosTokenKind::Digits) => TokenKind::Digits,
            Err(_) => TokenKind::Error,
        };
        Some(Token { kind, span })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum TokenKind {
    Letters,
    Digits,
    Error,
}

#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
enum LogosTokenKind {
    #[regex("[A-Z]+")]
    Letters,
    #[regex("[0-9]+")]
    Digits,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_letters_and_digits() {
        let input = "AC13";
        let result: Vec<_> = TokenIter::new(input)
            .map(|token| (token.kind, &input[token.span]))
            .collect();

        assert_eq!(
            result,
            vec![(TokenKind::Letters, "AC"), (TokenKind::Digits, "13")]
        );
    }

    #[test]
    fn flags_anything_else() {
        let kinds: Vec<_> = TokenIter::new("a4").map(|token| token.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Error, TokenKind::Digits]);
    }
}
