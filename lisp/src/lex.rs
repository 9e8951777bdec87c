use derive_more::Display;
use logos::{Lexer, Logos};

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
pub enum RawToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    /// Anything that is not a paren, whitespace, or the start of a comment.
    #[regex(r"[^()\s;]+")]
    Atom,

    #[error]
    #[regex(r"\s+", logos::skip)]
    #[regex(r";[^\n]*", logos::skip)]
    Error,
}

/// A lexical unit handed to the reader.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum Token<'a> {
    #[display(fmt = "(")]
    LParen,
    #[display(fmt = ")")]
    RParen,
    #[display(fmt = "{}", _0)]
    Atom(&'a str),
}

/// Split `input` into tokens, dropping whitespace and `;` comments.
///
/// Every character is covered by one of the lexer rules, so this never
/// fails; an unmatched paren is the reader's problem.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut lexer: Lexer<_> = RawToken::lexer(input);
    let mut tokens = Vec::new();
    while let Some(raw_token) = lexer.next() {
        let token = match raw_token {
            RawToken::LParen => Token::LParen,
            RawToken::RParen => Token::RParen,
            RawToken::Atom | RawToken::Error => Token::Atom(lexer.slice()),
        };
        tokens.push(token);
    }
    tokens
}

/// Number of parens still open at the end of `tokens`. Negative when there
/// are more closing than opening parens.
pub fn paren_depth(tokens: &[Token<'_>]) -> isize {
    tokens.iter().fold(0, |depth, token| match token {
        Token::LParen => depth + 1,
        Token::RParen => depth - 1,
        Token::Atom(_) => depth,
    })
}
