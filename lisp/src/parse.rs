use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};
use crate::lex::{tokenize, Token};
use serde_derive::Serialize;

#[derive(PartialEq, Debug, Clone, Serialize)]
pub enum SExp {
    Num(f64),
    Sym(String),
    Lst(Vec<SExp>),
}

impl SExp {
    /// Classify a single atom: a float literal if it parses as one, a
    /// symbol otherwise.
    pub fn atom(text: &str) -> SExp {
        match text.parse::<f64>() {
            Ok(num) => SExp::Num(num),
            Err(_) => SExp::Sym(text.to_string()),
        }
    }

    pub fn as_sym(&self) -> Option<&str> {
        if let SExp::Sym(s) = self {
            Some(s)
        } else {
            None
        }
    }
}

impl Display for SExp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SExp::Num(num) => write!(f, "{}", num),
            SExp::Sym(sym) => write!(f, "{}", sym),
            SExp::Lst(lst) => {
                write!(f, "(")?;
                for (i, item) in lst.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            },
        }
    }
}

/// Read exactly one form from the front of `tokens`, returning it along
/// with the tokens that follow it.
pub fn read<'t, 'a>(tokens: &'t [Token<'a>]) -> Result<(SExp, &'t [Token<'a>])> {
    let (first, mut rest) = tokens.split_first().ok_or(Error::UnexpectedEndOfInput)?;
    match first {
        Token::LParen => {
            let mut lst = Vec::new();
            loop {
                match rest.split_first() {
                    None => return Err(Error::UnbalancedExpression),
                    Some((Token::RParen, after)) => return Ok((SExp::Lst(lst), after)),
                    Some(_) => {
                        let (item, after) = read(rest)?;
                        lst.push(item);
                        rest = after;
                    },
                }
            }
        },
        Token::RParen => Err(Error::UnexpectedCloseParen),
        Token::Atom(text) => Ok((SExp::atom(text), rest)),
    }
}

/// Reads every top-level form of a source text, in order.
///
/// Stops after the first read error: once the parens are off there is no
/// telling where the next form starts.
pub struct SExpIterator<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    failed: bool,
}

impl<'a> SExpIterator<'a> {
    pub fn new(input: &'a str) -> SExpIterator<'a> {
        Self {
            tokens: tokenize(input),
            pos: 0,
            failed: false,
        }
    }

    fn remaining(&self) -> &[Token<'a>] {
        &self.tokens[self.pos..]
    }
}

impl<'a> Iterator for SExpIterator<'a> {
    type Item = Result<SExp>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining().is_empty() {
            return None;
        }
        let total = self.tokens.len();
        match read(self.remaining()) {
            Ok((s_exp, rest)) => {
                self.pos = total - rest.len();
                Some(Ok(s_exp))
            },
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            },
        }
    }
}
