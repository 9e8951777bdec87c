//! Everything that can go wrong while reading or evaluating a form.

use derive_more::Display;

/// How many arguments a callable accepts.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    #[display(fmt = "{}", _0)]
    Exactly(usize),
    #[display(fmt = "at least {}", _0)]
    AtLeast(usize),
    #[display(fmt = "any number")]
    Any,
}

impl Arity {
    pub fn accepts(self, got: usize) -> bool {
        match self {
            Arity::Exactly(n) => got == n,
            Arity::AtLeast(n) => got >= n,
            Arity::Any => true,
        }
    }
}

#[derive(Debug, Display, Clone, PartialEq)]
pub enum Error {
    /// The reader needed a form but the input ran out.
    #[display(fmt = "unexpected end of input")]
    UnexpectedEndOfInput,
    /// A list was opened but never closed.
    #[display(fmt = "unbalanced expression")]
    UnbalancedExpression,
    #[display(fmt = "unexpected ')'")]
    UnexpectedCloseParen,

    #[display(fmt = "unknown name - {:?}", _0)]
    UnboundName(String),
    #[display(fmt = "empty list expression")]
    EmptyApplication,
    /// Holds the rendered value that was in operator position.
    #[display(fmt = "{} is not callable", _0)]
    NotCallable(String),
    #[display(fmt = "malformed {} - {}", form, reason)]
    MalformedForm {
        form: &'static str,
        reason: &'static str,
    },
    #[display(
        fmt = "{} - wrong number of arguments (want {}, got {})",
        callee,
        expected,
        got
    )]
    ArityMismatch {
        callee: &'static str,
        expected: Arity,
        got: usize,
    },
    /// `position` is 1-based.
    #[display(
        fmt = "{} - bad type for argument {} (want number, got {})",
        callee,
        position,
        found
    )]
    TypeMismatch {
        callee: &'static str,
        position: usize,
        found: &'static str,
    },
    #[display(fmt = "{} - zero division", _0)]
    DivisionByZero(&'static str),
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn malformed(form: &'static str, reason: &'static str) -> Self {
        Error::MalformedForm { form, reason }
    }

    /// True for errors raised by the reader rather than the evaluator.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            Error::UnexpectedEndOfInput | Error::UnbalancedExpression | Error::UnexpectedCloseParen
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_accepts() {
        assert!(Arity::Exactly(2).accepts(2));
        assert!(!Arity::Exactly(2).accepts(3));
        assert!(Arity::AtLeast(1).accepts(4));
        assert!(!Arity::AtLeast(1).accepts(0));
        assert!(Arity::Any.accepts(0));
    }

    #[test]
    fn test_display() {
        let test_cases = [
            (Error::UnexpectedCloseParen, "unexpected ')'"),
            (Error::UnboundName("x".into()), "unknown name - \"x\""),
            (
                Error::ArityMismatch {
                    callee: "mod",
                    expected: Arity::Exactly(2),
                    got: 3,
                },
                "mod - wrong number of arguments (want 2, got 3)",
            ),
            (
                Error::ArityMismatch {
                    callee: "-",
                    expected: Arity::AtLeast(1),
                    got: 0,
                },
                "- - wrong number of arguments (want at least 1, got 0)",
            ),
            (Error::DivisionByZero("/"), "/ - zero division"),
            (
                Error::malformed("lambda", "parameters must be symbols"),
                "malformed lambda - parameters must be symbols",
            ),
        ];

        for (error, expected) in test_cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_is_syntax_error() {
        assert!(Error::UnbalancedExpression.is_syntax_error());
        assert!(!Error::EmptyApplication.is_syntax_error());
    }
}
