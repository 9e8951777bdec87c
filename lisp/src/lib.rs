//! humble: a small Scheme-like interpreter.
//!
//! Text goes through [`lex::tokenize`], [`parse::read`] and
//! [`interpret::eval`]; [`evaluate`] runs the whole pipeline for one form
//! against an [`Env`] built with [`Env::global`].

pub mod lex;
pub mod parse;
pub mod error;
pub mod symtab;
pub mod builtin;
pub mod closure;
pub mod special;
pub mod interpret;

pub use error::{Error, Result};
pub use interpret::{evaluate, evaluate_all, Callable, Value};
pub use parse::{SExp, SExpIterator};
pub use symtab::Env;
