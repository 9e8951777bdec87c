use std::fmt::{Debug, Display, Formatter};

use log::debug;

use crate::error::{Arity, Error, Result};
use crate::interpret::{eval, Value};
use crate::parse::SExp;
use crate::symtab::Env;

/// A `lambda` together with the scope chain it was created in.
pub struct Closure {
    params: Vec<String>,
    body: SExp,
    env: Env,
}

impl Closure {
    /// `params` must be distinct; `lambda` checks this before building one.
    pub fn new(params: Vec<String>, body: SExp, env: Env) -> Self {
        Closure { params, body, env }
    }

    pub fn arity(&self) -> Arity {
        Arity::Exactly(self.params.len())
    }

    /// Bind the arguments in a fresh scope on top of the captured chain and
    /// evaluate the body there.
    pub fn call(&self, args: Vec<Value>) -> Result<Value> {
        if args.len() != self.params.len() {
            return Err(Error::ArityMismatch {
                callee: "lambda",
                expected: self.arity(),
                got: args.len(),
            });
        }
        debug!("call {} with {} argument(s)", self, args.len());
        let scope = self.env.extend(self.params.iter().cloned().zip(args));
        eval(&self.body, &scope)
    }
}

impl Display for Closure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "(lambda ({}) {})", self.params.join(" "), self.body)
    }
}

impl Debug for Closure {
    // The captured chain is left out: it usually contains this closure.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}
