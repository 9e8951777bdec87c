//! Evaluation of s-expressions

use std::fmt::{Display, Formatter};
use std::rc::Rc;

use derive_more::From;
use log::trace;

use crate::builtin::Builtin;
use crate::closure::Closure;
use crate::error::{Error, Result};
use crate::lex::tokenize;
use crate::parse::{read, SExp, SExpIterator};
use crate::special::special_form_of_str;
use crate::symtab::Env;

#[derive(Clone, Debug, From)]
pub enum Value {
    Number(f64),
    Callable(Callable),
}

/// Anything that can sit in operator position.
#[derive(Clone, Debug)]
pub enum Callable {
    Builtin(Builtin),
    Closure(Rc<Closure>),
}

impl From<Builtin> for Value {
    fn from(builtin: Builtin) -> Self {
        Value::Callable(Callable::Builtin(builtin))
    }
}

impl From<Closure> for Value {
    fn from(closure: Closure) -> Self {
        Value::Callable(Callable::Closure(Rc::new(closure)))
    }
}

impl Value {
    pub const TRUE: Value = Value::Number(1.0);
    pub const FALSE: Value = Value::Number(0.0);

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Callable(_) => "procedure",
        }
    }

    /// `0` is false, any other number is true. Procedures have no truth
    /// value.
    pub fn truthy(&self, callee: &'static str, position: usize) -> Result<bool> {
        match self {
            Value::Number(n) => Ok(*n != 0.0),
            other => Err(Error::TypeMismatch {
                callee,
                position,
                found: other.type_name(),
            }),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for Callable {
    /// Closures are equal only to themselves.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callable::Builtin(a), Callable::Builtin(b)) => a == b,
            (Callable::Closure(a), Callable::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Callable(Callable::Builtin(builtin)) => write!(f, "#<builtin {}>", builtin),
            Value::Callable(Callable::Closure(closure)) => write!(f, "{}", closure),
        }
    }
}

impl Callable {
    pub fn call(&self, args: Vec<Value>) -> Result<Value> {
        match self {
            Callable::Builtin(builtin) => builtin.call(&args),
            Callable::Closure(closure) => closure.call(args),
        }
    }
}

/// Reduce `s_exp` to a value in `env`.
pub fn eval(s_exp: &SExp, env: &Env) -> Result<Value> {
    trace!("eval {}", s_exp);
    match s_exp {
        SExp::Num(n) => Ok(Value::Number(*n)),
        SExp::Sym(name) => env.lookup(name),
        SExp::Lst(lst) => match lst.as_slice() {
            [] => Err(Error::EmptyApplication),
            [f, args @ ..] => {
                if let Some(form) = f.as_sym().and_then(special_form_of_str) {
                    return form.eval(args, env);
                }
                let callable = match eval(f, env)? {
                    Value::Callable(callable) => callable,
                    other => return Err(Error::NotCallable(other.to_string())),
                };
                let args = args
                    .iter()
                    .map(|arg| eval(arg, env))
                    .collect::<Result<Vec<_>>>()?;
                callable.call(args)
            },
        },
    }
}

/// Read the first form of `input` and evaluate it in `env`. Anything after
/// the first form is ignored.
pub fn evaluate(input: &str, env: &Env) -> Result<Value> {
    let tokens = tokenize(input);
    let (s_exp, _) = read(&tokens)?;
    eval(&s_exp, env)
}

/// Evaluate every form of `input` in order, returning the value of the last
/// one (`0` when there are none). Stops at the first error; forms evaluated
/// before it keep their effects on `env`.
pub fn evaluate_all(input: &str, env: &Env) -> Result<Value> {
    SExpIterator::new(input).try_fold(Value::FALSE, |_, s_exp| eval(&s_exp?, env))
}
