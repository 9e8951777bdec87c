//! Procedures provided by the host.

use std::fmt::{Display, Formatter};

use crate::error::{Arity, Error, Result};
use crate::interpret::Value;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// +
    Add,
    /// -
    Sub,
    /// *
    Mul,
    /// not
    Not,
    /// begin
    Begin,
    /// Operators taking exactly two numbers.
    Binary(BinaryOp),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// /
    Div,
    /// mod, %
    Mod,
    /// <
    Lt,
    /// <=
    Le,
    /// >
    Gt,
    /// >=
    Ge,
    /// =, eq?
    Eq,
    /// !=
    Ne,
}

/// Names bound in the global environment. Some builtins go by two names.
pub const BINDINGS: &[(&str, Builtin)] = &[
    ("+", Builtin::Add),
    ("-", Builtin::Sub),
    ("*", Builtin::Mul),
    ("/", Builtin::Binary(BinaryOp::Div)),
    ("%", Builtin::Binary(BinaryOp::Mod)),
    ("mod", Builtin::Binary(BinaryOp::Mod)),
    ("<", Builtin::Binary(BinaryOp::Lt)),
    ("<=", Builtin::Binary(BinaryOp::Le)),
    (">", Builtin::Binary(BinaryOp::Gt)),
    (">=", Builtin::Binary(BinaryOp::Ge)),
    ("=", Builtin::Binary(BinaryOp::Eq)),
    ("eq?", Builtin::Binary(BinaryOp::Eq)),
    ("!=", Builtin::Binary(BinaryOp::Ne)),
    ("not", Builtin::Not),
    ("begin", Builtin::Begin),
];

pub fn builtin_of_str(s: &str) -> Option<Builtin> {
    BINDINGS
        .iter()
        .find(|(name, _)| *name == s)
        .map(|(_, builtin)| *builtin)
}

impl Display for Builtin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn truth(b: bool) -> Value {
    Value::Number(if b { 1.0 } else { 0.0 })
}

impl Builtin {
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Add => "+",
            Builtin::Sub => "-",
            Builtin::Mul => "*",
            Builtin::Not => "not",
            Builtin::Begin => "begin",
            Builtin::Binary(op) => op.name(),
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Builtin::Add | Builtin::Mul | Builtin::Begin => Arity::Any,
            Builtin::Sub => Arity::AtLeast(1),
            Builtin::Not => Arity::Exactly(1),
            Builtin::Binary(_) => Arity::Exactly(2),
        }
    }

    /// Apply the builtin to already evaluated arguments.
    pub fn call(self, args: &[Value]) -> Result<Value> {
        let arity = self.arity();
        if !arity.accepts(args.len()) {
            return Err(Error::ArityMismatch {
                callee: self.name(),
                expected: arity,
                got: args.len(),
            });
        }

        // begin is the only builtin that takes any kind of value
        let nums = if self == Builtin::Begin {
            Vec::new()
        } else {
            args.iter()
                .enumerate()
                .map(|(i, arg)| match arg {
                    Value::Number(n) => Ok(*n),
                    other => Err(Error::TypeMismatch {
                        callee: self.name(),
                        position: i + 1,
                        found: other.type_name(),
                    }),
                })
                .collect::<Result<Vec<f64>>>()?
        };

        // argument counts below are guaranteed by the arity check
        match self {
            Builtin::Add => Ok(Value::Number(nums.iter().sum())),
            Builtin::Mul => Ok(Value::Number(nums.iter().product())),
            Builtin::Sub if nums.len() == 1 => Ok(Value::Number(-nums[0])),
            Builtin::Sub => Ok(Value::Number(
                nums[1..].iter().fold(nums[0], |acc, x| acc - x),
            )),
            Builtin::Not => Ok(truth(nums[0] == 0.0)),
            Builtin::Begin => Ok(args.last().cloned().unwrap_or(Value::Number(0.0))),
            Builtin::Binary(op) => op.apply(nums[0], nums[1]),
        }
    }
}

impl BinaryOp {
    pub fn name(self) -> &'static str {
        match self {
            BinaryOp::Div => "/",
            BinaryOp::Mod => "mod",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "!=",
        }
    }

    fn apply(self, a: f64, b: f64) -> Result<Value> {
        match self {
            BinaryOp::Div => {
                if b == 0.0 {
                    Err(Error::DivisionByZero(self.name()))
                } else {
                    Ok(Value::Number(a / b))
                }
            },
            BinaryOp::Mod => {
                let (a, b) = (a.trunc(), b.trunc());
                if b == 0.0 {
                    Err(Error::DivisionByZero(self.name()))
                } else {
                    // `%` on floats truncates, keeping the sign of the dividend
                    Ok(Value::Number(a % b))
                }
            },
            BinaryOp::Lt => Ok(truth(a < b)),
            BinaryOp::Le => Ok(truth(a <= b)),
            BinaryOp::Gt => Ok(truth(a > b)),
            BinaryOp::Ge => Ok(truth(a >= b)),
            BinaryOp::Eq => Ok(truth(a == b)),
            BinaryOp::Ne => Ok(truth(a != b)),
        }
    }
}
