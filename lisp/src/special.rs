//! Forms whose arguments are not evaluated up front.

use std::collections::BTreeSet;

use log::debug;

use crate::closure::Closure;
use crate::error::{Error, Result};
use crate::interpret::{eval, Value};
use crate::parse::SExp;
use crate::symtab::Env;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpecialForm {
    /// (define name expr)
    Define,
    /// (set! name expr)
    Set,
    /// (if test then [else])
    If,
    /// (or exprs ...)
    Or,
    /// (and exprs ...)
    And,
    /// (lambda (params ...) body)
    Lambda,
}

pub fn special_form_of_str(s: &str) -> Option<SpecialForm> {
    match s {
        "define" => Some(SpecialForm::Define),
        "set!" => Some(SpecialForm::Set),
        "if" => Some(SpecialForm::If),
        "or" => Some(SpecialForm::Or),
        "and" => Some(SpecialForm::And),
        "lambda" => Some(SpecialForm::Lambda),
        _ => None,
    }
}

impl SpecialForm {
    /// Apply the form to its unevaluated arguments.
    pub fn eval(self, args: &[SExp], env: &Env) -> Result<Value> {
        match self {
            SpecialForm::Define => eval_define(args, env),
            SpecialForm::Set => eval_set(args, env),
            SpecialForm::If => eval_if(args, env),
            SpecialForm::Or => eval_or(args, env),
            SpecialForm::And => eval_and(args, env),
            SpecialForm::Lambda => eval_lambda(args, env),
        }
    }
}

fn eval_define(args: &[SExp], env: &Env) -> Result<Value> {
    match args {
        [SExp::Sym(name), expr] => {
            let value = eval(expr, env)?;
            debug!("define {} = {}", name, value);
            env.define(name.as_str(), value.clone());
            Ok(value)
        },
        [_, _] => Err(Error::malformed("define", "name must be a symbol")),
        _ => Err(Error::malformed("define", "expected 2 arguments")),
    }
}

fn eval_set(args: &[SExp], env: &Env) -> Result<Value> {
    match args {
        [SExp::Sym(name), expr] => {
            let value = eval(expr, env)?;
            debug!("set! {} = {}", name, value);
            env.assign(name, value.clone())?;
            Ok(value)
        },
        [_, _] => Err(Error::malformed("set!", "name must be a symbol")),
        _ => Err(Error::malformed("set!", "expected 2 arguments")),
    }
}

fn eval_if(args: &[SExp], env: &Env) -> Result<Value> {
    let (test, then, else_) = match args {
        [test, then] => (test, then, None),
        [test, then, else_] => (test, then, Some(else_)),
        _ => return Err(Error::malformed("if", "expected 2 or 3 arguments")),
    };
    if eval(test, env)?.truthy("if", 1)? {
        eval(then, env)
    } else {
        // a missing else branch yields 0
        else_.map_or(Ok(Value::FALSE), |else_| eval(else_, env))
    }
}

fn eval_or(args: &[SExp], env: &Env) -> Result<Value> {
    for (i, arg) in args.iter().enumerate() {
        let value = eval(arg, env)?;
        if value.truthy("or", i + 1)? {
            return Ok(value);
        }
    }
    Ok(Value::FALSE)
}

fn eval_and(args: &[SExp], env: &Env) -> Result<Value> {
    for (i, arg) in args.iter().enumerate() {
        let value = eval(arg, env)?;
        if !value.truthy("and", i + 1)? {
            return Ok(value);
        }
    }
    Ok(Value::TRUE)
}

fn eval_lambda(args: &[SExp], env: &Env) -> Result<Value> {
    let (params, body) = match args {
        [SExp::Lst(params), body] => (params, body),
        [_, _] => return Err(Error::malformed("lambda", "parameters must be a list")),
        _ => return Err(Error::malformed("lambda", "expected 2 arguments")),
    };

    let names = params
        .iter()
        .map(|param| {
            param
                .as_sym()
                .map(str::to_string)
                .ok_or_else(|| Error::malformed("lambda", "parameters must be symbols"))
        })
        .collect::<Result<Vec<_>>>()?;
    if names.iter().collect::<BTreeSet<_>>().len() != names.len() {
        return Err(Error::malformed("lambda", "duplicate parameter"));
    }

    let closure = Closure::new(names, body.clone(), env.clone());
    debug!("created {}", closure);
    Ok(closure.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpret::evaluate;

    fn run(code: &str) -> Result<Value> {
        evaluate(code, &Env::global())
    }

    #[test]
    fn test_keywords() {
        for (keyword, form) in [
            ("define", SpecialForm::Define),
            ("set!", SpecialForm::Set),
            ("if", SpecialForm::If),
            ("or", SpecialForm::Or),
            ("and", SpecialForm::And),
            ("lambda", SpecialForm::Lambda),
        ] {
            assert_eq!(special_form_of_str(keyword), Some(form));
        }
        assert_eq!(special_form_of_str("begin"), None);
        assert_eq!(special_form_of_str("let"), None);
    }

    #[test]
    fn test_malformed_forms() {
        let test_cases = [
            ("(define)", Error::malformed("define", "expected 2 arguments")),
            ("(define x)", Error::malformed("define", "expected 2 arguments")),
            ("(define x 1 2)", Error::malformed("define", "expected 2 arguments")),
            ("(define 1 2)", Error::malformed("define", "name must be a symbol")),
            ("(set! (x) 2)", Error::malformed("set!", "name must be a symbol")),
            ("(set! x)", Error::malformed("set!", "expected 2 arguments")),
            ("(if)", Error::malformed("if", "expected 2 or 3 arguments")),
            ("(if 1 2 3 4)", Error::malformed("if", "expected 2 or 3 arguments")),
            ("(lambda x x)", Error::malformed("lambda", "parameters must be a list")),
            ("(lambda (x))", Error::malformed("lambda", "expected 2 arguments")),
            ("(lambda (x 1) x)", Error::malformed("lambda", "parameters must be symbols")),
            ("(lambda (x y x) x)", Error::malformed("lambda", "duplicate parameter")),
        ];

        for (code, expected) in test_cases {
            assert_eq!(run(code), Err(expected), "evaluating {}", code);
        }
    }

    #[test]
    fn test_if_without_else_is_zero() {
        assert_eq!(run("(if 0 5)"), Ok(Value::Number(0.0)));
        assert_eq!(run("(if (= 1 1) 5)"), Ok(Value::Number(5.0)));
    }

    #[test]
    fn test_if_only_evaluates_taken_branch() {
        let env = Env::global();
        evaluate("(define hits 0)", &env).unwrap();
        evaluate("(if 1 (set! hits (+ hits 1)) (set! hits 100))", &env).unwrap();
        assert_eq!(evaluate("hits", &env), Ok(Value::Number(1.0)));
    }

    #[test]
    fn test_or_and_short_circuit() {
        // the unbound name is never looked up
        assert_eq!(run("(or 0 3 undefined)"), Ok(Value::Number(3.0)));
        assert_eq!(run("(and 1 0 undefined)"), Ok(Value::Number(0.0)));
        assert_eq!(
            run("(and 1 undefined)"),
            Err(Error::UnboundName("undefined".into()))
        );
    }

    #[test]
    fn test_or_and_reject_procedures() {
        assert_eq!(
            run("(or 0 +)"),
            Err(Error::TypeMismatch {
                callee: "or",
                position: 2,
                found: "procedure"
            })
        );
        assert_eq!(
            run("(and -)"),
            Err(Error::TypeMismatch {
                callee: "and",
                position: 1,
                found: "procedure"
            })
        );
    }

    #[test]
    fn test_set_evaluates_in_current_scope() {
        let env = Env::global();
        evaluate("(define x 1)", &env).unwrap();
        evaluate("(define bump (lambda (by) (set! x (+ x by))))", &env).unwrap();
        assert_eq!(evaluate("(bump 4)", &env), Ok(Value::Number(5.0)));
        assert_eq!(evaluate("x", &env), Ok(Value::Number(5.0)));
    }

    #[test]
    fn test_set_never_creates_a_binding() {
        let env = Env::global();
        assert_eq!(
            evaluate("(set! fresh 1)", &env),
            Err(Error::UnboundName("fresh".into()))
        );
        assert!(!env.contains("fresh"));
    }

    #[test]
    fn test_lambda_body_is_not_evaluated() {
        let env = Env::global();
        assert!(evaluate("(define f (lambda () (if)))", &env).is_ok());
        assert_eq!(
            evaluate("(f)", &env),
            Err(Error::malformed("if", "expected 2 or 3 arguments"))
        );
    }
}
