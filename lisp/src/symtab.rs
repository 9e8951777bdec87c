use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

use crate::builtin::BINDINGS;
use crate::error::{Error, Result};
use crate::interpret::Value;

/// One scope: the names bound in it and the scope it was forked from.
pub struct Symtab {
    store: RefCell<BTreeMap<String, Value>>,
    parent: Option<Env>,
}

/// A handle on a chain of scopes, innermost first.
///
/// Cloning the handle shares the scopes; a closure keeps one of these to
/// see (and update) the variables of the place it was created in.
#[derive(Clone)]
pub struct Env(Rc<Symtab>);

impl Env {
    /// An empty root scope.
    pub fn new() -> Self {
        Env(Rc::new(Symtab {
            store: RefCell::new(BTreeMap::new()),
            parent: None,
        }))
    }

    /// A root scope holding every builtin procedure.
    pub fn global() -> Self {
        let env = Env::new();
        for (name, builtin) in BINDINGS {
            env.define(*name, (*builtin).into());
        }
        env
    }

    /// A new chain with one more innermost scope holding `bindings`. The
    /// receiver is left untouched.
    pub fn extend<I>(&self, bindings: I) -> Env
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Env(Rc::new(Symtab {
            store: RefCell::new(bindings.into_iter().collect()),
            parent: Some(self.clone()),
        }))
    }

    /// An empty child scope.
    pub fn fork(&self) -> Env {
        self.extend(std::iter::empty())
    }

    fn scopes(&self) -> impl Iterator<Item = &Env> {
        std::iter::successors(Some(self), |env| env.0.parent.as_ref())
    }

    /// Get the value bound to `name`. If the name is not bound in the current
    /// scope, the parent scopes are searched.
    pub fn lookup(&self, name: &str) -> Result<Value> {
        self.scopes()
            .find_map(|env| env.0.store.borrow().get(name).cloned())
            .ok_or_else(|| Error::UnboundName(name.to_string()))
    }

    /// Bind `name` in the current scope, shadowing any outer binding.
    ///
    /// Returns the value previously bound in this scope, if any.
    pub fn define(&self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.store.borrow_mut().insert(name.into(), value)
    }

    /// Overwrite the nearest existing binding of `name`. Never creates one.
    pub fn assign(&self, name: &str, value: Value) -> Result<()> {
        let scope = self
            .scopes()
            .find(|env| env.0.store.borrow().contains_key(name))
            .ok_or_else(|| Error::UnboundName(name.to_string()))?;
        scope.0.store.borrow_mut().insert(name.to_string(), value);
        Ok(())
    }

    /// Check if a name is bound in the current scope or any parent scope.
    pub fn contains(&self, name: &str) -> bool {
        self.scopes().any(|env| env.0.store.borrow().contains_key(name))
    }

    /// Check if current scope is top level.
    pub fn is_root(&self) -> bool {
        self.0.parent.is_none()
    }

    /// Number of scopes in the chain, the root included.
    pub fn depth(&self) -> usize {
        self.scopes().count()
    }
}

impl Default for Env {
    fn default() -> Self {
        Env::new()
    }
}

impl Debug for Env {
    // Names only: values may be closures that hold this very chain.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(
                self.scopes()
                    .map(|env| env.0.store.borrow().keys().cloned().collect::<Vec<_>>()),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn test_lookup_walks_outwards() {
        let outer = Env::new();
        outer.define("a", num(1.0));
        outer.define("b", num(3.0));

        let inner = outer.fork();
        inner.define("a", num(4.0));

        assert_eq!(outer.lookup("a"), Ok(num(1.0)));
        assert_eq!(inner.lookup("a"), Ok(num(4.0)));
        assert_eq!(inner.lookup("b"), Ok(num(3.0)));
        assert_eq!(inner.lookup("c"), Err(Error::UnboundName("c".into())));
    }

    #[test]
    fn test_define_overwrites_current_scope_only() {
        let outer = Env::new();
        outer.define("x", num(1.0));
        assert_eq!(outer.define("x", num(2.0)), Some(num(1.0)));

        let inner = outer.fork();
        assert_eq!(inner.define("x", num(3.0)), None);
        assert_eq!(outer.lookup("x"), Ok(num(2.0)));
    }

    #[test]
    fn test_assign_updates_nearest_binding() {
        let outer = Env::new();
        outer.define("x", num(1.0));
        let inner = outer.fork();

        inner.assign("x", num(5.0)).unwrap();
        assert_eq!(outer.lookup("x"), Ok(num(5.0)));
        assert!(!inner.0.store.borrow().contains_key("x"));

        inner.define("x", num(6.0));
        inner.assign("x", num(7.0)).unwrap();
        assert_eq!(inner.lookup("x"), Ok(num(7.0)));
        assert_eq!(outer.lookup("x"), Ok(num(5.0)));
    }

    #[test]
    fn test_assign_unbound_fails() {
        let env = Env::new().fork();
        assert_eq!(
            env.assign("nope", num(1.0)),
            Err(Error::UnboundName("nope".into()))
        );
        assert!(!env.contains("nope"));
    }

    #[test]
    fn test_extend_leaves_receiver_alone() {
        let root = Env::new();
        let child = root.extend(vec![("n".to_string(), num(9.0))]);
        assert!(root.is_root());
        assert!(!child.is_root());
        assert_eq!(child.depth(), 2);
        assert_eq!(child.lookup("n"), Ok(num(9.0)));
        assert!(!root.contains("n"));
    }

    #[test]
    fn test_global_has_builtins() {
        let env = Env::global();
        for name in ["+", "-", "*", "/", "%", "mod", "<", "<=", ">", ">=", "=", "eq?", "!=", "begin"] {
            assert!(env.contains(name), "missing builtin {}", name);
        }
        assert!(env.is_root());
    }

    #[test]
    fn test_debug_lists_names() {
        let env = Env::new();
        env.define("x", num(1.0));
        let inner = env.fork();
        inner.define("y", num(2.0));
        assert_eq!(format!("{:?}", inner), r#"[["y"], ["x"]]"#);
    }
}
