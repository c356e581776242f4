//! Symbol tables that map names to values during execution.

use levenshtein::levenshtein;
use std::collections::HashMap;
use crate::{
    consts,
    error::{error, kind::{AssignConstant, AssignReadOnly}, Error},
    trig_mode::TrigMode,
    value::Value,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The maximum number of nested scopes. This is used to detect runaway recursion before it
/// overflows the native stack.
pub const MAX_RECURSION_DEPTH: usize = 1 << 8;

/// Whether a binding can be reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Access {
    /// A builtin constant such as `pi`.
    Constant,

    /// A binding the host provided that expressions may read but not overwrite.
    ReadOnly,

    /// A binding expressions may freely reassign.
    Mutable,
}

/// Returns an error if a binding with the given access cannot be assigned to.
fn check_writable(name: &str, access: Option<Access>) -> Result<(), Error> {
    match access {
        Some(Access::Constant) => Err(error(AssignConstant { name: name.to_owned() })),
        Some(Access::ReadOnly) => Err(error(AssignReadOnly { name: name.to_owned() })),
        Some(Access::Mutable) | None => Ok(()),
    }
}

/// A scope of name bindings that expressions are executed in.
pub trait Bindings {
    /// Returns the value bound to the name.
    fn get(&self, name: &str) -> Option<&Value>;

    /// Returns the access level of the binding, or [`None`] if the name is unbound.
    fn access(&self, name: &str) -> Option<Access>;

    /// Binds the name to a value, failing if the name refers to a constant or read-only binding.
    fn set(&mut self, name: &str, value: Value) -> Result<(), Error>;

    /// Binds the name in the innermost scope, shadowing any outer binding of the same name.
    fn define_local(&mut self, name: &str, value: Value);

    /// Returns the trigonometric mode numbers are interpreted in.
    fn trig_mode(&self) -> TrigMode;

    /// Returns the number of scopes between this one and the root.
    fn depth(&self) -> usize;

    /// Returns the root scope, where functions are defined.
    fn root(&self) -> &dyn Bindings;

    /// Returns every bound name.
    fn names(&self) -> Vec<String>;

    /// Returns bound names spelled similarly to the given name, for use in error messages.
    fn similar_names(&self, name: &str) -> Vec<String> {
        let mut names = self.names()
            .into_iter()
            .filter(|n| n != name && levenshtein(n, name) < 2)
            .collect::<Vec<_>>();
        names.sort();
        names
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct Entry {
    value: Value,
    access: Access,
}

/// The root scope, owned by the host.
///
/// The [`Default`] table binds the constants `pi`, `π`, `e`, `tau`, `phi`, and `i`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SymbolTable {
    entries: HashMap<String, Entry>,

    /// The trigonometric mode of the table.
    pub trig_mode: TrigMode,
}

impl Default for SymbolTable {
    fn default() -> Self {
        let mut table = Self::new();
        for (name, value) in consts::CONSTANTS.iter() {
            table.insert(name, value.clone(), Access::Constant);
        }
        table
    }
}

impl SymbolTable {
    /// Creates a new empty table.
    ///
    /// The empty table does not even contain the mathematical constants. Consider using the
    /// [`Default`] implementation instead.
    pub fn new() -> Self {
        Self { entries: HashMap::new(), trig_mode: TrigMode::default() }
    }

    /// Sets the trigonometric mode of the table.
    pub fn with_trig_mode(mut self, trig_mode: TrigMode) -> Self {
        self.trig_mode = trig_mode;
        self
    }

    /// Binds the name with the given access level, replacing any existing binding regardless of
    /// its access.
    pub fn insert(&mut self, name: &str, value: impl Into<Value>, access: Access) {
        self.entries.insert(name.to_owned(), Entry { value: value.into(), access });
    }

    /// Removes a mutable binding. Constants and read-only bindings cannot be removed.
    pub fn remove(&mut self, name: &str) -> Result<Option<Value>, Error> {
        check_writable(name, self.access(name))?;
        Ok(self.entries.remove(name).map(|entry| entry.value))
    }

    /// Returns every binding, with their access level.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value, Access)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), &entry.value, entry.access))
    }
}

impl Bindings for SymbolTable {
    fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name).map(|entry| &entry.value)
    }

    fn access(&self, name: &str) -> Option<Access> {
        self.entries.get(name).map(|entry| entry.access)
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), Error> {
        check_writable(name, self.access(name))?;
        self.insert(name, value, Access::Mutable);
        Ok(())
    }

    fn define_local(&mut self, name: &str, value: Value) {
        self.insert(name, value, Access::Mutable);
    }

    fn trig_mode(&self) -> TrigMode {
        self.trig_mode
    }

    fn depth(&self) -> usize {
        0
    }

    fn root(&self) -> &dyn Bindings {
        self
    }

    fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// A child scope that reads through to a parent scope, and keeps every write to itself.
///
/// Scopes are created for the body of each user function call and each summation or product, so
/// parameters and index variables never leak into the caller.
#[derive(Debug)]
pub struct ScopedTable<'p> {
    parent: &'p dyn Bindings,
    locals: HashMap<String, Value>,
    depth: usize,
}

impl std::fmt::Debug for dyn Bindings + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bindings").field("depth", &self.depth()).finish_non_exhaustive()
    }
}

impl<'p> ScopedTable<'p> {
    /// Creates an empty scope on top of the given parent.
    pub fn new(parent: &'p dyn Bindings) -> Self {
        Self::with_depth(parent, parent.depth() + 1)
    }

    /// Creates an empty scope on top of the given parent, counted as `depth` scopes deep.
    ///
    /// Function bodies are evaluated on top of the root scope, but nest as deep as the call that
    /// created them.
    pub fn with_depth(parent: &'p dyn Bindings, depth: usize) -> Self {
        Self { parent, locals: HashMap::new(), depth }
    }
}

impl Bindings for ScopedTable<'_> {
    fn get(&self, name: &str) -> Option<&Value> {
        self.locals.get(name).or_else(|| self.parent.get(name))
    }

    fn access(&self, name: &str) -> Option<Access> {
        if self.locals.contains_key(name) {
            Some(Access::Mutable)
        } else {
            self.parent.access(name)
        }
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), Error> {
        check_writable(name, self.access(name))?;
        self.locals.insert(name.to_owned(), value);
        Ok(())
    }

    fn define_local(&mut self, name: &str, value: Value) {
        self.locals.insert(name.to_owned(), value);
    }

    fn trig_mode(&self) -> TrigMode {
        self.parent.trig_mode()
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn root(&self) -> &dyn Bindings {
        self.parent.root()
    }

    fn names(&self) -> Vec<String> {
        let mut names = self.parent.names();
        names.extend(self.locals.keys().filter(|name| self.parent.get(name).is_none()).cloned());
        names
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn constants_are_protected() {
        let mut table = SymbolTable::default();
        let err = table.set("pi", 3.0.into()).unwrap_err();
        assert!(err.is::<AssignConstant>());
        assert_eq!(table.get("pi"), Some(&Value::Number(std::f64::consts::PI)));
    }

    #[test]
    fn read_only_bindings() {
        let mut table = SymbolTable::new();
        table.insert("g", 9.81, Access::ReadOnly);
        assert!(table.set("g", 10.0.into()).unwrap_err().is::<AssignReadOnly>());
        assert!(table.remove("g").is_err());
    }

    #[test]
    fn scopes_shadow_and_do_not_leak() {
        let mut table = SymbolTable::default();
        table.set("x", 1.0.into()).unwrap();

        let mut scope = ScopedTable::new(&table);
        scope.define_local("x", 2.0.into());
        scope.define_local("e", 5.0.into());
        scope.set("y", 3.0.into()).unwrap();
        assert_eq!(scope.get("x"), Some(&Value::Number(2.0)));
        assert_eq!(scope.get("e"), Some(&Value::Number(5.0)));
        assert_eq!(scope.depth(), 1);
        assert!(scope.set("pi", 3.0.into()).is_err());

        assert_eq!(table.get("x"), Some(&Value::Number(1.0)));
        assert_eq!(table.get("y"), None);
    }

    #[test]
    fn root_of_nested_scopes() {
        let mut table = SymbolTable::default();
        table.set("a", 1.0.into()).unwrap();

        let mut outer = ScopedTable::new(&table);
        outer.define_local("a", 2.0.into());
        let inner = ScopedTable::with_depth(&outer, 7);
        assert_eq!(inner.get("a"), Some(&Value::Number(2.0)));
        assert_eq!(inner.root().get("a"), Some(&Value::Number(1.0)));
        assert_eq!(inner.root().depth(), 0);
        assert_eq!(inner.depth(), 7);
    }

    #[test]
    fn suggestions() {
        let mut table = SymbolTable::new();
        table.insert("width", 1.0, Access::Mutable);
        table.insert("height", 1.0, Access::Mutable);
        assert_eq!(table.similar_names("widht"), Vec::<String>::new());
        assert_eq!(table.similar_names("widt"), vec!["width".to_string()]);
    }
}
