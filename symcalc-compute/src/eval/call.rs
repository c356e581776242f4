//! Calls to user-defined functions.

use levenshtein::levenshtein;
use symcalc_parser::parser::{ast::{Expr, Func}, call::SPECIAL_FORMS};
use tracing::debug;
use crate::{
    ctxt::{Bindings, ScopedTable, MAX_RECURSION_DEPTH},
    error::{
        error,
        kind::{NotCallable, StackOverflow, UndefinedFunction, WrongArgumentCount},
        Error,
    },
    value::Value,
};
use super::Eval;

/// Returns the builtin and user-defined function names spelled similarly to the given name.
fn similar_functions(bindings: &dyn Bindings, name: &str) -> Vec<String> {
    let builtins = Func::ALL.iter().map(Func::name).chain(SPECIAL_FORMS.iter().copied());
    let mut names = builtins
        .filter(|n| levenshtein(n, name) < 2)
        .map(str::to_owned)
        .chain(
            bindings.similar_names(name)
                .into_iter()
                .filter(|n| matches!(bindings.get(n), Some(Value::Lambda(_)))),
        )
        .collect::<Vec<_>>();
    names.sort();
    names.dedup();
    names
}

/// Calls the user-defined function bound to `name`.
///
/// The arguments are evaluated in the caller's scope, then bound to the parameters in a fresh
/// scope on top of the root scope. Free names in the body resolve where the function was
/// defined, never to the caller's locals, and the body cannot modify the caller's bindings.
pub fn eval_call(name: &str, args: &[Expr], bindings: &mut dyn Bindings) -> Result<Value, Error> {
    let lambda = match bindings.get(name) {
        Some(Value::Lambda(lambda)) => lambda.clone(),
        Some(other) => {
            return Err(error(NotCallable { name: name.to_owned(), found: other.typename() }));
        },
        None => {
            return Err(error(UndefinedFunction {
                name: name.to_owned(),
                suggestions: similar_functions(bindings, name),
            }));
        },
    };

    if lambda.params.len() != args.len() {
        return Err(error(WrongArgumentCount {
            name: name.to_owned(),
            expected: lambda.params.len(),
            given: args.len(),
        }));
    }

    if bindings.depth() >= MAX_RECURSION_DEPTH {
        return Err(error(StackOverflow { name: name.to_owned() }));
    }

    let args = args.iter()
        .map(|arg| arg.eval(bindings))
        .collect::<Result<Vec<_>, _>>()?;

    let mut scope = ScopedTable::with_depth(bindings.root(), bindings.depth() + 1);
    for (param, arg) in lambda.params.iter().zip(args) {
        scope.define_local(param, arg);
    }
    debug!(name, depth = scope.depth(), "calling user function");
    lambda.body.eval(&mut scope)
}
