use ariadne::Fmt;
use symcalc_attrs::ErrorKind;
use symcalc_error::EXPR;
use symcalc_parser::parser::token::op::{BinOpKind, UnaryOpKind};
use crate::types::ResultType;

/// Formats a list of suggested names as a help message.
fn suggest(kind: &str, suggestions: &[String]) -> String {
    match suggestions {
        [] => format!("check the spelling, or define the {} first", kind),
        [only] => format!("did you mean `{}`?", only.as_str().fg(EXPR)),
        _ => format!(
            "did you mean one of these? {}",
            suggestions
                .iter()
                .map(|name| format!("`{}`", name.as_str().fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", "),
        ),
    }
}

/// The given binary operation cannot be applied to the given operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Unsupported,
    message = format!("cannot apply the `{}` operator to `{}` and `{}`", op.symbol(), left, right),
    labels = ["this expression"],
)]
pub struct InvalidBinaryOperation {
    /// The operator that was used.
    pub op: BinOpKind,

    /// The type the left side evaluated to.
    pub left: &'static str,

    /// The type the right side evaluated to.
    pub right: &'static str,
}

/// The given unary operation cannot be applied to the given operand.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Unsupported,
    message = format!("cannot apply the `{}` operator to `{}`", op.symbol(), operand),
    labels = ["this expression"],
)]
pub struct InvalidUnaryOperation {
    /// The operator that was used.
    pub op: UnaryOpKind,

    /// The type the operand evaluated to.
    pub operand: &'static str,
}

/// A builtin function was given arguments of types it is not defined for.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Unsupported,
    message = format!("the `{}` function is not defined for ({})", name, given.join(", ")),
    labels = ["this call"],
)]
pub struct InvalidArguments {
    /// The name of the function.
    pub name: &'static str,

    /// The types of the given arguments.
    pub given: Vec<&'static str>,
}

/// The condition of an `if` did not evaluate to a boolean.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Unsupported,
    message = format!("the condition must be a `boolean`, found `{}`", found),
    labels = ["this condition"],
)]
pub struct InvalidCondition {
    /// The type the condition evaluated to.
    pub found: &'static str,
}

/// An element of a vector or matrix literal is not a real number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Unsupported,
    message = format!("vector and matrix elements must be numbers, found `{}`", found),
    labels = ["this element"],
)]
pub struct InvalidElement {
    /// The type the element evaluated to.
    pub found: &'static str,
}

/// A name bound to something other than a function was called.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Unsupported,
    message = format!("`{}` is a `{}`, not a function", name, found),
    labels = ["this call"],
    help = format!("to multiply, write {}", format!("{} * (...)", name).fg(EXPR)),
)]
pub struct NotCallable {
    /// The name that was called.
    pub name: String,

    /// The type of the value bound to the name.
    pub found: &'static str,
}

/// Only quantities can be converted into another unit.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Unsupported,
    message = format!("cannot convert a `{}` into a unit", found),
    labels = ["this value"],
    help = format!("attach a unit to the value first, for example {}", "convert(3 ft, in)".fg(EXPR)),
)]
pub struct InvalidConversion {
    /// The type of the value that was converted.
    pub found: &'static str,
}

/// Attempted to divide by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Arithmetic,
    message = "division by zero",
    labels = ["this division"],
)]
pub struct DivideByZero;

/// The shapes or dimensions of two operands are incompatible.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Arithmetic,
    message = format!("cannot {} operands of shape `{}` and `{}`", op, left, right),
    labels = ["this expression"],
)]
pub struct DimensionMismatch {
    /// The operation that was attempted, as a verb.
    pub op: &'static str,

    /// The shape of the left operand.
    pub left: String,

    /// The shape of the right operand.
    pub right: String,
}

/// A square matrix was required.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Arithmetic,
    message = format!("expected a square matrix, found a {}x{} matrix", rows, cols),
    labels = ["this matrix"],
)]
pub struct NotSquare {
    /// The number of rows.
    pub rows: usize,

    /// The number of columns.
    pub cols: usize,
}

/// Attempted to invert a matrix whose determinant is zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Arithmetic,
    message = "the matrix is singular and has no inverse",
    labels = ["this matrix"],
)]
pub struct SingularMatrix;

/// The variable is undefined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = UndefinedBinding,
    message = format!("`{}` is not defined", name),
    labels = ["this variable"],
    help = if suggestions.is_empty() {
        format!("to define it, type: {} = {}", name.as_str().fg(EXPR), "<expression>".fg(EXPR))
    } else {
        suggest("variable", suggestions)
    },
)]
pub struct UndefinedVariable {
    /// The name of the variable.
    pub name: String,

    /// Defined names that are spelled similarly.
    pub suggestions: Vec<String>,
}

/// The function is undefined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = UndefinedBinding,
    message = format!("the `{}` function does not exist", name),
    labels = ["this function"],
    help = suggest("function", suggestions),
)]
pub struct UndefinedFunction {
    /// The name of the function.
    pub name: String,

    /// Defined and builtin function names that are spelled similarly.
    pub suggestions: Vec<String>,
}

/// A user function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Argument,
    message = format!(
        "the `{}` function takes {} argument{}, but {} were given",
        name,
        expected,
        if *expected == 1 { "" } else { "s" },
        given,
    ),
    labels = ["this call"],
)]
pub struct WrongArgumentCount {
    /// The name of the function.
    pub name: String,

    /// The number of parameters the function declares.
    pub expected: usize,

    /// The number of arguments that were given.
    pub given: usize,
}

/// Calls to user functions nested too deeply.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Argument,
    message = format!("maximum recursion depth exceeded while calling `{}`", name),
    labels = ["this call"],
    help = format!("the maximum depth is {}; check that `{}` has a base case", crate::ctxt::MAX_RECURSION_DEPTH, name),
)]
pub struct StackOverflow {
    /// The function being called when the limit was reached.
    pub name: String,
}

/// A builtin function received a value outside of the domain it accepts.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Argument,
    message = format!("invalid argument to `{}`: {}", name, reason),
    labels = ["this argument"],
)]
pub struct InvalidArgument {
    /// The name of the function or operator.
    pub name: &'static str,

    /// Why the argument was rejected.
    pub reason: String,
}

/// Attempted to overwrite a constant.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Binding,
    message = format!("cannot assign to the constant `{}`", name),
    labels = ["this assignment"],
    help = "choose a different name for the variable",
)]
pub struct AssignConstant {
    /// The name of the constant.
    pub name: String,
}

/// Attempted to overwrite a binding the host marked as read-only.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Binding,
    message = format!("`{}` is read-only", name),
    labels = ["this assignment"],
)]
pub struct AssignReadOnly {
    /// The name of the binding.
    pub name: String,
}

/// A unit conversion failed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Conversion,
    message = reason,
    labels = ["this conversion"],
)]
pub struct ConversionFailed {
    /// The message produced by the unit catalog.
    pub reason: String,
}

/// The expression has no symbolic derivative rule.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Differentiation,
    message = format!("cannot differentiate `{}` with respect to `{}`", expr, var),
    labels = ["this expression"],
)]
pub struct NoDerivative {
    /// The expression, formatted.
    pub expr: String,

    /// The variable of differentiation.
    pub var: String,
}

/// A user function was differentiated without its definition being registered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Differentiation,
    message = format!("the definition of `{}` is unknown", name),
    labels = ["this call"],
    help = format!("define it first, for example {}", format!("{}(x) = ...", name).fg(EXPR)),
)]
pub struct UnknownFunction {
    /// The name of the function.
    pub name: String,
}

/// The operands of a binary operator can never be combined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Type,
    message = format!("`{}` cannot be applied to `{}` and `{}`", op.symbol(), left, right),
    labels = ["this expression"],
)]
pub struct TypeMismatch {
    /// The operator.
    pub op: BinOpKind,

    /// The type of the left operand.
    pub left: ResultType,

    /// The type of the right operand.
    pub right: ResultType,
}

/// The operand of a unary operator can never be accepted.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Type,
    message = format!("`{}` cannot be applied to `{}`", op.symbol(), operand),
    labels = ["this expression"],
)]
pub struct UnaryTypeMismatch {
    /// The operator.
    pub op: UnaryOpKind,

    /// The type of the operand.
    pub operand: ResultType,
}

/// A builtin function can never accept arguments of the given types.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Type,
    message = format!(
        "the `{}` function is not defined for ({})",
        name,
        given.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
    ),
    labels = ["this call"],
)]
pub struct ArgumentTypeMismatch {
    /// The name of the function.
    pub name: &'static str,

    /// The inferred argument types.
    pub given: Vec<ResultType>,
}

/// A value in a position that requires a specific type has a different type.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Type,
    message = format!("expected {}, found `{}`", expected, found),
    labels = ["this expression"],
)]
pub struct ExpectedType {
    /// A description of what was expected.
    pub expected: &'static str,

    /// The inferred type.
    pub found: ResultType,
}
