//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, along with the [`ErrorCategory`] taxonomy every error is classified into.
//!
//! Error kinds are usually plain structs that derive [`ErrorKind`] through the `symcalc-attrs`
//! crate. An [`Error`] pairs one of those kinds with the regions of source code it points at.

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug, Display, Formatter}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// The broad class an error belongs to.
///
/// Callers that need to react to a failure programmatically (rather than print it) should match
/// on the category instead of downcasting the concrete kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A bad character or malformed literal in the input text.
    Lex,

    /// An unexpected token, arity mismatch, or unbalanced bracket.
    Parse,

    /// Statically incompatible operand types, found without evaluating anything.
    Type,

    /// An operator or function applied to a combination of values it is not defined for.
    Unsupported,

    /// Division by zero, or operands with mismatched dimensions or shapes.
    Arithmetic,

    /// A variable or function that is absent from the symbol table.
    UndefinedBinding,

    /// A function received an argument it cannot accept.
    Argument,

    /// An expression with no symbolic derivative rule.
    Differentiation,

    /// A unit that is unknown or cannot be converted into the requested unit.
    Conversion,

    /// A write to a constant or read-only symbol table entry.
    Binding,
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lex => "lex error",
            Self::Parse => "parse error",
            Self::Type => "type error",
            Self::Unsupported => "unsupported operation",
            Self::Arithmetic => "arithmetic error",
            Self::UndefinedBinding => "undefined binding",
            Self::Argument => "argument error",
            Self::Differentiation => "differentiation error",
            Self::Conversion => "conversion error",
            Self::Binding => "binding error",
        };
        write!(f, "{}", name)
    }
}

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns the concrete error as [`Any`], so that callers can downcast it.
    fn as_any(&self) -> &dyn Any;

    /// Returns the category this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// Returns the headline message of this error, without any source code context.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that does not point at any source code. This is the case for errors
    /// produced while evaluating or analyzing a tree, since trees do not remember where they were
    /// parsed from.
    pub fn spanless(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Returns the category of the error.
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Returns true if the error is of the given concrete kind.
    pub fn is<T: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<T>()
    }

    /// Returns the concrete error kind, if it is of type `T`.
    pub fn downcast_ref<T: ErrorKind + 'static>(&self) -> Option<&T> {
        self.kind.as_any().downcast_ref::<T>()
    }

    /// If the error has no spans, points it at the given span instead.
    pub fn or_span(mut self, span: Range<usize>) -> Self {
        if self.spans.is_empty() {
            self.spans.push(span);
        }
        self
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the report for this error, with the given source code, into a string.
    pub fn render(&self, input: &str) -> String {
        let mut buf = Vec::new();
        if self.build_report("input").write(("input", Source::from(input)), &mut buf).is_err() {
            return self.to_string();
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Report the error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, input: &str) {
        if self.build_report("input").eprint(("input", Source::from(input))).is_err() {
            eprintln!("{}", self);
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.kind.message())
    }
}

impl std::error::Error for Error {}
