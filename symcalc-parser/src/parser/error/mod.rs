pub mod kind;

use ariadne::Report;
use symcalc_error::{Error as CommonError, ErrorKind};
use std::ops::Range;

/// A general parsing error.
///
/// Parsing speculatively tries several grammar rules at the same position, so most errors are
/// expected and simply cause the parser to try the next rule. A fatal error is one that can only
/// be explained by a mistake in the input, and stops the parser from trying any other rule.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,

    /// Whether the error is fatal.
    pub fatal: bool,
}

impl Error {
    /// Creates a new non-fatal error with the given span and kind.
    pub fn new(span: Range<usize>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans: vec![span], kind: Box::new(kind), fatal: false }
    }

    /// Creates a new fatal error with the given span and kind.
    pub fn new_fatal(span: Range<usize>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans: vec![span], kind: Box::new(kind), fatal: true }
    }

    /// Marks the error as fatal.
    pub fn into_fatal(mut self) -> Self {
        self.fatal = true;
        self
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

impl From<Error> for CommonError {
    fn from(err: Error) -> Self {
        CommonError { spans: err.spans, kind: err.kind }
    }
}
