//! Error kinds raised while executing or analyzing an expression.
//!
//! Trees carry no source positions, so every error produced here is spanless. Hosts that still
//! have the source text can point the error at the whole input with [`Error::or_span`].

pub mod kind;

pub use symcalc_error::Error;

/// Shorthand for a spanless [`Error`] of the given kind.
pub(crate) fn error(kind: impl symcalc_error::ErrorKind + 'static) -> Error {
    Error::spanless(kind)
}
