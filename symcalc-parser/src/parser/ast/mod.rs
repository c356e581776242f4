//! The abstract syntax tree produced by the parser.
//!
//! The tree carries no source spans: every pass over it (evaluation, differentiation,
//! simplification, type inference) builds new trees, and positions would not survive those
//! rewrites anyway. Parse errors carry spans of their own.

pub mod expr;
pub mod fmt;
pub mod func;
pub mod iter;

pub use expr::Expr;
pub use func::Func;
pub use iter::ExprIter;
