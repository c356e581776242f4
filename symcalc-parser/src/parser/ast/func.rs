//! The catalog of builtin functions.

use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Generates the [`Func`] enum along with its name table and arity table.
///
/// Each entry lists the variant, its canonical name, any aliases, and the inclusive range of
/// argument counts it accepts, in parentheses. An open range marks a variadic function.
macro_rules! funcs {
    (
        $(
            $(#[doc = $doc:literal])*
            $variant:ident: $name:literal $(| $alias:literal)* => $arity:tt
        ),*
        $(,)?
    ) => {
        /// A builtin function.
        ///
        /// Builtin functions are resolved when parsing, so their arity is checked before anything
        /// is evaluated. Calls to any other name produce a user function call instead.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum Func {
            $(
                $(#[doc = $doc])*
                $variant,
            )*
        }

        impl Func {
            /// Every builtin function.
            pub const ALL: &'static [Func] = &[$(Func::$variant),*];

            /// Returns the canonical name of the function.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Func::$variant => $name,)*
                }
            }

            /// Looks up a builtin function by its name or one of its aliases.
            pub fn from_name(name: &str) -> Option<Func> {
                match name {
                    $($name $(| $alias)* => Some(Func::$variant),)*
                    _ => None,
                }
            }

            /// Returns the minimum and maximum number of arguments the function accepts. A maximum
            /// of [`None`] means the function is variadic.
            pub fn arity(&self) -> (usize, Option<usize>) {
                match self {
                    $(Func::$variant => funcs!(@arity $arity),)*
                }
            }
        }
    };
    (@arity ($min:literal ..= $max:literal)) => { ($min, Some($max)) };
    (@arity ($min:literal ..)) => { ($min, None) };
}

funcs!(
    Sin: "sin" => (1..=1),
    Cos: "cos" => (1..=1),
    Tan: "tan" => (1..=1),
    Csc: "csc" => (1..=1),
    Sec: "sec" => (1..=1),
    Cot: "cot" => (1..=1),
    Asin: "asin" | "arcsin" => (1..=1),
    Acos: "acos" | "arccos" => (1..=1),
    Atan: "atan" | "arctan" => (1..=1),
    Acsc: "acsc" | "arccsc" => (1..=1),
    Asec: "asec" | "arcsec" => (1..=1),
    Acot: "acot" | "arccot" => (1..=1),
    Sinh: "sinh" => (1..=1),
    Cosh: "cosh" => (1..=1),
    Tanh: "tanh" => (1..=1),
    Csch: "csch" => (1..=1),
    Sech: "sech" => (1..=1),
    Coth: "coth" => (1..=1),
    Asinh: "asinh" | "arsinh" | "arcsinh" => (1..=1),
    Acosh: "acosh" | "arcosh" | "arccosh" => (1..=1),
    Atanh: "atanh" | "artanh" | "arctanh" => (1..=1),
    Acsch: "acsch" | "arcsch" | "arccsch" => (1..=1),
    Asech: "asech" | "arsech" | "arcsech" => (1..=1),
    Acoth: "acoth" | "arcoth" | "arccoth" => (1..=1),
    /// `e` raised to the argument.
    Exp: "exp" => (1..=1),
    /// Natural logarithm.
    Ln: "ln" => (1..=1),
    /// `log(x)` is the base-10 logarithm; `log(x, b)` is the base-`b` logarithm.
    Log: "log" => (1..=2),
    Sqrt: "sqrt" => (1..=1),
    Cbrt: "cbrt" => (1..=1),
    /// `root(x, n)` is the `n`-th root of `x`.
    Root: "root" => (2..=2),
    Abs: "abs" => (1..=1),
    Floor: "floor" => (1..=1),
    Ceil: "ceil" => (1..=1),
    Round: "round" => (1..=1),
    Sign: "sign" | "sgn" => (1..=1),
    /// Sum of the arguments, or of the elements of a single vector argument.
    Sum: "sum" => (1..),
    Mean: "mean" | "avg" => (1..),
    Median: "median" => (1..),
    Min: "min" => (1..),
    Max: "max" => (1..),
    /// Sample standard deviation.
    Stdev: "stdev" => (1..),
    /// Sample variance.
    Variance: "variance" | "var" => (1..),
    Gcd: "gcd" => (2..),
    Lcm: "lcm" => (2..),
    Factorial: "factorial" => (1..=1),
    /// `ncr(n, k)`: the number of ways to choose `k` items out of `n`.
    Ncr: "ncr" => (2..=2),
    /// `npr(n, k)`: the number of ordered arrangements of `k` items out of `n`.
    Npr: "npr" => (2..=2),
    Re: "re" => (1..=1),
    Im: "im" => (1..=1),
    Arg: "arg" => (1..=1),
    Conj: "conj" => (1..=1),
    Det: "det" => (1..=1),
    Inverse: "inverse" | "inv" => (1..=1),
    Transpose: "transpose" => (1..=1),
    Dot: "dot" => (2..=2),
    Cross: "cross" => (2..=2),
    /// Euclidean norm of a vector, or the absolute value of a scalar.
    Norm: "norm" => (1..=1),
    /// A uniformly distributed random number in `[0, 1)`.
    Rand: "rand" => (0..=0),
);

impl Func {
    /// Returns true if the function takes an angle as input.
    pub fn is_trigonometric(&self) -> bool {
        matches!(self, Func::Sin | Func::Cos | Func::Tan | Func::Csc | Func::Sec | Func::Cot)
    }

    /// Returns true if the function produces an angle as output.
    pub fn is_inverse_trigonometric(&self) -> bool {
        matches!(self, Func::Asin | Func::Acos | Func::Atan | Func::Acsc | Func::Asec | Func::Acot)
    }

    /// Returns true if the function is a hyperbolic function or its inverse.
    pub fn is_hyperbolic(&self) -> bool {
        matches!(
            self,
            Func::Sinh | Func::Cosh | Func::Tanh | Func::Csch | Func::Sech | Func::Coth
                | Func::Asinh | Func::Acosh | Func::Atanh | Func::Acsch | Func::Asech | Func::Acoth
        )
    }

    /// Returns true if the function reduces a list of values into one.
    pub fn is_aggregate(&self) -> bool {
        matches!(
            self,
            Func::Sum | Func::Mean | Func::Median | Func::Min | Func::Max | Func::Stdev
                | Func::Variance | Func::Gcd | Func::Lcm
        )
    }

    /// Returns the function `g` such that `self(g(x)) = x` for every `x` in the domain of `g`.
    pub fn inverse(&self) -> Option<Func> {
        Some(match self {
            Func::Sin => Func::Asin,
            Func::Cos => Func::Acos,
            Func::Tan => Func::Atan,
            Func::Csc => Func::Acsc,
            Func::Sec => Func::Asec,
            Func::Cot => Func::Acot,
            Func::Sinh => Func::Asinh,
            Func::Cosh => Func::Acosh,
            Func::Tanh => Func::Atanh,
            Func::Csch => Func::Acsch,
            Func::Sech => Func::Asech,
            Func::Coth => Func::Acoth,
            Func::Exp => Func::Ln,
            Func::Ln => Func::Exp,
            _ => return None,
        })
    }

    /// Returns true if the given number of arguments is accepted by the function.
    pub fn accepts(&self, count: usize) -> bool {
        let (min, max) = self.arity();
        count >= min && max.map_or(true, |max| count <= max)
    }
}

impl Display for Func {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
