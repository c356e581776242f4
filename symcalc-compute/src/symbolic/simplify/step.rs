/// Possible simplification steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `2 + 3 = 5`
    /// `3 < 4 = true`
    /// `sqrt(16) = 4`
    FoldConstants,

    /// `a+a = 2a`
    /// `2a+3a = 5a`
    /// `a-a = 0`
    /// etc.
    CombineLikeTerms,

    /// `b+a = a+b`
    /// `1+x = x+1`
    ReorderTerms,

    /// `a*a = a^2`
    /// `a^2*a^3 = a^5`
    /// `2*a*3 = 6a`
    /// etc.
    CombineLikeFactors,

    /// `b*a = a*b`
    /// `x*2 = 2x`
    ReorderFactors,

    /// `--a = a`
    DoubleNegation,

    /// `a^0 = 1`
    PowerZero,

    /// `1^a = 1`
    PowerOneLeft,

    /// `a^1 = a`
    PowerOne,

    /// `(a^b)^c = a^(b*c)`, for integer `c`
    PowerPower,

    /// `a/1 = a`
    DivideOne,

    /// `0/a = 0`
    DivideZero,

    /// `a/a = 1`
    DivideSelf,

    /// `6/4 = 3/2`
    ReduceFraction,

    /// `sin(asin(x)) = x`
    /// `ln(e^x) = x`
    /// `e^ln(x) = x`
    InverseFunction,

    /// `true & p = p`
    /// `false | p = p`
    /// `!!p = p`
    LogicIdentity,

    /// `if(true, a, b) = a`
    ConstantCondition,

    /// `if(c, a, a) = a`
    SameBranches,

    /// `b == a = a == b`
    ReorderOperands,
}
