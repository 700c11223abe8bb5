//! Float math combinators over expressions.
//!
//! Thin per-element wrappers around the scalar math functions. Every method
//! builds a lazy node; nothing is computed until the expression is realized
//! or pulled.

use num_traits::Float;

use crate::error::Result;
use crate::expr::{BinaryExpr, Expression, UnaryExpr};

macro_rules! float_unary {
    ($($(#[$doc:meta])* $name:ident => $f:expr;)*) => {$(
        $(#[$doc])*
        fn $name(&self) -> UnaryExpr<Self, fn(Self::Elem) -> Self::Elem> {
            self.map($f as fn(Self::Elem) -> Self::Elem)
        }
    )*};
}

macro_rules! float_predicate {
    ($($(#[$doc:meta])* $name:ident => $f:expr;)*) => {$(
        $(#[$doc])*
        fn $name(&self) -> UnaryExpr<Self, fn(Self::Elem) -> bool> {
            self.map($f as fn(Self::Elem) -> bool)
        }
    )*};
}

macro_rules! float_binary {
    ($($(#[$doc:meta])* $name:ident => $f:expr;)*) => {$(
        $(#[$doc])*
        fn $name<R>(&self, rhs: &R) -> Result<BinaryExpr<Self, R, fn(Self::Elem, Self::Elem) -> Self::Elem>>
        where
            R: Expression<Elem = Self::Elem>,
        {
            self.zip_map(rhs, $f as fn(Self::Elem, Self::Elem) -> Self::Elem)
        }
    )*};
}

/// Element-wise math over float-valued expressions.
///
/// Blanket-implemented for every expression whose element type is a float.
pub trait FloatExpression: Expression
where
    Self::Elem: Float,
{
    float_unary! {
        /// Element-wise absolute value.
        abs => Float::abs;
        /// Element-wise square root.
        sqrt => Float::sqrt;
        /// Element-wise square.
        square => |x| x * x;
        /// Element-wise reciprocal (1/x).
        recip => Float::recip;
        /// Element-wise natural exponential.
        exp => Float::exp;
        /// Element-wise `e^x - 1`.
        exp_m1 => Float::exp_m1;
        /// Element-wise natural logarithm.
        ln => Float::ln;
        /// Element-wise `ln(1 + x)`.
        ln_1p => Float::ln_1p;
        /// Element-wise base-2 logarithm.
        log2 => Float::log2;
        /// Element-wise base-10 logarithm.
        log10 => Float::log10;
        /// Element-wise sine.
        sin => Float::sin;
        /// Element-wise cosine.
        cos => Float::cos;
        /// Element-wise tangent.
        tan => Float::tan;
        /// Element-wise arcsine.
        asin => Float::asin;
        /// Element-wise arccosine.
        acos => Float::acos;
        /// Element-wise arctangent.
        atan => Float::atan;
        /// Element-wise hyperbolic sine.
        sinh => Float::sinh;
        /// Element-wise hyperbolic cosine.
        cosh => Float::cosh;
        /// Element-wise hyperbolic tangent.
        tanh => Float::tanh;
        /// Element-wise floor.
        floor => Float::floor;
        /// Element-wise ceiling.
        ceil => Float::ceil;
        /// Element-wise truncation toward zero.
        trunc => Float::trunc;
        /// Element-wise rounding to the nearest integer, ties away from zero.
        round => Float::round;
        /// Element-wise sign (-1, 0, or 1; NaN stays NaN).
        signum => Float::signum;
        /// Element-wise radians-to-degrees conversion.
        to_degrees => Float::to_degrees;
        /// Element-wise degrees-to-radians conversion.
        to_radians => Float::to_radians;
    }

    float_predicate! {
        /// Element-wise NaN test.
        is_nan => Float::is_nan;
        /// Element-wise infinity test.
        is_infinite => Float::is_infinite;
        /// Element-wise finiteness test.
        is_finite => Float::is_finite;
    }

    float_binary! {
        /// Element-wise maximum of two operands.
        maximum => Float::max;
        /// Element-wise minimum of two operands.
        minimum => Float::min;
        /// Element-wise power.
        pow => Float::powf;
        /// Element-wise hypotenuse `sqrt(a^2 + b^2)`.
        hypot => Float::hypot;
        /// Element-wise four-quadrant arctangent.
        atan2 => Float::atan2;
        /// Element-wise copy of the sign of the second operand.
        copysign => Float::copysign;
    }
}

impl<E> FloatExpression for E
where
    E: Expression,
    E::Elem: Float,
{
}
