//! Lazy expression graph.
//!
//! Operations on arrays build small expression nodes instead of computing
//! results: a node carries its operands, a scalar function, and the inferred
//! broadcast output shape. Nothing is allocated per operator — shapes are
//! inline values and operands are cheap handles — so chains of many
//! operators stay O(1) to compose. Evaluation is purely pull-based: asking a
//! node for the element at an output index recursively asks its operands at
//! the broadcast-adjusted index. An expression only ever touches concrete
//! storage when it is forced through [`realize`](crate::realize::realize).
//!
//! Broadcast compatibility is validated when a binary node is constructed,
//! never deferred to evaluation. The named constructors return `Result`; the
//! arithmetic operator sugar panics with the same message.

mod math;

pub use math::FloatExpression;

use crate::array::Array;
use crate::dim::Dimension;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::shape::{Shape, MAX_RANK};

// ============================================================================
// Expression Trait
// ============================================================================

/// A lazily evaluated array-valued expression.
///
/// Implemented by array handles, scalar operands, and the node types
/// composed from them. All implementations are cheap to clone.
///
/// # Examples
///
/// ```
/// use koto::prelude::*;
///
/// let a = Array::from_vec(vec![1.0, 2.0, 3.0], [3, 1]).unwrap();
/// let b = Array::from_vec(vec![10.0, 20.0], [1, 2]).unwrap();
/// let sum: Array<f64, Dim2> = (&a + &b).realize().unwrap();
/// assert_eq!(sum.dims(), &[3, 2]);
/// assert_eq!(sum.get(&[2, 1]).unwrap(), 23.0);
/// ```
pub trait Expression: Clone {
    /// Element type produced by evaluation.
    type Elem: Element;

    /// The (broadcast) output shape of this expression.
    fn shape(&self) -> &Shape;

    /// Evaluates the element at `index` (length == `shape().rank()`).
    ///
    /// Bounds are the caller's responsibility; [`realize`](Expression::realize)
    /// only ever asks for in-range indices.
    fn eval(&self, index: &[usize]) -> Self::Elem;

    /// Forces this expression into a concrete array of rank `D::NDIM`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankMismatch`] if the expression's rank differs from
    /// `D::NDIM`.
    fn realize<D: Dimension>(&self) -> Result<Array<Self::Elem, D>> {
        crate::realize::realize(self)
    }

    /// Applies `f` element-wise, lazily.
    fn map<U, F>(&self, f: F) -> UnaryExpr<Self, F>
    where
        U: Element,
        F: Fn(Self::Elem) -> U + Clone,
    {
        UnaryExpr::new(self.clone(), f)
    }

    /// Combines two expressions element-wise with broadcasting, lazily.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the operand shapes cannot be
    /// broadcast together.
    fn zip_map<R, U, F>(&self, rhs: &R, f: F) -> Result<BinaryExpr<Self, R, F>>
    where
        R: Expression,
        U: Element,
        F: Fn(Self::Elem, R::Elem) -> U + Clone,
    {
        BinaryExpr::new(self.clone(), rhs.clone(), f)
    }

    // ------------------------------------------------------------------------
    // Comparison
    // ------------------------------------------------------------------------

    /// Element-wise `<`, producing a boolean expression.
    fn less<R>(&self, rhs: &R) -> Result<BinaryExpr<Self, R, fn(Self::Elem, Self::Elem) -> bool>>
    where
        R: Expression<Elem = Self::Elem>,
    {
        self.zip_map(rhs, (|a, b| a < b) as fn(Self::Elem, Self::Elem) -> bool)
    }

    /// Element-wise `<=`, producing a boolean expression.
    fn less_equal<R>(
        &self,
        rhs: &R,
    ) -> Result<BinaryExpr<Self, R, fn(Self::Elem, Self::Elem) -> bool>>
    where
        R: Expression<Elem = Self::Elem>,
    {
        self.zip_map(rhs, (|a, b| a <= b) as fn(Self::Elem, Self::Elem) -> bool)
    }

    /// Element-wise `>`, producing a boolean expression.
    fn greater<R>(
        &self,
        rhs: &R,
    ) -> Result<BinaryExpr<Self, R, fn(Self::Elem, Self::Elem) -> bool>>
    where
        R: Expression<Elem = Self::Elem>,
    {
        self.zip_map(rhs, (|a, b| a > b) as fn(Self::Elem, Self::Elem) -> bool)
    }

    /// Element-wise `>=`, producing a boolean expression.
    fn greater_equal<R>(
        &self,
        rhs: &R,
    ) -> Result<BinaryExpr<Self, R, fn(Self::Elem, Self::Elem) -> bool>>
    where
        R: Expression<Elem = Self::Elem>,
    {
        self.zip_map(rhs, (|a, b| a >= b) as fn(Self::Elem, Self::Elem) -> bool)
    }

    /// Element-wise `==`, producing a boolean expression.
    fn equal<R>(&self, rhs: &R) -> Result<BinaryExpr<Self, R, fn(Self::Elem, Self::Elem) -> bool>>
    where
        R: Expression<Elem = Self::Elem>,
    {
        self.zip_map(rhs, (|a, b| a == b) as fn(Self::Elem, Self::Elem) -> bool)
    }

    /// Element-wise `!=`, producing a boolean expression.
    fn not_equal<R>(
        &self,
        rhs: &R,
    ) -> Result<BinaryExpr<Self, R, fn(Self::Elem, Self::Elem) -> bool>>
    where
        R: Expression<Elem = Self::Elem>,
    {
        self.zip_map(rhs, (|a, b| a != b) as fn(Self::Elem, Self::Elem) -> bool)
    }

    // ------------------------------------------------------------------------
    // Logical (truthiness-based)
    // ------------------------------------------------------------------------

    /// Element-wise logical AND over truthiness.
    fn logical_and<R>(
        &self,
        rhs: &R,
    ) -> Result<BinaryExpr<Self, R, fn(Self::Elem, R::Elem) -> bool>>
    where
        R: Expression,
    {
        self.zip_map(
            rhs,
            (|a, b| a.is_truthy() && b.is_truthy()) as fn(Self::Elem, R::Elem) -> bool,
        )
    }

    /// Element-wise logical OR over truthiness.
    fn logical_or<R>(
        &self,
        rhs: &R,
    ) -> Result<BinaryExpr<Self, R, fn(Self::Elem, R::Elem) -> bool>>
    where
        R: Expression,
    {
        self.zip_map(
            rhs,
            (|a, b| a.is_truthy() || b.is_truthy()) as fn(Self::Elem, R::Elem) -> bool,
        )
    }

    /// Element-wise logical XOR over truthiness.
    fn logical_xor<R>(
        &self,
        rhs: &R,
    ) -> Result<BinaryExpr<Self, R, fn(Self::Elem, R::Elem) -> bool>>
    where
        R: Expression,
    {
        self.zip_map(
            rhs,
            (|a, b| a.is_truthy() != b.is_truthy()) as fn(Self::Elem, R::Elem) -> bool,
        )
    }

    /// Element-wise logical NOT over truthiness.
    fn logical_not(&self) -> UnaryExpr<Self, fn(Self::Elem) -> bool> {
        self.map((|a| !a.is_truthy()) as fn(Self::Elem) -> bool)
    }
}

// ============================================================================
// Operand Implementations
// ============================================================================

impl<T: Element, D: Dimension> Expression for Array<T, D> {
    type Elem = T;

    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn eval(&self, index: &[usize]) -> T {
        self.buffer.borrow()[self.offset + self.shape.flat_index(index)]
    }
}

impl<'a, T: Element, D: Dimension> Expression for &'a Array<T, D> {
    type Elem = T;

    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn eval(&self, index: &[usize]) -> T {
        self.buffer.borrow()[self.offset + self.shape.flat_index(index)]
    }
}

/// A scalar operand: rank 0, broadcasts against any shape.
#[derive(Clone, Copy, Debug)]
pub struct Scalar<T: Element> {
    value: T,
    shape: Shape,
}

impl<T: Element> Scalar<T> {
    /// Wraps a scalar value as an expression operand.
    pub fn new(value: T) -> Self {
        Scalar {
            value,
            shape: Shape::scalar(),
        }
    }
}

/// Shorthand for [`Scalar::new`].
pub fn scalar<T: Element>(value: T) -> Scalar<T> {
    Scalar::new(value)
}

impl<T: Element> Expression for Scalar<T> {
    type Elem = T;

    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn eval(&self, _index: &[usize]) -> T {
        self.value
    }
}

// ============================================================================
// Expression Nodes
// ============================================================================

/// Lazy element-wise application of a unary function.
#[derive(Clone)]
pub struct UnaryExpr<E, F> {
    operand: E,
    f: F,
}

impl<E, F> UnaryExpr<E, F> {
    pub(crate) fn new(operand: E, f: F) -> Self {
        UnaryExpr { operand, f }
    }
}

impl<E, F, U> Expression for UnaryExpr<E, F>
where
    E: Expression,
    U: Element,
    F: Fn(E::Elem) -> U + Clone,
{
    type Elem = U;

    fn shape(&self) -> &Shape {
        self.operand.shape()
    }

    fn eval(&self, index: &[usize]) -> U {
        (self.f)(self.operand.eval(index))
    }
}

/// Lazy element-wise combination of two operands under broadcasting.
///
/// The output shape is computed when the node is built; incompatible operand
/// shapes are rejected there and never reach evaluation.
#[derive(Clone)]
pub struct BinaryExpr<L, R, F> {
    lhs: L,
    rhs: R,
    f: F,
    shape: Shape,
}

impl<L, R, F, U> BinaryExpr<L, R, F>
where
    L: Expression,
    R: Expression,
    U: Element,
    F: Fn(L::Elem, R::Elem) -> U + Clone,
{
    /// Builds a broadcasting binary node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the operand shapes are not
    /// broadcast-compatible.
    pub fn new(lhs: L, rhs: R, f: F) -> Result<Self> {
        let shape = lhs
            .shape()
            .broadcast(rhs.shape())
            .ok_or(Error::ShapeMismatch {
                expected: *lhs.shape(),
                actual: *rhs.shape(),
            })?;
        Ok(BinaryExpr { lhs, rhs, f, shape })
    }
}

impl<L, R, F> std::fmt::Debug for BinaryExpr<L, R, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryExpr")
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

impl<L, R, F, U> Expression for BinaryExpr<L, R, F>
where
    L: Expression,
    R: Expression,
    U: Element,
    F: Fn(L::Elem, R::Elem) -> U + Clone,
{
    type Elem = U;

    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn eval(&self, index: &[usize]) -> U {
        let mut buf = [0usize; MAX_RANK];
        let rank = operand_index(index, self.lhs.shape(), &mut buf);
        let left = self.lhs.eval(&buf[..rank]);
        let rank = operand_index(index, self.rhs.shape(), &mut buf);
        let right = self.rhs.eval(&buf[..rank]);
        (self.f)(left, right)
    }
}

/// Maps an output index back to an operand index: axes align from the
/// trailing end, and an axis of extent 1 sends every output index to 0.
fn operand_index(out_index: &[usize], operand_shape: &Shape, buf: &mut [usize; MAX_RANK]) -> usize {
    let rank = operand_shape.rank();
    let skip = out_index.len() - rank;
    for axis in 0..rank {
        buf[axis] = if operand_shape.extent(axis) == 1 {
            0
        } else {
            out_index[skip + axis]
        };
    }
    rank
}

// ============================================================================
// Operator Sugar
// ============================================================================

// The named constructors return Result; the operators panic on a broadcast
// failure with the same rendered message.
macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident) => {
        impl<'a, T, D, R> std::ops::$trait<R> for &'a Array<T, D>
        where
            T: Element + std::ops::$trait<Output = T>,
            D: Dimension,
            R: Expression<Elem = T>,
        {
            type Output = BinaryExpr<&'a Array<T, D>, R, fn(T, T) -> T>;

            fn $method(self, rhs: R) -> Self::Output {
                let f: fn(T, T) -> T = |a, b| std::ops::$trait::$method(a, b);
                match BinaryExpr::new(self, rhs, f) {
                    Ok(node) => node,
                    Err(e) => panic!("{}", e),
                }
            }
        }

        impl<T, R> std::ops::$trait<R> for Scalar<T>
        where
            T: Element + std::ops::$trait<Output = T>,
            R: Expression<Elem = T>,
        {
            type Output = BinaryExpr<Scalar<T>, R, fn(T, T) -> T>;

            fn $method(self, rhs: R) -> Self::Output {
                let f: fn(T, T) -> T = |a, b| std::ops::$trait::$method(a, b);
                match BinaryExpr::new(self, rhs, f) {
                    Ok(node) => node,
                    Err(e) => panic!("{}", e),
                }
            }
        }

        impl<E, F, U, R> std::ops::$trait<R> for UnaryExpr<E, F>
        where
            E: Expression,
            U: Element + std::ops::$trait<Output = U>,
            F: Fn(E::Elem) -> U + Clone,
            R: Expression<Elem = U>,
        {
            type Output = BinaryExpr<UnaryExpr<E, F>, R, fn(U, U) -> U>;

            fn $method(self, rhs: R) -> Self::Output {
                let f: fn(U, U) -> U = |a, b| std::ops::$trait::$method(a, b);
                match BinaryExpr::new(self, rhs, f) {
                    Ok(node) => node,
                    Err(e) => panic!("{}", e),
                }
            }
        }

        impl<L, R0, F, U, R> std::ops::$trait<R> for BinaryExpr<L, R0, F>
        where
            L: Expression,
            R0: Expression,
            U: Element + std::ops::$trait<Output = U>,
            F: Fn(L::Elem, R0::Elem) -> U + Clone,
            R: Expression<Elem = U>,
        {
            type Output = BinaryExpr<BinaryExpr<L, R0, F>, R, fn(U, U) -> U>;

            fn $method(self, rhs: R) -> Self::Output {
                let f: fn(U, U) -> U = |a, b| std::ops::$trait::$method(a, b);
                match BinaryExpr::new(self, rhs, f) {
                    Ok(node) => node,
                    Err(e) => panic!("{}", e),
                }
            }
        }
    };
}

impl_binary_operator!(Add, add);
impl_binary_operator!(Sub, sub);
impl_binary_operator!(Mul, mul);
impl_binary_operator!(Div, div);
impl_binary_operator!(Rem, rem);

macro_rules! impl_neg_operator {
    () => {
        impl<'a, T, D> std::ops::Neg for &'a Array<T, D>
        where
            T: Element + std::ops::Neg<Output = T>,
            D: Dimension,
        {
            type Output = UnaryExpr<&'a Array<T, D>, fn(T) -> T>;

            fn neg(self) -> Self::Output {
                UnaryExpr::new(self, (|a| -a) as fn(T) -> T)
            }
        }

        impl<E, F, U> std::ops::Neg for UnaryExpr<E, F>
        where
            E: Expression,
            U: Element + std::ops::Neg<Output = U>,
            F: Fn(E::Elem) -> U + Clone,
        {
            type Output = UnaryExpr<UnaryExpr<E, F>, fn(U) -> U>;

            fn neg(self) -> Self::Output {
                UnaryExpr::new(self, (|a| -a) as fn(U) -> U)
            }
        }

        impl<L, R0, F, U> std::ops::Neg for BinaryExpr<L, R0, F>
        where
            L: Expression,
            R0: Expression,
            U: Element + std::ops::Neg<Output = U>,
            F: Fn(L::Elem, R0::Elem) -> U + Clone,
        {
            type Output = UnaryExpr<BinaryExpr<L, R0, F>, fn(U) -> U>;

            fn neg(self) -> Self::Output {
                UnaryExpr::new(self, (|a| -a) as fn(U) -> U)
            }
        }
    };
}

impl_neg_operator!();
