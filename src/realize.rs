//! Forcing expressions into concrete arrays.
//!
//! This is the single point where a lazy expression graph is written into
//! storage. Algorithms that need random multi-pass access, in-place
//! mutation, or axis slicing realize first; a consumer that only needs one
//! linear pass can pull the expression lazily and skip this entirely.

use log::debug;

use crate::array::Array;
use crate::dim::Dimension;
use crate::error::{Error, Result};
use crate::expr::Expression;
use crate::shape::MAX_RANK;

/// Evaluates `expr` element by element, in flat row-major order, into a
/// freshly allocated array.
///
/// # Errors
///
/// Returns [`Error::RankMismatch`] if the expression's rank differs from
/// `D::NDIM`.
///
/// # Examples
///
/// ```
/// use koto::prelude::*;
/// use koto::realize::realize;
///
/// let a = Array::from_vec(vec![1.0, 2.0, 3.0], [3]).unwrap();
/// let doubled: Array<f64, Dim1> = realize(&(&a + &a)).unwrap();
/// assert_eq!(doubled.to_vec(), vec![2.0, 4.0, 6.0]);
/// ```
pub fn realize<E, D>(expr: &E) -> Result<Array<E::Elem, D>>
where
    E: Expression,
    D: Dimension,
{
    let shape = *expr.shape();
    if shape.rank() != D::NDIM {
        return Err(Error::RankMismatch {
            expected: D::NDIM,
            actual: shape.rank(),
        });
    }
    debug!("realizing expression with shape {}", shape);

    let numel = shape.numel();
    let mut data = Vec::with_capacity(numel);
    let mut index = [0usize; MAX_RANK];
    for _ in 0..numel {
        data.push(expr.eval(&index[..shape.rank()]));
        shape.advance_index(&mut index[..shape.rank()]);
    }
    Ok(Array::from_data(shape, data))
}
