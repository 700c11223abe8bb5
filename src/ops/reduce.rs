//! Rank-generic reductions and cumulative sums.
//!
//! The axis algorithms share one structural recursion: peel the leading axis
//! and recurse with `axis - 1` until the target axis is the leading one, then
//! fold the rank-N-1 sub-arrays into a copy of the first sub-array, in
//! increasing index order. The fold order is observable (NaN propagation,
//! float round-off) and is part of the contract.
//!
//! The recursion runs over rank-erased `(extents, data)` slices; the typed
//! per-rank impls of [`AxisReduce`] are generated per dimension marker and
//! only choose between the scalar-returning (rank 1) and array-returning
//! (rank ≥ 2) result shapes.

use std::ops::Add;

use num_traits::{One, Zero};

use crate::array::Array;
use crate::dim::{Dim, Dim1, Dimension, HasSmaller};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::shape::Shape;

// ============================================================================
// Flat folds
// ============================================================================

impl<T: Element, D: Dimension> Array<T, D> {
    /// Sums all elements in flat order. The sum of an empty array is 0.
    pub fn sum(&self) -> T
    where
        T: Zero,
    {
        self.with_slice(|data| data.iter().fold(T::zero(), |acc, &v| acc + v))
    }

    /// Returns the smallest element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySequence`] if the array has no elements.
    pub fn min(&self) -> Result<T> {
        self.with_slice(|data| {
            let (&first, rest) = data.split_first().ok_or(Error::EmptySequence)?;
            let mut best = first;
            for &v in rest {
                if v < best {
                    best = v;
                }
            }
            Ok(best)
        })
    }

    /// Returns the largest element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySequence`] if the array has no elements.
    pub fn max(&self) -> Result<T> {
        self.with_slice(|data| {
            let (&first, rest) = data.split_first().ok_or(Error::EmptySequence)?;
            let mut best = first;
            for &v in rest {
                if v > best {
                    best = v;
                }
            }
            Ok(best)
        })
    }

    /// Returns `true` if every element is truthy (vacuously `true` when
    /// empty).
    pub fn all(&self) -> bool {
        self.with_slice(|data| data.iter().all(Element::is_truthy))
    }

    /// Returns `true` if any element is truthy.
    pub fn any(&self) -> bool {
        self.with_slice(|data| data.iter().any(Element::is_truthy))
    }

    /// Running sum over the flattened elements.
    pub fn cumsum(&self) -> Array<T, Dim1>
    where
        T: Add<Output = T>,
    {
        let data = self.with_slice(|data| {
            let mut out: Vec<T> = Vec::with_capacity(data.len());
            let mut acc: Option<T> = None;
            for &v in data {
                let next = match acc {
                    Some(prev) => prev + v,
                    None => v,
                };
                out.push(next);
                acc = Some(next);
            }
            out
        });
        let shape = Shape::new(&[data.len()]);
        Array::from_data(shape, data)
    }
}

// ============================================================================
// Axis reductions
// ============================================================================

/// Axis-aware reductions over `Array<T, D>`.
///
/// [`Reduced`](AxisReduce::Reduced) is the rank-reduced result type: a bare
/// `T` for 1-dimensional arrays, an `Array<T, D::Smaller>` above. The split
/// is made by the rank of the implementing type, never deferred to runtime
/// deduction.
pub trait AxisReduce<T>: Sized
where
    T: Element + Zero + One,
{
    /// Rank-reduced result type.
    type Reduced;

    /// Sums along `axis`. A zero-extent axis reduces to zeros.
    fn sum_axis(&self, axis: usize) -> Result<Self::Reduced>;

    /// Minimum along `axis`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptySequence`] if the axis has extent 0,
    /// [`Error::AxisOutOfBounds`] if `axis >= rank`.
    fn min_axis(&self, axis: usize) -> Result<Self::Reduced>;

    /// Maximum along `axis` (errors as [`min_axis`](AxisReduce::min_axis)).
    fn max_axis(&self, axis: usize) -> Result<Self::Reduced>;

    /// Truthiness-AND along `axis`, folded in the element type: the result
    /// holds `1` where every element was truthy, `0` otherwise. A zero-extent
    /// axis reduces to ones.
    fn all_axis(&self, axis: usize) -> Result<Self::Reduced>;

    /// Truthiness-OR along `axis`, folded in the element type. A zero-extent
    /// axis reduces to zeros.
    fn any_axis(&self, axis: usize) -> Result<Self::Reduced>;

    /// Running sum along `axis`. Keeps the full rank of the input.
    fn cumsum_axis(&self, axis: usize) -> Result<Self>;
}

/// What an axis fold over a zero-extent axis produces.
enum EmptyFold<T> {
    Identity(T),
    Error,
}

fn check_axis(axis: usize, ndim: usize) -> Result<()> {
    if axis >= ndim {
        return Err(Error::AxisOutOfBounds { axis, ndim });
    }
    Ok(())
}

/// Reduces `data` (of shape `shape`) along `axis` with the fold `f`.
fn reduce_axis_erased<T, F>(
    shape: &Shape,
    data: &[T],
    axis: usize,
    f: F,
    on_empty: EmptyFold<T>,
) -> Result<(Shape, Vec<T>)>
where
    T: Element,
    F: Fn(T, T) -> T,
{
    check_axis(axis, shape.rank())?;
    let out_shape = shape.remove_axis(axis);
    if shape.extent(axis) == 0 {
        return match on_empty {
            EmptyFold::Identity(id) => Ok((out_shape, vec![id; out_shape.numel()])),
            EmptyFold::Error => Err(Error::EmptySequence),
        };
    }
    if out_shape.numel() == 0 {
        return Ok((out_shape, Vec::new()));
    }
    let mut out = Vec::with_capacity(out_shape.numel());
    reduce_rec(shape.dims(), data, axis, &f, &mut out);
    Ok((out_shape, out))
}

/// The structural recursion over rank.
///
/// At `axis == 0` the first sub-array seeds the output and the remaining
/// sub-arrays fold into it in increasing index order; at `axis > 0` every
/// leading-axis sub-array recurses independently with `axis - 1`.
fn reduce_rec<T, F>(extents: &[usize], data: &[T], axis: usize, f: &F, out: &mut Vec<T>)
where
    T: Element,
    F: Fn(T, T) -> T,
{
    let sub: usize = extents[1..].iter().product();
    if axis == 0 {
        let base = out.len();
        out.extend_from_slice(&data[..sub]);
        for k in 1..extents[0] {
            let chunk = &data[k * sub..(k + 1) * sub];
            for (i, &v) in chunk.iter().enumerate() {
                out[base + i] = f(out[base + i], v);
            }
        }
    } else {
        for chunk in data.chunks_exact(sub) {
            reduce_rec(&extents[1..], chunk, axis - 1, f, out);
        }
    }
}

/// Running sum along `axis`, preserving the input shape.
fn cumsum_erased<T>(shape: &Shape, data: &[T], axis: usize) -> Result<Vec<T>>
where
    T: Element + Add<Output = T>,
{
    check_axis(axis, shape.rank())?;
    if shape.numel() == 0 {
        return Ok(Vec::new());
    }
    let mut out = Vec::with_capacity(shape.numel());
    cumsum_rec(shape.dims(), data, axis, &mut out);
    Ok(out)
}

fn cumsum_rec<T>(extents: &[usize], data: &[T], axis: usize, out: &mut Vec<T>)
where
    T: Element + Add<Output = T>,
{
    let sub: usize = extents[1..].iter().product();
    if axis == 0 {
        let base = out.len();
        out.extend_from_slice(&data[..sub]);
        for k in 1..extents[0] {
            for i in 0..sub {
                let prev = out[base + (k - 1) * sub + i];
                out.push(prev + data[k * sub + i]);
            }
        }
    } else {
        for chunk in data.chunks_exact(sub) {
            cumsum_rec(&extents[1..], chunk, axis - 1, out);
        }
    }
}

// Rank 1: the axis fold collapses to the flat fold and returns a bare value.
impl<T> AxisReduce<T> for Array<T, Dim1>
where
    T: Element + Zero + One,
{
    type Reduced = T;

    fn sum_axis(&self, axis: usize) -> Result<T> {
        check_axis(axis, 1)?;
        Ok(self.sum())
    }

    fn min_axis(&self, axis: usize) -> Result<T> {
        check_axis(axis, 1)?;
        self.min()
    }

    fn max_axis(&self, axis: usize) -> Result<T> {
        check_axis(axis, 1)?;
        self.max()
    }

    fn all_axis(&self, axis: usize) -> Result<T> {
        check_axis(axis, 1)?;
        Ok(if self.all() { T::one() } else { T::zero() })
    }

    fn any_axis(&self, axis: usize) -> Result<T> {
        check_axis(axis, 1)?;
        Ok(if self.any() { T::one() } else { T::zero() })
    }

    fn cumsum_axis(&self, axis: usize) -> Result<Self> {
        check_axis(axis, 1)?;
        Ok(self.cumsum())
    }
}

// Rank 2 and up: the fold along an axis drops that axis and returns an array
// one rank down.
macro_rules! impl_axis_reduce {
    ($($n:literal),*) => {$(
        impl<T> AxisReduce<T> for Array<T, Dim<$n>>
        where
            T: Element + Zero + One,
        {
            type Reduced = Array<T, <Dim<$n> as HasSmaller>::Smaller>;

            fn sum_axis(&self, axis: usize) -> Result<Self::Reduced> {
                let (shape, data) = self.with_slice(|data| {
                    reduce_axis_erased(
                        self.shape(),
                        data,
                        axis,
                        |a, b| a + b,
                        EmptyFold::Identity(T::zero()),
                    )
                })?;
                Ok(Array::from_data(shape, data))
            }

            fn min_axis(&self, axis: usize) -> Result<Self::Reduced> {
                let (shape, data) = self.with_slice(|data| {
                    reduce_axis_erased(
                        self.shape(),
                        data,
                        axis,
                        |a, b| if b < a { b } else { a },
                        EmptyFold::Error,
                    )
                })?;
                Ok(Array::from_data(shape, data))
            }

            fn max_axis(&self, axis: usize) -> Result<Self::Reduced> {
                let (shape, data) = self.with_slice(|data| {
                    reduce_axis_erased(
                        self.shape(),
                        data,
                        axis,
                        |a, b| if b > a { b } else { a },
                        EmptyFold::Error,
                    )
                })?;
                Ok(Array::from_data(shape, data))
            }

            fn all_axis(&self, axis: usize) -> Result<Self::Reduced> {
                let (shape, data) = self.with_slice(|data| {
                    reduce_axis_erased(
                        self.shape(),
                        data,
                        axis,
                        |a, b| {
                            if a.is_truthy() && b.is_truthy() {
                                T::one()
                            } else {
                                T::zero()
                            }
                        },
                        EmptyFold::Identity(T::one()),
                    )
                })?;
                Ok(Array::from_data(shape, data))
            }

            fn any_axis(&self, axis: usize) -> Result<Self::Reduced> {
                let (shape, data) = self.with_slice(|data| {
                    reduce_axis_erased(
                        self.shape(),
                        data,
                        axis,
                        |a, b| {
                            if a.is_truthy() || b.is_truthy() {
                                T::one()
                            } else {
                                T::zero()
                            }
                        },
                        EmptyFold::Identity(T::zero()),
                    )
                })?;
                Ok(Array::from_data(shape, data))
            }

            fn cumsum_axis(&self, axis: usize) -> Result<Self> {
                let data = self.with_slice(|data| cumsum_erased(self.shape(), data, axis))?;
                Ok(Array::from_data(*self.shape(), data))
            }
        }
    )*};
}

impl_axis_reduce!(2, 3, 4, 5, 6);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dim::{Dim2, Dim3};

    fn sample() -> Array<f64, Dim2> {
        Array::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], [2, 3]).unwrap()
    }

    #[test]
    fn test_flat_reductions() {
        let a = sample();
        assert_eq!(a.sum(), 21.0);
        assert_eq!(a.min().unwrap(), 1.0);
        assert_eq!(a.max().unwrap(), 6.0);
        assert!(a.all());
        assert!(a.any());
    }

    #[test]
    fn test_sum_empty_is_identity() {
        let empty: Array<f64, Dim1> = Array::zeros([0]);
        assert_eq!(empty.sum(), 0.0);
        assert!(matches!(empty.min(), Err(Error::EmptySequence)));
        assert!(matches!(empty.max(), Err(Error::EmptySequence)));
        assert!(empty.all());
        assert!(!empty.any());
    }

    #[test]
    fn test_sum_axis() {
        let a = sample();
        assert_eq!(a.sum_axis(0).unwrap().to_vec(), vec![5.0, 7.0, 9.0]);
        assert_eq!(a.sum_axis(1).unwrap().to_vec(), vec![6.0, 15.0]);
        assert!(matches!(
            a.sum_axis(5),
            Err(Error::AxisOutOfBounds { axis: 5, ndim: 2 })
        ));
    }

    #[test]
    fn test_min_max_axis() {
        let a = sample();
        assert_eq!(a.min_axis(0).unwrap().to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(a.max_axis(1).unwrap().to_vec(), vec![3.0, 6.0]);
    }

    #[test]
    fn test_rank1_axis_returns_scalar() {
        let v: Array<i64, Dim1> = Array::from_vec(vec![3, 1, 2], [3]).unwrap();
        assert_eq!(v.sum_axis(0).unwrap(), 6);
        assert_eq!(v.min_axis(0).unwrap(), 1);
        assert!(matches!(
            v.sum_axis(1),
            Err(Error::AxisOutOfBounds { axis: 1, ndim: 1 })
        ));
    }

    #[test]
    fn test_axis_recursion_rank3() {
        let a: Array<i64, Dim3> =
            Array::from_vec((0..24).collect(), [2, 3, 4]).unwrap();
        // axis 1 folds the middle extent away
        let s = a.sum_axis(1).unwrap();
        assert_eq!(s.dims(), &[2, 4]);
        assert_eq!(s.get(&[0, 0]).unwrap(), 0 + 4 + 8);
        assert_eq!(s.get(&[1, 3]).unwrap(), 15 + 19 + 23);

        // peeled-axis consistency: reducing axis 0 twice matches a flat fold
        let twice = a.sum_axis(0).unwrap().sum_axis(0).unwrap();
        assert_eq!(twice.to_vec(), vec![60, 66, 72, 78]);
    }

    #[test]
    fn test_all_any_axis_fold_in_element_type() {
        let a: Array<i32, Dim2> = Array::from_vec(vec![5, 0, 2, 7, 0, 0], [2, 3]).unwrap();
        assert_eq!(a.all_axis(0).unwrap().to_vec(), vec![1, 0, 0]);
        assert_eq!(a.any_axis(0).unwrap().to_vec(), vec![1, 0, 1]);
        // a single sub-array along the axis is copied raw, not normalized
        let single: Array<i32, Dim2> = Array::from_vec(vec![5, 0, 2], [1, 3]).unwrap();
        assert_eq!(single.all_axis(0).unwrap().to_vec(), vec![5, 0, 2]);
    }

    #[test]
    fn test_nan_fold_order() {
        // a NaN in a later sub-array is never taken by the `b < a` fold;
        // a NaN in the seed sub-array survives every comparison
        let later: Array<f64, Dim2> =
            Array::from_vec(vec![1.0, 2.0, f64::NAN, 5.0], [2, 2]).unwrap();
        let m = later.min_axis(0).unwrap().to_vec();
        assert_eq!(m[0], 1.0);
        assert_eq!(m[1], 2.0);

        let seeded: Array<f64, Dim2> =
            Array::from_vec(vec![f64::NAN, 2.0, 1.0, 5.0], [2, 2]).unwrap();
        let m = seeded.min_axis(0).unwrap().to_vec();
        assert!(m[0].is_nan());
        assert_eq!(m[1], 2.0);
    }

    #[test]
    fn test_zero_extent_axis_policies() {
        let empty: Array<f64, Dim2> = Array::zeros([0, 3]);
        assert_eq!(empty.sum_axis(0).unwrap().to_vec(), vec![0.0, 0.0, 0.0]);
        assert_eq!(empty.all_axis(0).unwrap().to_vec(), vec![1.0, 1.0, 1.0]);
        assert_eq!(empty.any_axis(0).unwrap().to_vec(), vec![0.0, 0.0, 0.0]);
        assert!(matches!(empty.min_axis(0), Err(Error::EmptySequence)));
    }

    #[test]
    fn test_cumsum() {
        let a = sample();
        assert_eq!(
            a.cumsum().to_vec(),
            vec![1.0, 3.0, 6.0, 10.0, 15.0, 21.0]
        );

        let along0 = a.cumsum_axis(0).unwrap();
        assert_eq!(along0.dims(), &[2, 3]);
        assert_eq!(along0.to_vec(), vec![1.0, 2.0, 3.0, 5.0, 7.0, 9.0]);

        let along1 = a.cumsum_axis(1).unwrap();
        assert_eq!(along1.to_vec(), vec![1.0, 3.0, 6.0, 4.0, 9.0, 15.0]);
    }

    #[test]
    fn test_cumsum_last_equals_sum_axis() {
        let a: Array<i64, Dim3> =
            Array::from_vec((1..=24).collect(), [2, 3, 4]).unwrap();
        let c = a.cumsum_axis(0).unwrap();
        let last = c.index_axis(1);
        assert_eq!(last.to_vec(), a.sum_axis(0).unwrap().to_vec());
    }
}
