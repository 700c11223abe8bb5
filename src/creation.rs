//! Array constructors.

use num_traits::{Float, Num, One, Zero};

use crate::array::Array;
use crate::dim::{Dim, Dim1};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::shape::Shape;

impl<T: Element, const N: usize> Array<T, Dim<N>> {
    /// Creates an array from a data vector in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if `data.len()` does not equal the
    /// product of the extents.
    ///
    /// # Examples
    ///
    /// ```
    /// use koto::prelude::*;
    ///
    /// let a = Array::from_vec(vec![1, 2, 3, 4, 5, 6], [2, 3]).unwrap();
    /// assert_eq!(a.dims(), &[2, 3]);
    /// ```
    pub fn from_vec(data: Vec<T>, shape: [usize; N]) -> Result<Self> {
        let shape = Shape::from(shape);
        if data.len() != shape.numel() {
            return Err(Error::ShapeMismatch {
                expected: shape,
                actual: Shape::new(&[data.len()]),
            });
        }
        Ok(Array::from_data(shape, data))
    }

    /// Creates an array filled with `value`.
    pub fn full(shape: [usize; N], value: T) -> Self {
        let shape = Shape::from(shape);
        Array::from_data(shape, vec![value; shape.numel()])
    }

    /// Creates an array with the same shape as `other`, filled with `value`.
    pub fn full_like(other: &Self, value: T) -> Self {
        Array::from_data(*other.shape(), vec![value; other.len()])
    }
}

impl<T: Element + Zero, const N: usize> Array<T, Dim<N>> {
    /// Creates an array filled with zeros.
    pub fn zeros(shape: [usize; N]) -> Self {
        Self::full(shape, T::zero())
    }

    /// Creates an array with the same shape as `other`, filled with zeros.
    pub fn zeros_like(other: &Self) -> Self {
        Self::full_like(other, T::zero())
    }

    /// Creates an array whose contents carry no meaning.
    ///
    /// Safe Rust has no way to hand out uninitialized elements, so the
    /// storage is zero-filled; callers should treat the contents as garbage
    /// to be overwritten.
    pub fn empty(shape: [usize; N]) -> Self {
        Self::full(shape, T::zero())
    }
}

impl<T: Element + One, const N: usize> Array<T, Dim<N>> {
    /// Creates an array filled with ones.
    pub fn ones(shape: [usize; N]) -> Self {
        Self::full(shape, T::one())
    }

    /// Creates an array with the same shape as `other`, filled with ones.
    pub fn ones_like(other: &Self) -> Self {
        Self::full_like(other, T::one())
    }
}

impl<T: Element + Num> Array<T, Dim1> {
    /// Creates the sequence `[0, 1, 2, ..)` up to (excluding) `stop`.
    pub fn arange(stop: T) -> Self {
        Self::arange_step(T::zero(), stop, T::one())
    }

    /// Creates the sequence `start, start + step, ..` up to (excluding)
    /// `stop`.
    ///
    /// Each value is produced by accumulation (`prev + step`), so float
    /// steps round the way repeated addition rounds.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn arange_step(start: T, stop: T, step: T) -> Self {
        assert!(step != T::zero(), "arange step must be nonzero");
        let mut data = Vec::new();
        let ascending = step > T::zero();
        let mut v = start;
        while (ascending && v < stop) || (!ascending && v > stop) {
            data.push(v);
            v = v + step;
        }
        let shape = Shape::new(&[data.len()]);
        Array::from_data(shape, data)
    }
}

impl<T: Element + Float> Array<T, Dim1> {
    /// Creates `num` evenly spaced values from `start` to `stop` inclusive.
    pub fn linspace(start: T, stop: T, num: usize) -> Self {
        if num < 2 {
            let data = if num == 0 { vec![] } else { vec![start] };
            let shape = Shape::new(&[data.len()]);
            return Array::from_data(shape, data);
        }
        let step = (stop - start) / T::from(num - 1).expect("num fits in T");
        // nudge the bound by half a step so accumulated rounding error
        // cannot drop the endpoint
        let half = T::from(0.5).expect("0.5 fits in T");
        Self::arange_step(start, stop + step * half, step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dim::Dim2;

    #[test]
    fn test_zeros_ones_full() {
        let z: Array<f32, Dim2> = Array::zeros([3, 4]);
        assert_eq!(z.dims(), &[3, 4]);
        assert!(z.to_vec().iter().all(|&x| x == 0.0));

        let o: Array<i32, Dim2> = Array::ones([2, 3]);
        assert!(o.to_vec().iter().all(|&x| x == 1));

        let f: Array<f64, Dim2> = Array::full([2, 2], 3.25);
        assert_eq!(f.to_vec(), vec![3.25; 4]);
    }

    #[test]
    fn test_like_constructors() {
        let base: Array<f32, Dim2> = Array::ones([3, 4]);
        let z = Array::zeros_like(&base);
        assert_eq!(z.dims(), base.dims());
        assert!(z.to_vec().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_from_vec_count_mismatch() {
        let r: Result<Array<i32, Dim2>> = Array::from_vec(vec![1, 2, 3], [2, 2]);
        assert!(matches!(r, Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_arange() {
        let a: Array<i32, Dim1> = Array::arange(5);
        assert_eq!(a.to_vec(), vec![0, 1, 2, 3, 4]);

        let b: Array<f64, Dim1> = Array::arange_step(1.0, 2.0, 0.25);
        assert_eq!(b.to_vec(), vec![1.0, 1.25, 1.5, 1.75]);

        let c: Array<i32, Dim1> = Array::arange_step(5, 0, -2);
        assert_eq!(c.to_vec(), vec![5, 3, 1]);

        let empty: Array<i32, Dim1> = Array::arange_step(3, 3, 1);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_linspace() {
        let a: Array<f64, Dim1> = Array::linspace(0.0, 1.0, 5);
        assert_eq!(a.to_vec(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let single: Array<f64, Dim1> = Array::linspace(2.0, 3.0, 1);
        assert_eq!(single.to_vec(), vec![2.0]);
    }
}
