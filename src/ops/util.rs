//! Whole-array comparison and convenience helpers.

use num_traits::Float;

use crate::array::Array;
use crate::dim::{Dim1, Dimension};
use crate::element::Element;
use crate::expr::{scalar, Expression, FloatExpression};
use crate::shape::Shape;

/// Default relative tolerance of [`allclose`].
pub const ALLCLOSE_RTOL: f64 = 1e-5;
/// Default absolute tolerance of [`allclose`].
pub const ALLCLOSE_ATOL: f64 = 1e-8;

/// Returns `true` if `u` and `v` have the same element count and every pair
/// of elements is within `atol + rtol * |v|` of each other.
pub fn allclose_with<T, D1, D2>(
    u: &Array<T, D1>,
    v: &Array<T, D2>,
    rtol: T,
    atol: T,
) -> bool
where
    T: Element + Float,
    D1: Dimension,
    D2: Dimension,
{
    if u.len() != v.len() {
        return false;
    }
    u.with_slice(|us| {
        v.with_slice(|vs| {
            us.iter()
                .zip(vs.iter())
                .all(|(&a, &b)| !((a - b).abs() > atol + rtol * b.abs()))
        })
    })
}

/// [`allclose_with`] at the conventional tolerances (`rtol=1e-5`,
/// `atol=1e-8`).
pub fn allclose<T, D1, D2>(u: &Array<T, D1>, v: &Array<T, D2>) -> bool
where
    T: Element + Float,
    D1: Dimension,
    D2: Dimension,
{
    let rtol = T::from(ALLCLOSE_RTOL).expect("tolerance fits in T");
    let atol = T::from(ALLCLOSE_ATOL).expect("tolerance fits in T");
    allclose_with(u, v, rtol, atol)
}

/// Returns `true` if the two arrays have identical shapes and elements.
pub fn array_equal<T, D1, D2>(u: &Array<T, D1>, v: &Array<T, D2>) -> bool
where
    T: Element,
    D1: Dimension,
    D2: Dimension,
{
    if u.dims() != v.dims() {
        return false;
    }
    u.with_slice(|us| v.with_slice(|vs| us == vs))
}

/// Concatenates the flattened elements of `a` and `b` into a 1-dimensional
/// array.
pub fn append<T, D1, D2>(a: &Array<T, D1>, b: &Array<T, D2>) -> Array<T, Dim1>
where
    T: Element,
    D1: Dimension,
    D2: Dimension,
{
    let mut data = a.to_vec();
    data.extend(b.to_vec());
    let shape = Shape::new(&[data.len()]);
    Array::from_data(shape, data)
}

/// Rounds every element to the given number of decimals.
pub fn around<T, D>(a: &Array<T, D>, decimals: i32) -> Array<T, D>
where
    T: Element + Float,
    D: Dimension,
{
    let factor = T::from(10.0).expect("10 fits in T").powi(decimals);
    ((a * scalar(factor)).round() / scalar(factor))
        .realize()
        .expect("around preserves the operand rank")
}

/// Returns the extent of the leading axis.
pub fn alen<T: Element, D: Dimension>(a: &Array<T, D>) -> usize {
    a.shape().extent(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dim::{Dim1, Dim2};

    #[test]
    fn test_allclose() {
        let a: Array<f64, Dim1> = Array::from_vec(vec![1.0, 2.0], [2]).unwrap();
        let b: Array<f64, Dim1> = Array::from_vec(vec![1.0 + 1e-9, 2.0], [2]).unwrap();
        assert!(allclose(&a, &b));

        let c: Array<f64, Dim1> = Array::from_vec(vec![1.1, 2.0], [2]).unwrap();
        assert!(!allclose(&a, &c));

        let short: Array<f64, Dim1> = Array::from_vec(vec![1.0], [1]).unwrap();
        assert!(!allclose(&a, &short));
    }

    #[test]
    fn test_array_equal() {
        let a: Array<i32, Dim2> = Array::from_vec(vec![1, 2, 3, 4], [2, 2]).unwrap();
        let b: Array<i32, Dim2> = Array::from_vec(vec![1, 2, 3, 4], [2, 2]).unwrap();
        assert!(array_equal(&a, &b));

        // same elements under a different shape are not equal
        let flat: Array<i32, Dim1> = Array::from_vec(vec![1, 2, 3, 4], [4]).unwrap();
        assert!(!array_equal(&a, &flat));

        b.set(&[1, 1], 9).unwrap();
        assert!(!array_equal(&a, &b));
    }

    #[test]
    fn test_append() {
        let a: Array<i32, Dim2> = Array::from_vec(vec![1, 2, 3, 4], [2, 2]).unwrap();
        let b: Array<i32, Dim1> = Array::from_vec(vec![5, 6], [2]).unwrap();
        let joined = append(&a, &b);
        assert_eq!(joined.dims(), &[6]);
        assert_eq!(joined.to_vec(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_around() {
        let a: Array<f64, Dim1> = Array::from_vec(vec![1.234, 5.678], [2]).unwrap();
        let r = around(&a, 1);
        assert!(allclose_with(
            &r,
            &Array::from_vec(vec![1.2, 5.7], [2]).unwrap(),
            1e-12,
            1e-12
        ));
        let whole = around(&a, 0);
        assert_eq!(whole.to_vec(), vec![1.0, 6.0]);
    }

    #[test]
    fn test_alen() {
        let a: Array<i32, Dim2> = Array::zeros([5, 2]);
        assert_eq!(alen(&a), 5);
    }
}
