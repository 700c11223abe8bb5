//! Axis permutation.

use log::trace;

use crate::array::Array;
use crate::dim::Dimension;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::shape::{Shape, MAX_RANK};

impl<T: Element, D: Dimension> Array<T, D> {
    /// Transposes the array by reversing its axis order.
    ///
    /// This moves data into a fresh buffer (the result is not a view).
    pub fn transpose(&self) -> Array<T, D> {
        let mut axes = [0usize; MAX_RANK];
        for (i, a) in axes[..D::NDIM].iter_mut().enumerate() {
            *a = D::NDIM - 1 - i;
        }
        self.transpose_axes(&axes[..D::NDIM])
            .expect("reversed axis order is a valid permutation")
    }

    /// Transposes the array under an explicit axis permutation: output axis
    /// `s` takes its extent and data from input axis `axes[s]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPermutation`] unless `axes` is a bijection on
    /// `[0, rank)`.
    pub fn transpose_axes(&self, axes: &[usize]) -> Result<Array<T, D>> {
        let rank = D::NDIM;
        let mut seen = [false; MAX_RANK];
        let valid = axes.len() == rank
            && axes.iter().all(|&a| {
                if a >= rank || seen[a] {
                    false
                } else {
                    seen[a] = true;
                    true
                }
            });
        if !valid {
            return Err(Error::InvalidPermutation {
                axes: axes.to_vec(),
            });
        }

        let old_shape = *self.shape();
        let old_strides = old_shape.strides();
        let mut new_dims = [0usize; MAX_RANK];
        for (s, &a) in axes.iter().enumerate() {
            new_dims[s] = old_shape.extent(a);
        }
        let new_shape = Shape::new(&new_dims[..rank]);
        let new_strides = new_shape.strides();
        trace!("transpose {} -> {} via {:?}", old_shape, new_shape, axes);

        let numel = old_shape.numel();
        let data = self.with_slice(|src| {
            let mut out = Vec::with_capacity(numel);
            for flat in 0..numel {
                // unravel under the destination strides, gather under the
                // permuted source strides
                let mut src_index = 0;
                for (s, &a) in axes.iter().enumerate() {
                    src_index += ((flat / new_strides[s]) % new_dims[s]) * old_strides[a];
                }
                out.push(src[src_index]);
            }
            out
        });
        Ok(Array::from_data(new_shape, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dim::{Dim2, Dim3};

    #[test]
    fn test_transpose_matrix() {
        let a: Array<i32, Dim2> = Array::from_vec(vec![1, 2, 3, 4, 5, 6], [2, 3]).unwrap();
        let t = a.transpose();
        assert_eq!(t.dims(), &[3, 2]);
        assert_eq!(t.to_vec(), vec![1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn test_transpose_involution() {
        let a: Array<i64, Dim3> = Array::from_vec((0..24).collect(), [2, 3, 4]).unwrap();
        let back = a.transpose().transpose();
        assert_eq!(back.dims(), a.dims());
        assert_eq!(back.to_vec(), a.to_vec());
    }

    #[test]
    fn test_transpose_explicit_permutation() {
        let a: Array<i64, Dim3> = Array::from_vec((0..24).collect(), [2, 3, 4]).unwrap();
        let p = a.transpose_axes(&[2, 0, 1]).unwrap();
        assert_eq!(p.dims(), &[4, 2, 3]);
        // p[k][i][j] == a[i][j][k]
        assert_eq!(p.get(&[3, 1, 2]).unwrap(), a.get(&[1, 2, 3]).unwrap());
    }

    #[test]
    fn test_transpose_identity_permutation() {
        let a: Array<i32, Dim2> = Array::from_vec(vec![1, 2, 3, 4], [2, 2]).unwrap();
        let same = a.transpose_axes(&[0, 1]).unwrap();
        assert_eq!(same.to_vec(), a.to_vec());
    }

    #[test]
    fn test_transpose_rejects_bad_axes() {
        let a: Array<i32, Dim2> = Array::zeros([2, 2]);
        assert!(matches!(
            a.transpose_axes(&[0, 2]),
            Err(Error::InvalidPermutation { .. })
        ));
        assert!(matches!(
            a.transpose_axes(&[1, 1]),
            Err(Error::InvalidPermutation { .. })
        ));
        assert!(matches!(
            a.transpose_axes(&[0]),
            Err(Error::InvalidPermutation { .. })
        ));
    }

    #[test]
    fn test_transpose_not_a_view() {
        let a: Array<i32, Dim2> = Array::from_vec(vec![1, 2, 3, 4], [2, 2]).unwrap();
        let t = a.transpose();
        t.set(&[0, 1], 99).unwrap();
        assert_eq!(a.get(&[1, 0]).unwrap(), 3);
    }
}
