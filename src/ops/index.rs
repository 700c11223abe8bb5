//! Index-producing algorithms: argmin/argmax, argsort, argwhere.

use std::cmp::Ordering;

use log::trace;

use crate::array::Array;
use crate::dim::{Dim2, Dimension};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::shape::{Shape, MAX_RANK};

impl<T: Element, D: Dimension> Array<T, D> {
    /// Returns the flat index of the smallest element (first occurrence).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySequence`] if the array has no elements.
    pub fn argmin(&self) -> Result<usize> {
        self.with_slice(|data| {
            let (&first, rest) = data.split_first().ok_or(Error::EmptySequence)?;
            let mut best = first;
            let mut best_index = 0;
            for (i, &v) in rest.iter().enumerate() {
                if v < best {
                    best = v;
                    best_index = i + 1;
                }
            }
            Ok(best_index)
        })
    }

    /// Returns the flat index of the largest element (first occurrence).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySequence`] if the array has no elements.
    pub fn argmax(&self) -> Result<usize> {
        self.with_slice(|data| {
            let (&first, rest) = data.split_first().ok_or(Error::EmptySequence)?;
            let mut best = first;
            let mut best_index = 0;
            for (i, &v) in rest.iter().enumerate() {
                if v > best {
                    best = v;
                    best_index = i + 1;
                }
            }
            Ok(best_index)
        })
    }

    /// Sorts indices along the innermost axis.
    ///
    /// For every innermost run the output holds the permutation of
    /// `[0, extent)` that orders the run's values ascending. The sort is
    /// unstable; incomparable values (NaN) tie arbitrarily.
    pub fn argsort(&self) -> Array<usize, D> {
        let shape = *self.shape();
        let run = shape.extent(shape.rank() - 1);
        trace!("argsort over {} runs of {}", if run == 0 { 0 } else { shape.numel() / run }, run);
        let indices = self.with_slice(|data| {
            let mut indices = vec![0usize; data.len()];
            if run > 0 {
                for (values, slot) in data.chunks_exact(run).zip(indices.chunks_exact_mut(run)) {
                    for (i, s) in slot.iter_mut().enumerate() {
                        *s = i;
                    }
                    slot.sort_unstable_by(|&i, &j| {
                        values[i].partial_cmp(&values[j]).unwrap_or(Ordering::Equal)
                    });
                }
            }
            indices
        });
        Array::from_data(shape, indices)
    }

    /// Returns the multi-index of every truthy element as a rank-2 array of
    /// shape `(count, rank)`, rows in row-major enumeration order.
    pub fn argwhere(&self) -> Array<usize, Dim2> {
        let shape = *self.shape();
        let rank = shape.rank();
        let mut rows: Vec<usize> = Vec::new();
        let mut count = 0;
        self.with_slice(|data| {
            let mut index = [0usize; MAX_RANK];
            for &v in data {
                if v.is_truthy() {
                    rows.extend_from_slice(&index[..rank]);
                    count += 1;
                }
                shape.advance_index(&mut index[..rank]);
            }
        });
        Array::from_data(Shape::new(&[count, rank]), rows)
    }
}
