//! Shape and stride arithmetic for arrays.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Maximum supported rank. Matches the highest statically-typed dimension
/// marker ([`Dim6`](crate::dim::Dim6)).
pub const MAX_RANK: usize = 6;

/// The shape (per-axis extents) of an array.
///
/// Extents are stored inline so that building expression nodes never touches
/// the heap; a `Shape` is a plain `Copy` value.
#[derive(Clone, Copy, Eq)]
pub struct Shape {
    len: usize,
    dims: [usize; MAX_RANK],
}

impl Shape {
    /// Creates a new shape from a slice of extents.
    ///
    /// # Panics
    ///
    /// Panics if more than [`MAX_RANK`] extents are given.
    pub fn new(dims: &[usize]) -> Self {
        assert!(
            dims.len() <= MAX_RANK,
            "rank {} exceeds the supported maximum {}",
            dims.len(),
            MAX_RANK
        );
        let mut inline = [0usize; MAX_RANK];
        inline[..dims.len()].copy_from_slice(dims);
        Shape {
            len: dims.len(),
            dims: inline,
        }
    }

    /// Creates a scalar shape (rank 0, one element).
    pub fn scalar() -> Self {
        Shape {
            len: 0,
            dims: [0; MAX_RANK],
        }
    }

    /// Returns the extents as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.dims[..self.len]
    }

    /// Returns the number of dimensions (rank).
    pub fn rank(&self) -> usize {
        self.len
    }

    /// Returns the size of the i-th dimension.
    pub fn extent(&self, i: usize) -> usize {
        self.dims()[i]
    }

    /// Returns the total number of elements (1 for a scalar shape).
    pub fn numel(&self) -> usize {
        self.dims().iter().product()
    }

    /// Returns the shape with the leading axis removed.
    ///
    /// # Panics
    ///
    /// Panics on a scalar shape.
    pub fn tail(&self) -> Shape {
        Shape::new(&self.dims()[1..])
    }

    /// Returns the shape with the given axis removed.
    pub fn remove_axis(&self, axis: usize) -> Shape {
        let mut dims = [0usize; MAX_RANK];
        let mut n = 0;
        for (i, &d) in self.dims().iter().enumerate() {
            if i != axis {
                dims[n] = d;
                n += 1;
            }
        }
        Shape { len: n, dims }
    }

    /// Returns row-major strides for a contiguous layout.
    ///
    /// Only the first [`rank`](Shape::rank) entries of the returned array are
    /// meaningful.
    pub fn strides(&self) -> [usize; MAX_RANK] {
        let mut strides = [1usize; MAX_RANK];
        if self.len > 0 {
            for i in (0..self.len - 1).rev() {
                strides[i] = strides[i + 1] * self.dims[i + 1];
            }
        }
        strides
    }

    /// Computes the flat row-major index of a multi-dimensional index.
    ///
    /// Bounds are the caller's responsibility at this layer.
    pub fn flat_index(&self, indices: &[usize]) -> usize {
        let strides = self.strides();
        indices
            .iter()
            .zip(strides.iter())
            .map(|(i, s)| i * s)
            .sum()
    }

    /// Computes the multi-dimensional index of a flat index, writing it into
    /// `out[..rank]`.
    pub fn multi_index_into(&self, mut flat: usize, out: &mut [usize]) {
        let strides = self.strides();
        for (o, &stride) in out[..self.len].iter_mut().zip(strides.iter()) {
            *o = flat / stride;
            flat %= stride;
        }
    }

    /// Computes the multi-dimensional index of a flat index.
    pub fn multi_index(&self, flat: usize) -> Vec<usize> {
        let mut out = vec![0usize; self.len];
        self.multi_index_into(flat, &mut out);
        out
    }

    /// Advances a multi-index to the next position in row-major order.
    ///
    /// Returns `false` once the index has wrapped past the last position.
    pub fn advance_index(&self, index: &mut [usize]) -> bool {
        for axis in (0..self.len).rev() {
            index[axis] += 1;
            if index[axis] < self.dims[axis] {
                return true;
            }
            index[axis] = 0;
        }
        false
    }

    /// Computes the broadcast shape of `self` and `other` with trailing-axis
    /// alignment: on each axis the extents must match, or one of them must be
    /// 1. Returns `None` if the shapes are incompatible.
    pub fn broadcast(&self, other: &Shape) -> Option<Shape> {
        let max_rank = self.rank().max(other.rank());
        let mut dims = [0usize; MAX_RANK];

        for i in 0..max_rank {
            let d1 = if i < max_rank - self.rank() {
                1
            } else {
                self.dims[i - (max_rank - self.rank())]
            };
            let d2 = if i < max_rank - other.rank() {
                1
            } else {
                other.dims[i - (max_rank - other.rank())]
            };

            if d1 == d2 || d2 == 1 {
                dims[i] = d1;
            } else if d1 == 1 {
                dims[i] = d2;
            } else {
                return None;
            }
        }

        Some(Shape {
            len: max_rank,
            dims,
        })
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.dims() == other.dims()
    }
}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dims().hash(state);
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({:?})", self.dims())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, d) in self.dims().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        if self.len == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

impl From<&[usize]> for Shape {
    fn from(v: &[usize]) -> Self {
        Shape::new(v)
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(v: [usize; N]) -> Self {
        Shape::new(&v)
    }
}
