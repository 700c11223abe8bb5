//! The dense array container.
//!
//! `Array<T, D>` owns a shape plus a reference-counted flat buffer. Several
//! array handles may alias one buffer: cloning is a handle copy, one-axis
//! sub-views share the parent's storage, and writes through any alias are
//! visible through every other. Deep copies are explicit ([`Array::copy`]).

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::dim::{Dimension, HasSmaller};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::shape::Shape;

/// Shared flat storage block.
///
/// Single-threaded by construction (`Rc`, not `Arc`): an embedding host must
/// confine each array graph to one thread, and the handle types are `!Send`.
pub(crate) type Buffer<T> = Rc<RefCell<Vec<T>>>;

/// A dense multi-dimensional array with row-major layout.
///
/// # Type Parameters
///
/// - `T`: element type
/// - `D`: rank marker, e.g. [`Dim2`](crate::dim::Dim2) for a matrix
///
/// # Examples
///
/// ```
/// use koto::prelude::*;
///
/// let a = Array::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], [2, 3]).unwrap();
/// assert_eq!(a.dims(), &[2, 3]);
/// assert_eq!(a.get(&[1, 2]).unwrap(), 6.0);
/// ```
pub struct Array<T: Element, D: Dimension> {
    pub(crate) buffer: Buffer<T>,
    pub(crate) shape: Shape,
    pub(crate) offset: usize,
    pub(crate) _dim: PhantomData<D>,
}

impl<T: Element, D: Dimension> Array<T, D> {
    /// Builds an array from an existing buffer, shape, and base offset.
    ///
    /// The visible region is `offset .. offset + shape.numel()`.
    pub(crate) fn from_parts(buffer: Buffer<T>, shape: Shape, offset: usize) -> Self {
        assert!(D::NDIM >= 1, "rank-0 arrays are unsupported; scalar results are bare values");
        debug_assert_eq!(shape.rank(), D::NDIM, "shape rank does not match dimension marker");
        debug_assert!(offset + shape.numel() <= buffer.borrow().len());
        Array {
            buffer,
            shape,
            offset,
            _dim: PhantomData,
        }
    }

    /// Allocates a fresh owning array from a data vector.
    pub(crate) fn from_data(shape: Shape, data: Vec<T>) -> Self {
        Self::from_parts(Rc::new(RefCell::new(data)), shape, 0)
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    /// Returns the shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the per-axis extents as a slice.
    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    /// Returns the number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        D::NDIM
    }

    /// Returns the total number of elements.
    pub fn len(&self) -> usize {
        self.shape.numel()
    }

    /// Returns `true` if the array has zero elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ========================================================================
    // Element access
    // ========================================================================

    /// Returns the element at a flat row-major index.
    ///
    /// This is the raw layer: bounds are the caller's responsibility.
    ///
    /// # Panics
    ///
    /// Panics if `flat >= len()`.
    pub fn at(&self, flat: usize) -> T {
        assert!(flat < self.len(), "flat index {} out of bounds for {} elements", flat, self.len());
        self.buffer.borrow()[self.offset + flat]
    }

    /// Writes the element at a flat row-major index.
    ///
    /// # Panics
    ///
    /// Panics if `flat >= len()`.
    pub fn set_at(&self, flat: usize, value: T) {
        assert!(flat < self.len(), "flat index {} out of bounds for {} elements", flat, self.len());
        self.buffer.borrow_mut()[self.offset + flat] = value;
    }

    /// Returns the element at a multi-dimensional index, validating it
    /// against the shape.
    pub fn get(&self, index: &[usize]) -> Result<T> {
        self.check_index(index)?;
        Ok(self.buffer.borrow()[self.offset + self.shape.flat_index(index)])
    }

    /// Writes the element at a multi-dimensional index, validating it
    /// against the shape.
    ///
    /// The write goes to the shared buffer and is visible through every
    /// handle aliasing it.
    pub fn set(&self, index: &[usize], value: T) -> Result<()> {
        self.check_index(index)?;
        self.buffer.borrow_mut()[self.offset + self.shape.flat_index(index)] = value;
        Ok(())
    }

    fn check_index(&self, index: &[usize]) -> Result<()> {
        if index.len() != D::NDIM
            || index.iter().zip(self.dims()).any(|(&i, &d)| i >= d)
        {
            return Err(Error::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.shape,
            });
        }
        Ok(())
    }

    /// Runs `f` over the visible region of the buffer.
    pub(crate) fn with_slice<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        let buf = self.buffer.borrow();
        f(&buf[self.offset..self.offset + self.len()])
    }

    /// Runs `f` over the visible region of the buffer, mutably.
    pub(crate) fn with_slice_mut<R>(&self, f: impl FnOnce(&mut [T]) -> R) -> R {
        let mut buf = self.buffer.borrow_mut();
        let offset = self.offset;
        let len = self.shape.numel();
        f(&mut buf[offset..offset + len])
    }

    // ========================================================================
    // Whole-array operations
    // ========================================================================

    /// Copies the visible elements into a vector, in row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.with_slice(|data| data.to_vec())
    }

    /// Returns a deep copy with its own freshly allocated buffer.
    pub fn copy(&self) -> Array<T, D> {
        Array::from_data(self.shape, self.to_vec())
    }

    /// Fills every element with `value`.
    pub fn fill(&self, value: T) {
        self.with_slice_mut(|data| {
            for slot in data.iter_mut() {
                *slot = value;
            }
        });
    }

    /// Copies `other` into `self` element-wise.
    ///
    /// Both arrays must have the same shape; broadcast assignment belongs to
    /// the expression layer. The source is buffered first, so assigning
    /// between aliases of one buffer stays well-defined.
    pub fn assign(&self, other: &Array<T, D>) -> Result<()> {
        if self.shape != other.shape {
            return Err(Error::ShapeMismatch {
                expected: self.shape,
                actual: other.shape,
            });
        }
        let src = other.to_vec();
        self.with_slice_mut(|data| data.copy_from_slice(&src));
        Ok(())
    }

    /// Reinterprets the array under a new shape with the same element count.
    ///
    /// Returns a view sharing this array's buffer; no data is copied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the element counts differ.
    pub fn reshape<const M: usize>(&self, new_shape: [usize; M]) -> Result<Array<T, crate::dim::Dim<M>>> {
        let new_shape = Shape::from(new_shape);
        if new_shape.numel() != self.len() {
            return Err(Error::ShapeMismatch {
                expected: self.shape,
                actual: new_shape,
            });
        }
        Ok(Array::from_parts(
            Rc::clone(&self.buffer),
            new_shape,
            self.offset,
        ))
    }

    /// Returns a 1-dimensional view of all elements in row-major order.
    pub fn flatten(&self) -> Array<T, crate::dim::Dim1> {
        self.reshape([self.len()]).expect("flatten preserves the element count")
    }
}

// ============================================================================
// Sub-views
// ============================================================================

impl<T: Element, D: HasSmaller> Array<T, D> {
    /// Returns the `i`-th sub-array along the leading axis.
    ///
    /// The sub-array is a view sharing this array's buffer: writes through it
    /// are observable through `self` at the corresponding indices, and the
    /// shared buffer lives until the last handle drops.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range for the leading axis.
    pub fn index_axis(&self, i: usize) -> Array<T, D::Smaller> {
        assert!(
            i < self.shape.extent(0),
            "index {} out of bounds for leading axis with extent {}",
            i,
            self.shape.extent(0)
        );
        let sub_shape = self.shape.tail();
        Array::from_parts(
            Rc::clone(&self.buffer),
            sub_shape,
            self.offset + i * sub_shape.numel(),
        )
    }

    /// Iterates over the sub-arrays along the leading axis, in index order.
    pub fn axis_iter(&self) -> impl Iterator<Item = Array<T, D::Smaller>> + '_ {
        (0..self.shape.extent(0)).map(move |i| self.index_axis(i))
    }
}

// ============================================================================
// Clone, Debug
// ============================================================================

impl<T: Element, D: Dimension> Clone for Array<T, D> {
    /// Returns a new handle to the same buffer (shallow). Use
    /// [`copy`](Array::copy) for a deep copy.
    fn clone(&self) -> Self {
        Array {
            buffer: Rc::clone(&self.buffer),
            shape: self.shape,
            offset: self.offset,
            _dim: PhantomData,
        }
    }
}

impl<T: Element, D: Dimension> fmt::Debug for Array<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("shape", &self.shape)
            .field("offset", &self.offset)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dim::{Dim1, Dim2};

    #[test]
    fn test_array_creation() {
        let a: Array<f32, Dim2> =
            Array::from_vec(vec![1.0, 2.0, 3.0, 4.0], [2, 2]).unwrap();
        assert_eq!(a.dims(), &[2, 2]);
        assert_eq!(a.ndim(), 2);
        assert_eq!(a.len(), 4);
        assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_checked_access() {
        let a: Array<i32, Dim2> = Array::from_vec(vec![1, 2, 3, 4, 5, 6], [2, 3]).unwrap();
        assert_eq!(a.get(&[1, 2]).unwrap(), 6);
        assert!(matches!(
            a.get(&[2, 0]),
            Err(Error::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            a.get(&[0, 0, 0]),
            Err(Error::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_subview_aliasing() {
        let a: Array<i32, Dim2> = Array::from_vec(vec![1, 2, 3, 4, 5, 6], [2, 3]).unwrap();
        let row = a.index_axis(1);
        assert_eq!(row.to_vec(), vec![4, 5, 6]);

        // writes through the view are visible through the parent
        row.set(&[0], 40).unwrap();
        assert_eq!(a.get(&[1, 0]).unwrap(), 40);

        // and a deep copy detaches
        let detached = row.copy();
        detached.set(&[1], 99).unwrap();
        assert_eq!(a.get(&[1, 1]).unwrap(), 5);
    }

    #[test]
    fn test_assign() {
        let a: Array<i32, Dim1> = Array::from_vec(vec![1, 2, 3], [3]).unwrap();
        let b: Array<i32, Dim1> = Array::from_vec(vec![7, 8, 9], [3]).unwrap();
        a.assign(&b).unwrap();
        assert_eq!(a.to_vec(), vec![7, 8, 9]);

        let c: Array<i32, Dim1> = Array::from_vec(vec![1, 2], [2]).unwrap();
        assert!(matches!(a.assign(&c), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_reshape_shares_buffer() {
        let a: Array<i32, Dim1> = Array::from_vec(vec![1, 2, 3, 4, 5, 6], [6]).unwrap();
        let m = a.reshape([2, 3]).unwrap();
        m.set(&[0, 1], 20).unwrap();
        assert_eq!(a.at(1), 20);
        assert!(matches!(a.reshape([4]), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_flatten() {
        let a: Array<i32, Dim2> = Array::from_vec(vec![1, 2, 3, 4], [2, 2]).unwrap();
        let flat = a.flatten();
        assert_eq!(flat.dims(), &[4]);
        assert_eq!(flat.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_fill() {
        let a: Array<f64, Dim2> = Array::zeros([2, 2]);
        a.fill(7.5);
        assert_eq!(a.to_vec(), vec![7.5; 4]);
    }
}
