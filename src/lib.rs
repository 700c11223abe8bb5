//! Koto: statically-ranked array runtime
//!
//! Koto reproduces the semantics of a dynamic, shape-polymorphic numerical
//! array model with ahead-of-time, statically-typed code: arrays carry a
//! fixed element type and a compile-time-known rank, element-wise work
//! composes lazily with broadcasting, and the axis algorithms recurse over
//! rank through a single structural recursion.
//!
//! # Architecture
//!
//! - **shape**: extents, row-major strides, broadcast computation
//! - **dim**: compile-time rank markers (`Dim1`..`Dim6`)
//! - **array**: the dense container; buffers are shared across views
//! - **expr**: lazy expression graph with pull-based evaluation
//! - **realize**: the single point where expressions become storage
//! - **ops**: reductions, cumulative sums, argsort/argwhere, transpose
//!
//! # Example
//!
//! ```
//! use koto::prelude::*;
//!
//! let a = Array::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], [2, 3]).unwrap();
//! assert_eq!(a.sum(), 21.0);
//! assert_eq!(a.sum_axis(0).unwrap().to_vec(), vec![5.0, 7.0, 9.0]);
//!
//! // element-wise work stays lazy until realized
//! let b = Array::from_vec(vec![10.0, 20.0, 30.0], [3]).unwrap();
//! let c: Array<f64, Dim2> = (&a + &b).realize().unwrap();
//! assert_eq!(c.get(&[1, 2]).unwrap(), 36.0);
//! ```

// ============================================================================
// Core Modules
// ============================================================================

pub mod array;
pub mod creation;
pub mod dim;
pub mod element;
pub mod error;
pub mod expr;
pub mod fmt;
pub mod ops;
pub mod realize;
pub mod shape;

// ============================================================================
// Re-exports
// ============================================================================

pub use array::Array;
pub use dim::{Dim, Dim1, Dim2, Dim3, Dim4, Dim5, Dim6, Dimension, HasSmaller};
pub use element::Element;
pub use error::{Error, Result};
pub use expr::{scalar, BinaryExpr, Expression, FloatExpression, Scalar, UnaryExpr};
pub use fmt::array2string;
pub use ops::{alen, allclose, allclose_with, append, around, array_equal, AxisReduce};
pub use shape::{Shape, MAX_RANK};

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module with commonly used types and traits
pub mod prelude {
    pub use crate::array::Array;
    pub use crate::dim::{Dim, Dim1, Dim2, Dim3, Dim4, Dim5, Dim6, Dimension};
    pub use crate::element::Element;
    pub use crate::error::{Error, Result};
    pub use crate::expr::{scalar, Expression, FloatExpression};
    pub use crate::ops::{allclose, array_equal, AxisReduce};
    pub use crate::shape::Shape;
}
