//! Dimension markers for compile-time rank checking.
//!
//! Every array carries its rank in the type system via a marker implementing
//! [`Dimension`]. Rank-reducing operations (sub-views, axis reductions) step
//! from `Dim<N>` to `Dim<N-1>` through the [`HasSmaller`] trait, which is
//! implemented explicitly for each supported rank.

use std::fmt::Debug;

/// Trait for array dimension markers.
///
/// # Examples
///
/// ```
/// use koto::dim::{Dim, Dimension};
///
/// assert_eq!(Dim::<2>::NDIM, 2);
/// ```
pub trait Dimension: Copy + Clone + Debug + Default + PartialEq + Eq + 'static {
    /// The number of dimensions.
    const NDIM: usize;
}

/// Static dimension marker type using const generics.
///
/// `Dim<N>` represents an array with exactly N dimensions known at compile
/// time. Rank 0 is not a valid array rank — scalar results of reductions are
/// returned as bare values, never as rank-0 arrays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dim<const N: usize>;

impl<const N: usize> Dimension for Dim<N> {
    const NDIM: usize = N;
}

/// Trait for dimensions with a statically known next-smaller dimension.
///
/// This is the type-level edge used by rank-reducing operations: a sub-view
/// of an `Array<T, D>` is an `Array<T, D::Smaller>`. `Dim<1>` intentionally
/// has no `Smaller` — reducing a 1-dimensional array produces a bare scalar.
pub trait HasSmaller: Dimension {
    /// The dimension type with one fewer dimension.
    type Smaller: Dimension;
}

// Can't compute N-1 at the type level in stable Rust, so the rank ladder is
// spelled out per supported rank.
impl HasSmaller for Dim<2> {
    type Smaller = Dim<1>;
}
impl HasSmaller for Dim<3> {
    type Smaller = Dim<2>;
}
impl HasSmaller for Dim<4> {
    type Smaller = Dim<3>;
}
impl HasSmaller for Dim<5> {
    type Smaller = Dim<4>;
}
impl HasSmaller for Dim<6> {
    type Smaller = Dim<5>;
}

// Convenient type aliases for common dimensions
/// 1-dimensional array (vector)
pub type Dim1 = Dim<1>;
/// 2-dimensional array (matrix)
pub type Dim2 = Dim<2>;
/// 3-dimensional array
pub type Dim3 = Dim<3>;
/// 4-dimensional array
pub type Dim4 = Dim<4>;
/// 5-dimensional array
pub type Dim5 = Dim<5>;
/// 6-dimensional array
pub type Dim6 = Dim<6>;
