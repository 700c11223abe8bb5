//! The rank-generic algorithm family.

pub mod index;
pub mod reduce;
pub mod transpose;
pub mod util;

pub use reduce::AxisReduce;
pub use util::{alen, allclose, allclose_with, append, around, array_equal};
