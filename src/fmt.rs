//! Textual rendering of arrays.
//!
//! The rendering is deterministic and shape-annotated: nested brackets in
//! row-major order followed by the shape, e.g.
//! `array([[1, 2, 3], [4, 5, 6]], shape=(2, 3))`.

use std::fmt;

use crate::array::Array;
use crate::dim::Dimension;
use crate::element::Element;

fn write_block<T: Element>(
    f: &mut fmt::Formatter<'_>,
    extents: &[usize],
    data: &[T],
) -> fmt::Result {
    write!(f, "[")?;
    if extents.len() == 1 {
        for (i, v) in data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
    } else {
        let sub: usize = extents[1..].iter().product();
        for k in 0..extents[0] {
            if k > 0 {
                write!(f, ", ")?;
            }
            write_block(f, &extents[1..], &data[k * sub..(k + 1) * sub])?;
        }
    }
    write!(f, "]")
}

impl<T: Element, D: Dimension> fmt::Display for Array<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "array(")?;
        self.with_slice(|data| write_block(f, self.dims(), data))?;
        write!(f, ", shape={})", self.shape())
    }
}

/// Renders an array to its textual form.
pub fn array2string<T: Element, D: Dimension>(a: &Array<T, D>) -> String {
    a.to_string()
}
