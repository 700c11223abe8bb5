//! Scalar element contract.

use std::fmt::{Debug, Display};

/// Trait for array element types.
///
/// Arithmetic and numeric bounds (`Zero`, `One`, `Float`, ...) are supplied
/// per-operation through `num-traits`; this trait carries only the ambient
/// requirements every element shares, plus truthiness, which `all`/`any`/
/// `argwhere` and the logical operators fold over.
pub trait Element: Copy + Clone + PartialEq + PartialOrd + Debug + Display + 'static {
    /// Returns `true` if the value counts as truthy.
    ///
    /// Mirrors the dynamic-language rule: nonzero is truthy. NaN is nonzero
    /// and therefore truthy.
    fn is_truthy(&self) -> bool;
}

macro_rules! impl_element_int {
    ($($t:ty),*) => {$(
        impl Element for $t {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        }
    )*};
}

macro_rules! impl_element_float {
    ($($t:ty),*) => {$(
        impl Element for $t {
            fn is_truthy(&self) -> bool {
                // NaN != 0.0 holds, so NaN is truthy.
                *self != 0.0
            }
        }
    )*};
}

impl_element_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_element_float!(f32, f64);

impl Element for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(3i32.is_truthy());
        assert!(!0i32.is_truthy());
        assert!((-1.5f64).is_truthy());
        assert!(!0.0f64.is_truthy());
        assert!(f64::NAN.is_truthy());
        assert!(true.is_truthy());
        assert!(!false.is_truthy());
    }
}
