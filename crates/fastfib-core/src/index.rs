//! Conversion of caller-supplied integers into Fibonacci indices.
//!
//! The kernel works on `u64`. Public entry points accept any primitive
//! integer through [`IntoIndex`] so that a negative index is reported as
//! [`FibError::InvalidArgument`] instead of being unrepresentable.

use crate::calculator::FibError;

/// A value usable as a Fibonacci index.
pub trait IntoIndex: Copy {
    /// Validate and convert to a `u64` index.
    fn into_index(self) -> Result<u64, FibError>;
}

macro_rules! impl_into_index_unsigned {
    ($($t:ty),*) => {$(
        impl IntoIndex for $t {
            #[inline]
            fn into_index(self) -> Result<u64, FibError> {
                u64::try_from(self).map_err(|_| {
                    FibError::InvalidArgument(format!("index {self} does not fit in 64 bits"))
                })
            }
        }
    )*};
}

macro_rules! impl_into_index_signed {
    ($($t:ty),*) => {$(
        impl IntoIndex for $t {
            #[inline]
            fn into_index(self) -> Result<u64, FibError> {
                if self < 0 {
                    return Err(FibError::InvalidArgument(format!(
                        "n must be non-negative, got {self}"
                    )));
                }
                u64::try_from(self).map_err(|_| {
                    FibError::InvalidArgument(format!("index {self} does not fit in 64 bits"))
                })
            }
        }
    )*};
}

impl_into_index_unsigned!(u8, u16, u32, u64, u128, usize);
impl_into_index_signed!(i8, i16, i32, i64, i128, isize);
