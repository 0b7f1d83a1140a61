//! Fixed-size vectors and a row-major 4x4 transform matrix.
//!
//! Points are treated as row vectors: a point `p` is transformed as `p * M`, so the translation
//! part of an affine [`Mat4x4`] lives in row 3 and composing `A * B` applies `A` first.
//! Rotations are right-handed: [`Mat4x4::rotation_z`] by a quarter turn takes `+x` to `+y`.

use num_traits::{Num, NumCast, WrappingAdd, WrappingMul, WrappingNeg, WrappingSub};
use std::fmt;

mod matrix;
mod vector;

pub use matrix::{Basis, Mat4x4};
pub use vector::{
    Vec2, Vec2i, Vec2u, Vec3, Vec3i, Vec3u, Vec4, Vec4i, Vec4u, Vector2, Vector3, Vector4,
};

/// Element type of [`Vector2`], [`Vector3`] and [`Vector4`]; in practice `f32`, `i32` or `u32`.
///
/// Vector `+`, `-`, `*`, negation, `dot` and `cross` go through the `*_wrapping` methods, so
/// integer components wrap modulo 2^N on overflow in every build profile. Float components use
/// plain IEEE arithmetic.
pub trait Scalar: Copy + Default + PartialEq + fmt::Debug + fmt::Display + Num + NumCast {
    fn add_wrapping(self, rhs: Self) -> Self;
    fn sub_wrapping(self, rhs: Self) -> Self;
    fn mul_wrapping(self, rhs: Self) -> Self;
    fn neg_wrapping(self) -> Self;
}

macro_rules! impl_float_scalar {
    ($($t:ty),+) => {$(
        impl Scalar for $t {
            fn add_wrapping(self, rhs: Self) -> Self {
                self + rhs
            }
            fn sub_wrapping(self, rhs: Self) -> Self {
                self - rhs
            }
            fn mul_wrapping(self, rhs: Self) -> Self {
                self * rhs
            }
            fn neg_wrapping(self) -> Self {
                -self
            }
        }
    )+};
}

macro_rules! impl_int_scalar {
    ($($t:ty),+) => {$(
        impl Scalar for $t {
            fn add_wrapping(self, rhs: Self) -> Self {
                WrappingAdd::wrapping_add(&self, &rhs)
            }
            fn sub_wrapping(self, rhs: Self) -> Self {
                WrappingSub::wrapping_sub(&self, &rhs)
            }
            fn mul_wrapping(self, rhs: Self) -> Self {
                WrappingMul::wrapping_mul(&self, &rhs)
            }
            fn neg_wrapping(self) -> Self {
                WrappingNeg::wrapping_neg(&self)
            }
        }
    )+};
}

impl_float_scalar!(f32, f64);
impl_int_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum LinalgError {
    #[error("cannot normalise a zero-length vector")]
    ZeroLength,

    #[error("matrix is singular (determinant {det})")]
    Singular { det: f32 },
}

pub(crate) fn to_f64<T: Scalar>(value: T) -> f64 {
    value.to_f64().unwrap_or_default()
}
