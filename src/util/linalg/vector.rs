#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::linalg::{to_f64, LinalgError, Scalar};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// A 2D vector generic over its element type.
///
/// Equality is exact and componentwise: two vectors are equal iff every component is equal. Use
/// [`almost_eq`](Vector2::almost_eq) to compare floating point vectors with a tolerance.
#[derive(
    Default,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    bincode::Encode,
    bincode::Decode,
)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

/// A 3D vector generic over its element type. Used for points, directions and normals.
#[derive(
    Default,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    bincode::Encode,
    bincode::Decode,
)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

/// A 4D vector generic over its element type. Rows and columns of a
/// [`Mat4x4`](crate::util::linalg::Mat4x4) are [`Vec4`]s.
#[derive(
    Default,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    bincode::Encode,
    bincode::Decode,
)]
pub struct Vector4<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

pub type Vec2 = Vector2<f32>;
pub type Vec2i = Vector2<i32>;
pub type Vec2u = Vector2<u32>;
pub type Vec3 = Vector3<f32>;
pub type Vec3i = Vector3<i32>;
pub type Vec3u = Vector3<u32>;
pub type Vec4 = Vector4<f32>;
pub type Vec4i = Vector4<i32>;
pub type Vec4u = Vector4<u32>;

/// Operations shared by every dimension. Components are listed in their fixed index order.
macro_rules! impl_vector {
    ($name:ident, $n:literal, $($f:ident),+) => {
        impl<T: Scalar> $name<T> {
            pub fn new($($f: T),+) -> Self {
                Self { $($f),+ }
            }
            #[must_use]
            pub fn zero() -> Self {
                Self { $($f: T::zero()),+ }
            }
            #[must_use]
            pub fn one() -> Self {
                Self { $($f: T::one()),+ }
            }
            #[must_use]
            pub fn splat(value: T) -> Self {
                Self { $($f: value),+ }
            }

            /// Overwrites every component, returning `self` for chaining.
            pub fn set(&mut self, $($f: T),+) -> &mut Self {
                $(self.$f = $f;)+
                self
            }

            pub fn is_zero(&self) -> bool {
                $(self.$f.is_zero())&&+
            }

            /// Sum of elementwise products.
            pub fn dot(&self, other: Self) -> T {
                T::zero() $(.add_wrapping(self.$f.mul_wrapping(other.$f)))+
            }

            /// Squared Euclidean norm, computed in `f64` so integer vectors cannot overflow.
            pub fn len_squared(&self) -> f64 {
                0.0 $(+ to_f64(self.$f) * to_f64(self.$f))+
            }

            /// Euclidean norm, computed in `f64` regardless of the element type.
            pub fn len(&self) -> f64 {
                self.len_squared().sqrt()
            }

            /// Returns this vector divided by its length.
            ///
            /// Fails with [`LinalgError::ZeroLength`] for the zero vector. Integer element types
            /// truncate each quotient toward zero.
            pub fn try_normed(&self) -> Result<Self, LinalgError> {
                let len = self.len();
                if len == 0.0 {
                    return Err(LinalgError::ZeroLength);
                }
                Ok(Self {
                    $($f: num_traits::cast(to_f64(self.$f) / len).unwrap_or_default()),+
                })
            }

            /// Returns this vector divided by its length, or the zero vector if the length is
            /// zero.
            #[must_use]
            pub fn normed(&self) -> Self {
                self.try_normed().unwrap_or_else(|_| Self::zero())
            }

            /// In-place counterpart of [`normed`](Self::normed).
            pub fn normalize(&mut self) -> &mut Self {
                *self = self.normed();
                self
            }

            /// Length of the difference vector.
            pub fn dist(&self, other: Self) -> f64 {
                let mut sum = 0.0;
                $(
                    let d = to_f64(other.$f) - to_f64(self.$f);
                    sum += d * d;
                )+
                f64::sqrt(sum)
            }

            /// Checks whether the distance between the two vectors is below
            /// [`EPSILON`](crate::core::config::EPSILON).
            pub fn almost_eq(&self, rhs: Self) -> bool {
                self.dist(rhs) < f64::from(EPSILON)
            }

            /// Converts every component to another element type, failing if any component is not
            /// representable (e.g. a negative float cast to `u32`). Floats cast to integers
            /// truncate toward zero.
            pub fn cast<U: Scalar>(&self) -> Option<$name<U>> {
                Some($name { $($f: num_traits::cast(self.$f)?),+ })
            }

            pub fn to_array(&self) -> [T; $n] {
                [$(self.$f),+]
            }
        }

        impl<T: Scalar> From<[T; $n]> for $name<T> {
            fn from(value: [T; $n]) -> Self {
                let [$($f),+] = value;
                Self { $($f),+ }
            }
        }

        impl<T: Scalar> From<$name<T>> for [T; $n] {
            fn from(value: $name<T>) -> Self {
                value.to_array()
            }
        }

        impl<T: Scalar> Zero for $name<T> {
            fn zero() -> Self {
                Self::zero()
            }

            fn is_zero(&self) -> bool {
                $name::is_zero(self)
            }
        }

        impl<T: Scalar> fmt::Display for $name<T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                let precision = f.precision();

                write!(f, "vec(")?;
                for (i, component) in self.to_array().into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if let Some(p) = precision {
                        write!(f, "{component:.p$}")?;
                    } else {
                        write!(f, "{component}")?;
                    }
                }
                write!(f, ")")
            }
        }

        impl<T: Scalar> Add<$name<T>> for $name<T> {
            type Output = $name<T>;

            fn add(self, rhs: $name<T>) -> Self::Output {
                Self { $($f: self.$f.add_wrapping(rhs.$f)),+ }
            }
        }
        impl<T: Scalar> AddAssign<$name<T>> for $name<T> {
            fn add_assign(&mut self, rhs: $name<T>) {
                *self = *self + rhs;
            }
        }
        impl<T: Scalar> Add<T> for $name<T> {
            type Output = $name<T>;

            fn add(self, rhs: T) -> Self::Output {
                Self { $($f: self.$f.add_wrapping(rhs)),+ }
            }
        }
        impl<T: Scalar> AddAssign<T> for $name<T> {
            fn add_assign(&mut self, rhs: T) {
                *self = *self + rhs;
            }
        }

        impl<T: Scalar> Sub<$name<T>> for $name<T> {
            type Output = $name<T>;

            fn sub(self, rhs: $name<T>) -> Self::Output {
                Self { $($f: self.$f.sub_wrapping(rhs.$f)),+ }
            }
        }
        impl<T: Scalar> SubAssign<$name<T>> for $name<T> {
            fn sub_assign(&mut self, rhs: $name<T>) {
                *self = *self - rhs;
            }
        }
        impl<T: Scalar> Sub<T> for $name<T> {
            type Output = $name<T>;

            fn sub(self, rhs: T) -> Self::Output {
                Self { $($f: self.$f.sub_wrapping(rhs)),+ }
            }
        }
        impl<T: Scalar> SubAssign<T> for $name<T> {
            fn sub_assign(&mut self, rhs: T) {
                *self = *self - rhs;
            }
        }

        impl<T: Scalar> Mul<$name<T>> for $name<T> {
            type Output = $name<T>;

            fn mul(self, rhs: $name<T>) -> Self::Output {
                Self { $($f: self.$f.mul_wrapping(rhs.$f)),+ }
            }
        }
        impl<T: Scalar> MulAssign<$name<T>> for $name<T> {
            fn mul_assign(&mut self, rhs: $name<T>) {
                *self = *self * rhs;
            }
        }
        impl<T: Scalar> Mul<T> for $name<T> {
            type Output = $name<T>;

            fn mul(self, rhs: T) -> Self::Output {
                Self { $($f: self.$f.mul_wrapping(rhs)),+ }
            }
        }
        impl<T: Scalar> MulAssign<T> for $name<T> {
            fn mul_assign(&mut self, rhs: T) {
                *self = *self * rhs;
            }
        }

        impl<T: Scalar> Div<$name<T>> for $name<T> {
            type Output = $name<T>;

            fn div(self, rhs: $name<T>) -> Self::Output {
                Self { $($f: self.$f / rhs.$f),+ }
            }
        }
        impl<T: Scalar> DivAssign<$name<T>> for $name<T> {
            fn div_assign(&mut self, rhs: $name<T>) {
                *self = *self / rhs;
            }
        }
        impl<T: Scalar> Div<T> for $name<T> {
            type Output = $name<T>;

            fn div(self, rhs: T) -> Self::Output {
                Self { $($f: self.$f / rhs),+ }
            }
        }
        impl<T: Scalar> DivAssign<T> for $name<T> {
            fn div_assign(&mut self, rhs: T) {
                *self = *self / rhs;
            }
        }

        impl<T: Scalar + Neg<Output = T>> Neg for $name<T> {
            type Output = $name<T>;

            fn neg(self) -> Self::Output {
                Self { $($f: self.$f.neg_wrapping()),+ }
            }
        }

        impl<T: Scalar> Sum<$name<T>> for $name<T> {
            fn sum<I: Iterator<Item = $name<T>>>(iter: I) -> Self {
                iter.fold(Self::zero(), |acc, v| acc + v)
            }
        }
    };
}

/// `scalar * vector` for a concrete scalar type; the orphan rule rules out a generic impl.
macro_rules! impl_scalar_lhs_mul {
    ($name:ident, $t:ty, $($f:ident),+) => {
        impl Mul<$name<$t>> for $t {
            type Output = $name<$t>;

            fn mul(self, rhs: $name<$t>) -> Self::Output {
                $name { $($f: self.mul_wrapping(rhs.$f)),+ }
            }
        }
        impl Mul<&$name<$t>> for $t {
            type Output = $name<$t>;

            fn mul(self, rhs: &$name<$t>) -> Self::Output {
                self * *rhs
            }
        }
    };
}

impl_vector!(Vector2, 2, x, y);
impl_vector!(Vector3, 3, x, y, z);
impl_vector!(Vector4, 4, x, y, z, w);

impl_scalar_lhs_mul!(Vector2, f32, x, y);
impl_scalar_lhs_mul!(Vector2, i32, x, y);
impl_scalar_lhs_mul!(Vector2, u32, x, y);
impl_scalar_lhs_mul!(Vector3, f32, x, y, z);
impl_scalar_lhs_mul!(Vector3, i32, x, y, z);
impl_scalar_lhs_mul!(Vector3, u32, x, y, z);
impl_scalar_lhs_mul!(Vector4, f32, x, y, z, w);
impl_scalar_lhs_mul!(Vector4, i32, x, y, z, w);
impl_scalar_lhs_mul!(Vector4, u32, x, y, z, w);

impl<T: Scalar> Vector2<T> {
    #[must_use]
    pub fn unit_x() -> Self {
        Self::new(T::one(), T::zero())
    }
    #[must_use]
    pub fn unit_y() -> Self {
        Self::new(T::zero(), T::one())
    }

    /// Widens to three dimensions with the given `z`.
    pub fn extend(&self, z: T) -> Vector3<T> {
        Vector3 {
            x: self.x,
            y: self.y,
            z,
        }
    }
}

impl<T: Scalar> Vector3<T> {
    #[must_use]
    pub fn unit_x() -> Self {
        Self::new(T::one(), T::zero(), T::zero())
    }
    #[must_use]
    pub fn unit_y() -> Self {
        Self::new(T::zero(), T::one(), T::zero())
    }
    #[must_use]
    pub fn unit_z() -> Self {
        Self::new(T::zero(), T::zero(), T::one())
    }

    /// Right-handed cross product. Integer components wrap on overflow, so for unsigned vectors
    /// the result is the two's-complement bit pattern of the signed cross product.
    ///
    /// # Examples
    ///
    /// ```
    /// use cubes::core::prelude::*;
    /// assert_eq!(Vec3::unit_x().cross(Vec3::unit_y()), Vec3::unit_z());
    /// ```
    #[must_use]
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y.mul_wrapping(other.z).sub_wrapping(self.z.mul_wrapping(other.y)),
            y: self.z.mul_wrapping(other.x).sub_wrapping(self.x.mul_wrapping(other.z)),
            z: self.x.mul_wrapping(other.y).sub_wrapping(self.y.mul_wrapping(other.x)),
        }
    }

    /// Unsigned angle between `a` and `b` in radians, in `[0, π]`.
    ///
    /// Returns 0 when either vector has zero length. The cosine is clamped into `[-1, 1]` before
    /// `acos` so that rounding cannot push it out of the domain.
    pub fn angle_between(a: Self, b: Self) -> f64 {
        let denom = a.len() * b.len();
        if denom == 0.0 {
            return 0.0;
        }
        (to_f64(a.dot(b)) / denom).clamp(-1.0, 1.0).acos()
    }

    /// Drops `z`.
    pub fn truncate(&self) -> Vector2<T> {
        Vector2 {
            x: self.x,
            y: self.y,
        }
    }

    /// Widens to four dimensions with the given `w`.
    pub fn extend(&self, w: T) -> Vector4<T> {
        Vector4 {
            x: self.x,
            y: self.y,
            z: self.z,
            w,
        }
    }
}

impl<T: Scalar> Vector4<T> {
    /// Drops `w`.
    pub fn truncate(&self) -> Vector3<T> {
        Vector3 {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }

    /// Drops `z` and `w`.
    pub fn xy(&self) -> Vector2<T> {
        Vector2 {
            x: self.x,
            y: self.y,
        }
    }
}

impl<T: Scalar> From<Vector2<T>> for Vector3<T> {
    fn from(value: Vector2<T>) -> Self {
        value.extend(T::zero())
    }
}
impl<T: Scalar> From<Vector3<T>> for Vector4<T> {
    fn from(value: Vector3<T>) -> Self {
        value.extend(T::zero())
    }
}
impl<T: Scalar> From<Vector2<T>> for Vector4<T> {
    fn from(value: Vector2<T>) -> Self {
        value.extend(T::zero()).extend(T::zero())
    }
}

// Out-of-range indices resolve to `x`.
impl<T> Index<usize> for Vector2<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            1 => &self.y,
            _ => &self.x,
        }
    }
}
impl<T> IndexMut<usize> for Vector2<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            1 => &mut self.y,
            _ => &mut self.x,
        }
    }
}
impl<T> Index<usize> for Vector3<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            1 => &self.y,
            2 => &self.z,
            _ => &self.x,
        }
    }
}
impl<T> IndexMut<usize> for Vector3<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            1 => &mut self.y,
            2 => &mut self.z,
            _ => &mut self.x,
        }
    }
}
impl<T> Index<usize> for Vector4<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => &self.x,
        }
    }
}
impl<T> IndexMut<usize> for Vector4<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => &mut self.x,
        }
    }
}
