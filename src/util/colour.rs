use crate::util::linalg::{Vec3, Vec3u, Vec4, Vec4u};
use num_traits::{FromPrimitive, PrimInt, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

/// An 8-bit-per-channel RGBA colour.
///
/// The default colour is transparent black.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    bincode::Encode,
    bincode::Decode,
)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

fn clamp_to_u8<I: PrimInt + FromPrimitive + ToPrimitive>(value: I) -> u8 {
    match (I::from_u8(u8::MIN), I::from_u8(u8::MAX)) {
        (Some(min), Some(max)) => value.clamp(min, max).to_u8().unwrap_or_default(),
        // Only reachable for integer types too narrow for 0..=255, e.g. i8.
        _ => value.to_u8().unwrap_or_default(),
    }
}

// Truncates toward zero, saturating negatives at 0, then wraps modulo 256.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn wrap_channel(value: f32) -> u8 {
    (value as u32 & 0xff) as u8
}

fn proportion_to_u8(value: f32) -> u8 {
    wrap_channel(255.0 * value.clamp(0.0, 1.0))
}

impl Colour {
    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
    /// Opaque colour from three channels.
    pub fn rgb_bytes(r: u8, g: u8, b: u8) -> Self {
        Self::from_bytes(r, g, b, u8::MAX)
    }
    /// Clamps each channel into `0..=255`.
    pub fn from_ints_clamp<I: PrimInt + FromPrimitive + ToPrimitive>(
        r: I,
        g: I,
        b: I,
        a: I,
    ) -> Self {
        Self::from_bytes(clamp_to_u8(r), clamp_to_u8(g), clamp_to_u8(b), clamp_to_u8(a))
    }
    /// Clamps each proportion into `[0, 1]`, then scales to `0..=255`, truncating.
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::from_bytes(
            proportion_to_u8(r),
            proportion_to_u8(g),
            proportion_to_u8(b),
            proportion_to_u8(a),
        )
    }
    /// Unpacks a little-endian RGBA word: red is the least significant byte.
    pub fn from_rgba_u32(rgba: u32) -> Self {
        let [r, g, b, a] = rgba.to_le_bytes();
        Self::from_bytes(r, g, b, a)
    }

    pub fn black() -> Self {
        Self::rgb_bytes(0, 0, 0)
    }
    pub fn white() -> Self {
        Self::rgb_bytes(255, 255, 255)
    }
    pub fn gray() -> Self {
        Self::rgb_bytes(64, 64, 64)
    }
    pub fn red() -> Self {
        Self::rgb_bytes(255, 0, 0)
    }
    pub fn green() -> Self {
        Self::rgb_bytes(0, 255, 0)
    }
    pub fn blue() -> Self {
        Self::rgb_bytes(0, 0, 255)
    }
    pub fn yellow() -> Self {
        Self::rgb_bytes(255, 255, 0)
    }
    pub fn cyan() -> Self {
        Self::rgb_bytes(0, 255, 255)
    }
    pub fn magenta() -> Self {
        Self::rgb_bytes(255, 0, 255)
    }

    #[must_use]
    pub fn with_alpha(mut self, a: u8) -> Self {
        self.a = a;
        self
    }

    pub fn as_rgba_u32(&self) -> u32 {
        u32::from_le_bytes(self.as_bytes())
    }
    /// As [`as_rgba_u32`](Self::as_rgba_u32), with the alpha byte cleared.
    pub fn rgb_u32(&self) -> u32 {
        self.as_rgba_u32() & 0x00ff_ffff
    }

    pub fn as_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
    /// Each channel as a proportion in `[0, 1]`.
    pub fn as_f32(&self) -> [f32; 4] {
        self.as_bytes().map(|c| f32::from(c) / 255.0)
    }
}

/// Channels in RGBA order. Out-of-range indices resolve to red.
impl Index<usize> for Colour {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            1 => &self.g,
            2 => &self.b,
            3 => &self.a,
            _ => &self.r,
        }
    }
}

impl IndexMut<usize> for Colour {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            1 => &mut self.g,
            2 => &mut self.b,
            3 => &mut self.a,
            _ => &mut self.r,
        }
    }
}

impl From<Colour> for [f32; 4] {
    fn from(value: Colour) -> Self {
        value.as_f32()
    }
}

impl From<&Colour> for [f32; 4] {
    fn from(value: &Colour) -> Self {
        (*value).into()
    }
}

impl From<Colour> for Vec4 {
    fn from(value: Colour) -> Self {
        Vec4::from(value.as_f32())
    }
}

impl From<Colour> for Vec3 {
    fn from(value: Colour) -> Self {
        Vec4::from(value).truncate()
    }
}

impl From<Colour> for Vec4u {
    fn from(value: Colour) -> Self {
        Vec4u::from(value.as_bytes().map(u32::from))
    }
}

impl From<Colour> for Vec3u {
    fn from(value: Colour) -> Self {
        Vec4u::from(value).truncate()
    }
}

impl From<Vec4> for Colour {
    fn from(value: Vec4) -> Self {
        Self::from_f32(value.x, value.y, value.z, value.w)
    }
}

/// Opaque.
impl From<Vec3> for Colour {
    fn from(value: Vec3) -> Self {
        Self::from_f32(value.x, value.y, value.z, 1.0)
    }
}

impl From<Vec4u> for Colour {
    fn from(value: Vec4u) -> Self {
        Self::from_ints_clamp(value.x, value.y, value.z, value.w)
    }
}

/// Opaque.
impl From<Vec3u> for Colour {
    fn from(value: Vec3u) -> Self {
        Self::from_ints_clamp(value.x, value.y, value.z, 255)
    }
}

impl Add for Colour {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            r: self.r.wrapping_add(rhs.r),
            g: self.g.wrapping_add(rhs.g),
            b: self.b.wrapping_add(rhs.b),
            a: self.a.wrapping_add(rhs.a),
        }
    }
}

impl AddAssign for Colour {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Colour {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            r: self.r.wrapping_sub(rhs.r),
            g: self.g.wrapping_sub(rhs.g),
            b: self.b.wrapping_sub(rhs.b),
            a: self.a.wrapping_sub(rhs.a),
        }
    }
}

impl SubAssign for Colour {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

/// Scales every channel, alpha included. Results wrap modulo 256; negative results become 0.
impl Mul<f32> for Colour {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            r: wrap_channel(f32::from(self.r) * rhs),
            g: wrap_channel(f32::from(self.g) * rhs),
            b: wrap_channel(f32::from(self.b) * rhs),
            a: wrap_channel(f32::from(self.a) * rhs),
        }
    }
}

impl MulAssign<f32> for Colour {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div<f32> for Colour {
    type Output = Self;

    fn div(self, rhs: f32) -> Self::Output {
        Self {
            r: wrap_channel(f32::from(self.r) / rhs),
            g: wrap_channel(f32::from(self.g) / rhs),
            b: wrap_channel(f32::from(self.b) / rhs),
            a: wrap_channel(f32::from(self.a) / rhs),
        }
    }
}

impl DivAssign<f32> for Colour {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}
