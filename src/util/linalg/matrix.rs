#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::gg_float;
use crate::util::linalg::{LinalgError, Vec3, Vec4};
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign},
};

/// Three axes and an origin describing a coordinate frame, as consumed by
/// [`Mat4x4::change_of_basis`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basis {
    pub x: Vec3,
    pub y: Vec3,
    pub z: Vec3,
    pub origin: Vec3,
}

impl Basis {
    pub fn new(x: Vec3, y: Vec3, z: Vec3, origin: Vec3) -> Self {
        Self { x, y, z, origin }
    }

    /// The world frame: unit axes at the origin.
    pub fn standard() -> Self {
        Self::new(Vec3::unit_x(), Vec3::unit_y(), Vec3::unit_z(), Vec3::zero())
    }

    /// The standard axes moved to `origin`.
    pub fn at(origin: Vec3) -> Self {
        Self { origin, ..Self::standard() }
    }
}

impl Default for Basis {
    fn default() -> Self {
        Self::standard()
    }
}

/// A row-major 4x4 matrix for 3D transformations.
///
/// Element `(i, j)` is row `i`, column `j`:
/// ```text
/// | m00 m01 m02 m03 |
/// | m10 m11 m12 m13 |
/// | m20 m21 m22 m23 |
/// | m30 m31 m32 m33 |
/// ```
/// Points are row vectors, transformed as `[x, y, z, 1] * M`. The translation of an affine
/// transform is therefore `(m30, m31, m32)` and `A * B` applies `A` first, then `B`.
///
/// Rows, columns and individual elements are read and written through accessors over one
/// backing array of 16 floats. Out-of-range row, column or element indices resolve to 0.
///
/// The default matrix is the identity.
#[derive(Copy, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
#[must_use]
pub struct Mat4x4 {
    values: [f32; 16],
}

fn clamp_index(i: usize) -> usize {
    if i < 4 { i } else { 0 }
}

fn flat_index(row: usize, col: usize) -> usize {
    clamp_index(row) * 4 + clamp_index(col)
}

impl Mat4x4 {
    /// Creates an identity matrix.
    pub fn one() -> Mat4x4 {
        Mat4x4::from_values([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Alias of [`one`](Self::one).
    pub fn identity() -> Mat4x4 {
        Self::one()
    }

    /// Creates a matrix with all elements set to 0.
    pub fn zero() -> Mat4x4 {
        Mat4x4 { values: [0.0; 16] }
    }

    /// Creates a matrix from 16 values in row-major order.
    pub fn from_values(values: [f32; 16]) -> Mat4x4 {
        Mat4x4 { values }
    }

    pub fn from_rows(row0: Vec4, row1: Vec4, row2: Vec4, row3: Vec4) -> Mat4x4 {
        let mut rv = Mat4x4::zero();
        rv.set_row(0, row0)
            .set_row(1, row1)
            .set_row(2, row2)
            .set_row(3, row3);
        rv
    }

    /// Places the three vectors in rows 0-2 of the upper-left 3x3 block. The last column and
    /// row are those of the identity, so there is no translation.
    pub fn from_basis(v0: Vec3, v1: Vec3, v2: Vec3) -> Mat4x4 {
        Mat4x4::from_rows(
            v0.extend(0.0),
            v1.extend(0.0),
            v2.extend(0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    /// The 16 elements in row-major order.
    pub fn values(&self) -> &[f32; 16] {
        &self.values
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.values[flat_index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) -> &mut Self {
        self.values[flat_index(row, col)] = value;
        self
    }

    pub fn row(&self, index: usize) -> Vec4 {
        let i = clamp_index(index) * 4;
        Vec4::new(self.values[i], self.values[i + 1], self.values[i + 2], self.values[i + 3])
    }

    pub fn set_row(&mut self, index: usize, row: Vec4) -> &mut Self {
        let i = clamp_index(index) * 4;
        self.values[i..i + 4].copy_from_slice(&row.to_array());
        self
    }

    pub fn column(&self, index: usize) -> Vec4 {
        let j = clamp_index(index);
        Vec4::new(self.values[j], self.values[4 + j], self.values[8 + j], self.values[12 + j])
    }

    /// Writes exactly one column.
    pub fn set_column(&mut self, index: usize, column: Vec4) -> &mut Self {
        let j = clamp_index(index);
        for (i, value) in column.to_array().into_iter().enumerate() {
            self.values[i * 4 + j] = value;
        }
        self
    }

    /// Row 0 as a 3D vector; the local x-axis of an affine transform.
    pub fn right_vector(&self) -> Vec3 {
        self.row(0).truncate()
    }
    /// Row 1 as a 3D vector; the local y-axis of an affine transform.
    pub fn top_vector(&self) -> Vec3 {
        self.row(1).truncate()
    }
    /// Row 2 as a 3D vector; the local z-axis of an affine transform.
    pub fn front_vector(&self) -> Vec3 {
        self.row(2).truncate()
    }

    pub fn set_identity(&mut self) -> &mut Self {
        *self = Self::one();
        self
    }

    /// Swaps element `(i, j)` with element `(j, i)`.
    pub fn transposed(&self) -> Mat4x4 {
        let mut rv = Mat4x4::zero();
        for i in 0..4 {
            rv.set_row(i, self.column(i));
        }
        rv
    }

    // Cofactor expansion over pairs of 2x2 sub-determinants of the transposed matrix. Returns
    // the adjugate in row-major order, along with the determinant.
    fn adjugate(&self) -> ([f32; 16], f32) {
        let src = self.transposed().values;
        let mut adj = [0.0; 16];

        let mut tmp = [
            src[10] * src[15],
            src[11] * src[14],
            src[9] * src[15],
            src[11] * src[13],
            src[9] * src[14],
            src[10] * src[13],
            src[8] * src[15],
            src[11] * src[12],
            src[8] * src[14],
            src[10] * src[12],
            src[8] * src[13],
            src[9] * src[12],
        ];

        adj[0] = tmp[0] * src[5] + tmp[3] * src[6] + tmp[4] * src[7];
        adj[0] -= tmp[1] * src[5] + tmp[2] * src[6] + tmp[5] * src[7];
        adj[1] = tmp[1] * src[4] + tmp[6] * src[6] + tmp[9] * src[7];
        adj[1] -= tmp[0] * src[4] + tmp[7] * src[6] + tmp[8] * src[7];
        adj[2] = tmp[2] * src[4] + tmp[7] * src[5] + tmp[10] * src[7];
        adj[2] -= tmp[3] * src[4] + tmp[6] * src[5] + tmp[11] * src[7];
        adj[3] = tmp[5] * src[4] + tmp[8] * src[5] + tmp[11] * src[6];
        adj[3] -= tmp[4] * src[4] + tmp[9] * src[5] + tmp[10] * src[6];
        adj[4] = tmp[1] * src[1] + tmp[2] * src[2] + tmp[5] * src[3];
        adj[4] -= tmp[0] * src[1] + tmp[3] * src[2] + tmp[4] * src[3];
        adj[5] = tmp[0] * src[0] + tmp[7] * src[2] + tmp[8] * src[3];
        adj[5] -= tmp[1] * src[0] + tmp[6] * src[2] + tmp[9] * src[3];
        adj[6] = tmp[3] * src[0] + tmp[6] * src[1] + tmp[11] * src[3];
        adj[6] -= tmp[2] * src[0] + tmp[7] * src[1] + tmp[10] * src[3];
        adj[7] = tmp[4] * src[0] + tmp[9] * src[1] + tmp[10] * src[2];
        adj[7] -= tmp[5] * src[0] + tmp[8] * src[1] + tmp[11] * src[2];

        tmp = [
            src[2] * src[7],
            src[3] * src[6],
            src[1] * src[7],
            src[3] * src[5],
            src[1] * src[6],
            src[2] * src[5],
            src[0] * src[7],
            src[3] * src[4],
            src[0] * src[6],
            src[2] * src[4],
            src[0] * src[5],
            src[1] * src[4],
        ];

        adj[8] = tmp[0] * src[13] + tmp[3] * src[14] + tmp[4] * src[15];
        adj[8] -= tmp[1] * src[13] + tmp[2] * src[14] + tmp[5] * src[15];
        adj[9] = tmp[1] * src[12] + tmp[6] * src[14] + tmp[9] * src[15];
        adj[9] -= tmp[0] * src[12] + tmp[7] * src[14] + tmp[8] * src[15];
        adj[10] = tmp[2] * src[12] + tmp[7] * src[13] + tmp[10] * src[15];
        adj[10] -= tmp[3] * src[12] + tmp[6] * src[13] + tmp[11] * src[15];
        adj[11] = tmp[5] * src[12] + tmp[8] * src[13] + tmp[11] * src[14];
        adj[11] -= tmp[4] * src[12] + tmp[9] * src[13] + tmp[10] * src[14];
        adj[12] = tmp[2] * src[10] + tmp[5] * src[11] + tmp[1] * src[9];
        adj[12] -= tmp[4] * src[11] + tmp[0] * src[9] + tmp[3] * src[10];
        adj[13] = tmp[8] * src[11] + tmp[0] * src[8] + tmp[7] * src[10];
        adj[13] -= tmp[6] * src[10] + tmp[9] * src[11] + tmp[1] * src[8];
        adj[14] = tmp[6] * src[9] + tmp[11] * src[11] + tmp[3] * src[8];
        adj[14] -= tmp[10] * src[11] + tmp[2] * src[8] + tmp[7] * src[9];
        adj[15] = tmp[10] * src[10] + tmp[4] * src[8] + tmp[9] * src[9];
        adj[15] -= tmp[8] * src[9] + tmp[11] * src[10] + tmp[5] * src[8];

        let det = src[0] * adj[0] + src[1] * adj[1] + src[2] * adj[2] + src[3] * adj[3];
        (adj, det)
    }

    pub fn determinant(&self) -> f32 {
        self.adjugate().1
    }

    /// Calculates the inverse via the adjugate.
    ///
    /// Fails with [`LinalgError::Singular`] when the determinant is zero, subnormal or not
    /// finite, since `1 / det` would then not yield a usable matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use cubes::core::prelude::*;
    ///
    /// let m = Mat4x4::translation(Vec3::new(1.0, 2.0, 3.0));
    /// let inv = m.inverse().unwrap();
    /// assert!((m * inv).almost_eq(Mat4x4::one()));
    ///
    /// assert!(Mat4x4::zero().inverse().is_err());
    /// ```
    pub fn inverse(&self) -> Result<Mat4x4, LinalgError> {
        let (adj, det) = self.adjugate();
        if !det.is_normal() {
            warn!("cannot invert singular matrix (determinant {det}):\n{self}");
            return Err(LinalgError::Singular { det });
        }
        let inv_det = 1.0 / det;
        Ok(Mat4x4::from_values(adj.map(|x| x * inv_det)))
    }

    /// Applies the full transform to `point` as `[x, y, z, 1]`, dividing by the resulting `w`.
    ///
    /// Returns the zero vector when `w` is zero, i.e. for points on the projection plane of a
    /// perspective matrix.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        let v = point.extend(1.0) * *self;
        if v.w.is_zero() {
            return Vec3::zero();
        }
        v.truncate() / v.w
    }

    /// Applies only the upper-left 3x3 block, with no translation or perspective divide. Only
    /// correct for matrices without non-uniform scale.
    pub fn transform_normal(&self, normal: Vec3) -> Vec3 {
        (normal.extend(0.0) * *self).truncate()
    }

    /// Compares two matrices for approximate equality, elementwise within
    /// [`EPSILON`](crate::core::config::EPSILON).
    pub fn almost_eq(&self, rhs: Mat4x4) -> bool {
        self.values
            .iter()
            .zip(rhs.values.iter())
            .all(|(a, b)| (a - b).abs() < EPSILON)
    }

    /// Mean absolute difference over all 16 elements. Compare the result against
    /// [`MATRIX_COMPARE_TOLERANCE`](crate::core::config::MATRIX_COMPARE_TOLERANCE) for a
    /// tolerance suited to accumulated rounding, e.g. after a double inversion.
    pub fn compare_matrices(left: &Mat4x4, right: &Mat4x4) -> f32 {
        let sum: f32 = left
            .values
            .iter()
            .zip(right.values.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        sum / 16.0
    }

    /// Creates a scaling matrix:
    /// ```text
    /// | sx 0  0  0 |
    /// | 0  sy 0  0 |
    /// | 0  0  sz 0 |
    /// | 0  0  0  1 |
    /// ```
    pub fn scaling(factors: Vec3) -> Mat4x4 {
        let mut rv = Mat4x4::one();
        rv.set(0, 0, factors.x)
            .set(1, 1, factors.y)
            .set(2, 2, factors.z);
        rv
    }

    pub fn uniform_scaling(factor: f32) -> Mat4x4 {
        Self::scaling(Vec3::splat(factor))
    }

    /// Creates a translation matrix; the offset occupies row 3:
    /// ```text
    /// | 1  0  0  0 |
    /// | 0  1  0  0 |
    /// | 0  0  1  0 |
    /// | dx dy dz 1 |
    /// ```
    pub fn translation(by: Vec3) -> Mat4x4 {
        let mut rv = Mat4x4::one();
        rv.set_row(3, by.extend(1.0));
        rv
    }

    /// Creates a right-handed rotation by `radians` about `axis`, which need not be normalised.
    ///
    /// A zero-length axis has no direction to rotate about, so this returns the identity.
    pub fn rotation(axis: Vec3, radians: f32) -> Mat4x4 {
        let Ok(axis) = axis.try_normed() else {
            warn!("rotation about zero-length axis, using identity");
            return Mat4x4::one();
        };
        let Vec3 { x, y, z } = axis;
        let (s, c) = radians.sin_cos();
        let t = 1.0 - c;

        Mat4x4::from_values([
            1.0 + t * (x * x - 1.0),
            z * s + t * x * y,
            -y * s + t * x * z,
            0.0,
            -z * s + t * x * y,
            1.0 + t * (y * y - 1.0),
            x * s + t * y * z,
            0.0,
            y * s + t * x * z,
            -x * s + t * y * z,
            1.0 + t * (z * z - 1.0),
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// Rotation about an axis through `centre` instead of through the origin.
    pub fn rotation_about(axis: Vec3, radians: f32, centre: Vec3) -> Mat4x4 {
        Self::translation(-centre) * Self::rotation(axis, radians) * Self::translation(centre)
    }

    /// Applies roll (about z), then pitch (about x), then yaw (about y).
    pub fn rotation_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Mat4x4 {
        Self::rotation_y(yaw) * Self::rotation_x(pitch) * Self::rotation_z(roll)
    }

    /// Rotation taking the standard axes onto the given basis vectors, which are normalised and
    /// placed in rows 0-2.
    pub fn rotation_basis(b1: Vec3, b2: Vec3, b3: Vec3) -> Mat4x4 {
        Self::from_basis(b1.normed(), b2.normed(), b3.normed())
    }

    /// Right-handed rotation about the x-axis: takes +y towards +z.
    pub fn rotation_x(radians: f32) -> Mat4x4 {
        let (s, c) = radians.sin_cos();
        let mut rv = Mat4x4::one();
        rv.set(1, 1, c).set(1, 2, s).set(2, 1, -s).set(2, 2, c);
        rv
    }

    /// Right-handed rotation about the y-axis: takes +z towards +x.
    pub fn rotation_y(radians: f32) -> Mat4x4 {
        let (s, c) = radians.sin_cos();
        let mut rv = Mat4x4::one();
        rv.set(0, 0, c).set(0, 2, -s).set(2, 0, s).set(2, 2, c);
        rv
    }

    /// Right-handed rotation about the z-axis: takes +x towards +y.
    ///
    /// # Examples
    ///
    /// ```
    /// use cubes::core::prelude::*;
    ///
    /// let rot = Mat4x4::rotation_z(std::f32::consts::FRAC_PI_2);
    /// let p = rot.transform_point(Vec3::unit_x());
    /// assert!(p.almost_eq(Vec3::unit_y()));
    /// ```
    pub fn rotation_z(radians: f32) -> Mat4x4 {
        let (s, c) = radians.sin_cos();
        let mut rv = Mat4x4::one();
        rv.set(0, 0, c).set(0, 1, s).set(1, 0, -s).set(1, 1, c);
        rv
    }

    // Shared layout of `camera` and `look_at`: the axes go in columns 0-2, and row 3 holds the
    // eye position projected onto each axis, negated.
    fn view(eye: Vec3, x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Mat4x4 {
        let mut rv = Mat4x4::one();
        rv.set_column(0, x_axis.extend(-x_axis.dot(eye)))
            .set_column(1, y_axis.extend(-y_axis.dot(eye)))
            .set_column(2, z_axis.extend(-z_axis.dot(eye)));
        rv
    }

    /// View matrix for a camera at `eye` with the given axes, which are normalised but
    /// otherwise assumed orthogonal.
    pub fn camera(eye: Vec3, look: Vec3, up: Vec3, right: Vec3) -> Mat4x4 {
        Self::view(eye, right.normed(), up.normed(), look.normed())
    }

    /// View matrix for a camera at `eye` looking towards `at`. Camera space is right-handed
    /// with the camera looking down its -z axis.
    pub fn look_at(eye: Vec3, at: Vec3, up: Vec3) -> Mat4x4 {
        let z_axis = (eye - at).normed();
        let x_axis = up.cross(z_axis).normed();
        let y_axis = z_axis.cross(x_axis).normed();
        Self::view(eye, x_axis, y_axis, z_axis)
    }

    /// Orthographic projection of a `width` x `height` view volume centred on the -z axis. Depth
    /// maps `-near` to 0 and `-far` to 1.
    pub fn orthogonal(width: f32, height: f32, near: f32, far: f32) -> Mat4x4 {
        let mut rv = Mat4x4::zero();
        rv.set(0, 0, 2.0 / width)
            .set(1, 1, 2.0 / height)
            .set(2, 2, 1.0 / (near - far))
            .set(3, 2, near / (near - far))
            .set(3, 3, 1.0);
        rv
    }

    // Shared by the perspective projections: `w' = -z`, depth maps `-near` to 0 and `-far`
    // to 1.
    fn projection(x_scale: f32, y_scale: f32, near: f32, far: f32) -> Mat4x4 {
        let mut rv = Mat4x4::zero();
        rv.set(0, 0, x_scale)
            .set(1, 1, y_scale)
            .set(2, 2, far / (near - far))
            .set(3, 2, far * near / (near - far))
            .set(2, 3, -1.0);
        rv
    }

    /// Perspective projection whose near plane spans `width` x `height`.
    pub fn perspective(width: f32, height: f32, near: f32, far: f32) -> Mat4x4 {
        Self::projection(2.0 * near / width, 2.0 * near / height, near, far)
    }

    /// Perspective projection from a horizontal field of view in radians and an aspect ratio
    /// of width over height.
    pub fn perspective_fov(fov: f32, aspect: f32, near: f32, far: f32) -> Mat4x4 {
        let cot = 1.0 / (fov / 2.0).tan();
        Self::projection(cot, aspect * cot, near, far)
    }

    /// Perspective projection from separate horizontal and vertical fields of view in radians.
    pub fn perspective_multi_fov(fov_x: f32, fov_y: f32, near: f32, far: f32) -> Mat4x4 {
        Self::projection(1.0 / (fov_x / 2.0).tan(), 1.0 / (fov_y / 2.0).tan(), near, far)
    }

    /// Maps normalised device coordinates onto a `width` x `height` screen with the origin at
    /// the top left and y pointing down.
    pub fn viewport(width: f32, height: f32) -> Mat4x4 {
        Self::scaling(Vec3::new(width * 0.5, -height * 0.5, 1.0))
            * Self::translation(Vec3::new(width * 0.5, height * 0.5, 0.0))
    }

    /// Re-expresses coordinates given relative to `source` as coordinates relative to `target`.
    ///
    /// Fails if the axes of `source` are linearly dependent.
    pub fn change_of_basis(source: &Basis, target: &Basis) -> Result<Mat4x4, LinalgError> {
        let rotation = Self::from_basis(source.x, source.y, source.z).inverse()?
            * Self::from_basis(target.x, target.y, target.z);
        Ok(Self::translation(-source.origin) * rotation * Self::translation(target.origin))
    }

    // Transforms applied after the existing ones, i.e. in world space: `self * op`.

    pub fn scale(&self, factors: Vec3) -> Mat4x4 {
        *self * Self::scaling(factors)
    }
    pub fn translate(&self, by: Vec3) -> Mat4x4 {
        *self * Self::translation(by)
    }
    pub fn rotate(&self, axis: Vec3, radians: f32) -> Mat4x4 {
        *self * Self::rotation(axis, radians)
    }
    pub fn rotate_about(&self, axis: Vec3, radians: f32, centre: Vec3) -> Mat4x4 {
        *self * Self::rotation_about(axis, radians, centre)
    }
    pub fn rotate_yaw_pitch_roll(&self, yaw: f32, pitch: f32, roll: f32) -> Mat4x4 {
        *self * Self::rotation_yaw_pitch_roll(yaw, pitch, roll)
    }
    pub fn rotate_basis(&self, b1: Vec3, b2: Vec3, b3: Vec3) -> Mat4x4 {
        *self * Self::rotation_basis(b1, b2, b3)
    }
    pub fn rotate_x(&self, radians: f32) -> Mat4x4 {
        *self * Self::rotation_x(radians)
    }
    pub fn rotate_y(&self, radians: f32) -> Mat4x4 {
        *self * Self::rotation_y(radians)
    }
    pub fn rotate_z(&self, radians: f32) -> Mat4x4 {
        *self * Self::rotation_z(radians)
    }

    // Transforms applied before the existing ones, i.e. in object space: `op * self`.

    pub fn local_scale(&self, factors: Vec3) -> Mat4x4 {
        Self::scaling(factors) * *self
    }
    pub fn local_translate(&self, by: Vec3) -> Mat4x4 {
        Self::translation(by) * *self
    }
    pub fn local_rotate(&self, axis: Vec3, radians: f32) -> Mat4x4 {
        Self::rotation(axis, radians) * *self
    }
    pub fn local_rotate_about(&self, axis: Vec3, radians: f32, centre: Vec3) -> Mat4x4 {
        Self::rotation_about(axis, radians, centre) * *self
    }
    pub fn local_rotate_yaw_pitch_roll(&self, yaw: f32, pitch: f32, roll: f32) -> Mat4x4 {
        Self::rotation_yaw_pitch_roll(yaw, pitch, roll) * *self
    }
    pub fn local_rotate_basis(&self, b1: Vec3, b2: Vec3, b3: Vec3) -> Mat4x4 {
        Self::rotation_basis(b1, b2, b3) * *self
    }
    pub fn local_rotate_x(&self, radians: f32) -> Mat4x4 {
        Self::rotation_x(radians) * *self
    }
    pub fn local_rotate_y(&self, radians: f32) -> Mat4x4 {
        Self::rotation_y(radians) * *self
    }
    pub fn local_rotate_z(&self, radians: f32) -> Mat4x4 {
        Self::rotation_z(radians) * *self
    }
}

impl Default for Mat4x4 {
    fn default() -> Self {
        Self::one()
    }
}

impl From<[[f32; 4]; 4]> for Mat4x4 {
    fn from(rows: [[f32; 4]; 4]) -> Self {
        let mut rv = Mat4x4::zero();
        for (i, row) in rows.into_iter().enumerate() {
            rv.set_row(i, Vec4::from(row));
        }
        rv
    }
}

impl One for Mat4x4 {
    fn one() -> Self {
        Self::one()
    }
}

impl Zero for Mat4x4 {
    fn zero() -> Self {
        Self::zero()
    }

    fn is_zero(&self) -> bool {
        self.values.iter().all(Zero::is_zero)
    }
}

/// Element access by `(row, column)`.
impl Index<(usize, usize)> for Mat4x4 {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.values[flat_index(row, col)]
    }
}

impl IndexMut<(usize, usize)> for Mat4x4 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.values[flat_index(row, col)]
    }
}

impl fmt::Debug for Mat4x4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values.chunks(4)).finish()
    }
}

impl fmt::Display for Mat4x4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(3);
        for (i, row) in self.values.chunks(4).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let row = row
                .iter()
                .map(|x| format!("{:>9.precision$}", gg_float::force_positive_zero(*x)))
                .join(" ");
            write!(f, "|{row} |")?;
        }
        Ok(())
    }
}

impl Add<Mat4x4> for Mat4x4 {
    type Output = Mat4x4;

    fn add(self, rhs: Mat4x4) -> Self::Output {
        let mut rv = self;
        rv += rhs;
        rv
    }
}

impl AddAssign<Mat4x4> for Mat4x4 {
    fn add_assign(&mut self, rhs: Mat4x4) {
        for (a, b) in self.values.iter_mut().zip(rhs.values) {
            *a += b;
        }
    }
}

impl Sub<Mat4x4> for Mat4x4 {
    type Output = Mat4x4;

    fn sub(self, rhs: Mat4x4) -> Self::Output {
        let mut rv = self;
        rv -= rhs;
        rv
    }
}

impl SubAssign<Mat4x4> for Mat4x4 {
    fn sub_assign(&mut self, rhs: Mat4x4) {
        for (a, b) in self.values.iter_mut().zip(rhs.values) {
            *a -= b;
        }
    }
}

impl Mul<f32> for Mat4x4 {
    type Output = Mat4x4;

    fn mul(self, rhs: f32) -> Self::Output {
        Mat4x4::from_values(self.values.map(|x| x * rhs))
    }
}

impl Mul<Mat4x4> for f32 {
    type Output = Mat4x4;

    fn mul(self, rhs: Mat4x4) -> Self::Output {
        rhs * self
    }
}

impl MulAssign<f32> for Mat4x4 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

/// Matrix product: `(A * B)(i, j) = Σ_k A(i, k) * B(k, j)`.
impl Mul<Mat4x4> for Mat4x4 {
    type Output = Mat4x4;

    fn mul(self, rhs: Mat4x4) -> Self::Output {
        let mut rv = Mat4x4::zero();
        for i in 0..4 {
            rv.set_row(i, self.row(i) * rhs);
        }
        rv
    }
}

/// Matrix product, as for `*`.
impl MulAssign<Mat4x4> for Mat4x4 {
    fn mul_assign(&mut self, rhs: Mat4x4) {
        *self = *self * rhs;
    }
}

/// Row vector times matrix.
impl Mul<Mat4x4> for Vec4 {
    type Output = Vec4;

    fn mul(self, rhs: Mat4x4) -> Self::Output {
        Vec4::new(
            self.dot(rhs.column(0)),
            self.dot(rhs.column(1)),
            self.dot(rhs.column(2)),
            self.dot(rhs.column(3)),
        )
    }
}

impl MulAssign<Mat4x4> for Vec4 {
    fn mul_assign(&mut self, rhs: Mat4x4) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn random_vec3(rng: &mut StdRng, range: f32) -> Vec3 {
        Vec3::new(
            rng.gen_range(-range..range),
            rng.gen_range(-range..range),
            rng.gen_range(-range..range),
        )
    }

    fn random_matrix(rng: &mut StdRng) -> Mat4x4 {
        Mat4x4::from_values(std::array::from_fn(|_| rng.gen_range(-10.0..10.0)))
    }

    // Well-conditioned: scale factors bounded away from zero.
    fn random_affine(rng: &mut StdRng) -> Mat4x4 {
        let mut axis = random_vec3(rng, 1.0);
        if axis.len() < 0.1 {
            axis = Vec3::unit_y();
        }
        let scale = Vec3::new(
            rng.gen_range(0.5..2.0),
            rng.gen_range(0.5..2.0),
            rng.gen_range(0.5..2.0),
        );
        Mat4x4::scaling(scale)
            .rotate(axis, rng.gen_range(-PI..PI))
            .translate(random_vec3(rng, 5.0))
    }

    fn assert_vec3_near(actual: Vec3, expected: Vec3) {
        assert!(
            actual.dist(expected) < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    // ==================== Construction and access ====================

    #[test]
    fn mat4x4_default_is_identity() {
        assert_eq!(Mat4x4::default(), Mat4x4::one());
        assert_eq!(Mat4x4::identity(), Mat4x4::one());
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(Mat4x4::one()[(i, j)], if i == j { 1.0 } else { 0.0 });
            }
        }
        let mut m = Mat4x4::uniform_scaling(3.0);
        m.set_identity();
        assert_eq!(m, Mat4x4::one());
    }

    #[test]
    fn mat4x4_rows_and_columns() {
        let mut m = Mat4x4::from_values(std::array::from_fn(|i| i as f32));
        assert_eq!(m.row(1), Vec4::new(4.0, 5.0, 6.0, 7.0));
        assert_eq!(m.column(2), Vec4::new(2.0, 6.0, 10.0, 14.0));
        assert_eq!(m.get(3, 1), 13.0);
        assert_eq!(m[(2, 3)], 11.0);

        m.set_row(0, Vec4::new(-1.0, -2.0, -3.0, -4.0));
        assert_eq!(m.column(0).x, -1.0);
        assert_eq!(m.values()[3], -4.0);

        m.set_column(1, Vec4::splat(9.0));
        assert_eq!(m.row(2), Vec4::new(8.0, 9.0, 10.0, 11.0));
        // Only column 1 is written.
        assert_eq!(m.column(2), Vec4::new(-3.0, 6.0, 10.0, 14.0));
        assert_eq!(m.column(3), Vec4::new(-4.0, 7.0, 11.0, 15.0));

        m[(3, 3)] = 100.0;
        assert_eq!(m.row(3).w, 100.0);
        m.set(1, 0, 42.0);
        assert_eq!(m.get(1, 0), 42.0);
    }

    #[test]
    fn mat4x4_out_of_range_index_uses_zero() {
        let m = Mat4x4::from_values(std::array::from_fn(|i| i as f32));
        assert_eq!(m.row(4), m.row(0));
        assert_eq!(m.column(17), m.column(0));
        assert_eq!(m[(5, 2)], m[(0, 2)]);
        assert_eq!(m.get(1, 9), m.get(1, 0));
    }

    #[test]
    fn mat4x4_from_rows_and_basis() {
        let m = Mat4x4::from_rows(
            Vec4::new(1.0, 2.0, 3.0, 4.0),
            Vec4::new(5.0, 6.0, 7.0, 8.0),
            Vec4::new(9.0, 10.0, 11.0, 12.0),
            Vec4::new(13.0, 14.0, 15.0, 16.0),
        );
        assert_eq!(m, Mat4x4::from_values(std::array::from_fn(|i| (i + 1) as f32)));
        assert_eq!(
            Mat4x4::from([
                [1.0, 2.0, 3.0, 4.0],
                [5.0, 6.0, 7.0, 8.0],
                [9.0, 10.0, 11.0, 12.0],
                [13.0, 14.0, 15.0, 16.0],
            ]),
            m
        );

        let b = Mat4x4::from_basis(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
        );
        assert_eq!(b.right_vector(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.top_vector(), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(b.front_vector(), Vec3::new(7.0, 8.0, 9.0));
        assert_eq!(b.row(3), Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(b.column(3), Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    // ==================== Algebra ====================

    #[test]
    fn mat4x4_identity_is_neutral() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let m = random_matrix(&mut rng);
            assert_eq!(Mat4x4::one() * m, m);
            assert_eq!(m * Mat4x4::one(), m);
        }
    }

    #[test]
    fn mat4x4_transpose_twice_is_exact() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let m = random_matrix(&mut rng);
            assert_eq!(m.transposed().transposed(), m);
        }
        let m = Mat4x4::from_values(std::array::from_fn(|i| i as f32));
        assert_eq!(m.transposed().row(0), m.column(0));
        assert_eq!(m.transposed()[(1, 3)], m[(3, 1)]);
    }

    #[test]
    fn mat4x4_product() {
        let a = Mat4x4::from_values(std::array::from_fn(|i| i as f32));
        let b = Mat4x4::from_values(std::array::from_fn(|i| (16 - i) as f32));
        let ab = a * b;
        for i in 0..4 {
            for j in 0..4 {
                let expected: f32 = (0..4).map(|k| a[(i, k)] * b[(k, j)]).sum();
                assert_eq!(ab[(i, j)], expected);
            }
        }
        let mut c = a;
        c *= b;
        assert_eq!(c, ab);
    }

    #[test]
    fn mat4x4_elementwise_ops() {
        let a = Mat4x4::from_values(std::array::from_fn(|i| i as f32));
        let b = Mat4x4::one();
        let sum = a + b;
        assert_eq!(sum[(0, 0)], 1.0);
        assert_eq!(sum[(0, 1)], 1.0);
        assert_eq!(sum[(1, 1)], 6.0);
        assert_eq!(sum - b, a);
        assert_eq!((a * 2.0)[(3, 3)], 30.0);
        assert_eq!(2.0 * a, a * 2.0);

        let mut c = a;
        c += b;
        assert_eq!(c, sum);
        c -= b;
        assert_eq!(c, a);
        c *= 0.5;
        assert_eq!(c[(2, 0)], 4.0);
        assert!((a - a).is_zero());
    }

    #[test]
    fn mat4x4_row_vector_product() {
        let v = Vec4::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(v * Mat4x4::one(), v);
        let mut w = v;
        w *= Mat4x4::translation(Vec3::new(10.0, 20.0, 30.0));
        assert_eq!(w, Vec4::new(11.0, 22.0, 33.0, 1.0));
    }

    #[test]
    fn mat4x4_determinant() {
        assert_eq!(Mat4x4::one().determinant(), 1.0);
        assert_eq!(Mat4x4::zero().determinant(), 0.0);
        assert_eq!(Mat4x4::scaling(Vec3::new(2.0, 3.0, 4.0)).determinant(), 24.0);
        assert!((Mat4x4::rotation(Vec3::new(1.0, 2.0, 3.0), 0.7).determinant() - 1.0).abs() < 1e-5);
        assert_eq!(Mat4x4::translation(Vec3::new(5.0, -3.0, 2.0)).determinant(), 1.0);
    }

    #[test]
    fn mat4x4_inverse() {
        let m = Mat4x4::scaling(Vec3::new(2.0, 4.0, 8.0)).translate(Vec3::new(1.0, 2.0, 3.0));
        let inv = m.inverse().unwrap();
        assert!((m * inv).almost_eq(Mat4x4::one()));
        assert!((inv * m).almost_eq(Mat4x4::one()));
        assert!(inv.almost_eq(
            Mat4x4::translation(Vec3::new(-1.0, -2.0, -3.0))
                .scale(Vec3::new(0.5, 0.25, 0.125))
        ));
    }

    #[test]
    fn mat4x4_inverse_twice_is_close() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let m = random_affine(&mut rng);
            let back = m.inverse().unwrap().inverse().unwrap();
            assert!(
                Mat4x4::compare_matrices(&m, &back) < MATRIX_COMPARE_TOLERANCE,
                "\n{m}\n{back}"
            );
        }
    }

    #[test]
    fn mat4x4_singular_inverse_fails() {
        assert_eq!(Mat4x4::zero().inverse(), Err(LinalgError::Singular { det: 0.0 }));
        let flat = Mat4x4::scaling(Vec3::new(1.0, 1.0, 0.0));
        assert!(matches!(flat.inverse(), Err(LinalgError::Singular { .. })));
        let repeated_rows = Mat4x4::from_rows(Vec4::one(), Vec4::one(), Vec4::one(), Vec4::one());
        assert!(repeated_rows.inverse().is_err());
    }

    #[test]
    fn mat4x4_compare_matrices() {
        let a = Mat4x4::one();
        assert_eq!(Mat4x4::compare_matrices(&a, &a), 0.0);
        let mut b = a;
        b[(0, 0)] = 2.0;
        b[(3, 1)] = -1.0;
        assert_eq!(Mat4x4::compare_matrices(&a, &b), 2.0 / 16.0);
        assert_eq!(Mat4x4::compare_matrices(&b, &a), 2.0 / 16.0);
    }

    // ==================== Transforming points ====================

    #[test]
    fn mat4x4_translation_moves_origin() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            let p = random_vec3(&mut rng, 100.0);
            assert_eq!(Mat4x4::translation(p).transform_point(Vec3::zero()), p);
        }
    }

    #[test]
    fn mat4x4_scaling_point() {
        assert_eq!(
            Mat4x4::scaling(Vec3::splat(2.0)).transform_point(Vec3::unit_x()),
            Vec3::new(2.0, 0.0, 0.0)
        );
        assert_eq!(
            Mat4x4::uniform_scaling(-3.0).transform_point(Vec3::new(1.0, 2.0, 3.0)),
            Vec3::new(-3.0, -6.0, -9.0)
        );
    }

    #[test]
    fn mat4x4_transform_point_zero_w() {
        let m = Mat4x4::perspective(2.0, 2.0, 1.0, 100.0);
        // Points on the camera plane have w == 0.
        assert_eq!(m.transform_point(Vec3::new(1.0, 1.0, 0.0)), Vec3::zero());
        assert_eq!(Mat4x4::zero().transform_point(Vec3::one()), Vec3::zero());
    }

    #[test]
    fn mat4x4_transform_normal_ignores_translation() {
        let m = Mat4x4::rotation_z(FRAC_PI_2).translate(Vec3::new(5.0, 5.0, 5.0));
        assert_vec3_near(m.transform_normal(Vec3::unit_x()), Vec3::unit_y());
        assert_vec3_near(m.transform_point(Vec3::unit_x()), Vec3::new(5.0, 6.0, 5.0));
    }

    #[test]
    fn mat4x4_rotation_handedness() {
        let quarter = FRAC_PI_2;
        let z = Mat4x4::rotation_z(quarter);
        let x = Mat4x4::rotation_x(quarter);
        let y = Mat4x4::rotation_y(quarter);
        assert_vec3_near(z.transform_point(Vec3::unit_x()), Vec3::unit_y());
        assert_vec3_near(x.transform_point(Vec3::unit_y()), Vec3::unit_z());
        assert_vec3_near(y.transform_point(Vec3::unit_z()), Vec3::unit_x());
    }

    #[test]
    fn mat4x4_axis_rotation_matches_principal_axes() {
        for angle in [0.3, -1.2, FRAC_PI_4, 2.5] {
            assert!(Mat4x4::rotation(Vec3::unit_x(), angle).almost_eq(Mat4x4::rotation_x(angle)));
            assert!(Mat4x4::rotation(Vec3::unit_y(), angle).almost_eq(Mat4x4::rotation_y(angle)));
            assert!(Mat4x4::rotation(Vec3::unit_z(), angle).almost_eq(Mat4x4::rotation_z(angle)));
            // The axis is normalised first.
            assert!(Mat4x4::rotation(Vec3::new(0.0, 0.0, 7.0), angle)
                .almost_eq(Mat4x4::rotation_z(angle)));
        }
    }

    #[test]
    fn mat4x4_rotation_preserves_axis_and_length() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let axis = random_vec3(&mut rng, 1.0);
            if axis.len() < 0.1 {
                continue;
            }
            let m = Mat4x4::rotation(axis, rng.gen_range(-PI..PI));
            assert_vec3_near(m.transform_point(axis), axis);
            let p = random_vec3(&mut rng, 5.0);
            assert!((m.transform_point(p).len() - p.len()).abs() < 1e-4);
        }
    }

    #[test]
    fn mat4x4_rotation_zero_axis_is_identity() {
        assert_eq!(Mat4x4::rotation(Vec3::zero(), 1.0), Mat4x4::one());
    }

    #[test]
    fn mat4x4_rotation_about_centre() {
        let centre = Vec3::new(1.0, 1.0, 0.0);
        let m = Mat4x4::rotation_about(Vec3::unit_z(), FRAC_PI_2, centre);
        assert_vec3_near(m.transform_point(centre), centre);
        assert_vec3_near(m.transform_point(Vec3::new(2.0, 1.0, 0.0)), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn mat4x4_yaw_pitch_roll_order() {
        let (yaw, pitch, roll) = (0.4, -0.9, 1.3);
        let m = Mat4x4::rotation_yaw_pitch_roll(yaw, pitch, roll);
        let expected =
            Mat4x4::rotation_y(yaw) * Mat4x4::rotation_x(pitch) * Mat4x4::rotation_z(roll);
        assert_eq!(m, expected);
        let yaw_only = Mat4x4::rotation_yaw_pitch_roll(yaw, 0.0, 0.0);
        let pitch_only = Mat4x4::rotation_yaw_pitch_roll(0.0, pitch, 0.0);
        let roll_only = Mat4x4::rotation_yaw_pitch_roll(0.0, 0.0, roll);
        assert!(yaw_only.almost_eq(Mat4x4::rotation_y(yaw)));
        assert!(pitch_only.almost_eq(Mat4x4::rotation_x(pitch)));
        assert!(roll_only.almost_eq(Mat4x4::rotation_z(roll)));
    }

    #[test]
    fn mat4x4_rotation_basis() {
        let m = Mat4x4::rotation_basis(
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(-3.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.5),
        );
        assert_eq!(m.right_vector(), Vec3::unit_y());
        assert_eq!(m.top_vector(), -Vec3::unit_x());
        assert_eq!(m.front_vector(), Vec3::unit_z());
        assert!(m.almost_eq(Mat4x4::rotation_z(FRAC_PI_2)));
        assert_vec3_near(m.transform_point(Vec3::unit_x()), Vec3::unit_y());
    }

    // ==================== Chained transforms ====================

    #[test]
    fn mat4x4_composition_order() {
        let a = FRAC_PI_2;
        let b = Vec3::new(0.0, 3.0, 0.0);
        let p = Vec3::new(0.0, 1.0, 0.0);

        let rotate_then_translate = Mat4x4::rotation_x(a) * Mat4x4::translation(b);
        let translate_then_rotate = Mat4x4::translation(b) * Mat4x4::rotation_x(a);
        assert_vec3_near(rotate_then_translate.transform_point(p), Vec3::new(0.0, 3.0, 1.0));
        assert_vec3_near(translate_then_rotate.transform_point(p), Vec3::new(0.0, 0.0, 4.0));
        assert!(!rotate_then_translate.almost_eq(translate_then_rotate));

        // rotate_* applies after the existing transform; local_rotate_* before it.
        let base = Mat4x4::translation(b);
        assert_eq!(base.rotate_x(a), translate_then_rotate);
        assert_eq!(base.local_rotate_x(a), rotate_then_translate);
    }

    #[test]
    fn mat4x4_chained_world_and_local() {
        let base = Mat4x4::rotation_z(0.3).translate(Vec3::new(1.0, 2.0, 3.0));
        let axis = Vec3::new(1.0, 1.0, 0.0);
        let centre = Vec3::new(0.0, 1.0, 2.0);
        let factors = Vec3::new(2.0, 3.0, 4.0);
        let by = Vec3::new(-1.0, 0.5, 2.0);

        assert_eq!(base.scale(factors), base * Mat4x4::scaling(factors));
        assert_eq!(base.local_scale(factors), Mat4x4::scaling(factors) * base);
        assert_eq!(base.translate(by), base * Mat4x4::translation(by));
        assert_eq!(base.local_translate(by), Mat4x4::translation(by) * base);
        assert_eq!(base.rotate(axis, 0.5), base * Mat4x4::rotation(axis, 0.5));
        assert_eq!(base.local_rotate(axis, 0.5), Mat4x4::rotation(axis, 0.5) * base);
        assert_eq!(
            base.rotate_about(axis, 0.5, centre),
            base * Mat4x4::rotation_about(axis, 0.5, centre)
        );
        assert_eq!(
            base.local_rotate_about(axis, 0.5, centre),
            Mat4x4::rotation_about(axis, 0.5, centre) * base
        );
        assert_eq!(
            base.rotate_yaw_pitch_roll(0.1, 0.2, 0.3),
            base * Mat4x4::rotation_yaw_pitch_roll(0.1, 0.2, 0.3)
        );
        assert_eq!(
            base.local_rotate_yaw_pitch_roll(0.1, 0.2, 0.3),
            Mat4x4::rotation_yaw_pitch_roll(0.1, 0.2, 0.3) * base
        );
        let (b1, b2, b3) = (Vec3::unit_y(), -Vec3::unit_x(), Vec3::unit_z());
        assert_eq!(base.rotate_basis(b1, b2, b3), base * Mat4x4::rotation_basis(b1, b2, b3));
        assert_eq!(
            base.local_rotate_basis(b1, b2, b3),
            Mat4x4::rotation_basis(b1, b2, b3) * base
        );
        assert_eq!(base.rotate_y(0.5), base * Mat4x4::rotation_y(0.5));
        assert_eq!(base.local_rotate_y(0.5), Mat4x4::rotation_y(0.5) * base);
        assert_eq!(base.rotate_z(0.5), base * Mat4x4::rotation_z(0.5));
        assert_eq!(base.local_rotate_z(0.5), Mat4x4::rotation_z(0.5) * base);
    }

    // ==================== Camera and projection ====================

    #[test]
    fn mat4x4_camera() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let m = Mat4x4::camera(eye, Vec3::unit_z() * 2.0, Vec3::unit_y(), Vec3::unit_x());
        assert!(m.almost_eq(Mat4x4::translation(-eye)));
        assert_vec3_near(m.transform_point(eye), Vec3::zero());
        assert_eq!(m.column(3), Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn mat4x4_look_at() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let m = Mat4x4::look_at(eye, Vec3::zero(), Vec3::unit_y());
        assert_vec3_near(m.transform_point(eye), Vec3::zero());
        // The target lies straight ahead, down the -z axis.
        assert_vec3_near(m.transform_point(Vec3::zero()), Vec3::new(0.0, 0.0, -5.0));
        assert_vec3_near(m.transform_point(Vec3::new(1.0, 0.0, 5.0)), Vec3::unit_x());

        let eye = Vec3::new(3.0, 4.0, -2.0);
        let at = Vec3::new(-1.0, 0.5, 6.0);
        let m = Mat4x4::look_at(eye, at, Vec3::unit_y());
        let dist = eye.dist(at) as f32;
        assert_vec3_near(m.transform_point(at), Vec3::new(0.0, 0.0, -dist));
        assert!((m.determinant() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn mat4x4_orthogonal() {
        let m = Mat4x4::orthogonal(4.0, 2.0, 1.0, 11.0);
        assert_vec3_near(m.transform_point(Vec3::new(2.0, 1.0, -1.0)), Vec3::new(1.0, 1.0, 0.0));
        assert_vec3_near(
            m.transform_point(Vec3::new(-2.0, -1.0, -11.0)),
            Vec3::new(-1.0, -1.0, 1.0),
        );
    }

    #[test]
    fn mat4x4_perspective() {
        let (near, far) = (1.0, 100.0);
        let m = Mat4x4::perspective(2.0, 2.0, near, far);
        assert_eq!(m[(2, 3)], -1.0);
        assert_eq!(m[(3, 3)], 0.0);
        // w' = -z.
        let clip = Vec3::new(0.0, 0.0, -7.0).extend(1.0) * m;
        assert_eq!(clip.w, 7.0);
        assert_vec3_near(m.transform_point(Vec3::new(1.0, 1.0, -near)), Vec3::new(1.0, 1.0, 0.0));
        assert_vec3_near(m.transform_point(Vec3::new(0.0, 0.0, -far)), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn mat4x4_perspective_fov() {
        let m = Mat4x4::perspective_fov(FRAC_PI_2, 1.5, 0.1, 10.0);
        assert!((m[(0, 0)] - 1.0).abs() < 1e-6);
        assert!((m[(1, 1)] - 1.5).abs() < 1e-6);
        let fov_y = 2.0 * (1.0_f32 / 1.5).atan();
        assert!(m.almost_eq(Mat4x4::perspective_multi_fov(FRAC_PI_2, fov_y, 0.1, 10.0)));
        // Edge of the horizontal field of view maps to x = 1.
        let p = m.transform_point(Vec3::new(2.0, 0.0, -2.0));
        assert!((p.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn mat4x4_viewport() {
        let m = Mat4x4::viewport(800.0, 600.0);
        assert_vec3_near(m.transform_point(Vec3::new(-1.0, 1.0, 0.0)), Vec3::zero());
        assert_vec3_near(
            m.transform_point(Vec3::new(1.0, -1.0, 0.0)),
            Vec3::new(800.0, 600.0, 0.0),
        );
        assert_vec3_near(m.transform_point(Vec3::zero()), Vec3::new(400.0, 300.0, 0.0));
    }

    // ==================== Change of basis ====================

    #[test]
    fn mat4x4_change_of_basis_identity() {
        let m = Mat4x4::change_of_basis(&Basis::standard(), &Basis::default()).unwrap();
        assert!(m.almost_eq(Mat4x4::one()));
    }

    #[test]
    fn mat4x4_change_of_basis_translation() {
        let source = Basis::at(Vec3::new(1.0, 0.0, 0.0));
        let m = Mat4x4::change_of_basis(&source, &Basis::standard()).unwrap();
        assert_vec3_near(m.transform_point(Vec3::new(1.0, 0.0, 0.0)), Vec3::zero());
        assert_vec3_near(m.transform_point(Vec3::new(3.0, 2.0, 1.0)), Vec3::new(2.0, 2.0, 1.0));
    }

    #[test]
    fn mat4x4_change_of_basis_rotation() {
        let source = Basis::new(Vec3::unit_y(), -Vec3::unit_x(), Vec3::unit_z(), Vec3::zero());
        let m = Mat4x4::change_of_basis(&source, &Basis::standard()).unwrap();
        let expected = Mat4x4::from_basis(source.x, source.y, source.z).inverse().unwrap();
        assert!(m.almost_eq(expected));
        assert!((m * Mat4x4::from_basis(source.x, source.y, source.z)).almost_eq(Mat4x4::one()));
    }

    #[test]
    fn mat4x4_change_of_basis_degenerate_source() {
        let source = Basis::new(Vec3::unit_x(), Vec3::unit_x(), Vec3::unit_z(), Vec3::zero());
        assert!(matches!(
            Mat4x4::change_of_basis(&source, &Basis::standard()),
            Err(LinalgError::Singular { .. })
        ));
    }

    // ==================== Formatting and serialisation ====================

    #[test]
    fn mat4x4_display() {
        let text = format!("{:.1}", Mat4x4::one());
        let lines = text.lines().collect_vec();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "|      1.0       0.0       0.0       0.0 |");
        assert_eq!(lines[3], "|      0.0       0.0       0.0       1.0 |");
        // Negative zero prints without a sign.
        assert!(!format!("{}", Mat4x4::zero() * -1.0).contains('-'));
    }

    #[test]
    fn mat4x4_serialisation() {
        let m = Mat4x4::rotation(Vec3::new(1.0, 2.0, 3.0), 0.25).translate(Vec3::one());
        let config = bincode::config::standard();
        let encoded = bincode::encode_to_vec(m, config).unwrap();
        let (decoded, _): (Mat4x4, _) = bincode::decode_from_slice(&encoded, config).unwrap();
        assert_eq!(decoded, m);
    }
}
