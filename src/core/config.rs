pub const EPSILON: f32 = 1e-5;
/// Mean absolute elementwise difference below which two matrices are treated as equal by
/// [`Mat4x4::compare_matrices`](crate::util::linalg::Mat4x4::compare_matrices) callers.
pub const MATRIX_COMPARE_TOLERANCE: f32 = 1e-4;
pub const DEFAULT_LOG_FILE: &str = "run.log";
