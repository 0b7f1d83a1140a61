pub mod assert;
pub mod colour;
pub mod linalg;
pub mod log;
pub mod time;

pub mod gg_float {
    use num_traits::Zero;

    /// Maps `-0.0` to `0.0` so it prints without a sign.
    pub fn force_positive_zero(x: f32) -> f32 {
        if x.is_zero() { 0.0 } else { x }
    }

}
