use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign},
    time::{Duration, Instant},
};

const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_MILLI: i64 = 1_000;

/// A signed span of time with microsecond resolution.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    bincode::Encode,
    bincode::Decode,
)]
pub struct Time {
    micros: i64,
}

impl Time {
    pub fn zero() -> Self {
        Self { micros: 0 }
    }
    /// Truncates to whole microseconds; out-of-range values saturate.
    #[allow(clippy::cast_possible_truncation)]
    pub fn seconds(seconds: f32) -> Self {
        Self {
            micros: (f64::from(seconds) * MICROS_PER_SECOND as f64) as i64,
        }
    }
    pub fn milliseconds(millis: i64) -> Self {
        Self {
            micros: millis.saturating_mul(MICROS_PER_MILLI),
        }
    }
    pub fn microseconds(micros: i64) -> Self {
        Self { micros }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn as_seconds(&self) -> f32 {
        (self.micros as f64 / MICROS_PER_SECOND as f64) as f32
    }
    /// Truncates toward zero.
    pub fn as_millis(&self) -> i64 {
        self.micros / MICROS_PER_MILLI
    }
    pub fn as_micros(&self) -> i64 {
        self.micros
    }

    pub fn is_zero(&self) -> bool {
        self.micros == 0
    }
}

impl From<Duration> for Time {
    fn from(value: Duration) -> Self {
        Self {
            micros: i64::try_from(value.as_micros()).unwrap_or(i64::MAX),
        }
    }
}

impl TryFrom<Time> for Duration {
    type Error = anyhow::Error;

    fn try_from(value: Time) -> Result<Self> {
        match u64::try_from(value.micros) {
            Ok(micros) => Ok(Duration::from_micros(micros)),
            Err(_) => bail!("cannot convert negative time {value} to Duration"),
        }
    }
}

impl fmt::Display for Time {
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}s", self.micros as f64 / MICROS_PER_SECOND as f64)
    }
}

impl Neg for Time {
    type Output = Time;

    fn neg(self) -> Self::Output {
        Time { micros: -self.micros }
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Self::Output {
        Time {
            micros: self.micros + rhs.micros,
        }
    }
}
impl AddAssign for Time {
    fn add_assign(&mut self, rhs: Time) {
        *self = *self + rhs;
    }
}

impl Sub for Time {
    type Output = Time;

    fn sub(self, rhs: Time) -> Self::Output {
        Time {
            micros: self.micros - rhs.micros,
        }
    }
}
impl SubAssign for Time {
    fn sub_assign(&mut self, rhs: Time) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Time {
    type Output = Time;

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn mul(self, rhs: f32) -> Self::Output {
        Time {
            micros: (self.micros as f64 * f64::from(rhs)) as i64,
        }
    }
}
impl MulAssign<f32> for Time {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Mul<i64> for Time {
    type Output = Time;

    fn mul(self, rhs: i64) -> Self::Output {
        Time {
            micros: self.micros * rhs,
        }
    }
}
impl MulAssign<i64> for Time {
    fn mul_assign(&mut self, rhs: i64) {
        *self = *self * rhs;
    }
}

impl Div<f32> for Time {
    type Output = Time;

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn div(self, rhs: f32) -> Self::Output {
        Time {
            micros: (self.micros as f64 / f64::from(rhs)) as i64,
        }
    }
}
impl DivAssign<f32> for Time {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

/// Integer division of the microsecond count. Panics if `rhs` is zero, like `i64` division.
impl Div<i64> for Time {
    type Output = Time;

    fn div(self, rhs: i64) -> Self::Output {
        Time {
            micros: self.micros / rhs,
        }
    }
}
impl DivAssign<i64> for Time {
    fn div_assign(&mut self, rhs: i64) {
        *self = *self / rhs;
    }
}

/// How many whole times `rhs` fits into `self`. Panics if `rhs` is zero.
impl Div for Time {
    type Output = i64;

    fn div(self, rhs: Time) -> Self::Output {
        self.micros / rhs.micros
    }
}

/// Panics if `rhs` is zero.
impl Rem for Time {
    type Output = Time;

    fn rem(self, rhs: Time) -> Self::Output {
        Time {
            micros: self.micros % rhs.micros,
        }
    }
}
impl RemAssign for Time {
    fn rem_assign(&mut self, rhs: Time) {
        *self = *self % rhs;
    }
}

/// A stopwatch over the monotonic clock.
#[derive(Clone, Debug)]
pub struct Clock {
    last_reset: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last_reset: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Time {
        self.last_reset.elapsed().into()
    }

    /// Returns the time elapsed so far and restarts the clock.
    pub fn reset(&mut self) -> Time {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_reset).into();
        self.last_reset = now;
        elapsed
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
