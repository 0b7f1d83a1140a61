#[allow(unused_imports)]
pub use itertools::Itertools;
#[allow(unused_imports)]
pub use num_traits;

#[allow(unused_imports)]
pub use anyhow::{anyhow, bail, Context, Result};
#[allow(unused_imports)]
pub use tracing::{error, info, warn};

#[allow(unused_imports)]
pub use crate::{
    core::config::*,
    util::{
        colour::Colour,
        linalg,
        linalg::{
            Basis, LinalgError, Mat4x4, Scalar, Vec2, Vec2i, Vec2u, Vec3, Vec3i, Vec3u, Vec4,
            Vec4i, Vec4u, Vector2, Vector3, Vector4,
        },
        log::{setup_log, LogTarget},
        time::{Clock, Time},
    },
};
