use std::f32::consts::FRAC_PI_2;

use cubes::core::prelude::*;
use cubes::{check, check_almost_eq, check_eq, check_false, check_lt};

fn main() -> Result<()> {
    let target = match std::env::args().nth(1).as_deref() {
        Some("--log-file") => LogTarget::default_file(),
        _ => LogTarget::Stderr,
    };
    setup_log(target)?;

    let clock = Clock::new();
    run_test_cases()?;
    info!("all checks passed in {}", clock.elapsed());
    Ok(())
}

fn sample_vectors() -> Vec<Vec3> {
    vec![
        Vec3::unit_x(),
        Vec3::new(3.0, 4.0, 0.0),
        Vec3::new(-1.5, 2.25, 7.0),
        Vec3::new(0.001, -0.002, 0.003),
        Vec3::new(-100.0, 50.0, -25.0),
    ]
}

fn sample_matrices() -> Vec<Mat4x4> {
    vec![
        Mat4x4::one(),
        Mat4x4::translation(Vec3::new(1.0, -2.0, 3.0)),
        Mat4x4::scaling(Vec3::new(2.0, 0.5, 4.0)).rotate_x(0.3),
        Mat4x4::rotation(Vec3::new(1.0, 1.0, 1.0), 1.2).translate(Vec3::new(-4.0, 0.0, 2.5)),
        Mat4x4::look_at(Vec3::new(3.0, 3.0, 3.0), Vec3::zero(), Vec3::unit_y()),
        Mat4x4::perspective_fov(1.2, 16.0 / 9.0, 0.1, 100.0),
    ]
}

fn run_test_cases() -> Result<()> {
    check_eq!(Vec3::zero().len(), 0.0);
    check_eq!(Vec3::new(3.0, 4.0, 0.0).len(), 5.0);
    check_eq!(Vec3::zero().normed(), Vec3::zero());
    check!(Vec3::zero().try_normed().is_err());

    let vectors = sample_vectors();
    for v in &vectors {
        check_lt!((v.normed().len() - 1.0).abs(), 1e-6, v);
    }
    for (a, b) in vectors.iter().copied().tuple_combinations() {
        check_eq!(a.dot(b), b.dot(a));
        check_eq!(a.cross(b), -b.cross(a));
        let scale = (a.len() * b.len()).max(1.0);
        check_lt!(f64::from(a.dot(a.cross(b))).abs() / scale, 1e-4);
    }

    for m in sample_matrices() {
        check_eq!(Mat4x4::one() * m, m);
        check_eq!(m * Mat4x4::one(), m);
        check_eq!(m.transposed().transposed(), m);
        let back = m.inverse()?.inverse()?;
        check_lt!(Mat4x4::compare_matrices(&m, &back), MATRIX_COMPARE_TOLERANCE);
    }
    check!(Mat4x4::zero().inverse().is_err());

    for p in &vectors {
        check_eq!(Mat4x4::translation(*p).transform_point(Vec3::zero()), *p);
    }

    let a = FRAC_PI_2;
    let b = Vec3::new(0.0, 3.0, 0.0);
    let p = Vec3::unit_y();
    let world = Mat4x4::translation(b).rotate_x(a);
    let local = Mat4x4::translation(b).local_rotate_x(a);
    check_almost_eq!(world, Mat4x4::translation(b) * Mat4x4::rotation_x(a));
    check_almost_eq!(local, Mat4x4::rotation_x(a) * Mat4x4::translation(b));
    check_false!(world.transform_point(p).almost_eq(local.transform_point(p)));

    check_eq!(
        Mat4x4::scaling(Vec3::splat(2.0)).transform_point(Vec3::unit_x()),
        Vec3::new(2.0, 0.0, 0.0)
    );
    check_almost_eq!(
        Mat4x4::rotation_z(FRAC_PI_2).transform_point(Vec3::unit_x()),
        Vec3::unit_y()
    );

    info!("sample view matrix:\n{}", sample_matrices()[4]);
    Ok(())
}
