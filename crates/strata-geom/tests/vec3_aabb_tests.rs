use strata_geom::{Aabb, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_constants() {
    assert!(vec3_approx_eq(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), 1e-6));
    assert_eq!(Vec3::default(), Vec3::ZERO);
}

#[test]
fn vec3_add_sub() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-6));

    let d = c - a;
    assert!(vec3_approx_eq(d, b, 1e-6));

    let mut e = a;
    e += b;
    assert_eq!(e, c);
}

#[test]
fn vec3_scalar_mul_div() {
    let v = Vec3::new(1.5, -2.0, 4.0);
    let m = v * 2.0;
    assert!(vec3_approx_eq(m, Vec3::new(3.0, -4.0, 8.0), 1e-6));

    let d = m / 2.0;
    assert!(vec3_approx_eq(d, v, 1e-6));
}

#[test]
fn aabb_size_center_contains() {
    let aabb = Aabb::new(Vec3::ZERO, Vec3::new(4.0, 2.0, 4.0));
    assert!(vec3_approx_eq(aabb.size(), Vec3::new(4.0, 2.0, 4.0), 1e-6));
    assert!(vec3_approx_eq(aabb.center(), Vec3::new(2.0, 1.0, 2.0), 1e-6));
    assert!(aabb.contains(Vec3::new(0.5, 0.5, 0.5)));
    assert!(aabb.contains(Vec3::ZERO));
    // max is exclusive
    assert!(!aabb.contains(Vec3::new(4.0, 1.0, 1.0)));
    assert!(!aabb.contains(Vec3::new(1.0, -0.1, 1.0)));
}
