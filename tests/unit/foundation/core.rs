use super::*;

#[test]
fn rgba_to_vec3_drops_alpha() {
    let c = Rgba::new(0.8, 0.2, 0.1, 0.5);
    assert_eq!(c.to_vec3(), Vec3::new(0.8, 0.2, 0.1));
}

#[test]
fn vec3_lifts_to_opaque_color() {
    let v = Vec3::new(0.25, 0.5, 0.75);
    assert_eq!(v.to_rgba(), Rgba::new(0.25, 0.5, 0.75, 1.0));
}

#[test]
fn vec3_length_and_sub() {
    let a = Vec3::new(3.0, 4.0, 0.0);
    assert!((a.length() - 5.0).abs() < 1e-6);
    assert_eq!(a.sub(Vec3::new(1.0, 1.0, 1.0)), Vec3::new(2.0, 3.0, -1.0));
}

#[test]
fn non_finite_components_are_detected() {
    assert!(Vec3::new(0.0, 1.0, 2.0).is_finite());
    assert!(!Vec3::new(f32::NAN, 1.0, 2.0).is_finite());
}
