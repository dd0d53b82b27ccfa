use super::*;
use crate::ir::ops::MathOp;

fn tinted(r: f32) -> std::sync::Arc<ShaderNode> {
    ShaderNode::mix(
        ShaderNode::diffuse(ColorNode::constant(Rgba::new(r, 0.2, 0.2, 1.0))),
        ShaderNode::metal(ColorNode::constant(Rgba::WHITE), ValueNode::constant(0.1)),
        ValueNode::math(
            ValueNode::constant(0.5),
            ValueNode::ray_length(),
            MathOp::Multiply,
        ),
    )
}

#[test]
fn equal_trees_share_a_fingerprint() {
    assert_eq!(fingerprint_shader(&tinted(0.8)), fingerprint_shader(&tinted(0.8)));
}

#[test]
fn payload_changes_change_the_fingerprint() {
    assert_ne!(fingerprint_shader(&tinted(0.8)), fingerprint_shader(&tinted(0.7)));
}

#[test]
fn sharing_does_not_change_the_fingerprint() {
    let leaf = ColorNode::constant(Rgba::WHITE);
    let shared = ShaderNode::add(
        ShaderNode::diffuse(leaf.clone()),
        ShaderNode::diffuse(leaf),
    );
    let copied = ShaderNode::add(
        ShaderNode::diffuse(ColorNode::constant(Rgba::WHITE)),
        ShaderNode::diffuse(ColorNode::constant(Rgba::WHITE)),
    );
    assert_eq!(fingerprint_shader(&shared), fingerprint_shader(&copied));
}

#[test]
fn variant_tag_participates() {
    let c = ColorNode::constant(Rgba::WHITE);
    assert_ne!(
        fingerprint_shader(&ShaderNode::transparent(c.clone())),
        fingerprint_shader(&ShaderNode::translucent(c))
    );
}
