use super::*;
use crate::foundation::core::{Rgba, Vec3};
use crate::ir::color::{ColorNode, ImageOptions};
use crate::ir::ops::MathOp;
use crate::ir::shader::ShaderNode;
use crate::ir::value::{Component, ValueNode};
use crate::ir::vector::VectorNode;
use std::sync::Arc;

#[test]
fn constructors_produce_their_kind() {
    let c = ColorNode::constant(Rgba::WHITE);
    let v = ValueNode::constant(0.5);
    let n = VectorNode::normal();
    assert_eq!(ShaderNode::diffuse(c.clone()).kind(), "diffuse");
    assert_eq!(ShaderNode::metal(c.clone(), v.clone()).kind(), "metal");
    assert_eq!(
        ShaderNode::background(c.clone(), VectorNode::constant(Vec3::ZERO), v.clone()).kind(),
        "background"
    );
    assert_eq!(ColorNode::split(v.clone()).kind(), "split");
    assert_eq!(ValueNode::vec_to_value(Component::F, n.clone()).kind(), "vec_to_value");
    assert_eq!(ValueNode::ray_length().kind(), "ray_length");
    assert_eq!(VectorNode::from_color(c).kind(), "from_color");
    assert_eq!(n.kind(), "normal");
}

#[test]
fn shared_leaves_are_not_copied() {
    let leaf = ColorNode::constant(Rgba::BLACK);
    let a = ShaderNode::diffuse(leaf.clone());
    let b = ShaderNode::transparent(leaf.clone());
    assert_eq!(Arc::strong_count(&leaf), 3);
    drop(a);
    drop(b);
    assert_eq!(Arc::strong_count(&leaf), 1);
}

#[test]
fn structural_equality_ignores_sharing() {
    let shared = ValueNode::constant(2.0);
    let a = ValueNode::math(shared.clone(), shared, MathOp::Multiply);
    let b = ValueNode::math(
        ValueNode::constant(2.0),
        ValueNode::constant(2.0),
        MathOp::Multiply,
    );
    assert_eq!(a, b);
}

#[test]
fn any_node_reports_category() {
    let n = AnyNode::Value(ValueNode::constant(1.0));
    assert_eq!(n.category(), Category::Value);
    assert_eq!(n.kind(), "constant");
    assert_eq!(Category::Vector.to_string(), "vector");
}

#[test]
fn image_option_bits() {
    assert_eq!(ImageOptions::default().bits(), 0x01);
    let raw = ImageOptions {
        srgb_transform: false,
        no_bilinear: true,
    };
    assert_eq!(raw.bits(), 0x02);
}

#[test]
fn serializes_with_kind_tag() {
    let s = ShaderNode::diffuse(ColorNode::constant(Rgba::new(0.8, 0.2, 0.2, 1.0)));
    let json = serde_json::to_value(&s).unwrap();
    assert_eq!(json["kind"], "diffuse");
    assert_eq!(json["color"]["kind"], "constant");
    assert_eq!(json["color"]["color"]["a"], 1.0);

    let v = ValueNode::math(ValueNode::constant(1.0), ValueNode::ray_length(), MathOp::Add);
    let json = serde_json::to_value(&v).unwrap();
    assert_eq!(json["op"], "add");
    assert_eq!(json["b"]["kind"], "ray_length");
}
