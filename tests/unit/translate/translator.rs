use super::*;
use crate::ir::ops::MathOp;
use crate::ir::shader::ShaderNode;
use crate::source::dsl::{
    NodeBuilder, TreeBuilder, diffuse_bsdf, material_output, math, mix_shader, reroute, rgb,
    value,
};
use crate::source::graph::NodeTree;
use std::sync::Arc;

const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);

fn surface_from(builder: TreeBuilder, from: &str, socket: &str) -> NodeTree {
    builder
        .node(material_output("Material Output"))
        .unwrap()
        .link(from, socket, "Material Output", "Surface")
        .build()
        .unwrap()
}

fn translate(tree: &NodeTree) -> (Option<ShaderRef>, Vec<Diagnostic>) {
    let policy = FallbackPolicy::new();
    let mut t = Translator::new(&policy, TranslateOpts::default());
    let out = t.translate_material(tree);
    (out, t.take_diagnostics())
}

fn diffuse_color(shader: &ShaderNode) -> &ColorRef {
    match shader {
        ShaderNode::Diffuse { color } => color,
        other => panic!("expected diffuse, got {other:?}"),
    }
}

#[test]
fn linked_constant_reaches_the_surface() {
    let tree = surface_from(
        TreeBuilder::new("m")
            .node(rgb("RGB", RED))
            .unwrap()
            .node(diffuse_bsdf("Diffuse", Rgba::WHITE))
            .unwrap()
            .link("RGB", "Color", "Diffuse", "Color"),
        "Diffuse",
        "BSDF",
    );
    let (out, diags) = translate(&tree);
    assert_eq!(
        out.unwrap(),
        ShaderNode::diffuse(ColorNode::constant(RED))
    );
    assert!(diags.is_empty(), "{diags:?}");
}

#[test]
fn unlinked_surface_is_the_shared_default() {
    let policy = FallbackPolicy::new();
    let mut t = Translator::new(&policy, TranslateOpts::default());
    let tree = TreeBuilder::new("m")
        .node(material_output("Material Output"))
        .unwrap()
        .build()
        .unwrap();
    let out = t.translate_material(&tree).unwrap();
    assert!(Arc::ptr_eq(&out, &policy.default_surface));
}

#[test]
fn missing_output_or_empty_tree_is_none() {
    let empty = TreeBuilder::new("m").build().unwrap();
    assert!(translate(&empty).0.is_none());

    let no_output = TreeBuilder::new("m")
        .node(diffuse_bsdf("Diffuse", RED))
        .unwrap()
        .build()
        .unwrap();
    assert!(translate(&no_output).0.is_none());
}

#[test]
fn unknown_producer_yields_the_warning_shader() {
    let policy = FallbackPolicy::new();
    let mut t = Translator::new(&policy, TranslateOpts::default());
    let tree = surface_from(
        TreeBuilder::new("m")
            .node(
                NodeBuilder::new("Toon", "ShaderNodeBsdfToon")
                    .output("BSDF", SocketType::Shader),
            )
            .unwrap(),
        "Toon",
        "BSDF",
    );
    let out = t.translate_material(&tree).unwrap();
    assert!(Arc::ptr_eq(&out, &policy.warning_shader));

    let diags = t.take_diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::UnknownNode);
    assert_eq!(diags[0].node.as_deref(), Some("Toon"));
    assert!(diags[0].message.contains("ShaderNodeBsdfToon"));
}

#[test]
fn reroute_loop_is_reported_as_a_cycle() {
    let policy = FallbackPolicy::new();
    let mut t = Translator::new(&policy, TranslateOpts::default());
    let tree = surface_from(
        TreeBuilder::new("m")
            .node(reroute("R1", SocketType::Color))
            .unwrap()
            .node(reroute("R2", SocketType::Color))
            .unwrap()
            .node(diffuse_bsdf("Diffuse", Rgba::WHITE))
            .unwrap()
            .link("R2", "Output", "R1", "Input")
            .link("R1", "Output", "R2", "Input")
            .link("R1", "Output", "Diffuse", "Color"),
        "Diffuse",
        "BSDF",
    );
    let out = t.translate_material(&tree).unwrap();
    assert!(Arc::ptr_eq(diffuse_color(&out), &policy.warning_color));
    assert_eq!(t.diagnostics().count(DiagnosticKind::Cycle), 1);
}

#[test]
fn depth_limit_cuts_long_chains() {
    let policy = FallbackPolicy::new();
    let mut t = Translator::new(&policy, TranslateOpts { max_depth: 3 });

    let mut b = TreeBuilder::new("m")
        .node(rgb("RGB", RED))
        .unwrap()
        .node(diffuse_bsdf("Diffuse", Rgba::WHITE))
        .unwrap();
    let mut prev = ("RGB".to_owned(), "Color");
    for i in 0..5 {
        let name = format!("R{i}");
        b = b
            .node(reroute(name.clone(), SocketType::Color))
            .unwrap()
            .link(prev.0.clone(), prev.1, name.clone(), "Input");
        prev = (name, "Output");
    }
    let tree = surface_from(b.link(prev.0, prev.1, "Diffuse", "Color"), "Diffuse", "BSDF");

    let out = t.translate_material(&tree).unwrap();
    assert!(Arc::ptr_eq(diffuse_color(&out), &policy.warning_color));
    assert_eq!(t.diagnostics().count(DiagnosticKind::DepthLimit), 1);
}

#[test]
fn value_feeding_a_color_socket_is_split() {
    let tree = surface_from(
        TreeBuilder::new("m")
            .node(value("Value", 0.25))
            .unwrap()
            .node(diffuse_bsdf("Diffuse", Rgba::WHITE))
            .unwrap()
            .link("Value", "Value", "Diffuse", "Color"),
        "Diffuse",
        "BSDF",
    );
    let (out, diags) = translate(&tree);
    assert_eq!(
        out.unwrap(),
        ShaderNode::diffuse(ColorNode::split(ValueNode::constant(0.25)))
    );
    assert!(diags.is_empty());
}

#[test]
fn shader_feeding_a_color_socket_reports_coercion() {
    let policy = FallbackPolicy::new();
    let mut t = Translator::new(&policy, TranslateOpts::default());
    let tree = surface_from(
        TreeBuilder::new("m")
            .node(diffuse_bsdf("Inner", RED))
            .unwrap()
            .node(diffuse_bsdf("Outer", Rgba::WHITE))
            .unwrap()
            .link("Inner", "BSDF", "Outer", "Color"),
        "Outer",
        "BSDF",
    );
    let out = t.translate_material(&tree).unwrap();
    assert!(Arc::ptr_eq(diffuse_color(&out), &policy.warning_color));
    let diags = t.take_diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::Coercion);
    assert_eq!(diags[0].node.as_deref(), Some("Inner"));
}

#[test]
fn math_chain_keeps_operators() {
    let tree = surface_from(
        TreeBuilder::new("m")
            .node(math("Mul", "MULTIPLY", 2.0, 3.0))
            .unwrap()
            .node(diffuse_bsdf("Diffuse", Rgba::WHITE))
            .unwrap()
            .link("Mul", "Value", "Diffuse", "Color"),
        "Diffuse",
        "BSDF",
    );
    let (out, _) = translate(&tree);
    let expected = ColorNode::split(ValueNode::math(
        ValueNode::constant(2.0),
        ValueNode::constant(3.0),
        MathOp::Multiply,
    ));
    assert_eq!(out.unwrap(), ShaderNode::diffuse(expected));
}

#[test]
fn group_input_outside_a_group_is_unbound() {
    let policy = FallbackPolicy::new();
    let mut t = Translator::new(&policy, TranslateOpts::default());
    let tree = surface_from(
        TreeBuilder::new("m")
            .node(NodeBuilder::new("Group Input", "NodeGroupInput").output("Tint", SocketType::Color))
            .unwrap()
            .node(diffuse_bsdf("Diffuse", Rgba::WHITE))
            .unwrap()
            .link("Group Input", "Tint", "Diffuse", "Color"),
        "Diffuse",
        "BSDF",
    );
    let out = t.translate_material(&tree).unwrap();
    assert!(Arc::ptr_eq(diffuse_color(&out), &policy.warning_color));
    assert_eq!(t.diagnostics().count(DiagnosticKind::UnboundGroupInput), 1);
}

#[test]
fn group_parameters_bind_by_formal_name() {
    let body = TreeBuilder::new("Tint")
        .node(NodeBuilder::new("Group Input", "NodeGroupInput").output("Tint", SocketType::Color))
        .unwrap()
        .node(NodeBuilder::new("Group Output", "NodeGroupOutput").input("Shader", SocketType::Shader))
        .unwrap()
        .node(diffuse_bsdf("Diffuse", Rgba::WHITE))
        .unwrap()
        .link("Group Input", "Tint", "Diffuse", "Color")
        .link("Diffuse", "BSDF", "Group Output", "Shader")
        .build()
        .unwrap();

    let tree = surface_from(
        TreeBuilder::new("m")
            .group("Tint", Arc::new(body))
            .node(
                NodeBuilder::new("Group", "ShaderNodeGroup")
                    .group("Tint")
                    .input_color("Tint", RED)
                    .output("Shader", SocketType::Shader),
            )
            .unwrap(),
        "Group",
        "Shader",
    );
    let (out, diags) = translate(&tree);
    assert_eq!(
        out.unwrap(),
        ShaderNode::diffuse(ColorNode::constant(RED))
    );
    assert!(diags.is_empty(), "{diags:?}");
}

#[test]
fn group_without_output_node_reports() {
    let body = TreeBuilder::new("Empty").build().unwrap();
    let policy = FallbackPolicy::new();
    let mut t = Translator::new(&policy, TranslateOpts::default());
    let tree = surface_from(
        TreeBuilder::new("m")
            .group("Empty", Arc::new(body))
            .node(
                NodeBuilder::new("Group", "ShaderNodeGroup")
                    .group("Empty")
                    .output("Shader", SocketType::Shader),
            )
            .unwrap(),
        "Group",
        "Shader",
    );
    let out = t.translate_material(&tree).unwrap();
    assert!(Arc::ptr_eq(&out, &policy.warning_shader));
    assert_eq!(t.diagnostics().count(DiagnosticKind::MissingGroupOutput), 1);
}

#[test]
fn missing_named_socket_reports_once() {
    let policy = FallbackPolicy::new();
    let mut t = Translator::new(&policy, TranslateOpts::default());
    let tree = surface_from(
        TreeBuilder::new("m")
            .node(NodeBuilder::new("Diffuse", "ShaderNodeBsdfDiffuse").output("BSDF", SocketType::Shader))
            .unwrap(),
        "Diffuse",
        "BSDF",
    );
    let out = t.translate_material(&tree).unwrap();
    assert!(Arc::ptr_eq(diffuse_color(&out), &policy.warning_color));
    assert_eq!(t.diagnostics().count(DiagnosticKind::MissingSocket), 1);
}

#[test]
fn background_needs_a_linked_world_surface() {
    let policy = FallbackPolicy::new();
    let mut t = Translator::new(&policy, TranslateOpts::default());
    let unlinked = TreeBuilder::new("World")
        .node(crate::source::dsl::world_output("World Output"))
        .unwrap()
        .build()
        .unwrap();
    assert!(t.translate_background(&unlinked).is_none());

    let linked = TreeBuilder::new("World")
        .node(crate::source::dsl::world_output("World Output"))
        .unwrap()
        .node(crate::source::dsl::background("Background", RED, 2.0))
        .unwrap()
        .link("Background", "Background", "World Output", "Surface")
        .build()
        .unwrap();
    let bg = t.translate_background(&linked).unwrap();
    let ShaderNode::Background {
        color,
        pose,
        strength,
    } = bg.as_ref()
    else {
        panic!("expected background, got {bg:?}");
    };
    assert_eq!(**color, ColorNode::Constant { color: RED });
    assert!(Arc::ptr_eq(pose, &policy.zero_vector));
    assert_eq!(**strength, ValueNode::Constant { value: 2.0 });
}

#[test]
fn mix_shader_keeps_same_named_inputs_apart_by_index() {
    let tree = surface_from(
        TreeBuilder::new("m")
            .node(diffuse_bsdf("A", RED))
            .unwrap()
            .node(diffuse_bsdf("B", Rgba::WHITE))
            .unwrap()
            .node(mix_shader("Mix", 0.25))
            .unwrap()
            .link("A", "BSDF", "Mix", 1usize)
            .link("B", "BSDF", "Mix", 2usize),
        "Mix",
        "Shader",
    );
    let (out, diags) = translate(&tree);
    assert_eq!(
        out.unwrap(),
        ShaderNode::mix(
            ShaderNode::diffuse(ColorNode::constant(RED)),
            ShaderNode::diffuse(ColorNode::constant(Rgba::WHITE)),
            ValueNode::constant(0.25),
        )
    );
    assert!(diags.is_empty(), "{diags:?}");
}
