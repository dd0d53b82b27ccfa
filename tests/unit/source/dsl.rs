use super::*;
use crate::source::graph::{ShaderGraph, SocketValue};
use crate::source::kind::SourceNodeKind;

#[test]
fn duplicate_node_names_are_rejected() {
    let err = TreeBuilder::new("m")
        .node(value("V", 1.0))
        .unwrap()
        .node(value("V", 2.0))
        .err()
        .unwrap();
    assert!(err.to_string().contains("duplicate node name 'V'"), "{err}");
}

#[test]
fn link_to_unknown_socket_fails_at_build() {
    let err = TreeBuilder::new("m")
        .node(value("V", 1.0))
        .unwrap()
        .node(diffuse_bsdf("D", Rgba::WHITE))
        .unwrap()
        .link("V", "Value", "D", "Colour")
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("has no input"), "{err}");
}

#[test]
fn presets_declare_the_usual_sockets() {
    let tree = TreeBuilder::new("m")
        .node(checker_texture("Checker", Rgba::WHITE, Rgba::BLACK, 4.0))
        .unwrap()
        .node(mix_shader("Mix", 0.25))
        .unwrap()
        .node(image_texture("Img").image("wood.png", Some("Non-Color"), Some("Closest")))
        .unwrap()
        .build()
        .unwrap();

    let checker = tree.node_by_name("Checker").unwrap();
    assert_eq!(tree.kind(checker), SourceNodeKind::TexChecker);
    let names: Vec<_> = tree.inputs(checker).iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Vector", "Color1", "Color2", "Scale"]);
    assert_eq!(tree.inputs(checker)[3].default, SocketValue::Float(4.0));

    let mix = tree.node_by_name("Mix").unwrap();
    assert_eq!(tree.inputs(mix).len(), 3);
    assert_eq!(tree.inputs(mix)[0].default, SocketValue::Float(0.25));

    let img = tree.node_by_name("Img").unwrap();
    let image = tree.props(img).image.as_ref().unwrap();
    assert_eq!(image.path, "wood.png");
    assert_eq!(image.color_space.as_deref(), Some("Non-Color"));
}

#[test]
fn positional_links_address_duplicate_socket_names() {
    let tree = TreeBuilder::new("m")
        .node(diffuse_bsdf("A", Rgba::WHITE))
        .unwrap()
        .node(emission("B", Rgba::WHITE, 3.0))
        .unwrap()
        .node(mix_shader("Mix", 0.5))
        .unwrap()
        .link("A", "BSDF", "Mix", 1usize)
        .link("B", "Emission", "Mix", 2usize)
        .build()
        .unwrap();
    let mix = tree.node_by_name("Mix").unwrap();
    let a = tree.node_by_name("A").unwrap();
    let b = tree.node_by_name("B").unwrap();
    assert_eq!(tree.link(mix, 1).unwrap().node, a);
    assert_eq!(tree.link(mix, 2).unwrap().node, b);
}

#[test]
fn ramp_and_operation_props_survive_the_build() {
    let tree = TreeBuilder::new("m")
        .node(
            NodeBuilder::new("Ramp", "ShaderNodeValToRGB")
                .input_float("Fac", 0.5)
                .output("Color", SocketType::Color)
                .ramp(
                    "RGB",
                    "CONSTANT",
                    [
                        RampStop {
                            color: Rgba::BLACK,
                            position: 0.0,
                        },
                        RampStop {
                            color: Rgba::WHITE,
                            position: 1.0,
                        },
                    ],
                ),
        )
        .unwrap()
        .node(math("M", "POWER", 2.0, 8.0))
        .unwrap()
        .build()
        .unwrap();

    let ramp = tree.node_by_name("Ramp").unwrap();
    let r = tree.props(ramp).ramp.as_ref().unwrap();
    assert_eq!(r.interpolation, "CONSTANT");
    assert_eq!(r.elements.len(), 2);
    assert_eq!(r.elements[1].color, Rgba::WHITE);

    let m = tree.node_by_name("M").unwrap();
    assert_eq!(tree.props(m).operation.as_deref(), Some("POWER"));
}

#[test]
fn group_nodes_resolve_against_registered_bodies() {
    let body = Arc::new(TreeBuilder::new("Body").build().unwrap());
    let tree = TreeBuilder::new("m")
        .group("Body", body.clone())
        .node(NodeBuilder::new("G", "ShaderNodeGroup").group("Body"))
        .unwrap()
        .build()
        .unwrap();
    let g = tree.node_by_name("G").unwrap();
    assert!(std::ptr::eq(tree.group_body(g).unwrap(), body.as_ref()));

    let missing = TreeBuilder::new("m")
        .node(NodeBuilder::new("G", "ShaderNodeGroup").group("Nope"))
        .unwrap()
        .build();
    assert!(missing.is_err());
}
