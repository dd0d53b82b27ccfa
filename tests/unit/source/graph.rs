use super::*;
use crate::source::dsl::{TreeBuilder, diffuse_bsdf, material_output, rgb};

fn small_tree() -> NodeTree {
    TreeBuilder::new("m")
        .node(rgb("RGB", Rgba::WHITE))
        .unwrap()
        .node(diffuse_bsdf("Diffuse", Rgba::BLACK))
        .unwrap()
        .node(material_output("Material Output"))
        .unwrap()
        .link("RGB", "Color", "Diffuse", "Color")
        .link("Diffuse", "BSDF", "Material Output", "Surface")
        .build()
        .unwrap()
}

#[test]
fn lookup_by_name_and_kind() {
    let tree = small_tree();
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.name(), "m");

    let out = tree.node_by_name("Material Output").unwrap();
    assert_eq!(tree.kind(out), SourceNodeKind::MaterialOutput);
    assert_eq!(tree.find_kind(SourceNodeKind::MaterialOutput), Some(out));
    assert_eq!(tree.tag(out), "ShaderNodeOutputMaterial");
    assert!(tree.find_kind(SourceNodeKind::WorldOutput).is_none());
}

#[test]
fn links_point_at_the_producer_output() {
    let tree = small_tree();
    let diffuse = tree.node_by_name("Diffuse").unwrap();
    let rgb = tree.node_by_name("RGB").unwrap();

    assert_eq!(
        tree.link(diffuse, 0),
        Some(Link {
            node: rgb,
            socket: 0
        })
    );
    assert!(tree.link(diffuse, 1).is_none());
    assert!(tree.is_output_linked(rgb, 0));
    assert!(tree.is_output_linked(diffuse, 0));
    assert_eq!(tree.link_count(), 2);
}

#[test]
fn socket_index_lookup_picks_the_first_match() {
    let tree = small_tree();
    let diffuse = tree.node_by_name("Diffuse").unwrap();
    assert_eq!(tree.input_index(diffuse, "Roughness"), Some(1));
    assert_eq!(tree.output_index(diffuse, "BSDF"), Some(0));
    assert_eq!(tree.input_index(diffuse, "Missing"), None);
}

#[test]
fn relinking_an_input_releases_the_old_producer() {
    let mut tree = NodeTree::new("t");
    let mk = |name: &str| SourceNode {
        name: name.to_owned(),
        tag: "ShaderNodeRGB".to_owned(),
        kind: SourceNodeKind::Rgb,
        inputs: vec![Socket::new("In", SocketType::Color, SocketValue::None)],
        outputs: vec![Socket::new("Color", SocketType::Color, SocketValue::None)],
        props: NodeProps::default(),
        group: None,
    };
    let a = tree.push_node(mk("a"));
    let b = tree.push_node(mk("b"));
    let c = tree.push_node(mk("c"));

    tree.push_link(Link { node: a, socket: 0 }, c, 0);
    assert!(tree.is_output_linked(a, 0));
    tree.push_link(Link { node: b, socket: 0 }, c, 0);
    assert!(!tree.is_output_linked(a, 0));
    assert!(tree.is_output_linked(b, 0));
    assert_eq!(tree.link_count(), 1);
}

#[test]
fn socket_types_fold_scalars_into_float() {
    for (json, ty) in [
        ("\"value\"", SocketType::Float),
        ("\"int\"", SocketType::Float),
        ("\"rgba\"", SocketType::Color),
        ("\"shader\"", SocketType::Shader),
        ("\"geometry\"", SocketType::Other),
    ] {
        let de: SocketType = serde_json::from_str(json).unwrap();
        assert_eq!(de, ty, "{json}");
    }
    assert_eq!(SocketType::Float.category(), Some(Category::Value));
    assert_eq!(SocketType::Other.category(), None);
}

#[test]
fn graph_key_differs_per_tree() {
    let a = small_tree();
    let b = small_tree();
    assert_ne!(a.graph_key(), b.graph_key());
    assert_eq!(a.graph_key(), a.graph_key());
}
