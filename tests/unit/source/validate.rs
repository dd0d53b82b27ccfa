use super::*;

fn scene(json: &str) -> SceneDef {
    serde_json::from_str(json).unwrap()
}

fn messages(def: &SceneDef) -> Vec<String> {
    match validate_scene(def) {
        Ok(()) => Vec::new(),
        Err(e) => e.errors.iter().map(ToString::to_string).collect(),
    }
}

#[test]
fn empty_scene_is_valid() {
    assert!(validate_scene(&scene("{}")).is_ok());
}

#[test]
fn reports_every_error_with_its_path() {
    let def = scene(
        r#"{
            "materials": {
                "Mat": {
                    "node_tree": {
                        "nodes": [
                            {"name": "A", "type": "ShaderNodeRGB", "outputs": [{"name": "Color", "type": "color"}]},
                            {"name": "A", "type": "ShaderNodeRGB"}
                        ],
                        "links": [
                            {"from_node": "A", "from_socket": "Nope", "to_node": "Ghost", "to_socket": 0}
                        ]
                    }
                }
            },
            "render": {"resolution_x": 0}
        }"#,
    );
    let msgs = messages(&def);
    assert_eq!(msgs.len(), 4, "{msgs:#?}");
    assert!(msgs.contains(
        &"$.materials[\"Mat\"].node_tree.nodes[1]: duplicate node name 'A'".to_owned()
    ));
    assert!(msgs.iter().any(|m| m.starts_with("$.materials[\"Mat\"].node_tree.links[0]: node 'A' has no output")));
    assert!(msgs.iter().any(|m| m.ends_with("unknown target node 'Ghost'")));
    assert!(msgs.contains(&"$.render: resolution must be non-zero".to_owned()));
}

#[test]
fn group_nodes_need_a_known_group() {
    let def = scene(
        r#"{
            "world": {
                "nodes": [
                    {"name": "G1", "type": "ShaderNodeGroup"},
                    {"name": "G2", "type": "ShaderNodeGroup", "group": "Missing"}
                ]
            }
        }"#,
    );
    let msgs = messages(&def);
    assert_eq!(
        msgs,
        vec![
            "$.world.nodes[0]: group node without a group key".to_owned(),
            "$.world.nodes[1]: unknown group 'Missing'".to_owned(),
        ]
    );
}

#[test]
fn recursive_groups_are_rejected() {
    let def = scene(
        r#"{
            "groups": {
                "A": {"nodes": [{"name": "g", "type": "ShaderNodeGroup", "group": "B"}]},
                "B": {"nodes": [{"name": "g", "type": "ShaderNodeGroup", "group": "A"}]}
            }
        }"#,
    );
    let msgs = messages(&def);
    assert_eq!(msgs, vec!["$.groups: recursive group reference: A -> B -> A".to_owned()]);
}

#[test]
fn nested_groups_without_a_loop_pass() {
    let def = scene(
        r#"{
            "groups": {
                "Inner": {"nodes": []},
                "Outer": {"nodes": [{"name": "g", "type": "ShaderNodeGroup", "group": "Inner"}]}
            }
        }"#,
    );
    assert!(validate_scene(&def).is_ok());
}

#[test]
fn object_checks() {
    let def = scene(
        r#"{
            "objects": [
                {"name": "Cam", "type": "camera", "camera": {"angle": 0.0, "dof": {"fstop": 2.8, "focus_object": "Nowhere"}}},
                {"name": "Cube", "type": "mesh"},
                {"name": "Cube", "type": "empty"}
            ],
            "render": {"resolution_percentage": 0}
        }"#,
    );
    let msgs = messages(&def);
    assert_eq!(
        msgs,
        vec![
            "$.objects[0]: camera angle must be > 0".to_owned(),
            "$.objects[0]: unknown focus object 'Nowhere'".to_owned(),
            "$.objects[1]: mesh object without mesh data".to_owned(),
            "$.objects[2]: duplicate object name 'Cube'".to_owned(),
            "$.render.resolution_percentage: resolution_percentage must be > 0".to_owned(),
        ]
    );
}

#[test]
fn group_refs_lists_only_group_nodes() {
    let def = scene(
        r#"{
            "world": {
                "nodes": [
                    {"name": "a", "type": "ShaderNodeGroup", "group": "X"},
                    {"name": "b", "type": "ShaderNodeRGB", "group": "Y"}
                ]
            }
        }"#,
    );
    let world = def.world.as_ref().unwrap();
    assert_eq!(group_refs(world).collect::<Vec<_>>(), vec!["X"]);
}
