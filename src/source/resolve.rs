//! Boundary model to in-memory graphs.
//!
//! Assumes the document already passed schema validation; anything still inconsistent here is a
//! graph error rather than a panic.

use crate::foundation::core::{Rgba, Uv, Vec3};
use crate::foundation::error::{ShadeError, ShadeResult};
use crate::foundation::math::Matrix4;
use crate::source::graph::{
    ImageRef, Link, NodeProps, NodeTree, Ramp, RampStop, Socket, SocketType, SocketValue,
    SourceNode,
};
use crate::source::kind::SourceNodeKind;
use crate::source::model::{
    NodeDef, NodeTreeDef, ObjectDef, ObjectKindDef, SceneDef, SocketDef, SocketValueDef,
};
use crate::source::scene::{
    CameraData, DepthOfField, FocusTarget, MeshData, ObjectData, Polygon, RenderSettings,
    SourceMaterial, SourceObject, SourceScene,
};
use crate::source::validate::group_refs;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

const DEFAULT_FOCUS_DISTANCE: f32 = 10.0;

pub(crate) fn resolve_scene(def: &SceneDef) -> ShadeResult<SourceScene> {
    let groups = resolve_groups(&def.groups)?;

    let mut materials = BTreeMap::new();
    for (name, mat) in &def.materials {
        let tree = mat
            .node_tree
            .as_ref()
            .map(|t| resolve_tree(name, t, &groups))
            .transpose()?;
        materials.insert(
            name.clone(),
            SourceMaterial {
                name: name.clone(),
                use_nodes: mat.use_nodes,
                tree,
            },
        );
    }

    let world = def
        .world
        .as_ref()
        .map(|t| resolve_tree("World", t, &groups))
        .transpose()?;

    let objects = def.objects.iter().map(resolve_object).collect::<ShadeResult<_>>()?;

    Ok(SourceScene {
        groups,
        materials,
        world,
        objects,
        render: RenderSettings {
            resolution_x: def.render.resolution_x,
            resolution_y: def.render.resolution_y,
            resolution_percentage: def.render.resolution_percentage,
        },
    })
}

/// Builds every group body after the groups it references.
pub(crate) fn resolve_groups(
    defs: &BTreeMap<String, NodeTreeDef>,
) -> ShadeResult<BTreeMap<String, Arc<NodeTree>>> {
    fn visit<'a>(
        key: &'a str,
        defs: &'a BTreeMap<String, NodeTreeDef>,
        active: &mut HashSet<&'a str>,
        out: &mut BTreeMap<String, Arc<NodeTree>>,
    ) -> ShadeResult<()> {
        if out.contains_key(key) {
            return Ok(());
        }
        let def = defs
            .get(key)
            .ok_or_else(|| ShadeError::graph(format!("unknown group '{key}'")))?;
        if !active.insert(key) {
            return Err(ShadeError::graph(format!(
                "group '{key}' references itself"
            )));
        }
        for dep in group_refs(def) {
            visit(dep, defs, active, out)?;
        }
        active.remove(key);
        let tree = resolve_tree(key, def, out)?;
        out.insert(key.to_owned(), Arc::new(tree));
        Ok(())
    }

    let mut out = BTreeMap::new();
    let mut active = HashSet::new();
    for key in defs.keys() {
        visit(key, defs, &mut active, &mut out)?;
    }
    Ok(out)
}

pub(crate) fn resolve_tree(
    name: &str,
    def: &NodeTreeDef,
    groups: &BTreeMap<String, Arc<NodeTree>>,
) -> ShadeResult<NodeTree> {
    let mut tree = NodeTree::new(name);
    for node in &def.nodes {
        if tree.node_by_name(&node.name).is_some() {
            return Err(ShadeError::graph(format!(
                "tree '{name}': duplicate node '{}'",
                node.name
            )));
        }
        tree.push_node(resolve_node(node, groups)?);
    }

    for link in &def.links {
        let endpoint = |node: &str| {
            tree.node_by_name(node).ok_or_else(|| {
                ShadeError::graph(format!("tree '{name}': link references unknown node '{node}'"))
            })
        };
        let from = endpoint(&link.from_node)?;
        let to = endpoint(&link.to_node)?;

        let from_def = &def.nodes[from.index()];
        let to_def = &def.nodes[to.index()];
        let from_socket = link.from_socket.resolve(&from_def.outputs).ok_or_else(|| {
            ShadeError::graph(format!(
                "tree '{name}': node '{}' has no output {:?}",
                from_def.name, link.from_socket
            ))
        })?;
        let to_socket = link.to_socket.resolve(&to_def.inputs).ok_or_else(|| {
            ShadeError::graph(format!(
                "tree '{name}': node '{}' has no input {:?}",
                to_def.name, link.to_socket
            ))
        })?;

        tree.push_link(
            Link {
                node: from,
                socket: from_socket,
            },
            to,
            to_socket,
        );
    }
    Ok(tree)
}

fn resolve_node(def: &NodeDef, groups: &BTreeMap<String, Arc<NodeTree>>) -> ShadeResult<SourceNode> {
    let kind = SourceNodeKind::from_tag(&def.tag);
    let group = match (kind, def.group.as_deref()) {
        (SourceNodeKind::Group, Some(key)) => Some(
            groups
                .get(key)
                .cloned()
                .ok_or_else(|| ShadeError::graph(format!("unknown group '{key}'")))?,
        ),
        _ => None,
    };

    Ok(SourceNode {
        name: def.name.clone(),
        tag: def.tag.clone(),
        kind,
        inputs: def.inputs.iter().map(resolve_socket).collect(),
        outputs: def.outputs.iter().map(resolve_socket).collect(),
        props: NodeProps {
            operation: def.operation.clone(),
            data_type: def.data_type.clone(),
            mode: def.mode.clone(),
            image: def.image.as_ref().map(|i| ImageRef {
                path: i.path.clone(),
                color_space: i.color_space.clone(),
                interpolation: i.interpolation.clone(),
            }),
            ramp: def.ramp.as_ref().map(|r| Ramp {
                color_mode: r.color_mode.clone(),
                interpolation: r.interpolation.clone(),
                elements: r
                    .elements
                    .iter()
                    .map(|e| RampStop {
                        color: Rgba::from_array(e.color),
                        position: e.position,
                    })
                    .collect(),
            }),
        },
        group,
    })
}

fn resolve_socket(def: &SocketDef) -> Socket {
    Socket::new(def.name.clone(), def.ty, socket_default(def.ty, def.default))
}

/// Normalizes a JSON default to the shape the socket type expects.
pub(crate) fn socket_default(ty: SocketType, v: Option<SocketValueDef>) -> SocketValue {
    let Some(v) = v else {
        return SocketValue::None;
    };
    match (ty, v) {
        (SocketType::Float, SocketValueDef::Float(f)) => SocketValue::Float(f),
        (SocketType::Float, SocketValueDef::Vec3([x, ..]) | SocketValueDef::Rgba([x, ..])) => {
            SocketValue::Float(f64::from(x))
        }
        (SocketType::Color, SocketValueDef::Rgba(c)) => SocketValue::Color(Rgba::from_array(c)),
        (SocketType::Color, SocketValueDef::Vec3([r, g, b])) => {
            SocketValue::Color(Rgba::new(r, g, b, 1.0))
        }
        (SocketType::Color, SocketValueDef::Float(f)) => {
            let f = f as f32;
            SocketValue::Color(Rgba::new(f, f, f, 1.0))
        }
        (SocketType::Vector, SocketValueDef::Vec3(v)) => SocketValue::Vector(Vec3::from_array(v)),
        (SocketType::Vector, SocketValueDef::Rgba([x, y, z, _])) => {
            SocketValue::Vector(Vec3::new(x, y, z))
        }
        (SocketType::Vector, SocketValueDef::Float(f)) => {
            let f = f as f32;
            SocketValue::Vector(Vec3::new(f, f, f))
        }
        (SocketType::Shader | SocketType::Other, _) => SocketValue::None,
    }
}

fn resolve_object(def: &ObjectDef) -> ShadeResult<SourceObject> {
    let transform = Matrix4::from_rows(def.matrix_world, def.matrix_layout);
    let data = match def.kind {
        ObjectKindDef::Mesh => {
            let m = def.mesh.as_ref().ok_or_else(|| {
                ShadeError::scene(format!("mesh object '{}' has no mesh data", def.name))
            })?;
            ObjectData::Mesh(MeshData {
                vertices: m.vertices.iter().copied().map(Vec3::from_array).collect(),
                polygons: m
                    .polygons
                    .iter()
                    .map(|p| Polygon {
                        vertices: p.vertices.clone(),
                        material_index: p.material_index,
                    })
                    .collect(),
                corner_normals: m.corner_normals.iter().copied().map(Vec3::from_array).collect(),
                uvs: m.uvs.iter().map(|[u, v]| Uv::new(*u, *v)).collect(),
                materials: m.materials.clone(),
                instances: m
                    .instances
                    .iter()
                    .map(|rows| Matrix4::from_rows(*rows, def.matrix_layout))
                    .collect(),
                show_instancer: m.show_instancer,
            })
        }
        ObjectKindDef::Camera => {
            let c = def.camera.as_ref().ok_or_else(|| {
                ShadeError::scene(format!("camera object '{}' has no camera data", def.name))
            })?;
            ObjectData::Camera(CameraData {
                fov_radians: c.angle,
                dof: c.dof.as_ref().map(|d| DepthOfField {
                    fstops: d.fstop,
                    focus: match &d.focus_object {
                        Some(target) => FocusTarget::Object(target.clone()),
                        None => FocusTarget::Distance(
                            d.focus_distance.unwrap_or(DEFAULT_FOCUS_DISTANCE),
                        ),
                    },
                }),
            })
        }
        ObjectKindDef::Other => ObjectData::Other,
    };

    Ok(SourceObject {
        name: def.name.clone(),
        transform,
        data,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/source/resolve.rs"]
mod tests;
