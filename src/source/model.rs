use crate::foundation::math::MatrixLayout;
use crate::source::graph::SocketType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub(crate) const IDENTITY_ROWS: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

fn default_true() -> bool {
    true
}

fn default_identity() -> [[f32; 4]; 4] {
    IDENTITY_ROWS
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct SceneDef {
    /// Node group library, keyed by group name.
    #[serde(default)]
    pub(crate) groups: BTreeMap<String, NodeTreeDef>,
    #[serde(default)]
    pub(crate) materials: BTreeMap<String, MaterialDef>,
    #[serde(default)]
    pub(crate) world: Option<NodeTreeDef>,
    #[serde(default)]
    pub(crate) objects: Vec<ObjectDef>,
    #[serde(default)]
    pub(crate) render: RenderDef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MaterialDef {
    #[serde(default = "default_true")]
    pub(crate) use_nodes: bool,
    #[serde(default)]
    pub(crate) node_tree: Option<NodeTreeDef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct NodeTreeDef {
    #[serde(default)]
    pub(crate) nodes: Vec<NodeDef>,
    #[serde(default)]
    pub(crate) links: Vec<LinkDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct NodeDef {
    pub(crate) name: String,
    #[serde(rename = "type")]
    pub(crate) tag: String,
    #[serde(default)]
    pub(crate) inputs: Vec<SocketDef>,
    #[serde(default)]
    pub(crate) outputs: Vec<SocketDef>,
    #[serde(default)]
    pub(crate) operation: Option<String>,
    #[serde(default)]
    pub(crate) data_type: Option<String>,
    #[serde(default)]
    pub(crate) mode: Option<String>,
    #[serde(default)]
    pub(crate) image: Option<ImageDef>,
    #[serde(default)]
    pub(crate) ramp: Option<RampDef>,
    /// Key into [`SceneDef::groups`] for group nodes.
    #[serde(default)]
    pub(crate) group: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SocketDef {
    pub(crate) name: String,
    #[serde(rename = "type")]
    pub(crate) ty: SocketType,
    #[serde(default)]
    pub(crate) default: Option<SocketValueDef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum SocketValueDef {
    Float(f64),
    Vec3([f32; 3]),
    Rgba([f32; 4]),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ImageDef {
    pub(crate) path: String,
    #[serde(default)]
    pub(crate) color_space: Option<String>,
    #[serde(default)]
    pub(crate) interpolation: Option<String>,
}

fn default_color_mode() -> String {
    "RGB".to_owned()
}

fn default_ramp_interpolation() -> String {
    "LINEAR".to_owned()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RampDef {
    #[serde(default = "default_color_mode")]
    pub(crate) color_mode: String,
    #[serde(default = "default_ramp_interpolation")]
    pub(crate) interpolation: String,
    #[serde(default)]
    pub(crate) elements: Vec<RampElementDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct RampElementDef {
    pub(crate) color: [f32; 4],
    pub(crate) position: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LinkDef {
    pub(crate) from_node: String,
    pub(crate) from_socket: SocketKeyDef,
    pub(crate) to_node: String,
    pub(crate) to_socket: SocketKeyDef,
}

/// Sockets are addressed by position or by name; names pick the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum SocketKeyDef {
    Index(usize),
    Name(String),
}

impl SocketKeyDef {
    pub(crate) fn resolve(&self, sockets: &[SocketDef]) -> Option<usize> {
        match self {
            Self::Index(i) => (*i < sockets.len()).then_some(*i),
            Self::Name(n) => sockets.iter().position(|s| &s.name == n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ObjectKindDef {
    Mesh,
    Camera,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ObjectDef {
    pub(crate) name: String,
    #[serde(rename = "type")]
    pub(crate) kind: ObjectKindDef,
    #[serde(default = "default_identity")]
    pub(crate) matrix_world: [[f32; 4]; 4],
    #[serde(default)]
    pub(crate) matrix_layout: MatrixLayout,
    #[serde(default)]
    pub(crate) mesh: Option<MeshDef>,
    #[serde(default)]
    pub(crate) camera: Option<CameraDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MeshDef {
    #[serde(default)]
    pub(crate) vertices: Vec<[f32; 3]>,
    #[serde(default)]
    pub(crate) polygons: Vec<PolygonDef>,
    /// One normal per polygon corner, in polygon order.
    #[serde(default)]
    pub(crate) corner_normals: Vec<[f32; 3]>,
    /// One texture coordinate per polygon corner, in polygon order.
    #[serde(default)]
    pub(crate) uvs: Vec<[f32; 2]>,
    /// Material slots; `null` is an empty slot.
    #[serde(default)]
    pub(crate) materials: Vec<Option<String>>,
    /// Extra world placements produced by duplication.
    #[serde(default)]
    pub(crate) instances: Vec<[[f32; 4]; 4]>,
    #[serde(default = "default_true")]
    pub(crate) show_instancer: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PolygonDef {
    pub(crate) vertices: Vec<u32>,
    #[serde(default)]
    pub(crate) material_index: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CameraDef {
    /// Field of view in radians.
    pub(crate) angle: f32,
    #[serde(default)]
    pub(crate) dof: Option<DofDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct DofDef {
    pub(crate) fstop: f32,
    #[serde(default)]
    pub(crate) focus_distance: Option<f32>,
    #[serde(default)]
    pub(crate) focus_object: Option<String>,
}

fn default_resolution_x() -> u32 {
    1920
}

fn default_resolution_y() -> u32 {
    1080
}

fn default_percentage() -> u32 {
    100
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct RenderDef {
    #[serde(default = "default_resolution_x")]
    pub(crate) resolution_x: u32,
    #[serde(default = "default_resolution_y")]
    pub(crate) resolution_y: u32,
    #[serde(default = "default_percentage")]
    pub(crate) resolution_percentage: u32,
}

impl Default for RenderDef {
    fn default() -> Self {
        Self {
            resolution_x: default_resolution_x(),
            resolution_y: default_resolution_y(),
            resolution_percentage: default_percentage(),
        }
    }
}
