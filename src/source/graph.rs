use crate::foundation::core::{Rgba, Vec3};
use crate::ir::Category;
use crate::source::kind::SourceNodeKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Index of a node inside one [`ShaderGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Declared type of a socket.
///
/// Integer, boolean and factor sockets carry plain scalars and fold into `Float`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocketType {
    Shader,
    #[serde(alias = "rgba")]
    Color,
    Vector,
    #[serde(alias = "value", alias = "factor", alias = "int", alias = "bool")]
    Float,
    #[serde(other)]
    Other,
}

impl SocketType {
    /// Category a value on this socket naturally translates to.
    pub fn category(self) -> Option<Category> {
        match self {
            Self::Shader => Some(Category::Shader),
            Self::Color => Some(Category::Color),
            Self::Vector => Some(Category::Vector),
            Self::Float => Some(Category::Value),
            Self::Other => None,
        }
    }
}

/// Unlinked default carried by a socket.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SocketValue {
    None,
    Float(f64),
    Vector(Vec3),
    Color(Rgba),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Socket {
    pub name: String,
    pub ty: SocketType,
    pub default: SocketValue,
}

impl Socket {
    pub fn new(name: impl Into<String>, ty: SocketType, default: SocketValue) -> Self {
        Self {
            name: name.into(),
            ty,
            default,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ImageRef {
    pub path: String,
    pub color_space: Option<String>,
    pub interpolation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RampStop {
    pub color: Rgba,
    pub position: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ramp {
    pub color_mode: String,
    pub interpolation: String,
    pub elements: Vec<RampStop>,
}

/// Per-node settings that are not sockets.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NodeProps {
    pub operation: Option<String>,
    pub data_type: Option<String>,
    pub mode: Option<String>,
    pub image: Option<ImageRef>,
    pub ramp: Option<Ramp>,
}

/// Producer end of a link: which node and which of its output sockets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Link {
    pub node: NodeId,
    pub socket: usize,
}

/// Read-only view of a DCC node graph.
///
/// The translator only talks to this trait, so a host can expose its native graph without copying
/// it into a [`NodeTree`].
pub trait ShaderGraph {
    fn name(&self) -> &str;

    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_;

    fn kind(&self, node: NodeId) -> SourceNodeKind;

    /// Raw type tag as the DCC reports it.
    fn tag(&self, node: NodeId) -> &str;

    fn node_name(&self, node: NodeId) -> &str;

    fn inputs(&self, node: NodeId) -> &[Socket];

    fn outputs(&self, node: NodeId) -> &[Socket];

    fn props(&self, node: NodeId) -> &NodeProps;

    /// Producer feeding input socket `input` of `node`, if linked.
    fn link(&self, node: NodeId, input: usize) -> Option<Link>;

    fn is_output_linked(&self, node: NodeId, output: usize) -> bool;

    /// Body of a group node, if it references a known group.
    fn group_body(&self, node: NodeId) -> Option<&Self>;

    /// Stable identity used to key per-graph state such as cycle detection.
    fn graph_key(&self) -> usize {
        std::ptr::from_ref(self).cast::<u8>() as usize
    }

    fn find_kind(&self, kind: SourceNodeKind) -> Option<NodeId> {
        self.nodes().find(|&n| self.kind(n) == kind)
    }

    fn input_index(&self, node: NodeId, name: &str) -> Option<usize> {
        self.inputs(node).iter().position(|s| s.name == name)
    }

    fn output_index(&self, node: NodeId, name: &str) -> Option<usize> {
        self.outputs(node).iter().position(|s| s.name == name)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct SourceNode {
    pub(crate) name: String,
    pub(crate) tag: String,
    pub(crate) kind: SourceNodeKind,
    pub(crate) inputs: Vec<Socket>,
    pub(crate) outputs: Vec<Socket>,
    pub(crate) props: NodeProps,
    pub(crate) group: Option<Arc<NodeTree>>,
}

/// In-memory node graph with resolved links and group bodies.
#[derive(Clone, Debug, Default)]
pub struct NodeTree {
    name: String,
    nodes: Vec<SourceNode>,
    by_name: HashMap<String, NodeId>,
    links: HashMap<(NodeId, usize), Link>,
    linked_outputs: HashMap<(NodeId, usize), usize>,
}

impl NodeTree {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub(crate) fn push_node(&mut self, node: SourceNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.by_name.insert(node.name.clone(), id);
        self.nodes.push(node);
        id
    }

    /// Links `from.socket` into input `to_input` of `to`. A later link into the same input replaces
    /// the earlier one.
    pub(crate) fn push_link(&mut self, from: Link, to: NodeId, to_input: usize) {
        if let Some(prev) = self.links.insert((to, to_input), from) {
            if let Some(n) = self.linked_outputs.get_mut(&(prev.node, prev.socket)) {
                *n -= 1;
                if *n == 0 {
                    self.linked_outputs.remove(&(prev.node, prev.socket));
                }
            }
        }
        *self
            .linked_outputs
            .entry((from.node, from.socket))
            .or_insert(0) += 1;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    fn node(&self, id: NodeId) -> &SourceNode {
        &self.nodes[id.index()]
    }
}

impl ShaderGraph for NodeTree {
    fn name(&self) -> &str {
        &self.name
    }

    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    fn kind(&self, node: NodeId) -> SourceNodeKind {
        self.node(node).kind
    }

    fn tag(&self, node: NodeId) -> &str {
        &self.node(node).tag
    }

    fn node_name(&self, node: NodeId) -> &str {
        &self.node(node).name
    }

    fn inputs(&self, node: NodeId) -> &[Socket] {
        &self.node(node).inputs
    }

    fn outputs(&self, node: NodeId) -> &[Socket] {
        &self.node(node).outputs
    }

    fn props(&self, node: NodeId) -> &NodeProps {
        &self.node(node).props
    }

    fn link(&self, node: NodeId, input: usize) -> Option<Link> {
        self.links.get(&(node, input)).copied()
    }

    fn is_output_linked(&self, node: NodeId, output: usize) -> bool {
        self.linked_outputs.contains_key(&(node, output))
    }

    fn group_body(&self, node: NodeId) -> Option<&Self> {
        self.node(node).group.as_deref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/graph.rs"]
mod tests;
