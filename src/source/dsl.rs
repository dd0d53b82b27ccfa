use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    foundation::core::{Rgba, Vec3},
    foundation::error::{ShadeError, ShadeResult},
    source::graph::{NodeTree, RampStop, SocketType},
    source::model::{
        ImageDef, LinkDef, NodeDef, NodeTreeDef, RampDef, RampElementDef, SocketDef, SocketKeyDef,
        SocketValueDef,
    },
    source::resolve::resolve_tree,
};

/// Socket address for [`TreeBuilder::link`]: a position or a name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SocketKey {
    Index(usize),
    Name(String),
}

impl From<usize> for SocketKey {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

impl From<&str> for SocketKey {
    fn from(s: &str) -> Self {
        Self::Name(s.to_owned())
    }
}

impl From<String> for SocketKey {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

impl From<SocketKey> for SocketKeyDef {
    fn from(k: SocketKey) -> Self {
        match k {
            SocketKey::Index(i) => Self::Index(i),
            SocketKey::Name(n) => Self::Name(n),
        }
    }
}

/// Builder for a [`NodeTree`].
pub struct TreeBuilder {
    name: String,
    def: NodeTreeDef,
    groups: BTreeMap<String, Arc<NodeTree>>,
}

impl TreeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            def: NodeTreeDef::default(),
            groups: BTreeMap::new(),
        }
    }

    /// Add a node under a unique name.
    pub fn node(mut self, node: NodeBuilder) -> ShadeResult<Self> {
        if self.def.nodes.iter().any(|n| n.name == node.def.name) {
            return Err(ShadeError::validation(format!(
                "duplicate node name '{}'",
                node.def.name
            )));
        }
        self.def.nodes.push(node.def);
        Ok(self)
    }

    /// Link output `from_socket` of `from` into input `to_socket` of `to`.
    pub fn link(
        mut self,
        from: impl Into<String>,
        from_socket: impl Into<SocketKey>,
        to: impl Into<String>,
        to_socket: impl Into<SocketKey>,
    ) -> Self {
        self.def.links.push(LinkDef {
            from_node: from.into(),
            from_socket: from_socket.into().into(),
            to_node: to.into(),
            to_socket: to_socket.into().into(),
        });
        self
    }

    /// Make a group body available to group nodes that name `key`.
    pub fn group(mut self, key: impl Into<String>, body: Arc<NodeTree>) -> Self {
        self.groups.insert(key.into(), body);
        self
    }

    /// Resolve links and group references into a [`NodeTree`].
    pub fn build(self) -> ShadeResult<NodeTree> {
        resolve_tree(&self.name, &self.def, &self.groups)
    }
}

/// Builder for one source node.
#[derive(Clone, Debug)]
pub struct NodeBuilder {
    def: NodeDef,
}

impl NodeBuilder {
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            def: NodeDef {
                name: name.into(),
                tag: tag.into(),
                inputs: Vec::new(),
                outputs: Vec::new(),
                operation: None,
                data_type: None,
                mode: None,
                image: None,
                ramp: None,
                group: None,
            },
        }
    }

    fn socket(name: impl Into<String>, ty: SocketType, default: Option<SocketValueDef>) -> SocketDef {
        SocketDef {
            name: name.into(),
            ty,
            default,
        }
    }

    pub fn input(mut self, name: impl Into<String>, ty: SocketType) -> Self {
        self.def.inputs.push(Self::socket(name, ty, None));
        self
    }

    pub fn input_float(mut self, name: impl Into<String>, v: f64) -> Self {
        self.def.inputs.push(Self::socket(
            name,
            SocketType::Float,
            Some(SocketValueDef::Float(v)),
        ));
        self
    }

    pub fn input_color(mut self, name: impl Into<String>, c: Rgba) -> Self {
        self.def.inputs.push(Self::socket(
            name,
            SocketType::Color,
            Some(SocketValueDef::Rgba(c.to_array())),
        ));
        self
    }

    pub fn input_vector(mut self, name: impl Into<String>, v: Vec3) -> Self {
        self.def.inputs.push(Self::socket(
            name,
            SocketType::Vector,
            Some(SocketValueDef::Vec3(v.to_array())),
        ));
        self
    }

    pub fn output(mut self, name: impl Into<String>, ty: SocketType) -> Self {
        self.def.outputs.push(Self::socket(name, ty, None));
        self
    }

    /// Output carrying a constant, as on value and RGB nodes.
    pub fn output_float(mut self, name: impl Into<String>, v: f64) -> Self {
        self.def.outputs.push(Self::socket(
            name,
            SocketType::Float,
            Some(SocketValueDef::Float(v)),
        ));
        self
    }

    pub fn output_color(mut self, name: impl Into<String>, c: Rgba) -> Self {
        self.def.outputs.push(Self::socket(
            name,
            SocketType::Color,
            Some(SocketValueDef::Rgba(c.to_array())),
        ));
        self
    }

    pub fn operation(mut self, op: impl Into<String>) -> Self {
        self.def.operation = Some(op.into());
        self
    }

    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.def.data_type = Some(data_type.into());
        self
    }

    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.def.mode = Some(mode.into());
        self
    }

    pub fn image(
        mut self,
        path: impl Into<String>,
        color_space: Option<&str>,
        interpolation: Option<&str>,
    ) -> Self {
        self.def.image = Some(ImageDef {
            path: path.into(),
            color_space: color_space.map(str::to_owned),
            interpolation: interpolation.map(str::to_owned),
        });
        self
    }

    pub fn ramp(
        mut self,
        color_mode: impl Into<String>,
        interpolation: impl Into<String>,
        elements: impl IntoIterator<Item = RampStop>,
    ) -> Self {
        self.def.ramp = Some(RampDef {
            color_mode: color_mode.into(),
            interpolation: interpolation.into(),
            elements: elements
                .into_iter()
                .map(|e| RampElementDef {
                    color: e.color.to_array(),
                    position: e.position,
                })
                .collect(),
        });
        self
    }

    /// Reference a group body registered with [`TreeBuilder::group`].
    pub fn group(mut self, key: impl Into<String>) -> Self {
        self.def.group = Some(key.into());
        self
    }
}

/// Material output with the usual Surface, Volume and Displacement inputs.
pub fn material_output(name: impl Into<String>) -> NodeBuilder {
    NodeBuilder::new(name, "ShaderNodeOutputMaterial")
        .input("Surface", SocketType::Shader)
        .input("Volume", SocketType::Shader)
        .input_vector("Displacement", Vec3::ZERO)
}

pub fn world_output(name: impl Into<String>) -> NodeBuilder {
    NodeBuilder::new(name, "ShaderNodeOutputWorld")
        .input("Surface", SocketType::Shader)
        .input("Volume", SocketType::Shader)
}

pub fn diffuse_bsdf(name: impl Into<String>, color: Rgba) -> NodeBuilder {
    NodeBuilder::new(name, "ShaderNodeBsdfDiffuse")
        .input_color("Color", color)
        .input_float("Roughness", 0.0)
        .input_vector("Normal", Vec3::ZERO)
        .output("BSDF", SocketType::Shader)
}

pub fn emission(name: impl Into<String>, color: Rgba, strength: f64) -> NodeBuilder {
    NodeBuilder::new(name, "ShaderNodeEmission")
        .input_color("Color", color)
        .input_float("Strength", strength)
        .output("Emission", SocketType::Shader)
}

pub fn background(name: impl Into<String>, color: Rgba, strength: f64) -> NodeBuilder {
    NodeBuilder::new(name, "ShaderNodeBackground")
        .input_color("Color", color)
        .input_float("Strength", strength)
        .output("Background", SocketType::Shader)
}

pub fn mix_shader(name: impl Into<String>, fac: f64) -> NodeBuilder {
    NodeBuilder::new(name, "ShaderNodeMixShader")
        .input_float("Fac", fac)
        .input("Shader", SocketType::Shader)
        .input("Shader", SocketType::Shader)
        .output("Shader", SocketType::Shader)
}

pub fn rgb(name: impl Into<String>, color: Rgba) -> NodeBuilder {
    NodeBuilder::new(name, "ShaderNodeRGB").output_color("Color", color)
}

pub fn value(name: impl Into<String>, v: f64) -> NodeBuilder {
    NodeBuilder::new(name, "ShaderNodeValue").output_float("Value", v)
}

pub fn math(name: impl Into<String>, op: impl Into<String>, a: f64, b: f64) -> NodeBuilder {
    NodeBuilder::new(name, "ShaderNodeMath")
        .operation(op)
        .input_float("Value", a)
        .input_float("Value", b)
        .input_float("Value", 0.5)
        .output("Value", SocketType::Float)
}

pub fn image_texture(name: impl Into<String>) -> NodeBuilder {
    NodeBuilder::new(name, "ShaderNodeTexImage")
        .input("Vector", SocketType::Vector)
        .output("Color", SocketType::Color)
        .output("Alpha", SocketType::Float)
}

pub fn checker_texture(name: impl Into<String>, a: Rgba, b: Rgba, scale: f64) -> NodeBuilder {
    NodeBuilder::new(name, "ShaderNodeTexChecker")
        .input("Vector", SocketType::Vector)
        .input_color("Color1", a)
        .input_color("Color2", b)
        .input_float("Scale", scale)
        .output("Color", SocketType::Color)
        .output("Fac", SocketType::Float)
}

pub fn reroute(name: impl Into<String>, ty: SocketType) -> NodeBuilder {
    NodeBuilder::new(name, "NodeReroute")
        .input("Input", ty)
        .output("Output", ty)
}

#[cfg(test)]
#[path = "../../tests/unit/source/dsl.rs"]
mod tests;
