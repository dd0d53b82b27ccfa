//! Source node graph to render IR.
//!
//! Four mutually recursive procedures, one per IR category, walk the graph from an input socket
//! towards its producers. Every input goes through [`Translator::translate_input`], which handles
//! literals, group parameters, reroutes, group inlining, unknown producers and cross-category
//! coercion in one place. Nothing here fails hard: unresolved paths report a diagnostic and yield a
//! [`FallbackPolicy`] constant.

mod coerce;
mod color;
pub mod fallback;
mod shader;
mod value;
mod vector;

use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::foundation::core::{Rgba, Vec3};
use crate::ir::color::{ColorNode, ColorRef};
use crate::ir::shader::ShaderRef;
use crate::ir::value::{ValueNode, ValueRef};
use crate::ir::vector::{VectorNode, VectorRef};
use crate::ir::{AnyNode, Category};
use crate::source::graph::{Link, NodeId, ShaderGraph, Socket, SocketType, SocketValue};
use crate::source::kind::SourceNodeKind;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub use fallback::FallbackPolicy;

/// Translator limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateOpts {
    /// Deepest producer chain followed before giving up on a path.
    pub max_depth: usize,
}

impl Default for TranslateOpts {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}

/// Group parameters visible inside an inlined group body, keyed by formal input name.
pub type Bindings = HashMap<String, AnyNode>;

/// Graph being read plus the group parameters bound by the enclosing group node, if any.
pub struct Scope<'g, G: ShaderGraph> {
    graph: &'g G,
    bindings: Option<&'g Bindings>,
}

impl<'g, G: ShaderGraph> Scope<'g, G> {
    /// Top-level scope of a material or world tree.
    pub fn root(graph: &'g G) -> Self {
        Self {
            graph,
            bindings: None,
        }
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    pub fn binding(&self, name: &str) -> Option<&'g AnyNode> {
        self.bindings.and_then(|b| b.get(name))
    }
}

/// Stateful graph walker. Collects diagnostics across calls until they are taken.
pub struct Translator<'p> {
    policy: &'p FallbackPolicy,
    opts: TranslateOpts,
    diags: Diagnostics,
    active: HashSet<(usize, NodeId)>,
    depth: usize,
}

impl<'p> Translator<'p> {
    pub fn new(policy: &'p FallbackPolicy, opts: TranslateOpts) -> Self {
        Self {
            policy,
            opts,
            diags: Diagnostics::new(),
            active: HashSet::new(),
            depth: 0,
        }
    }

    pub fn policy(&self) -> &'p FallbackPolicy {
        self.policy
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diags
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diags.take()
    }

    /// Root shader of a material tree.
    ///
    /// `None` when the tree is empty or has no material output; the shared default surface when
    /// the output's surface input is unlinked.
    pub fn translate_material<G: ShaderGraph>(&mut self, graph: &G) -> Option<ShaderRef> {
        let out = graph.find_kind(SourceNodeKind::MaterialOutput)?;
        let scope = Scope::root(graph);
        match surface_input(graph, out) {
            Some(idx) if graph.link(out, idx).is_some() => {
                Some(self.translate_shader(&scope, out, idx))
            }
            _ => Some(self.policy.default_surface.clone()),
        }
    }

    /// Root shader of a world tree; `None` unless a world output has a linked surface.
    pub fn translate_background<G: ShaderGraph>(&mut self, graph: &G) -> Option<ShaderRef> {
        let out = graph.find_kind(SourceNodeKind::WorldOutput)?;
        let idx = surface_input(graph, out)?;
        graph.link(out, idx)?;
        Some(self.translate_shader(&Scope::root(graph), out, idx))
    }

    pub fn translate_shader<G: ShaderGraph>(
        &mut self,
        scope: &Scope<'_, G>,
        node: NodeId,
        input: usize,
    ) -> ShaderRef {
        self.translate_input(scope, node, input, Category::Shader)
            .into_shader()
            .unwrap_or_else(|| self.policy.warning_shader.clone())
    }

    pub fn translate_color<G: ShaderGraph>(
        &mut self,
        scope: &Scope<'_, G>,
        node: NodeId,
        input: usize,
    ) -> ColorRef {
        self.translate_input(scope, node, input, Category::Color)
            .into_color()
            .unwrap_or_else(|| self.policy.warning_color.clone())
    }

    pub fn translate_value<G: ShaderGraph>(
        &mut self,
        scope: &Scope<'_, G>,
        node: NodeId,
        input: usize,
    ) -> ValueRef {
        self.translate_input(scope, node, input, Category::Value)
            .into_value()
            .unwrap_or_else(|| self.policy.unit_value.clone())
    }

    pub fn translate_vector<G: ShaderGraph>(
        &mut self,
        scope: &Scope<'_, G>,
        node: NodeId,
        input: usize,
    ) -> VectorRef {
        self.translate_input(scope, node, input, Category::Vector)
            .into_vector()
            .unwrap_or_else(|| self.policy.zero_vector.clone())
    }

    /// Translate input socket `input` of `node` into category `want`.
    pub fn translate_input<G: ShaderGraph>(
        &mut self,
        scope: &Scope<'_, G>,
        node: NodeId,
        input: usize,
        want: Category,
    ) -> AnyNode {
        let graph = scope.graph;
        let Some(socket) = graph.inputs(node).get(input) else {
            self.diags.report(
                DiagnosticKind::MissingSocket,
                Some(graph.node_name(node)),
                format!("no input #{input} on '{}'", graph.tag(node)),
            );
            return self.policy.fallback(want);
        };

        match graph.link(node, input) {
            None => {
                let lit = self.literal(socket);
                self.coerce(lit, want, graph.node_name(node))
            }
            Some(link) => {
                let produced = self.produce(scope, link, want);
                self.coerce(produced, want, graph.node_name(link.node))
            }
        }
    }

    /// Named-input form of [`Translator::translate_input`].
    pub(crate) fn input_named<G: ShaderGraph>(
        &mut self,
        scope: &Scope<'_, G>,
        node: NodeId,
        names: &[&str],
        want: Category,
    ) -> AnyNode {
        let graph = scope.graph;
        match names.iter().find_map(|n| graph.input_index(node, n)) {
            Some(idx) => self.translate_input(scope, node, idx, want),
            None => {
                self.diags.report(
                    DiagnosticKind::MissingSocket,
                    Some(graph.node_name(node)),
                    format!("no input named {names:?} on '{}'", graph.tag(node)),
                );
                self.policy.fallback(want)
            }
        }
    }

    pub(crate) fn color_named<G: ShaderGraph>(
        &mut self,
        scope: &Scope<'_, G>,
        node: NodeId,
        names: &[&str],
    ) -> ColorRef {
        self.input_named(scope, node, names, Category::Color)
            .into_color()
            .unwrap_or_else(|| self.policy.warning_color.clone())
    }

    pub(crate) fn value_named<G: ShaderGraph>(
        &mut self,
        scope: &Scope<'_, G>,
        node: NodeId,
        names: &[&str],
    ) -> ValueRef {
        self.input_named(scope, node, names, Category::Value)
            .into_value()
            .unwrap_or_else(|| self.policy.unit_value.clone())
    }

    pub(crate) fn vector_named<G: ShaderGraph>(
        &mut self,
        scope: &Scope<'_, G>,
        node: NodeId,
        names: &[&str],
    ) -> VectorRef {
        self.input_named(scope, node, names, Category::Vector)
            .into_vector()
            .unwrap_or_else(|| self.policy.zero_vector.clone())
    }

    /// Constant synthesized from an unlinked socket, in the socket's own category.
    fn literal(&self, socket: &Socket) -> AnyNode {
        match (socket.default, socket.ty) {
            (SocketValue::Float(v), _) => AnyNode::Value(ValueNode::constant(v)),
            (SocketValue::Color(c), _) => AnyNode::Color(ColorNode::constant(c)),
            (SocketValue::Vector(v), _) => AnyNode::Vector(VectorNode::constant(v)),
            (SocketValue::None, SocketType::Float) => AnyNode::Value(ValueNode::constant(0.0)),
            (SocketValue::None, SocketType::Color) => {
                AnyNode::Color(ColorNode::constant(Rgba::BLACK))
            }
            (SocketValue::None, SocketType::Vector) => {
                AnyNode::Vector(VectorNode::constant(Vec3::ZERO))
            }
            (SocketValue::None, SocketType::Shader | SocketType::Other) => {
                AnyNode::Shader(self.policy.default_surface.clone())
            }
        }
    }

    /// Follow one link to its producer, guarding against cycles and runaway depth.
    fn produce<G: ShaderGraph>(&mut self, scope: &Scope<'_, G>, link: Link, want: Category) -> AnyNode {
        let graph = scope.graph;
        let key = (graph.graph_key(), link.node);

        if self.depth >= self.opts.max_depth {
            self.diags.report(
                DiagnosticKind::DepthLimit,
                Some(graph.node_name(link.node)),
                format!("producer chain deeper than {}", self.opts.max_depth),
            );
            return self.policy.fallback(want);
        }
        if !self.active.insert(key) {
            self.diags.report(
                DiagnosticKind::Cycle,
                Some(graph.node_name(link.node)),
                format!("'{}' feeds back into itself", graph.node_name(link.node)),
            );
            return self.policy.fallback(want);
        }

        self.depth += 1;
        let out = self.produce_node(scope, link, want);
        self.depth -= 1;
        self.active.remove(&key);
        out
    }

    fn produce_node<G: ShaderGraph>(
        &mut self,
        scope: &Scope<'_, G>,
        link: Link,
        want: Category,
    ) -> AnyNode {
        let graph = scope.graph;
        let node = link.node;

        match graph.kind(node) {
            SourceNodeKind::Group => self.inline_group(scope, link, want),
            SourceNodeKind::Reroute => self.translate_input(scope, node, 0, want),
            SourceNodeKind::GroupInput => {
                let name = output_name(graph, link);
                match scope.binding(name) {
                    Some(bound) => bound.clone(),
                    None => {
                        self.diags.report(
                            DiagnosticKind::UnboundGroupInput,
                            Some(graph.node_name(node)),
                            format!("group input '{name}' has no binding in this scope"),
                        );
                        self.policy.fallback(want)
                    }
                }
            }
            SourceNodeKind::Unknown => {
                self.diags.report(
                    DiagnosticKind::UnknownNode,
                    Some(graph.node_name(node)),
                    format!("unsupported node type '{}'", graph.tag(node)),
                );
                self.policy.fallback(want)
            }
            SourceNodeKind::MaterialOutput
            | SourceNodeKind::WorldOutput
            | SourceNodeKind::GroupOutput => self.unsupported_output(scope, link, want),
            kind => match kind_category(kind) {
                Some(Category::Shader) => AnyNode::Shader(self.shader_rule(scope, link, kind)),
                Some(Category::Color) => self.color_rule(scope, link, kind, want),
                Some(Category::Value) => self.value_rule(scope, link, kind, want),
                Some(Category::Vector) => self.vector_rule(scope, link, kind, want),
                None => self.unsupported_output(scope, link, want),
            },
        }
    }

    /// Translate a group node by binding its inputs and translating the body in that scope.
    fn inline_group<G: ShaderGraph>(
        &mut self,
        scope: &Scope<'_, G>,
        link: Link,
        want: Category,
    ) -> AnyNode {
        let graph = scope.graph;
        let node = link.node;

        let Some(body) = graph.group_body(node) else {
            self.diags.report(
                DiagnosticKind::MissingGroupTree,
                Some(graph.node_name(node)),
                "group node has no node tree",
            );
            return self.policy.fallback(want);
        };
        let Some(out) = body.find_kind(SourceNodeKind::GroupOutput) else {
            self.diags.report(
                DiagnosticKind::MissingGroupOutput,
                Some(graph.node_name(node)),
                format!("group '{}' has no group output", body.name()),
            );
            return self.policy.fallback(want);
        };

        let requested = output_name(graph, link);
        let slot = body.input_index(out, requested).or_else(|| {
            body.inputs(out)
                .iter()
                .enumerate()
                .find(|(i, s)| s.ty.category() == Some(want) && body.link(out, *i).is_some())
                .map(|(i, _)| i)
        });
        let Some(slot) = slot else {
            self.diags.report(
                DiagnosticKind::MissingGroupOutput,
                Some(graph.node_name(node)),
                format!(
                    "group '{}' has no output '{requested}' or linked {want} output",
                    body.name()
                ),
            );
            return self.policy.fallback(want);
        };

        let mut bindings = Bindings::new();
        for (i, socket) in graph.inputs(node).iter().enumerate() {
            let Some(category) = socket.ty.category() else {
                continue;
            };
            if bindings.contains_key(&socket.name) {
                continue;
            }
            let bound = self.translate_input(scope, node, i, category);
            bindings.insert(socket.name.clone(), bound);
        }

        let inner = Scope {
            graph: body,
            bindings: Some(&bindings),
        };
        self.translate_input(&inner, out, slot, want)
    }

    pub(crate) fn unsupported_output<G: ShaderGraph>(
        &mut self,
        scope: &Scope<'_, G>,
        link: Link,
        want: Category,
    ) -> AnyNode {
        let graph = scope.graph;
        self.diags.report(
            DiagnosticKind::UnsupportedOutput,
            Some(graph.node_name(link.node)),
            format!(
                "output '{}' of '{}' has no {want} translation",
                output_name(graph, link),
                graph.tag(link.node)
            ),
        );
        self.policy.fallback(want)
    }

    pub(crate) fn report(&mut self, kind: DiagnosticKind, node: &str, message: impl Into<String>) {
        self.diags.report(kind, Some(node), message);
    }
}

/// Native category of a producer kind. Structural and unknown kinds have none.
fn kind_category(kind: SourceNodeKind) -> Option<Category> {
    use SourceNodeKind as K;
    match kind {
        K::BsdfDiffuse
        | K::BsdfGlossy
        | K::BsdfGlass
        | K::BsdfTransparent
        | K::BsdfTranslucent
        | K::BsdfPrincipled
        | K::Emission
        | K::Background
        | K::MixShader
        | K::AddShader => Some(Category::Shader),
        K::TexImage
        | K::TexEnvironment
        | K::TexChecker
        | K::Rgb
        | K::Mix
        | K::MixRgb
        | K::Blackbody
        | K::HueSaturation
        | K::ColorRamp
        | K::CombineColor
        | K::CombineRgb
        | K::CombineHsv => Some(Category::Color),
        K::Value | K::Math | K::MapRange | K::Fresnel | K::LayerWeight | K::LightPath | K::SeparateXyz => {
            Some(Category::Value)
        }
        K::VectorMath | K::TexCoord | K::NewGeometry => Some(Category::Vector),
        K::MaterialOutput
        | K::WorldOutput
        | K::Group
        | K::GroupInput
        | K::GroupOutput
        | K::Reroute
        | K::Unknown => None,
    }
}

fn surface_input<G: ShaderGraph>(graph: &G, out: NodeId) -> Option<usize> {
    graph
        .input_index(out, "Surface")
        .or_else(|| (!graph.inputs(out).is_empty()).then_some(0))
}

/// Name of the producer socket a link starts from, empty when out of range.
pub(crate) fn output_name<G: ShaderGraph>(graph: &G, link: Link) -> &str {
    graph
        .outputs(link.node)
        .get(link.socket)
        .map_or("", |s| s.name.as_str())
}

/// Declared type of the producer socket a link starts from.
pub(crate) fn output_type<G: ShaderGraph>(graph: &G, link: Link) -> SocketType {
    graph
        .outputs(link.node)
        .get(link.socket)
        .map_or(SocketType::Other, |s| s.ty)
}

#[cfg(test)]
#[path = "../../tests/unit/translate/translator.rs"]
mod tests;
