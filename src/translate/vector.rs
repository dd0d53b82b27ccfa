use crate::ir::ops::map_vector_op;
use crate::ir::value::{Component, ValueNode};
use crate::ir::vector::VectorNode;
use crate::ir::{AnyNode, Category};
use crate::source::graph::{Link, ShaderGraph, SocketType};
use crate::source::kind::SourceNodeKind;
use crate::translate::{Scope, Translator, output_name, output_type};

impl Translator<'_> {
    pub(super) fn vector_rule<G: ShaderGraph>(
        &mut self,
        scope: &Scope<'_, G>,
        link: Link,
        kind: SourceNodeKind,
        want: Category,
    ) -> AnyNode {
        let graph = scope.graph();
        let n = link.node;
        match kind {
            SourceNodeKind::VectorMath => {
                let op = map_vector_op(
                    graph.props(n).operation.as_deref().unwrap_or("ADD"),
                    &mut self.diags,
                );
                let vec = VectorNode::vec_math(
                    self.translate_vector(scope, n, 0),
                    self.translate_vector(scope, n, 1),
                    self.translate_vector(scope, n, 2),
                    self.translate_value(scope, n, 3),
                    op,
                );
                // Dot, length and distance land on the scalar output.
                if output_type(graph, link) == SocketType::Float {
                    AnyNode::Value(ValueNode::vec_to_value(Component::F, vec))
                } else {
                    AnyNode::Vector(vec)
                }
            }
            SourceNodeKind::TexCoord => match output_name(graph, link) {
                "UV" => AnyNode::Vector(VectorNode::uv()),
                "Normal" => AnyNode::Vector(VectorNode::normal()),
                _ => self.unsupported_output(scope, link, want),
            },
            SourceNodeKind::NewGeometry => match output_name(graph, link) {
                "Normal" => AnyNode::Vector(VectorNode::normal()),
                _ => self.unsupported_output(scope, link, want),
            },
            _ => self.policy.fallback(want),
        }
    }
}
