use crate::ir::ops::{LightPathQuery, MathOp, map_light_path_query, map_math_op};
use crate::ir::value::{Component, ValueNode};
use crate::ir::{AnyNode, Category};
use crate::source::graph::{Link, ShaderGraph, SocketValue};
use crate::source::kind::SourceNodeKind;
use crate::translate::{Scope, Translator, output_name};

impl Translator<'_> {
    pub(super) fn value_rule<G: ShaderGraph>(
        &mut self,
        scope: &Scope<'_, G>,
        link: Link,
        kind: SourceNodeKind,
        want: Category,
    ) -> AnyNode {
        let graph = scope.graph();
        let n = link.node;
        let value = match kind {
            SourceNodeKind::Value => {
                let v = match graph.outputs(n).first().map(|s| s.default) {
                    Some(SocketValue::Float(v)) => v,
                    _ => 0.0,
                };
                ValueNode::constant(v)
            }
            SourceNodeKind::Math => {
                let op = map_math_op(
                    graph.props(n).operation.as_deref().unwrap_or("ADD"),
                    &mut self.diags,
                );
                let a = self.translate_value(scope, n, 0);
                let b = self.translate_value(scope, n, 1);
                ValueNode::math(a, b, op)
            }
            SourceNodeKind::MapRange => ValueNode::map_range(
                self.translate_value(scope, n, 0),
                self.translate_value(scope, n, 1),
                self.translate_value(scope, n, 2),
                self.translate_value(scope, n, 3),
                self.translate_value(scope, n, 4),
            ),
            SourceNodeKind::Fresnel => ValueNode::fresnel(
                self.value_named(scope, n, &["IOR"]),
                self.vector_named(scope, n, &["Normal"]),
            ),
            SourceNodeKind::LayerWeight => match output_name(graph, link) {
                // Blend 0.5 maps to ior 2; blend 1 diverges, as in the DCC.
                "Fresnel" => {
                    let blend = self.value_named(scope, n, &["Blend"]);
                    let normal = self.vector_named(scope, n, &["Normal"]);
                    let one = || ValueNode::constant(1.0);
                    let ior = ValueNode::math(
                        one(),
                        ValueNode::math(one(), blend, MathOp::Subtract),
                        MathOp::Divide,
                    );
                    ValueNode::fresnel(ior, normal)
                }
                _ => return self.unsupported_output(scope, link, want),
            },
            SourceNodeKind::LightPath => {
                match map_light_path_query(output_name(graph, link), &mut self.diags) {
                    LightPathQuery::RayLength => ValueNode::ray_length(),
                    query => ValueNode::light_path_query(query),
                }
            }
            SourceNodeKind::SeparateXyz => {
                let component = match output_name(graph, link) {
                    "X" => Component::X,
                    "Y" => Component::Y,
                    "Z" => Component::Z,
                    _ => return self.unsupported_output(scope, link, want),
                };
                ValueNode::vec_to_value(component, self.translate_vector(scope, n, 0))
            }
            _ => return self.policy.fallback(want),
        };
        AnyNode::Value(value)
    }
}
