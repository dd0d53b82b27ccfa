use crate::diagnostics::DiagnosticKind;
use crate::ir::color::ColorNode;
use crate::ir::shader::ShaderNode;
use crate::ir::value::{Component, ValueNode};
use crate::ir::vector::VectorNode;
use crate::ir::{AnyNode, Category};
use crate::translate::Translator;

impl Translator<'_> {
    /// Convert `node` into category `want`.
    ///
    /// Data categories convert implicitly the way the DCC does; anything becomes a shader by
    /// emitting it at unit strength. A shader cannot feed data, so that direction reports and falls
    /// back. `producer` names the node the diagnostic is attributed to.
    pub(crate) fn coerce(&mut self, node: AnyNode, want: Category, producer: &str) -> AnyNode {
        if node.category() == want {
            return node;
        }
        let unit = || ValueNode::constant(1.0);

        match (node, want) {
            (AnyNode::Shader(_), _) => {
                self.report(
                    DiagnosticKind::Coercion,
                    producer,
                    format!("shader output used as {want}"),
                );
                self.policy.fallback(want)
            }

            (AnyNode::Color(c), Category::Shader) => AnyNode::Shader(ShaderNode::emissive(c, unit())),
            (AnyNode::Color(c), Category::Value) => AnyNode::Value(ValueNode::grayscale(c)),
            (AnyNode::Color(c), Category::Vector) => AnyNode::Vector(VectorNode::from_color(c)),

            (AnyNode::Value(v), Category::Shader) => {
                AnyNode::Shader(ShaderNode::emissive(ColorNode::split(v), unit()))
            }
            (AnyNode::Value(v), Category::Color) => AnyNode::Color(ColorNode::split(v)),
            (AnyNode::Value(v), Category::Vector) => {
                AnyNode::Vector(VectorNode::from_color(ColorNode::split(v)))
            }

            (AnyNode::Vector(v), Category::Shader) => {
                AnyNode::Shader(ShaderNode::emissive(ColorNode::vec_to_color(v), unit()))
            }
            (AnyNode::Vector(v), Category::Color) => AnyNode::Color(ColorNode::vec_to_color(v)),
            (AnyNode::Vector(v), Category::Value) => {
                AnyNode::Value(ValueNode::vec_to_value(Component::X, v))
            }

            // Same-category pairs returned above.
            (same, _) => same,
        }
    }
}
