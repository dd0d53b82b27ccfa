use crate::diagnostics::DiagnosticKind;
use crate::foundation::core::Rgba;
use crate::ir::color::{ColorNode, ImageOptions, RampElement};
use crate::ir::ops::{map_ramp_color_mode, map_ramp_interpolation};
use crate::ir::value::ValueNode;
use crate::ir::vector::VectorNode;
use crate::ir::{AnyNode, Category};
use crate::source::graph::{ImageRef, Link, ShaderGraph, SocketType, SocketValue};
use crate::source::kind::SourceNodeKind;
use crate::translate::{Scope, Translator, output_name, output_type};

/// Color spaces whose texels are data rather than color.
const DATA_COLOR_SPACES: &[&str] = &["Non-Color", "Raw", "Linear", "Generic Data"];

pub(crate) fn image_options(image: &ImageRef) -> ImageOptions {
    let data = image
        .color_space
        .as_deref()
        .is_some_and(|cs| DATA_COLOR_SPACES.contains(&cs));
    ImageOptions {
        srgb_transform: !data,
        no_bilinear: image.interpolation.as_deref() == Some("Closest"),
    }
}

impl Translator<'_> {
    pub(super) fn color_rule<G: ShaderGraph>(
        &mut self,
        scope: &Scope<'_, G>,
        link: Link,
        kind: SourceNodeKind,
        want: Category,
    ) -> AnyNode {
        let graph = scope.graph();
        let n = link.node;
        match kind {
            SourceNodeKind::TexImage | SourceNodeKind::TexEnvironment => {
                let color = match &graph.props(n).image {
                    Some(image) => ColorNode::image(image.path.clone(), image_options(image)),
                    None => {
                        self.report(
                            DiagnosticKind::MissingImage,
                            graph.node_name(n),
                            "no image set on texture node",
                        );
                        self.policy.warning_color.clone()
                    }
                };
                if output_name(graph, link) == "Alpha" {
                    AnyNode::Value(ValueNode::alpha(color))
                } else {
                    AnyNode::Color(color)
                }
            }
            SourceNodeKind::TexChecker => AnyNode::Color(ColorNode::checkerboard(
                self.color_named(scope, n, &["Color1"]),
                self.color_named(scope, n, &["Color2"]),
                self.value_named(scope, n, &["Scale"]),
            )),
            SourceNodeKind::Rgb => {
                let color = match graph.outputs(n).first().map(|s| s.default) {
                    Some(SocketValue::Color(c)) => c,
                    _ => Rgba::BLACK,
                };
                AnyNode::Color(ColorNode::constant(color))
            }
            SourceNodeKind::Mix => self.mix_rule(scope, link, want),
            SourceNodeKind::MixRgb => AnyNode::Color(ColorNode::mix(
                self.color_named(scope, n, &["Color1", "A"]),
                self.color_named(scope, n, &["Color2", "B"]),
                self.value_named(scope, n, &["Fac", "Factor"]),
            )),
            SourceNodeKind::Blackbody => {
                AnyNode::Color(ColorNode::blackbody(self.translate_value(scope, n, 0)))
            }
            SourceNodeKind::HueSaturation => AnyNode::Color(ColorNode::hsv_transform(
                self.color_named(scope, n, &["Color"]),
                self.value_named(scope, n, &["Hue"]),
                self.value_named(scope, n, &["Saturation"]),
                self.value_named(scope, n, &["Value"]),
                self.value_named(scope, n, &["Fac"]),
            )),
            SourceNodeKind::ColorRamp => {
                let Some(ramp) = graph.props(n).ramp.as_ref() else {
                    return self.unsupported_output(scope, link, want);
                };
                let factor = self.value_named(scope, n, &["Fac"]);
                let mode = map_ramp_color_mode(&ramp.color_mode, &mut self.diags);
                let interpolation = map_ramp_interpolation(&ramp.interpolation, &mut self.diags);
                let elements = ramp
                    .elements
                    .iter()
                    .map(|e| RampElement {
                        color: e.color,
                        position: e.position,
                    })
                    .collect();
                let color = ColorNode::ramp(factor, mode, interpolation, elements);
                if output_name(graph, link) == "Alpha" {
                    AnyNode::Value(ValueNode::alpha(color))
                } else {
                    AnyNode::Color(color)
                }
            }
            SourceNodeKind::CombineColor => {
                let r = self.translate_value(scope, n, 0);
                let g = self.translate_value(scope, n, 1);
                let b = self.translate_value(scope, n, 2);
                let color = match graph.props(n).mode.as_deref().unwrap_or("RGB") {
                    "RGB" => ColorNode::rgb(r, g, b),
                    "HSV" => ColorNode::hsv(r, g, b),
                    "HSL" => ColorNode::hsl(r, g, b),
                    other => {
                        self.report(
                            DiagnosticKind::UnknownOperator,
                            graph.node_name(n),
                            format!("unknown combine mode '{other}', using RGB"),
                        );
                        ColorNode::rgb(r, g, b)
                    }
                };
                AnyNode::Color(color)
            }
            SourceNodeKind::CombineRgb => AnyNode::Color(ColorNode::rgb(
                self.translate_value(scope, n, 0),
                self.translate_value(scope, n, 1),
                self.translate_value(scope, n, 2),
            )),
            SourceNodeKind::CombineHsv => AnyNode::Color(ColorNode::hsv(
                self.translate_value(scope, n, 0),
                self.translate_value(scope, n, 1),
                self.translate_value(scope, n, 2),
            )),
            _ => self.policy.fallback(want),
        }
    }

    /// The shared mix node. Its inputs are laid out per data type:
    /// 0 factor, 1 vector factor, 2/3 float A/B, 4/5 vector A/B, 6/7 color A/B.
    fn mix_rule<G: ShaderGraph>(&mut self, scope: &Scope<'_, G>, link: Link, want: Category) -> AnyNode {
        let graph = scope.graph();
        let n = link.node;
        let data_type = match graph.props(n).data_type.as_deref() {
            Some(t) => t,
            None => match output_type(graph, link) {
                SocketType::Vector => "VECTOR",
                SocketType::Float => "FLOAT",
                _ => "RGBA",
            },
        };

        match data_type {
            "RGBA" => {
                let factor = self.translate_value(scope, n, 0);
                let a = self.translate_color(scope, n, 6);
                let b = self.translate_color(scope, n, 7);
                AnyNode::Color(ColorNode::mix(a, b, factor))
            }
            "VECTOR" => {
                let factor = self.translate_value(scope, n, 0);
                let a = self.translate_vector(scope, n, 4);
                let b = self.translate_vector(scope, n, 5);
                AnyNode::Vector(VectorNode::vec_mix(a, b, factor))
            }
            "FLOAT" => {
                let factor = self.translate_value(scope, n, 0);
                let a = self.translate_value(scope, n, 2);
                let b = self.translate_value(scope, n, 3);
                AnyNode::Value(ValueNode::grayscale(ColorNode::mix(
                    ColorNode::split(a),
                    ColorNode::split(b),
                    factor,
                )))
            }
            other => {
                self.report(
                    DiagnosticKind::UnsupportedOutput,
                    graph.node_name(n),
                    format!("mix data type '{other}' is not supported"),
                );
                self.policy.fallback(want)
            }
        }
    }
}
