use crate::foundation::core::Rgba;
use crate::ir::color::{ColorNode, ColorRef};
use crate::ir::shader::{ShaderNode, ShaderRef};
use crate::ir::value::ValueRef;
use crate::source::graph::{Link, ShaderGraph};
use crate::source::kind::SourceNodeKind;
use crate::translate::{Scope, Translator};

/// Inputs of the principled BSDF that feed the layered approximation.
struct Principled {
    base_color: ColorRef,
    metallic: ValueRef,
    roughness: ValueRef,
    alpha: ValueRef,
    transmission: ValueRef,
    coat_ior: ValueRef,
    coat_roughness: ValueRef,
    coat_weight: ValueRef,
    emission_color: ColorRef,
    emission_strength: ValueRef,
}

impl Principled {
    /// Diffuse/translucent base, plastic coat, metal, alpha cutout, then additive emission.
    /// Specular tint, subsurface and sheen have no counterpart and are dropped.
    fn build(self) -> ShaderRef {
        let base = ShaderNode::mix(
            ShaderNode::diffuse(self.base_color.clone()),
            ShaderNode::translucent(self.base_color.clone()),
            self.transmission,
        );
        let coat = ShaderNode::plastic(self.base_color.clone(), self.coat_roughness, self.coat_ior);
        let base_and_coat = ShaderNode::mix(base, coat, self.coat_weight);
        let metal = ShaderNode::metal(self.base_color, self.roughness);
        let opaque = ShaderNode::mix(base_and_coat, metal, self.metallic);
        let with_alpha = ShaderNode::mix(
            ShaderNode::transparent(ColorNode::constant(Rgba::WHITE)),
            opaque,
            self.alpha,
        );
        ShaderNode::add(
            ShaderNode::emissive(self.emission_color, self.emission_strength),
            with_alpha,
        )
    }
}

impl Translator<'_> {
    pub(super) fn shader_rule<G: ShaderGraph>(
        &mut self,
        scope: &Scope<'_, G>,
        link: Link,
        kind: SourceNodeKind,
    ) -> ShaderRef {
        let n = link.node;
        match kind {
            SourceNodeKind::BsdfDiffuse => ShaderNode::diffuse(self.color_named(scope, n, &["Color"])),
            SourceNodeKind::BsdfGlossy => ShaderNode::metal(
                self.color_named(scope, n, &["Color"]),
                self.value_named(scope, n, &["Roughness"]),
            ),
            SourceNodeKind::BsdfGlass => ShaderNode::glass(
                self.color_named(scope, n, &["Color"]),
                self.value_named(scope, n, &["Roughness"]),
                self.value_named(scope, n, &["IOR"]),
            ),
            SourceNodeKind::BsdfTransparent => {
                ShaderNode::transparent(self.color_named(scope, n, &["Color"]))
            }
            SourceNodeKind::BsdfTranslucent => {
                ShaderNode::translucent(self.color_named(scope, n, &["Color"]))
            }
            SourceNodeKind::Emission => ShaderNode::emissive(
                self.color_named(scope, n, &["Color"]),
                self.value_named(scope, n, &["Strength"]),
            ),
            // The DCC has no environment rotation on this node.
            SourceNodeKind::Background => ShaderNode::background(
                self.color_named(scope, n, &["Color"]),
                self.policy.zero_vector.clone(),
                self.value_named(scope, n, &["Strength"]),
            ),
            SourceNodeKind::MixShader => {
                let factor = self.translate_value(scope, n, 0);
                let a = self.translate_shader(scope, n, 1);
                let b = self.translate_shader(scope, n, 2);
                ShaderNode::mix(a, b, factor)
            }
            SourceNodeKind::AddShader => {
                let a = self.translate_shader(scope, n, 0);
                let b = self.translate_shader(scope, n, 1);
                ShaderNode::add(a, b)
            }
            SourceNodeKind::BsdfPrincipled => Principled {
                base_color: self.color_named(scope, n, &["Base Color"]),
                metallic: self.value_named(scope, n, &["Metallic"]),
                roughness: self.value_named(scope, n, &["Roughness"]),
                alpha: self.value_named(scope, n, &["Alpha"]),
                transmission: self.value_named(scope, n, &["Transmission Weight", "Transmission"]),
                coat_ior: self.value_named(scope, n, &["Coat IOR", "IOR"]),
                coat_roughness: self.value_named(scope, n, &["Coat Roughness", "Clearcoat Roughness"]),
                coat_weight: self.value_named(scope, n, &["Coat Weight", "Clearcoat"]),
                emission_color: self.color_named(scope, n, &["Emission Color", "Emission"]),
                emission_strength: self.value_named(scope, n, &["Emission Strength"]),
            }
            .build(),
            _ => self.policy.warning_shader.clone(),
        }
    }
}
