use crate::foundation::core::{Rgba, Vec3};
use crate::ir::color::{ColorNode, ColorRef};
use crate::ir::shader::{ShaderNode, ShaderRef};
use crate::ir::value::{ValueNode, ValueRef};
use crate::ir::vector::{VectorNode, VectorRef};
use crate::ir::{AnyNode, Category};

/// Checker scale of the warning texture; large enough to read as noise on any surface.
const WARNING_CHECKER_SCALE: f64 = 100.0;

/// Shared substitutes for anything the translator cannot express.
///
/// Built once and passed into every [`crate::Translator`]. Each substitute is a single allocation
/// handed out by `Arc::clone`, so callers can test for it with `Arc::ptr_eq`.
#[derive(Clone, Debug)]
pub struct FallbackPolicy {
    /// Red and white checkerboard marking unsupported color inputs.
    pub warning_color: ColorRef,
    /// Diffuse over [`FallbackPolicy::warning_color`].
    pub warning_shader: ShaderRef,
    pub zero_vector: VectorRef,
    pub unit_value: ValueRef,
    /// Flat black diffuse for materials whose surface input is unlinked.
    pub default_surface: ShaderRef,
}

impl FallbackPolicy {
    pub fn new() -> Self {
        let warning_color = ColorNode::checkerboard(
            ColorNode::constant(Rgba::new(1.0, 0.0, 0.0, 0.0)),
            ColorNode::constant(Rgba::WHITE),
            ValueNode::constant(WARNING_CHECKER_SCALE),
        );
        Self {
            warning_shader: ShaderNode::diffuse(warning_color.clone()),
            warning_color,
            zero_vector: VectorNode::constant(Vec3::ZERO),
            unit_value: ValueNode::constant(1.0),
            default_surface: ShaderNode::diffuse(ColorNode::constant(Rgba::BLACK)),
        }
    }

    /// Substitute for an unresolvable node of `category`.
    pub fn fallback(&self, category: Category) -> AnyNode {
        match category {
            Category::Shader => AnyNode::Shader(self.warning_shader.clone()),
            Category::Color => AnyNode::Color(self.warning_color.clone()),
            Category::Value => AnyNode::Value(self.unit_value.clone()),
            Category::Vector => AnyNode::Vector(self.zero_vector.clone()),
        }
    }
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self::new()
    }
}
