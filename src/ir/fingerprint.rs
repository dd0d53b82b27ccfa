use crate::foundation::core::{Rgba, Vec3};
use crate::ir::color::ColorNode;
use crate::ir::shader::ShaderNode;
use crate::ir::value::ValueNode;
use crate::ir::vector::VectorNode;
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x5ad3_c0de_9e37_79b9;

/// Stable structural fingerprint of an IR tree.
///
/// Equal trees hash equal regardless of which leaves are shared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct IrFingerprint {
    pub(crate) hi: u64,
    pub(crate) lo: u64,
}

pub(crate) fn fingerprint_shader(node: &ShaderNode) -> IrFingerprint {
    let mut h = StableHasher::new();
    write_shader(&mut h, node);
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f32(&mut self, v: f32) {
        self.write_u32(v.to_bits());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn write_rgba(&mut self, c: Rgba) {
        for v in c.to_array() {
            self.write_f32(v);
        }
    }

    fn write_vec3(&mut self, v: Vec3) {
        for c in v.to_array() {
            self.write_f32(c);
        }
    }

    fn finish(self) -> IrFingerprint {
        let v = self.inner.digest128();
        IrFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_shader(h: &mut StableHasher, node: &ShaderNode) {
    h.write_str(node.kind());
    match node {
        ShaderNode::Diffuse { color }
        | ShaderNode::Transparent { color }
        | ShaderNode::Translucent { color } => write_color(h, color),
        ShaderNode::Metal { color, roughness } => {
            write_color(h, color);
            write_value(h, roughness);
        }
        ShaderNode::Glass {
            color,
            roughness,
            ior,
        }
        | ShaderNode::Plastic {
            color,
            roughness,
            ior,
        } => {
            write_color(h, color);
            write_value(h, roughness);
            write_value(h, ior);
        }
        ShaderNode::Mix { a, b, factor } => {
            write_shader(h, a);
            write_shader(h, b);
            write_value(h, factor);
        }
        ShaderNode::Add { a, b } => {
            write_shader(h, a);
            write_shader(h, b);
        }
        ShaderNode::Emissive { color, strength } => {
            write_color(h, color);
            write_value(h, strength);
        }
        ShaderNode::Background {
            color,
            pose,
            strength,
        } => {
            write_color(h, color);
            write_vector(h, pose);
            write_value(h, strength);
        }
    }
}

fn write_color(h: &mut StableHasher, node: &ColorNode) {
    h.write_str(node.kind());
    match node {
        ColorNode::Constant { color } => h.write_rgba(*color),
        ColorNode::Image { path, options } => {
            h.write_str(path);
            h.write_u8(options.bits());
        }
        ColorNode::Checkerboard { a, b, scale } => {
            write_color(h, a);
            write_color(h, b);
            write_value(h, scale);
        }
        ColorNode::Blackbody { degrees } => write_value(h, degrees),
        ColorNode::Split { value } => write_value(h, value),
        ColorNode::Rgb { r: x, g: y, b: z }
        | ColorNode::Hsl { h: x, s: y, l: z }
        | ColorNode::Hsv { h: x, s: y, v: z } => {
            write_value(h, x);
            write_value(h, y);
            write_value(h, z);
        }
        ColorNode::HsvTransform {
            tex,
            h: hue,
            s,
            v,
            f,
        } => {
            write_color(h, tex);
            for x in [hue, s, v, f] {
                write_value(h, x);
            }
        }
        ColorNode::VecToColor { vec } => write_vector(h, vec),
        ColorNode::Gradient { a, b } => {
            write_color(h, a);
            write_color(h, b);
        }
        ColorNode::Mix { a, b, factor } => {
            write_color(h, a);
            write_color(h, b);
            write_value(h, factor);
        }
        ColorNode::Ramp {
            factor,
            color_mode,
            interpolation,
            elements,
        } => {
            write_value(h, factor);
            h.write_u32(color_mode.engine_id());
            h.write_u32(interpolation.engine_id());
            h.write_u64(elements.len() as u64);
            for e in elements {
                h.write_rgba(e.color);
                h.write_f32(e.position);
            }
        }
    }
}

fn write_value(h: &mut StableHasher, node: &ValueNode) {
    h.write_str(node.kind());
    match node {
        ValueNode::Constant { value } => h.write_f64(*value),
        ValueNode::Fresnel { ior, normal } => {
            write_value(h, ior);
            write_vector(h, normal);
        }
        ValueNode::MapRange {
            input,
            from_min,
            from_max,
            to_min,
            to_max,
        } => {
            for x in [input, from_min, from_max, to_min, to_max] {
                write_value(h, x);
            }
        }
        ValueNode::Alpha { color } | ValueNode::Grayscale { color } => write_color(h, color),
        ValueNode::VecToValue { component, vec } => {
            h.write_u8(*component as u8);
            write_vector(h, vec);
        }
        ValueNode::Math { a, b, op } => {
            write_value(h, a);
            write_value(h, b);
            h.write_u32(op.engine_id());
        }
        ValueNode::LightPathQuery { query } => h.write_u32(query.engine_id()),
        ValueNode::RayLength => {}
    }
}

fn write_vector(h: &mut StableHasher, node: &VectorNode) {
    h.write_str(node.kind());
    match node {
        VectorNode::Constant { vector } => h.write_vec3(*vector),
        VectorNode::Normal | VectorNode::Uv => {}
        VectorNode::VecMath { a, b, c, f, op } => {
            write_vector(h, a);
            write_vector(h, b);
            write_vector(h, c);
            write_value(h, f);
            h.write_u32(op.engine_id());
        }
        VectorNode::VecMix { a, b, factor } => {
            write_vector(h, a);
            write_vector(h, b);
            write_value(h, factor);
        }
        VectorNode::FromColor { color } => write_color(h, color),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ir/fingerprint.rs"]
mod tests;
