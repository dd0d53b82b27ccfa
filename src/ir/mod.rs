//! Render engine intermediate representation.
//!
//! Four closed node categories reference each other through `Arc`. Trees are built bottom-up by
//! the translator and never mutated afterwards; constants may be shared by many parents.

pub mod color;
pub(crate) mod fingerprint;
pub mod ops;
pub mod shader;
pub mod value;
pub mod vector;

use serde::Serialize;
use std::fmt;

use color::ColorRef;
use shader::ShaderRef;
use value::ValueRef;
use vector::VectorRef;

/// Node category, used to pick a translator procedure and a fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Shader,
    Color,
    Value,
    Vector,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Shader => "shader",
            Self::Color => "color",
            Self::Value => "value",
            Self::Vector => "vector",
        };
        f.write_str(s)
    }
}

/// A translated node of any category.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyNode {
    Shader(ShaderRef),
    Color(ColorRef),
    Value(ValueRef),
    Vector(VectorRef),
}

impl AnyNode {
    pub fn category(&self) -> Category {
        match self {
            Self::Shader(_) => Category::Shader,
            Self::Color(_) => Category::Color,
            Self::Value(_) => Category::Value,
            Self::Vector(_) => Category::Vector,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Shader(n) => n.kind(),
            Self::Color(n) => n.kind(),
            Self::Value(n) => n.kind(),
            Self::Vector(n) => n.kind(),
        }
    }

    pub fn into_shader(self) -> Option<ShaderRef> {
        match self {
            Self::Shader(n) => Some(n),
            _ => None,
        }
    }

    pub fn into_color(self) -> Option<ColorRef> {
        match self {
            Self::Color(n) => Some(n),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<ValueRef> {
        match self {
            Self::Value(n) => Some(n),
            _ => None,
        }
    }

    pub fn into_vector(self) -> Option<VectorRef> {
        match self {
            Self::Vector(n) => Some(n),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ir/nodes.rs"]
mod tests;
