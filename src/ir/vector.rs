use crate::foundation::core::Vec3;
use crate::ir::color::ColorRef;
use crate::ir::ops::VectorOp;
use crate::ir::value::ValueRef;
use serde::Serialize;
use std::sync::Arc;

/// Shared handle to a vector node.
pub type VectorRef = Arc<VectorNode>;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VectorNode {
    Constant {
        vector: Vec3,
    },
    /// Shading normal at the hit point.
    Normal,
    /// Surface texture coordinate at the hit point.
    Uv,
    VecMath {
        a: VectorRef,
        b: VectorRef,
        c: VectorRef,
        f: ValueRef,
        op: VectorOp,
    },
    VecMix {
        a: VectorRef,
        b: VectorRef,
        factor: ValueRef,
    },
    FromColor {
        color: ColorRef,
    },
}

impl VectorNode {
    pub fn constant(vector: Vec3) -> VectorRef {
        Arc::new(Self::Constant { vector })
    }

    pub fn normal() -> VectorRef {
        Arc::new(Self::Normal)
    }

    pub fn uv() -> VectorRef {
        Arc::new(Self::Uv)
    }

    pub fn vec_math(
        a: VectorRef,
        b: VectorRef,
        c: VectorRef,
        f: ValueRef,
        op: VectorOp,
    ) -> VectorRef {
        Arc::new(Self::VecMath { a, b, c, f, op })
    }

    pub fn vec_mix(a: VectorRef, b: VectorRef, factor: ValueRef) -> VectorRef {
        Arc::new(Self::VecMix { a, b, factor })
    }

    pub fn from_color(color: ColorRef) -> VectorRef {
        Arc::new(Self::FromColor { color })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Constant { .. } => "constant",
            Self::Normal => "normal",
            Self::Uv => "uv",
            Self::VecMath { .. } => "vec_math",
            Self::VecMix { .. } => "vec_mix",
            Self::FromColor { .. } => "from_color",
        }
    }
}
