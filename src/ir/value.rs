use crate::ir::color::ColorRef;
use crate::ir::ops::{LightPathQuery, MathOp};
use crate::ir::vector::VectorRef;
use serde::Serialize;
use std::sync::Arc;

/// Shared handle to a value node.
pub type ValueRef = Arc<ValueNode>;

/// Channel read from a vector by [`ValueNode::VecToValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Component {
    X,
    Y,
    Z,
    U,
    V,
    /// Scalar result of a vector op that produces one (dot, length, distance).
    F,
}

/// Double-precision scalar expression.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueNode {
    Constant {
        value: f64,
    },
    Fresnel {
        ior: ValueRef,
        normal: VectorRef,
    },
    MapRange {
        input: ValueRef,
        from_min: ValueRef,
        from_max: ValueRef,
        to_min: ValueRef,
        to_max: ValueRef,
    },
    Alpha {
        color: ColorRef,
    },
    VecToValue {
        component: Component,
        vec: VectorRef,
    },
    Math {
        a: ValueRef,
        b: ValueRef,
        op: MathOp,
    },
    /// Luminance of `color`.
    Grayscale {
        color: ColorRef,
    },
    LightPathQuery {
        query: LightPathQuery,
    },
    RayLength,
}

impl ValueNode {
    pub fn constant(value: f64) -> ValueRef {
        Arc::new(Self::Constant { value })
    }

    pub fn fresnel(ior: ValueRef, normal: VectorRef) -> ValueRef {
        Arc::new(Self::Fresnel { ior, normal })
    }

    pub fn map_range(
        input: ValueRef,
        from_min: ValueRef,
        from_max: ValueRef,
        to_min: ValueRef,
        to_max: ValueRef,
    ) -> ValueRef {
        Arc::new(Self::MapRange {
            input,
            from_min,
            from_max,
            to_min,
            to_max,
        })
    }

    pub fn alpha(color: ColorRef) -> ValueRef {
        Arc::new(Self::Alpha { color })
    }

    pub fn vec_to_value(component: Component, vec: VectorRef) -> ValueRef {
        Arc::new(Self::VecToValue { component, vec })
    }

    pub fn math(a: ValueRef, b: ValueRef, op: MathOp) -> ValueRef {
        Arc::new(Self::Math { a, b, op })
    }

    pub fn grayscale(color: ColorRef) -> ValueRef {
        Arc::new(Self::Grayscale { color })
    }

    pub fn light_path_query(query: LightPathQuery) -> ValueRef {
        Arc::new(Self::LightPathQuery { query })
    }

    pub fn ray_length() -> ValueRef {
        Arc::new(Self::RayLength)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Constant { .. } => "constant",
            Self::Fresnel { .. } => "fresnel",
            Self::MapRange { .. } => "map_range",
            Self::Alpha { .. } => "alpha",
            Self::VecToValue { .. } => "vec_to_value",
            Self::Math { .. } => "math",
            Self::Grayscale { .. } => "grayscale",
            Self::LightPathQuery { .. } => "light_path_query",
            Self::RayLength => "ray_length",
        }
    }
}
