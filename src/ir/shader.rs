use crate::ir::color::ColorRef;
use crate::ir::value::ValueRef;
use crate::ir::vector::VectorRef;
use serde::Serialize;
use std::sync::Arc;

/// Shared handle to a shader node.
pub type ShaderRef = Arc<ShaderNode>;

/// Surface scattering closure.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShaderNode {
    Diffuse {
        color: ColorRef,
    },
    Metal {
        color: ColorRef,
        roughness: ValueRef,
    },
    Glass {
        color: ColorRef,
        roughness: ValueRef,
        ior: ValueRef,
    },
    Plastic {
        color: ColorRef,
        roughness: ValueRef,
        ior: ValueRef,
    },
    /// `factor == 0` picks `a`, `factor == 1` picks `b`.
    Mix {
        a: ShaderRef,
        b: ShaderRef,
        factor: ValueRef,
    },
    Add {
        a: ShaderRef,
        b: ShaderRef,
    },
    Transparent {
        color: ColorRef,
    },
    Translucent {
        color: ColorRef,
    },
    Emissive {
        color: ColorRef,
        strength: ValueRef,
    },
    /// Environment lookup; `pose` rotates the environment.
    Background {
        color: ColorRef,
        pose: VectorRef,
        strength: ValueRef,
    },
}

impl ShaderNode {
    pub fn diffuse(color: ColorRef) -> ShaderRef {
        Arc::new(Self::Diffuse { color })
    }

    pub fn metal(color: ColorRef, roughness: ValueRef) -> ShaderRef {
        Arc::new(Self::Metal { color, roughness })
    }

    pub fn glass(color: ColorRef, roughness: ValueRef, ior: ValueRef) -> ShaderRef {
        Arc::new(Self::Glass {
            color,
            roughness,
            ior,
        })
    }

    pub fn plastic(color: ColorRef, roughness: ValueRef, ior: ValueRef) -> ShaderRef {
        Arc::new(Self::Plastic {
            color,
            roughness,
            ior,
        })
    }

    pub fn mix(a: ShaderRef, b: ShaderRef, factor: ValueRef) -> ShaderRef {
        Arc::new(Self::Mix { a, b, factor })
    }

    pub fn add(a: ShaderRef, b: ShaderRef) -> ShaderRef {
        Arc::new(Self::Add { a, b })
    }

    pub fn transparent(color: ColorRef) -> ShaderRef {
        Arc::new(Self::Transparent { color })
    }

    pub fn translucent(color: ColorRef) -> ShaderRef {
        Arc::new(Self::Translucent { color })
    }

    pub fn emissive(color: ColorRef, strength: ValueRef) -> ShaderRef {
        Arc::new(Self::Emissive { color, strength })
    }

    pub fn background(color: ColorRef, pose: VectorRef, strength: ValueRef) -> ShaderRef {
        Arc::new(Self::Background {
            color,
            pose,
            strength,
        })
    }

    /// Tag of this variant, as serialized.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Diffuse { .. } => "diffuse",
            Self::Metal { .. } => "metal",
            Self::Glass { .. } => "glass",
            Self::Plastic { .. } => "plastic",
            Self::Mix { .. } => "mix",
            Self::Add { .. } => "add",
            Self::Transparent { .. } => "transparent",
            Self::Translucent { .. } => "translucent",
            Self::Emissive { .. } => "emissive",
            Self::Background { .. } => "background",
        }
    }
}
