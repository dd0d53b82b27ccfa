use crate::foundation::core::Rgba;
use crate::ir::ops::{RampColorMode, RampInterpolation};
use crate::ir::value::ValueRef;
use crate::ir::vector::VectorRef;
use serde::Serialize;
use std::sync::Arc;

/// Shared handle to a color node.
pub type ColorRef = Arc<ColorNode>;

/// Image sampling flags understood by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ImageOptions {
    /// Decode sRGB texels to linear.
    pub srgb_transform: bool,
    /// Nearest-neighbour lookup instead of bilinear filtering.
    pub no_bilinear: bool,
}

impl ImageOptions {
    pub const SRGB_TRANSFORM: u8 = 0x01;
    pub const NO_BILINEAR: u8 = 0x02;

    pub fn bits(self) -> u8 {
        let mut bits = 0;
        if self.srgb_transform {
            bits |= Self::SRGB_TRANSFORM;
        }
        if self.no_bilinear {
            bits |= Self::NO_BILINEAR;
        }
        bits
    }
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            srgb_transform: true,
            no_bilinear: false,
        }
    }
}

/// One color ramp stop.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RampElement {
    pub color: Rgba,
    pub position: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorNode {
    Constant {
        color: Rgba,
    },
    Image {
        path: String,
        options: ImageOptions,
    },
    Checkerboard {
        a: ColorRef,
        b: ColorRef,
        scale: ValueRef,
    },
    /// Emission color of a black body at `degrees` kelvin.
    Blackbody {
        degrees: ValueRef,
    },
    /// Gray color with every channel equal to `value`.
    Split {
        value: ValueRef,
    },
    Rgb {
        r: ValueRef,
        g: ValueRef,
        b: ValueRef,
    },
    Hsl {
        h: ValueRef,
        s: ValueRef,
        l: ValueRef,
    },
    Hsv {
        h: ValueRef,
        s: ValueRef,
        v: ValueRef,
    },
    HsvTransform {
        tex: ColorRef,
        h: ValueRef,
        s: ValueRef,
        v: ValueRef,
        f: ValueRef,
    },
    VecToColor {
        vec: VectorRef,
    },
    Gradient {
        a: ColorRef,
        b: ColorRef,
    },
    Mix {
        a: ColorRef,
        b: ColorRef,
        factor: ValueRef,
    },
    Ramp {
        factor: ValueRef,
        color_mode: RampColorMode,
        interpolation: RampInterpolation,
        elements: Vec<RampElement>,
    },
}

impl ColorNode {
    pub fn constant(color: Rgba) -> ColorRef {
        Arc::new(Self::Constant { color })
    }

    pub fn image(path: impl Into<String>, options: ImageOptions) -> ColorRef {
        Arc::new(Self::Image {
            path: path.into(),
            options,
        })
    }

    pub fn checkerboard(a: ColorRef, b: ColorRef, scale: ValueRef) -> ColorRef {
        Arc::new(Self::Checkerboard { a, b, scale })
    }

    pub fn blackbody(degrees: ValueRef) -> ColorRef {
        Arc::new(Self::Blackbody { degrees })
    }

    pub fn split(value: ValueRef) -> ColorRef {
        Arc::new(Self::Split { value })
    }

    pub fn rgb(r: ValueRef, g: ValueRef, b: ValueRef) -> ColorRef {
        Arc::new(Self::Rgb { r, g, b })
    }

    pub fn hsl(h: ValueRef, s: ValueRef, l: ValueRef) -> ColorRef {
        Arc::new(Self::Hsl { h, s, l })
    }

    pub fn hsv(h: ValueRef, s: ValueRef, v: ValueRef) -> ColorRef {
        Arc::new(Self::Hsv { h, s, v })
    }

    pub fn hsv_transform(
        tex: ColorRef,
        h: ValueRef,
        s: ValueRef,
        v: ValueRef,
        f: ValueRef,
    ) -> ColorRef {
        Arc::new(Self::HsvTransform { tex, h, s, v, f })
    }

    pub fn vec_to_color(vec: VectorRef) -> ColorRef {
        Arc::new(Self::VecToColor { vec })
    }

    pub fn gradient(a: ColorRef, b: ColorRef) -> ColorRef {
        Arc::new(Self::Gradient { a, b })
    }

    pub fn mix(a: ColorRef, b: ColorRef, factor: ValueRef) -> ColorRef {
        Arc::new(Self::Mix { a, b, factor })
    }

    pub fn ramp(
        factor: ValueRef,
        color_mode: RampColorMode,
        interpolation: RampInterpolation,
        elements: Vec<RampElement>,
    ) -> ColorRef {
        Arc::new(Self::Ramp {
            factor,
            color_mode,
            interpolation,
            elements,
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Constant { .. } => "constant",
            Self::Image { .. } => "image",
            Self::Checkerboard { .. } => "checkerboard",
            Self::Blackbody { .. } => "blackbody",
            Self::Split { .. } => "split",
            Self::Rgb { .. } => "rgb",
            Self::Hsl { .. } => "hsl",
            Self::Hsv { .. } => "hsv",
            Self::HsvTransform { .. } => "hsv_transform",
            Self::VecToColor { .. } => "vec_to_color",
            Self::Gradient { .. } => "gradient",
            Self::Mix { .. } => "mix",
            Self::Ramp { .. } => "ramp",
        }
    }
}
