//! Source operator names to IR enumerants.
//!
//! Every family maps names outside its table to a documented default and reports exactly one
//! diagnostic, so one exotic node never aborts a scene.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use serde::Serialize;

/// Scalar math operator. Declaration order is the engine's enum order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MathOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Log,
    SquareRoot,
    InvSquareRoot,
    Absolute,
    Min,
    Max,
    LessThan,
    GreaterThan,
    Sign,
    Compare,
    Round,
    Floor,
    Ceil,
    Truncate,
    Fraction,
    Modulo,
    Sine,
    Cosine,
    Tangent,
    ToRadians,
    ToDegrees,
}

const MATH_OPS: &[(&str, MathOp)] = &[
    ("ADD", MathOp::Add),
    ("SUBTRACT", MathOp::Subtract),
    ("MULTIPLY", MathOp::Multiply),
    ("DIVIDE", MathOp::Divide),
    ("POWER", MathOp::Power),
    ("LOGARITHM", MathOp::Log),
    ("SQRT", MathOp::SquareRoot),
    ("INVERSE_SQRT", MathOp::InvSquareRoot),
    ("ABSOLUTE", MathOp::Absolute),
    ("MINIMUM", MathOp::Min),
    ("MAXIMUM", MathOp::Max),
    ("LESS_THAN", MathOp::LessThan),
    ("GREATER_THAN", MathOp::GreaterThan),
    ("SIGN", MathOp::Sign),
    // The engine compares with a fixed epsilon; the node's third input is ignored.
    ("COMPARE", MathOp::Compare),
    ("ROUND", MathOp::Round),
    ("FLOOR", MathOp::Floor),
    ("CEIL", MathOp::Ceil),
    ("TRUNC", MathOp::Truncate),
    ("FRACT", MathOp::Fraction),
    ("MODULO", MathOp::Modulo),
    ("SINE", MathOp::Sine),
    ("COSINE", MathOp::Cosine),
    ("TANGENT", MathOp::Tangent),
    ("RADIANS", MathOp::ToRadians),
    ("DEGREES", MathOp::ToDegrees),
];

/// Vector math operator. Declaration order is the engine's enum order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Cross,
    Reflect,
    Refract,
    Dot,
    Distance,
    Length,
    Scale,
    Normalize,
    Wrap,
    Floor,
    Ceil,
    Modulo,
    Abs,
    Min,
    Max,
    Sin,
    Cos,
    Tan,
}

const VECTOR_OPS: &[(&str, VectorOp)] = &[
    ("ADD", VectorOp::Add),
    ("SUBTRACT", VectorOp::Subtract),
    ("MULTIPLY", VectorOp::Multiply),
    ("DIVIDE", VectorOp::Divide),
    ("CROSS_PRODUCT", VectorOp::Cross),
    ("REFLECT", VectorOp::Reflect),
    ("REFRACT", VectorOp::Refract),
    ("DOT_PRODUCT", VectorOp::Dot),
    ("DISTANCE", VectorOp::Distance),
    ("LENGTH", VectorOp::Length),
    ("SCALE", VectorOp::Scale),
    ("NORMALIZE", VectorOp::Normalize),
    ("ABSOLUTE", VectorOp::Abs),
    ("MINIMUM", VectorOp::Min),
    ("MAXIMUM", VectorOp::Max),
    ("FLOOR", VectorOp::Floor),
    ("CEIL", VectorOp::Ceil),
    ("MODULO", VectorOp::Modulo),
    ("WRAP", VectorOp::Wrap),
    ("SINE", VectorOp::Sin),
    ("COSINE", VectorOp::Cos),
    ("TANGENT", VectorOp::Tan),
];

/// Ray classification query answered per path vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LightPathQuery {
    IsCameraRay,
    IsShadowRay,
    IsDiffuseRay,
    IsGlossyRay,
    IsSingularRay,
    IsReflectionRay,
    IsTransmissionRay,
    RayLength,
}

const LIGHT_PATH_QUERIES: &[(&str, LightPathQuery)] = &[
    ("Is Camera Ray", LightPathQuery::IsCameraRay),
    ("Is Shadow Ray", LightPathQuery::IsShadowRay),
    ("Is Diffuse Ray", LightPathQuery::IsDiffuseRay),
    ("Is Glossy Ray", LightPathQuery::IsGlossyRay),
    ("Is Singular Ray", LightPathQuery::IsSingularRay),
    ("Is Reflection Ray", LightPathQuery::IsReflectionRay),
    ("Is Transmission Ray", LightPathQuery::IsTransmissionRay),
    ("Ray Length", LightPathQuery::RayLength),
];

/// Interpolation between color ramp stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RampInterpolation {
    Ease,
    Cardinal,
    Linear,
    BSpline,
    Constant,
}

const RAMP_INTERPOLATIONS: &[(&str, RampInterpolation)] = &[
    ("EASE", RampInterpolation::Ease),
    ("CARDINAL", RampInterpolation::Cardinal),
    ("LINEAR", RampInterpolation::Linear),
    ("B_SPLINE", RampInterpolation::BSpline),
    ("CONSTANT", RampInterpolation::Constant),
];

/// Color space a ramp interpolates in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RampColorMode {
    Rgb,
    Hsv,
    Hsl,
}

const RAMP_COLOR_MODES: &[(&str, RampColorMode)] = &[
    ("RGB", RampColorMode::Rgb),
    ("HSV", RampColorMode::Hsv),
    ("HSL", RampColorMode::Hsl),
];

fn lookup<T: Copy>(table: &[(&str, T)], name: &str) -> Option<T> {
    table.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
}

fn map_or_report<T: Copy + std::fmt::Debug>(
    table: &[(&str, T)],
    name: &str,
    family: &str,
    default: T,
    diags: &mut Diagnostics,
) -> T {
    if let Some(v) = lookup(table, name) {
        return v;
    }
    diags.report(
        DiagnosticKind::UnknownOperator,
        None,
        format!("unknown {family} '{name}', defaulting to {default:?}"),
    );
    default
}

impl MathOp {
    pub fn from_source_name(name: &str) -> Option<Self> {
        lookup(MATH_OPS, name)
    }

    /// Every source name with a mapping.
    pub fn source_names() -> impl Iterator<Item = &'static str> {
        MATH_OPS.iter().map(|(k, _)| *k)
    }

    pub fn engine_id(self) -> u32 {
        self as u32
    }
}

impl VectorOp {
    pub fn from_source_name(name: &str) -> Option<Self> {
        lookup(VECTOR_OPS, name)
    }

    pub fn source_names() -> impl Iterator<Item = &'static str> {
        VECTOR_OPS.iter().map(|(k, _)| *k)
    }

    pub fn engine_id(self) -> u32 {
        self as u32
    }
}

impl LightPathQuery {
    pub fn from_source_name(name: &str) -> Option<Self> {
        lookup(LIGHT_PATH_QUERIES, name)
    }

    pub fn source_names() -> impl Iterator<Item = &'static str> {
        LIGHT_PATH_QUERIES.iter().map(|(k, _)| *k)
    }

    pub fn engine_id(self) -> u32 {
        self as u32
    }
}

impl RampInterpolation {
    pub fn from_source_name(name: &str) -> Option<Self> {
        lookup(RAMP_INTERPOLATIONS, name)
    }

    pub fn source_names() -> impl Iterator<Item = &'static str> {
        RAMP_INTERPOLATIONS.iter().map(|(k, _)| *k)
    }

    pub fn engine_id(self) -> u32 {
        self as u32
    }
}

impl RampColorMode {
    pub fn from_source_name(name: &str) -> Option<Self> {
        lookup(RAMP_COLOR_MODES, name)
    }

    pub fn source_names() -> impl Iterator<Item = &'static str> {
        RAMP_COLOR_MODES.iter().map(|(k, _)| *k)
    }

    pub fn engine_id(self) -> u32 {
        self as u32
    }
}

/// Scalar math; unknown names map to [`MathOp::Add`].
pub fn map_math_op(name: &str, diags: &mut Diagnostics) -> MathOp {
    map_or_report(MATH_OPS, name, "math op", MathOp::Add, diags)
}

/// Vector math; unknown names map to [`VectorOp::Add`].
pub fn map_vector_op(name: &str, diags: &mut Diagnostics) -> VectorOp {
    map_or_report(VECTOR_OPS, name, "vector op", VectorOp::Add, diags)
}

/// Light path output socket name; unknown names map to [`LightPathQuery::RayLength`].
pub fn map_light_path_query(name: &str, diags: &mut Diagnostics) -> LightPathQuery {
    map_or_report(
        LIGHT_PATH_QUERIES,
        name,
        "light path query",
        LightPathQuery::RayLength,
        diags,
    )
}

/// Ramp interpolation; unknown names map to the first enumerant.
pub fn map_ramp_interpolation(name: &str, diags: &mut Diagnostics) -> RampInterpolation {
    map_or_report(
        RAMP_INTERPOLATIONS,
        name,
        "ramp interpolation",
        RampInterpolation::Ease,
        diags,
    )
}

/// Ramp color mode; unknown names map to the first enumerant.
pub fn map_ramp_color_mode(name: &str, diags: &mut Diagnostics) -> RampColorMode {
    map_or_report(
        RAMP_COLOR_MODES,
        name,
        "ramp color mode",
        RampColorMode::Rgb,
        diags,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/ir/ops.rs"]
mod tests;
