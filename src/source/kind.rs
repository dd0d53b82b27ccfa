use serde::Serialize;

/// Closed set of source node types the translator understands.
///
/// Anything else parses to [`SourceNodeKind::Unknown`]; the raw tag stays on the node for
/// diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceNodeKind {
    MaterialOutput,
    WorldOutput,
    Group,
    GroupInput,
    GroupOutput,
    Reroute,

    BsdfDiffuse,
    BsdfGlossy,
    BsdfGlass,
    BsdfTransparent,
    BsdfTranslucent,
    BsdfPrincipled,
    Emission,
    Background,
    MixShader,
    AddShader,

    TexImage,
    TexEnvironment,
    TexChecker,
    Rgb,
    Mix,
    MixRgb,
    Blackbody,
    HueSaturation,
    ColorRamp,
    CombineColor,
    CombineRgb,
    CombineHsv,

    Value,
    Math,
    MapRange,
    Fresnel,
    LayerWeight,
    LightPath,
    SeparateXyz,

    VectorMath,
    TexCoord,
    NewGeometry,

    Unknown,
}

const KNOWN_TAGS: &[(&str, SourceNodeKind)] = &[
    ("ShaderNodeOutputMaterial", SourceNodeKind::MaterialOutput),
    ("ShaderNodeOutputWorld", SourceNodeKind::WorldOutput),
    ("ShaderNodeGroup", SourceNodeKind::Group),
    ("NodeGroupInput", SourceNodeKind::GroupInput),
    ("NodeGroupOutput", SourceNodeKind::GroupOutput),
    ("NodeReroute", SourceNodeKind::Reroute),
    ("ShaderNodeBsdfDiffuse", SourceNodeKind::BsdfDiffuse),
    ("ShaderNodeBsdfGlossy", SourceNodeKind::BsdfGlossy),
    ("ShaderNodeBsdfAnisotropic", SourceNodeKind::BsdfGlossy),
    ("ShaderNodeBsdfGlass", SourceNodeKind::BsdfGlass),
    ("ShaderNodeBsdfTransparent", SourceNodeKind::BsdfTransparent),
    ("ShaderNodeBsdfTranslucent", SourceNodeKind::BsdfTranslucent),
    ("ShaderNodeBsdfPrincipled", SourceNodeKind::BsdfPrincipled),
    ("ShaderNodeEmission", SourceNodeKind::Emission),
    ("ShaderNodeBackground", SourceNodeKind::Background),
    ("ShaderNodeMixShader", SourceNodeKind::MixShader),
    ("ShaderNodeAddShader", SourceNodeKind::AddShader),
    ("ShaderNodeTexImage", SourceNodeKind::TexImage),
    ("ShaderNodeTexEnvironment", SourceNodeKind::TexEnvironment),
    ("ShaderNodeTexChecker", SourceNodeKind::TexChecker),
    ("ShaderNodeRGB", SourceNodeKind::Rgb),
    ("ShaderNodeMix", SourceNodeKind::Mix),
    ("ShaderNodeMixRGB", SourceNodeKind::MixRgb),
    ("ShaderNodeBlackbody", SourceNodeKind::Blackbody),
    ("ShaderNodeHueSaturation", SourceNodeKind::HueSaturation),
    // Blender's name for the color ramp.
    ("ShaderNodeValToRGB", SourceNodeKind::ColorRamp),
    ("ShaderNodeCombineColor", SourceNodeKind::CombineColor),
    ("ShaderNodeCombineRGB", SourceNodeKind::CombineRgb),
    ("ShaderNodeCombineHSV", SourceNodeKind::CombineHsv),
    ("ShaderNodeValue", SourceNodeKind::Value),
    ("ShaderNodeMath", SourceNodeKind::Math),
    ("ShaderNodeMapRange", SourceNodeKind::MapRange),
    ("ShaderNodeFresnel", SourceNodeKind::Fresnel),
    ("ShaderNodeLayerWeight", SourceNodeKind::LayerWeight),
    ("ShaderNodeLightPath", SourceNodeKind::LightPath),
    ("ShaderNodeSeparateXYZ", SourceNodeKind::SeparateXyz),
    ("ShaderNodeVectorMath", SourceNodeKind::VectorMath),
    ("ShaderNodeTexCoord", SourceNodeKind::TexCoord),
    ("ShaderNodeNewGeometry", SourceNodeKind::NewGeometry),
];

impl SourceNodeKind {
    pub fn from_tag(tag: &str) -> Self {
        KNOWN_TAGS
            .iter()
            .find(|(t, _)| *t == tag)
            .map_or(Self::Unknown, |(_, k)| *k)
    }

    /// Canonical tag, `None` for [`SourceNodeKind::Unknown`].
    pub fn tag(self) -> Option<&'static str> {
        KNOWN_TAGS.iter().find(|(_, k)| *k == self).map(|(t, _)| *t)
    }

    /// Every tag with a translation rule.
    pub fn known_tags() -> impl Iterator<Item = &'static str> {
        KNOWN_TAGS.iter().map(|(t, _)| *t)
    }

    /// Nodes that only shape the graph and never produce IR themselves.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Self::MaterialOutput
                | Self::WorldOutput
                | Self::Group
                | Self::GroupInput
                | Self::GroupOutput
                | Self::Reroute
        )
    }
}
