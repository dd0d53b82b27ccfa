use crate::foundation::error::{ShadeError, ShadeResult};
use crate::source::model::SceneDef;
use crate::source::resolve::resolve_scene;
use crate::source::scene::SourceScene;
use crate::source::validate::validate_scene;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// JSON scene export: node groups, materials, world and objects.
///
/// This is the boundary representation a DCC exporter writes. It is validated and then resolved
/// into a [`SourceScene`] that the translator and [`crate::SceneSync`] read.
#[derive(Debug, Clone)]
pub struct SceneDocument {
    def: SceneDef,
}

impl SceneDocument {
    /// Parse a scene document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ShadeResult<Self> {
        let def: SceneDef = serde_json::from_reader(r)
            .map_err(|e| ShadeError::serde(format!("parse scene JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Parse a scene document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ShadeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ShadeError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn from_json_str(s: &str) -> ShadeResult<Self> {
        let def: SceneDef = serde_json::from_str(s)
            .map_err(|e| ShadeError::serde(format!("parse scene JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Check every schema rule and report all violations at once.
    pub fn validate(&self) -> ShadeResult<()> {
        validate_scene(&self.def)
            .map_err(|e| ShadeError::validation(format!("scene validation failed: {e}")))
    }

    /// Validate, then build the in-memory graphs.
    pub fn resolve(&self) -> ShadeResult<SourceScene> {
        self.validate()?;
        resolve_scene(&self.def)
    }

    pub fn material_names(&self) -> impl Iterator<Item = &str> {
        self.def.materials.keys().map(String::as_str)
    }

    pub fn to_json_pretty(&self) -> ShadeResult<String> {
        serde_json::to_string_pretty(&self.def)
            .map_err(|e| ShadeError::serde(format!("serialize scene JSON: {e}")))
    }
}
