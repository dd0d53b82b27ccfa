use crate::foundation::core::{Uv, Vec3};
use crate::foundation::math::Matrix4;
use crate::source::graph::NodeTree;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Resolved scene: material and world graphs plus the objects to place.
#[derive(Clone, Debug, Default)]
pub struct SourceScene {
    pub(crate) groups: BTreeMap<String, Arc<NodeTree>>,
    pub(crate) materials: BTreeMap<String, SourceMaterial>,
    pub(crate) world: Option<NodeTree>,
    pub(crate) objects: Vec<SourceObject>,
    pub(crate) render: RenderSettings,
}

impl SourceScene {
    pub fn new(render: RenderSettings) -> Self {
        Self {
            render,
            ..Self::default()
        }
    }

    pub fn insert_material(&mut self, material: SourceMaterial) {
        self.materials.insert(material.name.clone(), material);
    }

    pub fn set_world(&mut self, world: Option<NodeTree>) {
        self.world = world;
    }

    pub fn push_object(&mut self, object: SourceObject) {
        self.objects.push(object);
    }

    pub fn material(&self, name: &str) -> Option<&SourceMaterial> {
        self.materials.get(name)
    }

    pub fn materials(&self) -> impl Iterator<Item = &SourceMaterial> {
        self.materials.values()
    }

    pub fn world(&self) -> Option<&NodeTree> {
        self.world.as_ref()
    }

    pub fn objects(&self) -> &[SourceObject] {
        &self.objects
    }

    pub fn object(&self, name: &str) -> Option<&SourceObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn object_mut(&mut self, name: &str) -> Option<&mut SourceObject> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    pub fn group(&self, name: &str) -> Option<&Arc<NodeTree>> {
        self.groups.get(name)
    }

    pub fn render(&self) -> RenderSettings {
        self.render
    }
}

#[derive(Clone, Debug)]
pub struct SourceMaterial {
    pub name: String,
    /// Materials without node mode are not translatable and sync as empty slots.
    pub use_nodes: bool,
    pub tree: Option<NodeTree>,
}

#[derive(Clone, Debug)]
pub struct SourceObject {
    pub name: String,
    pub transform: Matrix4,
    pub data: ObjectData,
}

#[derive(Clone, Debug)]
pub enum ObjectData {
    Mesh(MeshData),
    Camera(CameraData),
    Other,
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub polygons: Vec<Polygon>,
    pub corner_normals: Vec<Vec3>,
    pub uvs: Vec<Uv>,
    pub materials: Vec<Option<String>>,
    pub instances: Vec<Matrix4>,
    pub show_instancer: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polygon {
    pub vertices: Vec<u32>,
    pub material_index: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraData {
    pub fov_radians: f32,
    pub dof: Option<DepthOfField>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DepthOfField {
    pub fstops: f32,
    pub focus: FocusTarget,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FocusTarget {
    Distance(f32),
    Object(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub resolution_percentage: u32,
}

impl RenderSettings {
    /// Output size after the percentage scale, never below one pixel.
    pub fn scaled(self) -> (u32, u32) {
        let scale = |v: u32| ((u64::from(v) * u64::from(self.resolution_percentage)) / 100).max(1);
        (
            u32::try_from(scale(self.resolution_x)).unwrap_or(u32::MAX),
            u32::try_from(scale(self.resolution_y)).unwrap_or(u32::MAX),
        )
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            resolution_x: 1920,
            resolution_y: 1080,
            resolution_percentage: 100,
        }
    }
}
