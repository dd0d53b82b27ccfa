use crate::foundation::error::{ShadeError, ShadeResult};
use crate::foundation::math::Matrix4;
use crate::ir::shader::ShaderRef;
use crate::sync::camera::CameraParams;
use crate::sync::geometry::{Face, VertexBuffer};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MeshHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct InstanceHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MaterialSetHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CameraHandle(pub u32);

/// Scene construction contract of the render engine.
///
/// `*_new` calls upsert by name: creating a mesh, material set or camera that already exists
/// returns the existing handle and resets its contents. Recreating a mesh drops its instances.
pub trait RenderScene {
    fn mesh_new(&mut self, name: &str) -> ShadeResult<MeshHandle>;
    fn mesh_bind_vertex_buf(&mut self, mesh: MeshHandle, buf: VertexBuffer) -> ShadeResult<()>;
    fn mesh_bind_faces(&mut self, mesh: MeshHandle, faces: Vec<Face>) -> ShadeResult<()>;
    /// Seal a mesh once its vertices and faces are bound.
    fn mesh_finalize(&mut self, mesh: MeshHandle) -> ShadeResult<()>;

    fn instance_new(&mut self, mesh: MeshHandle) -> ShadeResult<InstanceHandle>;
    fn instance_set_transform(&mut self, inst: InstanceHandle, transform: &Matrix4)
    -> ShadeResult<()>;
    fn instance_bind_materials(
        &mut self,
        inst: InstanceHandle,
        set: MaterialSetHandle,
    ) -> ShadeResult<()>;

    fn material_set_new(&mut self, name: &str) -> ShadeResult<MaterialSetHandle>;
    /// Append a slot and return its index. `None` renders with the engine default.
    fn material_set_add(
        &mut self,
        set: MaterialSetHandle,
        name: &str,
        shader: Option<ShaderRef>,
    ) -> ShadeResult<usize>;
    /// Replace every slot named `name`; returns how many slots changed.
    fn material_set_update(
        &mut self,
        set: MaterialSetHandle,
        name: &str,
        shader: Option<ShaderRef>,
    ) -> ShadeResult<usize>;

    fn camera_new(&mut self, name: &str) -> ShadeResult<CameraHandle>;
    fn camera_set(&mut self, cam: CameraHandle, params: &CameraParams) -> ShadeResult<()>;

    fn set_background(&mut self, shader: Option<ShaderRef>) -> ShadeResult<()>;
}

#[derive(Clone, Debug, Default)]
pub struct RecordedMesh {
    pub name: String,
    pub vertices: Option<VertexBuffer>,
    pub faces: Vec<Face>,
    pub finalized: bool,
    pub instances: Vec<InstanceHandle>,
}

#[derive(Clone, Debug)]
pub struct RecordedInstance {
    pub mesh: MeshHandle,
    pub transform: Matrix4,
    pub material_set: Option<MaterialSetHandle>,
}

#[derive(Clone, Debug)]
pub struct MaterialSlot {
    pub name: String,
    pub shader: Option<ShaderRef>,
}

#[derive(Clone, Debug, Default)]
pub struct RecordedMaterialSet {
    pub name: String,
    pub slots: Vec<MaterialSlot>,
}

#[derive(Clone, Debug, Default)]
pub struct RecordedCamera {
    pub name: String,
    pub params: Option<CameraParams>,
}

/// Counts of live scene objects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SceneTotals {
    pub meshes: usize,
    pub instances: usize,
    pub material_sets: usize,
    pub cameras: usize,
}

/// In-memory [`RenderScene`] for tests, dry runs and debugging.
#[derive(Debug, Default)]
pub struct RecordingScene {
    meshes: Vec<RecordedMesh>,
    mesh_names: HashMap<String, MeshHandle>,
    instances: Vec<Option<RecordedInstance>>,
    material_sets: Vec<RecordedMaterialSet>,
    set_names: HashMap<String, MaterialSetHandle>,
    cameras: Vec<RecordedCamera>,
    camera_names: HashMap<String, CameraHandle>,
    background: Option<ShaderRef>,
    background_submissions: usize,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh(&self, name: &str) -> Option<&RecordedMesh> {
        let h = self.mesh_names.get(name)?;
        self.meshes.get(h.0 as usize)
    }

    pub fn instance(&self, inst: InstanceHandle) -> Option<&RecordedInstance> {
        self.instances.get(inst.0 as usize)?.as_ref()
    }

    /// Live instances of the named mesh, in creation order.
    pub fn instances_of(&self, name: &str) -> Vec<&RecordedInstance> {
        self.mesh(name)
            .map(|m| m.instances.iter().filter_map(|i| self.instance(*i)).collect())
            .unwrap_or_default()
    }

    pub fn material_set(&self, name: &str) -> Option<&RecordedMaterialSet> {
        let h = self.set_names.get(name)?;
        self.material_sets.get(h.0 as usize)
    }

    pub fn material_set_by_handle(&self, set: MaterialSetHandle) -> Option<&RecordedMaterialSet> {
        self.material_sets.get(set.0 as usize)
    }

    pub fn camera(&self, name: &str) -> Option<&RecordedCamera> {
        let h = self.camera_names.get(name)?;
        self.cameras.get(h.0 as usize)
    }

    pub fn background(&self) -> Option<&ShaderRef> {
        self.background.as_ref()
    }

    pub fn background_submissions(&self) -> usize {
        self.background_submissions
    }

    pub fn totals(&self) -> SceneTotals {
        SceneTotals {
            meshes: self.meshes.len(),
            instances: self.instances.iter().flatten().count(),
            material_sets: self.material_sets.len(),
            cameras: self.cameras.len(),
        }
    }

    fn mesh_mut(&mut self, mesh: MeshHandle) -> ShadeResult<&mut RecordedMesh> {
        self.meshes
            .get_mut(mesh.0 as usize)
            .ok_or_else(|| ShadeError::scene(format!("unknown mesh handle {}", mesh.0)))
    }

    fn instance_mut(&mut self, inst: InstanceHandle) -> ShadeResult<&mut RecordedInstance> {
        self.instances
            .get_mut(inst.0 as usize)
            .and_then(Option::as_mut)
            .ok_or_else(|| ShadeError::scene(format!("unknown instance handle {}", inst.0)))
    }

    fn set_mut(&mut self, set: MaterialSetHandle) -> ShadeResult<&mut RecordedMaterialSet> {
        self.material_sets
            .get_mut(set.0 as usize)
            .ok_or_else(|| ShadeError::scene(format!("unknown material set handle {}", set.0)))
    }
}

fn next_handle(len: usize) -> ShadeResult<u32> {
    u32::try_from(len).map_err(|_| ShadeError::scene("handle space exhausted"))
}

impl RenderScene for RecordingScene {
    fn mesh_new(&mut self, name: &str) -> ShadeResult<MeshHandle> {
        if let Some(&h) = self.mesh_names.get(name) {
            let dropped = std::mem::take(&mut self.mesh_mut(h)?.instances);
            for inst in dropped {
                if let Some(slot) = self.instances.get_mut(inst.0 as usize) {
                    *slot = None;
                }
            }
            let mesh = self.mesh_mut(h)?;
            mesh.vertices = None;
            mesh.faces.clear();
            mesh.finalized = false;
            return Ok(h);
        }
        let h = MeshHandle(next_handle(self.meshes.len())?);
        self.meshes.push(RecordedMesh {
            name: name.to_owned(),
            ..RecordedMesh::default()
        });
        self.mesh_names.insert(name.to_owned(), h);
        Ok(h)
    }

    fn mesh_bind_vertex_buf(&mut self, mesh: MeshHandle, buf: VertexBuffer) -> ShadeResult<()> {
        self.mesh_mut(mesh)?.vertices = Some(buf);
        Ok(())
    }

    fn mesh_bind_faces(&mut self, mesh: MeshHandle, faces: Vec<Face>) -> ShadeResult<()> {
        self.mesh_mut(mesh)?.faces = faces;
        Ok(())
    }

    fn mesh_finalize(&mut self, mesh: MeshHandle) -> ShadeResult<()> {
        let m = self.mesh_mut(mesh)?;
        if m.vertices.is_none() {
            return Err(ShadeError::scene(format!(
                "mesh '{}' finalized without a vertex buffer",
                m.name
            )));
        }
        m.finalized = true;
        Ok(())
    }

    fn instance_new(&mut self, mesh: MeshHandle) -> ShadeResult<InstanceHandle> {
        let h = InstanceHandle(next_handle(self.instances.len())?);
        self.mesh_mut(mesh)?.instances.push(h);
        self.instances.push(Some(RecordedInstance {
            mesh,
            transform: Matrix4::IDENTITY,
            material_set: None,
        }));
        Ok(h)
    }

    fn instance_set_transform(
        &mut self,
        inst: InstanceHandle,
        transform: &Matrix4,
    ) -> ShadeResult<()> {
        self.instance_mut(inst)?.transform = *transform;
        Ok(())
    }

    fn instance_bind_materials(
        &mut self,
        inst: InstanceHandle,
        set: MaterialSetHandle,
    ) -> ShadeResult<()> {
        self.set_mut(set)?;
        self.instance_mut(inst)?.material_set = Some(set);
        Ok(())
    }

    fn material_set_new(&mut self, name: &str) -> ShadeResult<MaterialSetHandle> {
        if let Some(&h) = self.set_names.get(name) {
            self.set_mut(h)?.slots.clear();
            return Ok(h);
        }
        let h = MaterialSetHandle(next_handle(self.material_sets.len())?);
        self.material_sets.push(RecordedMaterialSet {
            name: name.to_owned(),
            slots: Vec::new(),
        });
        self.set_names.insert(name.to_owned(), h);
        Ok(h)
    }

    fn material_set_add(
        &mut self,
        set: MaterialSetHandle,
        name: &str,
        shader: Option<ShaderRef>,
    ) -> ShadeResult<usize> {
        let s = self.set_mut(set)?;
        s.slots.push(MaterialSlot {
            name: name.to_owned(),
            shader,
        });
        Ok(s.slots.len() - 1)
    }

    fn material_set_update(
        &mut self,
        set: MaterialSetHandle,
        name: &str,
        shader: Option<ShaderRef>,
    ) -> ShadeResult<usize> {
        let s = self.set_mut(set)?;
        let mut changed = 0;
        for slot in s.slots.iter_mut().filter(|slot| slot.name == name) {
            slot.shader = shader.clone();
            changed += 1;
        }
        Ok(changed)
    }

    fn camera_new(&mut self, name: &str) -> ShadeResult<CameraHandle> {
        if let Some(&h) = self.camera_names.get(name) {
            return Ok(h);
        }
        let h = CameraHandle(next_handle(self.cameras.len())?);
        self.cameras.push(RecordedCamera {
            name: name.to_owned(),
            params: None,
        });
        self.camera_names.insert(name.to_owned(), h);
        Ok(h)
    }

    fn camera_set(&mut self, cam: CameraHandle, params: &CameraParams) -> ShadeResult<()> {
        let c = self
            .cameras
            .get_mut(cam.0 as usize)
            .ok_or_else(|| ShadeError::scene(format!("unknown camera handle {}", cam.0)))?;
        c.params = Some(params.clone());
        Ok(())
    }

    fn set_background(&mut self, shader: Option<ShaderRef>) -> ShadeResult<()> {
        self.background = shader;
        self.background_submissions += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/scene.rs"]
mod tests;
