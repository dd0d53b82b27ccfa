use crate::diagnostics::Diagnostic;
use crate::foundation::error::{ShadeError, ShadeResult};
use crate::ir::fingerprint::{IrFingerprint, fingerprint_shader};
use crate::ir::shader::ShaderRef;
use crate::source::scene::{MeshData, ObjectData, SourceObject, SourceScene};
use crate::sync::camera::camera_params;
use crate::sync::geometry::triangulate;
use crate::sync::scene::{InstanceHandle, MaterialSetHandle, MeshHandle, RenderScene};
use crate::translate::{FallbackPolicy, TranslateOpts, Translator};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Slot name used for empty material slots.
pub const MISSING_MATERIAL: &str = "MissingMaterial";

/// Scene sync behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncOpts {
    /// Leave meshes that an earlier sync already built untouched.
    pub skip_synced_meshes: bool,
    /// Create instances for duplication placements.
    pub include_instancers: bool,
    pub depth_of_field: bool,
}

impl Default for SyncOpts {
    fn default() -> Self {
        Self {
            skip_synced_meshes: true,
            include_instancers: true,
            depth_of_field: true,
        }
    }
}

/// What one [`SceneSync::sync_scene`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    pub cameras: usize,
    pub cameras_failed: usize,
    pub materials: usize,
    pub meshes: usize,
    pub meshes_skipped: usize,
    pub meshes_failed: usize,
    pub instances: usize,
    pub faces: usize,
    pub background: bool,
}

#[derive(Clone, Debug)]
struct SyncedMesh {
    mesh: MeshHandle,
    set: MaterialSetHandle,
    /// Placement of the object itself.
    own: InstanceHandle,
    /// Duplication placements, in source order.
    duplicates: Vec<InstanceHandle>,
    slots: Vec<String>,
}

/// Drives a [`RenderScene`] from a [`SourceScene`]: full syncs plus live partial updates.
pub struct SceneSync<'p> {
    translator: Translator<'p>,
    opts: SyncOpts,
    materials: HashMap<String, Option<ShaderRef>>,
    fingerprints: HashMap<String, Option<IrFingerprint>>,
    meshes: HashMap<String, SyncedMesh>,
}

impl<'p> SceneSync<'p> {
    pub fn new(policy: &'p FallbackPolicy, translate: TranslateOpts, opts: SyncOpts) -> Self {
        Self {
            translator: Translator::new(policy, translate),
            opts,
            materials: HashMap::new(),
            fingerprints: HashMap::new(),
            meshes: HashMap::new(),
        }
    }

    /// Translator diagnostics gathered since the last call.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.translator.take_diagnostics()
    }

    /// Translated root of a material from the last sync.
    pub fn material(&self, name: &str) -> Option<&ShaderRef> {
        self.materials.get(name)?.as_ref()
    }

    pub fn is_mesh_synced(&self, name: &str) -> bool {
        self.meshes.contains_key(name)
    }

    /// Push cameras, materials, meshes and the background.
    ///
    /// A camera or mesh that fails geometry checks or is rejected by the target is skipped with a
    /// warning, and a rejected background leaves `background` unset; the sync goes on.
    #[tracing::instrument(skip(self, scene, target))]
    pub fn sync_scene<S: RenderScene>(
        &mut self,
        scene: &SourceScene,
        target: &mut S,
    ) -> ShadeResult<SyncStats> {
        let mut stats = SyncStats::default();

        for obj in scene.objects() {
            if let ObjectData::Camera(_) = obj.data {
                match self.sync_camera(scene, obj, target) {
                    Ok(()) => stats.cameras += 1,
                    Err(e) => {
                        tracing::warn!(camera = %obj.name, error = %e, "camera skipped");
                        stats.cameras_failed += 1;
                    }
                }
            }
        }

        self.materials.clear();
        for mat in scene.materials() {
            let shader = if mat.use_nodes {
                mat.tree
                    .as_ref()
                    .and_then(|t| self.translator.translate_material(t))
            } else {
                None
            };
            self.fingerprints.insert(
                mat.name.clone(),
                shader.as_deref().map(fingerprint_shader),
            );
            self.materials.insert(mat.name.clone(), shader);
            stats.materials += 1;
        }

        for obj in scene.objects() {
            let ObjectData::Mesh(mesh) = &obj.data else {
                continue;
            };
            if self.opts.skip_synced_meshes && self.meshes.contains_key(&obj.name) {
                tracing::debug!(mesh = %obj.name, "already synced, skipping");
                stats.meshes_skipped += 1;
                continue;
            }
            match self.sync_mesh(obj, mesh, target) {
                Ok((synced, instances, faces)) => {
                    self.meshes.insert(obj.name.clone(), synced);
                    stats.meshes += 1;
                    stats.instances += instances;
                    stats.faces += faces;
                }
                Err(e) => {
                    tracing::warn!(mesh = %obj.name, error = %e, "mesh skipped");
                    stats.meshes_failed += 1;
                }
            }
        }

        stats.background = match self.update_world(scene, target) {
            Ok(set) => set,
            Err(e) => {
                tracing::warn!(error = %e, "background skipped");
                false
            }
        };

        tracing::info!(
            cameras = stats.cameras,
            materials = stats.materials,
            meshes = stats.meshes,
            instances = stats.instances,
            "scene synced"
        );
        Ok(stats)
    }

    fn sync_camera<S: RenderScene>(
        &mut self,
        scene: &SourceScene,
        obj: &SourceObject,
        target: &mut S,
    ) -> ShadeResult<()> {
        let ObjectData::Camera(cam) = &obj.data else {
            return Err(ShadeError::scene(format!("'{}' is not a camera", obj.name)));
        };
        let params = camera_params(
            cam,
            &obj.transform,
            scene.render(),
            scene,
            self.opts.depth_of_field,
        );
        let h = target.camera_new(&obj.name)?;
        target.camera_set(h, &params)
    }

    /// Returns the synced record, the instance count and the face count.
    fn sync_mesh<S: RenderScene>(
        &mut self,
        obj: &SourceObject,
        mesh: &MeshData,
        target: &mut S,
    ) -> ShadeResult<(SyncedMesh, usize, usize)> {
        let slot_count = mesh.materials.len().max(1);
        // Check geometry before touching the target so a bad mesh leaves nothing behind.
        let (buf, faces) = triangulate(mesh, slot_count)?;
        let face_count = faces.len();

        let handle = target.mesh_new(&obj.name)?;
        let set = target.material_set_new(&obj.name)?;

        let mut slots = Vec::with_capacity(slot_count);
        if mesh.materials.is_empty() {
            target.material_set_add(set, MISSING_MATERIAL, None)?;
            slots.push(MISSING_MATERIAL.to_owned());
        }
        for slot in &mesh.materials {
            let (name, shader) = match slot {
                None => (MISSING_MATERIAL, None),
                Some(name) => (name.as_str(), self.lookup_material(name)),
            };
            target.material_set_add(set, name, shader)?;
            slots.push(name.to_owned());
        }

        let own = target.instance_new(handle)?;
        target.instance_set_transform(own, &obj.transform)?;
        target.instance_bind_materials(own, set)?;

        let mut duplicates = Vec::new();
        if self.opts.include_instancers && mesh.show_instancer {
            for placement in &mesh.instances {
                let inst = target.instance_new(handle)?;
                target.instance_set_transform(inst, placement)?;
                target.instance_bind_materials(inst, set)?;
                duplicates.push(inst);
            }
        }
        let instances = 1 + duplicates.len();

        target.mesh_bind_faces(handle, faces)?;
        target.mesh_bind_vertex_buf(handle, buf)?;
        target.mesh_finalize(handle)?;

        tracing::debug!(mesh = %obj.name, faces = face_count, instances, "mesh synced");
        Ok((
            SyncedMesh {
                mesh: handle,
                set,
                own,
                duplicates,
                slots,
            },
            instances,
            face_count,
        ))
    }

    fn lookup_material(&self, name: &str) -> Option<ShaderRef> {
        match self.materials.get(name) {
            Some(shader) => shader.clone(),
            None => {
                tracing::warn!(material = %name, "slot names an unknown material");
                None
            }
        }
    }

    /// Re-translate one material and swap it into every synced slot that uses it.
    ///
    /// Returns `false` when the translated tree is unchanged and nothing was sent.
    pub fn update_material<S: RenderScene>(
        &mut self,
        scene: &SourceScene,
        name: &str,
        target: &mut S,
    ) -> ShadeResult<bool> {
        let mat = scene
            .material(name)
            .ok_or_else(|| ShadeError::scene(format!("unknown material '{name}'")))?;
        let shader = if mat.use_nodes {
            mat.tree
                .as_ref()
                .and_then(|t| self.translator.translate_material(t))
        } else {
            None
        };

        let fp = shader.as_deref().map(fingerprint_shader);
        if self.fingerprints.get(name) == Some(&fp) {
            tracing::debug!(material = %name, "unchanged, not resent");
            return Ok(false);
        }
        self.fingerprints.insert(name.to_owned(), fp);
        self.materials.insert(name.to_owned(), shader.clone());

        let mut replaced = 0;
        for synced in self.meshes.values() {
            if synced.slots.iter().any(|s| s == name) {
                replaced += target.material_set_update(synced.set, name, shader.clone())?;
            }
        }
        tracing::debug!(material = %name, slots = replaced, "material updated");
        Ok(true)
    }

    /// Resend an object's placement: a camera pose, or a mesh's own instance plus its
    /// duplication placements.
    ///
    /// Duplicates are matched to the current placements in order. A changed placement count needs
    /// a full resync; the extra side is left as is.
    pub fn update_transform<S: RenderScene>(
        &mut self,
        scene: &SourceScene,
        object: &str,
        target: &mut S,
    ) -> ShadeResult<()> {
        let obj = scene
            .object(object)
            .ok_or_else(|| ShadeError::scene(format!("unknown object '{object}'")))?;
        match &obj.data {
            ObjectData::Mesh(mesh) => {
                let synced = self.meshes.get(object).ok_or_else(|| {
                    ShadeError::scene(format!("mesh '{object}' has not been synced"))
                })?;
                target.instance_set_transform(synced.own, &obj.transform)?;
                if synced.duplicates.is_empty() {
                    return Ok(());
                }
                if synced.duplicates.len() != mesh.instances.len() {
                    tracing::warn!(
                        mesh = %object,
                        synced = synced.duplicates.len(),
                        current = mesh.instances.len(),
                        "duplication count changed, resync needed"
                    );
                }
                for (inst, placement) in synced.duplicates.iter().zip(&mesh.instances) {
                    target.instance_set_transform(*inst, placement)?;
                }
                Ok(())
            }
            ObjectData::Camera(_) => self.sync_camera(scene, obj, target),
            ObjectData::Other => Ok(()),
        }
    }

    /// Translate the world tree and submit it. Returns whether a background shader was set.
    pub fn update_world<S: RenderScene>(
        &mut self,
        scene: &SourceScene,
        target: &mut S,
    ) -> ShadeResult<bool> {
        let bg = scene
            .world()
            .and_then(|w| self.translator.translate_background(w));
        let set = bg.is_some();
        target.set_background(bg)?;
        Ok(set)
    }

    /// Mesh handle assigned to an object by the last sync.
    pub fn mesh_handle(&self, name: &str) -> Option<MeshHandle> {
        self.meshes.get(name).map(|m| m.mesh)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/session.rs"]
mod tests;
