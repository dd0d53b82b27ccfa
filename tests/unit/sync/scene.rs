use super::*;
use crate::foundation::core::{Rgba, Vec3};
use crate::foundation::math::EulerXyz;
use crate::ir::color::ColorNode;
use crate::ir::shader::ShaderNode;

fn buf() -> VertexBuffer {
    VertexBuffer {
        positions: vec![Vec3::ZERO; 3],
        ..VertexBuffer::default()
    }
}

#[test]
fn mesh_lifecycle_is_recorded() {
    let mut s = RecordingScene::new();
    let m = s.mesh_new("Cube").unwrap();
    let set = s.material_set_new("Cube").unwrap();
    let inst = s.instance_new(m).unwrap();
    s.instance_set_transform(inst, &Matrix4::translation(1.0, 0.0, 0.0))
        .unwrap();
    s.instance_bind_materials(inst, set).unwrap();
    s.mesh_bind_vertex_buf(m, buf()).unwrap();
    s.mesh_finalize(m).unwrap();

    let mesh = s.mesh("Cube").unwrap();
    assert!(mesh.finalized);
    let insts = s.instances_of("Cube");
    assert_eq!(insts.len(), 1);
    assert_eq!(insts[0].material_set, Some(set));
    assert_eq!(insts[0].transform, Matrix4::translation(1.0, 0.0, 0.0));
    assert_eq!(
        s.totals(),
        SceneTotals {
            meshes: 1,
            instances: 1,
            material_sets: 1,
            cameras: 0
        }
    );
}

#[test]
fn finalize_needs_a_vertex_buffer() {
    let mut s = RecordingScene::new();
    let m = s.mesh_new("Bare").unwrap();
    assert!(s.mesh_finalize(m).is_err());
}

#[test]
fn recreating_a_mesh_drops_its_instances() {
    let mut s = RecordingScene::new();
    let m = s.mesh_new("Cube").unwrap();
    s.instance_new(m).unwrap();
    s.instance_new(m).unwrap();
    s.mesh_bind_vertex_buf(m, buf()).unwrap();

    let again = s.mesh_new("Cube").unwrap();
    assert_eq!(again, m);
    assert!(s.instances_of("Cube").is_empty());
    assert!(s.mesh("Cube").unwrap().vertices.is_none());
    assert_eq!(s.totals().instances, 0);
    assert_eq!(s.totals().meshes, 1);
}

#[test]
fn material_set_update_replaces_every_slot_with_the_name() {
    let mut s = RecordingScene::new();
    let set = s.material_set_new("Obj").unwrap();
    let red = ShaderNode::diffuse(ColorNode::constant(Rgba::new(1.0, 0.0, 0.0, 1.0)));
    assert_eq!(s.material_set_add(set, "Red", None).unwrap(), 0);
    assert_eq!(s.material_set_add(set, "Blue", None).unwrap(), 1);
    assert_eq!(s.material_set_add(set, "Red", None).unwrap(), 2);

    assert_eq!(s.material_set_update(set, "Red", Some(red.clone())).unwrap(), 2);
    let rec = s.material_set("Obj").unwrap();
    assert_eq!(rec.slots[0].shader.as_ref(), Some(&red));
    assert!(rec.slots[1].shader.is_none());
    assert_eq!(rec.slots[2].shader.as_ref(), Some(&red));

    // Upsert clears the slots.
    let again = s.material_set_new("Obj").unwrap();
    assert_eq!(again, set);
    assert!(s.material_set_by_handle(set).unwrap().slots.is_empty());
}

#[test]
fn cameras_upsert_and_background_counts_submissions() {
    let mut s = RecordingScene::new();
    let a = s.camera_new("Cam").unwrap();
    let params = CameraParams {
        fov_degrees: 50.0,
        position: Vec3::ZERO,
        rotation: EulerXyz {
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
        },
        resolution: (1920, 1080),
        dof: None,
    };
    s.camera_set(a, &params).unwrap();
    assert_eq!(s.camera_new("Cam").unwrap(), a);
    assert_eq!(s.camera("Cam").unwrap().params.as_ref(), Some(&params));

    s.set_background(None).unwrap();
    s.set_background(None).unwrap();
    assert_eq!(s.background_submissions(), 2);
    assert!(s.background().is_none());
}

#[test]
fn stale_handles_are_scene_errors() {
    let mut s = RecordingScene::new();
    assert!(s.mesh_finalize(MeshHandle(3)).is_err());
    assert!(s.instance_new(MeshHandle(0)).is_err());
    assert!(
        s.material_set_add(MaterialSetHandle(1), "x", None)
            .is_err()
    );
}
