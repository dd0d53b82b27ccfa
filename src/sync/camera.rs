use crate::foundation::core::Vec3;
use crate::foundation::math::{EulerXyz, Matrix4};
use crate::source::scene::{CameraData, FocusTarget, RenderSettings, SourceScene};
use serde::Serialize;

/// Everything the engine camera needs, in engine units.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CameraParams {
    pub fov_degrees: f32,
    pub position: Vec3,
    /// XYZ euler from the scale-normalized world matrix.
    pub rotation: EulerXyz,
    pub resolution: (u32, u32),
    pub dof: Option<CameraDof>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CameraDof {
    pub fstops: f32,
    pub focus_distance: f32,
}

pub fn camera_params(
    cam: &CameraData,
    transform: &Matrix4,
    render: RenderSettings,
    scene: &SourceScene,
    depth_of_field: bool,
) -> CameraParams {
    let position = transform.to_translation();
    let dof = cam
        .dof
        .as_ref()
        .filter(|_| depth_of_field)
        .and_then(|d| {
            let focus_distance = match &d.focus {
                FocusTarget::Distance(v) => *v,
                FocusTarget::Object(name) => {
                    let Some(target) = scene.object(name) else {
                        tracing::warn!(focus = %name, "focus object not in scene, depth of field off");
                        return None;
                    };
                    target.transform.to_translation().sub(position).length()
                }
            };
            Some(CameraDof {
                fstops: d.fstops,
                focus_distance,
            })
        });

    CameraParams {
        fov_degrees: cam.fov_radians.to_degrees(),
        position,
        rotation: transform.to_euler_xyz(),
        resolution: render.scaled(),
        dof,
    }
}
