//! Scene handoff to a render engine.
//!
//! [`RenderScene`] is the engine's construction contract; [`SceneSync`] walks a
//! [`SourceScene`](crate::source::scene::SourceScene) and drives it, translating materials on the
//! way. [`RecordingScene`] keeps everything in memory.

pub mod camera;
pub mod geometry;
pub mod scene;
pub mod session;

pub use camera::{CameraDof, CameraParams, camera_params};
pub use geometry::{Face, VertexBuffer, triangulate};
pub use scene::{
    CameraHandle, InstanceHandle, MaterialSetHandle, MeshHandle, RecordingScene, RenderScene,
    SceneTotals,
};
pub use session::{MISSING_MATERIAL, SceneSync, SyncOpts, SyncStats};
