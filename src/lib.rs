//! shadegraph translates DCC material node graphs into a render engine's shader IR and hands
//! scenes over to the engine.
//!
//! - Load a [`SceneDocument`] (or implement [`ShaderGraph`] over a host's own graph)
//! - Translate material and world trees with a [`Translator`]
//! - Drive a [`RenderScene`] through [`SceneSync`], then apply partial updates as the scene changes
#![forbid(unsafe_code)]

mod foundation;

/// Translator diagnostics.
pub mod diagnostics;
/// Render engine shader IR.
pub mod ir;
/// Source node graphs and the scene document.
pub mod source;
/// Scene handoff to a render engine.
pub mod sync;
/// Node graph to IR translation.
pub mod translate;

pub use crate::foundation::core::{Rgba, Uv, Vec3};
pub use crate::foundation::error::{ShadeError, ShadeResult};
pub use crate::foundation::math::{EulerXyz, Matrix4, MatrixLayout};

pub use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use crate::ir::{AnyNode, Category};
pub use crate::source::document::SceneDocument;
pub use crate::source::dsl::{NodeBuilder, TreeBuilder};
pub use crate::source::graph::{NodeTree, ShaderGraph};
pub use crate::source::kind::SourceNodeKind;
pub use crate::source::scene::SourceScene;
pub use crate::sync::scene::{RecordingScene, RenderScene};
pub use crate::sync::session::{SceneSync, SyncOpts, SyncStats};
pub use crate::translate::{FallbackPolicy, Scope, TranslateOpts, Translator};
