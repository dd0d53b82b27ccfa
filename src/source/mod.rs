//! DCC-side node graphs: the JSON scene document, its validation, and the in-memory
//! [`ShaderGraph`] the translator reads.

pub mod document;
pub mod dsl;
pub mod graph;
pub mod kind;
pub(crate) mod model;
pub(crate) mod resolve;
pub mod scene;
pub(crate) mod validate;

pub use graph::ShaderGraph;
