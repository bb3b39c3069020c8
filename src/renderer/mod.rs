//! WebGPU rendering module
//!
//! One fullscreen triangle; the whole scene is SDF-composited in the
//! fragment shader.

pub mod sdf_pipeline;

pub use sdf_pipeline::SdfRenderState;
