//! Per-family GPU pipelines driven by `SceneRenderer`.
//!
//! Each pipeline stages CPU instances while the draw list is walked, uploads
//! them once, and then draws sub-ranges inside the shared render pass.

pub(super) mod common;

pub(super) mod circle;
pub(super) mod line;
pub(super) mod mesh;
pub(super) mod text;
