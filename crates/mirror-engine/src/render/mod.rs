//! GPU rendering subsystem.
//!
//! [`SceneRenderer`] consumes a `scene::DrawList` and issues GPU commands via
//! wgpu. It owns one pipeline per shape family and draws the whole list in a
//! single pass so z-order holds across shape types.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod ctx;
mod scene_renderer;
mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use scene_renderer::SceneRenderer;
