use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::{LineCap, LineCmd};

use super::common::{create_pipeline, InstanceBuffer, QuadVertex, SharedResources};

/// Pipeline for `DrawCmd::Line`: stroked segments evaluated as a distance field.
///
/// Butt caps stop at the endpoints; round caps extend by half the width.
pub(crate) struct LinePipeline {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    staged: Vec<LineInstance>,
    instances: InstanceBuffer<LineInstance>,
}

impl Default for LinePipeline {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            staged: Vec::new(),
            instances: InstanceBuffer::new("mirror line instances"),
        }
    }
}

impl LinePipeline {
    pub(crate) fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, shared: &SharedResources) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let Some(bgl) = shared.bind_group_layout.as_ref() else { return };
        self.pipeline = Some(create_pipeline(
            ctx,
            "mirror line pipeline",
            include_str!("shaders/line.wgsl"),
            &[bgl],
            &[QuadVertex::layout(), LineInstance::layout()],
        ));
        self.pipeline_format = Some(ctx.surface_format);
    }

    pub(crate) fn begin(&mut self) {
        self.staged.clear();
    }

    pub(crate) fn stage(&mut self, cmd: &LineCmd) -> Option<u32> {
        if cmd.width.is_nan() || cmd.width <= 0.0 || !cmd.from.is_finite() || !cmd.to.is_finite() {
            return None;
        }
        let cap = match cmd.cap {
            LineCap::Butt => 0.0,
            LineCap::Round => 1.0,
        };
        let index = self.staged.len() as u32;
        self.staged.push(LineInstance {
            p0: [cmd.from.x, cmd.from.y],
            p1: [cmd.to.x, cmd.to.y],
            params: [cmd.width * 0.5, cap, 0.0, 0.0],
            color: cmd.color.to_array(),
        });
        Some(index)
    }

    pub(crate) fn upload(&mut self, ctx: &RenderCtx<'_>) {
        self.instances.upload(ctx, &self.staged);
    }

    pub(crate) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>, shared: &SharedResources) -> bool {
        let (Some(pipeline), Some(instances)) = (self.pipeline.as_ref(), self.instances.buffer())
        else {
            return false;
        };
        rpass.set_pipeline(pipeline);
        if !shared.bind_quad(rpass) {
            return false;
        }
        rpass.set_vertex_buffer(1, instances.slice(..));
        true
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: std::ops::Range<u32>) {
        rpass.draw_indexed(0..6, 0, range);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  p0      [f32; 2]   loc 1
///  offset  8  p1      [f32; 2]   loc 2
///  offset 16  params  [f32; 4]   loc 3  (.x = half width, .y = round cap)
///  offset 32  color   [f32; 4]   loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LineInstance {
    p0: [f32; 2],
    p1: [f32; 2],
    params: [f32; 4],
    color: [f32; 4],
}

impl LineInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // p0
        2 => Float32x2, // p1
        3 => Float32x4, // params
        4 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
