use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::RenderCtx;
use crate::scene::shapes::{RectCmd, TriangleCmd};

use super::common::{create_pipeline, InstanceBuffer, SharedResources};

/// Pipeline for solid `Rect` and `Triangle` commands.
///
/// Both are expanded on the CPU into colored triangle-list vertices; there
/// is no anti-aliasing, which is fine for axis-aligned fills and small marks.
pub(crate) struct MeshPipeline {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    staged: Vec<MeshVertex>,
    vertices: InstanceBuffer<MeshVertex>,
}

impl Default for MeshPipeline {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            staged: Vec::new(),
            vertices: InstanceBuffer::new("mirror mesh vertices"),
        }
    }
}

impl MeshPipeline {
    pub(crate) fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, shared: &SharedResources) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let Some(bgl) = shared.bind_group_layout.as_ref() else { return };
        self.pipeline = Some(create_pipeline(
            ctx,
            "mirror mesh pipeline",
            include_str!("shaders/mesh.wgsl"),
            &[bgl],
            &[MeshVertex::layout()],
        ));
        self.pipeline_format = Some(ctx.surface_format);
    }

    pub(crate) fn begin(&mut self) {
        self.staged.clear();
    }

    /// Stages two triangles. Returns the vertex range.
    pub(crate) fn stage_rect(&mut self, cmd: &RectCmd) -> Option<std::ops::Range<u32>> {
        let r = cmd.rect.normalized();
        if r.is_empty() {
            return None;
        }
        let (min, max) = (r.origin, r.max());
        let tl = min;
        let tr = Vec2::new(max.x, min.y);
        let br = max;
        let bl = Vec2::new(min.x, max.y);
        Some(self.push_vertices(&[tl, tr, br, tl, br, bl], cmd.color))
    }

    pub(crate) fn stage_triangle(&mut self, cmd: &TriangleCmd) -> Option<std::ops::Range<u32>> {
        if !cmd.points.iter().all(|p| p.is_finite()) {
            return None;
        }
        Some(self.push_vertices(&cmd.points, cmd.color))
    }

    fn push_vertices(&mut self, points: &[Vec2], color: Color) -> std::ops::Range<u32> {
        let start = self.staged.len() as u32;
        let color = color.to_array();
        self.staged.extend(points.iter().map(|p| MeshVertex { pos: [p.x, p.y], color }));
        start..self.staged.len() as u32
    }

    pub(crate) fn upload(&mut self, ctx: &RenderCtx<'_>) {
        self.vertices.upload(ctx, &self.staged);
    }

    pub(crate) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>, shared: &SharedResources) -> bool {
        let (Some(pipeline), Some(vertices), Some(bg)) =
            (self.pipeline.as_ref(), self.vertices.buffer(), shared.bind_group.as_ref())
        else {
            return false;
        };
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bg, &[]);
        rpass.set_vertex_buffer(0, vertices.slice(..));
        true
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: std::ops::Range<u32>) {
        rpass.draw(range, 0..1);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct MeshVertex {
    pos: [f32; 2],
    color: [f32; 4],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;

    #[test]
    fn rect_expands_to_six_vertices() {
        let mut pipe = MeshPipeline::default();
        let cmd = RectCmd::new(Rect::new(0.0, 0.0, 4.0, 2.0), Color::BLACK);
        assert_eq!(pipe.stage_rect(&cmd), Some(0..6));
        let tri = TriangleCmd { points: [Vec2::zero(); 3], color: Color::WHITE };
        assert_eq!(pipe.stage_triangle(&tri), Some(6..9));
    }

    #[test]
    fn empty_rect_is_dropped() {
        let mut pipe = MeshPipeline::default();
        assert_eq!(pipe.stage_rect(&RectCmd::new(Rect::default(), Color::BLACK)), None);
    }
}
