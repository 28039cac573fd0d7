use std::ops::Range;

use crate::coords::Rect;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawKind, DrawList};
use crate::text::FontSystem;

use super::shapes::circle::CirclePipeline;
use super::shapes::common::{logical_clip_to_scissor, SharedResources};
use super::shapes::line::LinePipeline;
use super::shapes::mesh::MeshPipeline;
use super::shapes::text::TextPipeline;

/// Consecutive draw items that share a pipeline and a clip rect.
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    kind: DrawKind,
    range: Range<u32>,
    clip: Option<Rect>,
}

/// Draws a whole `DrawList` in paint order inside one render pass.
///
/// Items are staged per pipeline, uploaded once, and replayed as batches so
/// a circle recorded after a line stays on top of it even though they come
/// from different pipelines.
#[derive(Default)]
pub struct SceneRenderer {
    shared: SharedResources,
    circles: CirclePipeline,
    lines: LinePipeline,
    meshes: MeshPipeline,
    text: TextPipeline,
    batches: Vec<Batch>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws `draw_list` over whatever `target` already holds.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        if draw_list.is_empty() || !ctx.viewport.is_valid() {
            return;
        }

        self.shared.ensure(ctx);
        self.circles.ensure_pipeline(ctx, &self.shared);
        self.lines.ensure_pipeline(ctx, &self.shared);
        self.meshes.ensure_pipeline(ctx, &self.shared);
        self.text.ensure_pipeline(ctx, &self.shared);

        self.stage(ctx, draw_list, fonts);
        if self.batches.is_empty() {
            return;
        }

        self.shared.write_viewport(ctx);
        self.circles.upload(ctx);
        self.lines.upload(ctx);
        self.meshes.upload(ctx);
        self.text.upload(ctx);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("mirror scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let mut bound: Option<DrawKind> = None;
        for batch in &self.batches {
            let Some((sx, sy, sw, sh)) = logical_clip_to_scissor(batch.clip, ctx.viewport) else {
                continue;
            };
            if bound != Some(batch.kind) {
                let ok = match batch.kind {
                    DrawKind::Circle => self.circles.bind(&mut rpass, &self.shared),
                    DrawKind::Line => self.lines.bind(&mut rpass, &self.shared),
                    DrawKind::Mesh => self.meshes.bind(&mut rpass, &self.shared),
                    DrawKind::Text => self.text.bind(&mut rpass, &self.shared),
                };
                if !ok {
                    bound = None;
                    continue;
                }
                bound = Some(batch.kind);
            }
            rpass.set_scissor_rect(sx, sy, sw, sh);
            match batch.kind {
                DrawKind::Circle => self.circles.draw(&mut rpass, batch.range.clone()),
                DrawKind::Line => self.lines.draw(&mut rpass, batch.range.clone()),
                DrawKind::Mesh => self.meshes.draw(&mut rpass, batch.range.clone()),
                DrawKind::Text => self.text.draw(&mut rpass, batch.range.clone()),
            }
        }
    }

    /// Walks the list back-to-front, staging instances and recording batches.
    fn stage(&mut self, ctx: &RenderCtx<'_>, draw_list: &mut DrawList, fonts: &FontSystem) {
        self.batches.clear();
        self.circles.begin();
        self.lines.begin();
        self.meshes.begin();
        self.text.begin();

        for item in draw_list.iter_in_paint_order() {
            let range = match &item.cmd {
                DrawCmd::Circle(c) => self.circles.stage(c).map(|i| i..i + 1),
                DrawCmd::Line(l) => self.lines.stage(l).map(|i| i..i + 1),
                DrawCmd::Rect(r) => self.meshes.stage_rect(r),
                DrawCmd::Triangle(t) => self.meshes.stage_triangle(t),
                DrawCmd::Text(t) => self.text.stage_text(ctx, fonts, t),
                DrawCmd::Glyph(g) => self.text.stage_glyph(ctx, fonts, g).map(|i| i..i + 1),
            };
            if let Some(range) = range {
                push_batch(&mut self.batches, item.cmd.kind(), range, item.clip_rect);
            }
        }
    }
}

/// Appends `range` to the last batch when it continues it, else opens a new batch.
fn push_batch(batches: &mut Vec<Batch>, kind: DrawKind, range: Range<u32>, clip: Option<Rect>) {
    if let Some(last) = batches.last_mut() {
        if last.kind == kind && last.clip == clip && last.range.end == range.start {
            last.range.end = range.end;
            return;
        }
    }
    batches.push(Batch { kind, range, clip });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_runs_merge() {
        let mut batches = Vec::new();
        push_batch(&mut batches, DrawKind::Circle, 0..1, None);
        push_batch(&mut batches, DrawKind::Circle, 1..2, None);
        push_batch(&mut batches, DrawKind::Circle, 2..3, None);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].range, 0..3);
    }

    #[test]
    fn kind_or_clip_change_splits() {
        let clip = Some(Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut batches = Vec::new();
        push_batch(&mut batches, DrawKind::Circle, 0..1, None);
        push_batch(&mut batches, DrawKind::Line, 0..1, None);
        push_batch(&mut batches, DrawKind::Circle, 1..2, None);
        push_batch(&mut batches, DrawKind::Circle, 2..3, clip);
        let kinds: Vec<_> = batches.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![DrawKind::Circle, DrawKind::Line, DrawKind::Circle, DrawKind::Circle]);
    }
}
