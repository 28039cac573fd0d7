use bytemuck::{Pod, Zeroable};

use crate::paint::{sample_stops, ColorStop, Paint};
use crate::render::RenderCtx;
use crate::scene::shapes::CircleCmd;

use super::common::{create_pipeline, InstanceBuffer, QuadVertex, SharedResources};

/// Gradient stops carried per instance. Longer ramps are resampled.
pub(crate) const MAX_GRADIENT_STOPS: usize = 6;

const PAINT_SOLID: f32 = 0.0;
const PAINT_LINEAR: f32 = 1.0;
const PAINT_RADIAL: f32 = 2.0;

/// Pipeline for `DrawCmd::Circle`: anti-aliased discs and rings.
///
/// Supported paints:
/// - `Paint::Solid`
/// - `Paint::LinearGradient` and `Paint::RadialGradient` with up to six stops
pub(crate) struct CirclePipeline {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    staged: Vec<CircleInstance>,
    instances: InstanceBuffer<CircleInstance>,
    warned_resample: bool,
}

impl Default for CirclePipeline {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            staged: Vec::new(),
            instances: InstanceBuffer::new("mirror circle instances"),
            warned_resample: false,
        }
    }
}

impl CirclePipeline {
    pub(crate) fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, shared: &SharedResources) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let Some(bgl) = shared.bind_group_layout.as_ref() else { return };
        self.pipeline = Some(create_pipeline(
            ctx,
            "mirror circle pipeline",
            include_str!("shaders/circle.wgsl"),
            &[bgl],
            &[QuadVertex::layout(), CircleInstance::layout()],
        ));
        self.pipeline_format = Some(ctx.surface_format);
    }

    pub(crate) fn begin(&mut self) {
        self.staged.clear();
    }

    /// Stages one circle. Returns the instance index, or `None` when nothing would be visible.
    pub(crate) fn stage(&mut self, cmd: &CircleCmd) -> Option<u32> {
        if cmd.radius.is_nan() || cmd.radius <= 0.0 || !cmd.center.is_finite() {
            return None;
        }
        if cmd.paint.stops().len() > MAX_GRADIENT_STOPS && !self.warned_resample {
            log::debug!("gradient has more than {MAX_GRADIENT_STOPS} stops; resampling");
            self.warned_resample = true;
        }
        let paint = resolve_paint(&cmd.paint);
        let index = self.staged.len() as u32;
        self.staged.push(CircleInstance {
            center: [cmd.center.x, cmd.center.y],
            radii: [cmd.radius, cmd.inner_radius],
            paint: paint.header,
            geom: paint.geom,
            offsets_a: [paint.offsets[0], paint.offsets[1], paint.offsets[2], paint.offsets[3]],
            offsets_b: [paint.offsets[4], paint.offsets[5], 0.0, 0.0],
            colors: paint.colors,
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

// ── paint resolution ──────────────────────────────────────────────────────

/// Paint flattened to what the circle shader reads.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedPaint {
    /// kind, spread code, stop count, unused
    pub header: [f32; 4],
    /// linear: start.xy end.xy; radial: center.xy inner outer
    pub geom: [f32; 4],
    pub offsets: [f32; MAX_GRADIENT_STOPS],
    pub colors: [[f32; 4]; MAX_GRADIENT_STOPS],
}

pub(crate) fn resolve_paint(paint: &Paint) -> ResolvedPaint {
    let (kind, spread, geom) = match paint {
        Paint::Solid(c) => {
            return ResolvedPaint {
                header: [PAINT_SOLID, 0.0, 1.0, 0.0],
                geom: [0.0; 4],
                offsets: [0.0; MAX_GRADIENT_STOPS],
                colors: [c.to_array(); MAX_GRADIENT_STOPS],
            };
        }
        Paint::LinearGradient(g) => {
            (PAINT_LINEAR, g.spread, [g.start.x, g.start.y, g.end.x, g.end.y])
        }
        Paint::RadialGradient(g) => (
            PAINT_RADIAL,
            g.spread,
            [g.center.x, g.center.y, g.inner_radius, g.outer_radius],
        ),
    };

    let stops = fit_stops(paint.stops());
    let mut offsets = [1.0; MAX_GRADIENT_STOPS];
    let last = stops.last().map(|s| s.color.to_array()).unwrap_or_default();
    let mut colors = [last; MAX_GRADIENT_STOPS];
    for (i, s) in stops.iter().enumerate() {
        offsets[i] = s.t;
        colors[i] = s.color.to_array();
    }

    ResolvedPaint {
        header: [kind, spread.code(), stops.len().max(1) as f32, 0.0],
        geom,
        offsets,
        colors,
    }
}

/// Returns at most [`MAX_GRADIENT_STOPS`] stops, resampling evenly when there are more.
fn fit_stops(stops: &[ColorStop]) -> Vec<ColorStop> {
    if stops.len() <= MAX_GRADIENT_STOPS {
        return stops.to_vec();
    }
    let first = stops[0].t;
    let span = stops[stops.len() - 1].t - first;
    (0..MAX_GRADIENT_STOPS)
        .map(|i| {
            let t = first + span * i as f32 / (MAX_GRADIENT_STOPS - 1) as f32;
            ColorStop::new(t, sample_stops(stops, t))
        })
        .collect()
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (176 bytes):
///
///  offset   0  center     [f32; 2]       loc 1
///  offset   8  radii      [f32; 2]       loc 2  (.x = outer, .y = inner)
///  offset  16  paint      [f32; 4]       loc 3
///  offset  32  geom       [f32; 4]       loc 4
///  offset  48  offsets_a  [f32; 4]       loc 5
///  offset  64  offsets_b  [f32; 4]       loc 6
///  offset  80  colors     [[f32; 4]; 6]  loc 7..12
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radii: [f32; 2],
    paint: [f32; 4],
    geom: [f32; 4],
    offsets_a: [f32; 4],
    offsets_b: [f32; 4],
    colors: [[f32; 4]; MAX_GRADIENT_STOPS],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 12] = wgpu::vertex_attr_array![
        1 => Float32x2,  // center
        2 => Float32x2,  // radii
        3 => Float32x4,  // paint
        4 => Float32x4,  // geom
        5 => Float32x4,  // offsets_a
        6 => Float32x4,  // offsets_b
        7 => Float32x4,  // colors[0]
        8 => Float32x4,
        9 => Float32x4,
        10 => Float32x4,
        11 => Float32x4,
        12 => Float32x4  // colors[5]
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::{Color, RadialGradient};

    #[test]
    fn instance_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<CircleInstance>(), 176);
    }

    #[test]
    fn solid_paint_fills_every_color_slot() {
        let p = resolve_paint(&Paint::Solid(Color::WHITE));
        assert_eq!(p.header[0], PAINT_SOLID);
        assert!(p.colors.iter().all(|c| *c == [1.0; 4]));
    }

    #[test]
    fn radial_paint_carries_radii_and_stops() {
        let g = RadialGradient::new(
            Vec2::new(5.0, 6.0),
            0.0,
            40.0,
            vec![ColorStop::new(0.0, Color::WHITE), ColorStop::new(1.0, Color::BLACK)],
        );
        let p = resolve_paint(&Paint::RadialGradient(g));
        assert_eq!(p.header[0], PAINT_RADIAL);
        assert_eq!(p.header[2], 2.0);
        assert_eq!(p.geom, [5.0, 6.0, 0.0, 40.0]);
        assert_eq!(p.colors[1], Color::BLACK.to_array());
        // Unused slots repeat the last stop.
        assert_eq!(p.colors[5], Color::BLACK.to_array());
    }

    #[test]
    fn long_ramps_are_resampled_keeping_the_ends() {
        let stops: Vec<_> = (0..9)
            .map(|i| {
                let c = if i % 2 == 0 { Color::WHITE } else { Color::BLACK };
                ColorStop::new(i as f32 / 8.0, c)
            })
            .collect();
        let fitted = fit_stops(&stops);
        assert_eq!(fitted.len(), MAX_GRADIENT_STOPS);
        assert_eq!(fitted[0].t, 0.0);
        assert_eq!(fitted[MAX_GRADIENT_STOPS - 1].t, 1.0);
        assert_eq!(fitted[MAX_GRADIENT_STOPS - 1].color, Color::WHITE);
    }

    #[test]
    fn zero_radius_is_not_staged() {
        let mut pipe = CirclePipeline::default();
        let cmd = CircleCmd::new(Vec2::zero(), 0.0, 0.0, Paint::Solid(Color::WHITE));
        assert_eq!(pipe.stage(&cmd), None);
    }
}
