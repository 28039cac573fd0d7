use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::RenderCtx;
use crate::scene::shapes::{GlyphCmd, TextAnchor, TextCmd};
use crate::text::{FontId, FontSystem};

use super::common::{create_pipeline, InstanceBuffer, QuadVertex, SharedResources};

// ── atlas constants ────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs in the atlas

/// Physical raster size, snapped to whole pixels so animated sizes share cache entries.
fn raster_px(size: f32, scale: f32) -> Option<f32> {
    let px = size * scale;
    if px.is_nan() || px <= 0.0 {
        return None;
    }
    Some(px.round().max(1.0))
}

// ── cached glyph ──────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone)]
struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Shelf packer state for the R8 atlas.
#[derive(Debug)]
struct ShelfCursor {
    x: u32,
    y: u32,
    row_height: u32,
    full: bool,
}

impl Default for ShelfCursor {
    fn default() -> Self {
        Self { x: GLYPH_PADDING, y: GLYPH_PADDING, row_height: 0, full: false }
    }
}

impl ShelfCursor {
    /// Reserves a `w × h` slot and returns its top-left, or `None` once the atlas is full.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full {
            return None;
        }
        if self.x + w + GLYPH_PADDING > ATLAS_SIZE {
            self.y += self.row_height + GLYPH_PADDING;
            self.x = GLYPH_PADDING;
            self.row_height = 0;
        }
        if self.y + h + GLYPH_PADDING > ATLAS_SIZE {
            self.full = true;
            return None;
        }
        let slot = (self.x, self.y);
        self.x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(slot)
    }
}

// ── pipeline ──────────────────────────────────────────────────────────────

/// Pipeline for `DrawCmd::Text` and `DrawCmd::Glyph`.
///
/// Maintains a 2048 × 2048 R8Unorm glyph atlas. Glyphs are rasterized on
/// first use via fontdue at `size × scale` physical pixels (rounded) and
/// cached, keyed by `GlyphRasterConfig` (font, glyph, pixel size). A full
/// atlas is emptied at the start of the next frame.
pub(crate) struct TextPipeline {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    atlas_bgl: Option<wgpu::BindGroupLayout>,
    atlas_bind_group: Option<wgpu::BindGroup>,

    atlas_texture: Option<wgpu::Texture>,
    cursor: ShelfCursor,
    glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,

    staged: Vec<GlyphInstance>,
    instances: InstanceBuffer<GlyphInstance>,

    layout: Layout<()>,
    missing_fonts: Vec<FontId>,
}

impl Default for TextPipeline {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            atlas_bgl: None,
            atlas_bind_group: None,
            atlas_texture: None,
            cursor: ShelfCursor::default(),
            glyph_cache: HashMap::new(),
            staged: Vec::new(),
            instances: InstanceBuffer::new("mirror glyph instances"),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
            missing_fonts: Vec::new(),
        }
    }
}

impl TextPipeline {
    pub(crate) fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, shared: &SharedResources) {
        self.ensure_atlas(ctx);
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let (Some(viewport_bgl), Some(atlas_bgl)) =
            (shared.bind_group_layout.as_ref(), self.atlas_bgl.as_ref())
        else {
            return;
        };
        self.pipeline = Some(create_pipeline(
            ctx,
            "mirror text pipeline",
            include_str!("shaders/text.wgsl"),
            &[viewport_bgl, atlas_bgl],
            &[QuadVertex::layout(), GlyphInstance::layout()],
        ));
        self.pipeline_format = Some(ctx.surface_format);
    }

    fn ensure_atlas(&mut self, ctx: &RenderCtx<'_>) {
        if self.atlas_bind_group.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mirror atlas bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("mirror glyph atlas"),
            size: wgpu::Extent3d { width: ATLAS_SIZE, height: ATLAS_SIZE, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("mirror glyph sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        self.atlas_bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mirror atlas bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(&view) },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(&sampler) },
            ],
        }));
        self.atlas_bgl = Some(bgl);
        self.atlas_texture = Some(texture);
        self.cursor = ShelfCursor::default();
        self.glyph_cache.clear();
        // A new pipeline layout is needed against the new atlas layout.
        self.pipeline = None;
    }

    pub(crate) fn begin(&mut self) {
        self.staged.clear();
        if self.cursor.full {
            self.evict_atlas();
        }
    }

    /// Forgets every cached glyph; the atlas texels are overwritten as glyphs return.
    fn evict_atlas(&mut self) {
        log::debug!("text: evicting {} cached glyphs", self.glyph_cache.len());
        self.glyph_cache.clear();
        self.cursor = ShelfCursor::default();
    }

    /// Lays out and stages one text run. Returns the instance range.
    pub(crate) fn stage_text(
        &mut self,
        ctx: &RenderCtx<'_>,
        fonts: &FontSystem,
        cmd: &TextCmd,
    ) -> Option<std::ops::Range<u32>> {
        let font = self.font(fonts, cmd.font)?;
        let scale = ctx.viewport.scale.max(0.01);
        let px = raster_px(cmd.size, scale)?;
        if cmd.text.is_empty() {
            return None;
        }

        self.layout.reset(&LayoutSettings::default());
        self.layout.append(&[font], &TextStyle::new(&cmd.text, px, 0));

        let offset = match cmd.anchor {
            TextAnchor::TopLeft => [0.0, 0.0],
            TextAnchor::Center => {
                let width = self
                    .layout
                    .glyphs()
                    .iter()
                    .map(|g| {
                        let m = font.metrics_indexed(g.key.glyph_index, px);
                        g.x - m.xmin as f32 + m.advance_width
                    })
                    .fold(0.0f32, f32::max);
                [-width * 0.5, -self.layout.height() * 0.5]
            }
        };
        let origin_x = (cmd.origin.x * scale + offset[0]).round();
        let origin_y = (cmd.origin.y * scale + offset[1]).round();

        // Snapshot so the borrow on `self.layout` ends before the atlas is touched.
        let glyphs: Vec<(GlyphRasterConfig, f32, f32, usize, usize)> = self
            .layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .map(|g| (g.key, g.x, g.y, g.width, g.height))
            .collect();

        let start = self.staged.len() as u32;
        let color = cmd.color.to_array();
        for (key, x, y, w, h) in glyphs {
            let Some(cached) = self.cached_glyph(ctx, font, key) else { continue };
            let min = [(origin_x + x) / scale, (origin_y + y) / scale];
            self.staged.push(GlyphInstance {
                dst_min: min,
                dst_max: [min[0] + w as f32 / scale, min[1] + h as f32 / scale],
                uv_min: cached.uv_min,
                uv_max: cached.uv_max,
                color,
            });
        }
        let end = self.staged.len() as u32;
        (end > start).then_some(start..end)
    }

    /// Stages a single glyph sitting on the baseline of its cell.
    pub(crate) fn stage_glyph(
        &mut self,
        ctx: &RenderCtx<'_>,
        fonts: &FontSystem,
        cmd: &GlyphCmd,
    ) -> Option<u32> {
        let font = self.font(fonts, cmd.font)?;
        let scale = ctx.viewport.scale.max(0.01);
        let px = raster_px(cmd.size, scale)?;
        let glyph_index = font.lookup_glyph_index(cmd.ch);
        if glyph_index == 0 {
            return None;
        }

        let metrics = font.metrics_indexed(glyph_index, px);
        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }
        let key = GlyphRasterConfig { glyph_index, px, font_hash: font.file_hash() };
        let cached = self.cached_glyph(ctx, font, key)?;

        let ascent = font.horizontal_line_metrics(px).map_or(px * 0.8, |m| m.ascent);
        let baseline = (cmd.origin.y * scale + ascent).round();
        let left = (cmd.origin.x * scale).round() + metrics.xmin as f32;
        let top = baseline - (metrics.height as f32 + metrics.ymin as f32);

        let min = [left / scale, top / scale];
        let index = self.staged.len() as u32;
        self.staged.push(GlyphInstance {
            dst_min: min,
            dst_max: [
                min[0] + metrics.width as f32 / scale,
                min[1] + metrics.height as f32 / scale,
            ],
            uv_min: cached.uv_min,
            uv_max: cached.uv_max,
            color: cmd.color.to_array(),
        });
        Some(index)
    }

    fn font<'f>(&mut self, fonts: &'f FontSystem, id: FontId) -> Option<&'f fontdue::Font> {
        let font = fonts.get(id);
        if font.is_none() && !self.missing_fonts.contains(&id) {
            log::warn!("text: unknown {id:?}, its text is skipped");
            self.missing_fonts.push(id);
        }
        font
    }

    /// Rasterizes and uploads `key` on first encounter.
    fn cached_glyph(
        &mut self,
        ctx: &RenderCtx<'_>,
        font: &fontdue::Font,
        key: GlyphRasterConfig,
    ) -> Option<CachedGlyph> {
        if let Some(cached) = self.glyph_cache.get(&key) {
            return Some(*cached);
        }

        let (metrics, bitmap) = font.rasterize_config(key);
        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }
        let (w, h) = (metrics.width as u32, metrics.height as u32);

        let was_full = self.cursor.full;
        let Some((gx, gy)) = self.cursor.place(w, h) else {
            if !was_full {
                log::warn!(
                    "text: glyph atlas is full ({ATLAS_SIZE}×{ATLAS_SIZE}); evicting on the next frame"
                );
            }
            return None;
        };
        let atlas = self.atlas_texture.as_ref()?;

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            &bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let atlas_f = ATLAS_SIZE as f32;
        let cached = CachedGlyph {
            uv_min: [gx as f32 / atlas_f, gy as f32 / atlas_f],
            uv_max: [(gx + w) as f32 / atlas_f, (gy + h) as f32 / atlas_f],
        };
        self.glyph_cache.insert(key, cached);
        Some(cached)
    }

    pub(crate) fn upload(&mut self, ctx: &RenderCtx<'_>) {
        self.instances.upload(ctx, &self.staged);
    }

    pub(crate) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>, shared: &SharedResources) -> bool {
        let (Some(pipeline), Some(instances), Some(atlas)) = (
            self.pipeline.as_ref(),
            self.instances.buffer(),
            self.atlas_bind_group.as_ref(),
        ) else {
            return false;
        };
        rpass.set_pipeline(pipeline);
        if !shared.bind_quad(rpass) {
            return false;
        }
        rpass.set_bind_group(1, atlas, &[]);
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
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shelf_wraps_to_next_row() {
        let mut shelf = ShelfCursor::default();
        assert_eq!(shelf.place(2000, 10), Some((1, 1)));
        assert_eq!(shelf.place(100, 20), Some((1, 12)));
    }

    #[test]
    fn shelf_reports_full_once_out_of_rows() {
        let mut shelf = ShelfCursor::default();
        assert!(shelf.place(ATLAS_SIZE - 2, ATLAS_SIZE - 2).is_some());
        assert_eq!(shelf.place(10, 10), None);
        assert!(shelf.full);
    }

    #[test]
    fn full_atlas_is_evicted_on_next_frame() {
        let mut text = TextPipeline::default();
        assert!(text.cursor.place(ATLAS_SIZE - 2, ATLAS_SIZE - 2).is_some());
        assert_eq!(text.cursor.place(10, 10), None);
        let key = GlyphRasterConfig { glyph_index: 7, px: 12.0, font_hash: 1 };
        text.glyph_cache.insert(key, CachedGlyph { uv_min: [0.0; 2], uv_max: [0.5; 2] });

        text.begin();
        assert!(text.glyph_cache.is_empty());
        assert!(!text.cursor.full);
        assert_eq!(text.cursor.place(10, 10), Some((1, 1)));
    }

    #[test]
    fn room_left_keeps_the_cache() {
        let mut text = TextPipeline::default();
        assert!(text.cursor.place(10, 10).is_some());
        let key = GlyphRasterConfig { glyph_index: 7, px: 12.0, font_hash: 1 };
        text.glyph_cache.insert(key, CachedGlyph { uv_min: [0.0; 2], uv_max: [0.5; 2] });
        text.begin();
        assert_eq!(text.glyph_cache.len(), 1);
    }

    // ── raster size ───────────────────────────────────────────────────────

    #[test]
    fn raster_size_snaps_to_whole_pixels() {
        assert_eq!(raster_px(12.3, 1.0), Some(12.0));
        assert_eq!(raster_px(12.6, 1.0), Some(13.0));
        assert_eq!(raster_px(10.0, 1.25), Some(13.0));
        assert_eq!(raster_px(0.2, 1.0), Some(1.0));
        assert_eq!(raster_px(0.0, 1.0), None);
        assert_eq!(raster_px(f32::NAN, 1.0), None);
    }
}
