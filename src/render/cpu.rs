use vello_cpu::kurbo::{Affine, BezPath, Cap, Join, Stroke};

use crate::foundation::color::Color;
use crate::foundation::core::{Point, SurfaceDesc};
use crate::foundation::error::TurtleResult;
use crate::render::backend::{Cursor, FrameRGBA, GridStyle, RasterBackend, StrokeStyle};
use crate::render::composite::over_in_place;

/// CPU raster backend powered by `vello_cpu`.
///
/// The surface persists across frames. Draw calls accumulate in a pending render context;
/// [`RasterBackend::flush`] rasterizes them into a scratch pixmap and composites that over the
/// surface, so strokes from earlier frames are never redrawn.
pub struct CpuRenderer {
    desc: SurfaceDesc,
    width: u16,
    height: u16,
    surface: vello_cpu::Pixmap,
    scratch: vello_cpu::Pixmap,
    pending: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for CpuRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRenderer")
            .field("desc", &self.desc)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

impl CpuRenderer {
    /// Allocate a transparent surface for `desc`.
    pub fn new(desc: SurfaceDesc) -> TurtleResult<Self> {
        let (width, height) = desc.backing_size()?;
        Ok(Self {
            desc,
            width,
            height,
            surface: vello_cpu::Pixmap::new(width, height),
            scratch: vello_cpu::Pixmap::new(width, height),
            pending: None,
        })
    }

    /// Surface this renderer was created for.
    pub fn desc(&self) -> SurfaceDesc {
        self.desc
    }

    fn logical_to_backing(&self) -> Affine {
        Affine::scale(self.desc.device_scale)
    }

    fn pending_ctx(&mut self) -> &mut vello_cpu::RenderContext {
        let (width, height) = (self.width, self.height);
        let transform = self.logical_to_backing();
        self.pending.get_or_insert_with(|| {
            let mut ctx = vello_cpu::RenderContext::new(width, height);
            ctx.set_transform(transform);
            ctx
        })
    }

    /// Rasterize a context into the scratch pixmap and composite it over `dst`.
    fn composite_ctx(
        scratch: &mut vello_cpu::Pixmap,
        mut ctx: vello_cpu::RenderContext,
        dst: &mut [u8],
    ) -> TurtleResult<()> {
        ctx.flush();
        clear_pixmap(scratch, [0, 0, 0, 0]);
        ctx.render_to_pixmap(scratch);
        over_in_place(dst, scratch.data_as_u8_slice())
    }
}

impl RasterBackend for CpuRenderer {
    fn clear(&mut self, background: Color) -> TurtleResult<()> {
        self.pending = None;
        clear_pixmap(&mut self.surface, background.to_premul_rgba8());
        Ok(())
    }

    fn draw_grid(&mut self, grid: &GridStyle) -> TurtleResult<()> {
        if !grid.enabled || !(grid.spacing.is_finite() && grid.spacing >= 1.0) {
            return Ok(());
        }
        let w = f64::from(self.desc.canvas.width);
        let h = f64::from(self.desc.canvas.height);
        let spacing = grid.spacing;
        let stroke = Stroke::new(grid.width);
        let color = paint(grid.color);

        let ctx = self.pending_ctx();
        ctx.set_paint(color);
        ctx.set_stroke(stroke);

        let mut path = BezPath::new();
        let mut x = 0.0;
        while x < w {
            path.move_to((x, 0.0));
            path.line_to((x, h));
            x += spacing;
        }
        let mut y = 0.0;
        while y < h {
            path.move_to((0.0, y));
            path.line_to((w, y));
            y += spacing;
        }
        ctx.stroke_path(&path);
        Ok(())
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) -> TurtleResult<()> {
        let stroke = Stroke::new(style.width)
            .with_caps(Cap::Round)
            .with_join(Join::Round);
        let ctx = self.pending_ctx();
        ctx.set_paint(paint(style.color));
        ctx.set_stroke(stroke);

        let mut path = BezPath::new();
        path.move_to(point_to_cpu(from));
        path.line_to(point_to_cpu(to));
        ctx.stroke_path(&path);
        Ok(())
    }

    fn fill_polygon(&mut self, path: &[Point], color: Color, alpha: f32) -> TurtleResult<()> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(());
        };
        let mut poly = BezPath::new();
        poly.move_to(point_to_cpu(*first));
        for p in rest {
            poly.line_to(point_to_cpu(*p));
        }
        poly.close_path();

        let alpha = alpha.clamp(0.0, 1.0);
        let ctx = self.pending_ctx();
        ctx.set_paint(paint(color));
        if alpha < 1.0 {
            ctx.push_opacity_layer(alpha);
        }
        ctx.fill_path(&poly);
        if alpha < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }

    fn flush(&mut self) -> TurtleResult<()> {
        let Some(ctx) = self.pending.take() else {
            return Ok(());
        };
        Self::composite_ctx(
            &mut self.scratch,
            ctx,
            self.surface.data_as_u8_slice_mut(),
        )
    }

    fn snapshot(&mut self, cursor: Option<&Cursor>) -> TurtleResult<FrameRGBA> {
        self.flush()?;
        let mut data = self.surface.data_as_u8_slice().to_vec();

        if let Some(cursor) = cursor {
            let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
            ctx.set_transform(self.logical_to_backing());
            ctx.set_paint(paint(cursor.color));
            ctx.fill_path(&cursor_path(cursor));
            Self::composite_ctx(&mut self.scratch, ctx, &mut data)?;
        }

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
            premultiplied: true,
        })
    }
}

/// Arrowhead pointing along the cursor heading, tip `size` ahead of the position.
fn cursor_path(cursor: &Cursor) -> BezPath {
    let at = |angle_deg: f64, dist: f64| {
        let rad = angle_deg.to_radians();
        vello_cpu::kurbo::Point::new(
            cursor.position.x + dist * rad.cos(),
            cursor.position.y + dist * rad.sin(),
        )
    };
    let size = cursor.size.max(1.0);
    let mut path = BezPath::new();
    path.move_to(at(cursor.heading, size));
    path.line_to(at(cursor.heading + 140.0, size * 0.8));
    path.line_to(at(cursor.heading + 180.0, size * 0.3));
    path.line_to(at(cursor.heading - 140.0, size * 0.8));
    path.close_path();
    path
}

fn paint(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, premul: [u8; 4]) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&premul);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
