//! Lyon-based surface: tessellates draw calls into a flat triangle list.
//!
//! Each field renders into its own `VectorSurface`; the web bridge hands
//! the buffer pointer to the host, which uploads it as-is.
//!
//! # Usage
//!
//! ```ignore
//! let mut surface = VectorSurface::new();
//! field.render(&mut surface);
//! let floats = surface.as_floats(); // x, y, r, g, b, a per vertex
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use super::surface::{RadialGradient, Rgba, StrokeStyle, Surface};

/// Per-vertex data for the triangle list.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24

    fn at(x: f32, y: f32, color: Rgba) -> Self {
        Self { x, y, r: color.r, g: color.g, b: color.b, a: color.a }
    }
}

/// Solid color for fill tessellation.
struct SolidFill {
    color: Rgba,
}

impl FillVertexConstructor<VectorVertex> for SolidFill {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex::at(p.x, p.y, self.color)
    }
}

/// Per-vertex radial gradient color for fill tessellation.
struct GradientFill<'a> {
    gradient: &'a RadialGradient,
}

impl FillVertexConstructor<VectorVertex> for GradientFill<'_> {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex::at(p.x, p.y, self.gradient.color_at(Vec2::new(p.x, p.y)))
    }
}

struct SolidStroke {
    color: Rgba,
}

impl StrokeVertexConstructor<VectorVertex> for SolidStroke {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex::at(p.x, p.y, self.color)
    }
}

fn polygon_path(points: &[Vec2], closed: bool) -> Path {
    let mut builder = Path::builder();
    builder.begin(point(points[0].x, points[0].y));
    for p in &points[1..] {
        builder.line_to(point(p.x, p.y));
    }
    if closed {
        builder.close();
    } else {
        builder.end(false);
    }
    builder.build()
}

/// Tessellating surface holding one frame of geometry.
pub struct VectorSurface {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
}

impl VectorSurface {
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    /// Pre-allocate room for `max_vertices` vertices.
    pub fn with_capacity(max_vertices: usize) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices * VectorVertex::FLOATS),
        }
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// Raw pointer to the flat float buffer (for the host to copy).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn as_floats(&self) -> &[f32] {
        &self.buffer
    }

    /// Flush indexed geometry to the flat buffer as a triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(bytemuck::cast_slice(std::slice::from_ref(v)));
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        let path = polygon_path(points, true);
        let result = self.fill_tess.tessellate_path(
            &path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, SolidFill { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }

    fn stroke_polyline(&mut self, points: &[Vec2], closed: bool, width: f32, color: Rgba) {
        if points.len() < 2 || width <= 0.0 || color.a <= 0.0 {
            return;
        }
        let path = polygon_path(points, closed);
        let result = self.stroke_tess.tessellate_path(
            &path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, SolidStroke { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }
}

impl Default for VectorSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for VectorSurface {
    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        let points = [
            origin,
            Vec2::new(origin.x + size.x, origin.y),
            origin + size,
            Vec2::new(origin.x, origin.y + size.y),
        ];
        self.fill_polygon(&points, color);
    }

    fn stroke_path(&mut self, points: &[Vec2], closed: bool, style: &StrokeStyle) {
        // Blur is approximated by a wider, fainter stroke underneath.
        if let Some(glow) = style.glow {
            self.stroke_polyline(points, closed, style.width + glow.blur, glow.color.scale_alpha(0.5));
        }
        self.stroke_polyline(points, closed, style.width, style.color);
    }

    fn fill_gradient(&mut self, points: &[Vec2], gradient: &RadialGradient) {
        if points.len() < 3 {
            return;
        }
        let path = polygon_path(points, true);
        let result = self.fill_tess.tessellate_path(
            &path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, GradientFill { gradient }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::GradientStop;
    use std::mem::size_of;

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn fill_rect_produces_two_triangles() {
        let mut surface = VectorSurface::new();
        surface.fill_rect(Vec2::ZERO, Vec2::new(100.0, 50.0), Rgba::new(1.0, 1.0, 1.0, 0.02));
        assert_eq!(surface.vertex_count(), 6);
    }

    #[test]
    fn glow_adds_geometry_under_stroke() {
        let points = [Vec2::ZERO, Vec2::new(100.0, 0.0), Vec2::new(50.0, 80.0)];
        let color = Rgba::new(0.5, 0.4, 1.0, 0.6);

        let mut plain = VectorSurface::new();
        plain.stroke_path(&points, true, &StrokeStyle::new(color, 2.0));

        let mut glowing = VectorSurface::new();
        glowing.stroke_path(&points, true, &StrokeStyle::new(color, 2.0).with_glow(30.0, color));

        assert!(plain.vertex_count() > 0);
        assert!(glowing.vertex_count() > plain.vertex_count());
    }

    #[test]
    fn gradient_fill_colors_vertices_by_distance() {
        let gradient = RadialGradient {
            center: Vec2::ZERO,
            radius: 10.0,
            stops: vec![
                GradientStop { offset: 0.0, color: Rgba::new(1.0, 1.0, 1.0, 0.9) },
                GradientStop { offset: 1.0, color: Rgba::new(0.8, 0.8, 0.9, 0.7) },
            ],
        };
        let mut surface = VectorSurface::new();
        let square = [
            Vec2::new(-10.0, -10.0),
            Vec2::new(10.0, -10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(-10.0, 10.0),
        ];
        surface.fill_gradient(&square, &gradient);
        assert_eq!(surface.vertex_count(), 6);
        // Corners lie beyond the radius and take the outer stop.
        let alpha = surface.as_floats()[5];
        assert!((alpha - 0.7).abs() < 1e-5);
    }

    #[test]
    fn transparent_and_degenerate_strokes_are_skipped() {
        let mut surface = VectorSurface::new();
        surface.stroke_path(&[Vec2::ZERO], false, &StrokeStyle::new(Rgba::new(1.0, 1.0, 1.0, 1.0), 1.0));
        surface.stroke_path(
            &[Vec2::ZERO, Vec2::ONE],
            false,
            &StrokeStyle::new(Rgba::new(1.0, 1.0, 1.0, 0.0), 1.0),
        );
        assert_eq!(surface.vertex_count(), 0);
    }

    #[test]
    fn clear_resets_buffer() {
        let mut surface = VectorSurface::new();
        surface.fill_rect(Vec2::ZERO, Vec2::ONE * 10.0, Rgba::new(1.0, 0.0, 0.0, 1.0));
        surface.clear();
        assert_eq!(surface.vertex_count(), 0);
    }
}
