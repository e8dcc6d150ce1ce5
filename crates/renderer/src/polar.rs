//! Polar line chart rasterization.
//!
//! Renders angle/count rows as a polar plot: the angular axis is the
//! building-facade angle (degrees, converted exactly to radians), the
//! radial axis is the observation count. Vertices are connected in the
//! order given; callers pre-sort rows by ascending angle.

use image::RgbaImage;
use tile_common::{AngleCountRow, TileError, TileResult};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Chart raster edge length in pixels. Sized so the chart fills the tile
/// below the label row when pasted at the fixed compositing offset.
pub const CHART_SIZE: u32 = 230;

/// Padding between the outer grid ring and the raster edge.
const MARGIN: f32 = 10.0;

/// Number of radial grid rings, outer ring included.
const GRID_RINGS: u32 = 4;

/// One spoke every 45 degrees.
const SPOKES: u32 = 8;

/// Render rows into a transparent-background polar chart raster.
///
/// The polar axes (rings and spokes) are always drawn, even for empty
/// input; the data polyline is drawn only when there is at least one row
/// with a positive count. Output is deterministic for identical input.
pub fn render_polar_chart(rows: &[AngleCountRow]) -> TileResult<RgbaImage> {
    let mut pixmap = Pixmap::new(CHART_SIZE, CHART_SIZE)
        .ok_or_else(|| TileError::Render("failed to allocate chart pixmap".into()))?;

    let center = CHART_SIZE as f32 / 2.0;
    let radius = center - MARGIN;

    draw_axes(&mut pixmap, center, radius)?;
    draw_series(&mut pixmap, rows, center, radius)?;

    Ok(pixmap_to_image(&pixmap))
}

/// Map a polar point to pixel coordinates. Angle is measured
/// counterclockwise from the +x axis, as in a mathematical polar plot.
fn polar_to_xy(angle_deg: f64, r: f32, center: f32) -> (f32, f32) {
    let theta = angle_deg.to_radians();
    (
        center + r * theta.cos() as f32,
        center - r * theta.sin() as f32,
    )
}

fn stroke_path(
    pixmap: &mut Pixmap,
    pb: PathBuilder,
    color: (u8, u8, u8, u8),
    width: f32,
) -> TileResult<()> {
    let path = pb
        .finish()
        .ok_or_else(|| TileError::Render("invalid chart path geometry".into()))?;

    let mut paint = Paint::default();
    paint.set_color_rgba8(color.0, color.1, color.2, color.3);
    paint.anti_alias = true;

    let stroke = Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };

    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    Ok(())
}

/// Grid rings and spokes, light gray.
fn draw_axes(pixmap: &mut Pixmap, center: f32, radius: f32) -> TileResult<()> {
    let mut grid = PathBuilder::new();
    for ring in 1..GRID_RINGS {
        grid.push_circle(center, center, radius * ring as f32 / GRID_RINGS as f32);
    }
    for spoke in 0..SPOKES {
        let angle = f64::from(spoke) * 360.0 / f64::from(SPOKES);
        let (x, y) = polar_to_xy(angle, radius, center);
        grid.move_to(center, center);
        grid.line_to(x, y);
    }
    stroke_path(pixmap, grid, (140, 140, 140, 110), 1.0)?;

    // Outer ring drawn darker to frame the plot.
    let mut outer = PathBuilder::new();
    outer.push_circle(center, center, radius);
    stroke_path(pixmap, outer, (100, 100, 100, 160), 1.0)
}

/// The data polyline, connecting vertices in input order.
fn draw_series(
    pixmap: &mut Pixmap,
    rows: &[AngleCountRow],
    center: f32,
    radius: f32,
) -> TileResult<()> {
    if rows.len() < 2 {
        return Ok(());
    }

    for row in rows {
        if !row.angle.is_finite() {
            return Err(TileError::Render(format!(
                "non-finite angle value: {}",
                row.angle
            )));
        }
    }

    let max_count = rows.iter().map(|r| r.count).max().unwrap_or(0);
    if max_count <= 0 {
        return Ok(());
    }

    let mut pb = PathBuilder::new();
    for (i, row) in rows.iter().enumerate() {
        let r = radius * (row.count as f32 / max_count as f32);
        let (x, y) = polar_to_xy(row.angle, r, center);
        if i == 0 {
            pb.move_to(x, y);
        } else {
            pb.line_to(x, y);
        }
    }

    // Plot-line blue.
    stroke_path(pixmap, pb, (31, 119, 180, 255), 1.5)
}

/// Convert the premultiplied pixmap into a straight-alpha RGBA image.
fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let mut img = RgbaImage::new(width, pixmap.height());
    for (i, px) in pixmap.pixels().iter().enumerate() {
        let c = px.demultiply();
        let x = i as u32 % width;
        let y = i as u32 / width;
        img.put_pixel(x, y, image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]));
    }
    img
}
