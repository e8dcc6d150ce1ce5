//! Tile compositing: border, label, and chart placement.

use image::{imageops, ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use once_cell::sync::Lazy;
use rusttype::{Font, Scale};
use tile_common::TileCoord;

/// Tile edge length in pixels.
pub const TILE_SIZE: u32 = 256;

/// Fixed offset for pasting the chart raster, just below the label row.
const CHART_OFFSET: (i64, i64) = (1, 25);

/// Semi-transparent black border (#0004).
const BORDER_COLOR: Rgba<u8> = Rgba([0, 0, 0, 0x44]);

const TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
const FONT_SIZE: f32 = 10.0;
const LABEL_POS: (i32, i32) = (2, 8);

/// Compose the final 256x256 tile.
///
/// With a positive total: border rectangle, "zoom/x/y Total: n" label, and
/// the chart raster pasted with alpha at a fixed offset. With a zero total
/// the untouched transparent canvas is returned; callers skip producing a
/// chart for that case.
pub fn compose_tile(total: i64, coord: TileCoord, chart: Option<&RgbaImage>) -> RgbaImage {
    let mut canvas = ImageBuffer::from_pixel(TILE_SIZE, TILE_SIZE, Rgba([0, 0, 0, 0]));

    if total <= 0 {
        return canvas;
    }

    draw_hollow_rect_mut(
        &mut canvas,
        Rect::at(0, 0).of_size(TILE_SIZE, TILE_SIZE),
        BORDER_COLOR,
    );

    let label = format!(
        "{} Total: {}",
        coord.path_key(),
        group_thousands(total)
    );
    draw_label(&mut canvas, &label, LABEL_POS.0, LABEL_POS.1);

    if let Some(chart) = chart {
        imageops::overlay(&mut canvas, chart, CHART_OFFSET.0, CHART_OFFSET.1);
    }

    canvas
}

/// Format an integer with thousands separators: 1234567 -> "1,234,567".
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ============================================================================
// Text rendering
// ============================================================================

/// Candidate system fonts, tried in order at first use.
const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
];

static SYSTEM_FONT: Lazy<Option<Font<'static>>> = Lazy::new(load_system_font);

fn load_system_font() -> Option<Font<'static>> {
    for path in FONT_PATHS {
        if let Ok(data) = std::fs::read(path) {
            if let Some(font) = Font::try_from_vec(data) {
                tracing::debug!(path, "loaded tile label font");
                return Some(font);
            }
        }
    }
    tracing::warn!("no system font found, using built-in bitmap glyphs for tile labels");
    None
}

/// Draw the label with the system font, or the bitmap fallback when no
/// font file is available. A missing font must never fail the tile.
fn draw_label(canvas: &mut RgbaImage, text: &str, x: i32, y: i32) {
    match SYSTEM_FONT.as_ref() {
        Some(font) => {
            draw_text_mut(canvas, TEXT_COLOR, x, y, Scale::uniform(FONT_SIZE), font, text);
        }
        None => draw_bitmap_text(canvas, text, x, y),
    }
}

// 5x7 bitmap glyphs covering the label alphabet (digits, separators, and
// "Total"). Each row's lower 5 bits are pixels, MSB on the left.
const GLYPH_W: i32 = 6;

#[rustfmt::skip]
const GLYPHS_5X7: &[(char, [u8; 7])] = &[
    (' ', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    (',', [0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x08]),
    ('-', [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00]),
    ('/', [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00]),
    ('0', [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E]),
    ('1', [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('2', [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F]),
    ('3', [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E]),
    ('4', [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02]),
    ('5', [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E]),
    ('6', [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E]),
    ('7', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08]),
    ('8', [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E]),
    ('9', [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C]),
    (':', [0x00, 0x00, 0x04, 0x00, 0x00, 0x04, 0x00]),
    ('T', [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
    ('a', [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F]),
    ('l', [0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('o', [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E]),
    ('t', [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06]),
];

fn draw_bitmap_text(canvas: &mut RgbaImage, text: &str, x: i32, y: i32) {
    let mut cursor = x;
    for ch in text.chars() {
        if let Some((_, rows)) = GLYPHS_5X7.iter().find(|(g, _)| *g == ch) {
            for (dy, row) in rows.iter().enumerate() {
                for dx in 0..5 {
                    if row & (0x10 >> dx) != 0 {
                        let px = cursor + dx;
                        let py = y + dy as i32;
                        if px >= 0
                            && py >= 0
                            && (px as u32) < canvas.width()
                            && (py as u32) < canvas.height()
                        {
                            canvas.put_pixel(px as u32, py as u32, TEXT_COLOR);
                        }
                    }
                }
            }
        }
        cursor += GLYPH_W;
    }
}
